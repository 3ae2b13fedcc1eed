//! Real libc symbol storage.
//!
//! Hooks resolve their underlying implementation with `dlsym(RTLD_NEXT)`,
//! so the lookup never depends on static initialization order relative to
//! other interposed libraries. The resolved pointer is cached in an
//! `AtomicPtr`; the cache is write-once monotonic, so concurrent first
//! calls racing on it are benign.

use libc::{c_char, c_void};
use std::sync::atomic::{AtomicPtr, Ordering};

pub(crate) struct RealSymbol {
    ptr: AtomicPtr<c_void>,
    name: &'static str,
}

impl RealSymbol {
    /// `name` must be NUL-terminated.
    pub const fn new(name: &'static str) -> Self {
        Self {
            ptr: AtomicPtr::new(std::ptr::null_mut()),
            name,
        }
    }

    pub unsafe fn get(&self) -> Option<*mut c_void> {
        let p = self.ptr.load(Ordering::Acquire);
        if !p.is_null() {
            return Some(p);
        }
        let f = libc::dlsym(libc::RTLD_NEXT, self.name.as_ptr() as *const c_char);
        if f.is_null() {
            return None;
        }
        self.ptr.store(f, Ordering::Release);
        Some(f)
    }
}

/// Resolves a [`RealSymbol`] into a typed function pointer, or `None` when
/// the symbol cannot be found behind this library.
macro_rules! real_fn {
    ($sym:expr, $ty:ty) => {
        unsafe { $sym.get() }
            .map(|p| unsafe { std::mem::transmute::<*mut libc::c_void, $ty>(p) })
    };
}

/// A hook whose real implementation cannot be resolved returns its
/// platform failure indicator after this diagnostic, without touching the
/// filesystem.
pub(crate) fn resolve_failed(name: &str) {
    eprintln!("lockshift: CRITICAL: cannot resolve {name}");
}

pub(crate) static OPEN: RealSymbol = RealSymbol::new("open\0");
pub(crate) static OPEN64: RealSymbol = RealSymbol::new("open64\0");
pub(crate) static CREAT: RealSymbol = RealSymbol::new("creat\0");
pub(crate) static FOPEN: RealSymbol = RealSymbol::new("fopen\0");
pub(crate) static FOPEN64: RealSymbol = RealSymbol::new("fopen64\0");
pub(crate) static UNLINK: RealSymbol = RealSymbol::new("unlink\0");
pub(crate) static REMOVE: RealSymbol = RealSymbol::new("remove\0");
pub(crate) static MKTEMP: RealSymbol = RealSymbol::new("mktemp\0");
pub(crate) static STAT: RealSymbol = RealSymbol::new("stat\0");
pub(crate) static XSTAT: RealSymbol = RealSymbol::new("__xstat\0");
pub(crate) static XSTAT64: RealSymbol = RealSymbol::new("__xstat64\0");
pub(crate) static LINK: RealSymbol = RealSymbol::new("link\0");
pub(crate) static RENAME: RealSymbol = RealSymbol::new("rename\0");
pub(crate) static CHMOD: RealSymbol = RealSymbol::new("chmod\0");
pub(crate) static SCANDIR: RealSymbol = RealSymbol::new("scandir\0");
