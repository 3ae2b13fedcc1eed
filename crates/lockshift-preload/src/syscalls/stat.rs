//! Metadata-query hooks.
//!
//! `stat` covers glibc 2.33+ where the symbol is exported directly; the
//! `__xstat` family covers binaries linked against the older versioned
//! interface.

use libc::{c_char, c_int};

use crate::reals;
use crate::redirect::redirect_c_path;

type StatFn = unsafe extern "C" fn(*const c_char, *mut libc::stat) -> c_int;
type XstatFn = unsafe extern "C" fn(c_int, *const c_char, *mut libc::stat) -> c_int;
type Xstat64Fn = unsafe extern "C" fn(c_int, *const c_char, *mut libc::stat64) -> c_int;

#[no_mangle]
pub unsafe extern "C" fn stat(path: *const c_char, buf: *mut libc::stat) -> c_int {
    let Some(real) = real_fn!(reals::STAT, StatFn) else {
        reals::resolve_failed("stat");
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr(), buf),
        None => real(path, buf),
    }
}

#[no_mangle]
pub unsafe extern "C" fn __xstat(ver: c_int, path: *const c_char, buf: *mut libc::stat) -> c_int {
    let Some(real) = real_fn!(reals::XSTAT, XstatFn) else {
        reals::resolve_failed("__xstat");
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(ver, redirected.as_ptr(), buf),
        None => real(ver, path, buf),
    }
}

#[no_mangle]
pub unsafe extern "C" fn __xstat64(
    ver: c_int,
    path: *const c_char,
    buf: *mut libc::stat64,
) -> c_int {
    let Some(real) = real_fn!(reals::XSTAT64, Xstat64Fn) else {
        reals::resolve_failed("__xstat64");
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(ver, redirected.as_ptr(), buf),
        None => real(ver, path, buf),
    }
}
