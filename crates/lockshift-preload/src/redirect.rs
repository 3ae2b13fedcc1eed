//! Fail-open glue between the C hook surface and the core engine.

use libc::c_char;
use std::ffi::{CStr, CString};

/// Rewrites a caller-supplied path if it lies under a monitored lock
/// directory.
///
/// Any obstacle along the way yields `None` and the hook keeps the
/// original argument: null pointer, non-UTF-8 path, path out of scope,
/// missing runtime dir, directory-creation failure, or an overlong
/// composed path.
pub(crate) unsafe fn redirect_c_path(path: *const c_char) -> Option<CString> {
    if path.is_null() {
        return None;
    }
    let path = CStr::from_ptr(path).to_str().ok()?;
    let redirected = lockshift_core::redirect(path)?;
    CString::new(redirected).ok()
}
