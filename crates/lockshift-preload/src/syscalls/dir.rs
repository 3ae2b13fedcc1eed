//! `scandir`: directory listing with a virtualized directory argument.

use libc::{c_char, c_int};

use crate::reals;
use crate::redirect::redirect_c_path;

type SelectorFn = unsafe extern "C" fn(*const libc::dirent) -> c_int;
type CompareFn =
    unsafe extern "C" fn(*const *const libc::dirent, *const *const libc::dirent) -> c_int;
type ScandirFn = unsafe extern "C" fn(
    *const c_char,
    *mut *mut *mut libc::dirent,
    Option<SelectorFn>,
    Option<CompareFn>,
) -> c_int;

/// Only the directory argument is virtualized. Selector and comparator
/// pass through untouched, and entry names come back exactly as produced
/// against the redirected directory.
#[no_mangle]
pub unsafe extern "C" fn scandir(
    dir: *const c_char,
    namelist: *mut *mut *mut libc::dirent,
    selector: Option<SelectorFn>,
    compare: Option<CompareFn>,
) -> c_int {
    let Some(real) = real_fn!(reals::SCANDIR, ScandirFn) else {
        reals::resolve_failed("scandir");
        return -1;
    };
    match redirect_c_path(dir) {
        Some(redirected) => real(redirected.as_ptr(), namelist, selector, compare),
        None => real(dir, namelist, selector, compare),
    }
}
