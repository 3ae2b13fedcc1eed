//! Single- and dual-path hooks: `unlink`, `remove`, `chmod`, `link`,
//! `rename`.

use libc::{c_char, c_int, mode_t};

use crate::reals::{self, RealSymbol};
use crate::redirect::redirect_c_path;

type PathFn = unsafe extern "C" fn(*const c_char) -> c_int;
type ChmodFn = unsafe extern "C" fn(*const c_char, mode_t) -> c_int;
type TwoPathFn = unsafe extern "C" fn(*const c_char, *const c_char) -> c_int;

unsafe fn one_path_impl(sym: &RealSymbol, name: &str, path: *const c_char) -> c_int {
    let Some(real) = real_fn!(sym, PathFn) else {
        reals::resolve_failed(name);
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr()),
        None => real(path),
    }
}

#[no_mangle]
pub unsafe extern "C" fn unlink(path: *const c_char) -> c_int {
    one_path_impl(&reals::UNLINK, "unlink", path)
}

#[no_mangle]
pub unsafe extern "C" fn remove(path: *const c_char) -> c_int {
    one_path_impl(&reals::REMOVE, "remove", path)
}

#[no_mangle]
pub unsafe extern "C" fn chmod(path: *const c_char, mode: mode_t) -> c_int {
    let Some(real) = real_fn!(reals::CHMOD, ChmodFn) else {
        reals::resolve_failed("chmod");
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr(), mode),
        None => real(path, mode),
    }
}

/// Both slots are virtualized independently; a single real call is issued
/// with whichever subset was substituted, so a monitored source can be
/// linked or renamed against an unmonitored destination and vice versa.
unsafe fn two_path_impl(
    sym: &RealSymbol,
    name: &str,
    first: *const c_char,
    second: *const c_char,
) -> c_int {
    let Some(real) = real_fn!(sym, TwoPathFn) else {
        reals::resolve_failed(name);
        return -1;
    };
    let new_first = redirect_c_path(first);
    let new_second = redirect_c_path(second);
    let first_ptr = new_first.as_ref().map_or(first, |c| c.as_ptr());
    let second_ptr = new_second.as_ref().map_or(second, |c| c.as_ptr());
    real(first_ptr, second_ptr)
}

#[no_mangle]
pub unsafe extern "C" fn link(from: *const c_char, to: *const c_char) -> c_int {
    two_path_impl(&reals::LINK, "link", from, to)
}

#[no_mangle]
pub unsafe extern "C" fn rename(old: *const c_char, new: *const c_char) -> c_int {
    two_path_impl(&reals::RENAME, "rename", old, new)
}
