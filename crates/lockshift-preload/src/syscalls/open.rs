//! Hooks that open or create a file: `open`, `open64`, `creat`, `fopen`,
//! `fopen64`.

use libc::{c_char, c_int, mode_t, FILE};

use lockshift_core::flags::open_needs_mode;

use crate::reals::{self, RealSymbol};
use crate::redirect::redirect_c_path;

type OpenFn = unsafe extern "C" fn(*const c_char, c_int, mode_t) -> c_int;
type CreatFn = unsafe extern "C" fn(*const c_char, mode_t) -> c_int;
type FopenFn = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut FILE;

unsafe fn open_impl(
    sym: &RealSymbol,
    name: &str,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
) -> c_int {
    let Some(real) = real_fn!(sym, OpenFn) else {
        reals::resolve_failed(name);
        return -1;
    };
    // The trailing register is garbage unless the flags say a mode was
    // actually passed.
    let mode = if open_needs_mode(flags) { mode } else { 0 };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr(), flags, mode),
        None => real(path, flags, mode),
    }
}

#[no_mangle]
pub unsafe extern "C" fn open(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    open_impl(&reals::OPEN, "open", path, flags, mode)
}

#[no_mangle]
pub unsafe extern "C" fn open64(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    open_impl(&reals::OPEN64, "open64", path, flags, mode)
}

#[no_mangle]
pub unsafe extern "C" fn creat(path: *const c_char, mode: mode_t) -> c_int {
    let Some(real) = real_fn!(reals::CREAT, CreatFn) else {
        reals::resolve_failed("creat");
        return -1;
    };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr(), mode),
        None => real(path, mode),
    }
}

unsafe fn fopen_impl(
    sym: &RealSymbol,
    name: &str,
    path: *const c_char,
    modes: *const c_char,
) -> *mut FILE {
    let Some(real) = real_fn!(sym, FopenFn) else {
        reals::resolve_failed(name);
        return std::ptr::null_mut();
    };
    match redirect_c_path(path) {
        Some(redirected) => real(redirected.as_ptr(), modes),
        None => real(path, modes),
    }
}

#[no_mangle]
pub unsafe extern "C" fn fopen(path: *const c_char, modes: *const c_char) -> *mut FILE {
    fopen_impl(&reals::FOPEN, "fopen", path, modes)
}

#[no_mangle]
pub unsafe extern "C" fn fopen64(path: *const c_char, modes: *const c_char) -> *mut FILE {
    fopen_impl(&reals::FOPEN64, "fopen64", path, modes)
}
