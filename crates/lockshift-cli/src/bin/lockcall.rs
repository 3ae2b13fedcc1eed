//! Thin driver over raw libc entry points, used by the end-to-end tests.
//!
//! Shells and coreutils reach most of these operations through `*at`
//! variants that bypass the interposed symbols, so the tests spawn this
//! binary under the preload library to hit the classic entry points
//! directly. Exit code 0 on success, 1 on libc failure, 2 on usage error.

use std::ffi::{CStr, CString};
use std::process::exit;

use libc::{c_char, c_int};

extern "C" {
    fn mktemp(template: *mut c_char) -> *mut c_char;
    fn scandir(
        dir: *const c_char,
        namelist: *mut *mut *mut libc::dirent,
        selector: Option<unsafe extern "C" fn(*const libc::dirent) -> c_int>,
        compare: Option<
            unsafe extern "C" fn(*const *const libc::dirent, *const *const libc::dirent) -> c_int,
        >,
    ) -> c_int;
    fn alphasort(a: *const *const libc::dirent, b: *const *const libc::dirent) -> c_int;
}

fn cstr(arg: &str) -> CString {
    CString::new(arg).expect("argument contains a NUL byte")
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match args
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .as_slice()
    {
        ["open", path] => {
            let path = cstr(path);
            let fd = unsafe { libc::open(path.as_ptr(), libc::O_RDONLY) };
            if fd >= 0 {
                unsafe { libc::close(fd) };
                0
            } else {
                1
            }
        }
        ["link", from, to] => {
            let (from, to) = (cstr(from), cstr(to));
            i32::from(unsafe { libc::link(from.as_ptr(), to.as_ptr()) } != 0)
        }
        ["rename", from, to] => {
            let (from, to) = (cstr(from), cstr(to));
            i32::from(unsafe { libc::rename(from.as_ptr(), to.as_ptr()) } != 0)
        }
        ["mktemp", template] => {
            let mut buf = cstr(template).into_bytes_with_nul();
            unsafe { mktemp(buf.as_mut_ptr().cast::<c_char>()) };
            let generated = unsafe { CStr::from_ptr(buf.as_ptr().cast::<c_char>()) };
            println!("{}", generated.to_string_lossy());
            i32::from(buf[0] == 0)
        }
        ["scandir", dir] => {
            let dir = cstr(dir);
            let mut namelist: *mut *mut libc::dirent = std::ptr::null_mut();
            let n = unsafe { scandir(dir.as_ptr(), &mut namelist, None, Some(alphasort)) };
            if n < 0 {
                1
            } else {
                for i in 0..n as usize {
                    let entry = unsafe { *namelist.add(i) };
                    let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
                    println!("{}", name.to_string_lossy());
                    unsafe { libc::free(entry.cast()) };
                }
                unsafe { libc::free(namelist.cast()) };
                0
            }
        }
        _ => {
            eprintln!("usage: lockcall open|mktemp|scandir <path> | link|rename <from> <to>");
            2
        }
    };
    exit(code);
}
