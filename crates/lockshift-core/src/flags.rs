//! Open-flag classification shared with the interception layer.

use libc::c_int;

/// Whether an `open`-family call consumes its trailing mode argument.
///
/// Mirrors glibc's `__OPEN_NEEDS_MODE`: `O_CREAT` always takes a mode,
/// while `O_TMPFILE` only counts when all of its bits are set, because the
/// constant includes `O_DIRECTORY` and a plain directory open must not
/// match.
pub fn open_needs_mode(flags: c_int) -> bool {
    flags & libc::O_CREAT != 0 || flags & libc::O_TMPFILE == libc::O_TMPFILE
}
