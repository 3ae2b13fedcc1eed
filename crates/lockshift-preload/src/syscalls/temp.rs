//! `mktemp`: unique-name generation against a caller-owned template
//! buffer.

use libc::c_char;
use std::ptr;

use crate::reals;
use crate::redirect::redirect_c_path;

type MktempFn = unsafe extern "C" fn(*mut c_char) -> *mut c_char;

/// Length of the trailing `XXXXXX` placeholder mktemp(3) replaces.
const TEMPLATE_SUFFIX_LEN: usize = 6;

/// The unique name is generated against the redirected location, then only
/// the generated suffix bytes are spliced back into the caller's buffer:
/// the caller keeps its own directory prefix while the uniqueness probe
/// ran where the file will actually be created. Assumes the fixed
/// six-byte suffix of mktemp(3). On failure the caller's buffer receives
/// the empty string, the canonical "could not generate" outcome.
#[no_mangle]
pub unsafe extern "C" fn mktemp(template: *mut c_char) -> *mut c_char {
    let Some(real) = real_fn!(reals::MKTEMP, MktempFn) else {
        reals::resolve_failed("mktemp");
        if !template.is_null() {
            *template = 0;
        }
        return template;
    };

    let Some(redirected) = redirect_c_path(template.cast_const()) else {
        return real(template);
    };

    let mut scratch = redirected.into_bytes_with_nul();
    real(scratch.as_mut_ptr().cast::<c_char>());
    if scratch[0] == 0 {
        *template = 0;
        return template;
    }

    let caller_len = libc::strlen(template);
    let generated_len = libc::strlen(scratch.as_ptr().cast::<c_char>());
    if caller_len >= TEMPLATE_SUFFIX_LEN && generated_len >= TEMPLATE_SUFFIX_LEN {
        ptr::copy_nonoverlapping(
            scratch.as_ptr().add(generated_len - TEMPLATE_SUFFIX_LEN).cast::<c_char>(),
            template.add(caller_len - TEMPLATE_SUFFIX_LEN),
            TEMPLATE_SUFFIX_LEN,
        );
    }
    template
}
