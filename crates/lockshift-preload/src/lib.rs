//! # lockshift-preload
//!
//! LD_PRELOAD interception layer for device-lock paths.
//!
//! The library exports drop-in replacements for the libc entry points that
//! serial-port locking code uses to manage its lock files. Every hook
//! resolves the real implementation with `dlsym(RTLD_NEXT)`, virtualizes
//! any path argument through [`lockshift-core`](lockshift_core), and
//! forwards the call unchanged otherwise. A caller never observes a new
//! error from the layer itself: when redirection cannot apply, the hook
//! degrades to the original path and the real call decides the outcome.
//!
//! ## Usage
//!
//! ```bash
//! LD_PRELOAD=/path/to/liblockshift_preload.so minicom
//! ```
//!
//! Redirected lock files land below `$XDG_RUNTIME_DIR/lock`.

#![allow(clippy::missing_safety_doc)]

#[macro_use]
mod reals;
mod redirect;
pub mod syscalls;
