//! # lockshift-core
//!
//! Path-virtualization engine for device-lock directories.
//!
//! Legacy serial-port locking code writes lock files under system
//! directories (`/var/lock`, `/run/lock`) that only root or a privileged
//! group can write. This crate decides whether a path lies under one of
//! those roots ([`find_lock_prefix`]), rewrites it into a per-user
//! location below `$XDG_RUNTIME_DIR/lock` ([`rewrite`]), and combines the
//! two with a fail-open policy ([`redirect`]): whenever redirection cannot
//! apply, the caller keeps its original path and the underlying filesystem
//! operation decides the outcome.
//!
//! No state is carried between calls. The runtime base directory is read
//! from the environment on every rewrite, so a changed environment is
//! observed immediately and nothing needs lifecycle management.

pub mod flags;
pub mod logging;
pub mod prefix;
pub mod rewrite;
pub mod testing;

pub use prefix::{find_lock_prefix, LOCK_PATHS};
pub use rewrite::{rewrite, RewriteError, MAX_PATH, RUNTIME_DIR_VAR};

/// Full redirection pipeline for one candidate path.
///
/// Returns `None` when the path is out of scope or the rewrite failed; a
/// failed rewrite additionally emits a diagnostic line on stderr. Callers
/// fall back to the original path on `None`.
pub fn redirect(path: &str) -> Option<String> {
    let prefix = find_lock_prefix(path)?;
    match rewrite(path, prefix) {
        Ok(redirected) => {
            tracing::debug!(path, redirected = redirected.as_str(), "lock path redirected");
            Some(redirected)
        }
        Err(err) => {
            eprintln!("lockshift: {err}");
            None
        }
    }
}
