//! Second stage of a redirect: map a matched path into the per-user lock
//! directory, materializing missing directory levels on the way.

use std::env;
use std::fs::DirBuilder;
use std::io;
use std::os::unix::fs::DirBuilderExt;

/// Environment variable naming the per-user writable base directory.
pub const RUNTIME_DIR_VAR: &str = "XDG_RUNTIME_DIR";

/// Upper bound for any composed path, matching the platform limit the
/// intercepted C callers operate under.
pub const MAX_PATH: usize = libc::PATH_MAX as usize;

/// Every variant is recoverable: the caller falls back to the original,
/// unredirected path.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("XDG_RUNTIME_DIR not set, lock files are not redirected")]
    RuntimeDirUnset,
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("redirected path would exceed PATH_MAX")]
    PathTooLong,
}

/// Rewrites `path` by substituting `prefix` with `<runtime-base>/lock`.
///
/// `prefix` must be a value previously returned by
/// [`crate::find_lock_prefix`] for this path. The lock root and its
/// `lockdev` subdirectory are created with owner-only permissions if
/// missing; an already existing directory is success, so concurrent calls
/// racing on creation are benign and the whole operation is idempotent.
pub fn rewrite(path: &str, prefix: &str) -> Result<String, RewriteError> {
    let base = env::var(RUNTIME_DIR_VAR).map_err(|_| RewriteError::RuntimeDirUnset)?;

    let lock_dir = format!("{base}/lock");
    if lock_dir.len() >= MAX_PATH {
        return Err(RewriteError::PathTooLong);
    }
    ensure_dir(&lock_dir)?;

    // Some consumers keep their lock files one level deeper, so the nested
    // namespace is materialized alongside the lock root.
    let lockdev_dir = format!("{lock_dir}/lockdev");
    if lockdev_dir.len() >= MAX_PATH {
        return Err(RewriteError::PathTooLong);
    }
    ensure_dir(&lockdev_dir)?;

    let suffix = &path[prefix.len()..];
    let redirected = format!("{lock_dir}{suffix}");
    if redirected.len() >= MAX_PATH {
        return Err(RewriteError::PathTooLong);
    }
    Ok(redirected)
}

fn ensure_dir(path: &str) -> Result<(), RewriteError> {
    match DirBuilder::new().mode(0o700).create(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(RewriteError::CreateDir {
            path: path.to_string(),
            source: err,
        }),
    }
}
