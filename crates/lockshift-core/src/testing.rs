//! Test environment helpers.
//!
//! The rewriter reads `XDG_RUNTIME_DIR` fresh on every call, so tests that
//! exercise it need to mutate the process environment. [`RuntimeDirGuard`]
//! serializes that mutation behind a process-wide lock and restores the
//! previous value on drop, keeping concurrently running tests isolated.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

use crate::rewrite::RUNTIME_DIR_VAR;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Scoped override of the per-user runtime base directory.
pub struct RuntimeDirGuard {
    temp: Option<TempDir>,
    previous: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl RuntimeDirGuard {
    /// Points `XDG_RUNTIME_DIR` at a fresh temporary directory.
    pub fn new() -> Self {
        let lock = lock_env();
        let temp = TempDir::new().expect("create temp runtime dir");
        let previous = std::env::var_os(RUNTIME_DIR_VAR);
        std::env::set_var(RUNTIME_DIR_VAR, temp.path());
        Self {
            temp: Some(temp),
            previous,
            _lock: lock,
        }
    }

    /// Removes `XDG_RUNTIME_DIR` for the guard's lifetime.
    pub fn unset() -> Self {
        let lock = lock_env();
        let previous = std::env::var_os(RUNTIME_DIR_VAR);
        std::env::remove_var(RUNTIME_DIR_VAR);
        Self {
            temp: None,
            previous,
            _lock: lock,
        }
    }

    /// Points `XDG_RUNTIME_DIR` at an arbitrary existing path.
    pub fn pointing_at(path: &Path) -> Self {
        let lock = lock_env();
        let previous = std::env::var_os(RUNTIME_DIR_VAR);
        std::env::set_var(RUNTIME_DIR_VAR, path);
        Self {
            temp: None,
            previous,
            _lock: lock,
        }
    }

    /// The temporary runtime base directory, for guards created with
    /// [`RuntimeDirGuard::new`].
    pub fn base(&self) -> &Path {
        self.temp
            .as_ref()
            .expect("guard does not own a runtime dir")
            .path()
    }
}

impl Default for RuntimeDirGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RuntimeDirGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => std::env::set_var(RUNTIME_DIR_VAR, value),
            None => std::env::remove_var(RUNTIME_DIR_VAR),
        }
    }
}

fn lock_env() -> MutexGuard<'static, ()> {
    // A test that panicked while holding the lock has still restored or
    // poisoned nothing we depend on; keep going with the inner guard.
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
