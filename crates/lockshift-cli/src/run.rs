//! `lockshift run`: launch a target command with the preload library
//! injected through `LD_PRELOAD`.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lockshift_core::RUNTIME_DIR_VAR;

const LIBRARY_NAME: &str = "liblockshift_preload.so";

pub fn cmd_run(library: Option<&Path>, command: &[String]) -> Result<()> {
    if command.is_empty() {
        anyhow::bail!("No command specified");
    }

    let library = match library {
        Some(path) => path.to_path_buf(),
        None => find_preload_library()?,
    };

    // Redirection silently disables itself without the runtime base; warn
    // up front rather than letting the target fail on a read-only lock dir.
    if env::var_os(RUNTIME_DIR_VAR).is_none() {
        eprintln!("lockshift: {RUNTIME_DIR_VAR} not set, lock files will not be redirected");
    }

    let mut cmd = std::process::Command::new(&command[0]);
    cmd.args(&command[1..]);
    cmd.env("LD_PRELOAD", preload_value(&library));

    tracing::debug!(library = %library.display(), target = %command[0], "launching with preload");

    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute: {}", command[0]))?;
    std::process::exit(status.code().unwrap_or(1));
}

/// Prepends our library to any preload chain already in the environment.
fn preload_value(library: &Path) -> String {
    match env::var("LD_PRELOAD") {
        Ok(existing) if !existing.is_empty() => format!("{}:{existing}", library.display()),
        _ => library.display().to_string(),
    }
}

pub(crate) fn find_preload_library() -> Result<PathBuf> {
    // Development and installed layouts: next to the executable, then the
    // cargo target directories relative to the working directory.
    if let Ok(exe) = env::current_exe() {
        for dir in exe.ancestors().skip(1).take(3) {
            let candidate = dir.join(LIBRARY_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    for dir in ["target/debug", "target/release"] {
        let candidate = Path::new(dir).join(LIBRARY_NAME);
        if candidate.exists() {
            return candidate.canonicalize().context("resolve target path");
        }
    }

    anyhow::bail!(
        "Could not find {LIBRARY_NAME}. Run 'cargo build -p lockshift-preload' first, \
         or point LOCKSHIFT_PRELOAD at the library."
    )
}
