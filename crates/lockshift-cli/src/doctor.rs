//! `lockshift doctor`: diagnostic checks for the redirection environment.
//!
//! Validates the runtime base configuration, performs one probe rewrite,
//! and reports whether the preload library can be located.

use anyhow::Result;
use lockshift_core::{rewrite, RewriteError, LOCK_PATHS, RUNTIME_DIR_VAR};

struct DiagResult {
    passed: u32,
    warned: u32,
    failed: u32,
}

impl DiagResult {
    fn new() -> Self {
        Self {
            passed: 0,
            warned: 0,
            failed: 0,
        }
    }

    fn pass(&mut self, msg: &str) {
        self.passed += 1;
        eprintln!("  [ok] {msg}");
    }

    fn warn(&mut self, msg: &str) {
        self.warned += 1;
        eprintln!("  [??] {msg}");
    }

    fn fail(&mut self, msg: &str) {
        self.failed += 1;
        eprintln!("  [!!] {msg}");
    }

    fn info(&self, msg: &str) {
        eprintln!("  [-] {msg}");
    }
}

pub fn cmd_doctor() -> Result<()> {
    eprintln!();
    eprintln!("Lockshift doctor");
    eprintln!("{}", "-".repeat(40));

    let mut d = DiagResult::new();

    for prefix in LOCK_PATHS {
        d.info(&format!("monitoring {prefix}"));
    }

    match std::env::var(RUNTIME_DIR_VAR) {
        Ok(base) => d.pass(&format!("{RUNTIME_DIR_VAR} = {base}")),
        Err(_) => d.fail(&format!(
            "{RUNTIME_DIR_VAR} not set, redirection will be disabled"
        )),
    }

    let probe = format!("{}/LCK..doctor", LOCK_PATHS[0]);
    match rewrite(&probe, LOCK_PATHS[0]) {
        Ok(target) => d.pass(&format!("probe rewrite: {probe} -> {target}")),
        Err(RewriteError::RuntimeDirUnset) => d.warn("probe rewrite skipped (no runtime base)"),
        Err(err) => d.fail(&format!("probe rewrite failed: {err}")),
    }

    match crate::run::find_preload_library() {
        Ok(path) => d.pass(&format!("preload library: {}", path.display())),
        Err(err) => d.warn(&err.to_string()),
    }

    eprintln!("{}", "-".repeat(40));
    eprintln!(
        "  {} passed, {} warnings, {} errors",
        d.passed, d.warned, d.failed
    );
    eprintln!();

    if d.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
