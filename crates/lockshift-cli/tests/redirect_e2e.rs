//! End-to-end checks that a child process running under the preload
//! library observes redirected lock paths, and that redirection fails
//! open when the runtime base is not configured.

use std::path::{Path, PathBuf};
use std::process::Command;

const LIBRARY_NAME: &str = "liblockshift_preload.so";

/// The cdylib is not a link-time dependency of this crate, so locate it in
/// the target directory, building it on demand if needed.
fn preload_library() -> Option<PathBuf> {
    if let Some(path) = locate_library() {
        return Some(path);
    }
    let status = Command::new(env!("CARGO"))
        .args(["build", "-p", "lockshift-preload"])
        .status()
        .ok()?;
    if !status.success() {
        return None;
    }
    locate_library()
}

fn locate_library() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.ancestors()
        .skip(1)
        .take(3)
        .map(|dir| dir.join(LIBRARY_NAME))
        .find(|candidate| candidate.exists())
}

#[test]
fn lock_file_writes_land_below_runtime_base() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let name = format!("LCK..e2e-{}", std::process::id());

    let status = Command::new("/bin/sh")
        .arg("-c")
        .arg(format!("echo locked > /var/lock/{name}"))
        .env("LD_PRELOAD", &library)
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn shell");
    assert!(status.success());

    let redirected = base.path().join("lock").join(&name);
    assert!(
        redirected.exists(),
        "expected redirected lock file at {}",
        redirected.display()
    );
    assert_eq!(
        std::fs::read_to_string(&redirected).unwrap().trim(),
        "locked"
    );
    // The rewrite materializes the nested namespace alongside the lock root.
    assert!(base.path().join("lock/lockdev").is_dir());
}

#[test]
fn unmonitored_paths_are_untouched() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let target = scratch.path().join("plain.txt");

    let status = Command::new("/bin/sh")
        .arg("-c")
        .arg(format!("echo data > {}", target.display()))
        .env("LD_PRELOAD", &library)
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn shell");
    assert!(status.success());

    assert_eq!(std::fs::read_to_string(&target).unwrap().trim(), "data");
    assert!(!base.path().join("lock").join("plain.txt").exists());
}

#[test]
fn missing_runtime_base_fails_open_with_diagnostic() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let name = format!("lockshift-e2e-missing-{}", std::process::id());

    // A pure read below the monitored prefix: the hook fires, the rewrite
    // fails, and the original (nonexistent) path decides the outcome.
    let output = lockcall(&library)
        .args(["open", format!("/var/lock/{name}").as_str()])
        .env_remove("XDG_RUNTIME_DIR")
        .output()
        .expect("spawn lockcall");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("XDG_RUNTIME_DIR"),
        "expected a diagnostic on stderr, got: {stderr}"
    );
    assert!(!output.status.success());
}

/// Driver binary that calls the classic libc entry points directly, since
/// shells and coreutils reach most of them through `*at` variants the
/// library does not interpose.
fn lockcall(library: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lockcall"));
    cmd.env("LD_PRELOAD", library);
    cmd
}

#[test]
fn link_virtualizes_each_side_independently() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let name = format!("LCK..link-{}", std::process::id());

    // Unmonitored source, monitored destination: only the destination
    // moves below the runtime base.
    let outside = scratch.path().join("outside.txt");
    std::fs::write(&outside, "payload").unwrap();
    let status = lockcall(&library)
        .args(["link", outside.to_str().unwrap(), format!("/var/lock/{name}").as_str()])
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn lockcall");
    assert!(status.success());
    let redirected = base.path().join("lock").join(&name);
    assert_eq!(std::fs::read_to_string(&redirected).unwrap(), "payload");
    assert!(outside.exists());

    // Monitored source, unmonitored destination: the source resolves to
    // the redirected file, the destination stays where the caller put it.
    let back = scratch.path().join("back.txt");
    let status = lockcall(&library)
        .args(["link", format!("/var/lock/{name}").as_str(), back.to_str().unwrap()])
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn lockcall");
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&back).unwrap(), "payload");
}

#[test]
fn rename_moves_across_the_virtualization_boundary() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let name = format!("LCK..rename-{}", std::process::id());

    let staged = scratch.path().join("staged.txt");
    std::fs::write(&staged, "staged").unwrap();
    let status = lockcall(&library)
        .args(["rename", staged.to_str().unwrap(), format!("/var/lock/{name}").as_str()])
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn lockcall");
    assert!(status.success());
    let redirected = base.path().join("lock").join(&name);
    assert_eq!(std::fs::read_to_string(&redirected).unwrap(), "staged");
    assert!(!staged.exists());

    let settled = scratch.path().join("settled.txt");
    let status = lockcall(&library)
        .args(["rename", format!("/var/lock/{name}").as_str(), settled.to_str().unwrap()])
        .env("XDG_RUNTIME_DIR", base.path())
        .status()
        .expect("spawn lockcall");
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&settled).unwrap(), "staged");
    assert!(!redirected.exists());
}

#[test]
fn mktemp_keeps_caller_prefix_with_a_fresh_suffix() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let template = format!("/var/lock/LCK..{}-XXXXXX", std::process::id());

    let output = lockcall(&library)
        .args(["mktemp", template.as_str()])
        .env("XDG_RUNTIME_DIR", base.path())
        .output()
        .expect("spawn lockcall");
    assert!(output.status.success());

    // The caller keeps its own directory prefix; only the placeholder is
    // replaced, with a name probed for uniqueness under the redirected
    // root.
    let generated = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(generated.len(), template.len());
    assert!(
        generated.starts_with(&template[..template.len() - 6]),
        "caller prefix not preserved: {generated}"
    );
    assert_ne!(&generated[generated.len() - 6..], "XXXXXX");
}

#[test]
fn scandir_lists_the_redirected_directory() {
    let Some(library) = preload_library() else {
        eprintln!("skipping: {LIBRARY_NAME} not built");
        return;
    };
    let base = tempfile::tempdir().unwrap();
    let name = format!("LCK..scandir-{}", std::process::id());
    let lock_dir = base.path().join("lock");
    std::fs::create_dir_all(&lock_dir).unwrap();
    std::fs::write(lock_dir.join(&name), "held").unwrap();

    let output = lockcall(&library)
        .args(["scandir", "/var/lock"])
        .env("XDG_RUNTIME_DIR", base.path())
        .output()
        .expect("spawn lockcall");
    assert!(output.status.success());

    let listing = String::from_utf8_lossy(&output.stdout);
    assert!(
        listing.lines().any(|entry| entry == name),
        "redirected entry missing from listing: {listing}"
    );
}
