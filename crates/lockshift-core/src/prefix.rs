//! First stage of a redirect: decide whether a candidate path lies under
//! one of the monitored device-lock directories.

/// Monitored device-lock roots, in match-priority order.
///
/// `/var/lock` is the default for both java rxtx and lockdev; Arch and
/// Fedora patch those consumers to use `lockdev` subdirectories below
/// `/var/lock` and `/run/lock`, which this prefix set also covers.
pub const LOCK_PATHS: &[&str] = &["/var/lock", "/run/lock"];

/// Returns the first monitored prefix the path is nested under.
///
/// A prefix only matches on a component boundary: the byte following it
/// must be the end of the path or a `/`, so `/var/lockup/file` does not
/// match `/var/lock`.
pub fn find_lock_prefix(path: &str) -> Option<&'static str> {
    LOCK_PATHS
        .iter()
        .copied()
        .find(|prefix| match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        })
}
