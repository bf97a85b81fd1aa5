//! Path handling for the Zellij sandbox, where the host filesystem is
//! mounted under `/host`.
//!
//! `/host` points at the cwd of the last focused terminal, or at the folder
//! Zellij was started from. In practice that is usually the home directory.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory for the trace file: `/host/.local/share/zellij/movie-gallery`.
///
/// ```
/// use movie_gallery::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/movie-gallery"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("movie-gallery")
}

/// Maps `~` and `~/...` onto `/host`.
///
/// ```
/// use movie_gallery::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/Pictures"), "/host/Pictures");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/posters"), "/tmp/posters");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Resolves a configured directory to a sandbox path.
///
/// Tilde paths are expanded, relative paths are taken relative to `/host`,
/// absolute paths are kept.
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return PathBuf::from(HOST_ROOT);
    }

    let expanded = expand_tilde(path);
    if expanded.starts_with('/') {
        PathBuf::from(expanded)
    } else {
        PathBuf::from(HOST_ROOT).join(expanded)
    }
}

/// Removes the `/host` prefix so a sandbox path reads like a host path.
///
/// ```
/// use movie_gallery::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/Pictures/Heat_Poster.jpg"), "/Pictures/Heat_Poster.jpg");
/// assert_eq!(strip_host_prefix("/hostname/x"), "/hostname/x");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}
