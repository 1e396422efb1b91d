//! Path utilities for locating catalog and trace files.
//!
//! The data directory follows the XDG base directory convention:
//! `$XDG_DATA_HOME/catalog-list`, falling back to `~/.local/share/catalog-list`.

use std::path::PathBuf;

/// Directory name under the data home.
const APP_DIR_NAME: &str = "catalog-list";

/// Returns the data directory for catalog and trace files.
///
/// Falls back to a relative `.catalog-list` directory when neither
/// `XDG_DATA_HOME` nor `HOME` is set.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }

    home_dir().map_or_else(
        || PathBuf::from(format!(".{APP_DIR_NAME}")),
        |home| home.join(".local").join("share").join(APP_DIR_NAME),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use catalog_list::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
