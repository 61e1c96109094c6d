//! Data and config directory resolution.
//!
//! Locations follow the XDG base directory conventions, with a
//! `SECRETGRID_DATA_DIR` override for the data directory.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "secretgrid";

/// Returns the directory for span files and other local state.
///
/// Resolution order:
/// 1. `$SECRETGRID_DATA_DIR`
/// 2. `$XDG_DATA_HOME/secretgrid`
/// 3. `~/.local/share/secretgrid`
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = non_empty_var("SECRETGRID_DATA_DIR") {
        return PathBuf::from(expand_tilde(&dir));
    }
    non_empty_var("XDG_DATA_HOME").map_or_else(
        || home_dir().join(".local").join("share").join(APP_DIR),
        |base| PathBuf::from(base).join(APP_DIR),
    )
}

/// Returns the default config file path.
///
/// `$XDG_CONFIG_HOME/secretgrid/config.toml`, else
/// `~/.config/secretgrid/config.toml`.
#[must_use]
pub fn get_config_path() -> PathBuf {
    non_empty_var("XDG_CONFIG_HOME")
        .map_or_else(|| home_dir().join(".config"), PathBuf::from)
        .join(APP_DIR)
        .join("config.toml")
}

/// Expands a leading `~` to `$HOME`.
///
/// # Examples
///
/// ```
/// use secretgrid::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let home = home_dir();
    let home = home.to_string_lossy();
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else if path == "~" {
        home.into_owned()
    } else {
        path.to_string()
    }
}

fn home_dir() -> PathBuf {
    non_empty_var("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let home = home_dir();
        assert_eq!(
            expand_tilde("~/vault"),
            format!("{}/vault", home.to_string_lossy())
        );
        assert_eq!(expand_tilde("~"), home.to_string_lossy());
        assert_eq!(expand_tilde("/etc/~x"), "/etc/~x");
    }

    #[test]
    fn config_path_ends_with_app_file() {
        assert!(get_config_path().ends_with("secretgrid/config.toml"));
    }
}
