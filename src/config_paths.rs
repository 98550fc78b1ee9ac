//! Where highlight-overlay keeps its files
//!
//! Everything lives in one application directory:
//! - `$XDG_CONFIG_HOME/highlight-overlay/` when XDG_CONFIG_HOME is set
//! - `~/.config/highlight-overlay/` otherwise on Unix and macOS
//! - `%APPDATA%\highlight-overlay\` on Windows

use std::path::PathBuf;

const APP_DIR: &str = "highlight-overlay";

fn base_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return dirs::config_dir();
    }
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// The application directory, if a home or config directory is known
pub fn config_dir() -> Option<PathBuf> {
    base_dir().map(|base| base.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or("No config directory available")?;
    std::fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create {}: {}", logs.display(), e))?;
    Ok(logs)
}
