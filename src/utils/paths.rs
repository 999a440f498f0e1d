//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::storage("Could not determine home directory"))
}

/// Get the Promptuary directory (~/.promptuary/)
pub fn promptuary_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".promptuary"))
}

/// Get the storage file path (~/.promptuary/storage.json)
pub fn storage_path() -> AppResult<PathBuf> {
    Ok(promptuary_dir()?.join("storage.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Promptuary directory, creating if it doesn't exist
pub fn ensure_promptuary_dir() -> AppResult<PathBuf> {
    let path = promptuary_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
