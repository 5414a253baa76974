use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$TASKMASTER_HOME`, or `~/.taskmaster`.
pub fn taskmaster_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("TASKMASTER_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskmaster"))
}

pub fn ensure_taskmaster_home() -> Result<PathBuf> {
    let dir = taskmaster_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn logs_dir() -> Result<PathBuf> {
    Ok(ensure_taskmaster_home()?.join("logs"))
}
