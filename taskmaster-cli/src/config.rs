use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::ensure_taskmaster_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub log: LogSection,
    pub ui: UiSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Slot name; the list lives in `<dir>/<key>.json`.
    pub key: String,
    /// Defaults to the taskmaster home directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Wait before the progress bar starts moving.
    pub progress_delay_ms: u64,
    /// Length of the progress bar's ease-out.
    pub progress_duration_ms: u64,
    /// Event poll timeout; also the animation frame interval.
    pub tick_ms: u64,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            key: taskmaster_core::DEFAULT_KEY.to_string(),
            dir: None,
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: taskmaster_core::default_log_level().to_string(),
        }
    }
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            progress_delay_ms: 100,
            progress_duration_ms: 1000,
            tick_ms: 50,
        }
    }
}

impl UiSection {
    pub fn progress_delay(&self) -> Duration {
        Duration::from_millis(self.progress_delay_ms)
    }

    pub fn progress_duration(&self) -> Duration {
        Duration::from_millis(self.progress_duration_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

impl Config {
    /// Directory holding the task slot.
    pub fn storage_dir(&self, home: &Path) -> PathBuf {
        self.storage
            .dir
            .clone()
            .unwrap_or_else(|| home.to_path_buf())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_taskmaster_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    println!("# {}", p.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.storage.key, "todos");
        assert_eq!(cfg.ui.progress_delay_ms, 100);
        assert_eq!(cfg.ui.progress_duration_ms, 1000);
    }

    #[test]
    fn partial_file_fills_in_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[storage]\nkey = \"work\"\n\n[ui]\ntick_ms = 20\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.storage.key, "work");
        assert_eq!(cfg.storage.dir, None);
        assert_eq!(cfg.ui.tick_ms, 20);
        assert_eq!(cfg.ui.progress_duration_ms, 1000);
        assert_eq!(cfg.log, LogSection::default());
    }

    #[test]
    fn saved_config_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.storage.dir = Some(dir.path().join("data"));
        cfg.log.level = "warn".to_string();

        save_config_to(&p, &cfg).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[storage\nkey = 1").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn storage_dir_defaults_to_home() {
        let home = PathBuf::from("/tmp/tm-home");
        let mut cfg = Config::default();
        assert_eq!(cfg.storage_dir(&home), home);
        cfg.storage.dir = Some(PathBuf::from("/data"));
        assert_eq!(cfg.storage_dir(&home), PathBuf::from("/data"));
    }

    #[test]
    fn zero_tick_is_clamped() {
        let ui = UiSection { tick_ms: 0, ..UiSection::default() };
        assert_eq!(ui.tick(), Duration::from_millis(1));
    }
}
