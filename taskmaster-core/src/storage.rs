//! Storage adapter: one durable slot holding the whole task list as JSON.
//!
//! Reads never fail. A missing, empty or unreadable slot loads as an empty
//! list so a damaged file cannot keep the app from starting. Writes
//! overwrite the slot with the full list.

use crate::task_list::TaskList;
use anyhow::{Context, Result};
use log::{debug, warn};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const DEFAULT_KEY: &str = "todos";

pub trait TaskStorage {
    fn load(&self) -> TaskList;
    fn save(&self, list: &TaskList) -> Result<()>;
}

/// Decode slot contents. `None` and blank input mean "nothing stored".
pub fn decode(raw: Option<&str>) -> Result<TaskList> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(TaskList::new()),
        Some(s) => serde_json::from_str(s).context("parse stored task list"),
    }
}

pub fn encode(list: &TaskList) -> Result<String> {
    serde_json::to_string(list).context("serialize task list")
}

/// Slot backed by `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self) -> TaskList {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(
                    "event=storage_load module=storage status=degraded path={} error={}",
                    self.path.display(),
                    e
                );
                return TaskList::new();
            }
        };

        match decode(raw.as_deref()) {
            Ok(list) => {
                debug!(
                    "event=storage_load module=storage status=ok path={} count={}",
                    self.path.display(),
                    list.len()
                );
                list
            }
            Err(e) => {
                warn!(
                    "event=storage_load module=storage status=degraded path={} error={:#}",
                    self.path.display(),
                    e
                );
                TaskList::new()
            }
        }
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = encode(list)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        debug!(
            "event=storage_save module=storage status=ok path={} count={}",
            self.path.display(),
            list.len()
        );
        Ok(())
    }
}

/// In-process slot. Clones share the same slot, so a test can keep a handle
/// while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        let s = Self::default();
        *s.slot.borrow_mut() = Some(raw.into());
        s
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> TaskList {
        decode(self.slot.borrow().as_deref()).unwrap_or_else(|e| {
            warn!("event=storage_load module=storage status=degraded slot=memory error={e:#}");
            TaskList::new()
        })
    }

    fn save(&self, list: &TaskList) -> Result<()> {
        *self.slot.borrow_mut() = Some(encode(list)?);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
