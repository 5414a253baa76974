//! Task model: the single entity of the task list.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identity. Milliseconds since the Unix epoch at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// A single to-do entry.
///
/// `id` is assigned once by the store and never changes. `text` is always
/// trimmed and non-empty once a task is part of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    // Older data files wrote the text under `todo`.
    #[serde(alias = "todo")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Trim user input; `None` for empty or whitespace-only text.
pub fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Source of creation timestamps for new ids.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  Buy milk \n"), Some("Buy milk"));
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   \t"), None);
    }

    #[test]
    fn serializes_as_flat_record() {
        let t = Task::new(TaskId(42), "Buy milk");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"id":42,"text":"Buy milk","completed":false}"#);
    }

    #[test]
    fn accepts_legacy_todo_field_and_missing_completed() {
        let t: Task = serde_json::from_str(r#"{"id":7,"todo":"Walk dog"}"#).unwrap();
        assert_eq!(t, Task::new(TaskId(7), "Walk dog"));
    }

    #[test]
    fn task_id_parses_from_cli_text() {
        assert_eq!(" 1700000000000 ".parse::<TaskId>().unwrap(), TaskId(1_700_000_000_000));
        assert!("abc".parse::<TaskId>().is_err());
    }
}
