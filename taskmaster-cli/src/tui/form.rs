//! New-task input line.

use taskmaster_core::{TaskActions, TaskId, normalize_text};

#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    input: String,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// The add control is disabled while this is false.
    pub fn can_submit(&self) -> bool {
        normalize_text(&self.input).is_some()
    }

    /// Add the task and clear the field. Blank input is dropped without a
    /// message and left in place.
    pub fn submit(&mut self, actions: &mut dyn TaskActions) -> Option<TaskId> {
        let text = normalize_text(&self.input)?.to_string();
        let id = actions.add(&text)?;
        self.input.clear();
        Some(id)
    }
}
