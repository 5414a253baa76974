//! Per-row edit state.
//!
//! Viewing -> Editing only for tasks that are not completed. Editing ends in
//! Viewing either by confirming (the draft is committed through `update`) or
//! by cancelling (the draft is thrown away). The draft lives here, never in
//! the `Task`.

use taskmaster_core::{Task, TaskActions};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowEditor {
    #[default]
    Viewing,
    Editing { draft: String },
}

impl RowEditor {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Text to show for `task` in the current state.
    pub fn display_text<'a>(&'a self, task: &'a Task) -> &'a str {
        match self {
            Self::Viewing => &task.text,
            Self::Editing { draft } => draft,
        }
    }

    /// Returns false (and stays put) for completed tasks.
    pub fn begin_edit(&mut self, task: &Task) -> bool {
        if task.completed {
            return false;
        }
        if !self.is_editing() {
            *self = Self::Editing {
                draft: task.text.clone(),
            };
        }
        true
    }

    pub fn push(&mut self, c: char) {
        if let Self::Editing { draft } = self {
            draft.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Self::Editing { draft } = self {
            draft.pop();
        }
    }

    /// Commit the draft and return to Viewing. A blank draft is rejected by
    /// the store, so the committed text stays.
    pub fn confirm(&mut self, task: &Task, actions: &mut dyn TaskActions) -> bool {
        let Self::Editing { draft } = std::mem::take(self) else {
            return false;
        };
        actions.update(task.id, task.clone().with_text(draft))
    }

    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    /// The edit button: starts editing, or confirms when already editing.
    pub fn press_edit(&mut self, task: &Task, actions: &mut dyn TaskActions) -> bool {
        if task.completed {
            return false;
        }
        if self.is_editing() {
            self.confirm(task, actions)
        } else {
            self.begin_edit(task)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmaster_core::{FixedClock, MemoryStorage, TaskStore};

    fn store_with(text: &str) -> (TaskStore, Task) {
        let mut store = TaskStore::open_with_clock(MemoryStorage::new(), FixedClock(1));
        let id = store.add(text).unwrap();
        let task = store.snapshot().get(id).cloned().unwrap();
        (store, task)
    }

    fn retype(row: &mut RowEditor, text: &str) {
        if let RowEditor::Editing { draft } = row {
            draft.clear();
        }
        for c in text.chars() {
            row.push(c);
        }
    }

    #[test]
    fn confirm_commits_draft() {
        let (mut store, task) = store_with("Buy milk");
        let mut row = RowEditor::default();
        assert!(row.begin_edit(&task));
        retype(&mut row, "Buy oat milk");
        assert_eq!(row.display_text(&task), "Buy oat milk");

        assert!(row.confirm(&task, &mut store));
        assert_eq!(row, RowEditor::Viewing);
        assert_eq!(store.snapshot().get(task.id).unwrap().text, "Buy oat milk");
    }

    #[test]
    fn cancel_restores_committed_text() {
        let (store, task) = store_with("Buy milk");
        let mut row = RowEditor::default();
        row.begin_edit(&task);
        retype(&mut row, "something else");
        row.cancel();

        assert_eq!(row, RowEditor::Viewing);
        assert_eq!(row.display_text(&task), "Buy milk");
        assert_eq!(store.snapshot().get(task.id).unwrap().text, "Buy milk");
    }

    #[test]
    fn completed_task_cannot_enter_edit() {
        let (mut store, task) = store_with("done already");
        store.toggle_complete(task.id);
        let task = store.snapshot().get(task.id).cloned().unwrap();

        let mut row = RowEditor::default();
        assert!(!row.begin_edit(&task));
        assert!(!row.press_edit(&task, &mut store));
        assert_eq!(row, RowEditor::Viewing);
    }

    #[test]
    fn edit_button_toggles_between_start_and_confirm() {
        let (mut store, task) = store_with("a");
        let mut row = RowEditor::default();
        assert!(row.press_edit(&task, &mut store));
        assert!(row.is_editing());
        row.push('b');
        assert!(row.press_edit(&task, &mut store));
        assert!(!row.is_editing());
        assert_eq!(store.snapshot().get(task.id).unwrap().text, "ab");
    }

    #[test]
    fn blank_draft_leaves_text_alone() {
        let (mut store, task) = store_with("keep");
        let mut row = RowEditor::default();
        row.begin_edit(&task);
        retype(&mut row, "   ");
        assert!(!row.confirm(&task, &mut store));
        assert!(!row.is_editing());
        assert_eq!(store.snapshot().get(task.id).unwrap().text, "keep");
    }

    #[test]
    fn keys_outside_edit_mode_are_ignored() {
        let mut row = RowEditor::default();
        row.push('x');
        row.backspace();
        assert_eq!(row, RowEditor::Viewing);
    }
}
