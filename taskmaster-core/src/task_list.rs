//! TaskList — immutable, ordered task collection.
//!
//! Every operation takes `&self` and returns a fresh list, so a snapshot a
//! reader holds never changes underneath it. Display order is insertion
//! order with the newest task first.
//!
//! Unknown ids and blank text are not errors: the operation hands back an
//! unchanged copy.

use crate::task::{Task, TaskId, normalize_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Smallest id that is at least `candidate` and larger than every id in
    /// the list.
    pub fn next_id(&self, candidate: u64) -> TaskId {
        let floor = self
            .tasks
            .iter()
            .map(|t| t.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        TaskId(candidate.max(floor))
    }

    /// Prepend a new, not-completed task.
    pub fn add(&self, id: TaskId, text: &str) -> Self {
        let Some(text) = normalize_text(text) else {
            return self.clone();
        };
        if self.contains(id) {
            return self.clone();
        }

        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(Task::new(id, text));
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    /// Replace the task at `id` with `record`, keeping its position and id.
    pub fn update(&self, id: TaskId, record: Task) -> Self {
        let Some(idx) = self.position(id) else {
            return self.clone();
        };
        let Some(text) = normalize_text(&record.text) else {
            return self.clone();
        };

        let mut tasks = self.tasks.clone();
        tasks[idx] = Task {
            id,
            text: text.to_string(),
            completed: record.completed,
        };
        Self { tasks }
    }

    pub fn delete(&self, id: TaskId) -> Self {
        Self {
            tasks: self.tasks.iter().filter(|t| t.id != id).cloned().collect(),
        }
    }

    /// Flip `completed` on the matching task only.
    pub fn toggle_complete(&self, id: TaskId) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .map(|t| {
                    if t.id == id {
                        t.clone().with_completed(!t.completed)
                    } else {
                        t.clone()
                    }
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
