//! TaskStore — the single owner of the canonical task list.
//!
//! Responsibilities:
//! - hold the current snapshot (`Arc<TaskList>`); readers clone the `Arc`
//! - apply the four intents through the pure `TaskList` operations
//! - write the whole list to storage after every change
//! - notify subscribers so views know to redraw
//!
//! Presentation code never sees the store type directly; it gets a
//! `&mut dyn TaskActions`.

use crate::storage::TaskStorage;
use crate::task::{Clock, SystemClock, Task, TaskId};
use crate::task_list::TaskList;
use log::{debug, error, info};
use std::sync::Arc;

/// The operations a view may request.
///
/// Each returns whether the canonical list changed. Unknown ids and blank
/// text change nothing.
pub trait TaskActions {
    /// Returns the id of the created task.
    fn add(&mut self, text: &str) -> Option<TaskId>;
    fn update(&mut self, id: TaskId, record: Task) -> bool;
    fn delete(&mut self, id: TaskId) -> bool;
    fn toggle_complete(&mut self, id: TaskId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&TaskList)>;

pub struct TaskStore {
    current: Arc<TaskList>,
    storage: Box<dyn TaskStorage>,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl TaskStore {
    /// Load the initial list from `storage`.
    pub fn open(storage: impl TaskStorage + 'static) -> Self {
        Self::open_with_clock(storage, SystemClock)
    }

    pub fn open_with_clock(storage: impl TaskStorage + 'static, clock: impl Clock + 'static) -> Self {
        let initial = storage.load();
        info!(
            "event=store_open module=store status=ok count={}",
            initial.len()
        );
        Self {
            current: Arc::new(initial),
            storage: Box::new(storage),
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn snapshot(&self) -> Arc<TaskList> {
        Arc::clone(&self.current)
    }

    /// Register a callback run with the new list after each change.
    pub fn subscribe(&mut self, listener: impl FnMut(&TaskList) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, op: &str, next: TaskList) -> bool {
        if next == *self.current {
            debug!("event=store_{op} module=store status=noop");
            return false;
        }

        self.current = Arc::new(next);
        debug!(
            "event=store_{op} module=store status=ok count={}",
            self.current.len()
        );

        // Persistence failures are logged, never surfaced to the view.
        if let Err(e) = self.storage.save(&self.current) {
            error!("event=store_save module=store status=error op={op} error={e:#}");
        }

        let snapshot = Arc::clone(&self.current);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
        true
    }
}

impl TaskActions for TaskStore {
    fn add(&mut self, text: &str) -> Option<TaskId> {
        let id = self.current.next_id(self.clock.now_millis());
        let next = self.current.add(id, text);
        self.commit("add", next).then_some(id)
    }

    fn update(&mut self, id: TaskId, record: Task) -> bool {
        let next = self.current.update(id, record);
        self.commit("update", next)
    }

    fn delete(&mut self, id: TaskId) -> bool {
        let next = self.current.delete(id);
        self.commit("delete", next)
    }

    fn toggle_complete(&mut self, id: TaskId) -> bool {
        let next = self.current.toggle_complete(id);
        self.commit("toggle", next)
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
