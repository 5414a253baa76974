//! taskmaster-core: task list state, persistence and dashboard numbers.

pub mod logging;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod task_list;

pub use logging::{default_log_level, init_logging, logging_status};
pub use stats::Stats;
pub use storage::{DEFAULT_KEY, JsonFileStorage, MemoryStorage, TaskStorage};
pub use store::{SubscriptionId, TaskActions, TaskStore};
pub use task::{Clock, FixedClock, SystemClock, Task, TaskId, normalize_text};
pub use task_list::TaskList;
