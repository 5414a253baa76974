//! Dashboard numbers derived from a snapshot. Recomputed on every render.

use crate::task::Task;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// 0..=100, half rounds up.
    pub percentage: u8,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total,
            pending: total - completed,
            completed,
            percentage: percentage(completed, total),
        }
    }

    /// "<completed> of <total> tasks"
    pub fn caption(&self) -> String {
        format!("{} of {} tasks", self.completed, self.total)
    }
}

fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // round(completed * 100 / total) without floats
    let scaled = (completed * 200 + total) / (total * 2);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
