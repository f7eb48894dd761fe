//! Delayed tasks on the game's logical clock.
//!
//! Tasks never run on their own: the run loop advances the clock and the
//! engine executes whatever became due, on the same thread that handles
//! input. A cancelled task is dropped without running.

use std::time::Duration;

use crate::game::Coord;

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Work the engine can defer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Return a flashed cell to its normal color.
    ClearFlash(Coord),
    /// Start the next day after food has been eaten.
    AdvanceDay,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: TaskId,
    due: Duration,
    task: ScheduledTask,
}

/// Pending tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    /// An empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Queue `task` to run once the clock reaches `due`.
    pub fn schedule(&mut self, due: Duration, task: ScheduledTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        // Insert after every entry due at or before `due` so equal deadlines
        // keep their scheduling order.
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, Entry { id, due, task });
        id
    }

    /// Cancel a pending task. Returns `false` if it already ran or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TaskId, ScheduledTask)> {
        match self.entries.first() {
            Some(entry) if entry.due <= now => {
                let entry = self.entries.remove(0);
                Some((entry.id, entry.task))
            }
            _ => None,
        }
    }

    /// Whether `task` is queued.
    #[must_use]
    pub fn is_pending(&self, task: ScheduledTask) -> bool {
        self.entries.iter().any(|e| e.task == task)
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the next task becomes due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }
}
