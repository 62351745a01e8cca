//! Deferred one-shot tasks keyed on simulation ticks.
//!
//! The engine owns exactly one `Scheduler`. Every delayed effect (projectile
//! leg hand-off, projectile discard, pocketed fragments landing, wave advance)
//! lives here, so a reset or game over can drop all of them at once.

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work to perform when a task comes due.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Start the next leg of projectile `throw` (or begin lingering if none remain).
    NextLeg { throw: u32 },
    /// Discard projectile `throw`.
    DiscardProjectile { throw: u32 },
    /// Fragments reached the inventory slot for `value`.
    PocketArrival { value: u32, count: u32, score: u64 },
    /// Generate and lay out the next wave.
    AdvanceWave,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: TaskId,
    due_tick: u64,
    task: Task,
}

/// Arena of outstanding deferred tasks.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run `delay_ticks` after `now`.
    pub fn schedule(&mut self, now: u64, delay_ticks: u64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            due_tick: now.saturating_add(delay_ticks),
            task,
        });
        id
    }

    /// Cancel one task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every outstanding task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Remove and return all tasks due at or before `now`, earliest first.
    /// Tasks due on the same tick run in scheduling order.
    pub fn drain_due(&mut self, now: u64) -> Vec<Task> {
        let mut due: Vec<ScheduledTask> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_tick <= now {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due_tick, t.id));
        due.into_iter().map(|t| t.task).collect()
    }

    /// Whether any outstanding task matches `pred`.
    pub fn any(&self, pred: impl Fn(&Task) -> bool) -> bool {
        self.tasks.iter().any(|t| pred(&t.task))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
