use std::time::{Duration, Instant};

/// Identifies one scheduled periodic task. Handles are unique and never
/// reused, so a canceled handle can never fire again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle(u64);

#[derive(Clone, Copy, Debug)]
struct Task {
    handle: Handle,
    period: Duration,
    due: Instant,
}

/// Cooperative timer queue for the periodic ticks. Changing a period is
/// cancel-then-schedule; there is no in-place mutation of a running task.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn schedule(&mut self, period: Duration, now: Instant) -> Handle {
        let handle = Handle(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            handle,
            period,
            due: now + period,
        });
        handle
    }

    pub fn cancel(&mut self, handle: Handle) {
        self.tasks.retain(|task| task.handle != handle);
    }

    /// Earliest pending deadline, used to bound input polling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Returns every task due at `now` and re-arms it one period ahead.
    /// Ticks missed while the loop was busy are dropped, not replayed;
    /// nothing here needs better than coarse accuracy.
    pub fn fired(&mut self, now: Instant) -> Vec<Handle> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if task.due <= now {
                fired.push(task.handle);
                task.due = now + task.period;
            }
        }
        fired
    }
}
