//! Deferred actions
//!
//! Fixed-delay work (panel reveals, the entry fallback) is queued here and
//! drained once per frame. Every scheduled action hands back a `TaskId` so
//! the owner can cancel it when a newer command makes it stale.

/// Token for a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    fire_at: f64,
    action: T,
}

/// A queue of actions keyed by the time they become due
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { next_id: 0, tasks: Vec::new() }
    }

    /// Queue `action` to run `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, action: T) -> TaskId {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        self.tasks.push(Scheduled { id, fire_at: now + delay.max(0.0), action });
        id
    }

    /// Drop a pending action. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove and return every action due at `now`, earliest first.
    /// Actions due at the same instant keep their scheduling order.
    pub fn due(&mut self, now: f64) -> Vec<(TaskId, T)> {
        let mut ready = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].fire_at <= now {
                ready.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        ready.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.id.cmp(&b.id)));
        ready.into_iter().map(|t| (t.id, t.action)).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_in_timestamp_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 3.5, "fallback");
        scheduler.schedule(0.0, 1.0, "reveal");
        scheduler.schedule(0.5, 0.5, "same-instant");

        assert!(scheduler.due(0.99).is_empty());
        let fired: Vec<_> = scheduler.due(4.0).into_iter().map(|(_, a)| a).collect();
        assert_eq!(fired, vec!["reveal", "same-instant", "fallback"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(0.0, 1.0, 7);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.due(2.0).is_empty());
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.0, 1.0, ());
        assert_eq!(scheduler.due(1.0).len(), 1);
        assert!(scheduler.due(5.0).is_empty());
    }
}
