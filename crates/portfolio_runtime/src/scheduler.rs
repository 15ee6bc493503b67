//! Named, cancelable delayed actions on a caller-supplied millisecond clock.
//!
//! Scheduling a name that is already pending replaces it, which is how a newer state change
//! overrides a stale visual intent.

#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduledTask<A> {
    name: String,
    due_ms: u64,
    seq: u64,
    action: A,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler<A> {
    tasks: Vec<ScheduledTask<A>>,
    next_seq: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<A> Scheduler<A> {
    /// Schedules `action` under `name` at `due_ms`. Returns `true` when it replaced a pending task.
    pub fn schedule(&mut self, name: impl Into<String>, due_ms: u64, action: A) -> bool {
        let name = name.into();
        let replaced = self.cancel(&name);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            name,
            due_ms,
            seq,
            action,
        });
        replaced
    }

    pub fn cancel(&mut self, name: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.name != name);
        self.tasks.len() != before
    }

    pub fn is_scheduled(&self, name: &str) -> bool {
        self.tasks.iter().any(|task| task.name == name)
    }

    /// Removes and returns every action due at or before `now_ms`, earliest first; ties keep
    /// scheduling order.
    pub fn advance(&mut self, now_ms: u64) -> Vec<A> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.due_ms <= now_ms);
        self.tasks = pending;
        due.sort_by_key(|task| (task.due_ms, task.seq));
        due.into_iter().map(|task| task.action).collect()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.tasks.iter().map(|task| task.due_ms).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
