// core/scheduler.rs
//
// Virtual-time task scheduler with cancellable one-shot and repeating tasks.
// Nothing here reads a wall clock; the owner advances time explicitly,
// so tests can fast-forward.
//
// Usage:
//   let mut sched = Scheduler::new();
//   let id = sched.once(600, Timer::Reveal(1));
//   while let Some(timer) = sched.pop_due(1000) { ... }   // Timer::Reveal(1)
//   sched.settle(1000);
//   sched.cancel(id);                                     // false, already fired

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u32);

#[derive(Debug, Clone)]
struct Task<A> {
    id: TaskId,
    due_ms: u64,
    /// Re-arm interval for repeating tasks.
    every_ms: Option<u64>,
    action: A,
}

/// Pending tasks plus the current virtual time.
#[derive(Debug, Clone)]
pub struct Scheduler<A> {
    now_ms: u64,
    next_id: u32,
    tasks: Vec<Task<A>>,
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    fn alloc_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fire `action` once, `delay_ms` from now.
    pub fn once(&mut self, delay_ms: u64, action: A) -> TaskId {
        let id = self.alloc_id();
        self.tasks.push(Task {
            id,
            due_ms: self.now_ms + delay_ms,
            every_ms: None,
            action,
        });
        id
    }

    /// Fire `action` every `interval_ms`, first time one interval from now.
    /// A zero interval is treated as 1 ms.
    pub fn every(&mut self, interval_ms: u64, action: A) -> TaskId {
        let interval = interval_ms.max(1);
        let id = self.alloc_id();
        self.tasks.push(Task {
            id,
            due_ms: self.now_ms + interval,
            every_ms: Some(interval),
            action,
        });
        id
    }

    /// Cancel a task. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Cancel every task whose action matches the predicate.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&A) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !pred(&t.action));
        before - self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Pop the earliest task due at or before `deadline`, moving `now` to its due time.
    /// Ties fire in creation order. Repeating tasks are re-armed before returning.
    pub fn pop_due(&mut self, deadline: u64) -> Option<A> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= deadline)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let due = self.tasks[idx].due_ms;
        self.now_ms = self.now_ms.max(due);
        match self.tasks[idx].every_ms {
            Some(interval) => {
                let task = &mut self.tasks[idx];
                task.due_ms += interval;
                Some(task.action.clone())
            }
            None => Some(self.tasks.remove(idx).action),
        }
    }

    /// Move time forward to `deadline` without firing anything.
    pub fn settle(&mut self, deadline: u64) {
        self.now_ms = self.now_ms.max(deadline);
    }
}

impl<A: Clone> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fire everything due within the next `ms`, the way the sequencer drives it.
    fn run<A: Clone>(s: &mut Scheduler<A>, ms: u64) -> Vec<A> {
        let deadline = s.now() + ms;
        let mut fired = Vec::new();
        while let Some(action) = s.pop_due(deadline) {
            fired.push(action);
        }
        s.settle(deadline);
        fired
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.once(300, 'c');
        s.once(100, 'a');
        s.once(200, 'b');
        assert_eq!(run(&mut s, 250), vec!['a', 'b']);
        assert_eq!(s.now(), 250);
        assert_eq!(run(&mut s, 100), vec!['c']);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn ties_fire_in_creation_order() {
        let mut s = Scheduler::new();
        s.once(100, 1);
        s.once(100, 2);
        s.once(100, 3);
        assert_eq!(run(&mut s, 100), vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let id = s.once(100, "x");
        assert!(s.is_pending(id));
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(run(&mut s, 1000).is_empty());
    }

    #[test]
    fn repeating_task_rearms() {
        let mut s = Scheduler::new();
        let id = s.every(400, "tick");
        assert_eq!(run(&mut s, 1000).len(), 2);
        assert_eq!(run(&mut s, 200).len(), 1);
        assert!(s.cancel(id));
        assert!(run(&mut s, 5000).is_empty());
    }

    #[test]
    fn pop_due_moves_time_to_task() {
        let mut s = Scheduler::new();
        s.once(600, 'a');
        assert_eq!(s.pop_due(1000), Some('a'));
        assert_eq!(s.now(), 600);
        // Follow-up scheduled relative to the firing time, inside the window.
        s.once(300, 'b');
        assert_eq!(s.pop_due(1000), Some('b'));
        assert_eq!(s.now(), 900);
        assert_eq!(s.pop_due(1000), None);
        s.settle(1000);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn cancel_where_filters_by_action() {
        let mut s = Scheduler::new();
        s.once(10, 1);
        s.once(20, 2);
        s.every(30, 3);
        assert_eq!(s.cancel_where(|a| *a != 2), 2);
        assert_eq!(run(&mut s, 100), vec![2]);
    }
}
