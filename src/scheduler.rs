use crate::prelude::*;

/// Identifies one scheduled task. Handles stay valid to hold after the task
/// fired or was canceled; using them then is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(SlotKey);

/// Delayed and repeating task registration, as provided by the server.
///
/// Tasks are plain values handed back to whoever drives the scheduler once
/// they are due, rather than callbacks, so a task can freely reschedule
/// itself without borrowing the scheduler that runs it.
pub trait Scheduler<T> {
    /// Runs `task` once, `delay` ticks from now. A zero delay means the next
    /// tick, never the current one.
    fn schedule_once(&mut self, delay: Ticks, task: T) -> TaskHandle;
    fn schedule_repeating(&mut self, initial_delay: Ticks, period: Ticks, task: T) -> TaskHandle;
    /// Returns whether the task was still pending.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
    fn is_pending(&self, handle: TaskHandle) -> bool;
}

#[derive(Debug)]
struct Entry<T> {
    due: u64,
    seq: u64,
    period: Option<u64>,
    task: T,
}

/// A [`Scheduler`] driven by the server's tick loop.
#[derive(Debug)]
pub struct TickScheduler<T> {
    tick: u64,
    seq: u64,
    tasks: SlotMap<Entry<T>>,
}
impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T> TickScheduler<T> {
    pub fn new() -> Self {
        Self {
            tick: 0,
            seq: 0,
            tasks: SlotMap::new(),
        }
    }
    pub fn now(&self) -> Ticks {
        Ticks(self.tick)
    }
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
    /// Moves on to the next tick. Tasks due by then are handed out by [`Self::poll`].
    pub fn advance(&mut self) {
        self.tick += 1;
    }
    fn push(&mut self, delay: Ticks, period: Option<u64>, task: T) -> TaskHandle {
        self.seq += 1;
        let due = self.tick.saturating_add(delay.0.max(1));
        log::trace!("scheduling task for tick {due}");
        TaskHandle(self.tasks.insert(Entry { due, seq: self.seq, period, task }))
    }
}
impl<T: Clone> TickScheduler<T> {
    /// Hands out the next task due on the current tick, in the order tasks
    /// were scheduled. Call until it returns `None`.
    pub fn poll(&mut self) -> Option<T> {
        let now = self.tick;
        let (key, _) = self
            .tasks
            .iter()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.seq))?;
        let entry = self.tasks.get_mut(key)?;
        match entry.period {
            Some(period) => {
                entry.due = now.saturating_add(period.max(1));
                Some(entry.task.clone())
            }
            None => self.tasks.release(key).map(|e| e.task),
        }
    }
}
impl<T> Scheduler<T> for TickScheduler<T> {
    fn schedule_once(&mut self, delay: Ticks, task: T) -> TaskHandle {
        self.push(delay, None, task)
    }
    fn schedule_repeating(&mut self, initial_delay: Ticks, period: Ticks, task: T) -> TaskHandle {
        self.push(initial_delay, Some(period.0), task)
    }
    fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.tasks.release(handle.0).is_some()
    }
    fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.contains(handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(sched: &mut TickScheduler<&'static str>, tick: u64) -> Vec<(u64, &'static str)> {
        let mut fired = vec![];
        while sched.now().0 < tick {
            sched.advance();
            while let Some(task) = sched.poll() {
                fired.push((sched.now().0, task));
            }
        }
        fired
    }

    #[test]
    fn once_fires_after_its_delay() {
        let mut sched = TickScheduler::new();
        let handle = sched.schedule_once(Ticks(3), "a");
        assert!(sched.is_pending(handle));
        assert_eq!(run_until(&mut sched, 10), vec![(3, "a")]);
        assert!(!sched.is_pending(handle));
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn zero_delay_waits_for_the_next_tick() {
        let mut sched = TickScheduler::new();
        sched.schedule_once(Ticks::ZERO, "now");
        assert_eq!(sched.poll(), None);
        assert_eq!(run_until(&mut sched, 1), vec![(1, "now")]);
    }

    #[test]
    fn repeating_keeps_its_period() {
        let mut sched = TickScheduler::new();
        sched.schedule_repeating(Ticks(1), Ticks(4), "sweep");
        let fired: Vec<_> = run_until(&mut sched, 12).into_iter().map(|(t, _)| t).collect();
        assert_eq!(fired, vec![1, 5, 9]);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn same_tick_tasks_run_in_schedule_order() {
        let mut sched = TickScheduler::new();
        sched.schedule_once(Ticks(2), "first");
        sched.schedule_once(Ticks(1), "early");
        sched.schedule_once(Ticks(2), "second");
        assert_eq!(run_until(&mut sched, 2), vec![(1, "early"), (2, "first"), (2, "second")]);
    }

    #[test]
    fn cancel_is_a_no_op_once_fired() {
        let mut sched = TickScheduler::new();
        let fired = sched.schedule_once(Ticks(1), "fired");
        run_until(&mut sched, 1);
        // the freed slot gets reused by the next task
        let next = sched.schedule_once(Ticks(5), "next");
        assert!(!sched.cancel(fired));
        assert!(sched.is_pending(next));
        assert!(sched.cancel(next));
        assert!(!sched.cancel(next));
        assert!(run_until(&mut sched, 10).is_empty());
    }
}
