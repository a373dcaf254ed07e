//! Virtual-clock timer queue.
//!
//! [§ 8.6 Timers](https://html.spec.whatwg.org/multipage/timers-and-user-prompts.html#timers)
//!
//! The page has a single thread of execution; timers only fire when the
//! clock is advanced. Tasks run one at a time with no borrow held, so a task
//! may schedule further tasks.

use crate::resource::{Scheduler, Task};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

struct Timer {
    deadline: Duration,
    /// Scheduling order, breaks ties between equal deadlines.
    seq: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earliest deadline first, then FIFO.
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A queue of one-shot timers driven by an explicit clock.
#[derive(Default)]
pub struct TimerQueue {
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    queue: RefCell<BinaryHeap<Timer>>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of timers that have not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// [§ 8.6 timer initialization steps](https://html.spec.whatwg.org/multipage/timers-and-user-prompts.html#timer-initialisation-steps)
    ///
    /// "Wait until any invocations of this algorithm that had the same
    /// global and orderingIdentifier, that started before this one, and
    /// whose timeout is equal to or less than this one's, have completed."
    pub fn set_timeout(&self, delay: Duration, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(Timer {
            deadline: self.now.get() + delay,
            seq,
            task,
        });
    }

    /// Move the clock forward by `by`, running every timer that comes due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;
        while let Some(timer) = self.pop_due(Some(target)) {
            self.fire(timer);
            ran += 1;
        }
        self.now.set(target);
        ran
    }

    /// Run timers until none are left, advancing the clock to each deadline.
    ///
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(timer) = self.pop_due(None) {
            self.fire(timer);
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, until: Option<Duration>) -> Option<Timer> {
        let mut queue = self.queue.borrow_mut();
        let due = queue
            .peek()
            .is_some_and(|timer| until.is_none_or(|until| timer.deadline <= until));
        if due { queue.pop() } else { None }
    }

    fn fire(&self, timer: Timer) {
        if timer.deadline > self.now.get() {
            self.now.set(timer.deadline);
        }
        (timer.task)();
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&self, delay: Duration, task: Task) {
        self.set_timeout(delay, task);
    }
}
