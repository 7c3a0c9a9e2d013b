/// Deadline queue that stands in for "run this callback after a delay".
///
/// Callers schedule plain event values instead of closures; the engine loop
/// sleeps until `next_deadline` and drains whatever is due with `pop_due`.
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use tokio::time::Instant;

struct Scheduled<E> {
    deadline: Instant,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    // BinaryHeap is a max-heap: reverse so the earliest deadline sits on top,
    // and equal deadlines come out in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct Timeline<E> {
    queue: BinaryHeap<Scheduled<E>>,
    next_seq: u64,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Queue `event` to become due `delay` after `from`.
    pub fn schedule(&mut self, from: Instant, delay: Duration, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            deadline: from + delay,
            seq,
            event,
        });
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.peek().map(|s| s.deadline)
    }

    /// Pop the earliest event whose deadline is at or before `now`.
    /// Returns the deadline it was scheduled for, so follow-up steps can be
    /// chained from it without accumulating drift.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, E)> {
        if self.queue.peek()?.deadline > now {
            return None;
        }
        self.queue.pop().map(|s| (s.deadline, s.event))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
