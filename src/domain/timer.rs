/// Cancellable one-shot timers, polled by the frame loop.
///
/// `schedule` hands back a `TimerId`; the owner keeps the ids of whatever it
/// scheduled and cancels them explicitly on teardown. `poll` removes and
/// returns every payload whose deadline has passed, in deadline order (ties
/// in scheduling order).

use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: Duration,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        TimerQueue { entries: Vec::new(), next_id: 0 }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due, payload });
        id
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel a batch; returns how many were still pending.
    pub fn cancel_all(&mut self, ids: &[TimerId]) -> usize {
        ids.iter().filter(|&&id| self.cancel(id)).count()
    }

    /// Remove and return every timer due at or before `now`.
    pub fn poll(&mut self, now: Duration) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due <= now {
                due.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        // stable: equal deadlines keep scheduling order
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| (e.id, e.payload)).collect()
    }
}

#[cfg(test)]
impl<T> TimerQueue<T> {
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
