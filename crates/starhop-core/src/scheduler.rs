//! One-shot timer queue driven by simulated time.
//!
//! Callbacks are plain event values handed back by `pop_due`, so the owner
//! decides what each one does and time can be advanced deterministically
//! in tests.

/// Handle for a scheduled timer. Never reused within a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<E> {
    id: TimerId,
    due_ms: f64,
    event: E,
}

/// A timer whose due time has been reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    pub due_ms: f64,
    pub event: E,
}

#[derive(Clone, Debug)]
pub struct TimerQueue<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire `delay_ms` after `now_ms`.
    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: f64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due_ms: now_ms + delay_ms.max(0.0),
            event,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Timers due at the same instant fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Fired<E>> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let entry = self.entries.swap_remove(idx);
        Some(Fired {
            id: entry.id,
            due_ms: entry.due_ms,
            event: entry.event,
        })
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
