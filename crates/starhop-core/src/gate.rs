use crate::scheduler::{TimerId, TimerQueue};

/// Delayed-visibility latch for a destination's content.
///
/// At most one reveal timer is pending at a time; arming again replaces
/// the previous timer. A timer that fires after being replaced or
/// cancelled is ignored.
#[derive(Clone, Debug, Default)]
pub struct ContentGate {
    visible: bool,
    pending: Option<TimerId>,
}

impl ContentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the reveal timer, replacing any pending one.
    pub fn arm<E>(&mut self, queue: &mut TimerQueue<E>, now_ms: f64, delay_ms: f64, event: E) {
        self.cancel(queue);
        self.pending = Some(queue.schedule_after(now_ms, delay_ms, event));
    }

    /// Stop the pending timer, if any. Visibility is untouched.
    pub fn cancel<E>(&mut self, queue: &mut TimerQueue<E>) {
        if let Some(id) = self.pending.take() {
            queue.cancel(id);
        }
    }

    /// Handle a fired reveal timer. Returns true if content became visible.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        self.visible = true;
        true
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
