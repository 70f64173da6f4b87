use std::time::Instant;

/// Items waiting for a point in time.
///
/// The main loop polls the queue every tick with the current time and
/// receives the items that have come due, earliest first.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    entries: Vec<(Instant, T)>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn schedule(&mut self, due: Instant, item: T) {
        self.entries.push((due, item));
    }

    /// Removes and returns every item due at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|(at, _)| *at <= now);
        self.entries = pending;
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, item)| item).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
