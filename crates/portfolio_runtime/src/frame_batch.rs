//! Per-animation-frame coalescing of presentational updates.
//!
//! Updates are keyed; a later update for the same key replaces the earlier one, so a burst of
//! hover changes inside one frame collapses to a single applied change.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBatcher<K, U> {
    pending: Vec<(K, U)>,
    frame_requested: bool,
}

impl<K, U> Default for FrameBatcher<K, U> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            frame_requested: false,
        }
    }
}

impl<K: PartialEq, U> FrameBatcher<K, U> {
    /// Queues `update` for `key`. Returns `true` when the caller must request an animation frame.
    pub fn schedule(&mut self, key: K, update: U) -> bool {
        match self.pending.iter_mut().find(|(pending, _)| *pending == key) {
            Some(entry) => entry.1 = update,
            None => self.pending.push((key, update)),
        }
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Drains the updates for the current frame, first-queued key first.
    pub fn take_frame(&mut self) -> Vec<(K, U)> {
        self.frame_requested = false;
        std::mem::take(&mut self.pending)
    }

    pub fn is_idle(&self) -> bool {
        !self.frame_requested && self.pending.is_empty()
    }
}
