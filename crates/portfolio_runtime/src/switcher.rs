//! Alt-tab style window switcher.
//!
//! The switcher only exists while the cycle modifier is held. Opening snapshots the visible
//! windows; later opens, closes or minimizes do not change the snapshot.

use serde::{Deserialize, Serialize};

use crate::{error::DesktopError, model::WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSwitcherState {
    candidate_ids: Vec<WindowId>,
    selected_index: usize,
}

impl WindowSwitcherState {
    pub fn candidate_ids(&self) -> &[WindowId] {
        &self.candidate_ids
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> WindowId {
        self.candidate_ids[self.selected_index]
    }

    fn step(&mut self, direction: CycleDirection) {
        let len = self.candidate_ids.len();
        self.selected_index = match direction {
            CycleDirection::Forward => (self.selected_index + 1) % len,
            CycleDirection::Backward => (self.selected_index + len - 1) % len,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowSwitcher {
    #[default]
    Closed,
    Open(WindowSwitcherState),
}

/// Result of a successful cycle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherTransition {
    /// The switcher went from closed to open.
    Opened,
    /// The selection moved inside an open switcher.
    Moved,
}

impl WindowSwitcher {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn state(&self) -> Option<&WindowSwitcherState> {
        match self {
            Self::Open(state) => Some(state),
            Self::Closed => None,
        }
    }

    /// Opens the switcher or moves its selection.
    ///
    /// `candidates` is only consulted when the switcher is closed; it should list visible windows
    /// most recently focused first, so index 0 is the window that is already active.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::NotEnoughWindows`] when opening with fewer than two candidates.
    pub fn cycle<F>(
        &mut self,
        direction: CycleDirection,
        candidates: F,
    ) -> Result<SwitcherTransition, DesktopError>
    where
        F: FnOnce() -> Vec<WindowId>,
    {
        if let Self::Open(state) = self {
            state.step(direction);
            return Ok(SwitcherTransition::Moved);
        }

        let candidate_ids = candidates();
        if candidate_ids.len() < 2 {
            return Err(DesktopError::NotEnoughWindows {
                visible: candidate_ids.len(),
            });
        }
        let selected_index = match direction {
            CycleDirection::Forward => 1,
            CycleDirection::Backward => candidate_ids.len() - 1,
        };
        *self = Self::Open(WindowSwitcherState {
            candidate_ids,
            selected_index,
        });
        Ok(SwitcherTransition::Opened)
    }

    /// Closes the switcher, returning the window that should become active.
    pub fn commit(&mut self) -> Option<WindowId> {
        match std::mem::take(self) {
            Self::Open(state) => Some(state.selected()),
            Self::Closed => None,
        }
    }

    /// Closes the switcher without choosing anything. Returns whether it was open.
    pub fn cancel(&mut self) -> bool {
        matches!(std::mem::take(self), Self::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(raw: &[u64]) -> Vec<WindowId> {
        raw.iter().copied().map(WindowId).collect()
    }

    #[test]
    fn forward_open_skips_the_active_window() {
        let mut switcher = WindowSwitcher::default();
        assert_eq!(
            switcher.cycle(CycleDirection::Forward, || ids(&[3, 2, 1])),
            Ok(SwitcherTransition::Opened)
        );
        assert_eq!(switcher.state().unwrap().selected(), WindowId(2));
    }

    #[test]
    fn backward_open_selects_the_last_candidate() {
        let mut switcher = WindowSwitcher::default();
        switcher
            .cycle(CycleDirection::Backward, || ids(&[3, 2, 1]))
            .unwrap();
        assert_eq!(switcher.state().unwrap().selected_index(), 2);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut switcher = WindowSwitcher::default();
        switcher
            .cycle(CycleDirection::Forward, || ids(&[3, 2, 1]))
            .unwrap();
        switcher
            .cycle(CycleDirection::Forward, || unreachable!("snapshot reused"))
            .unwrap();
        assert_eq!(switcher.state().unwrap().selected_index(), 2);
        switcher
            .cycle(CycleDirection::Forward, Vec::new)
            .unwrap();
        assert_eq!(switcher.state().unwrap().selected_index(), 0);
        assert_eq!(
            switcher.cycle(CycleDirection::Backward, Vec::new),
            Ok(SwitcherTransition::Moved)
        );
        assert_eq!(switcher.state().unwrap().selected_index(), 2);
    }

    #[test]
    fn fewer_than_two_candidates_keeps_switcher_closed() {
        let mut switcher = WindowSwitcher::default();
        assert_eq!(
            switcher.cycle(CycleDirection::Forward, || ids(&[1])),
            Err(DesktopError::NotEnoughWindows { visible: 1 })
        );
        assert!(!switcher.is_open());
    }

    #[test]
    fn commit_returns_selection_and_closes() {
        let mut switcher = WindowSwitcher::default();
        switcher
            .cycle(CycleDirection::Forward, || ids(&[2, 1]))
            .unwrap();
        assert_eq!(switcher.commit(), Some(WindowId(1)));
        assert!(!switcher.is_open());
        assert_eq!(switcher.commit(), None);
    }

    #[test]
    fn cancel_discards_state() {
        let mut switcher = WindowSwitcher::default();
        switcher
            .cycle(CycleDirection::Forward, || ids(&[2, 1]))
            .unwrap();
        assert!(switcher.cancel());
        assert!(!switcher.cancel());
        assert_eq!(switcher, WindowSwitcher::Closed);
    }
}
