//! Keyboard shortcut mapping.
//!
//! The host turns browser keyboard events into [`KeyChord`]s; [`map_key_event`] decides which
//! [`DesktopCommand`], if any, a chord triggers.

use serde::{Deserialize, Serialize};

use crate::{reducer::DesktopCommand, switcher::CycleDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Platform-neutral snapshot of a keyboard event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    /// `KeyboardEvent.key`, e.g. `"Tab"` or `"w"`.
    pub key: String,
    /// `KeyboardEvent.code`, e.g. `"Space"`.
    pub code: String,
    pub ctrl: bool,
    pub shift: bool,
    /// Focus is inside an input or textarea.
    pub in_text_input: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// Maps a key event to a desktop command.
///
/// `switcher_open` enables the arrow/Enter navigation keys and commit-on-release of Control.
pub fn map_key_event(
    chord: &KeyChord,
    phase: KeyPhase,
    switcher_open: bool,
) -> Option<DesktopCommand> {
    if phase == KeyPhase::Up {
        return (switcher_open && chord.key == "Control").then_some(DesktopCommand::CommitSwitcher);
    }

    if chord.ctrl {
        match chord.key.as_str() {
            "Tab" => {
                let direction = if chord.shift {
                    CycleDirection::Backward
                } else {
                    CycleDirection::Forward
                };
                return Some(DesktopCommand::CycleWindows { direction });
            }
            key if key.eq_ignore_ascii_case("w") => return Some(DesktopCommand::CloseActiveWindow),
            key if key.eq_ignore_ascii_case("d") => return Some(DesktopCommand::ShowDesktop),
            _ if chord.code == "Space" => return Some(DesktopCommand::ToggleStartMenu),
            _ => {}
        }
    }

    if switcher_open {
        match chord.key.as_str() {
            "ArrowLeft" => {
                return Some(DesktopCommand::CycleWindows {
                    direction: CycleDirection::Backward,
                })
            }
            "ArrowRight" => {
                return Some(DesktopCommand::CycleWindows {
                    direction: CycleDirection::Forward,
                })
            }
            "Enter" => return Some(DesktopCommand::CommitSwitcher),
            _ => {}
        }
    }

    match chord.key.as_str() {
        "Escape" => Some(DesktopCommand::Escape),
        "Tab" if !chord.ctrl && !chord.in_text_input => Some(DesktopCommand::ShowTaskView),
        _ => None,
    }
}
