//! Error types for desktop transitions.
//!
//! None of these reach the user. [`crate::controller::DesktopController`] logs them and drops the
//! command, so every variant describes a precondition that was not met.

use thiserror::Error;

use crate::model::{AppType, WindowId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Precondition failures raised by the registry, the focus stack and the reducer.
pub enum DesktopError {
    /// The target window id is not registered.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
    /// A window with this id is already registered.
    #[error("duplicate window id: {0}")]
    DuplicateWindow(WindowId),
    /// No window template exists for the requested file type.
    #[error("unknown file type: {0:?}")]
    UnknownFileType(String),
    /// No taskbar group exists for the app type.
    #[error("no taskbar group for {}", .0.as_str())]
    GroupNotFound(AppType),
    /// The window switcher needs at least two visible windows to open.
    #[error("window switcher needs two visible windows, found {visible}")]
    NotEnoughWindows {
        /// Number of visible windows at request time.
        visible: usize,
    },
    /// The command does not apply in the current desktop state.
    #[error("{command} ignored: {reason}")]
    NotApplicable {
        /// Command name.
        command: &'static str,
        /// Why the command was ignored.
        reason: &'static str,
    },
}
