pub mod catalog;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod focus_stack;
pub mod frame_batch;
mod host;
pub mod model;
pub mod presentation;
pub mod reducer;
pub mod runtime_context;
pub mod scheduler;
pub mod shortcuts;
pub mod switcher;
pub mod taskbar;
pub mod window_registry;

pub use catalog::{BuiltinTemplates, WindowTemplate, WindowTemplateSource};
pub use config::{AnimationTimings, ConfigError, DesktopConfig};
pub use controller::DesktopController;
pub use effects::{RenderInstruction, RuntimeEffect, SoundKind, Transition};
pub use error::DesktopError;
pub use model::*;
pub use presentation::{DesktopView, PresentationAdapter, RecordingPresentation};
pub use reducer::{reduce_desktop, DesktopCommand, DesktopState, GroupMenuAction, TaskbarMenuItem};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
pub use switcher::CycleDirection;
