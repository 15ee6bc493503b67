//! Outbound intents emitted by [`crate::reducer::reduce_desktop`].
//!
//! The reducer never touches the presentation layer; it describes what should happen and the
//! controller hands these to the injected [`crate::presentation::PresentationAdapter`].

use serde::{Deserialize, Serialize};

use crate::{
    model::{AppType, Window, WindowId, WindowRect},
    taskbar::TaskbarEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundKind {
    Open,
    Close,
    Minimize,
    Play,
    Stop,
}

/// Data needed to create a window's on-screen representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content_id: String,
    pub bounds: WindowRect,
    pub z_index: u32,
}

/// One row in the switcher, task view or group chooser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub minimized: bool,
}

impl From<&Window> for WindowSummary {
    fn from(window: &Window) -> Self {
        Self {
            id: window.id,
            title: window.title.clone(),
            icon: window.app_type.icon().to_string(),
            minimized: window.is_minimized(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderInstruction {
    CreateWindow(WindowView),
    /// The open animation settled.
    WindowOpened(WindowId),
    /// Start the close animation; the window is already gone logically.
    WindowClosing(WindowId),
    DestroyWindow(WindowId),
    SetWindowVisible {
        window_id: WindowId,
        visible: bool,
    },
    SetZIndex {
        window_id: WindowId,
        z_index: u32,
    },
    SetActiveWindow(Option<WindowId>),
    SetWindowBounds {
        window_id: WindowId,
        bounds: WindowRect,
        maximized: bool,
    },
    SetTaskbar(Vec<TaskbarEntry>),
    ShowSwitcher {
        entries: Vec<WindowSummary>,
        selected_index: usize,
    },
    SelectSwitcherEntry(usize),
    PreviewWindow(WindowId),
    HideSwitcher,
    ShowGroupChooser {
        app_type: AppType,
        windows: Vec<WindowSummary>,
    },
    HideGroupChooser,
    ShowTaskbarContextMenu {
        app_type: AppType,
        window_id: WindowId,
    },
    HideTaskbarContextMenu,
    /// Menu opened by right-clicking empty taskbar space.
    SetTaskbarMenuOpen(bool),
    /// Hover thumbnail for a taskbar group, showing its first member.
    ShowTaskbarPreview {
        app_type: AppType,
        window: WindowSummary,
    },
    HideTaskbarPreview,
    SetStartMenuOpen(bool),
    ShowTaskView(Vec<WindowSummary>),
    HideTaskView,
    ShowNotification {
        id: u64,
        message: String,
    },
    DismissNotification(u64),
    ClearSoundIndicator,
}

/// Side-effect intents for the presentation layer and the excluded audio engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeEffect {
    Render(RenderInstruction),
    /// Fire-and-forget sound effect.
    PlaySound(SoundKind),
    SetMusicPlaying(bool),
    SetVolume(u8),
}

impl From<RenderInstruction> for RuntimeEffect {
    fn from(instruction: RenderInstruction) -> Self {
        Self::Render(instruction)
    }
}

/// A visual effect to run after a cosmetic delay. Scheduling a name that is already pending
/// replaces the pending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredEffect {
    pub name: String,
    pub delay_ms: u64,
    pub effect: RuntimeEffect,
}

/// Everything one reducer step produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<RuntimeEffect>,
    pub deferred: Vec<DeferredEffect>,
    /// Names of pending deferred effects made obsolete by this step.
    pub cancelled: Vec<String>,
}

impl Transition {
    pub fn render(&mut self, instruction: RenderInstruction) {
        self.effects.push(RuntimeEffect::Render(instruction));
    }

    pub fn push(&mut self, effect: RuntimeEffect) {
        self.effects.push(effect);
    }

    pub fn defer(
        &mut self,
        name: impl Into<String>,
        delay_ms: u64,
        effect: impl Into<RuntimeEffect>,
    ) {
        self.deferred.push(DeferredEffect {
            name: name.into(),
            delay_ms,
            effect: effect.into(),
        });
    }

    pub fn cancel(&mut self, name: impl Into<String>) {
        self.cancelled.push(name.into());
    }
}
