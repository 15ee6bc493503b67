//! Presentation adapters that consume [`RuntimeEffect`]s.
//!
//! The desktop core never renders; it hands effects to a [`PresentationAdapter`]. [`DesktopView`]
//! is the render-ready snapshot the Leptos shell binds to, and [`RecordingPresentation`] captures
//! the raw effect stream for tests.

use serde::{Deserialize, Serialize};

use crate::{
    effects::{RenderInstruction, RuntimeEffect, SoundKind, WindowSummary, WindowView},
    model::{AppType, WindowId, WindowRect},
    taskbar::TaskbarEntry,
};

/// Consumer of desktop effects.
pub trait PresentationAdapter {
    /// Applies one render instruction.
    fn apply(&mut self, instruction: RenderInstruction);

    /// Plays a one-shot sound effect.
    fn play_sound(&mut self, _sound: SoundKind) {}

    fn set_music_playing(&mut self, _playing: bool) {}

    fn set_volume(&mut self, _percent: u8) {}

    /// Routes `effect` to the matching adapter method.
    fn run_effect(&mut self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Render(instruction) => self.apply(instruction),
            RuntimeEffect::PlaySound(sound) => self.play_sound(sound),
            RuntimeEffect::SetMusicPlaying(playing) => self.set_music_playing(playing),
            RuntimeEffect::SetVolume(percent) => self.set_volume(percent),
        }
    }

    fn run_effects(&mut self, effects: Vec<RuntimeEffect>) {
        for effect in effects {
            self.run_effect(effect);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Adapter that keeps every effect it receives, in order.
pub struct RecordingPresentation {
    pub effects: Vec<RuntimeEffect>,
}

impl RecordingPresentation {
    pub fn take(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn rendered(&self) -> impl Iterator<Item = &RenderInstruction> {
        self.effects.iter().filter_map(|effect| match effect {
            RuntimeEffect::Render(instruction) => Some(instruction),
            _ => None,
        })
    }
}

impl PresentationAdapter for RecordingPresentation {
    fn apply(&mut self, instruction: RenderInstruction) {
        self.effects.push(RuntimeEffect::Render(instruction));
    }

    fn run_effect(&mut self, effect: RuntimeEffect) {
        self.effects.push(effect);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowPhase {
    /// Open animation still running.
    Opening,
    Open,
    /// Close animation running; removed once destroyed.
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSurface {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub content_id: String,
    pub bounds: WindowRect,
    pub z_index: u32,
    pub visible: bool,
    pub maximized: bool,
    pub phase: WindowPhase,
}

impl From<WindowView> for WindowSurface {
    fn from(view: WindowView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            icon: view.icon,
            content_id: view.content_id,
            bounds: view.bounds,
            z_index: view.z_index,
            visible: true,
            maximized: false,
            phase: WindowPhase::Opening,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherView {
    pub entries: Vec<WindowSummary>,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChooserView {
    pub app_type: AppType,
    pub windows: Vec<WindowSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuView {
    pub app_type: AppType,
    pub window_id: WindowId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarPreviewView {
    pub app_type: AppType,
    pub window: WindowSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: u64,
    pub message: String,
}

/// Purely cosmetic hover state, batched per animation frame by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "kebab-case")]
pub enum HoverTarget {
    DesktopIcon(String),
    TaskbarEntry(AppType),
}

/// Render-ready snapshot of the whole desktop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopView {
    /// Surfaces in creation order, including windows still animating closed.
    pub windows: Vec<WindowSurface>,
    pub active_window: Option<WindowId>,
    pub taskbar: Vec<TaskbarEntry>,
    pub switcher: Option<SwitcherView>,
    pub preview_window: Option<WindowId>,
    pub group_chooser: Option<GroupChooserView>,
    pub context_menu: Option<ContextMenuView>,
    pub taskbar_menu_open: bool,
    pub taskbar_preview: Option<TaskbarPreviewView>,
    pub start_menu_open: bool,
    pub task_view: Option<Vec<WindowSummary>>,
    pub notifications: Vec<NotificationView>,
    pub sound_indicator: Option<SoundKind>,
    pub music_playing: bool,
    pub volume: u8,
    pub hovered: Vec<HoverTarget>,
}

impl DesktopView {
    pub fn with_volume(volume: u8) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowSurface> {
        self.windows.iter().find(|surface| surface.id == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowSurface> {
        self.windows.iter_mut().find(|surface| surface.id == id)
    }

    /// Surfaces sorted bottom to top.
    pub fn stacked_windows(&self) -> Vec<&WindowSurface> {
        let mut stacked: Vec<&WindowSurface> = self.windows.iter().collect();
        stacked.sort_by_key(|surface| surface.z_index);
        stacked
    }

    pub fn apply_hover(&mut self, target: HoverTarget, hovered: bool) {
        let present = self.hovered.contains(&target);
        if hovered && !present {
            self.hovered.push(target);
        } else if !hovered && present {
            self.hovered.retain(|entry| *entry != target);
        }
    }

    /// Serializes the snapshot for debugging and host bridges.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl PresentationAdapter for DesktopView {
    fn apply(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::CreateWindow(view) => {
                self.windows.retain(|surface| surface.id != view.id);
                self.windows.push(WindowSurface::from(view));
            }
            RenderInstruction::WindowOpened(id) => {
                if let Some(surface) = self.window_mut(id) {
                    if surface.phase == WindowPhase::Opening {
                        surface.phase = WindowPhase::Open;
                    }
                }
            }
            RenderInstruction::WindowClosing(id) => {
                if let Some(surface) = self.window_mut(id) {
                    surface.phase = WindowPhase::Closing;
                }
                if self.preview_window == Some(id) {
                    self.preview_window = None;
                }
            }
            RenderInstruction::DestroyWindow(id) => {
                self.windows.retain(|surface| surface.id != id);
            }
            RenderInstruction::SetWindowVisible { window_id, visible } => {
                if let Some(surface) = self.window_mut(window_id) {
                    surface.visible = visible;
                }
            }
            RenderInstruction::SetZIndex { window_id, z_index } => {
                if let Some(surface) = self.window_mut(window_id) {
                    surface.z_index = z_index;
                }
            }
            RenderInstruction::SetActiveWindow(active) => self.active_window = active,
            RenderInstruction::SetWindowBounds {
                window_id,
                bounds,
                maximized,
            } => {
                if let Some(surface) = self.window_mut(window_id) {
                    surface.bounds = bounds;
                    surface.maximized = maximized;
                }
            }
            RenderInstruction::SetTaskbar(entries) => self.taskbar = entries,
            RenderInstruction::ShowSwitcher {
                entries,
                selected_index,
            } => {
                self.switcher = Some(SwitcherView {
                    entries,
                    selected_index,
                });
            }
            RenderInstruction::SelectSwitcherEntry(index) => {
                if let Some(switcher) = self.switcher.as_mut() {
                    switcher.selected_index = index;
                }
            }
            RenderInstruction::PreviewWindow(id) => self.preview_window = Some(id),
            RenderInstruction::HideSwitcher => {
                self.switcher = None;
                self.preview_window = None;
            }
            RenderInstruction::ShowGroupChooser { app_type, windows } => {
                self.group_chooser = Some(GroupChooserView { app_type, windows });
            }
            RenderInstruction::HideGroupChooser => self.group_chooser = None,
            RenderInstruction::ShowTaskbarContextMenu {
                app_type,
                window_id,
            } => {
                self.context_menu = Some(ContextMenuView {
                    app_type,
                    window_id,
                });
            }
            RenderInstruction::HideTaskbarContextMenu => self.context_menu = None,
            RenderInstruction::SetTaskbarMenuOpen(open) => self.taskbar_menu_open = open,
            RenderInstruction::ShowTaskbarPreview { app_type, window } => {
                self.taskbar_preview = Some(TaskbarPreviewView { app_type, window });
            }
            RenderInstruction::HideTaskbarPreview => self.taskbar_preview = None,
            RenderInstruction::SetStartMenuOpen(open) => self.start_menu_open = open,
            RenderInstruction::ShowTaskView(windows) => self.task_view = Some(windows),
            RenderInstruction::HideTaskView => self.task_view = None,
            RenderInstruction::ShowNotification { id, message } => {
                self.notifications.push(NotificationView { id, message });
            }
            RenderInstruction::DismissNotification(id) => {
                self.notifications.retain(|n| n.id != id);
            }
            RenderInstruction::ClearSoundIndicator => self.sound_indicator = None,
        }
    }

    fn play_sound(&mut self, sound: SoundKind) {
        self.sound_indicator = Some(sound);
    }

    fn set_music_playing(&mut self, playing: bool) {
        self.music_playing = playing;
    }

    fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn phase(view: &DesktopView) -> WindowPhase {
        view.window(WindowId(1)).expect("surface").phase
    }

    fn create(id: u64, z_index: u32) -> RenderInstruction {
        RenderInstruction::CreateWindow(WindowView {
            id: WindowId(id),
            title: format!("Window {id}"),
            icon: "📄".to_string(),
            content_id: "about".to_string(),
            bounds: WindowRect::default(),
            z_index,
        })
    }

    #[test]
    fn window_lifecycle_moves_through_phases() {
        let mut view = DesktopView::default();
        view.apply(create(1, 401));
        assert_eq!(phase(&view), WindowPhase::Opening);

        view.apply(RenderInstruction::WindowOpened(WindowId(1)));
        assert_eq!(phase(&view), WindowPhase::Open);

        view.apply(RenderInstruction::WindowClosing(WindowId(1)));
        assert_eq!(phase(&view), WindowPhase::Closing);

        // A late settle must not revive a closing window.
        view.apply(RenderInstruction::WindowOpened(WindowId(1)));
        assert_eq!(phase(&view), WindowPhase::Closing);

        view.apply(RenderInstruction::DestroyWindow(WindowId(1)));
        assert!(view.windows.is_empty());
    }

    #[test]
    fn stacked_windows_follow_z_index() {
        let mut view = DesktopView::default();
        view.apply(create(1, 401));
        view.apply(create(2, 402));
        view.apply(RenderInstruction::SetZIndex {
            window_id: WindowId(1),
            z_index: 403,
        });

        let order: Vec<WindowId> = view.stacked_windows().iter().map(|s| s.id).collect();
        assert_eq!(order, vec![WindowId(2), WindowId(1)]);
    }

    #[test]
    fn hiding_switcher_clears_preview() {
        let mut view = DesktopView::default();
        view.apply(RenderInstruction::ShowSwitcher {
            entries: Vec::new(),
            selected_index: 1,
        });
        view.apply(RenderInstruction::PreviewWindow(WindowId(2)));
        view.apply(RenderInstruction::SelectSwitcherEntry(0));
        assert_eq!(view.switcher.as_ref().unwrap().selected_index, 0);

        view.apply(RenderInstruction::HideSwitcher);
        assert_eq!(view.switcher, None);
        assert_eq!(view.preview_window, None);
    }

    #[test]
    fn sounds_drive_the_indicator() {
        let mut view = DesktopView::with_volume(30);
        view.run_effects(vec![
            RuntimeEffect::PlaySound(SoundKind::Minimize),
            RuntimeEffect::SetVolume(80),
        ]);
        assert_eq!(view.sound_indicator, Some(SoundKind::Minimize));
        assert_eq!(view.volume, 80);

        view.run_effect(RenderInstruction::ClearSoundIndicator.into());
        assert_eq!(view.sound_indicator, None);
    }

    #[test]
    fn hover_targets_toggle_without_duplicates() {
        let mut view = DesktopView::default();
        view.apply_hover(HoverTarget::DesktopIcon("about".to_string()), true);
        view.apply_hover(HoverTarget::DesktopIcon("about".to_string()), true);
        view.apply_hover(HoverTarget::TaskbarEntry(AppType::Skills), true);
        assert_eq!(view.hovered.len(), 2);

        view.apply_hover(HoverTarget::DesktopIcon("about".to_string()), false);
        assert_eq!(
            view.hovered,
            vec![HoverTarget::TaskbarEntry(AppType::Skills)]
        );
    }

    #[test]
    fn taskbar_menu_and_preview_surfaces_follow_instructions() {
        let mut view = DesktopView::default();
        view.apply(RenderInstruction::SetTaskbarMenuOpen(true));
        assert!(view.taskbar_menu_open);

        let window = WindowSummary {
            id: WindowId(4),
            title: "Skills.exe".to_string(),
            icon: AppType::Skills.icon().to_string(),
            minimized: false,
        };
        view.apply(RenderInstruction::ShowTaskbarPreview {
            app_type: AppType::Skills,
            window: window.clone(),
        });
        assert_eq!(
            view.taskbar_preview,
            Some(TaskbarPreviewView {
                app_type: AppType::Skills,
                window,
            })
        );

        view.apply(RenderInstruction::HideTaskbarPreview);
        view.apply(RenderInstruction::SetTaskbarMenuOpen(false));
        assert_eq!(view.taskbar_preview, None);
        assert!(!view.taskbar_menu_open);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut view = DesktopView::default();
        view.apply(create(1, 401));
        view.apply(RenderInstruction::SetActiveWindow(Some(WindowId(1))));

        let json: serde_json::Value =
            serde_json::from_str(&view.to_json().expect("serializes")).expect("valid json");
        assert_eq!(json["active_window"], serde_json::json!(1));
        assert_eq!(json["windows"][0]["phase"], serde_json::json!("opening"));
    }

    #[test]
    fn recording_presentation_keeps_effect_order() {
        let mut recording = RecordingPresentation::default();
        recording.run_effects(vec![
            RenderInstruction::HideTaskView.into(),
            RuntimeEffect::PlaySound(SoundKind::Close),
        ]);
        assert_eq!(
            recording.rendered().collect::<Vec<_>>(),
            vec![&RenderInstruction::HideTaskView]
        );
        assert_eq!(recording.take().len(), 2);
        assert!(recording.effects.is_empty());
    }
}
