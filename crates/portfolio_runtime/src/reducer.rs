//! Desktop commands, state, and the transition engine that applies one to the other.
//!
//! [`reduce_desktop`] validates every precondition before it mutates anything, so an `Err`
//! always means the state is untouched.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::WindowTemplateSource,
    config::DesktopConfig,
    effects::{RenderInstruction, RuntimeEffect, SoundKind, Transition, WindowSummary, WindowView},
    error::DesktopError,
    focus_stack::FocusStack,
    model::{AppType, Visibility, Window, WindowId, WindowRect},
    switcher::{CycleDirection, SwitcherTransition, WindowSwitcher},
    taskbar::{GroupClickAction, TaskbarEntry, TaskbarGrouper},
    window_registry::WindowRegistry,
};

const SOUND_INDICATOR_TASK: &str = "sound-indicator";
const TASKBAR_PREVIEW_TASK: &str = "taskbar-preview";

/// Entries of the per-group taskbar context menu. Each acts on the group's first window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupMenuAction {
    Restore,
    Minimize,
    Close,
}

/// Entries of the menu shown when right-clicking empty taskbar space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskbarMenuItem {
    TaskManager,
    TaskbarSettings,
    ShowDesktop,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Commands accepted by [`reduce_desktop`]. UI event adapters translate clicks and keys into these.
pub enum DesktopCommand {
    /// Open a new window for a catalog file type.
    OpenFile {
        file_type: String,
    },
    CloseWindow {
        window_id: WindowId,
    },
    /// Close whichever window is active.
    CloseActiveWindow,
    MinimizeWindow {
        window_id: WindowId,
    },
    ToggleMaximize {
        window_id: WindowId,
    },
    /// Focus and raise a window, restoring it first when minimized.
    SetActiveWindow {
        window_id: WindowId,
    },
    /// Geometry reported by the drag/resize collaborator.
    SetWindowBounds {
        window_id: WindowId,
        bounds: WindowRect,
    },
    /// Minimize everything, or restore everything when nothing is visible.
    ShowDesktop,
    TaskbarGroupClick {
        app_type: AppType,
    },
    OpenTaskbarContextMenu {
        app_type: AppType,
    },
    TaskbarContextAction {
        app_type: AppType,
        action: GroupMenuAction,
    },
    /// Right-click on empty taskbar space.
    OpenTaskbarMenu,
    TaskbarMenuAction {
        item: TaskbarMenuItem,
    },
    /// Pointer entered a taskbar group; its preview appears after the hover delay.
    HoverTaskbarGroup {
        app_type: AppType,
    },
    LeaveTaskbarGroup {
        app_type: AppType,
    },
    /// Pick a window from the multi-window group chooser.
    ChooseGroupWindow {
        window_id: WindowId,
    },
    /// Close a window from the multi-window group chooser.
    CloseGroupWindow {
        window_id: WindowId,
    },
    CycleWindows {
        direction: CycleDirection,
    },
    CommitSwitcher,
    CancelSwitcher,
    /// Context-sensitive dismissal of the topmost transient surface.
    Escape,
    ToggleStartMenu,
    CloseStartMenu,
    ShowTaskView,
    CloseTaskView,
    ChooseTaskViewWindow {
        window_id: WindowId,
    },
    CloseTaskViewWindow {
        window_id: WindowId,
    },
    /// Open the first catalog file whose search label matches the query.
    ExecuteSearch {
        query: String,
    },
    ToggleMusic,
    SetVolume {
        percent: u8,
    },
    ShowNotificationCenter,
    ToggleHiddenIcons,
    /// Clock click. `today` is the date as the host formats it.
    ShowCalendar {
        today: String,
    },
}

/// Logical desktop state: open windows, focus, taskbar groups, and transient surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    next_window_id: u64,
    registry: WindowRegistry,
    focus: FocusStack,
    taskbar: TaskbarGrouper,
    switcher: WindowSwitcher,
    start_menu_open: bool,
    task_view_open: bool,
    group_chooser: Option<AppType>,
    context_menu: Option<AppType>,
    taskbar_menu_open: bool,
    /// Group whose hover preview is pending or shown.
    taskbar_preview: Option<AppType>,
    music_playing: bool,
    volume: u8,
    next_notification_id: u64,
    rendered_taskbar: Vec<TaskbarEntry>,
}

impl DesktopState {
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            next_window_id: 1,
            registry: WindowRegistry::default(),
            focus: FocusStack::new(config.z_index_base),
            taskbar: TaskbarGrouper::default(),
            switcher: WindowSwitcher::default(),
            start_menu_open: false,
            task_view_open: false,
            group_chooser: None,
            context_menu: None,
            taskbar_menu_open: false,
            taskbar_preview: None,
            music_playing: false,
            volume: config.default_volume.min(100),
            next_notification_id: 1,
            rendered_taskbar: Vec::new(),
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn focus(&self) -> &FocusStack {
        &self.focus
    }

    pub fn taskbar(&self) -> &TaskbarGrouper {
        &self.taskbar
    }

    pub fn switcher(&self) -> &WindowSwitcher {
        &self.switcher
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.focus.active()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id).ok()
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn task_view_open(&self) -> bool {
        self.task_view_open
    }

    pub fn group_chooser(&self) -> Option<AppType> {
        self.group_chooser
    }

    pub fn context_menu(&self) -> Option<AppType> {
        self.context_menu
    }

    pub fn taskbar_menu_open(&self) -> bool {
        self.taskbar_menu_open
    }

    pub fn taskbar_preview(&self) -> Option<AppType> {
        self.taskbar_preview
    }

    /// Whether a group chooser or one of the taskbar menus is showing.
    fn has_taskbar_popup(&self) -> bool {
        self.group_chooser.is_some() || self.context_menu.is_some() || self.taskbar_menu_open
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    fn summaries(&self, ids: &[WindowId]) -> Vec<WindowSummary> {
        ids.iter()
            .filter_map(|id| self.registry.get(*id).ok())
            .map(WindowSummary::from)
            .collect()
    }

    fn all_summaries(&self) -> Vec<WindowSummary> {
        self.registry
            .all()
            .iter()
            .map(WindowSummary::from)
            .collect()
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(&DesktopConfig::default())
    }
}

/// Applies `command` to `state` and returns the effects the presentation layer should run.
///
/// # Errors
///
/// Returns a [`DesktopError`] describing the unmet precondition when the command does not apply.
/// The state is unchanged in that case.
pub fn reduce_desktop<T>(
    state: &mut DesktopState,
    config: &DesktopConfig,
    templates: &T,
    command: DesktopCommand,
) -> Result<Transition, DesktopError>
where
    T: WindowTemplateSource + ?Sized,
{
    let mut tx = Transition::default();
    match command {
        DesktopCommand::OpenFile { file_type } => {
            open_file(state, config, templates, &mut tx, &file_type)?;
        }
        DesktopCommand::CloseWindow { window_id } => {
            close_window(state, config, &mut tx, window_id)?;
        }
        DesktopCommand::CloseActiveWindow => {
            let window_id = state.focus.active().ok_or(DesktopError::NotApplicable {
                command: "close active window",
                reason: "no active window",
            })?;
            close_window(state, config, &mut tx, window_id)?;
        }
        DesktopCommand::MinimizeWindow { window_id } => {
            minimize_window(state, &mut tx, window_id)?;
        }
        DesktopCommand::ToggleMaximize { window_id } => {
            let window = state.registry.get_mut(window_id)?;
            if window.maximized {
                window.bounds = window.saved_bounds.take().unwrap_or(window.bounds);
                window.maximized = false;
            } else {
                window.saved_bounds = Some(window.bounds);
                window.bounds = config.maximized_rect();
                window.maximized = true;
            }
            tx.render(RenderInstruction::SetWindowBounds {
                window_id,
                bounds: window.bounds,
                maximized: window.maximized,
            });
        }
        DesktopCommand::SetActiveWindow { window_id } => {
            activate_window(state, &mut tx, window_id)?;
        }
        DesktopCommand::SetWindowBounds { window_id, bounds } => {
            state.registry.get_mut(window_id)?.bounds = bounds;
        }
        DesktopCommand::ShowDesktop => show_desktop(state, &mut tx)?,
        DesktopCommand::TaskbarGroupClick { app_type } => {
            let action = state.taskbar.group_click_action(
                app_type,
                &state.registry,
                state.focus.active(),
            )?;
            match action {
                GroupClickAction::Restore(window_id) | GroupClickAction::Focus(window_id) => {
                    activate_window(state, &mut tx, window_id)?;
                }
                GroupClickAction::Minimize(window_id) => {
                    minimize_window(state, &mut tx, window_id)?;
                }
                GroupClickAction::ChooseWindow(window_ids) => {
                    state.group_chooser = Some(app_type);
                    tx.render(RenderInstruction::ShowGroupChooser {
                        app_type,
                        windows: state.summaries(&window_ids),
                    });
                }
            }
        }
        DesktopCommand::OpenTaskbarContextMenu { app_type } => {
            let window_id = first_group_member(state, app_type)?;
            dismiss_taskbar_menu(state, &mut tx);
            state.context_menu = Some(app_type);
            tx.render(RenderInstruction::ShowTaskbarContextMenu {
                app_type,
                window_id,
            });
        }
        DesktopCommand::TaskbarContextAction { app_type, action } => {
            let window_id = first_group_member(state, app_type)?;
            let minimized = state.registry.get(window_id)?.is_minimized();
            dismiss_context_menu(state, &mut tx);
            match action {
                GroupMenuAction::Restore => activate_window(state, &mut tx, window_id)?,
                GroupMenuAction::Minimize if !minimized => {
                    minimize_window(state, &mut tx, window_id)?
                }
                GroupMenuAction::Minimize => {}
                GroupMenuAction::Close => close_window(state, config, &mut tx, window_id)?,
            }
        }
        DesktopCommand::OpenTaskbarMenu => {
            dismiss_context_menu(state, &mut tx);
            state.taskbar_menu_open = true;
            tx.render(RenderInstruction::SetTaskbarMenuOpen(true));
        }
        DesktopCommand::TaskbarMenuAction { item } => {
            if !state.taskbar_menu_open {
                return Err(DesktopError::NotApplicable {
                    command: "taskbar menu action",
                    reason: "taskbar menu is closed",
                });
            }
            dismiss_taskbar_menu(state, &mut tx);
            match item {
                TaskbarMenuItem::TaskManager => {
                    notify(state, config, &mut tx, "Task Manager would open here");
                }
                TaskbarMenuItem::TaskbarSettings => {
                    notify(state, config, &mut tx, "Taskbar settings would open here");
                }
                TaskbarMenuItem::ShowDesktop if state.registry.is_empty() => {}
                TaskbarMenuItem::ShowDesktop => show_desktop(state, &mut tx)?,
            }
        }
        DesktopCommand::HoverTaskbarGroup { app_type } => {
            let window_id = first_group_member(state, app_type)?;
            let window = WindowSummary::from(state.registry.get(window_id)?);
            let previous = state.taskbar_preview.replace(app_type);
            if previous.is_some_and(|previous| previous != app_type) {
                tx.render(RenderInstruction::HideTaskbarPreview);
            }
            tx.defer(
                TASKBAR_PREVIEW_TASK,
                config.timings.preview_delay_ms,
                RenderInstruction::ShowTaskbarPreview { app_type, window },
            );
        }
        DesktopCommand::LeaveTaskbarGroup { app_type } => {
            if state.taskbar_preview != Some(app_type) {
                return Err(DesktopError::NotApplicable {
                    command: "leave taskbar group",
                    reason: "group has no preview",
                });
            }
            hide_taskbar_preview(state, &mut tx);
        }
        DesktopCommand::ChooseGroupWindow { window_id } => {
            state.registry.get(window_id)?;
            dismiss_group_chooser(state, &mut tx);
            activate_window(state, &mut tx, window_id)?;
        }
        DesktopCommand::CloseGroupWindow { window_id } => {
            state.registry.get(window_id)?;
            dismiss_group_chooser(state, &mut tx);
            close_window(state, config, &mut tx, window_id)?;
        }
        DesktopCommand::CycleWindows { direction } => {
            cycle_windows(state, &mut tx, direction)?;
        }
        DesktopCommand::CommitSwitcher => {
            let selected = state.switcher.commit().ok_or(DesktopError::NotApplicable {
                command: "commit switcher",
                reason: "switcher is closed",
            })?;
            tx.render(RenderInstruction::HideSwitcher);
            // The snapshot may name a window closed or minimized since it was taken.
            if state.registry.is_visible(selected) {
                focus_window(state, &mut tx, selected);
            }
        }
        DesktopCommand::CancelSwitcher => {
            if !state.switcher.cancel() {
                return Err(DesktopError::NotApplicable {
                    command: "cancel switcher",
                    reason: "switcher is closed",
                });
            }
            tx.render(RenderInstruction::HideSwitcher);
        }
        DesktopCommand::Escape => escape(state, &mut tx)?,
        DesktopCommand::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
            tx.render(RenderInstruction::SetStartMenuOpen(state.start_menu_open));
        }
        DesktopCommand::CloseStartMenu => {
            if !state.start_menu_open {
                return Err(DesktopError::NotApplicable {
                    command: "close start menu",
                    reason: "start menu is closed",
                });
            }
            close_start_menu(state, &mut tx);
        }
        DesktopCommand::ShowTaskView => {
            if state.registry.is_empty() {
                notify(state, config, &mut tx, "No open windows");
            } else {
                state.task_view_open = true;
                tx.render(RenderInstruction::ShowTaskView(state.all_summaries()));
            }
        }
        DesktopCommand::CloseTaskView => {
            if !state.task_view_open {
                return Err(DesktopError::NotApplicable {
                    command: "close task view",
                    reason: "task view is closed",
                });
            }
            close_task_view(state, &mut tx);
        }
        DesktopCommand::ChooseTaskViewWindow { window_id } => {
            state.registry.get(window_id)?;
            if state.task_view_open {
                close_task_view(state, &mut tx);
            }
            activate_window(state, &mut tx, window_id)?;
        }
        DesktopCommand::CloseTaskViewWindow { window_id } => {
            close_window(state, config, &mut tx, window_id)?;
        }
        DesktopCommand::ExecuteSearch { query } => {
            let Some(file_type) = templates.search(&query).into_iter().next() else {
                return Err(DesktopError::NotApplicable {
                    command: "execute search",
                    reason: "no matching file",
                });
            };
            open_file(state, config, templates, &mut tx, &file_type)?;
        }
        DesktopCommand::ToggleMusic => {
            state.music_playing = !state.music_playing;
            tx.push(RuntimeEffect::SetMusicPlaying(state.music_playing));
            tx.push(RuntimeEffect::PlaySound(if state.music_playing {
                SoundKind::Play
            } else {
                SoundKind::Stop
            }));
        }
        DesktopCommand::SetVolume { percent } => {
            state.volume = percent.min(100);
            tx.push(RuntimeEffect::SetVolume(state.volume));
        }
        DesktopCommand::ShowNotificationCenter => {
            notify(state, config, &mut tx, "Notification Center opened");
        }
        DesktopCommand::ToggleHiddenIcons => {
            notify(state, config, &mut tx, "Hidden icons toggled");
        }
        DesktopCommand::ShowCalendar { today } => {
            let today = today.trim();
            if today.is_empty() {
                return Err(DesktopError::NotApplicable {
                    command: "show calendar",
                    reason: "no date supplied",
                });
            }
            notify(state, config, &mut tx, &format!("Today: {today}"));
        }
    }

    finish_transition(state, config, &mut tx);
    Ok(tx)
}

fn open_file<T>(
    state: &mut DesktopState,
    config: &DesktopConfig,
    templates: &T,
    tx: &mut Transition,
    file_type: &str,
) -> Result<WindowId, DesktopError>
where
    T: WindowTemplateSource + ?Sized,
{
    let template = templates
        .template(file_type)
        .ok_or_else(|| DesktopError::UnknownFileType(file_type.to_string()))?;
    let window_id = WindowId(state.next_window_id);
    if state.registry.contains(window_id) {
        return Err(DesktopError::DuplicateWindow(window_id));
    }
    let bounds = config.cascade_rect(state.registry.len(), template.width, template.height);
    let window = Window::new(
        window_id,
        template.title,
        template.file_type,
        template.content_id,
        bounds,
    );

    state.next_window_id = state.next_window_id.saturating_add(1);
    state.registry.add(window.clone())?;
    let z_index = state
        .focus
        .set_active(&state.registry, window_id)
        .unwrap_or_default();
    state.taskbar.on_window_opened(&window);

    tx.render(RenderInstruction::CreateWindow(WindowView {
        id: window_id,
        title: window.title.clone(),
        icon: window.app_type.icon().to_string(),
        content_id: window.content_id.clone(),
        bounds,
        z_index,
    }));
    tx.render(RenderInstruction::SetActiveWindow(Some(window_id)));
    tx.defer(
        settle_task(window_id),
        config.timings.open_settle_ms,
        RenderInstruction::WindowOpened(window_id),
    );
    tx.push(RuntimeEffect::PlaySound(SoundKind::Open));
    if state.start_menu_open {
        close_start_menu(state, tx);
    }
    Ok(window_id)
}

fn close_window(
    state: &mut DesktopState,
    config: &DesktopConfig,
    tx: &mut Transition,
    window_id: WindowId,
) -> Result<(), DesktopError> {
    state.registry.get(window_id)?;

    let app_type = state.taskbar.on_window_closed(window_id);
    state.registry.remove(window_id)?;
    let previous = state.focus.active();
    if state.focus.forget(window_id) {
        state.focus.rederive_active(&state.registry);
    }
    render_focus_change(state, tx, previous);

    tx.render(RenderInstruction::WindowClosing(window_id));
    tx.cancel(settle_task(window_id));
    tx.defer(
        destroy_task(window_id),
        config.timings.close_ms,
        RenderInstruction::DestroyWindow(window_id),
    );
    tx.push(RuntimeEffect::PlaySound(SoundKind::Close));

    refresh_window_lists(state, tx);
    if app_type.is_some() && state.taskbar_preview == app_type {
        hide_taskbar_preview(state, tx);
    }
    if let Some(app_type) = state.context_menu {
        if state.taskbar.group(app_type).is_none() {
            dismiss_context_menu(state, tx);
        }
    }
    Ok(())
}

fn minimize_window(
    state: &mut DesktopState,
    tx: &mut Transition,
    window_id: WindowId,
) -> Result<(), DesktopError> {
    let window = state.registry.get_mut(window_id)?;
    if window.is_minimized() {
        return Err(DesktopError::NotApplicable {
            command: "minimize window",
            reason: "window is already minimized",
        });
    }
    window.visibility = Visibility::Minimized;
    tx.render(RenderInstruction::SetWindowVisible {
        window_id,
        visible: false,
    });

    let previous = state.focus.active();
    state.focus.remove_active(&state.registry, window_id);
    render_focus_change(state, tx, previous);
    state
        .taskbar
        .on_visibility_changed(&state.registry, state.focus.active(), window_id);
    tx.push(RuntimeEffect::PlaySound(SoundKind::Minimize));
    refresh_window_lists(state, tx);
    Ok(())
}

/// Restores `window_id` when minimized, then focuses it.
fn activate_window(
    state: &mut DesktopState,
    tx: &mut Transition,
    window_id: WindowId,
) -> Result<(), DesktopError> {
    let window = state.registry.get_mut(window_id)?;
    let restored = window.is_minimized();
    if restored {
        window.visibility = Visibility::Visible;
        tx.render(RenderInstruction::SetWindowVisible {
            window_id,
            visible: true,
        });
    }
    focus_window(state, tx, window_id);
    state
        .taskbar
        .on_visibility_changed(&state.registry, state.focus.active(), window_id);
    if restored {
        refresh_window_lists(state, tx);
    }
    Ok(())
}

fn focus_window(state: &mut DesktopState, tx: &mut Transition, window_id: WindowId) {
    if let Some(z_index) = state.focus.set_active(&state.registry, window_id) {
        tx.render(RenderInstruction::SetZIndex { window_id, z_index });
        tx.render(RenderInstruction::SetActiveWindow(Some(window_id)));
    }
}

/// Emits raise/activation instructions when the active window differs from `previous`.
fn render_focus_change(state: &DesktopState, tx: &mut Transition, previous: Option<WindowId>) {
    let active = state.focus.active();
    if active == previous {
        return;
    }
    if let Some(window_id) = active {
        if let Some(z_index) = state.focus.z_index(window_id) {
            tx.render(RenderInstruction::SetZIndex { window_id, z_index });
        }
    }
    tx.render(RenderInstruction::SetActiveWindow(active));
}

fn show_desktop(state: &mut DesktopState, tx: &mut Transition) -> Result<(), DesktopError> {
    if state.registry.is_empty() {
        return Err(DesktopError::NotApplicable {
            command: "show desktop",
            reason: "no open windows",
        });
    }

    let previous = state.focus.active();
    let visible: Vec<WindowId> = state.registry.visible().map(|w| w.id).collect();
    if visible.is_empty() {
        let minimized: Vec<WindowId> = state.registry.all().iter().map(|w| w.id).collect();
        set_visibility(state, tx, &minimized, Visibility::Visible)?;
        state.focus.rederive_active(&state.registry);
    } else {
        // Focus order is kept; the next restore re-activates the same window.
        set_visibility(state, tx, &visible, Visibility::Minimized)?;
        state.focus.clear_active();
        tx.push(RuntimeEffect::PlaySound(SoundKind::Minimize));
    }
    render_focus_change(state, tx, previous);
    refresh_window_lists(state, tx);
    Ok(())
}

fn set_visibility(
    state: &mut DesktopState,
    tx: &mut Transition,
    window_ids: &[WindowId],
    visibility: Visibility,
) -> Result<(), DesktopError> {
    for window_id in window_ids.iter().copied() {
        state.registry.get_mut(window_id)?.visibility = visibility;
        tx.render(RenderInstruction::SetWindowVisible {
            window_id,
            visible: visibility == Visibility::Visible,
        });
    }
    Ok(())
}

fn cycle_windows(
    state: &mut DesktopState,
    tx: &mut Transition,
    direction: CycleDirection,
) -> Result<(), DesktopError> {
    let registry = &state.registry;
    let focus = &state.focus;
    let transition = state.switcher.cycle(direction, || {
        focus
            .most_recent_first()
            .filter(|id| registry.is_visible(*id))
            .collect()
    })?;

    let Some(switcher) = state.switcher.state() else {
        return Ok(());
    };
    match transition {
        SwitcherTransition::Opened => {
            if state.start_menu_open {
                state.start_menu_open = false;
                tx.render(RenderInstruction::SetStartMenuOpen(false));
            }
            tx.render(RenderInstruction::ShowSwitcher {
                entries: state.summaries(switcher.candidate_ids()),
                selected_index: switcher.selected_index(),
            });
        }
        SwitcherTransition::Moved => {
            tx.render(RenderInstruction::SelectSwitcherEntry(
                switcher.selected_index(),
            ));
        }
    }
    let selected = switcher.selected();
    if state.registry.contains(selected) {
        tx.render(RenderInstruction::PreviewWindow(selected));
    }
    Ok(())
}

fn escape(state: &mut DesktopState, tx: &mut Transition) -> Result<(), DesktopError> {
    if state.switcher.cancel() {
        tx.render(RenderInstruction::HideSwitcher);
    } else if state.start_menu_open {
        close_start_menu(state, tx);
    } else if state.task_view_open {
        close_task_view(state, tx);
    } else if state.has_taskbar_popup() {
        dismiss_group_chooser(state, tx);
        dismiss_context_menu(state, tx);
        dismiss_taskbar_menu(state, tx);
    } else {
        return Err(DesktopError::NotApplicable {
            command: "escape",
            reason: "nothing to dismiss",
        });
    }
    Ok(())
}

fn first_group_member(state: &DesktopState, app_type: AppType) -> Result<WindowId, DesktopError> {
    state
        .taskbar
        .group(app_type)
        .and_then(|group| group.first_member())
        .ok_or(DesktopError::GroupNotFound(app_type))
}

fn close_start_menu(state: &mut DesktopState, tx: &mut Transition) {
    state.start_menu_open = false;
    tx.render(RenderInstruction::SetStartMenuOpen(false));
}

fn close_task_view(state: &mut DesktopState, tx: &mut Transition) {
    state.task_view_open = false;
    tx.render(RenderInstruction::HideTaskView);
}

fn dismiss_group_chooser(state: &mut DesktopState, tx: &mut Transition) {
    if state.group_chooser.take().is_some() {
        tx.render(RenderInstruction::HideGroupChooser);
    }
}

fn dismiss_context_menu(state: &mut DesktopState, tx: &mut Transition) {
    if state.context_menu.take().is_some() {
        tx.render(RenderInstruction::HideTaskbarContextMenu);
    }
}

fn dismiss_taskbar_menu(state: &mut DesktopState, tx: &mut Transition) {
    if state.taskbar_menu_open {
        state.taskbar_menu_open = false;
        tx.render(RenderInstruction::SetTaskbarMenuOpen(false));
    }
}

fn hide_taskbar_preview(state: &mut DesktopState, tx: &mut Transition) {
    if state.taskbar_preview.take().is_some() {
        tx.cancel(TASKBAR_PREVIEW_TASK);
        tx.render(RenderInstruction::HideTaskbarPreview);
    }
}

/// Re-lists the task view and group chooser after windows closed or changed visibility.
fn refresh_window_lists(state: &mut DesktopState, tx: &mut Transition) {
    if state.task_view_open {
        if state.registry.is_empty() {
            close_task_view(state, tx);
        } else {
            tx.render(RenderInstruction::ShowTaskView(state.all_summaries()));
        }
    }
    let Some(app_type) = state.group_chooser else {
        return;
    };
    let members = state
        .taskbar
        .group(app_type)
        .filter(|group| group.is_grouped())
        .map(|group| group.member_window_ids.clone());
    match members {
        Some(members) => tx.render(RenderInstruction::ShowGroupChooser {
            app_type,
            windows: state.summaries(&members),
        }),
        None => dismiss_group_chooser(state, tx),
    }
}

fn notify(state: &mut DesktopState, config: &DesktopConfig, tx: &mut Transition, message: &str) {
    let id = state.next_notification_id;
    state.next_notification_id += 1;
    tx.render(RenderInstruction::ShowNotification {
        id,
        message: message.to_string(),
    });
    tx.defer(
        format!("notification:{id}"),
        config.timings.notification_ms,
        RenderInstruction::DismissNotification(id),
    );
}

/// Re-syncs the taskbar and arms the sound indicator after every successful step.
fn finish_transition(state: &mut DesktopState, config: &DesktopConfig, tx: &mut Transition) {
    state.taskbar.refresh(&state.registry, state.focus.active());
    let entries = state.taskbar.entries();
    if entries != state.rendered_taskbar {
        tx.render(RenderInstruction::SetTaskbar(entries.clone()));
        state.rendered_taskbar = entries;
    }

    let played_sound = tx
        .effects
        .iter()
        .any(|effect| matches!(effect, RuntimeEffect::PlaySound(_)));
    if played_sound {
        tx.defer(
            SOUND_INDICATOR_TASK,
            config.timings.sound_indicator_ms,
            RenderInstruction::ClearSoundIndicator,
        );
    }
}

fn settle_task(window_id: WindowId) -> String {
    format!("settle:{window_id}")
}

fn destroy_task(window_id: WindowId) -> String {
    format!("destroy:{window_id}")
}
