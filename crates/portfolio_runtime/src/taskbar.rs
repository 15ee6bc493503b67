//! Taskbar grouping of open windows by derived [`AppType`].
//!
//! One group exists per app type with at least one open window. Groups keep the order in which
//! their first member opened, members keep append order, and the group title is the first
//! member's title for the group's whole lifetime.

use serde::{Deserialize, Serialize};

use crate::{
    error::DesktopError,
    model::{AppType, Window, WindowId},
    window_registry::WindowRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarGroup {
    pub app_type: AppType,
    pub member_window_ids: Vec<WindowId>,
    pub display_title: String,
    /// Every member is minimized.
    pub minimized: bool,
    /// Some member is both active and visible.
    pub active: bool,
}

impl TaskbarGroup {
    pub fn is_grouped(&self) -> bool {
        self.member_window_ids.len() > 1
    }

    /// Title with a count badge once the group holds more than one window.
    pub fn label(&self) -> String {
        if self.is_grouped() {
            format!("{} ({})", self.display_title, self.member_window_ids.len())
        } else {
            self.display_title.clone()
        }
    }

    pub fn first_member(&self) -> Option<WindowId> {
        self.member_window_ids.first().copied()
    }

    fn refresh_flags(&mut self, registry: &WindowRegistry, active: Option<WindowId>) {
        self.minimized = self.member_window_ids.iter().all(|id| {
            registry
                .get(*id)
                .map(Window::is_minimized)
                .unwrap_or(true)
        });
        self.active = active
            .map(|active| self.member_window_ids.contains(&active) && registry.is_visible(active))
            .unwrap_or(false);
    }
}

/// Render-ready taskbar button state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarEntry {
    pub app_type: AppType,
    pub icon: String,
    pub label: String,
    pub window_count: usize,
    pub grouped: bool,
    pub minimized: bool,
    pub active: bool,
}

impl From<&TaskbarGroup> for TaskbarEntry {
    fn from(group: &TaskbarGroup) -> Self {
        Self {
            app_type: group.app_type,
            icon: group.app_type.icon().to_string(),
            label: group.label(),
            window_count: group.member_window_ids.len(),
            grouped: group.is_grouped(),
            minimized: group.minimized,
            active: group.active,
        }
    }
}

/// What a click on a taskbar group should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupClickAction {
    /// Single minimized member: show and focus it.
    Restore(WindowId),
    /// Single member that is active and visible: minimize it.
    Minimize(WindowId),
    /// Single visible but inactive member: focus it.
    Focus(WindowId),
    /// Several members: the UI must let the user pick one.
    ChooseWindow(Vec<WindowId>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskbarGrouper {
    groups: Vec<TaskbarGroup>,
}

impl TaskbarGrouper {
    /// Adds `window` to the group for its app type, creating the group when needed.
    pub fn on_window_opened(&mut self, window: &Window) -> AppType {
        let app_type = AppType::from_title(&window.title);
        match self.groups.iter_mut().find(|g| g.app_type == app_type) {
            Some(group) => group.member_window_ids.push(window.id),
            None => self.groups.push(TaskbarGroup {
                app_type,
                member_window_ids: vec![window.id],
                display_title: window.title.clone(),
                minimized: false,
                active: false,
            }),
        }
        app_type
    }

    /// Removes `id` from its group and deletes the group once it is empty.
    ///
    /// Returns the app type of the group the window belonged to.
    pub fn on_window_closed(&mut self, id: WindowId) -> Option<AppType> {
        let index = self
            .groups
            .iter()
            .position(|g| g.member_window_ids.contains(&id))?;
        let group = &mut self.groups[index];
        let app_type = group.app_type;
        group.member_window_ids.retain(|member| *member != id);
        if group.member_window_ids.is_empty() {
            self.groups.remove(index);
        }
        Some(app_type)
    }

    /// Recomputes the minimized/active flags of the group holding `id`.
    pub fn on_visibility_changed(
        &mut self,
        registry: &WindowRegistry,
        active: Option<WindowId>,
        id: WindowId,
    ) {
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|g| g.member_window_ids.contains(&id))
        {
            group.refresh_flags(registry, active);
        }
    }

    /// Recomputes flags for every group and drops members the registry no longer knows.
    pub fn refresh(&mut self, registry: &WindowRegistry, active: Option<WindowId>) {
        for group in &mut self.groups {
            group
                .member_window_ids
                .retain(|id| registry.contains(*id));
            group.refresh_flags(registry, active);
        }
        self.groups.retain(|g| !g.member_window_ids.is_empty());
    }

    /// Decides what clicking the group for `app_type` does.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::GroupNotFound`] when no window of that type is open.
    pub fn group_click_action(
        &self,
        app_type: AppType,
        registry: &WindowRegistry,
        active: Option<WindowId>,
    ) -> Result<GroupClickAction, DesktopError> {
        let group = self
            .group(app_type)
            .ok_or(DesktopError::GroupNotFound(app_type))?;
        if group.is_grouped() {
            return Ok(GroupClickAction::ChooseWindow(
                group.member_window_ids.clone(),
            ));
        }
        let id = group
            .first_member()
            .ok_or(DesktopError::GroupNotFound(app_type))?;
        let window = registry.get(id)?;
        Ok(if window.is_minimized() {
            GroupClickAction::Restore(id)
        } else if active == Some(id) {
            GroupClickAction::Minimize(id)
        } else {
            GroupClickAction::Focus(id)
        })
    }

    pub fn group(&self, app_type: AppType) -> Option<&TaskbarGroup> {
        self.groups.iter().find(|g| g.app_type == app_type)
    }

    pub fn groups(&self) -> &[TaskbarGroup] {
        &self.groups
    }

    pub fn entries(&self) -> Vec<TaskbarEntry> {
        self.groups.iter().map(TaskbarEntry::from).collect()
    }
}
