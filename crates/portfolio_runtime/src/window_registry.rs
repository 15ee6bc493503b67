//! Owner of the open windows and their metadata.
//!
//! Registry order is insertion order only; stacking order belongs to
//! [`crate::focus_stack::FocusStack`].

use serde::{Deserialize, Serialize};

use crate::{
    error::DesktopError,
    model::{Window, WindowId},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRegistry {
    windows: Vec<Window>,
}

impl WindowRegistry {
    /// Appends `window`.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::DuplicateWindow`] when the id is already registered.
    pub fn add(&mut self, window: Window) -> Result<(), DesktopError> {
        if self.contains(window.id) {
            return Err(DesktopError::DuplicateWindow(window.id));
        }
        self.windows.push(window);
        Ok(())
    }

    /// Removes and returns the window with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::WindowNotFound`] when no such window exists.
    pub fn remove(&mut self, id: WindowId) -> Result<Window, DesktopError> {
        let index = self
            .windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(DesktopError::WindowNotFound(id))?;
        Ok(self.windows.remove(index))
    }

    pub fn get(&self, id: WindowId) -> Result<&Window, DesktopError> {
        self.windows
            .iter()
            .find(|w| w.id == id)
            .ok_or(DesktopError::WindowNotFound(id))
    }

    pub fn get_mut(&mut self, id: WindowId) -> Result<&mut Window, DesktopError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(DesktopError::WindowNotFound(id))
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.iter().any(|w| w.id == id)
    }

    pub fn is_visible(&self, id: WindowId) -> bool {
        self.get(id).map(Window::is_visible).unwrap_or(false)
    }

    pub fn all(&self) -> &[Window] {
        &self.windows
    }

    pub fn visible(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(|w| w.is_visible())
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Visibility, WindowRect};

    fn window(id: u64, title: &str) -> Window {
        Window::new(WindowId(id), title, "about", "about", WindowRect::default())
    }

    #[test]
    fn add_preserves_insertion_order_and_rejects_duplicates() {
        let mut registry = WindowRegistry::default();
        registry.add(window(1, "About Me.txt")).unwrap();
        registry.add(window(2, "Resume.pdf")).unwrap();

        assert_eq!(
            registry.add(window(1, "Again")),
            Err(DesktopError::DuplicateWindow(WindowId(1)))
        );
        let ids: Vec<_> = registry.all().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![WindowId(1), WindowId(2)]);
    }

    #[test]
    fn remove_returns_window_or_not_found() {
        let mut registry = WindowRegistry::default();
        registry.add(window(1, "About Me.txt")).unwrap();

        assert_eq!(registry.remove(WindowId(1)).unwrap().title, "About Me.txt");
        assert_eq!(
            registry.remove(WindowId(1)),
            Err(DesktopError::WindowNotFound(WindowId(1)))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn visible_skips_minimized_windows() {
        let mut registry = WindowRegistry::default();
        registry.add(window(1, "About Me.txt")).unwrap();
        registry.add(window(2, "Resume.pdf")).unwrap();
        registry.get_mut(WindowId(1)).unwrap().visibility = Visibility::Minimized;

        let visible: Vec<_> = registry.visible().map(|w| w.id).collect();
        assert_eq!(visible, vec![WindowId(2)]);
        assert!(!registry.is_visible(WindowId(1)));
        assert!(!registry.is_visible(WindowId(9)));
    }
}
