use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: i32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 500;

/// Opaque window identifier. Ids come from a monotonic counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Application type used for taskbar grouping and iconography.
///
/// Declaration order matters: [`AppType::from_title`] tests the variants in this order and the
/// first substring hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    About,
    Resume,
    Projects,
    Skills,
    Contact,
    Social,
    Unknown,
}

impl AppType {
    const TITLE_RULES: [(&'static str, AppType); 6] = [
        ("About", AppType::About),
        ("Resume", AppType::Resume),
        ("Projects", AppType::Projects),
        ("Skills", AppType::Skills),
        ("Contact", AppType::Contact),
        ("Social", AppType::Social),
    ];

    /// Derives the app type from a window title by case-sensitive substring match.
    pub fn from_title(title: &str) -> Self {
        Self::TITLE_RULES
            .iter()
            .find(|(needle, _)| title.contains(needle))
            .map(|(_, app_type)| *app_type)
            .unwrap_or(Self::Unknown)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::About => "\u{1F464}",
            Self::Resume => "\u{1F4C4}",
            Self::Projects => "\u{1F4C1}",
            Self::Skills => "\u{2699}\u{FE0F}",
            Self::Contact => "\u{1F4E7}",
            Self::Social => "\u{1F310}",
            Self::Unknown => "\u{1F4CB}",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Resume => "resume",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
            Self::Social => "social",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Visible,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 100,
            y: 50,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// One open application instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    pub app_type: AppType,
    pub file_type: String,
    pub content_id: String,
    pub visibility: Visibility,
    pub maximized: bool,
    pub bounds: WindowRect,
    pub saved_bounds: Option<WindowRect>,
}

impl Window {
    pub fn new(
        id: WindowId,
        title: impl Into<String>,
        file_type: impl Into<String>,
        content_id: impl Into<String>,
        bounds: WindowRect,
    ) -> Self {
        let title = title.into();
        Self {
            id,
            app_type: AppType::from_title(&title),
            title,
            file_type: file_type.into(),
            content_id: content_id.into(),
            visibility: Visibility::Visible,
            maximized: false,
            bounds,
            saved_bounds: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_minimized(&self) -> bool {
        self.visibility == Visibility::Minimized
    }
}
