//! Static window templates for the desktop's openable files.
//!
//! Content bodies live with the presentation layer; a template only carries the `content_id`
//! it should render.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTemplate {
    pub file_type: String,
    pub title: String,
    pub content_id: String,
    pub width: i32,
    pub height: i32,
}

/// Source of window templates and search entries, injected into the controller.
pub trait WindowTemplateSource {
    /// Returns the template for `file_type`, or `None` when the type is unrecognized.
    fn template(&self, file_type: &str) -> Option<WindowTemplate>;

    /// Returns file types whose search label matches `query`, in catalog order.
    fn search(&self, query: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CatalogEntry {
    file_type: &'static str,
    search_label: &'static str,
    title: &'static str,
    width: i32,
    height: i32,
}

const BUILTIN_CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        file_type: "about",
        search_label: "About Me",
        title: "About Me.txt",
        width: 600,
        height: 500,
    },
    CatalogEntry {
        file_type: "resume",
        search_label: "Resume",
        title: "Resume.pdf",
        width: 700,
        height: 600,
    },
    CatalogEntry {
        file_type: "projects",
        search_label: "Projects",
        title: "Projects",
        width: 800,
        height: 600,
    },
    CatalogEntry {
        file_type: "skills",
        search_label: "Skills",
        title: "Skills.exe",
        width: 700,
        height: 500,
    },
    CatalogEntry {
        file_type: "contact",
        search_label: "Contact",
        title: "Contact.txt",
        width: 500,
        height: 400,
    },
    CatalogEntry {
        file_type: "social",
        search_label: "Social",
        title: "Social Links",
        width: 600,
        height: 500,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// The six portfolio files shown on the desktop and in the start menu.
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn file_types(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN_CATALOG.iter().map(|entry| entry.file_type)
    }
}

impl WindowTemplateSource for BuiltinTemplates {
    fn template(&self, file_type: &str) -> Option<WindowTemplate> {
        BUILTIN_CATALOG
            .iter()
            .find(|entry| entry.file_type == file_type)
            .map(|entry| WindowTemplate {
                file_type: entry.file_type.to_string(),
                title: entry.title.to_string(),
                content_id: entry.file_type.to_string(),
                width: entry.width,
                height: entry.height,
            })
    }

    fn search(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        BUILTIN_CATALOG
            .iter()
            .filter(|entry| entry.search_label.to_lowercase().contains(&query))
            .map(|entry| entry.file_type.to_string())
            .collect()
    }
}
