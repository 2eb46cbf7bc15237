//! # Role Resolver
//!
//! Classifies acquired files purely by extension and keeps the first file of
//! each role. Every later file of a role that is already filled is dropped
//! and reported.

use crate::acquisition::FileHandle;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileRole {
    /// `.html`
    Markup,
    /// `.css`
    Stylesheet,
    /// `.json`
    StructuredUpdate,
}

impl FileRole {
    /// Role for a file extension (without the dot, any case)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "html" => Some(FileRole::Markup),
            "css" => Some(FileRole::Stylesheet),
            "json" => Some(FileRole::StructuredUpdate),
            _ => None,
        }
    }

    pub fn of(file: &FileHandle) -> Option<Self> {
        file.extension().as_deref().and_then(Self::from_extension)
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileRole::Markup => "markup",
            FileRole::Stylesheet => "stylesheet",
            FileRole::StructuredUpdate => "structured-update",
        })
    }
}

/// A file left out because an earlier file already filled its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedFile {
    pub name: String,
    pub role: FileRole,
    /// Name of the file that was kept for this role
    pub kept: String,
}

/// The files chosen for one import batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSelection {
    pub markup: Option<FileHandle>,
    pub stylesheet: Option<FileHandle>,
    pub updates: Option<FileHandle>,
    pub dropped: Vec<DroppedFile>,
    /// Files with no role
    pub ignored: Vec<String>,
}

impl RoleSelection {
    pub fn is_empty(&self) -> bool {
        self.markup.is_none() && self.stylesheet.is_none() && self.updates.is_none()
    }

    fn slot(&mut self, role: FileRole) -> &mut Option<FileHandle> {
        match role {
            FileRole::Markup => &mut self.markup,
            FileRole::Stylesheet => &mut self.stylesheet,
            FileRole::StructuredUpdate => &mut self.updates,
        }
    }
}

/// Keep the first file of each role, in acquisition order
pub fn resolve_roles<I>(files: I) -> RoleSelection
where
    I: IntoIterator<Item = FileHandle>,
{
    let mut selection = RoleSelection::default();

    for file in files {
        let Some(role) = FileRole::of(&file) else {
            debug!(file = %file.name(), "Ignoring file without an import role");
            selection.ignored.push(file.name().to_string());
            continue;
        };

        let kept = selection.slot(role).as_ref().map(|kept| kept.name().to_string());
        match kept {
            Some(kept) => {
                let dropped = DroppedFile {
                    name: file.name().to_string(),
                    role,
                    kept,
                };
                warn!(
                    file = %dropped.name,
                    role = %role,
                    kept = %dropped.kept,
                    "Dropping file: only the first file of each role is imported"
                );
                selection.dropped.push(dropped);
            }
            None => {
                debug!(file = %file.name(), role = %role, "Selected file for role");
                *selection.slot(role) = Some(file);
            }
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str) -> FileHandle {
        FileHandle::from_text(name, "")
    }

    #[test]
    fn test_role_from_extension() {
        assert_eq!(FileRole::from_extension("html"), Some(FileRole::Markup));
        assert_eq!(FileRole::from_extension("CSS"), Some(FileRole::Stylesheet));
        assert_eq!(FileRole::from_extension("json"), Some(FileRole::StructuredUpdate));
        assert_eq!(FileRole::from_extension("htm"), None);
        assert_eq!(FileRole::from_extension("js"), None);
    }

    #[test]
    fn test_first_file_of_each_role_wins() {
        let selection = resolve_roles(vec![
            handle("b.css"),
            handle("a.html"),
            handle("logo.png"),
            handle("c.html"),
            handle("content.json"),
            handle("d.css"),
        ]);

        assert_eq!(selection.markup.as_ref().map(|f| f.name()), Some("a.html"));
        assert_eq!(selection.stylesheet.as_ref().map(|f| f.name()), Some("b.css"));
        assert_eq!(selection.updates.as_ref().map(|f| f.name()), Some("content.json"));
        assert_eq!(selection.ignored, vec!["logo.png".to_string()]);
        assert_eq!(
            selection.dropped,
            vec![
                DroppedFile {
                    name: "c.html".to_string(),
                    role: FileRole::Markup,
                    kept: "a.html".to_string(),
                },
                DroppedFile {
                    name: "d.css".to_string(),
                    role: FileRole::Stylesheet,
                    kept: "b.css".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_empty_selection() {
        let selection = resolve_roles(Vec::new());
        assert!(selection.is_empty());
        assert!(selection.dropped.is_empty());
    }
}
