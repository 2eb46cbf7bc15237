//! # File Acquisition
//!
//! Pickers resolve to a list of file handles. They never fail: a cancelled
//! dialog resolves to an empty list. Some environments never report a
//! cancellation at all, so callers must not hold the document while a
//! picker is pending.

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileSource {
    Path(PathBuf),
    Memory(String),
}

/// A selected file. Content is read lazily with [`FileHandle::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    source: FileSource,
}

impl FileHandle {
    /// Handle for a file on disk, named after its file name
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// Handle for text the host already holds in memory
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(text.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }

    /// Read the full content as UTF-8 text
    pub async fn text(&self) -> std::io::Result<String> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read_to_string(path).await,
            FileSource::Memory(text) => Ok(text.clone()),
        }
    }
}

/// Extensions a file dialog accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Build from entries like `".html"` or `"css"`
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    /// Filter accepting every file
    pub fn any() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    pub fn accepts(&self, file: &FileHandle) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        file.extension()
            .map(|ext| self.extensions.iter().any(|accepted| *accepted == ext))
            .unwrap_or(false)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new([".html", ".css", ".json"])
    }
}

/// Renders in the `accept` attribute form, e.g. `.html,.css`
impl fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.extensions.iter().map(|ext| format!(".{}", ext)).collect();
        f.write_str(&rendered.join(","))
    }
}

/// Source of user-selected files
///
/// Implementations resolve with an empty list when the user cancels and
/// must never return an error.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Let the user pick one or more files matching `filter`
    async fn select_files(&self, filter: &ExtensionFilter, multiple: bool) -> Vec<FileHandle>;

    /// Let the user pick a folder; resolves to every file inside it
    async fn select_folder(&self) -> Vec<FileHandle>;
}

/// Picker over paths chosen ahead of time (command line, tests)
#[derive(Debug, Clone, Default)]
pub struct PathPicker {
    files: Vec<PathBuf>,
    folder: Option<PathBuf>,
}

impl PathPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn select_files(&self, filter: &ExtensionFilter, multiple: bool) -> Vec<FileHandle> {
        let mut selected: Vec<FileHandle> = self
            .files
            .iter()
            .map(FileHandle::from_path)
            .filter(|file| {
                let accepted = filter.accepts(file);
                if !accepted {
                    debug!(file = %file.name(), filter = %filter, "File rejected by filter");
                }
                accepted
            })
            .collect();

        if !multiple {
            selected.truncate(1);
        }
        selected
    }

    async fn select_folder(&self) -> Vec<FileHandle> {
        let Some(folder) = self.folder.clone() else {
            return Vec::new();
        };

        match tokio::task::spawn_blocking(move || walk_folder(&folder)).await {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "Folder walk did not complete");
                Vec::new()
            }
        }
    }
}

/// Every file below `folder` in sorted order, named by relative path
fn walk_folder(folder: &Path) -> Vec<FileHandle> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable folder entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(folder)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push(FileHandle::from_path(entry.path()).with_name(relative));
    }

    debug!(folder = %folder.display(), files = files.len(), "Walked import folder");
    files
}
