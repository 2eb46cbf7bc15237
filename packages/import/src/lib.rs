//! # Blockkit Import
//!
//! Content import and synchronization for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ acquisition: picker → FileHandle list       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ roles: .html / .css / .json, first wins     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌──────────────────────┐ ┌────────────────────┐
//! │ merger               │ │ patcher            │
//! │  markup  → replace   │ │  componentId →     │
//! │  css     → append    │ │  content in place  │
//! └──────────────────────┘ └────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ DocumentHost (the editor's document tree)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockkit_import::{Importer, ImportOptions};
//!
//! let importer = Importer::new(ImportOptions::default());
//!
//! // Picker and file reads run without touching the document
//! let pending = importer.acquire_files(&picker).await?;
//!
//! // Apply in one synchronous step
//! let report = pending.apply(&mut document);
//! ```

mod acquisition;
mod error;
mod flow;
mod gate;
mod host;
mod merger;
mod options;
mod patcher;
mod report;
mod roles;
mod updates;

pub use acquisition::{ExtensionFilter, FileHandle, FilePicker, PathPicker};
pub use error::ImportError;
pub use flow::{ImportBatch, Importer, LoadedFile, PendingImport};
pub use gate::{ImportGate, ImportPermit};
pub use host::{ComponentRef, DocumentHost};
pub use merger::{merge, MergeOutcome};
pub use options::ImportOptions;
pub use patcher::{apply_updates, PatchOutcome};
pub use report::{ImportFailure, ImportReport};
pub use roles::{resolve_roles, DroppedFile, FileRole, RoleSelection};
pub use updates::{parse_updates, UpdateRecord};
