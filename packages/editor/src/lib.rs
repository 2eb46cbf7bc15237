//! # Blockkit Editor
//!
//! Editor shell around the document: plugin options, the import modal, and
//! named commands.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ plugin::init: commands + theme (once)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor + CommandRegistry            │
//! │  - open-import  → Modal + CodeViewer        │
//! │  - canvas-clear → confirm, then clear       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ import: acquire → apply on the Document     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockkit_editor::{plugin, Editor, ImportAction, PluginOptions, OPEN_IMPORT};
//!
//! let mut editor = Editor::new(PluginOptions::default());
//! plugin::init(&mut editor)?;
//!
//! editor.run_command(OPEN_IMPORT)?;
//! if let Some(request) = editor.trigger(ImportAction::Files)? {
//!     let pending = request.acquire(&picker).await?;
//!     let report = editor.finish_import(pending)?;
//! }
//! ```

mod commands;
mod config;
mod editor;
mod errors;
mod modal;
pub mod plugin;

pub use commands::{
    import_container, CanvasClearCommand, Command, CommandRegistry, OpenImportCommand,
    CANVAS_CLEAR, OPEN_IMPORT,
};
pub use config::{EditorContent, ImportContent, PluginOptions, ThemeColors};
pub use editor::{Editor, EditorContext, ImportRequest};
pub use errors::EditorError;
pub use modal::{
    CodeViewer, ImportAction, MemoryCodeViewer, MemoryModal, Modal, ModalButton, ModalContent,
};

// Re-export the import types hosts need alongside the editor
pub use blockkit_import::{FileHandle, FilePicker, ImportOptions, ImportReport, PathPicker};
