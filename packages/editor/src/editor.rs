//! # Editor
//!
//! One editor instance: the document, its UI host and the command registry.
//!
//! File imports run in two steps so a pending picker never holds the
//! editor:
//!
//! ```rust,ignore
//! if let Some(request) = editor.trigger(ImportAction::Files)? {
//!     let pending = request.acquire(&picker).await?;  // editor is free here
//!     let report = editor.finish_import(pending)?;    // applies, closes the modal
//! }
//! ```

use crate::commands::{CommandRegistry, OPEN_IMPORT};
use crate::config::PluginOptions;
use crate::errors::EditorError;
use crate::modal::{CodeViewer, ImportAction, MemoryCodeViewer, MemoryModal, Modal};
use blockkit_document::{Document, ParseError, Stylesheet};
use blockkit_import::{ComponentRef, DocumentHost, FilePicker, ImportReport, Importer, PendingImport};
use tracing::{debug, info};

/// State every command can reach
pub struct EditorContext {
    pub document: Document,

    /// Rules for the editor's own UI, kept apart from the document
    pub ui_styles: Stylesheet,

    pub modal: Box<dyn Modal>,
    pub code_viewer: Box<dyn CodeViewer>,
    pub options: PluginOptions,

    pub(crate) theme_injected: bool,
}

pub struct Editor {
    pub(crate) ctx: EditorContext,
    pub(crate) commands: CommandRegistry,
    importer: Importer,
}

impl Editor {
    /// Headless editor with in-memory modal and code viewer
    pub fn new(options: PluginOptions) -> Self {
        let viewer = MemoryCodeViewer::new(options.import_viewer_options.clone());
        Self::with_host(options, Box::new(MemoryModal::new()), Box::new(viewer))
    }

    pub fn with_host(
        options: PluginOptions,
        modal: Box<dyn Modal>,
        code_viewer: Box<dyn CodeViewer>,
    ) -> Self {
        let importer = Importer::new(options.import.clone());
        Self {
            ctx: EditorContext {
                document: Document::new(),
                ui_styles: Stylesheet::new(),
                modal,
                code_viewer,
                options,
                theme_injected: false,
            },
            commands: CommandRegistry::new(),
            importer,
        }
    }

    pub fn document(&self) -> &Document {
        &self.ctx.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.ctx.document
    }

    pub fn options(&self) -> &PluginOptions {
        &self.ctx.options
    }

    pub fn ui_styles(&self) -> &Stylesheet {
        &self.ctx.ui_styles
    }

    pub fn modal(&self) -> &dyn Modal {
        self.ctx.modal.as_ref()
    }

    pub fn code_viewer(&self) -> &dyn CodeViewer {
        self.ctx.code_viewer.as_ref()
    }

    pub fn code_viewer_mut(&mut self) -> &mut dyn CodeViewer {
        self.ctx.code_viewer.as_mut()
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    /// Handle on this editor's import flow; clones share one gate
    pub fn importer(&self) -> Importer {
        self.importer.clone()
    }

    /// Replace the document with one parsed from `markup`
    pub fn load_html(&mut self, markup: &str) {
        self.ctx.document = Document::from_html(markup);
        debug!(nodes = self.ctx.document.node_count(), "Loaded document");
    }

    pub fn run_command(&mut self, name: &str) -> Result<(), EditorError> {
        self.commands.run(name, &mut self.ctx)
    }

    pub fn stop_command(&mut self, name: &str) -> Result<(), EditorError> {
        self.commands.stop(name, &mut self.ctx)
    }

    /// Close the import modal, stopping its command if it is active
    pub fn close_modal(&mut self) -> Result<(), EditorError> {
        if self.commands.is_active(OPEN_IMPORT) {
            self.stop_command(OPEN_IMPORT)
        } else {
            self.ctx.modal.close();
            Ok(())
        }
    }

    /// Import whatever is in the code viewer, then close the modal
    pub fn import_code(&mut self) -> Result<(), EditorError> {
        let code = self.ctx.code_viewer.content();
        self.importer.import_code(&mut self.ctx.document, &code)?;
        self.close_modal()
    }

    /// Apply an acquired batch, then close the modal
    pub fn finish_import(&mut self, pending: PendingImport) -> Result<ImportReport, EditorError> {
        let report = pending.apply(&mut self.ctx.document);
        self.close_modal()?;
        Ok(report)
    }

    /// What a press on one of the import modal's buttons does
    ///
    /// A code import applies at once and yields `None`. File and folder
    /// presses yield a request that holds only the importer, so the editor
    /// stays usable while the picker is open.
    pub fn trigger(&mut self, action: ImportAction) -> Result<Option<ImportRequest>, EditorError> {
        info!(action = ?action, "Import action");
        match action {
            ImportAction::Code => self.import_code().map(|()| None),
            ImportAction::Files | ImportAction::Folder => Ok(Some(ImportRequest {
                importer: self.importer(),
                action,
            })),
        }
    }
}

/// A file or folder import waiting on the picker
#[derive(Debug, Clone)]
pub struct ImportRequest {
    importer: Importer,
    action: ImportAction,
}

impl ImportRequest {
    pub fn action(&self) -> ImportAction {
        self.action
    }

    /// Run the picker and read the selection; apply the result with
    /// [`Editor::finish_import`]
    pub async fn acquire<P>(self, picker: &P) -> Result<PendingImport, EditorError>
    where
        P: FilePicker + ?Sized,
    {
        let pending = match self.action {
            ImportAction::Folder => self.importer.acquire_folder(picker).await?,
            _ => self.importer.acquire_files(picker).await?,
        };
        Ok(pending)
    }
}

impl DocumentHost for Editor {
    fn set_components(&mut self, markup: &str) {
        self.ctx.document.set_components(markup);
    }

    fn add_rules(&mut self, css: &str) -> Result<usize, ParseError> {
        self.ctx.document.add_rules(css)
    }

    fn clear_rules(&mut self) {
        self.ctx.document.clear_rules();
    }

    fn visit_identifier(
        &mut self,
        identifier: &str,
        visit: &mut dyn FnMut(ComponentRef<'_>),
    ) -> usize {
        DocumentHost::visit_identifier(&mut self.ctx.document, identifier, visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CanvasClearCommand, OpenImportCommand, CANVAS_CLEAR};

    fn editor() -> Editor {
        let mut editor = Editor::new(PluginOptions::default());
        editor
            .commands_mut()
            .add(OPEN_IMPORT, Box::new(OpenImportCommand));
        editor
            .commands_mut()
            .add(CANVAS_CLEAR, Box::new(CanvasClearCommand));
        editor
    }

    #[test]
    fn test_unknown_command() {
        let mut editor = editor();
        assert!(matches!(
            editor.run_command("nope"),
            Err(EditorError::UnknownCommand(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_open_import_is_stateful() {
        let mut editor = editor();

        editor.run_command(OPEN_IMPORT).unwrap();
        assert!(editor.modal().is_open());
        assert!(editor.commands().is_active(OPEN_IMPORT));

        // Second run while open does nothing
        editor.code_viewer_mut().set_content("typed");
        editor.run_command(OPEN_IMPORT).unwrap();
        assert_eq!(editor.code_viewer().content(), "typed");

        editor.close_modal().unwrap();
        assert!(!editor.modal().is_open());
        assert!(!editor.commands().is_active(OPEN_IMPORT));
    }

    #[test]
    fn test_open_import_reopens_after_host_closed_modal() {
        let mut editor = editor();
        editor.run_command(OPEN_IMPORT).unwrap();

        // The host dismisses the dialog itself, bypassing the command
        editor.ctx.modal.close();
        assert!(editor.commands().is_active(OPEN_IMPORT));

        editor.code_viewer_mut().set_content("stale");
        editor.run_command(OPEN_IMPORT).unwrap();

        assert!(editor.modal().is_open());
        assert!(editor.commands().is_active(OPEN_IMPORT));
        assert_eq!(editor.code_viewer().content(), "");
    }

    #[test]
    fn test_import_code_replaces_document_and_closes() {
        let mut editor = editor();
        editor.load_html("<p>old</p>");
        editor.document_mut().add_rules("p{color:red}").unwrap();

        editor.run_command(OPEN_IMPORT).unwrap();
        editor.code_viewer_mut().set_content("  <h1>new</h1>  ");
        editor.import_code().unwrap();

        assert_eq!(editor.document().to_html(), "<h1>new</h1>");
        assert!(editor.document().stylesheet.is_empty());
        assert!(!editor.modal().is_open());
    }

    #[test]
    fn test_editor_is_a_document_host() {
        let mut editor = editor();
        editor.load_html(r#"<p id="a">x</p>"#);

        let matched = DocumentHost::visit_identifier(&mut editor, "a", &mut |mut c: ComponentRef<'_>| {
            c.set_content("y")
        });

        assert_eq!(matched, 1);
        assert_eq!(editor.document().to_html(), r#"<p id="a">y</p>"#);
    }
}
