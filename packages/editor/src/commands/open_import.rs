use super::Command;
use crate::config::{EditorContent, ImportContent, PluginOptions};
use crate::editor::EditorContext;
use crate::errors::EditorError;
use crate::modal::{ImportAction, ModalButton, ModalContent};
use tracing::info;

/// Opens the import modal with the code viewer primed
///
/// Stays active while the modal is open; stopping it closes the modal.
#[derive(Debug, Default)]
pub struct OpenImportCommand;

impl Command for OpenImportCommand {
    fn run(&mut self, ctx: &mut EditorContext) -> Result<(), EditorError> {
        let content = initial_content(ctx);

        ctx.modal
            .open(&ctx.options.modal_import_title, import_container(&ctx.options));
        ctx.code_viewer.set_content(&content);
        ctx.code_viewer.refresh();
        ctx.code_viewer.focus();

        info!(title = %ctx.options.modal_import_title, "Opened import modal");
        Ok(())
    }

    fn stop(&mut self, ctx: &mut EditorContext) -> Result<(), EditorError> {
        ctx.modal.close();
        Ok(())
    }

    fn is_stateful(&self) -> bool {
        true
    }

    fn is_running(&self, ctx: &EditorContext) -> bool {
        ctx.modal.is_open()
    }
}

fn initial_content(ctx: &EditorContext) -> String {
    match &ctx.options.modal_import_content {
        ImportContent::Static(text) => text.clone(),
        ImportContent::FromEditor {
            from: EditorContent::Html,
        } => ctx.document.to_html(),
        ImportContent::FromEditor {
            from: EditorContent::HtmlWithStyles,
        } => {
            let css = ctx.document.to_css();
            if css.is_empty() {
                ctx.document.to_html()
            } else {
                format!("<style>{}</style>{}", css, ctx.document.to_html())
            }
        }
    }
}

/// Body of the import modal: optional label, then one button per import path
pub fn import_container(options: &PluginOptions) -> ModalContent {
    let pfx = &options.style_prefix;

    let label = if options.modal_import_label.is_empty() {
        None
    } else {
        Some((
            options.modal_import_label.clone(),
            format!("{}import-label", pfx),
        ))
    };

    let button = |label: &str, name: &str, action| ModalButton {
        label: label.to_string(),
        class_name: format!("{pfx}btn-prim {pfx}{name}"),
        action,
    };

    ModalContent {
        class_name: format!("{}import-container", pfx),
        label,
        buttons: vec![
            button(&options.modal_import_button, "btn-import", ImportAction::Code),
            button("Import HTML & CSS Files", "btn-import-files", ImportAction::Files),
            button("Import Folder", "btn-import-folder", ImportAction::Folder),
        ],
    }
}
