use super::Command;
use crate::editor::EditorContext;
use crate::errors::EditorError;
use tracing::{debug, info};

/// Empties the body and stylesheet once the user confirms
#[derive(Debug, Default)]
pub struct CanvasClearCommand;

impl Command for CanvasClearCommand {
    fn run(&mut self, ctx: &mut EditorContext) -> Result<(), EditorError> {
        if !ctx.modal.confirm(&ctx.options.text_clean_canvas) {
            debug!("Canvas clear declined");
            return Ok(());
        }

        ctx.document.clear();
        info!("Cleared canvas");
        Ok(())
    }
}
