//! Plugin setup: commands and the editor theme

use crate::commands::{CanvasClearCommand, OpenImportCommand, CANVAS_CLEAR, OPEN_IMPORT};
use crate::config::ThemeColors;
use crate::editor::Editor;
use crate::errors::EditorError;
use tracing::{debug, info};

/// Register the import and canvas commands and inject the theme
///
/// Safe to call more than once; the theme is added a single time per editor.
pub fn init(editor: &mut Editor) -> Result<(), EditorError> {
    editor.commands.add(OPEN_IMPORT, Box::new(OpenImportCommand));
    editor.commands.add(CANVAS_CLEAR, Box::new(CanvasClearCommand));

    if editor.ctx.options.use_custom_theme {
        inject_theme(editor)?;
    }

    info!(commands = ?editor.commands.names(), "Plugin initialized");
    Ok(())
}

fn inject_theme(editor: &mut Editor) -> Result<(), EditorError> {
    if editor.ctx.theme_injected {
        debug!("Theme already injected");
        return Ok(());
    }

    let css = theme_css(&editor.ctx.options.style_prefix, &editor.ctx.options.theme);
    let added = editor.ctx.ui_styles.add_rules(&css)?;
    editor.ctx.theme_injected = true;

    debug!(rules = added, "Injected theme");
    Ok(())
}

/// Background, color and hover-color rules for each theme color
pub fn theme_css(prefix: &str, theme: &ThemeColors) -> String {
    let mut css = String::new();
    for (ordinal, color) in theme.ordinals() {
        css.push_str(&format!(
            ".{prefix}{ordinal}-bg {{ background-color: {color}; }}\n\
             .{prefix}{ordinal}-color {{ color: {color}; }}\n\
             .{prefix}{ordinal}-color-h:hover {{ color: {color}; }}\n"
        ));
    }
    css
}
