//! Plugin options
//!
//! Every field has a default, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "stylePrefix": "gjs-",
//!   "modalImportTitle": "Import",
//!   "modalImportContent": { "from": "html" },
//!   "import": { "accept": [".html", ".css", ".json"] }
//! }
//! ```

use blockkit_import::ImportOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Prefix for every class name the editor emits
    pub style_prefix: String,

    pub modal_import_title: String,

    /// Text of the code-import button
    pub modal_import_button: String,

    /// Description shown above the code viewer; hidden when empty
    pub modal_import_label: String,

    /// What the code viewer shows when the import modal opens
    pub modal_import_content: ImportContent,

    /// Passed through to the host's code viewer
    pub import_viewer_options: Map<String, Value>,

    /// Confirmation prompt before clearing the canvas
    pub text_clean_canvas: String,

    /// Inject the theme rules into the editor UI
    pub use_custom_theme: bool,

    pub theme: ThemeColors,

    pub import: ImportOptions,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            style_prefix: "gjs-".to_string(),
            modal_import_title: "Import".to_string(),
            modal_import_button: "Import".to_string(),
            modal_import_label: String::new(),
            modal_import_content: ImportContent::default(),
            import_viewer_options: Map::new(),
            text_clean_canvas: "Are you sure you want to clear the canvas?".to_string(),
            use_custom_theme: true,
            theme: ThemeColors::default(),
            import: ImportOptions::default(),
        }
    }
}

/// Initial code viewer content: fixed text, or derived from the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportContent {
    Static(String),
    FromEditor { from: EditorContent },
}

impl Default for ImportContent {
    fn default() -> Self {
        ImportContent::Static(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorContent {
    /// Current body markup
    Html,
    /// Current stylesheet in a `<style>` block, followed by the body markup
    HtmlWithStyles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub quaternary: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#463a3c".to_string(),
            secondary: "#b9a5a6".to_string(),
            tertiary: "#804f7b".to_string(),
            quaternary: "#d97aa6".to_string(),
        }
    }
}

impl ThemeColors {
    /// Colors keyed by the class-name ordinal they style
    pub fn ordinals(&self) -> [(&'static str, &str); 4] {
        [
            ("one", &self.primary),
            ("two", &self.secondary),
            ("three", &self.tertiary),
            ("four", &self.quaternary),
        ]
    }
}
