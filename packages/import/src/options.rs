use crate::acquisition::ExtensionFilter;
use serde::{Deserialize, Serialize};

/// Import configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Extensions offered by the file picker, with or without the leading dot
    #[serde(default = "default_accept")]
    pub accept: Vec<String>,

    /// Allow selecting more than one file
    #[serde(default = "default_true")]
    pub multiple: bool,

    /// Drop existing rules before a code-viewer import
    #[serde(default = "default_true")]
    pub clear_styles_on_code_import: bool,
}

fn default_accept() -> Vec<String> {
    vec![".html".to_string(), ".css".to_string(), ".json".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            accept: default_accept(),
            multiple: true,
            clear_styles_on_code_import: true,
        }
    }
}

impl ImportOptions {
    pub fn filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(self.accept.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::FileHandle;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: ImportOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ImportOptions::default());
        assert_eq!(options.filter().to_string(), ".html,.css,.json");
    }

    #[test]
    fn test_custom_accept_list() {
        let options: ImportOptions =
            serde_json::from_str(r#"{"accept": ["html", ".CSS"], "multiple": false}"#).unwrap();
        let filter = options.filter();

        assert!(!options.multiple);
        assert!(filter.accepts(&FileHandle::from_text("site.css", "")));
        assert!(!filter.accepts(&FileHandle::from_text("content.json", "")));
    }
}
