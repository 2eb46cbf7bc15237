//! Structured update files
//!
//! ```json
//! [
//!   { "componentId": "Title", "attributeID": "unused", "content": "Hello" }
//! ]
//! ```

use crate::error::ImportError;
use serde::{Deserialize, Serialize};

/// One instruction: replace the content of every node carrying `component_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    #[serde(rename = "componentId")]
    pub component_id: String,

    /// Carried through but not used for matching
    #[serde(rename = "attributeID", default, skip_serializing_if = "Option::is_none")]
    pub attribute_id: Option<String>,

    pub content: String,
}

impl UpdateRecord {
    pub fn new(component_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            attribute_id: None,
            content: content.into(),
        }
    }
}

/// Parse the text of a `.json` update file
pub fn parse_updates(text: &str) -> Result<Vec<UpdateRecord>, ImportError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_updates() {
        let records = parse_updates(
            r#"[
                {"componentId": "Title", "content": "Hello"},
                {"componentId": "Lead", "attributeID": "text", "content": "", "extra": 1}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0], UpdateRecord::new("Title", "Hello"));
        assert_eq!(records[1].attribute_id.as_deref(), Some("text"));
        assert_eq!(records[1].content, "");
    }

    #[test]
    fn test_parse_updates_rejects_malformed_json() {
        assert!(matches!(
            parse_updates(r#"[{"componentId": "Title", "content": "#),
            Err(ImportError::InvalidUpdates(_))
        ));
        assert!(matches!(
            parse_updates(r#"{"componentId": "Title", "content": "x"}"#),
            Err(ImportError::InvalidUpdates(_))
        ));
        assert!(matches!(
            parse_updates(r#"[{"content": "x"}]"#),
            Err(ImportError::InvalidUpdates(_))
        ));
    }

    #[test]
    fn test_serializes_with_original_field_names() {
        let json = serde_json::to_string(&UpdateRecord::new("A", "b")).unwrap();
        assert_eq!(json, r#"{"componentId":"A","content":"b"}"#);
    }
}
