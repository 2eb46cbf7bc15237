use crate::error::ImportError;
use crate::roles::DroppedFile;

/// A file whose contribution was skipped
#[derive(Debug)]
pub struct ImportFailure {
    pub file: Option<String>,
    pub error: ImportError,
}

/// What one import batch did to the document
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Name of the markup file that replaced the body
    pub markup: Option<String>,

    /// Name of the stylesheet file whose rules were appended
    pub stylesheet: Option<String>,

    /// Name of the structured update file that was applied
    pub updates: Option<String>,

    pub rules_added: usize,

    /// Update records that matched at least one node
    pub updates_applied: usize,

    /// Nodes whose content was written (one record can match several)
    pub nodes_updated: usize,

    /// Identifiers that matched nothing
    pub unmatched: Vec<String>,

    /// Files left out by the first-of-role policy
    pub dropped: Vec<DroppedFile>,

    /// Files with no import role
    pub ignored: Vec<String>,

    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    /// True when nothing reached the document
    pub fn is_noop(&self) -> bool {
        self.markup.is_none() && self.rules_added == 0 && self.nodes_updated == 0
    }

    /// True when something was dropped, unmatched or failed
    pub fn has_diagnostics(&self) -> bool {
        !self.unmatched.is_empty() || !self.dropped.is_empty() || !self.failures.is_empty()
    }
}
