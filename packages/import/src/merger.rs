//! # Document Merger
//!
//! Markup **replaces** the body; stylesheet rules are **appended**.

use crate::host::DocumentHost;
use blockkit_document::ParseError;
use tracing::{debug, info, warn};

/// Result of one merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub markup_replaced: bool,
    pub rules_added: usize,

    /// Set when the stylesheet could not be parsed; its rules were skipped
    pub stylesheet_error: Option<ParseError>,
}

/// Merge markup and stylesheet text into the host document
///
/// Both inputs are trimmed before parsing. With neither present this is a
/// no-op.
pub fn merge<H: DocumentHost + ?Sized>(
    host: &mut H,
    markup: Option<&str>,
    stylesheet: Option<&str>,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    if let Some(markup) = markup {
        let markup = markup.trim();
        info!(bytes = markup.len(), "Replacing document body with imported markup");
        host.set_components(markup);
        outcome.markup_replaced = true;
    }

    if let Some(stylesheet) = stylesheet {
        match host.add_rules(stylesheet.trim()) {
            Ok(added) => {
                info!(rules = added, "Appended imported stylesheet rules");
                outcome.rules_added = added;
            }
            Err(e) => {
                warn!(error = %e, "Skipping malformed stylesheet");
                outcome.stylesheet_error = Some(e);
            }
        }
    }

    if markup.is_none() && stylesheet.is_none() {
        debug!("Nothing to merge");
    }

    outcome
}
