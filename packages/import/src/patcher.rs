//! # Identifier-based Patcher
//!
//! Writes update content into every node whose identifier matches. Text and
//! element nodes go through the same path: the node's content field.
//! Rendered markup is always derived from it.

use crate::host::{ComponentRef, DocumentHost};
use crate::updates::UpdateRecord;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Records that matched at least one node
    pub applied: usize,

    /// Total nodes written
    pub nodes_updated: usize,

    /// Identifiers of records that matched nothing, in input order
    pub unmatched: Vec<String>,
}

/// Apply structured updates to the host document
///
/// Identifiers match exactly and case-sensitively. A record with no match
/// is logged and skipped; the rest of the batch still applies.
pub fn apply_updates<H: DocumentHost + ?Sized>(host: &mut H, updates: &[UpdateRecord]) -> PatchOutcome {
    let mut outcome = PatchOutcome::default();

    for update in updates {
        let matched = host.visit_identifier(
            &update.component_id,
            &mut |mut component: ComponentRef<'_>| {
                debug!(
                    component_id = %update.component_id,
                    kind = ?component.kind(),
                    "Updating component content"
                );
                component.set_content(update.content.as_str());
            },
        );

        match matched {
            0 => {
                warn!(component_id = %update.component_id, "No component matches update identifier");
                outcome.unmatched.push(update.component_id.clone());
            }
            count => {
                if count > 1 {
                    debug!(component_id = %update.component_id, count, "Update matched several components");
                }
                outcome.applied += 1;
                outcome.nodes_updated += count;
            }
        }
    }

    outcome
}
