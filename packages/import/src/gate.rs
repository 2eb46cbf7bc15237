//! One import at a time per editor

use crate::error::ImportError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Serializes imports. Clones share the same flag.
#[derive(Clone, Default, Debug)]
pub struct ImportGate {
    busy: Arc<AtomicBool>,
}

impl ImportGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, failing with [`ImportError::ImportInProgress`] if an
    /// import already holds it
    pub fn try_acquire(&self) -> Result<ImportPermit, ImportError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::ImportInProgress)?;
        debug!("Import gate acquired");
        Ok(ImportPermit {
            busy: self.busy.clone(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the lifetime of one import; releases the gate on drop
#[derive(Debug)]
pub struct ImportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ImportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("Import gate released");
    }
}
