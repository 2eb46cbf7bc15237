//! # Import Flow
//!
//! Importing happens in two phases:
//!
//! 1. **Acquire** (async): take the gate, wait on the picker, resolve roles
//!    and read the selected files. The document is not borrowed, so the
//!    editor stays usable while a picker is open, even one that never
//!    settles.
//! 2. **Apply** (sync): merge markup and stylesheet, then patch content
//!    from the update records. No suspension points, so nothing can observe
//!    a half-applied batch.
//!
//! Dropping a [`PendingImport`], or the acquire future itself, releases the
//! gate.

use crate::acquisition::{FileHandle, FilePicker};
use crate::error::ImportError;
use crate::gate::{ImportGate, ImportPermit};
use crate::host::DocumentHost;
use crate::merger::merge;
use crate::options::ImportOptions;
use crate::patcher::apply_updates;
use crate::report::{ImportFailure, ImportReport};
use crate::roles::{resolve_roles, DroppedFile};
use crate::updates::{parse_updates, UpdateRecord};
use tracing::{debug, info, instrument, warn};

/// Text of one selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub text: String,
}

/// Everything read for one import, ready to apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub markup: Option<LoadedFile>,
    pub stylesheet: Option<LoadedFile>,

    /// Name of the update file the records came from
    pub updates_file: Option<String>,
    pub updates: Vec<UpdateRecord>,
}

impl ImportBatch {
    pub fn is_empty(&self) -> bool {
        self.markup.is_none() && self.stylesheet.is_none() && self.updates.is_empty()
    }
}

/// Entry point for every import path of one editor
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
    gate: ImportGate,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            gate: ImportGate::new(),
        }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// True while an acquired batch has not been applied or dropped
    pub fn is_pending(&self) -> bool {
        self.gate.is_busy()
    }

    /// Ask the picker for files and read them
    #[instrument(skip_all)]
    pub async fn acquire_files<P>(&self, picker: &P) -> Result<PendingImport, ImportError>
    where
        P: FilePicker + ?Sized,
    {
        let permit = self.gate.try_acquire()?;
        let filter = self.options.filter();

        debug!(filter = %filter, multiple = self.options.multiple, "Waiting for file selection");
        let files = picker.select_files(&filter, self.options.multiple).await;

        Ok(load(files, permit).await)
    }

    /// Ask the picker for a folder and read every file with an import role
    #[instrument(skip_all)]
    pub async fn acquire_folder<P>(&self, picker: &P) -> Result<PendingImport, ImportError>
    where
        P: FilePicker + ?Sized,
    {
        let permit = self.gate.try_acquire()?;

        debug!("Waiting for folder selection");
        let files = picker.select_folder().await;

        Ok(load(files, permit).await)
    }

    /// Replace the document with markup typed into the code viewer
    ///
    /// Existing rules are cleared first unless the options say otherwise.
    /// `<style>` blocks in the markup become the new rules.
    pub fn import_code<H>(&self, host: &mut H, code: &str) -> Result<(), ImportError>
    where
        H: DocumentHost + ?Sized,
    {
        let _permit = self.gate.try_acquire()?;

        if self.options.clear_styles_on_code_import {
            host.clear_rules();
        }
        host.set_components(code.trim());

        info!(bytes = code.len(), "Imported code");
        Ok(())
    }
}

/// Files acquired and read, holding the gate until applied or dropped
#[derive(Debug)]
pub struct PendingImport {
    batch: ImportBatch,
    dropped: Vec<DroppedFile>,
    ignored: Vec<String>,
    failures: Vec<ImportFailure>,
    permit: ImportPermit,
}

impl PendingImport {
    pub fn batch(&self) -> &ImportBatch {
        &self.batch
    }

    pub fn dropped(&self) -> &[DroppedFile] {
        &self.dropped
    }

    pub fn failures(&self) -> &[ImportFailure] {
        &self.failures
    }

    /// True when the picker was cancelled or nothing usable was selected
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Apply to the document: markup, then stylesheet, then updates
    pub fn apply<H>(self, host: &mut H) -> ImportReport
    where
        H: DocumentHost + ?Sized,
    {
        let PendingImport {
            batch,
            dropped,
            ignored,
            mut failures,
            permit,
        } = self;

        let merged = merge(
            host,
            batch.markup.as_ref().map(|file| file.text.as_str()),
            batch.stylesheet.as_ref().map(|file| file.text.as_str()),
        );

        let mut stylesheet = batch.stylesheet.map(|file| file.name);
        if let Some(error) = merged.stylesheet_error {
            failures.push(ImportFailure {
                file: stylesheet.take(),
                error: ImportError::Stylesheet(error),
            });
        }

        let patched = apply_updates(host, &batch.updates);
        drop(permit);

        let report = ImportReport {
            markup: batch.markup.map(|file| file.name),
            stylesheet,
            updates: batch.updates_file,
            rules_added: merged.rules_added,
            updates_applied: patched.applied,
            nodes_updated: patched.nodes_updated,
            unmatched: patched.unmatched,
            dropped,
            ignored,
            failures,
        };

        info!(
            markup = report.markup.is_some(),
            rules = report.rules_added,
            updates = report.updates_applied,
            unmatched = report.unmatched.len(),
            failures = report.failures.len(),
            "Import applied"
        );
        report
    }
}

async fn load(files: Vec<FileHandle>, permit: ImportPermit) -> PendingImport {
    if files.is_empty() {
        debug!("Selection was empty or cancelled");
    }

    let selection = resolve_roles(files);
    let mut failures = Vec::new();

    let markup = read(selection.markup, &mut failures).await;
    let stylesheet = read(selection.stylesheet, &mut failures).await;

    let mut updates = Vec::new();
    let mut updates_file = None;
    if let Some(file) = read(selection.updates, &mut failures).await {
        match parse_updates(&file.text) {
            Ok(records) => {
                debug!(file = %file.name, records = records.len(), "Parsed structured updates");
                updates = records;
                updates_file = Some(file.name);
            }
            Err(error) => {
                warn!(file = %file.name, error = %error, "Skipping malformed structured update file");
                failures.push(ImportFailure {
                    file: Some(file.name),
                    error,
                });
            }
        }
    }

    PendingImport {
        batch: ImportBatch {
            markup,
            stylesheet,
            updates_file,
            updates,
        },
        dropped: selection.dropped,
        ignored: selection.ignored,
        failures,
        permit,
    }
}

async fn read(file: Option<FileHandle>, failures: &mut Vec<ImportFailure>) -> Option<LoadedFile> {
    let file = file?;
    match file.text().await {
        Ok(text) => Some(LoadedFile {
            name: file.name().to_string(),
            text,
        }),
        Err(source) => {
            warn!(file = %file.name(), error = %source, "Failed to read selected file");
            failures.push(ImportFailure {
                file: Some(file.name().to_string()),
                error: ImportError::Read {
                    name: file.name().to_string(),
                    source,
                },
            });
            None
        }
    }
}
