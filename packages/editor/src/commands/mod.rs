//! # Commands
//!
//! Named editor commands, dispatched through an explicit registry.
//!
//! A command may be *stateful*: once run it stays active until stopped, and
//! running it again meanwhile does nothing. The import modal is one; it is
//! active while the modal is open.

mod canvas_clear;
mod open_import;

pub use canvas_clear::CanvasClearCommand;
pub use open_import::{import_container, OpenImportCommand};

use crate::editor::EditorContext;
use crate::errors::EditorError;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

pub const OPEN_IMPORT: &str = "open-import";
pub const CANVAS_CLEAR: &str = "canvas-clear";

pub trait Command: fmt::Debug {
    fn run(&mut self, ctx: &mut EditorContext) -> Result<(), EditorError>;

    fn stop(&mut self, _ctx: &mut EditorContext) -> Result<(), EditorError> {
        Ok(())
    }

    /// Whether the command stays active after `run` until stopped
    fn is_stateful(&self) -> bool {
        false
    }

    /// Whether an active command's effect is still in place
    ///
    /// Returning false lets the registry drop the active flag when the host
    /// undid the effect without going through `stop`.
    fn is_running(&self, _ctx: &EditorContext) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    active: HashSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under `name`, replacing any previous one
    pub fn add(&mut self, name: impl Into<String>, command: Box<dyn Command>) {
        let name = name.into();
        debug!(command = %name, "Registering command");
        self.active.remove(&name);
        self.commands.insert(name, command);
    }

    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn run(&mut self, name: &str, ctx: &mut EditorContext) -> Result<(), EditorError> {
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_string()))?;

        if self.active.contains(name) {
            if command.is_running(ctx) {
                debug!(command = %name, "Command already active");
                return Ok(());
            }
            debug!(command = %name, "Command was ended outside the registry");
            self.active.remove(name);
        }

        debug!(command = %name, "Running command");
        command.run(ctx)?;

        if command.is_stateful() {
            self.active.insert(name.to_string());
        }
        Ok(())
    }

    /// Stop an active command; stopping an inactive one does nothing
    pub fn stop(&mut self, name: &str, ctx: &mut EditorContext) -> Result<(), EditorError> {
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_string()))?;

        if !self.active.remove(name) {
            return Ok(());
        }

        debug!(command = %name, "Stopping command");
        command.stop(ctx)
    }
}
