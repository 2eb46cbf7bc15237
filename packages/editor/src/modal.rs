//! # Modal / Viewer Host
//!
//! The editor drives a modal dialog and a code viewer it does not own. Hosts
//! implement [`Modal`] and [`CodeViewer`] over their UI; the in-memory
//! versions here back headless use and tests.

use serde::Serialize;
use serde_json::{Map, Value};

/// What a modal button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportAction {
    /// Replace the document with the code viewer's content
    Code,
    /// Pick markup, stylesheet and update files
    Files,
    /// Pick a folder
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalButton {
    pub label: String,
    pub class_name: String,
    pub action: ImportAction,
}

/// Body of the import modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalContent {
    pub class_name: String,

    /// Description above the viewer, with its class name
    pub label: Option<(String, String)>,

    pub buttons: Vec<ModalButton>,
}

pub trait Modal {
    fn open(&mut self, title: &str, content: ModalContent);

    fn close(&mut self);

    fn is_open(&self) -> bool;

    fn title(&self) -> Option<&str>;

    /// Ask the user to confirm `message`
    fn confirm(&mut self, message: &str) -> bool;
}

pub trait CodeViewer {
    fn set_content(&mut self, content: &str);

    fn content(&self) -> String;

    fn refresh(&mut self);

    fn focus(&mut self);
}

/// Modal that only records its state
#[derive(Debug, Clone)]
pub struct MemoryModal {
    title: Option<String>,
    content: Option<ModalContent>,
    confirm_answer: bool,
    prompts: Vec<String>,
}

impl Default for MemoryModal {
    fn default() -> Self {
        Self {
            title: None,
            content: None,
            confirm_answer: true,
            prompts: Vec::new(),
        }
    }
}

impl MemoryModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every confirmation with `answer`
    pub fn with_confirm(mut self, answer: bool) -> Self {
        self.confirm_answer = answer;
        self
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Confirmation messages shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Modal for MemoryModal {
    fn open(&mut self, title: &str, content: ModalContent) {
        self.title = Some(title.to_string());
        self.content = Some(content);
    }

    fn close(&mut self) {
        self.title = None;
        self.content = None;
    }

    fn is_open(&self) -> bool {
        self.content.is_some()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirm_answer
    }
}

/// Code viewer backed by a string
#[derive(Debug, Clone, Default)]
pub struct MemoryCodeViewer {
    content: String,
    options: Map<String, Value>,
    refreshes: usize,
    focused: bool,
}

impl MemoryCodeViewer {
    pub fn new(options: Map<String, Value>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl CodeViewer for MemoryCodeViewer {
    fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
