//! Integration tests for editor crate

use async_trait::async_trait;
use blockkit_editor::*;
use blockkit_import::{ExtensionFilter, ImportError};

struct StaticPicker(Vec<FileHandle>);

#[async_trait]
impl FilePicker for StaticPicker {
    async fn select_files(&self, _filter: &ExtensionFilter, _multiple: bool) -> Vec<FileHandle> {
        self.0.clone()
    }

    async fn select_folder(&self) -> Vec<FileHandle> {
        self.0.clone()
    }
}

struct StalledPicker;

#[async_trait]
impl FilePicker for StalledPicker {
    async fn select_files(&self, _filter: &ExtensionFilter, _multiple: bool) -> Vec<FileHandle> {
        futures::future::pending().await
    }

    async fn select_folder(&self) -> Vec<FileHandle> {
        futures::future::pending().await
    }
}

fn editor_with(options: PluginOptions) -> anyhow::Result<Editor> {
    let mut editor = Editor::new(options);
    plugin::init(&mut editor)?;
    Ok(editor)
}

#[test]
fn test_open_import_primes_code_viewer() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions {
        modal_import_title: "Bring content in".to_string(),
        modal_import_content: ImportContent::Static("<!-- paste here -->".to_string()),
        ..PluginOptions::default()
    })?;

    editor.run_command(OPEN_IMPORT)?;

    assert!(editor.modal().is_open());
    assert_eq!(editor.modal().title(), Some("Bring content in"));
    assert_eq!(editor.code_viewer().content(), "<!-- paste here -->");
    Ok(())
}

#[test]
fn test_open_import_with_editor_content() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions {
        modal_import_content: ImportContent::FromEditor {
            from: EditorContent::HtmlWithStyles,
        },
        ..PluginOptions::default()
    })?;
    editor.load_html(r#"<h1 id="Title">Hi</h1>"#);
    editor.document_mut().add_rules("h1 { color: red; }")?;

    editor.run_command(OPEN_IMPORT)?;

    assert_eq!(
        editor.code_viewer().content(),
        r#"<style>h1{color:red;}</style><h1 id="Title">Hi</h1>"#
    );

    // Round trip through the code import keeps the page intact
    editor.import_code()?;
    assert_eq!(editor.document().to_html(), r#"<h1 id="Title">Hi</h1>"#);
    assert_eq!(editor.document().to_css(), "h1{color:red;}");
    Ok(())
}

#[tokio::test]
async fn test_file_import_closes_modal() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions::default())?;
    editor.load_html(r#"<h1 id="Title">Old</h1>"#);
    editor.run_command(OPEN_IMPORT)?;

    let picker = StaticPicker(vec![
        FileHandle::from_text("site.css", "h1 { margin: 0; }"),
        FileHandle::from_text("content.json", r#"[{"componentId":"Title","content":"Hello"}]"#),
    ]);
    let request = editor.trigger(ImportAction::Files)?.expect("files wait on the picker");
    let report = editor.finish_import(request.acquire(&picker).await?)?;

    assert_eq!(report.nodes_updated, 1);
    assert_eq!(editor.document().to_html(), r#"<h1 id="Title">Hello</h1>"#);
    assert_eq!(editor.document().to_css(), "h1{margin:0;}");
    assert!(!editor.modal().is_open());
    assert!(!editor.commands().is_active(OPEN_IMPORT));
    Ok(())
}

#[tokio::test]
async fn test_modal_buttons_trigger_imports() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions::default())?;
    editor.run_command(OPEN_IMPORT)?;
    editor.code_viewer_mut().set_content("<p>typed</p>");

    assert!(editor.trigger(ImportAction::Code)?.is_none());
    assert_eq!(editor.document().to_html(), "<p>typed</p>");
    assert!(!editor.modal().is_open());

    editor.run_command(OPEN_IMPORT)?;
    let request = editor.trigger(ImportAction::Folder)?.expect("folder waits on the picker");
    assert_eq!(request.action(), ImportAction::Folder);

    let picker = StaticPicker(vec![FileHandle::from_text("index.html", "<p>from folder</p>")]);
    let report = editor.finish_import(request.acquire(&picker).await?)?;

    assert_eq!(report.markup.as_deref(), Some("index.html"));
    assert_eq!(editor.document().to_html(), "<p>from folder</p>");
    Ok(())
}

#[tokio::test]
async fn test_stalled_picker_leaves_editor_usable() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions::default())?;
    editor.load_html(r#"<p id="lead">x</p>"#);
    editor.run_command(OPEN_IMPORT)?;

    let request = editor.trigger(ImportAction::Files)?.expect("files wait on the picker");
    let mut stalled = Box::pin(request.acquire(&StalledPicker));
    assert!(futures::poll!(stalled.as_mut()).is_pending());

    // The user closes the dialog and keeps working
    editor.close_modal()?;
    editor.run_command(CANVAS_CLEAR)?;
    assert!(editor.document().body.is_empty());

    // No second import while the first is pending
    assert!(matches!(
        editor.import_code(),
        Err(EditorError::Import(ImportError::ImportInProgress))
    ));

    drop(stalled);
    editor.code_viewer_mut().set_content("<p>after</p>");
    editor.import_code()?;
    assert_eq!(editor.document().to_html(), "<p>after</p>");
    Ok(())
}

#[tokio::test]
async fn test_late_import_applies_after_modal_closed() -> anyhow::Result<()> {
    let mut editor = editor_with(PluginOptions::default())?;
    editor.run_command(OPEN_IMPORT)?;

    let importer = editor.importer();
    let pending = importer
        .acquire_files(&StaticPicker(vec![FileHandle::from_text("a.html", "<p>late</p>")]))
        .await?;

    editor.close_modal()?;
    let report = editor.finish_import(pending)?;

    assert_eq!(report.markup.as_deref(), Some("a.html"));
    assert_eq!(editor.document().to_html(), "<p>late</p>");
    assert!(!editor.modal().is_open());
    Ok(())
}

#[test]
fn test_canvas_clear_requires_confirmation() -> anyhow::Result<()> {
    let options = PluginOptions {
        text_clean_canvas: "Wipe it?".to_string(),
        ..PluginOptions::default()
    };

    let mut declined = Editor::with_host(
        options.clone(),
        Box::new(MemoryModal::new().with_confirm(false)),
        Box::new(MemoryCodeViewer::default()),
    );
    plugin::init(&mut declined)?;
    declined.load_html("<p>keep</p>");
    declined.run_command(CANVAS_CLEAR)?;
    assert_eq!(declined.document().to_html(), "<p>keep</p>");

    let mut accepted = editor_with(options)?;
    accepted.load_html("<p>gone</p>");
    accepted.document_mut().add_rules("p{a:b}")?;
    accepted.run_command(CANVAS_CLEAR)?;
    assert!(accepted.document().body.is_empty());
    assert!(accepted.document().stylesheet.is_empty());
    Ok(())
}
