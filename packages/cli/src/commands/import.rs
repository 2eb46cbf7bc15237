use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use blockkit_editor::{plugin, Editor, ImportAction, ImportReport, PathPicker, OPEN_IMPORT};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Files to import (.html, .css, .json); the first of each kind is used
    pub files: Vec<PathBuf>,

    /// Import every file in a folder instead
    #[arg(short, long, conflicts_with = "files")]
    pub folder: Option<PathBuf>,

    /// Existing page to import into
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Write the resulting markup here
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write the resulting stylesheet here
    #[arg(long)]
    pub css_out: Option<PathBuf>,
}

pub async fn import(args: ImportArgs, cwd: &Path) -> Result<()> {
    if args.files.is_empty() && args.folder.is_none() {
        return Err(anyhow!("Nothing to import: pass files or --folder"));
    }

    let config = Config::load(cwd)?;
    let mut editor = Editor::new(config.plugin.clone());
    plugin::init(&mut editor)?;

    if let Some(base) = &args.base {
        let markup = fs::read_to_string(base)
            .with_context(|| format!("Failed to read base page {}", base.display()))?;
        editor.load_html(&markup);
        debug!(base = %base.display(), "Loaded base page");
    }

    eprintln!("{}", "📥 Importing...".bright_blue().bold());

    editor.run_command(OPEN_IMPORT)?;
    let (action, picker) = match &args.folder {
        Some(folder) => {
            if !folder.is_dir() {
                return Err(anyhow!("Folder does not exist: {}", folder.display()));
            }
            (ImportAction::Folder, PathPicker::new().with_folder(folder))
        }
        None => (ImportAction::Files, PathPicker::new().with_files(&args.files)),
    };
    let request = editor
        .trigger(action)?
        .ok_or_else(|| anyhow!("{:?} import did not wait on a picker", action))?;
    let pending = request.acquire(&picker).await?;
    let report = editor.finish_import(pending)?;

    print_report(&report);

    let (html_out, css_out) = output_paths(&args, &config, cwd);
    let html = editor.document().to_html();
    let css = editor.document().to_css();

    match (&html_out, &css_out) {
        (None, None) => {
            if css.is_empty() {
                println!("{}", html);
            } else {
                println!("<style>{}</style>{}", css, html);
            }
        }
        _ => {
            write_output(html_out.as_deref(), &html)?;
            write_output(css_out.as_deref(), &css)?;
        }
    }

    Ok(())
}

fn output_paths(args: &ImportArgs, config: &Config, cwd: &Path) -> (Option<PathBuf>, Option<PathBuf>) {
    let out_dir = config.get_out_dir(cwd);
    let html = args
        .out
        .clone()
        .or_else(|| out_dir.as_ref().map(|dir| dir.join("index.html")));
    let css = args
        .css_out
        .clone()
        .or_else(|| out_dir.as_ref().map(|dir| dir.join("style.css")));
    (html, css)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("  {} Wrote {}", "✓".green(), path.display());
    Ok(())
}

fn print_report(report: &ImportReport) {
    if let Some(markup) = &report.markup {
        eprintln!("  {} {} replaced the page", "✓".green(), markup);
    }
    if let Some(stylesheet) = &report.stylesheet {
        eprintln!(
            "  {} {} added {} rules",
            "✓".green(),
            stylesheet,
            report.rules_added
        );
    }
    if let Some(updates) = &report.updates {
        eprintln!(
            "  {} {} updated {} components",
            "✓".green(),
            updates,
            report.nodes_updated
        );
    }

    for id in &report.unmatched {
        eprintln!("  {} No component with id {}", "⚠️".yellow(), id.bright_white());
    }
    for dropped in &report.dropped {
        eprintln!(
            "  {} Skipped {} ({} already taken by {})",
            "⚠️".yellow(),
            dropped.name,
            dropped.role,
            dropped.kept
        );
    }
    for name in &report.ignored {
        eprintln!("  {} Ignored {}", "-".dimmed(), name);
    }
    for failure in &report.failures {
        eprintln!(
            "  {} {} - {}",
            "✗".red(),
            failure.file.as_deref().unwrap_or("import"),
            failure.error
        );
    }

    if report.is_noop() && report.failures.is_empty() {
        eprintln!("{}", "⚠️  Nothing was imported".yellow());
    } else if report.failures.is_empty() {
        eprintln!("{}", "✅ Import complete".green().bold());
    }
}
