use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Output directory for imported pages
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Blockkit project...".bright_blue().bold());

    let config = Config {
        out_dir: Some(args.out_dir.clone()),
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to adjust import options", DEFAULT_CONFIG_NAME);
    println!("  2. Run: blockkit import index.html site.css content.json");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();

        init(
            InitArgs {
                out_dir: "public".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.out_dir.as_deref(), Some("public"));
        assert_eq!(config.plugin.style_prefix, "gjs-");
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, "{}").unwrap();

        init(
            InitArgs {
                out_dir: "dist".to_string(),
                force: false,
            },
            dir.path(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
