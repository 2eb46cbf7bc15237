use blockkit_editor::PluginOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "blockkit.config.json";

/// Blockkit configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Editor and import options
    #[serde(default)]
    pub plugin: PluginOptions,

    /// Where `import` writes `index.html` and `style.css` when no explicit
    /// output is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_out_dir(&self, cwd: &Path) -> Option<PathBuf> {
        self.out_dir.as_ref().map(|dir| cwd.join(dir))
    }
}
