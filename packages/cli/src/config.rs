use anyhow::{Context, Result};
use folio_compiler_html::{CompileOptions, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing content .json files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory rendered .html files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Pretty print HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,

    /// Emit bare fragments without the root container
    #[serde(default)]
    pub fragment: bool,

    /// Render posts whose status is still `draft`
    #[serde(default)]
    pub drafts: bool,

    /// Class overrides; unset fields keep the built-in theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

fn default_src_dir() -> String {
    "content".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl Config {
    /// Read `folio.config.json` from `cwd`. A missing file yields the defaults.
    pub fn load(cwd: &str) -> Result<Self> {
        let path = Self::path(cwd);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("invalid {}", DEFAULT_CONFIG_NAME))?;
        tracing::debug!(
            path = %path.display(),
            themed = config.theme.is_some(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Write this config as `folio.config.json` in `cwd`.
    pub fn save(&self, cwd: &str) -> Result<PathBuf> {
        let path = Self::path(cwd);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn path(cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME)
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            wrap_root: !self.fragment,
            theme: self.theme.clone().unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            pretty: default_pretty(),
            indent: default_indent(),
            fragment: false,
            drafts: false,
            theme: None,
        }
    }
}
