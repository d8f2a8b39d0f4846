//! Run configuration shared by the extractor and the reporter

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local parts containing any of these never reach the address book
pub const DEFAULT_FILTERS: [&str; 9] = [
    "do-not-reply",
    "donotreply",
    "no-reply",
    "bounce",
    "noreply",
    "no.reply",
    "no_reply",
    "nevalaszolj",
    "nincsvalasz",
];

/// One address book line: the address, a tab, then the display name
pub const DEFAULT_TEMPLATE: &str = "{address}\t{name}";

/// Name of the cache document inside `cache_dir`
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Name of the address book inside `cache_dir`
pub const OUTPUT_FILE_NAME: &str = "addresses.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maildir roots to scan
    pub maildirs: Vec<PathBuf>,
    /// Directory holding the cache and, by default, the address book
    pub cache_dir: PathBuf,
    /// Address book location, overriding `cache_dir/addresses.txt`
    pub output_file: Option<PathBuf>,
    /// Substrings that filter an address by its local part
    pub filters: Vec<String>,
    /// Regular expressions that filter an address as a whole
    pub custom_filters: Vec<String>,
    /// Address book line with `{address}` and `{name}` placeholders
    pub template: String,
    /// Weight of the frequency rank in the blended score (0.0 to 1.0)
    pub frequency_weight: f64,
    /// Directory the statistics charts are written to
    pub report_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maildirs: vec![PathBuf::from(shellexpand::tilde("~/.mail").into_owned())],
            cache_dir: PathBuf::from("addressbook"),
            output_file: None,
            filters: DEFAULT_FILTERS.iter().map(ToString::to_string).collect(),
            custom_filters: Vec::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            frequency_weight: 0.5,
            report_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used when present and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document; missing keys take their default values
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        Ok(config.expand_paths())
    }

    /// `<config dir>/maildir-rank-addr/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("maildir-rank-addr/config.toml"))
    }

    /// Expand a leading `~` in every configured path
    #[must_use]
    pub fn expand_paths(mut self) -> Self {
        self.maildirs = self.maildirs.iter().map(|p| expand(p)).collect();
        self.cache_dir = expand(&self.cache_dir);
        self.output_file = self.output_file.as_deref().map(expand);
        self.report_dir = expand(&self.report_dir);
        self
    }

    /// Check the values a run depends on
    pub fn validate(&self) -> Result<()> {
        if self.maildirs.is_empty() {
            return Err(Error::Config("no maildir configured".into()));
        }
        if !(0.0..=1.0).contains(&self.frequency_weight) {
            return Err(Error::Config(format!(
                "frequency_weight must be between 0 and 1, got {}",
                self.frequency_weight
            )));
        }
        if !self.template.contains("{address}") {
            return Err(Error::Config(format!(
                "template must contain {{address}}, got {:?}",
                self.template
            )));
        }
        self.compiled_filters().map(|_| ())
    }

    /// Compile `custom_filters`
    pub fn compiled_filters(&self) -> Result<Vec<Regex>> {
        self.custom_filters
            .iter()
            .map(|f| {
                Regex::new(f).map_err(|e| Error::Config(format!("invalid filter {f:?}: {e}")))
            })
            .collect()
    }

    #[must_use]
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| self.cache_dir.join(OUTPUT_FILE_NAME))
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
