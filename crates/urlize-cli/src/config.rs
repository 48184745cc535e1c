//! Optional `urlize.toml` holding default linkify options.
//!
//! ```toml
//! [linkify]
//! trim_url_limit = 50
//! nofollow = true
//! autoescape = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use urlize_core::LinkifyOptions;

pub const DEFAULT_CONFIG: &str = "urlize.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub linkify: LinkifyOptions,
}

/// On-disk shape. Every key is optional so a missing one keeps its default
/// instead of turning into `false`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    linkify: LinkifySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LinkifySection {
    trim_url_limit: Option<usize>,
    nofollow: Option<bool>,
    autoescape: Option<bool>,
}

impl Default for Config {
    /// Same defaults as the log templates: escaping and nofollow on, no truncation.
    fn default() -> Self {
        Self {
            linkify: LinkifyOptions {
                trim_url_limit: None,
                nofollow: true,
                autoescape: true,
            },
        }
    }
}

impl Config {
    /// Loads `path`, or `./urlize.toml` if it exists, or the defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();
        let section = file.linkify;
        if section.trim_url_limit.is_some() {
            config.linkify.trim_url_limit = section.trim_url_limit;
        }
        if let Some(nofollow) = section.nofollow {
            config.linkify.nofollow = nofollow;
        }
        if let Some(autoescape) = section.autoescape {
            config.linkify.autoescape = autoescape;
        }
        Ok(config)
    }
}
