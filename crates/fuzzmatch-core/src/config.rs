//! Configuration types for fuzzmatch.
//!
//! [`Config::load`] reads `~/.config/fuzzmatch/config.toml`, creating it with
//! the built-in defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! The `[search]` defaults reproduce the engine's fixed behaviour; the
//! `[screens]` table maps each admin list screen to the fields and relations
//! its search box covers.

use crate::composer::SearchScope;
use crate::expander::MAX_VARIANTS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
max_variants  = 8
fuzzy_min_len = 3

[screens.ads]
fields    = ["title", "description", "location"]
relations = [
    { name = "user",     fields = ["name", "email"] },
    { name = "category", fields = ["name", "name_ar"] },
]

[screens.users]
fields    = ["name", "email", "phone"]
relations = []

[screens.banners]
fields    = ["title", "link"]
relations = [{ name = "category", fields = ["name", "name_ar"] }]

[screens.categories]
fields    = ["name", "name_ar", "slug"]
relations = [{ name = "parent", fields = ["name", "name_ar"] }]

[screens.subscriptions]
fields    = ["status"]
relations = [
    { name = "user", fields = ["name", "email"] },
    { name = "plan", fields = ["name"] },
]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/fuzzmatch/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub screens: BTreeMap<String, SearchScope>,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_variants")]
    pub max_variants: usize,
    #[serde(default = "default_fuzzy_min_len")]
    pub fuzzy_min_len: usize,
}

fn default_max_variants() -> usize { MAX_VARIANTS }
fn default_fuzzy_min_len() -> usize { crate::composer::FUZZY_MIN_LEN }

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_variants: default_max_variants(),
            fuzzy_min_len: default_fuzzy_min_len(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/fuzzmatch/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer an explicit file over the built-in defaults. A missing file is an
    /// error here, unlike [`Config::load`].
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Search scope of a named admin screen.
    pub fn screen(&self, name: &str) -> Option<&SearchScope> {
        self.screens.get(name)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("fuzzmatch")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
