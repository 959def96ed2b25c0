//! Book configuration
//!
//! Loaded from a `wordbook.toml` file; every table and key is optional.
//!
//! ```toml
//! [book]
//! title = "Handbook"
//! language = "en"
//!
//! [toc]
//! max_level = 2
//!
//! [assets]
//! dir = "images"
//!
//! [headings]
//! prefixes = ["标题", "Überschrift"]
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::classify::{
    ChainClassifier, OutlineLevelClassifier, StyleNameClassifier, MAX_HEADING_LEVEL,
};
use crate::error::{BookError, Result};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "wordbook.toml";
/// Book title used when neither settings nor the document provide one
pub const DEFAULT_TITLE: &str = "文档标题";
/// Book description used when neither settings nor the document provide one
pub const DEFAULT_DESCRIPTION: &str = "文档描述";
/// Default book language
pub const DEFAULT_LANGUAGE: &str = "zh-hans";
/// Default deepest heading level listed in the summary
pub const DEFAULT_MAX_TOC_LEVEL: u8 = 3;
/// Default directory for extracted images
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BookConfig {
    /// Book metadata
    pub book: BookSettings,
    /// Table of contents settings
    pub toc: TocSettings,
    /// Asset output settings
    pub assets: AssetSettings,
    /// Heading detection settings
    pub headings: HeadingSettings,
}

/// Book metadata written to `README.md` and `book.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookSettings {
    /// Title; falls back to the document title
    pub title: Option<String>,
    /// Description; falls back to the document subject
    pub description: Option<String>,
    /// Language code
    pub language: String,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Table of contents settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocSettings {
    /// Deepest heading level listed (1-6)
    pub max_level: u8,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_TOC_LEVEL,
        }
    }
}

/// Asset output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory for images, relative to the book root
    pub dir: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            dir: DEFAULT_ASSETS_DIR.to_string(),
        }
    }
}

/// Heading detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingSettings {
    /// Extra localized heading style prefixes, matched as `<prefix> N`
    pub prefixes: Vec<String>,
    /// Fall back to the outline level declared by paragraph styles
    pub use_outline_levels: bool,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            prefixes: default_heading_prefixes(),
            use_outline_levels: true,
        }
    }
}

fn default_heading_prefixes() -> Vec<String> {
    vec![
        "标题".to_string(),
        "Überschrift".to_string(),
        "Titre".to_string(),
    ]
}

impl BookConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| BookError::Config(e.to_string()))
    }

    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BookError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_HEADING_LEVEL).contains(&self.toc.max_level) {
            return Err(BookError::Config(format!(
                "max_toc_level must be between 1 and {}, got {}",
                MAX_HEADING_LEVEL, self.toc.max_level
            )));
        }
        validate_assets_dir(&self.assets.dir)
    }

    /// Heading classifier for these settings
    pub fn classifier(&self) -> Result<ChainClassifier> {
        let by_name = StyleNameClassifier::with_prefixes(&self.headings.prefixes)?;
        let chain = ChainClassifier::new().with(by_name);
        Ok(if self.headings.use_outline_levels {
            chain.with(OutlineLevelClassifier)
        } else {
            chain
        })
    }

    /// Assets directory without trailing separators
    pub fn assets_dir(&self) -> &str {
        self.assets.dir.trim_end_matches('/')
    }
}

fn validate_assets_dir(dir: &str) -> Result<()> {
    let trimmed = dir.trim_end_matches('/');
    if trimmed.trim().is_empty() {
        return Err(BookError::Config("assets_dir must not be empty".to_string()));
    }
    let path = Path::new(trimmed);
    if trimmed.contains('\\')
        || !path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(BookError::Config(format!(
            "assets_dir must be a relative path inside the book, got {:?}",
            dir
        )));
    }
    Ok(())
}
