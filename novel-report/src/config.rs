//! novel-report configuration management.

use anyhow::{Context, Result};
use novel_text::{AnalysisOptions, DEFAULT_TOP_N_WORDS, PageRange, SentimentLexicon, StopWords};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CLOUD_WORDS: usize = 100;
const DEFAULT_CHART_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// PDF to analyze when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,

    /// Inclusive page range holding the chapters, e.g. [11, 362]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_range: Option<PageRange>,

    /// Rows kept in the word-frequency table
    #[serde(default = "default_top_n_words")]
    pub top_n_words: usize,

    /// Replacement for the bundled stop-word list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_words_path: Option<PathBuf>,

    /// Replacement for the bundled sentiment lexicon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,

    /// Words shown in the word cloud
    #[serde(default = "default_cloud_words")]
    pub cloud_words: usize,

    /// Width of the longest bar, in characters
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_top_n_words() -> usize {
    DEFAULT_TOP_N_WORDS
}

fn default_cloud_words() -> usize {
    DEFAULT_CLOUD_WORDS
}

fn default_chart_width() -> usize {
    DEFAULT_CHART_WIDTH
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            page_range: None,
            top_n_words: default_top_n_words(),
            stop_words_path: None,
            lexicon_path: None,
            cloud_words: default_cloud_words(),
            chart_width: default_chart_width(),
        }
    }
}

impl ReportConfig {
    /// Get the config file path: <config dir>/cli-programs/novel-report.toml
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dir.join("cli-programs").join("novel-report.toml"))
    }

    /// Load config from `path`, returning default if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ReportConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no run can use; called once flags are merged in.
    pub fn validate(&self) -> Result<()> {
        if self.top_n_words == 0 {
            anyhow::bail!("top_n_words must be at least 1");
        }
        if let Some(range) = self.page_range.filter(|r| !r.is_valid()) {
            anyhow::bail!(
                "Invalid page_range {}: pages start at 1 and first must not exceed last",
                range
            );
        }
        Ok(())
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            page_range: self.page_range,
            top_n_words: self.top_n_words,
        }
    }

    pub fn stop_words(&self) -> Result<StopWords> {
        match &self.stop_words_path {
            Some(path) => Ok(StopWords::load(path)?),
            None => Ok(StopWords::english()),
        }
    }

    pub fn lexicon(&self) -> Result<SentimentLexicon> {
        match &self.lexicon_path {
            Some(path) => Ok(SentimentLexicon::load(path)?),
            None => Ok(SentimentLexicon::bundled()),
        }
    }
}
