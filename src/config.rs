use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;
use crate::layout::{InitialLayoutOptions, LayoutOptions, SpreadOptions};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rings: LayoutOptions,
    pub dense: LayoutOptions,
    pub dense_tags: Vec<String>,
    pub spread: SpreadOptions,
    pub initial: InitialLayoutOptions,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rings: LayoutOptions::default(),
            dense: LayoutOptions::dense(),
            dense_tags: vec!["discover".to_owned()],
            spread: SpreadOptions::default(),
            initial: InitialLayoutOptions::default(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid layout config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn ring_options_for(&self, criteria: &FilterCriteria) -> LayoutOptions {
        if self.dense_tags.iter().any(|tag| criteria.has_subteam(tag)) {
            self.dense
        } else {
            self.rings
        }
    }
}
