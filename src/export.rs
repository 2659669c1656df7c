//! Export of the cleaned dataset and its rule configuration.
//!
//! File formats are the caller's business. This module produces the two
//! payloads they serialize: canonical rows per collection, and the
//! `rules.json` bundle of rules plus prioritization weights.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::models::RawRow;
use crate::normalize::Normalize;
use crate::prioritization::Weights;
use crate::rules::RuleSet;

/// The exported rule configuration (`rules.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub rules: RuleSet,
    #[serde(default)]
    pub weights: Weights,
}

impl RuleConfig {
    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a configuration previously written by [`to_json_pretty`](Self::to_json_pretty).
    ///
    /// # Errors
    /// [`Error::Json`] on malformed JSON or an unknown rule type;
    /// [`Error::InvalidRuleConfig`] if a rule ID is empty or repeated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RuleConfig = serde_json::from_str(json)?;
        if !config.rules.is_well_formed() {
            return Err(Error::InvalidRuleConfig(
                "rule IDs must be non-empty and unique".into(),
            ));
        }
        Ok(config)
    }
}

impl Dataset {
    /// Snapshot of the rules and weights for export.
    pub fn rule_config(&self) -> RuleConfig {
        RuleConfig {
            rules: self.rules.clone(),
            weights: self.weights.clone(),
        }
    }

    /// Replaces the rules and weights with an imported configuration.
    pub fn load_rule_config(&mut self, config: RuleConfig) {
        self.rules = config.rules;
        self.weights = config.weights;
    }
}

/// Renders entities as raw rows keyed by canonical headers, for the
/// CSV/XLSX writers. Feeding these rows back through the normalizer
/// reproduces the entities.
pub fn export_rows<T: Normalize>(items: &[T]) -> Vec<RawRow> {
    items.iter().map(T::to_raw_row).collect()
}
