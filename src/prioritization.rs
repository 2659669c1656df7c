//! Prioritization weights for the downstream allocator.
//!
//! The user ranks five criteria on a 1–5 scale, either by hand or from a
//! preset. Weights are exported alongside the rules; nothing here uses them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest allowed weight.
pub const MIN_WEIGHT: u8 = 1;
/// Highest allowed weight.
pub const MAX_WEIGHT: u8 = 5;

/// An allocation objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Priority,
    Fairness,
    Cost,
    Fulfillment,
    Workload,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Priority,
        Criterion::Fairness,
        Criterion::Cost,
        Criterion::Fulfillment,
        Criterion::Workload,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Priority => "Priority Level",
            Criterion::Fairness => "Fairness",
            Criterion::Cost => "Cost Efficiency",
            Criterion::Fulfillment => "Task Fulfillment",
            Criterion::Workload => "Minimize Workload",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Criterion weights, each in [`MIN_WEIGHT`, `MAX_WEIGHT`].
///
/// Unset criteria read as [`MIN_WEIGHT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights {
    weights: BTreeMap<Criterion, u8>,
}

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the weight of a criterion.
    pub fn get(&self, criterion: Criterion) -> u8 {
        self.weights
            .get(&criterion)
            .copied()
            .unwrap_or(MIN_WEIGHT)
            .clamp(MIN_WEIGHT, MAX_WEIGHT)
    }

    /// Sets a weight, clamped into range.
    pub fn set(&mut self, criterion: Criterion, weight: u8) {
        self.weights
            .insert(criterion, weight.clamp(MIN_WEIGHT, MAX_WEIGHT));
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, criterion: Criterion, weight: u8) -> Self {
        self.set(criterion, weight);
        self
    }

    /// All five weights in criterion order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, u8)> + '_ {
        Criterion::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl From<Preset> for Weights {
    fn from(preset: Preset) -> Self {
        preset.weights()
    }
}

/// A named weight profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    MaximizeFulfillment,
    FairDistribution,
    MinimizeWorkload,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::MaximizeFulfillment,
        Preset::FairDistribution,
        Preset::MinimizeWorkload,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::MaximizeFulfillment => "Maximize Fulfillment",
            Preset::FairDistribution => "Fair Distribution",
            Preset::MinimizeWorkload => "Minimize Workload",
        }
    }

    /// The preset's weights.
    pub fn weights(&self) -> Weights {
        // priority, fairness, cost, fulfillment, workload
        let values: [u8; 5] = match self {
            Preset::MaximizeFulfillment => [2, 1, 1, 5, 1],
            Preset::FairDistribution => [1, 5, 2, 2, 2],
            Preset::MinimizeWorkload => [1, 2, 2, 1, 5],
        };
        Criterion::ALL
            .into_iter()
            .zip(values)
            .fold(Weights::new(), |w, (c, v)| w.with(c, v))
    }
}
