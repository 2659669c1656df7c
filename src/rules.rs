//! Allocation business rules.
//!
//! A closed set of six rule kinds, each carrying a free-form parameter map.
//! Rules are inert data: they travel with the dataset into the exported
//! configuration, but are not evaluated, scheduled, or checked for
//! contradictions here.
//!
//! # Rule Kinds
//!
//! | Kind | Typical intent |
//! |------|----------------|
//! | `co-run` | listed tasks run together |
//! | `slot-restriction` | a client/worker group gets a minimum of common slots |
//! | `load-limit` | a worker group takes at most N tasks per phase |
//! | `phase-window` | a task may only run in given phases |
//! | `pattern-match` | a regex over task IDs/names selects a rule template |
//! | `precedence-override` | explicit priority among conflicting rules |
//!
//! The parameter map is untyped; no per-kind schema is enforced.

use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Length of a generated rule ID.
pub const RULE_ID_LEN: usize = 10;

/// The closed set of rule kinds.
///
/// Serializes camelCase (`"coRun"`); also accepts the kebab-case spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    #[serde(alias = "co-run")]
    CoRun,
    #[serde(alias = "slot-restriction")]
    SlotRestriction,
    #[serde(alias = "load-limit")]
    LoadLimit,
    #[serde(alias = "phase-window")]
    PhaseWindow,
    #[serde(alias = "pattern-match")]
    PatternMatch,
    #[serde(alias = "precedence-override")]
    PrecedenceOverride,
}

impl RuleKind {
    pub const ALL: [RuleKind; 6] = [
        RuleKind::CoRun,
        RuleKind::SlotRestriction,
        RuleKind::LoadLimit,
        RuleKind::PhaseWindow,
        RuleKind::PatternMatch,
        RuleKind::PrecedenceOverride,
    ];

    /// Kebab-case name (e.g., `"co-run"`).
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::CoRun => "co-run",
            RuleKind::SlotRestriction => "slot-restriction",
            RuleKind::LoadLimit => "load-limit",
            RuleKind::PhaseWindow => "phase-window",
            RuleKind::PatternMatch => "pattern-match",
            RuleKind::PrecedenceOverride => "precedence-override",
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::CoRun => "Co-run (tasks together)",
            RuleKind::SlotRestriction => "Slot Restriction",
            RuleKind::LoadLimit => "Load Limit",
            RuleKind::PhaseWindow => "Phase Window",
            RuleKind::PatternMatch => "Pattern Match",
            RuleKind::PrecedenceOverride => "Precedence Override",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = Error;

    /// Parses either spelling: `"co-run"` or `"coRun"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        RuleKind::ALL
            .into_iter()
            .find(|k| k.name().replace('-', "") == key)
            .ok_or_else(|| Error::UnknownRuleKind(s.to_string()))
    }
}

/// A business rule with an assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Opaque unique token.
    pub id: String,
    /// Rule kind.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Free-text description.
    pub description: String,
    /// Kind-specific parameters (not interpreted here).
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Rule {
    /// A rule is well-formed if it has a non-empty ID. The kind is drawn
    /// from the closed set by construction.
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty()
    }
}

/// A rule before ID assignment, as supplied by a rule builder or an
/// external suggestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub description: String,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl RuleDraft {
    pub fn new(kind: RuleKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            params: Map::new(),
        }
    }

    /// Adds a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Generates a random lowercase alphanumeric rule ID.
pub fn generate_rule_id<R: Rng>(rng: &mut R) -> String {
    (0..RULE_ID_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect()
}

/// The ordered list of rules attached to a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh ID to `draft` and appends it.
    ///
    /// # Errors
    /// [`Error::EmptyRuleDescription`] if the description is blank.
    pub fn add(&mut self, draft: RuleDraft) -> Result<&Rule> {
        self.add_with_rng(draft, &mut rand::rng())
    }

    /// Like [`add`](Self::add), drawing the ID from `rng`.
    pub fn add_with_rng<R: Rng>(&mut self, draft: RuleDraft, rng: &mut R) -> Result<&Rule> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(Error::EmptyRuleDescription);
        }

        let mut id = generate_rule_id(rng);
        while self.get(&id).is_some() {
            id = generate_rule_id(rng);
        }

        let rule = Rule {
            id,
            kind: draft.kind,
            description: description.to_string(),
            params: draft.params,
        };
        tracing::debug!(rule_id = %rule.id, kind = %rule.kind, "Rule added");
        self.rules.push(rule);
        self.rules
            .last()
            .ok_or_else(|| Error::InvalidRuleConfig("rule was not stored".into()))
    }

    /// Removes a rule by ID.
    pub fn remove(&mut self, id: &str) -> Option<Rule> {
        let pos = self.rules.iter().position(|r| r.id == id)?;
        Some(self.rules.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rules of a given kind, in insertion order.
    pub fn of_kind(&self, kind: RuleKind) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether every rule has a non-empty, unique ID.
    pub fn is_well_formed(&self) -> bool {
        let mut ids = std::collections::HashSet::new();
        self.rules
            .iter()
            .all(|r| r.is_well_formed() && ids.insert(r.id.as_str()))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
