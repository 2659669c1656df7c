//! Cross-entity validation of normalized collections.
//!
//! Checks each collection row by row and reports every violation as a
//! [`RowError`]. Detects:
//! - Missing identifiers and names
//! - Duplicate identifiers (every occurrence after the first)
//! - Out-of-range numeric columns
//! - Non-object `AttributesJSON` values
//! - Requested task IDs with no matching task
//! - Required skills no worker has
//!
//! Validation is stateless and total. Findings are data, not failures: an
//! empty list means the collection is clean. Cross-entity checks resolve
//! against a caller-supplied [`ReferenceSet`], so a pass is only correct for
//! the snapshot the set was built from and must be re-run whenever either
//! side changes.
//!
//! Sequence-shaped columns (`RequestedTaskIDs`, `Skills`, `AvailableSlots`,
//! `RequiredSkills`, `PreferredPhases`) are `Vec`s on the canonical entities,
//! so their shape is guaranteed by construction and needs no runtime check.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{Client, Task, Worker};

/// Inclusive range of a valid `PriorityLevel`.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// A finding attached to one cell of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// Zero-based position of the row within its collection.
    pub row_index: usize,
    /// Canonical header of the offending column.
    pub column: String,
    /// Human-readable description.
    pub message: String,
    /// Finding category.
    pub kind: RowErrorKind,
}

/// Categories of row findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// A required column is empty.
    Missing,
    /// The row's ID was already used by an earlier row.
    DuplicateId,
    /// A numeric column lies outside its allowed range.
    OutOfRange,
    /// A column's value has the wrong shape.
    Malformed,
    /// A reference does not resolve against the auxiliary set.
    UnknownReference,
}

impl RowError {
    fn new(
        row_index: usize,
        column: &str,
        kind: RowErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index,
            column: column.to_string(),
            message: message.into(),
            kind,
        }
    }
}

/// Values a cross-entity check resolves against.
///
/// Built by the caller from the current snapshot of the referenced
/// collection; the validator never sees sibling collections directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    values: HashSet<String>,
}

impl ReferenceSet {
    /// All task IDs, for client validation.
    pub fn task_ids(tasks: &[Task]) -> Self {
        tasks.iter().map(|t| t.task_id.as_str()).collect()
    }

    /// The union of every worker's skills, for task validation.
    pub fn worker_skills(workers: &[Worker]) -> Self {
        workers
            .iter()
            .flat_map(|w| w.skills.iter().map(String::as_str))
            .collect()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tracks IDs seen so far in one pass.
///
/// The first occurrence of an ID is never flagged; every later one is.
/// Empty IDs take part too, so a second blank ID is both missing and
/// duplicate.
#[derive(Default)]
struct SeenIds<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> SeenIds<'a> {
    /// Records `id`, returning `true` if it was seen before.
    fn repeat(&mut self, id: &'a str) -> bool {
        !self.ids.insert(id)
    }
}

/// Required-ID, uniqueness, and required-name checks, in that order.
fn check_identity<'a>(
    errors: &mut Vec<RowError>,
    seen: &mut SeenIds<'a>,
    row: usize,
    (id_column, id): (&str, &'a str),
    (name_column, name): (&str, &str),
) {
    if id.is_empty() {
        errors.push(RowError::new(
            row,
            id_column,
            RowErrorKind::Missing,
            format!("Missing {id_column}"),
        ));
    }
    if seen.repeat(id) {
        errors.push(RowError::new(
            row,
            id_column,
            RowErrorKind::DuplicateId,
            format!("Duplicate {id_column}"),
        ));
    }
    if name.is_empty() {
        errors.push(RowError::new(
            row,
            name_column,
            RowErrorKind::Missing,
            format!("Missing {name_column}"),
        ));
    }
}

/// Flags a count-like column below 1.
fn check_positive(errors: &mut Vec<RowError>, row: usize, column: &str, value: i64, message: &str) {
    if value < 1 {
        errors.push(RowError::new(row, column, RowErrorKind::OutOfRange, message));
    }
}

/// Validates a client collection against the current task IDs.
///
/// Checks, per row and in this order:
/// 1. `ClientID` present
/// 2. `ClientID` not seen in an earlier row
/// 3. `ClientName` present
/// 4. `PriorityLevel` within [1, 5]
/// 5. Every `RequestedTaskIDs` entry is a known task (one finding per unknown entry)
/// 6. `AttributesJSON` is an object
pub fn validate_clients(clients: &[Client], task_ids: &ReferenceSet) -> Vec<RowError> {
    let mut errors = Vec::new();
    let mut seen = SeenIds::default();

    for (i, c) in clients.iter().enumerate() {
        check_identity(
            &mut errors,
            &mut seen,
            i,
            ("ClientID", c.client_id.as_str()),
            ("ClientName", c.client_name.as_str()),
        );

        if !PRIORITY_RANGE.contains(&c.priority_level) {
            errors.push(RowError::new(
                i,
                "PriorityLevel",
                RowErrorKind::OutOfRange,
                "PriorityLevel must be 1-5",
            ));
        }

        for tid in &c.requested_task_ids {
            if !task_ids.contains(tid) {
                errors.push(RowError::new(
                    i,
                    "RequestedTaskIDs",
                    RowErrorKind::UnknownReference,
                    format!("Unknown TaskID: {tid}"),
                ));
            }
        }

        // Type check only: unparseable JSON was already replaced by `{}`.
        if !c.attributes.is_object() {
            errors.push(RowError::new(
                i,
                "AttributesJSON",
                RowErrorKind::Malformed,
                "Malformed JSON",
            ));
        }
    }

    errors
}

/// Validates a worker collection. Workers have no cross-entity references.
///
/// Checks, per row: `WorkerID` present and unique, `WorkerName` present,
/// `MaxLoadPerPhase` >= 1.
pub fn validate_workers(workers: &[Worker]) -> Vec<RowError> {
    let mut errors = Vec::new();
    let mut seen = SeenIds::default();

    for (i, w) in workers.iter().enumerate() {
        check_identity(
            &mut errors,
            &mut seen,
            i,
            ("WorkerID", w.worker_id.as_str()),
            ("WorkerName", w.worker_name.as_str()),
        );
        check_positive(
            &mut errors,
            i,
            "MaxLoadPerPhase",
            w.max_load_per_phase,
            "Invalid MaxLoadPerPhase",
        );
    }

    errors
}

/// Validates a task collection against the union of all worker skills.
///
/// Checks, per row and in this order:
/// 1. `TaskID` present and unique, `TaskName` present
/// 2. `Duration` >= 1
/// 3. Every `RequiredSkills` entry is held by some worker (one finding per missing skill)
/// 4. `MaxConcurrent` >= 1
pub fn validate_tasks(tasks: &[Task], worker_skills: &ReferenceSet) -> Vec<RowError> {
    let mut errors = Vec::new();
    let mut seen = SeenIds::default();

    for (i, t) in tasks.iter().enumerate() {
        check_identity(
            &mut errors,
            &mut seen,
            i,
            ("TaskID", t.task_id.as_str()),
            ("TaskName", t.task_name.as_str()),
        );
        check_positive(&mut errors, i, "Duration", t.duration, "Duration must be >= 1");

        for skill in &t.required_skills {
            if !worker_skills.contains(skill) {
                errors.push(RowError::new(
                    i,
                    "RequiredSkills",
                    RowErrorKind::UnknownReference,
                    format!("No worker with skill: {skill}"),
                ));
            }
        }

        check_positive(
            &mut errors,
            i,
            "MaxConcurrent",
            t.max_concurrent,
            "Invalid MaxConcurrent",
        );
    }

    errors
}
