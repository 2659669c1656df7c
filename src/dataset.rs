//! Dataset workspace.
//!
//! Holds the three entity collections together with the rules and weights
//! being prepared for export. Any change to a collection invalidates earlier
//! findings; callers re-run [`Dataset::validate`] after each mutation, which
//! rebuilds the cross-entity reference sets from the current snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::headers::HeaderMapping;
use crate::models::{Client, EntityKind, RawRow, Task, Worker};
use crate::normalize::Normalize;
use crate::prioritization::Weights;
use crate::rules::RuleSet;
use crate::validation::{validate_clients, validate_tasks, validate_workers, ReferenceSet, RowError};

/// Clients, workers, tasks, rules, and weights of one configuration session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    clients: Vec<Client>,
    workers: Vec<Worker>,
    tasks: Vec<Task>,
    /// Business rules to export.
    pub rules: RuleSet,
    /// Prioritization weights to export.
    pub weights: Weights,
}

/// Findings of one full validation pass, per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub clients: Vec<RowError>,
    pub workers: Vec<RowError>,
    pub tasks: Vec<RowError>,
}

impl ValidationReport {
    /// Findings for one collection.
    pub fn for_kind(&self, kind: EntityKind) -> &[RowError] {
        match kind {
            EntityKind::Client => &self.clients,
            EntityKind::Worker => &self.workers,
            EntityKind::Task => &self.tasks,
        }
    }

    /// Total number of findings.
    pub fn total(&self) -> usize {
        self.clients.len() + self.workers.len() + self.tasks.len()
    }

    /// Whether no collection has findings.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Maps and normalizes an upload. An empty upload yields `None`.
fn import_rows<T: Normalize>(rows: &[RawRow], mapping: &HeaderMapping) -> Option<Vec<T>> {
    if rows.is_empty() {
        return None;
    }
    let items: Vec<T> = rows.iter().map(|r| T::normalize(&mapping.apply(r))).collect();
    tracing::debug!(kind = %T::KIND, rows = items.len(), "Imported rows");
    Some(items)
}

/// Overwrites one cell with raw text and re-normalizes the row.
fn edit_entity<T: Normalize>(items: &mut [T], row: usize, column: &str, text: &str) -> Result<()> {
    if !T::KIND.has_column(column) {
        return Err(Error::UnknownColumn {
            kind: T::KIND,
            column: column.to_string(),
        });
    }
    let len = items.len();
    let item = items.get_mut(row).ok_or(Error::RowOutOfRange {
        kind: T::KIND,
        row,
        len,
    })?;

    let mut raw = item.to_raw_row();
    raw.insert(column.to_string(), Value::String(text.to_string()));
    *item = T::normalize(&raw);
    Ok(())
}

/// Distinct non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values.filter(|v| !v.is_empty()) {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Replaces the clients with an uploaded sheet. Returns the number of
    /// rows imported; an empty upload leaves the collection untouched.
    pub fn import_clients(&mut self, rows: &[RawRow], mapping: &HeaderMapping) -> usize {
        match import_rows(rows, mapping) {
            Some(items) => {
                self.clients = items;
                self.clients.len()
            }
            None => 0,
        }
    }

    /// Replaces the workers with an uploaded sheet. See [`import_clients`](Self::import_clients).
    pub fn import_workers(&mut self, rows: &[RawRow], mapping: &HeaderMapping) -> usize {
        match import_rows(rows, mapping) {
            Some(items) => {
                self.workers = items;
                self.workers.len()
            }
            None => 0,
        }
    }

    /// Replaces the tasks with an uploaded sheet. See [`import_clients`](Self::import_clients).
    pub fn import_tasks(&mut self, rows: &[RawRow], mapping: &HeaderMapping) -> usize {
        match import_rows(rows, mapping) {
            Some(items) => {
                self.tasks = items;
                self.tasks.len()
            }
            None => 0,
        }
    }

    /// Replaces the clients wholesale, e.g. with an accepted correction set.
    pub fn replace_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
    }

    pub fn replace_workers(&mut self, workers: Vec<Worker>) {
        self.workers = workers;
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Applies a grid edit: `column` of row `row` becomes `text`, and the row
    /// is re-normalized so the entity stays well-typed.
    ///
    /// # Errors
    /// [`Error::UnknownColumn`] if `column` is not a canonical header of
    /// `kind`; [`Error::RowOutOfRange`] if `row` does not exist.
    pub fn edit_cell(&mut self, kind: EntityKind, row: usize, column: &str, text: &str) -> Result<()> {
        match kind {
            EntityKind::Client => edit_entity(&mut self.clients, row, column, text),
            EntityKind::Worker => edit_entity(&mut self.workers, row, column, text),
            EntityKind::Task => edit_entity(&mut self.tasks, row, column, text),
        }
    }

    /// Runs every check against the current snapshot.
    pub fn validate(&self) -> ValidationReport {
        let task_ids = ReferenceSet::task_ids(&self.tasks);
        let worker_skills = ReferenceSet::worker_skills(&self.workers);

        let report = ValidationReport {
            clients: validate_clients(&self.clients, &task_ids),
            workers: validate_workers(&self.workers),
            tasks: validate_tasks(&self.tasks, &worker_skills),
        };
        tracing::debug!(
            clients = report.clients.len(),
            workers = report.workers.len(),
            tasks = report.tasks.len(),
            "Validation pass complete"
        );
        report
    }

    /// All task IDs, for building co-run and phase-window rules.
    pub fn task_ids(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.task_id.clone()).collect()
    }

    /// Distinct client group tags.
    pub fn client_groups(&self) -> Vec<String> {
        distinct(self.clients.iter().map(|c| c.group_tag.as_str()))
    }

    /// Distinct worker groups.
    pub fn worker_groups(&self) -> Vec<String> {
        distinct(self.workers.iter().map(|w| w.worker_group.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RowErrorKind;
    use serde_json::json;

    fn rows(v: Value) -> Vec<RawRow> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect()
    }

    fn sample() -> Dataset {
        let mut ds = Dataset::new();
        let id = HeaderMapping::identity();
        ds.import_clients(
            &rows(json!([
                {"ClientID": "C1", "ClientName": "Acme", "PriorityLevel": 2, "RequestedTaskIDs": "T1", "GroupTag": "A"},
                {"ClientID": "C2", "ClientName": "Beta", "PriorityLevel": 5, "RequestedTaskIDs": "T1,T2", "GroupTag": "B"},
            ])),
            &id,
        );
        ds.import_workers(
            &rows(json!([
                {"WorkerID": "W1", "WorkerName": "Ada", "Skills": "sql,ml", "AvailableSlots": "[1,2]", "WorkerGroup": "G1"},
            ])),
            &id,
        );
        ds.import_tasks(
            &rows(json!([
                {"TaskID": "T1", "TaskName": "Ingest", "RequiredSkills": "sql", "PreferredPhases": "1-2"},
                {"TaskID": "T2", "TaskName": "Train", "RequiredSkills": "ml"},
            ])),
            &id,
        );
        ds
    }

    #[test]
    fn test_clean_dataset() {
        let report = sample().validate();
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_import_applies_header_mapping() {
        let mut ds = Dataset::new();
        let mapping = HeaderMapping::identity()
            .with("Client Ref", "ClientID")
            .with("Display Name", "ClientName");
        let n = ds.import_clients(
            &rows(json!([{"Client Ref": "C9", "Display Name": "Gamma"}])),
            &mapping,
        );
        assert_eq!(n, 1);
        assert_eq!(ds.clients()[0].client_id, "C9");
        assert_eq!(ds.clients()[0].client_name, "Gamma");
    }

    #[test]
    fn test_empty_upload_keeps_collection() {
        let mut ds = sample();
        assert_eq!(ds.import_tasks(&[], &HeaderMapping::identity()), 0);
        assert_eq!(ds.tasks().len(), 2);
    }

    #[test]
    fn test_removing_task_surfaces_unknown_reference() {
        let mut ds = sample();
        let tasks = ds.tasks()[..1].to_vec();
        ds.replace_tasks(tasks);

        let report = ds.validate();
        assert_eq!(report.clients.len(), 1);
        assert_eq!(report.clients[0].row_index, 1);
        assert_eq!(report.clients[0].kind, RowErrorKind::UnknownReference);
        assert!(report.for_kind(EntityKind::Task).is_empty());
    }

    #[test]
    fn test_removing_skill_surfaces_task_finding() {
        let mut ds = sample();
        ds.edit_cell(EntityKind::Worker, 0, "Skills", "sql").unwrap();

        let report = ds.validate();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].message, "No worker with skill: ml");
    }

    #[test]
    fn test_edit_cell_renormalizes() {
        let mut ds = sample();
        ds.edit_cell(EntityKind::Client, 0, "PriorityLevel", "9").unwrap();
        ds.edit_cell(EntityKind::Task, 1, "PreferredPhases", "3-5").unwrap();
        ds.edit_cell(EntityKind::Client, 1, "AttributesJSON", "[1]").unwrap();

        assert_eq!(ds.clients()[0].priority_level, 9);
        assert_eq!(ds.tasks()[1].preferred_phases, vec![3, 4, 5]);

        let report = ds.validate();
        let cols: Vec<_> = report.clients.iter().map(|e| e.column.as_str()).collect();
        assert_eq!(cols, vec!["PriorityLevel", "AttributesJSON"]);
    }

    #[test]
    fn test_edit_cell_keeps_other_attributes() {
        let mut ds = sample();
        ds.edit_cell(EntityKind::Client, 0, "AttributesJSON", r#""hello""#).unwrap();
        assert_eq!(ds.validate().clients.len(), 1);

        ds.edit_cell(EntityKind::Client, 0, "ClientName", "Acme Ltd").unwrap();
        assert_eq!(ds.clients()[0].client_name, "Acme Ltd");
        assert_eq!(ds.clients()[0].attributes, json!("hello"));

        let report = ds.validate();
        assert_eq!(report.clients.len(), 1);
        assert_eq!(report.clients[0].column, "AttributesJSON");
        assert_eq!(report.clients[0].message, "Malformed JSON");
    }

    #[test]
    fn test_edit_cell_errors() {
        let mut ds = sample();
        assert!(matches!(
            ds.edit_cell(EntityKind::Worker, 0, "Duration", "2"),
            Err(Error::UnknownColumn { kind: EntityKind::Worker, .. })
        ));
        assert!(matches!(
            ds.edit_cell(EntityKind::Task, 7, "TaskName", "x"),
            Err(Error::RowOutOfRange { row: 7, len: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_rows_are_kept() {
        let mut ds = sample();
        let mut workers = ds.workers().to_vec();
        workers.push(workers[0].clone());
        ds.replace_workers(workers);

        assert_eq!(ds.workers().len(), 2);
        let report = ds.validate();
        assert_eq!(report.workers.len(), 1);
        assert_eq!(report.workers[0].kind, RowErrorKind::DuplicateId);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_rule_context() {
        let ds = sample();
        assert_eq!(ds.task_ids(), vec!["T1", "T2"]);
        assert_eq!(ds.client_groups(), vec!["A", "B"]);
        assert_eq!(ds.worker_groups(), vec!["G1"]);
    }
}
