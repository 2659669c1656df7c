//! Row normalization.
//!
//! Converts raw spreadsheet rows into canonical entities. Normalization is
//! total: every field has a fallback, so any row (including an empty one or
//! one with cells of unexpected types) produces a fully-typed entity.
//!
//! # Coercion Rules
//!
//! | Column shape | Rule | Fallback |
//! |--------------|------|----------|
//! | Text (IDs, names, tags) | canonical header, then lowercase alias | `""` |
//! | Integer | numeric coercion | `1` |
//! | Delimited list | split on `,`, trim, drop empty | `[]` |
//! | Number list | strip `[]`, split on `,`, drop non-numeric | `[]` |
//! | Phase list | `start-end` expands inclusively, else number list | `[]` |
//! | JSON object | parse string as JSON | `{}` |
//!
//! A fallback never produces a finding by itself; whether the coerced value
//! is a data-quality problem is decided by [`crate::validation`].

pub mod coerce;

use serde_json::Value;

use crate::models::{Client, EntityKind, RawRow, Task, Worker};

use coerce::{delimited, integer, json_object, lookup, number_list, phase_list, text};

/// Normalizes one raw row into a [`Client`].
pub fn normalize_client(row: &RawRow) -> Client {
    Client {
        client_id: text(lookup(row, "ClientID")),
        client_name: text(lookup(row, "ClientName")),
        priority_level: integer(lookup(row, "PriorityLevel")),
        requested_task_ids: delimited(lookup(row, "RequestedTaskIDs")),
        group_tag: text(lookup(row, "GroupTag")),
        attributes: json_object(lookup(row, "AttributesJSON")),
    }
}

/// Normalizes one raw row into a [`Worker`].
pub fn normalize_worker(row: &RawRow) -> Worker {
    Worker {
        worker_id: text(lookup(row, "WorkerID")),
        worker_name: text(lookup(row, "WorkerName")),
        skills: delimited(lookup(row, "Skills")),
        available_slots: number_list(lookup(row, "AvailableSlots"), "AvailableSlots"),
        max_load_per_phase: integer(lookup(row, "MaxLoadPerPhase")),
        worker_group: text(lookup(row, "WorkerGroup")),
        qualification_level: text(lookup(row, "QualificationLevel")),
    }
}

/// Normalizes one raw row into a [`Task`].
pub fn normalize_task(row: &RawRow) -> Task {
    Task {
        task_id: text(lookup(row, "TaskID")),
        task_name: text(lookup(row, "TaskName")),
        category: text(lookup(row, "Category")),
        duration: integer(lookup(row, "Duration")),
        required_skills: delimited(lookup(row, "RequiredSkills")),
        preferred_phases: phase_list(lookup(row, "PreferredPhases"), "PreferredPhases"),
        max_concurrent: integer(lookup(row, "MaxConcurrent")),
    }
}

/// An entity that can be produced from, and turned back into, a raw row.
///
/// `to_raw_row` keys cells by canonical header, so
/// `normalize(&e.to_raw_row()) == e` for every normalized entity.
pub trait Normalize: Sized {
    /// The collection this entity belongs to.
    const KIND: EntityKind;

    /// Builds the entity from a raw row. Never fails.
    fn normalize(row: &RawRow) -> Self;

    /// Renders the entity as a raw row keyed by canonical headers.
    fn to_raw_row(&self) -> RawRow;
}

/// Columns listed after `json:` are written back as JSON text, the form
/// [`coerce::json_object`] parses. A bare string value would otherwise be
/// re-read as JSON source.
macro_rules! impl_normalize {
    ($ty:ty, $kind:expr, $func:ident $(, json: $col:literal)*) => {
        impl Normalize for $ty {
            const KIND: EntityKind = $kind;

            fn normalize(row: &RawRow) -> Self {
                $func(row)
            }

            #[allow(unused_mut)]
            fn to_raw_row(&self) -> RawRow {
                let mut row = match serde_json::to_value(self) {
                    Ok(Value::Object(map)) => map,
                    // Entities are plain structs of strings, integers, and JSON
                    // values; serialization always yields an object.
                    _ => RawRow::new(),
                };
                $(
                    if let Some(cell) = row.get_mut($col) {
                        *cell = Value::String(cell.to_string());
                    }
                )*
                row
            }
        }
    };
}

impl_normalize!(Client, EntityKind::Client, normalize_client, json: "AttributesJSON");
impl_normalize!(Worker, EntityKind::Worker, normalize_worker);
impl_normalize!(Task, EntityKind::Task, normalize_task);

/// Normalizes every row of an upload, preserving row order.
pub fn normalize_rows<T: Normalize>(rows: &[RawRow]) -> Vec<T> {
    rows.iter().map(T::normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(v: Value) -> RawRow {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_client() {
        let c = normalize_client(&row(json!({
            "ClientID": "C1",
            "ClientName": "Acme Corp",
            "PriorityLevel": "3",
            "RequestedTaskIDs": "T1, T2,,T3",
            "GroupTag": "GroupA",
            "AttributesJSON": r#"{"location":"north","budget":1000}"#,
        })));

        assert_eq!(c.client_id, "C1");
        assert_eq!(c.client_name, "Acme Corp");
        assert_eq!(c.priority_level, 3);
        assert_eq!(c.requested_task_ids, vec!["T1", "T2", "T3"]);
        assert_eq!(c.group_tag, "GroupA");
        assert_eq!(c.attributes, json!({"location": "north", "budget": 1000}));
    }

    #[test]
    fn test_normalize_client_lowercase_alias() {
        let c = normalize_client(&row(json!({"clientid": "C7", "clientname": "Beta"})));
        assert_eq!(c.client_id, "C7");
        assert_eq!(c.client_name, "Beta");
    }

    #[test]
    fn test_normalize_worker() {
        let w = normalize_worker(&row(json!({
            "WorkerID": "W1",
            "WorkerName": "Ada",
            "Skills": "coding, ml",
            "AvailableSlots": "[1, 3, x, 5]",
            "MaxLoadPerPhase": 2,
            "WorkerGroup": "GroupB",
            "QualificationLevel": 4,
        })));

        assert_eq!(w.worker_id, "W1");
        assert_eq!(w.skills, vec!["coding", "ml"]);
        assert_eq!(w.available_slots, vec![1, 3, 5]);
        assert_eq!(w.max_load_per_phase, 2);
        assert_eq!(w.worker_group, "GroupB");
        assert_eq!(w.qualification_level, "4");
    }

    #[test]
    fn test_normalize_task() {
        let t = normalize_task(&row(json!({
            "TaskID": "T1",
            "TaskName": "Cleanup",
            "Category": "ETL",
            "Duration": "2",
            "RequiredSkills": "sql,python",
            "PreferredPhases": "2-4",
            "MaxConcurrent": "3",
        })));

        assert_eq!(t.task_id, "T1");
        assert_eq!(t.category, "ETL");
        assert_eq!(t.duration, 2);
        assert_eq!(t.required_skills, vec!["sql", "python"]);
        assert_eq!(t.preferred_phases, vec![2, 3, 4]);
        assert_eq!(t.max_concurrent, 3);
    }

    #[test]
    fn test_phase_list_forms() {
        let t = normalize_task(&row(json!({"PreferredPhases": "1,3,5"})));
        assert_eq!(t.preferred_phases, vec![1, 3, 5]);
    }

    #[test]
    fn test_empty_row_is_total() {
        let empty = RawRow::new();

        let c = normalize_client(&empty);
        assert_eq!(c, Client::new(""));

        let w = normalize_worker(&empty);
        assert_eq!(w, Worker::new(""));

        let t = normalize_task(&empty);
        assert_eq!(t, Task::new(""));
    }

    #[test]
    fn test_unexpected_cell_types_are_total() {
        let c = normalize_client(&row(json!({
            "ClientID": 17,
            "ClientName": ["a", "b"],
            "PriorityLevel": {"x": 1},
            "RequestedTaskIDs": 5,
            "AttributesJSON": 12,
        })));
        assert_eq!(c.client_id, "17");
        assert_eq!(c.client_name, "a,b");
        assert_eq!(c.priority_level, 1);
        assert_eq!(c.requested_task_ids, vec!["5"]);
        assert_eq!(c.attributes, json!(12));
    }

    #[test]
    fn test_invalid_integer_defaults_to_one() {
        let t = normalize_task(&row(json!({"Duration": "soon", "MaxConcurrent": ""})));
        assert_eq!(t.duration, 1);
        assert_eq!(t.max_concurrent, 1);
    }

    #[test]
    fn test_malformed_json_becomes_empty_object() {
        let c = normalize_client(&row(json!({"AttributesJSON": "{bad json"})));
        assert_eq!(c.attributes, json!({}));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let c = normalize_client(&row(json!({
            "ClientID": "C1",
            "ClientName": "Acme",
            "PriorityLevel": 4.0,
            "RequestedTaskIDs": "T1,T2,T1",
            "AttributesJSON": r#"{"a":[1,2]}"#,
        })));
        assert_eq!(Client::normalize(&c.to_raw_row()), c);

        let w = normalize_worker(&row(json!({
            "WorkerID": "W1",
            "Skills": "a, b",
            "AvailableSlots": "[2,4]",
        })));
        assert_eq!(Worker::normalize(&w.to_raw_row()), w);

        let t = normalize_task(&row(json!({
            "TaskID": "T1",
            "PreferredPhases": "1-3",
            "Duration": 0,
        })));
        assert_eq!(Task::normalize(&t.to_raw_row()), t);
    }

    #[test]
    fn test_normalize_is_idempotent_for_every_attributes_shape() {
        let cells = [
            json!(r#"{"a":1}"#),
            json!("[1,2]"),
            json!("42"),
            json!(r#""42""#),
            json!(r#""hello""#),
            json!(r#""""#),
            json!("true"),
            json!(2.5),
            json!(false),
            json!("{bad json"),
        ];
        for cell in cells {
            let c = normalize_client(&row(json!({"ClientID": "C1", "AttributesJSON": cell})));
            assert_eq!(Client::normalize(&c.to_raw_row()), c, "cell {cell}");
        }
    }

    #[test]
    fn test_string_attributes_survive_round_trip() {
        let c = normalize_client(&row(json!({"ClientID": "C1", "AttributesJSON": r#""hello""#})));
        assert_eq!(c.attributes, json!("hello"));

        let raw = c.to_raw_row();
        assert_eq!(raw["AttributesJSON"], json!(r#""hello""#));
        assert_eq!(Client::normalize(&raw).attributes, json!("hello"));
    }

    #[test]
    fn test_normalize_rows_preserves_order() {
        let rows = vec![
            row(json!({"TaskID": "T2"})),
            row(json!({"TaskID": "T1"})),
        ];
        let tasks: Vec<Task> = normalize_rows(&rows);
        let ids: Vec<_> = tasks.iter().map(|t| t.task_id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T1"]);
        assert_eq!(<Task as Normalize>::KIND, EntityKind::Task);
    }
}
