//! Data preparation for resource allocation.
//!
//! Ingests spreadsheet-like records for clients, workers, and tasks,
//! normalizes heterogeneous rows into a canonical schema, and validates
//! cross-entity references and numeric constraints before the dataset and
//! its rule configuration are exported to an allocator.
//!
//! # Modules
//!
//! - **`models`**: Canonical entities: `Client`, `Worker`, `Task`, `EntityKind`, `RawRow`
//! - **`normalize`**: Total row → entity coercion with per-field fallbacks
//! - **`validation`**: Row findings (missing/duplicate IDs, ranges, unknown references)
//! - **`rules`**: The six allocation rule kinds and the rule set
//! - **`headers`**: Raw header → canonical header mapping
//! - **`prioritization`**: Criterion weights and presets
//! - **`dataset`**: The three collections plus rules and weights, validated together
//! - **`export`**: Canonical rows and the `rules.json` configuration
//!
//! # Two-phase design
//!
//! Normalization never fails: malformed cells are replaced by defaults so
//! every entity is always well-typed. Validation decides which of those
//! values are worth surfacing, and reports them as data rather than errors.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use u_alloc_prep::models::{Client, Task};
//! use u_alloc_prep::normalize::normalize_client;
//! use u_alloc_prep::validation::{validate_clients, ReferenceSet};
//!
//! let raw = json!({"ClientID": "C1", "ClientName": "Acme", "RequestedTaskIDs": "T1, T9"});
//! let client: Client = normalize_client(raw.as_object().unwrap());
//!
//! let tasks = vec![Task::new("T1")];
//! let errors = validate_clients(&[client], &ReferenceSet::task_ids(&tasks));
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].message, "Unknown TaskID: T9");
//! ```

pub mod dataset;
pub mod error;
pub mod export;
pub mod headers;
pub mod models;
pub mod normalize;
pub mod prioritization;
pub mod rules;
pub mod validation;

pub use dataset::{Dataset, ValidationReport};
pub use error::{Error, Result};
