//! Client model.
//!
//! A client requests tasks and carries a priority used by the downstream
//! allocator to decide whose requests are fulfilled first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A client requesting work.
///
/// Serialized with the canonical spreadsheet headers (`ClientID`,
/// `ClientName`, ...), so an exported row can be fed straight back into
/// the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Client {
    /// Unique client identifier.
    #[serde(rename = "ClientID")]
    pub client_id: String,
    /// Human-readable name.
    pub client_name: String,
    /// Priority, valid in [1, 5].
    pub priority_level: i64,
    /// Requested task IDs, in the order given.
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>,
    /// Free-form grouping label.
    pub group_tag: String,
    /// Arbitrary metadata. Expected to be a JSON object.
    #[serde(rename = "AttributesJSON")]
    pub attributes: Value,
}

impl Client {
    /// Creates a client with the given ID and default fields.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_name: String::new(),
            priority_level: 1,
            requested_task_ids: Vec::new(),
            group_tag: String::new(),
            attributes: Value::Object(serde_json::Map::new()),
        }
    }

    /// Sets the client name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Sets the priority level.
    pub fn with_priority(mut self, priority_level: i64) -> Self {
        self.priority_level = priority_level;
        self
    }

    /// Appends a requested task ID.
    pub fn with_requested_task(mut self, task_id: impl Into<String>) -> Self {
        self.requested_task_ids.push(task_id.into());
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group_tag: impl Into<String>) -> Self {
        self.group_tag = group_tag.into();
        self
    }

    /// Sets the attributes value.
    pub fn with_attributes(mut self, attributes: Value) -> Self {
        self.attributes = attributes;
        self
    }
}
