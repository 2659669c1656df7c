//! Entity kinds and the raw row shape they are parsed from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw spreadsheet row: arbitrary header → untyped cell value.
///
/// This is the shape produced by CSV/XLSX parsing, independent of file format.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// The three entity collections of an allocation dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Worker,
    Task,
}

impl EntityKind {
    /// All kinds, in upload order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Client, EntityKind::Worker, EntityKind::Task];

    /// Canonical column headers, in export order.
    pub fn canonical_headers(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Client => &[
                "ClientID",
                "ClientName",
                "PriorityLevel",
                "RequestedTaskIDs",
                "GroupTag",
                "AttributesJSON",
            ],
            EntityKind::Worker => &[
                "WorkerID",
                "WorkerName",
                "Skills",
                "AvailableSlots",
                "MaxLoadPerPhase",
                "WorkerGroup",
                "QualificationLevel",
            ],
            EntityKind::Task => &[
                "TaskID",
                "TaskName",
                "Category",
                "Duration",
                "RequiredSkills",
                "PreferredPhases",
                "MaxConcurrent",
            ],
        }
    }

    /// The identifier column of this kind.
    pub fn id_column(&self) -> &'static str {
        self.canonical_headers()[0]
    }

    /// Whether `column` is one of this kind's canonical headers.
    pub fn has_column(&self, column: &str) -> bool {
        self.canonical_headers().contains(&column)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Worker => "worker",
            EntityKind::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
