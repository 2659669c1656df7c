//! Worker model.
//!
//! Workers are the resources tasks are allocated to. Each worker has a
//! skill set, the phases (slots) it is available in, and a per-phase load cap.

use serde::{Deserialize, Serialize};

/// A worker that can be allocated tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Worker {
    /// Unique worker identifier.
    #[serde(rename = "WorkerID")]
    pub worker_id: String,
    /// Human-readable name.
    pub worker_name: String,
    /// Skill tags (e.g., "coding", "ml").
    pub skills: Vec<String>,
    /// Phases the worker is available in.
    pub available_slots: Vec<i64>,
    /// Maximum number of tasks per phase (>= 1).
    pub max_load_per_phase: i64,
    /// Worker grouping label.
    pub worker_group: String,
    /// Qualification grade, free-form.
    pub qualification_level: String,
}

impl Worker {
    /// Creates a worker with the given ID and default fields.
    pub fn new(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_name: String::new(),
            skills: Vec::new(),
            available_slots: Vec::new(),
            max_load_per_phase: 1,
            worker_group: String::new(),
            qualification_level: String::new(),
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Adds a skill tag.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Sets the available slots.
    pub fn with_slots(mut self, slots: Vec<i64>) -> Self {
        self.available_slots = slots;
        self
    }

    /// Sets the per-phase load cap.
    pub fn with_max_load(mut self, max_load_per_phase: i64) -> Self {
        self.max_load_per_phase = max_load_per_phase;
        self
    }

    /// Sets the worker group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.worker_group = group.into();
        self
    }

    /// Sets the qualification level.
    pub fn with_qualification(mut self, level: impl Into<String>) -> Self {
        self.qualification_level = level.into();
        self
    }

    /// Whether this worker has a given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_builder() {
        let w = Worker::new("W1")
            .with_name("Ada")
            .with_skill("coding")
            .with_skill("ml")
            .with_slots(vec![1, 2, 3])
            .with_max_load(2)
            .with_group("GroupA")
            .with_qualification("senior");

        assert_eq!(w.worker_id, "W1");
        assert_eq!(w.worker_name, "Ada");
        assert!(w.has_skill("ml"));
        assert!(!w.has_skill("design"));
        assert_eq!(w.available_slots, vec![1, 2, 3]);
        assert_eq!(w.max_load_per_phase, 2);
        assert_eq!(w.worker_group, "GroupA");
        assert_eq!(w.qualification_level, "senior");
    }

    #[test]
    fn test_worker_headers() {
        let v = serde_json::to_value(Worker::new("W1")).unwrap();
        assert_eq!(v["WorkerID"], "W1");
        assert_eq!(v["MaxLoadPerPhase"], 1);
        assert!(v["AvailableSlots"].is_array());
    }
}
