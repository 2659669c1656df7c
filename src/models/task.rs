//! Task model.
//!
//! A task is a unit of work requested by clients and performed by workers.
//! It declares the skills it needs, the phases it would prefer to run in,
//! and how many copies may run at once.

use serde::{Deserialize, Serialize};

/// A task to be allocated.
///
/// # Phase Representation
/// Phases are positive integers shared with [`Worker::available_slots`](super::Worker).
/// The consumer defines what a phase means (e.g., a sprint, a shift, a week).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    /// Unique task identifier.
    #[serde(rename = "TaskID")]
    pub task_id: String,
    /// Human-readable name.
    pub task_name: String,
    /// Task category (for grouping and pattern rules).
    pub category: String,
    /// Number of phases the task occupies (>= 1).
    pub duration: i64,
    /// Skills a worker needs to take this task.
    pub required_skills: Vec<String>,
    /// Phases the task would prefer to run in.
    pub preferred_phases: Vec<i64>,
    /// Maximum parallel assignments (>= 1).
    pub max_concurrent: i64,
}

impl Task {
    /// Creates a new task with the given ID.
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: String::new(),
            category: String::new(),
            duration: 1,
            required_skills: Vec::new(),
            preferred_phases: Vec::new(),
            max_concurrent: 1,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.task_name = name.into();
        self
    }

    /// Sets the task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the duration in phases.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Sets the preferred phases.
    pub fn with_phases(mut self, phases: Vec<i64>) -> Self {
        self.preferred_phases = phases;
        self
    }

    /// Sets the concurrency cap.
    pub fn with_max_concurrent(mut self, max_concurrent: i64) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }
}
