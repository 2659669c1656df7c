//! Canonical allocation entities.
//!
//! Provides the fully-typed records that every uploaded row is normalized
//! into, independent of the header names or cell formatting of the source
//! spreadsheet.
//!
//! # Entity Kinds
//!
//! | Kind | Key | Cross-entity references |
//! |------|-----|-------------------------|
//! | Client | `ClientID` | `RequestedTaskIDs` → Task IDs |
//! | Worker | `WorkerID` | none |
//! | Task | `TaskID` | `RequiredSkills` → union of Worker skills |

mod client;
mod kind;
mod task;
mod worker;

pub use client::Client;
pub use kind::{EntityKind, RawRow};
pub use task::Task;
pub use worker::Worker;
