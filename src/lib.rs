#![forbid(unsafe_code)]
//! Gardes — bibliothèque de répartition des gardes jour/nuit (sans BD).
//!
//! - Stockage clé → blob (fichiers JSON), export CSV.
//! - Génération équitable randomisée, hasard injectable et reproductible.
//! - Repos minimal d'un jour plein entre deux gardes.
//! - Dates calendaires pures (`NaiveDate`), aucun fuseau horaire.

pub mod calendar;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod planning;
pub mod roster;
pub mod schedule;
pub mod storage;

pub use calendar::{dates_in_month, dates_in_week, DateRange};
pub use engine::{generate, generate_with, quotas, AssignOptions, Quota};
pub use error::{PlanningError, ValidationError};
pub use model::{Assignment, AssignmentKey, NewStaff, ShiftType, Staff, StaffId};
pub use planning::{Mutation, MutationListener, Planning, Regeneration};
pub use roster::RosterStore;
pub use schedule::{ScheduleStore, ShiftTally};
pub use storage::{BlobStore, DirBlobStore, MemoryBlobStore, PersistListener};
