use crate::model::StaffId;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("staff name cannot be empty")]
    EmptyName,
    #[error("duplicate assignment for staff {staff} on {date}")]
    DuplicateKey { staff: StaffId, date: NaiveDate },
    #[error("assignment date {date} outside of target range")]
    OutOfRange { date: NaiveDate },
}

#[derive(Error, Debug)]
pub enum PlanningError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// La mutation est appliquée en mémoire, mais un listener a échoué.
    #[error("mutation listener failed: {0}")]
    Listener(#[from] anyhow::Error),
}
