use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre du personnel planifiable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attributs fournis à la création (l'id et l'horodatage sont générés par le store).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStaff {
    pub name: String,
    pub department: Option<String>,
}

impl NewStaff {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            department: None,
        }
    }

    pub fn with_department<D: Into<String>>(mut self, department: D) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Type de garde. L'absence d'enregistrement signifie "repos".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Day,
    Night,
}

impl ShiftType {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Night => "night",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" | "jour" => Ok(ShiftType::Day),
            "night" | "n" | "nuit" => Ok(ShiftType::Night),
            other => Err(format!("unknown shift type: {other}")),
        }
    }
}

/// Clé composite (personne, date), comparée par valeur.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssignmentKey {
    pub staff_id: StaffId,
    pub date: NaiveDate,
}

impl AssignmentKey {
    pub fn new(staff_id: StaffId, date: NaiveDate) -> Self {
        Self { staff_id, date }
    }
}

/// Affectation d'une personne à une garde sur une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub shift: ShiftType,
}

impl Assignment {
    pub fn new(staff_id: StaffId, date: NaiveDate, shift: ShiftType) -> Self {
        Self {
            staff_id,
            date,
            shift,
        }
    }

    pub fn key(&self) -> AssignmentKey {
        AssignmentKey::new(self.staff_id.clone(), self.date)
    }
}
