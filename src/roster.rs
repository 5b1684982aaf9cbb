use crate::error::ValidationError;
use crate::model::{NewStaff, Staff, StaffId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Liste ordonnée (ordre d'insertion) du personnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterStore {
    staff: Vec<Staff>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une personne : id uuid v4 et horodatage UTC générés ici.
    pub fn add(&mut self, attrs: NewStaff) -> Result<Staff, ValidationError> {
        let name = attrs.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let department = attrs
            .department
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        let staff = Staff {
            id: StaffId::random(),
            name: name.to_owned(),
            department,
            created_at: Utc::now(),
        };
        self.staff.push(staff.clone());
        Ok(staff)
    }

    /// Retire la personne ; sans effet si absente. Renvoie l'enregistrement retiré.
    pub fn remove(&mut self, id: &StaffId) -> Option<Staff> {
        let pos = self.staff.iter().position(|s| &s.id == id)?;
        Some(self.staff.remove(pos))
    }

    pub fn exists(&self, id: &StaffId) -> bool {
        self.staff.iter().any(|s| &s.id == id)
    }

    pub fn get(&self, id: &StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }

    pub fn find_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn as_slice(&self) -> &[Staff] {
        &self.staff
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Staff> {
        self.staff.iter()
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }
}

impl<'a> IntoIterator for &'a RosterStore {
    type Item = &'a Staff;
    type IntoIter = std::slice::Iter<'a, Staff>;

    fn into_iter(self) -> Self::IntoIter {
        self.staff.iter()
    }
}
