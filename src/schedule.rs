use crate::calendar::DateRange;
use crate::error::ValidationError;
use crate::model::{Assignment, AssignmentKey, ShiftType, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Ensemble des affectations, indexé par (personne, date).
///
/// Une clé absente veut dire "repos" : il n'existe pas d'enregistrement explicite
/// pour un jour off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Assignment>", into = "Vec<Assignment>")]
pub struct ScheduleStore {
    records: BTreeMap<AssignmentKey, ShiftType>,
}

/// Compteurs jour/nuit d'une personne sur une période.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftTally {
    pub day: usize,
    pub night: usize,
}

impl ShiftTally {
    pub fn total(&self) -> usize {
        self.day + self.night
    }
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insère ou remplace ; renvoie l'ancienne valeur éventuelle.
    pub fn upsert(&mut self, staff_id: StaffId, date: NaiveDate, shift: ShiftType) -> Option<ShiftType> {
        self.records.insert(AssignmentKey::new(staff_id, date), shift)
    }

    /// Retire l'affectation si présente (no-op sinon).
    pub fn clear(&mut self, staff_id: &StaffId, date: NaiveDate) -> Option<ShiftType> {
        self.records.remove(&AssignmentKey::new(staff_id.clone(), date))
    }

    /// Re-sélectionner la garde déjà posée libère la case ; sinon upsert.
    /// Renvoie la valeur finale de la case.
    pub fn toggle(&mut self, staff_id: StaffId, date: NaiveDate, shift: ShiftType) -> Option<ShiftType> {
        let key = AssignmentKey::new(staff_id, date);
        if self.records.get(&key) == Some(&shift) {
            self.records.remove(&key);
            None
        } else {
            self.records.insert(key, shift);
            Some(shift)
        }
    }

    /// Supprime toutes les affectations de la personne ; renvoie le nombre retiré.
    pub fn remove_by_staff(&mut self, staff_id: &StaffId) -> usize {
        let before = self.records.len();
        self.records.retain(|key, _| &key.staff_id != staff_id);
        before - self.records.len()
    }

    pub fn find(&self, staff_id: &StaffId, date: NaiveDate) -> Option<ShiftType> {
        self.records
            .get(&AssignmentKey::new(staff_id.clone(), date))
            .copied()
    }

    /// Remplace atomiquement le contenu d'une période.
    ///
    /// Toutes les affectations datées dans `range` (quelle que soit la personne) sont
    /// retirées puis `new_records` inséré. Le lot est validé avant toute mutation :
    /// en cas d'erreur le store est inchangé.
    pub fn replace_range(
        &mut self,
        range: &DateRange,
        new_records: Vec<Assignment>,
    ) -> Result<usize, ValidationError> {
        let mut seen = HashSet::with_capacity(new_records.len());
        for rec in &new_records {
            if !range.contains(rec.date) {
                return Err(ValidationError::OutOfRange { date: rec.date });
            }
            if !seen.insert(rec.key()) {
                return Err(ValidationError::DuplicateKey {
                    staff: rec.staff_id.clone(),
                    date: rec.date,
                });
            }
        }

        self.records.retain(|key, _| !range.contains(key.date));
        let inserted = new_records.len();
        for rec in new_records {
            self.records.insert(AssignmentKey::new(rec.staff_id, rec.date), rec.shift);
        }
        Ok(inserted)
    }

    /// Affectations d'une période, triées par date puis personne.
    pub fn in_range(&self, range: &DateRange) -> Vec<Assignment> {
        let mut out: Vec<Assignment> = self
            .iter()
            .filter(|a| range.contains(a.date))
            .collect();
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.staff_id.cmp(&b.staff_id)));
        out
    }

    pub fn for_staff<'a>(&'a self, staff_id: &'a StaffId) -> impl Iterator<Item = Assignment> + 'a {
        self.iter().filter(move |a| &a.staff_id == staff_id)
    }

    /// Compte les gardes jour/nuit par personne sur la période.
    pub fn tally(&self, range: &DateRange) -> BTreeMap<StaffId, ShiftTally> {
        let mut out: BTreeMap<StaffId, ShiftTally> = BTreeMap::new();
        for (key, shift) in &self.records {
            if !range.contains(key.date) {
                continue;
            }
            let entry = out.entry(key.staff_id.clone()).or_default();
            match shift {
                ShiftType::Day => entry.day += 1,
                ShiftType::Night => entry.night += 1,
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.records
            .iter()
            .map(|(key, shift)| Assignment::new(key.staff_id.clone(), key.date, *shift))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<Assignment>> for ScheduleStore {
    type Error = ValidationError;

    fn try_from(records: Vec<Assignment>) -> Result<Self, Self::Error> {
        let mut store = ScheduleStore::new();
        for rec in records {
            let key = rec.key();
            if store.records.contains_key(&key) {
                return Err(ValidationError::DuplicateKey {
                    staff: rec.staff_id,
                    date: rec.date,
                });
            }
            store.records.insert(key, rec.shift);
        }
        Ok(store)
    }
}

impl From<ScheduleStore> for Vec<Assignment> {
    fn from(store: ScheduleStore) -> Self {
        store
            .records
            .into_iter()
            .map(|(key, shift)| Assignment::new(key.staff_id, key.date, shift))
            .collect()
    }
}
