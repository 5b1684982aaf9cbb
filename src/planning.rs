use crate::calendar::DateRange;
use crate::engine::{self, AssignOptions};
use crate::error::PlanningError;
use crate::model::{AssignmentKey, NewStaff, ShiftType, Staff, StaffId};
use crate::roster::RosterStore;
use crate::schedule::ScheduleStore;
use chrono::NaiveDate;
use rand::Rng;

/// Événement émis après chaque mutation réussie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    StaffAdded(StaffId),
    /// Retrait d'une personne et de ses `cascaded` affectations.
    StaffRemoved { id: StaffId, cascaded: usize },
    AssignmentSet(AssignmentKey, ShiftType),
    AssignmentCleared(AssignmentKey),
    RangeReplaced { range: DateRange, inserted: usize },
}

impl Mutation {
    pub fn touches_roster(&self) -> bool {
        matches!(self, Mutation::StaffAdded(_) | Mutation::StaffRemoved { .. })
    }

    pub fn touches_schedule(&self) -> bool {
        match self {
            Mutation::StaffAdded(_) => false,
            Mutation::StaffRemoved { cascaded, .. } => *cascaded > 0,
            _ => true,
        }
    }
}

/// Point d'extension : l'hôte décide quoi faire (persistance, log, UI...).
pub trait MutationListener {
    fn on_mutation(
        &mut self,
        event: &Mutation,
        roster: &RosterStore,
        schedule: &ScheduleStore,
    ) -> anyhow::Result<()>;
}

/// Résultat d'une régénération de période.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regeneration {
    pub assigned: usize,
    /// Dates restées sans personne (repos/quotas incompatibles).
    pub unassigned: Vec<NaiveDate>,
}

/// Planning : possède le personnel et les affectations.
#[derive(Default)]
pub struct Planning {
    roster: RosterStore,
    schedule: ScheduleStore,
    listeners: Vec<Box<dyn MutationListener>>,
}

impl Planning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(roster: RosterStore, schedule: ScheduleStore) -> Self {
        Self {
            roster,
            schedule,
            listeners: Vec::new(),
        }
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn schedule(&self) -> &ScheduleStore {
        &self.schedule
    }

    pub fn subscribe<L: MutationListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_staff(&mut self, attrs: NewStaff) -> Result<Staff, PlanningError> {
        let staff = self.roster.add(attrs)?;
        #[cfg(feature = "logging")]
        tracing::info!(id = %staff.id, name = %staff.name, "staff added");
        self.emit(Mutation::StaffAdded(staff.id.clone()))?;
        Ok(staff)
    }

    /// Retire la personne et toutes ses affectations. Sans effet si absente.
    pub fn remove_staff(&mut self, id: &StaffId) -> Result<Option<Staff>, PlanningError> {
        let Some(staff) = self.roster.remove(id) else {
            return Ok(None);
        };
        let cascaded = self.schedule.remove_by_staff(id);
        #[cfg(feature = "logging")]
        tracing::info!(%id, cascaded, "staff removed");
        self.emit(Mutation::StaffRemoved {
            id: id.clone(),
            cascaded,
        })?;
        Ok(Some(staff))
    }

    pub fn upsert(&mut self, staff_id: &StaffId, date: NaiveDate, shift: ShiftType) -> Result<(), PlanningError> {
        let previous = self.schedule.upsert(staff_id.clone(), date, shift);
        if previous == Some(shift) {
            return Ok(());
        }
        self.emit(Mutation::AssignmentSet(AssignmentKey::new(staff_id.clone(), date), shift))
    }

    pub fn clear(&mut self, staff_id: &StaffId, date: NaiveDate) -> Result<(), PlanningError> {
        if self.schedule.clear(staff_id, date).is_none() {
            return Ok(());
        }
        self.emit(Mutation::AssignmentCleared(AssignmentKey::new(staff_id.clone(), date)))
    }

    /// Bascule d'une case : renvoie la valeur finale.
    pub fn toggle(
        &mut self,
        staff_id: &StaffId,
        date: NaiveDate,
        shift: ShiftType,
    ) -> Result<Option<ShiftType>, PlanningError> {
        let key = AssignmentKey::new(staff_id.clone(), date);
        let now = self.schedule.toggle(staff_id.clone(), date, shift);
        let event = match now {
            Some(shift) => Mutation::AssignmentSet(key, shift),
            None => Mutation::AssignmentCleared(key),
        };
        self.emit(event)?;
        Ok(now)
    }

    /// Génère la période avec le moteur puis remplace son contenu dans le store.
    /// Roster vide : rien n'est généré ni remplacé.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        range: DateRange,
        rng: &mut R,
        opts: AssignOptions,
    ) -> Result<Regeneration, PlanningError> {
        let dates = range.days();
        if self.roster.is_empty() {
            return Ok(Regeneration {
                assigned: 0,
                unassigned: dates,
            });
        }

        let batch = engine::generate_with(self.roster.as_slice(), &dates, rng, opts);
        let unassigned: Vec<NaiveDate> = dates
            .into_iter()
            .filter(|d| !batch.iter().any(|a| a.date == *d))
            .collect();

        let inserted = self.schedule.replace_range(&range, batch)?;
        #[cfg(feature = "logging")]
        tracing::info!(%range, inserted, unassigned = unassigned.len(), "range regenerated");
        self.emit(Mutation::RangeReplaced { range, inserted })?;
        Ok(Regeneration {
            assigned: inserted,
            unassigned,
        })
    }

    fn emit(&mut self, event: Mutation) -> Result<(), PlanningError> {
        for listener in self.listeners.iter_mut() {
            listener.on_mutation(&event, &self.roster, &self.schedule)?;
        }
        Ok(())
    }
}
