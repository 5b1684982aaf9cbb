//! Fonctions calendaires pures : jours d'un mois, semaine dimanche → samedi.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;

/// Tous les jours du mois contenant `anchor`, du premier au dernier inclus.
pub fn dates_in_month(anchor: NaiveDate) -> Vec<NaiveDate> {
    DateRange::month(anchor).days()
}

/// Les 7 jours (dimanche → samedi) de la semaine contenant `anchor`.
pub fn dates_in_week(anchor: NaiveDate) -> Vec<NaiveDate> {
    DateRange::week(anchor).days()
}

/// Intervalle de dates inclusif `[first, last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateRange {
    /// Construit un intervalle ; les bornes sont remises dans l'ordre si besoin.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    pub fn month(anchor: NaiveDate) -> Self {
        let first = anchor.with_day(1).unwrap_or(anchor);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { first, last }
    }

    pub fn week(anchor: NaiveDate) -> Self {
        let offset = u64::from(anchor.weekday().num_days_from_sunday());
        let first = anchor.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
        let last = first.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        Self { first, last }
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn len(&self) -> usize {
        // first <= last garanti par les constructeurs
        (self.last - self.first).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.first.iter_days().take(self.len()).collect()
    }

    /// Semaine précédente/suivante (décalage de 7 jours).
    pub fn shift_weeks(&self, weeks: i64) -> Self {
        let moved = chrono::Duration::try_days(weeks.saturating_mul(7))
            .and_then(|delta| self.first.checked_add_signed(delta))
            .unwrap_or(if weeks < 0 { NaiveDate::MIN } else { NaiveDate::MAX });
        Self::week(moved)
    }

    /// Mois précédent/suivant du mois contenant `first`.
    pub fn shift_months(&self, months: i32) -> Self {
        let anchor = self.first.with_day(1).unwrap_or(self.first);
        let moved = if months >= 0 {
            anchor.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            anchor.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        Self::month(moved.unwrap_or(anchor))
    }

    /// Libellé court, p. ex. `Oct 19 - Oct 25, 2025`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.first.format("%b %-d"),
            self.last.format("%b %-d, %Y")
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}
