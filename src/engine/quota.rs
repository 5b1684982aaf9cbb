use super::types::Quota;
use chrono::NaiveDate;

/// Répartition équitable : `total_days / n` chacun, le reste aux premiers de la liste.
pub fn quotas(staff_count: usize, total_days: usize) -> Vec<Quota> {
    if staff_count == 0 {
        return Vec::new();
    }
    let base = total_days / staff_count;
    let extra = total_days % staff_count;
    (0..staff_count)
        .map(|i| {
            let days = if i < extra { base + 1 } else { base };
            Quota {
                days,
                nights: days / 2,
            }
        })
        .collect()
}

/// Compteurs internes d'une personne pendant un run ; jetés à la fin.
#[derive(Debug, Clone)]
pub(super) struct Ledger {
    pub remaining_days: usize,
    pub remaining_nights: usize,
    worked: Vec<NaiveDate>,
}

impl Ledger {
    pub fn new(quota: Quota) -> Self {
        Self {
            remaining_days: quota.days,
            remaining_nights: quota.nights,
            worked: Vec::new(),
        }
    }

    /// Quota restant et repos respecté vis-à-vis de chaque date déjà posée.
    pub fn is_available(&self, date: NaiveDate, min_rest_days: u32) -> bool {
        if self.remaining_days == 0 {
            return false;
        }
        self.worked
            .iter()
            .all(|d| (date - *d).num_days().abs() > i64::from(min_rest_days))
    }

    pub fn record(&mut self, date: NaiveDate, night: bool) {
        self.remaining_days = self.remaining_days.saturating_sub(1);
        if night {
            self.remaining_nights = self.remaining_nights.saturating_sub(1);
        }
        self.worked.push(date);
    }
}
