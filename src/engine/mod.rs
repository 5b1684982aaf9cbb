//! Moteur d'affectation : répartition gloutonne randomisée, date par date.
//!
//! Le hasard est injecté (`R: Rng`) : un `StdRng` à graine fixe rend la sortie
//! reproductible.

mod quota;
mod types;

pub use quota::quotas;
pub use types::{AssignOptions, Quota};

use crate::model::{Assignment, ShiftType, Staff};
use chrono::NaiveDate;
use quota::Ledger;
use rand::seq::SliceRandom;
use rand::Rng;

/// Génère les affectations avec les options par défaut.
pub fn generate<R: Rng + ?Sized>(roster: &[Staff], dates: &[NaiveDate], rng: &mut R) -> Vec<Assignment> {
    generate_with(roster, dates, rng, AssignOptions::default())
}

/// Génère un lot d'affectations pour `dates`.
///
/// Les quotas sont des plafonds, pas des objectifs : une date sans personne
/// disponible reste sans affectation. Ni `roster` ni `dates` ne sont modifiés.
pub fn generate_with<R: Rng + ?Sized>(
    roster: &[Staff],
    dates: &[NaiveDate],
    rng: &mut R,
    opts: AssignOptions,
) -> Vec<Assignment> {
    if roster.is_empty() || dates.is_empty() {
        return Vec::new();
    }

    let mut ledgers: Vec<Ledger> = quotas(roster.len(), dates.len())
        .into_iter()
        .map(Ledger::new)
        .collect();

    let mut order = dates.to_vec();
    order.shuffle(rng);

    let night_p = opts.night_p();
    let mut out = Vec::with_capacity(order.len());

    for date in order {
        let available: Vec<usize> = ledgers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_available(date, opts.min_rest_days))
            .map(|(idx, _)| idx)
            .collect();

        let Some(&idx) = available.choose(rng) else {
            #[cfg(feature = "logging")]
            tracing::debug!(%date, "no staff available, date left unassigned");
            continue;
        };

        let ledger = &mut ledgers[idx];
        let night = ledger.remaining_nights > 0 && rng.gen_bool(night_p);
        ledger.record(date, night);

        let shift = if night { ShiftType::Night } else { ShiftType::Day };
        out.push(Assignment::new(roster[idx].id.clone(), date, shift));
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        staff = roster.len(),
        dates = dates.len(),
        assigned = out.len(),
        "generation done"
    );

    out
}
