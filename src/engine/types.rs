/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignOptions {
    /// Probabilité de tirer une nuit tant que le quota de nuits n'est pas épuisé.
    pub night_probability: f64,
    /// Écart minimal exclu entre deux gardes : un écart de `min_rest_days` jours ou moins est refusé.
    pub min_rest_days: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            night_probability: 0.4,
            min_rest_days: 1,
        }
    }
}

impl AssignOptions {
    /// Probabilité ramenée dans `[0, 1]` (NaN → 0).
    pub(super) fn night_p(&self) -> f64 {
        if self.night_probability.is_nan() {
            0.0
        } else {
            self.night_probability.clamp(0.0, 1.0)
        }
    }
}

/// Quotas d'une personne pour un run de génération.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Nombre maximal de gardes (jour + nuit).
    pub days: usize,
    /// Nombre maximal de nuits, pris sur `days`.
    pub nights: usize,
}
