//! Parameter normalization.
//!
//! Clamps raw element values to strictly positive floors and folds the
//! optional parasitics in, so every division downstream is well defined.

use serde::{Deserialize, Serialize};

use super::CircuitParameters;

/// Smallest resistance the engine works with (ohms).
pub const MIN_RESISTANCE: f64 = 1e-6;

/// Smallest inductance the engine works with (henries).
pub const MIN_INDUCTANCE: f64 = 1e-12;

/// Smallest capacitance the engine works with (farads).
pub const MIN_CAPACITANCE: f64 = 1e-12;

/// Element values actually used by the solver.
///
/// Invariant: every field is finite and at least its floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveParameters {
    /// Effective resistance (ohms)
    pub resistance: f64,
    /// Effective inductance (henries)
    pub inductance: f64,
    /// Effective capacitance (farads)
    pub capacitance: f64,
}

impl EffectiveParameters {
    /// Build effective parameters directly, applying the floors.
    pub fn new(resistance: f64, inductance: f64, capacitance: f64) -> Self {
        Self {
            resistance: floor(resistance, MIN_RESISTANCE),
            inductance: floor(inductance, MIN_INDUCTANCE),
            capacitance: floor(capacitance, MIN_CAPACITANCE),
        }
    }
}

/// Produce the effective parameter set for a snapshot. Never fails.
///
/// With parasitics enabled, both ESRs add to R and the capacitor ESL adds
/// to L; C is left unchanged.
pub fn normalize(params: &CircuitParameters) -> EffectiveParameters {
    let base = EffectiveParameters::new(params.resistance, params.inductance, params.capacitance);

    match &params.parasitics {
        Some(p) => EffectiveParameters {
            resistance: floor(
                base.resistance + non_negative(p.esr_capacitor) + non_negative(p.esr_inductor),
                MIN_RESISTANCE,
            ),
            inductance: floor(base.inductance + non_negative(p.esl_capacitor), MIN_INDUCTANCE),
            capacitance: base.capacitance,
        },
        None => base,
    }
}

/// `max(value, min)`, mapping NaN and infinities to `min`.
fn floor(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

fn non_negative(value: f64) -> f64 {
    floor(value, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Parasitics;

    #[test]
    fn test_values_above_floor_pass_through() {
        let eff = normalize(&CircuitParameters::new(100.0, 10e-3, 10e-6));
        assert_eq!(eff.resistance, 100.0);
        assert_eq!(eff.inductance, 10e-3);
        assert_eq!(eff.capacitance, 10e-6);
    }

    #[test]
    fn test_zero_values_clamp_to_floors() {
        let eff = normalize(&CircuitParameters::new(0.0, 0.0, 0.0));
        assert_eq!(eff.resistance, MIN_RESISTANCE);
        assert_eq!(eff.inductance, MIN_INDUCTANCE);
        assert_eq!(eff.capacitance, MIN_CAPACITANCE);
    }

    #[test]
    fn test_garbage_values_clamp_to_floors() {
        let eff = normalize(&CircuitParameters::new(-5.0, f64::NAN, f64::INFINITY));
        assert_eq!(eff.resistance, MIN_RESISTANCE);
        assert_eq!(eff.inductance, MIN_INDUCTANCE);
        assert_eq!(eff.capacitance, MIN_CAPACITANCE);
    }

    #[test]
    fn test_parasitics_fold_in() {
        let params = CircuitParameters::new(10.0, 1e-3, 1e-6)
            .with_parasitics(Parasitics::new(0.25, 2e-6, 0.5));
        let eff = normalize(&params);
        assert!((eff.resistance - 10.75).abs() < 1e-12);
        assert!((eff.inductance - 1.002e-3).abs() < 1e-15);
        assert_eq!(eff.capacitance, 1e-6);
    }

    #[test]
    fn test_parasitics_on_zero_resistance() {
        let params = CircuitParameters::new(0.0, 0.0, 1e-6)
            .with_parasitics(Parasitics::new(0.0, 0.0, 0.0));
        let eff = normalize(&params);
        assert_eq!(eff.resistance, MIN_RESISTANCE);
        assert_eq!(eff.inductance, MIN_INDUCTANCE);
    }
}
