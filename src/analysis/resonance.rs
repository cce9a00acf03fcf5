//! Steady-state solver: resonance, impedance and the operating-point bundle.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::transfer::gain_db;
use super::{angular_frequency, MAX_Q, MIN_FREQUENCY, MIN_Q};
use crate::circuit::{EffectiveParameters, FilterPreset, Topology};

/// Resonance figures of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceResult {
    /// Resonance frequency (Hz)
    pub f0: f64,
    /// Quality factor (dimensionless)
    pub q: f64,
    /// −3 dB bandwidth, `f0 / q` (Hz)
    pub bandwidth: f64,
}

/// Compute f0, Q and bandwidth.
///
/// Q depends on the topology:
/// - Series:   `Q = (1/R)·√(L/C)`
/// - Parallel: `Q = R·√(C/L)`
///
/// The two are reciprocal for the same R, L, C. Q is kept inside
/// [`MIN_Q`, `MAX_Q`] so the bandwidth stays finite. The bounds are
/// reciprocal too (`MIN_Q · MAX_Q = 1`), so a series Q clamped at one end
/// pairs with a parallel Q clamped at the other and the product stays 1;
/// past the bounds Q and bandwidth no longer follow the formulas.
pub fn resonance(effective: &EffectiveParameters, topology: Topology) -> ResonanceResult {
    let EffectiveParameters {
        resistance: r,
        inductance: l,
        capacitance: c,
    } = *effective;

    let f0 = 1.0 / (2.0 * PI * (l * c).sqrt());

    let q = match topology {
        Topology::Series => (1.0 / r) * (l / c).sqrt(),
        Topology::Parallel => r * (c / l).sqrt(),
    };
    let q = if q.is_nan() { MIN_Q } else { q.clamp(MIN_Q, MAX_Q) };

    ResonanceResult {
        f0,
        q,
        bandwidth: f0 / q,
    }
}

/// Impedance of the whole circuit at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceResult {
    /// |Z| (ohms)
    pub magnitude: f64,
    /// arg(Z) (degrees)
    pub phase_degrees: f64,
}

/// Impedance seen by the source at `frequency` (Hz).
///
/// Frequencies below [`MIN_FREQUENCY`] are evaluated at the floor.
pub fn impedance_at(
    effective: &EffectiveParameters,
    topology: Topology,
    frequency: f64,
) -> ImpedanceResult {
    let (xl, xc) = reactances(effective, frequency);
    let r = effective.resistance;

    match topology {
        Topology::Series => {
            let x = xl - xc;
            ImpedanceResult {
                magnitude: r.hypot(x),
                phase_degrees: x.atan2(r).to_degrees(),
            }
        }
        Topology::Parallel => {
            let y_r = 1.0 / r;
            let y_l = 1.0 / xl;
            let y_c = 1.0 / xc;
            let b = y_c - y_l;
            ImpedanceResult {
                magnitude: 1.0 / y_r.hypot(b),
                phase_degrees: -b.atan2(y_r).to_degrees(),
            }
        }
    }
}

/// Inductive and capacitive reactance `(ωL, 1/(ωC))` at `frequency` (Hz).
pub fn reactances(effective: &EffectiveParameters, frequency: f64) -> (f64, f64) {
    let omega = angular_frequency(clamp_frequency(frequency));
    (
        omega * effective.inductance,
        1.0 / (omega * effective.capacitance),
    )
}

/// Apply the zero-frequency floor. NaN maps to the floor as well.
pub(crate) fn clamp_frequency(frequency: f64) -> f64 {
    frequency.max(MIN_FREQUENCY)
}

/// Readouts at the operating frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateResult {
    /// |Z| at the source frequency (ohms)
    pub impedance_magnitude: f64,
    /// arg(Z) at the source frequency (degrees)
    pub phase_degrees: f64,
    /// Gain of the active preset at the source frequency (dB)
    pub gain_db: f64,
}

/// Evaluate impedance and preset gain at `frequency` (Hz).
pub fn steady_state(
    effective: &EffectiveParameters,
    topology: Topology,
    resonance: &ResonanceResult,
    frequency: f64,
    preset: FilterPreset,
) -> SteadyStateResult {
    let impedance = impedance_at(effective, topology, frequency);
    let u = clamp_frequency(frequency) / resonance.f0;

    SteadyStateResult {
        impedance_magnitude: impedance.magnitude,
        phase_degrees: impedance.phase_degrees,
        gain_db: gain_db(u, resonance.q, preset),
    }
}
