//! Preset transfer functions of the normalized second-order section.
//!
//! All presets share the resonant denominator
//! `D(u) = √((1 − u²)² + (u/Q)²)` with `u = f / f0`; only the numerator
//! changes. Above resonance both are divided by `u²` so very high
//! frequencies do not overflow.

use super::{GAIN_FLOOR, MIN_Q};
use crate::circuit::FilterPreset;

/// Linear magnitude |H(u)| of the given preset.
///
/// Never NaN for `u ≥ 0`; a NaN `u` yields 0.
pub fn transfer_magnitude(u: f64, q: f64, preset: FilterPreset) -> f64 {
    if u.is_nan() {
        return 0.0;
    }
    let u = u.max(0.0);
    let q = q.max(MIN_Q);

    let ratio = if u <= 1.0 {
        let denom = ((1.0 - u * u).powi(2) + (u / q).powi(2)).sqrt();
        let numer = match preset {
            FilterPreset::LowPass => 1.0,
            FilterPreset::HighPass => u * u,
            FilterPreset::BandPass => u / q,
            FilterPreset::Notch => (1.0 - u * u).abs(),
        };
        numer / denom
    } else {
        // Same ratio with numerator and denominator scaled by 1/u²
        let v = 1.0 / u;
        let v2 = v * v;
        let denom = ((v2 - 1.0).powi(2) + (v / q).powi(2)).sqrt();
        let numer = match preset {
            FilterPreset::LowPass => v2,
            FilterPreset::HighPass => 1.0,
            FilterPreset::BandPass => v / q,
            FilterPreset::Notch => (v2 - 1.0).abs(),
        };
        numer / denom
    };

    if ratio.is_nan() {
        0.0
    } else {
        ratio
    }
}

/// Gain of the preset in decibels, floored at `20·log10(GAIN_FLOOR)` (−200 dB).
pub fn gain_db(u: f64, q: f64, preset: FilterPreset) -> f64 {
    20.0 * transfer_magnitude(u, q, preset).max(GAIN_FLOOR).log10()
}

/// Bode phase `−atan2(Q·(u − 1/u), 1)` in degrees.
///
/// The same curve is used for every preset; it runs from +90° well below
/// resonance through 0° at u = 1 to −90° well above.
pub fn bode_phase_degrees(u: f64, q: f64) -> f64 {
    if u.is_nan() {
        return 0.0;
    }
    let q = q.max(MIN_Q);
    let u = u.max(0.0);
    let detuning = if u == 0.0 { f64::NEG_INFINITY } else { u - 1.0 / u };
    -(q * detuning).atan2(1.0).to_degrees()
}
