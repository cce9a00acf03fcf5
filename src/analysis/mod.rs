//! Closed-form analysis of the RLC circuit.
//!
//! The pipeline runs in a fixed order on an immutable parameter snapshot:
//! - [`normalize`](crate::circuit::normalize): clamp values and fold parasitics in
//! - [`resonance`] and [`steady_state`]: f0, Q, bandwidth, impedance, gain
//! - [`waveform`]: time-domain input/output for the chosen excitation
//! - [`bode_sweep`] / [`nyquist_sweep`]: frequency-response samples
//!
//! Every function here is total: degenerate inputs are clamped to safe
//! floors and never produce NaN or infinity. [`Analyzer`] runs the whole
//! pipeline in one call.

mod analyzer;
mod phasor;
mod resonance;
mod sweep;
mod transfer;
mod waveform;

use std::f64::consts::PI;

pub use analyzer::{AnalysisConfig, AnalysisReport, Analyzer};
pub use phasor::{phasor_state, Phasor, PhasorState};
pub use resonance::{
    impedance_at, reactances, resonance, steady_state, ImpedanceResult, ResonanceResult,
    SteadyStateResult,
};
pub use sweep::{
    bode_sweep, harmonic_spectrum, nyquist_sweep, zoomed_decades, BodePoint, NyquistPoint,
    NyquistSweep, NYQUIST_START_HZ, NYQUIST_STOP_HZ,
};
pub use transfer::{bode_phase_degrees, gain_db, transfer_magnitude};
pub use waveform::{
    impulse_response, step_response, waveform, Damping, DampingRegime, SpectralLine, Waveform,
    WaveformSample, CRITICAL_DAMPING_TOLERANCE,
};

/// Frequencies below this are evaluated at this value (Hz).
pub const MIN_FREQUENCY: f64 = 0.01;

/// Linear gain floor, −200 dB.
pub const GAIN_FLOOR: f64 = 1e-10;

/// Quality factor bounds.
pub const MIN_Q: f64 = 1e-12;
pub const MAX_Q: f64 = 1e12;

/// Convert hertz to radians per second.
#[inline]
pub fn angular_frequency(frequency: f64) -> f64 {
    2.0 * PI * frequency
}
