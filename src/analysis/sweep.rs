//! Frequency-response sampler: Bode and Nyquist sweeps.

use serde::{Deserialize, Serialize};

use super::angular_frequency;
use super::transfer::{bode_phase_degrees, gain_db};
use super::waveform::{SpectralLine, Waveform};
use crate::circuit::{EffectiveParameters, FilterPreset};

/// Lower edge of the Nyquist sweep (Hz).
pub const NYQUIST_START_HZ: f64 = 10.0;

/// Upper edge of the Nyquist sweep (Hz).
pub const NYQUIST_STOP_HZ: f64 = 100e3;

/// Zoom factors outside this range are clamped.
pub const ZOOM_RANGE: (f64, f64) = (0.05, 100.0);

/// Bode window edges stay within 10^±this (Hz).
const MAX_LOG_FREQUENCY: f64 = 300.0;

/// One sample of a Bode sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodePoint {
    /// Frequency (Hz)
    pub frequency: f64,
    /// Preset gain (dB)
    pub magnitude_db: f64,
    /// Phase (degrees)
    pub phase_degrees: f64,
}

/// Log-spaced Bode sweep centered on `f0`, `decades` wide.
///
/// Returns an empty sweep when `f0` is not a positive finite frequency,
/// when `decades` is not positive, or when `points` is zero. A window
/// reaching past 1e±300 Hz is narrowed symmetrically so every frequency
/// stays finite and positive.
pub fn bode_sweep(
    f0: f64,
    q: f64,
    preset: FilterPreset,
    decades: f64,
    points: usize,
) -> Vec<BodePoint> {
    if !(f0.is_finite() && f0 > 0.0) || !(decades.is_finite() && decades > 0.0) || points == 0 {
        log::warn!("degenerate bode sweep request: f0={f0}, decades={decades}, points={points}");
        return Vec::new();
    }

    let log_f0 = f0.log10();
    let half = (decades / 2.0)
        .min(MAX_LOG_FREQUENCY - log_f0)
        .min(MAX_LOG_FREQUENCY + log_f0)
        .max(0.0);
    if half < decades / 2.0 {
        log::warn!("bode window of {decades} decades narrowed to {} around {f0} Hz", 2.0 * half);
    }

    let sweep: Vec<BodePoint> = log_grid(log_f0 - half, log_f0 + half, points)
        .into_iter()
        .map(|frequency| {
            let u = frequency / f0;
            BodePoint {
                frequency,
                magnitude_db: gain_db(u, q, preset),
                phase_degrees: bode_phase_degrees(u, q),
            }
        })
        .collect();

    log::trace!("bode sweep: {} points over {decades} decades around {f0} Hz", sweep.len());
    sweep
}

/// Width in decades of the Bode window at a zoom factor.
///
/// Larger zoom means a narrower window. Non-finite zoom is treated as 1.
pub fn zoomed_decades(base_decades: f64, zoom: f64) -> f64 {
    let zoom = if zoom.is_finite() { zoom } else { 1.0 };
    base_decades / zoom.clamp(ZOOM_RANGE.0, ZOOM_RANGE.1)
}

/// One sample of the series impedance in the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NyquistPoint {
    /// Frequency (Hz)
    pub frequency: f64,
    /// Re(Z) (ohms)
    pub real: f64,
    /// Im(Z) (ohms)
    pub imaginary: f64,
}

/// Nyquist sweep plus the largest |Z| it saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NyquistSweep {
    pub points: Vec<NyquistPoint>,
    pub max_magnitude: f64,
}

impl NyquistSweep {
    /// Display scale that maps `max_magnitude` onto `half_extent`.
    pub fn scale_for(&self, half_extent: f64) -> f64 {
        if self.max_magnitude > 0.0 && self.max_magnitude.is_finite() {
            half_extent / self.max_magnitude
        } else {
            0.0
        }
    }
}

/// Walk [`NYQUIST_START_HZ`, `NYQUIST_STOP_HZ`] and record the raw series
/// impedance `R + j(ωL − 1/(ωC))`.
pub fn nyquist_sweep(effective: &EffectiveParameters, points: usize) -> NyquistSweep {
    let mut max_magnitude: f64 = 0.0;
    let points: Vec<NyquistPoint> = logspace(NYQUIST_START_HZ, NYQUIST_STOP_HZ, points)
        .into_iter()
        .map(|frequency| {
            let omega = angular_frequency(frequency);
            let real = effective.resistance;
            let imaginary = omega * effective.inductance - 1.0 / (omega * effective.capacitance);
            max_magnitude = max_magnitude.max(real.hypot(imaginary));
            NyquistPoint {
                frequency,
                real,
                imaginary,
            }
        })
        .collect();

    log::trace!("nyquist sweep: {} points, max |Z| = {max_magnitude}", points.len());
    NyquistSweep {
        points,
        max_magnitude,
    }
}

/// Harmonic lines of a periodic waveform (the discrete spectrum view).
pub fn harmonic_spectrum(waveform: &Waveform) -> Vec<SpectralLine> {
    waveform.spectrum()
}

/// `n` logarithmically spaced samples from `start` to `stop`, both > 0.
fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    log_grid(start.log10(), stop.log10(), n)
}

/// `n` samples `10^x` with `x` evenly spaced from `log_start` to `log_stop`.
fn log_grid(log_start: f64, log_stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![10f64.powf(log_start)],
        _ => {
            let step = (log_stop - log_start) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as f64))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_logspace_endpoints() {
        let f = logspace(10.0, 1e5, 5);
        assert_eq!(f.len(), 5);
        assert_relative_eq!(f[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(f[2], 1e3, max_relative = 1e-12);
        assert_relative_eq!(f[4], 1e5, max_relative = 1e-12);
        assert_eq!(logspace(1.0, 2.0, 1), vec![1.0]);
        assert!(logspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_bode_sweep_centered_on_f0() {
        let sweep = bode_sweep(1000.0, 2.0, FilterPreset::LowPass, 4.0, 201);
        assert_eq!(sweep.len(), 201);
        assert_relative_eq!(sweep[0].frequency, 10.0, max_relative = 1e-9);
        assert_relative_eq!(sweep[100].frequency, 1000.0, max_relative = 1e-9);
        assert_relative_eq!(sweep[200].frequency, 1e5, max_relative = 1e-9);
        assert_relative_eq!(sweep[100].magnitude_db, 20.0 * 2f64.log10(), epsilon = 1e-9);
        assert!(sweep[100].phase_degrees.abs() < 1e-9);
    }

    #[test]
    fn test_bode_sweep_is_monotonic_in_frequency() {
        let sweep = bode_sweep(503.0, 0.3, FilterPreset::Notch, 2.0, 50);
        assert!(sweep.windows(2).all(|w| w[1].frequency > w[0].frequency));
        assert!(sweep.iter().all(|p| p.magnitude_db.is_finite() && p.phase_degrees.is_finite()));
    }

    #[test]
    fn test_bode_sweep_degenerate_inputs() {
        assert!(bode_sweep(0.0, 1.0, FilterPreset::LowPass, 4.0, 100).is_empty());
        assert!(bode_sweep(-5.0, 1.0, FilterPreset::LowPass, 4.0, 100).is_empty());
        assert!(bode_sweep(f64::NAN, 1.0, FilterPreset::LowPass, 4.0, 100).is_empty());
        assert!(bode_sweep(f64::INFINITY, 1.0, FilterPreset::LowPass, 4.0, 100).is_empty());
        assert!(bode_sweep(100.0, 1.0, FilterPreset::LowPass, 4.0, 0).is_empty());
        assert!(bode_sweep(100.0, 1.0, FilterPreset::LowPass, 0.0, 10).is_empty());
    }

    #[test]
    fn test_bode_sweep_huge_window_stays_finite() {
        for decades in [616.0, 700.0, 1e6, f64::MAX] {
            let sweep = bode_sweep(1000.0, 1.0, FilterPreset::LowPass, decades, 5);
            assert_eq!(sweep.len(), 5);
            assert!(sweep.iter().all(|p| p.frequency.is_finite() && p.frequency > 0.0));
            assert!(sweep.iter().all(|p| p.magnitude_db.is_finite() && p.phase_degrees.is_finite()));
            assert!(sweep.windows(2).all(|w| w[1].frequency > w[0].frequency));
            assert_relative_eq!(sweep[2].frequency, 1000.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_bode_sweep_extreme_f0_stays_finite() {
        for f0 in [1e-305, 1e305] {
            let sweep = bode_sweep(f0, 1.0, FilterPreset::BandPass, 4.0, 3);
            assert!(sweep.iter().all(|p| p.frequency.is_finite() && p.frequency > 0.0));
            assert!(sweep.iter().all(|p| p.magnitude_db.is_finite()));
        }
    }

    #[test]
    fn test_zoom_narrows_window() {
        assert_eq!(zoomed_decades(4.0, 1.0), 4.0);
        assert_eq!(zoomed_decades(4.0, 2.0), 2.0);
        assert_eq!(zoomed_decades(4.0, 1e6), 0.04);
        assert_eq!(zoomed_decades(4.0, 0.0), 80.0);
        assert_eq!(zoomed_decades(4.0, f64::NAN), 4.0);
    }

    #[test]
    fn test_nyquist_sweep_values() {
        let eff = EffectiveParameters::new(100.0, 10e-3, 10e-6);
        let sweep = nyquist_sweep(&eff, 200);
        assert_eq!(sweep.points.len(), 200);
        assert_relative_eq!(sweep.points[0].frequency, NYQUIST_START_HZ, max_relative = 1e-12);
        assert_relative_eq!(sweep.points[199].frequency, NYQUIST_STOP_HZ, max_relative = 1e-12);
        assert!(sweep.points.iter().all(|p| p.real == 100.0));
        // Capacitive at the low end, inductive at the high end
        assert!(sweep.points[0].imaginary < 0.0);
        assert!(sweep.points[199].imaginary > 0.0);

        let observed = sweep
            .points
            .iter()
            .map(|p| p.real.hypot(p.imaginary))
            .fold(0.0, f64::max);
        assert_eq!(sweep.max_magnitude, observed);
    }

    #[test]
    fn test_nyquist_scale() {
        let eff = EffectiveParameters::new(100.0, 10e-3, 10e-6);
        let sweep = nyquist_sweep(&eff, 50);
        assert_relative_eq!(sweep.scale_for(150.0) * sweep.max_magnitude, 150.0, max_relative = 1e-12);

        let empty = nyquist_sweep(&eff, 0);
        assert!(empty.points.is_empty());
        assert_eq!(empty.scale_for(150.0), 0.0);
    }
}
