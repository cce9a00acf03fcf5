//! Time-domain synthesizer.
//!
//! Produces closed-form input/output waveforms for the four excitation
//! types. Sine and square outputs use the series R-divider response
//! `R / Z(nω)` at each harmonic, whatever the topology or preset; step and
//! impulse outputs use the second-order response selected by the damping
//! regime. A [`Waveform`] holds only precomputed coefficients, so sampling
//! it is pure and may happen in any order.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::resonance::{clamp_frequency, impedance_at, ResonanceResult};
use super::angular_frequency;
use crate::circuit::{EffectiveParameters, SignalType, Topology};

/// Half-width of the ζ band treated as critically damped.
pub const CRITICAL_DAMPING_TOLERANCE: f64 = 1e-4;

/// Odd harmonics summed for the square wave.
pub const SQUARE_HARMONICS: [u32; 5] = [1, 3, 5, 7, 9];

/// Impulse input is drawn as a pulse lasting this fraction of a resonance period.
pub const IMPULSE_WIDTH_PERIODS: f64 = 0.01;

/// Damping regime of the second-order response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DampingRegime {
    /// ζ < 1 − tolerance: decaying oscillation
    Underdamped,
    /// ζ within the tolerance band around 1
    Critical,
    /// ζ > 1 + tolerance: two real decaying exponentials
    Overdamped,
}

impl DampingRegime {
    /// Classify a damping ratio.
    pub fn classify(zeta: f64) -> Self {
        if zeta < 1.0 - CRITICAL_DAMPING_TOLERANCE {
            Self::Underdamped
        } else if zeta > 1.0 + CRITICAL_DAMPING_TOLERANCE {
            Self::Overdamped
        } else {
            Self::Critical
        }
    }
}

/// Natural frequency, decay rate and damping ratio of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damping {
    /// Undamped natural frequency ω0 (rad/s)
    pub omega0: f64,
    /// Neper frequency α = R / 2L (1/s)
    pub alpha: f64,
    /// Damping ratio ζ = α / ω0
    pub zeta: f64,
    /// Regime selected from ζ
    pub regime: DampingRegime,
}

impl Damping {
    /// Derive damping terms from effective parameters and their resonance.
    pub fn new(effective: &EffectiveParameters, resonance: &ResonanceResult) -> Self {
        let omega0 = angular_frequency(resonance.f0);
        let alpha = effective.resistance / (2.0 * effective.inductance);
        let zeta = alpha / omega0;
        Self {
            omega0,
            alpha,
            zeta,
            regime: DampingRegime::classify(zeta),
        }
    }

    /// Damped oscillation frequency ωd = ω0·√(1 − ζ²), zero unless underdamped.
    pub fn damped_frequency(&self) -> f64 {
        let w = self.omega0;
        let a = self.alpha;
        if a < w {
            ((w - a) * (w + a)).sqrt()
        } else {
            0.0
        }
    }

    /// Real roots `(s1, s2)` of the overdamped characteristic equation,
    /// `s1` being the slow one. Both are computed without cancellation.
    fn overdamped_roots(&self) -> (f64, f64) {
        let w = self.omega0;
        let a = self.alpha;
        let disc = ((a - w) * (a + w)).sqrt();
        let fast = -(a + disc);
        let slow = w * (w / fast);
        (slow, fast)
    }

    /// Time constant of the slowest decaying term (s).
    pub fn slowest_time_constant(&self) -> f64 {
        match self.regime {
            DampingRegime::Overdamped => {
                let (slow, _) = self.overdamped_roots();
                1.0 / slow.abs()
            }
            _ => 1.0 / self.alpha,
        }
    }
}

/// One sinusoidal component of a periodic excitation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Harmonic {
    order: u32,
    omega: f64,
    /// Input amplitude relative to the source amplitude
    weight: f64,
    /// Divider gain R / |Z(nω)|
    gain: f64,
    /// Impedance phase at nω (radians)
    phase: f64,
}

impl Harmonic {
    fn new(effective: &EffectiveParameters, base_frequency: f64, order: u32, weight: f64) -> Self {
        let frequency = base_frequency * order as f64;
        let z = impedance_at(effective, Topology::Series, frequency);
        Self {
            order,
            omega: angular_frequency(frequency),
            weight,
            gain: effective.resistance / z.magnitude,
            phase: z.phase_degrees.to_radians(),
        }
    }

    fn input(&self, t: f64) -> f64 {
        self.weight * (self.omega * t).sin()
    }

    fn output(&self, t: f64) -> f64 {
        self.weight * self.gain * (self.omega * t - self.phase).sin()
    }
}

/// A line of the harmonic spectrum of a periodic excitation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralLine {
    /// Frequency (Hz)
    pub frequency: f64,
    /// Input amplitude (V)
    pub input_amplitude: f64,
    /// Output amplitude (V)
    pub output_amplitude: f64,
}

/// A sampled instant of a waveform pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSample {
    /// Time (s)
    pub time: f64,
    /// Input voltage (V)
    pub input: f64,
    /// Output voltage (V)
    pub output: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Sine(Harmonic),
    Square([Harmonic; SQUARE_HARMONICS.len()]),
    Step,
    Impulse { pulse_width: f64 },
}

/// Closed-form input/output pair for one excitation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    shape: Shape,
    amplitude: f64,
    inductance: f64,
    source_frequency: f64,
    damping: Damping,
}

/// Build the waveform pair for an excitation.
///
/// `source_frequency` drives the sine and square shapes and is floored like
/// every other frequency input; step and impulse ignore it.
pub fn waveform(
    effective: &EffectiveParameters,
    signal_type: SignalType,
    amplitude: f64,
    source_frequency: f64,
    resonance: &ResonanceResult,
) -> Waveform {
    let source_frequency = clamp_frequency(source_frequency);
    let damping = Damping::new(effective, resonance);

    let shape = match signal_type {
        SignalType::Sine => Shape::Sine(Harmonic::new(effective, source_frequency, 1, 1.0)),
        SignalType::Square => Shape::Square(SQUARE_HARMONICS.map(|n| {
            Harmonic::new(effective, source_frequency, n, 4.0 / (n as f64 * PI))
        })),
        SignalType::Step => Shape::Step,
        SignalType::Impulse => Shape::Impulse {
            pulse_width: IMPULSE_WIDTH_PERIODS / resonance.f0,
        },
    };

    Waveform {
        shape,
        amplitude: if amplitude.is_finite() { amplitude } else { 0.0 },
        inductance: effective.inductance,
        source_frequency,
        damping,
    }
}

impl Waveform {
    /// Damping terms the step and impulse responses are built from.
    pub fn damping(&self) -> &Damping {
        &self.damping
    }

    /// Excitation voltage at time `t` (s).
    pub fn input(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return match self.shape {
                Shape::Step if t > 0.0 => self.amplitude,
                _ => 0.0,
            };
        }

        let a = self.amplitude;
        match &self.shape {
            Shape::Sine(h) => a * h.input(t),
            Shape::Square(harmonics) => a * harmonics.iter().map(|h| h.input(t)).sum::<f64>(),
            Shape::Step => {
                if t < 0.0 {
                    0.0
                } else {
                    a
                }
            }
            Shape::Impulse { pulse_width } => {
                if (0.0..*pulse_width).contains(&t) {
                    a
                } else {
                    0.0
                }
            }
        }
    }

    /// Response voltage at time `t` (s).
    pub fn output(&self, t: f64) -> f64 {
        if !t.is_finite() {
            return match self.shape {
                Shape::Step if t > 0.0 => self.amplitude,
                _ => 0.0,
            };
        }

        let a = self.amplitude;
        match &self.shape {
            Shape::Sine(h) => a * h.output(t),
            Shape::Square(harmonics) => a * harmonics.iter().map(|h| h.output(t)).sum::<f64>(),
            Shape::Step => {
                if t < 0.0 {
                    0.0
                } else {
                    a * step_response(&self.damping, t)
                }
            }
            Shape::Impulse { .. } => {
                if t <= 0.0 {
                    0.0
                } else {
                    a * impulse_response(&self.damping, self.inductance, t)
                }
            }
        }
    }

    /// Sample both signals at `n` evenly spaced instants in `[start, end]`.
    pub fn sample(&self, start: f64, end: f64, n: usize) -> Vec<WaveformSample> {
        let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
        (0..n)
            .map(|i| {
                let time = start + step * i as f64;
                WaveformSample {
                    time,
                    input: self.input(time),
                    output: self.output(time),
                }
            })
            .collect()
    }

    /// Display window starting at t = 0 (s).
    ///
    /// Periodic signals show three source periods. Step and impulse show
    /// five slowest time constants; an underdamped response is kept between
    /// two and twenty resonance periods so the ringing stays visible.
    pub fn default_window(&self) -> f64 {
        match self.shape {
            Shape::Sine(_) | Shape::Square(_) => 3.0 / self.source_frequency,
            Shape::Step | Shape::Impulse { .. } => {
                let settle = 5.0 * self.damping.slowest_time_constant();
                let window = match self.damping.regime {
                    DampingRegime::Underdamped => {
                        let period = 2.0 * PI / self.damping.omega0;
                        settle.clamp(2.0 * period, 20.0 * period)
                    }
                    _ => settle,
                };
                if window.is_finite() && window > 0.0 {
                    window
                } else {
                    1.0 / self.source_frequency
                }
            }
        }
    }

    /// Harmonic lines of a periodic excitation; empty for step and impulse.
    pub fn spectrum(&self) -> Vec<SpectralLine> {
        let harmonics: &[Harmonic] = match &self.shape {
            Shape::Sine(h) => std::slice::from_ref(h),
            Shape::Square(hs) => hs,
            Shape::Step | Shape::Impulse { .. } => &[],
        };
        let a = self.amplitude.abs();
        harmonics
            .iter()
            .map(|h| SpectralLine {
                frequency: self.source_frequency * h.order as f64,
                input_amplitude: a * h.weight,
                output_amplitude: a * h.weight * h.gain,
            })
            .collect()
    }
}

/// Normalized unit-step response (final value 1) for `t ≥ 0`.
///
/// The critically damped branch uses the closed form `1 − e^{−αt}(1 + αt)`
/// instead of either general formula, both of which divide by zero at ζ = 1.
pub fn step_response(damping: &Damping, t: f64) -> f64 {
    let alpha = damping.alpha;
    match damping.regime {
        DampingRegime::Underdamped => {
            let wd = damping.damped_frequency();
            let decay = (-alpha * t).exp();
            if decay == 0.0 || wd <= 0.0 {
                return 1.0 - decay * (1.0 + alpha * t);
            }
            1.0 - decay * ((wd * t).cos() + (alpha / wd) * (wd * t).sin())
        }
        DampingRegime::Overdamped => {
            let (s1, s2) = damping.overdamped_roots();
            1.0 - (s2 * (s1 * t).exp() - s1 * (s2 * t).exp()) / (s2 - s1)
        }
        DampingRegime::Critical => {
            let decay = (-alpha * t).exp();
            if decay == 0.0 {
                1.0
            } else {
                1.0 - decay * (1.0 + alpha * t)
            }
        }
    }
}

/// Impulse response scaled by `1/L` for `t > 0`.
///
/// Synthesized whenever α < ω0, including the part of the critical band
/// just below ζ = 1; `sin(ωd·t)/ωd ≤ t` keeps it bounded as ωd → 0.
/// Returns 0 for α ≥ ω0.
pub fn impulse_response(damping: &Damping, inductance: f64, t: f64) -> f64 {
    if damping.alpha >= damping.omega0 {
        return 0.0;
    }
    let wd = damping.damped_frequency();
    let decay = (-damping.alpha * t).exp();
    if wd <= 0.0 || decay == 0.0 {
        return 0.0;
    }
    (1.0 / (inductance * wd)) * decay * (wd * t).sin()
}
