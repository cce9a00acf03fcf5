//! Enumerations and small value types describing a circuit snapshot.
//!
//! Every enum resolves unknown names to its default variant instead of
//! failing, so a snapshot or description written by a newer front end
//! still produces a plottable result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How R, L and C are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Topology {
    /// R, L and C in one loop with the source
    #[default]
    Series,
    /// R, L and C each directly across the source
    Parallel,
}

impl Topology {
    /// Parse a topology name. Returns `None` for unknown names.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "series" | "s" => Some(Self::Series),
            "parallel" | "p" => Some(Self::Parallel),
            _ => None,
        }
    }

    /// Parse a topology name, falling back to [`Topology::Series`].
    pub fn resolve(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("unknown topology '{}', falling back to series", s);
            Self::default()
        })
    }

    /// Lower-case name as used in descriptions and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Parallel => "parallel",
        }
    }
}

impl From<String> for Topology {
    fn from(s: String) -> Self {
        Self::resolve(&s)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Excitation applied to the circuit in the time domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SignalType {
    /// Continuous sinusoid at the source frequency
    #[default]
    Sine,
    /// Square wave built from odd harmonics
    Square,
    /// Unit step of the source amplitude at t = 0
    Step,
    /// Impulse of the source amplitude at t = 0
    Impulse,
}

impl SignalType {
    /// Parse a signal name. Returns `None` for unknown names.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sine" | "sin" => Some(Self::Sine),
            "square" | "sq" => Some(Self::Square),
            "step" => Some(Self::Step),
            "impulse" | "pulse" => Some(Self::Impulse),
            _ => None,
        }
    }

    /// Parse a signal name, falling back to [`SignalType::Sine`].
    pub fn resolve(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("unknown signal type '{}', falling back to sine", s);
            Self::default()
        })
    }

    /// Lower-case name as used in descriptions and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Step => "step",
            Self::Impulse => "impulse",
        }
    }

    /// Whether the signal is periodic at the source frequency.
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Sine | Self::Square)
    }
}

impl From<String> for SignalType {
    fn from(s: String) -> Self {
        Self::resolve(&s)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transfer-function shape used for gain, phase and spectral views.
///
/// Chosen by the user independently of the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FilterPreset {
    /// H = 1 / D(u)
    #[default]
    LowPass,
    /// H = u² / D(u)
    HighPass,
    /// H = (u/Q) / D(u)
    BandPass,
    /// H = |1 − u²| / D(u)
    Notch,
}

impl FilterPreset {
    /// Parse a preset name. Returns `None` for unknown names.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "lowpass" | "lp" => Some(Self::LowPass),
            "highpass" | "hp" => Some(Self::HighPass),
            "bandpass" | "bp" => Some(Self::BandPass),
            "notch" | "bandstop" | "bs" => Some(Self::Notch),
            _ => None,
        }
    }

    /// Parse a preset name, falling back to [`FilterPreset::LowPass`].
    pub fn resolve(s: &str) -> Self {
        Self::from_name(s).unwrap_or_else(|| {
            log::warn!("unknown filter preset '{}', falling back to low-pass", s);
            Self::default()
        })
    }

    /// Lower-case name as used in descriptions and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowPass => "lowpass",
            Self::HighPass => "highpass",
            Self::BandPass => "bandpass",
            Self::Notch => "notch",
        }
    }
}

impl From<String> for FilterPreset {
    fn from(s: String) -> Self {
        Self::resolve(&s)
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-ideal series elements of the reactive parts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Parasitics {
    /// Equivalent series resistance of the capacitor (ohms)
    pub esr_capacitor: f64,
    /// Equivalent series inductance of the capacitor (henries)
    pub esl_capacitor: f64,
    /// Winding resistance of the inductor (ohms)
    pub esr_inductor: f64,
}

impl Parasitics {
    /// Create a parasitic set.
    pub fn new(esr_capacitor: f64, esl_capacitor: f64, esr_inductor: f64) -> Self {
        Self {
            esr_capacitor,
            esl_capacitor,
            esr_inductor,
        }
    }
}
