//! Main analyzer interface.

use serde::Serialize;

use super::resonance::{resonance, steady_state, ResonanceResult, SteadyStateResult};
use super::sweep::{
    bode_sweep, harmonic_spectrum, nyquist_sweep, zoomed_decades, BodePoint, NyquistSweep,
};
use super::waveform::{waveform, Damping, SpectralLine, WaveformSample};
use crate::circuit::{normalize, CircuitParameters, EffectiveParameters};

/// Default number of Bode sweep points.
pub const DEFAULT_SWEEP_POINTS: usize = 200;

/// Default Bode window at zoom 1 (decades).
pub const DEFAULT_BASE_DECADES: f64 = 4.0;

/// Default number of Nyquist sweep points.
pub const DEFAULT_NYQUIST_POINTS: usize = 200;

/// Default number of waveform samples.
pub const DEFAULT_WAVEFORM_POINTS: usize = 500;

/// Configuration for the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of Bode sweep points.
    pub sweep_points: usize,
    /// Bode window width at zoom 1 (decades).
    pub base_decades: f64,
    /// Bode zoom factor; the window is `base_decades / zoom`.
    pub zoom: f64,
    /// Number of Nyquist sweep points.
    pub nyquist_points: usize,
    /// Number of waveform samples.
    pub waveform_points: usize,
    /// Waveform display window (s). `None` picks one from the excitation.
    pub time_window: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sweep_points: DEFAULT_SWEEP_POINTS,
            base_decades: DEFAULT_BASE_DECADES,
            zoom: 1.0,
            nyquist_points: DEFAULT_NYQUIST_POINTS,
            waveform_points: DEFAULT_WAVEFORM_POINTS,
            time_window: None,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of Bode sweep points.
    pub fn with_sweep_points(mut self, points: usize) -> Self {
        self.sweep_points = points;
        self
    }

    /// Set the Bode window width at zoom 1 (decades).
    pub fn with_base_decades(mut self, decades: f64) -> Self {
        self.base_decades = decades;
        self
    }

    /// Set the Bode zoom factor.
    ///
    /// - 1.0 (default): `base_decades` wide
    /// - 2.0: half as wide, centered on f0
    /// - clamped to [0.05, 100]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the number of Nyquist sweep points.
    pub fn with_nyquist_points(mut self, points: usize) -> Self {
        self.nyquist_points = points;
        self
    }

    /// Set the number of waveform samples.
    pub fn with_waveform_points(mut self, points: usize) -> Self {
        self.waveform_points = points;
        self
    }

    /// Override the waveform display window (s).
    pub fn with_time_window(mut self, seconds: f64) -> Self {
        self.time_window = Some(seconds);
        self
    }

    /// Effective Bode window width (decades).
    pub fn decades(&self) -> f64 {
        zoomed_decades(self.base_decades, self.zoom)
    }
}

/// Everything the views and exporters draw for one parameter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub parameters: CircuitParameters,
    pub effective: EffectiveParameters,
    pub resonance: ResonanceResult,
    pub steady_state: SteadyStateResult,
    pub damping: Damping,
    /// Waveform display window (s)
    pub time_window: f64,
    pub waveform: Vec<WaveformSample>,
    pub bode: Vec<BodePoint>,
    pub nyquist: NyquistSweep,
    pub spectrum: Vec<SpectralLine>,
}

/// Runs the full analysis pipeline.
///
/// Holds only its configuration, so one analyzer can serve any number of
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one snapshot: normalize, resonance, steady state, waveform,
    /// Bode and Nyquist sweeps, spectrum.
    pub fn analyze(&self, params: &CircuitParameters) -> AnalysisReport {
        let effective = normalize(params);
        let resonance = resonance(&effective, params.topology);
        let steady_state = steady_state(
            &effective,
            params.topology,
            &resonance,
            params.source_frequency,
            params.active_preset,
        );

        let waveform = waveform(
            &effective,
            params.signal_type,
            params.source_amplitude,
            params.source_frequency,
            &resonance,
        );
        let damping = *waveform.damping();

        log::debug!(
            "analyze: {} {} f0={:.6} Hz Q={:.6} zeta={:.6} ({:?})",
            params.topology,
            params.signal_type,
            resonance.f0,
            resonance.q,
            damping.zeta,
            damping.regime
        );

        let time_window = match self.config.time_window {
            Some(window) if window.is_finite() && window > 0.0 => window,
            Some(window) => {
                log::warn!("ignoring time window {window}, using automatic window");
                waveform.default_window()
            }
            None => waveform.default_window(),
        };

        AnalysisReport {
            parameters: *params,
            effective,
            resonance,
            steady_state,
            damping,
            time_window,
            waveform: waveform.sample(0.0, time_window, self.config.waveform_points),
            bode: bode_sweep(
                resonance.f0,
                resonance.q,
                params.active_preset,
                self.config.decades(),
                self.config.sweep_points,
            ),
            nyquist: nyquist_sweep(&effective, self.config.nyquist_points),
            spectrum: harmonic_spectrum(&waveform),
        }
    }
}
