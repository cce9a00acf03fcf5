//! WASM bindings for RLC Core.
//!
//! This module provides JavaScript-friendly bindings for a browser UI.
//! Sweeps and waveforms come back as flat `Float64Array`s so they can be
//! handed to a canvas renderer without further conversion.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRlcEngine } from 'rlc_core';
//!
//! await init();
//!
//! const engine = new WasmRlcEngine(`
//!   .topology series
//!   .preset bandpass
//!   R1 100
//!   L1 10m
//!   C1 10u
//! `);
//!
//! // On every slider change:
//! engine.set_elements(r, l, c);
//! const [f0, q, bw] = engine.resonance();
//! const bode = engine.bode(); // f, dB, deg triples
//!
//! // In requestAnimationFrame():
//! const phasors = engine.phasors(t);
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::{phasor_state, AnalysisConfig, AnalysisReport, Analyzer};
use crate::circuit::{validate_parameters, CircuitParameters, FilterPreset, SignalType, Topology};
use crate::error::RlcError;
use crate::export::Snapshot;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: RlcError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible RLC analysis engine.
///
/// Holds the current parameter snapshot and the last report. Every setter
/// reruns the full pipeline.
#[wasm_bindgen]
pub struct WasmRlcEngine {
    analyzer: Analyzer,
    params: CircuitParameters,
    report: AnalysisReport,
}

#[wasm_bindgen]
impl WasmRlcEngine {
    /// Create an engine from a circuit description.
    ///
    /// # Example
    /// ```javascript
    /// const engine = new WasmRlcEngine("R1 100\nL1 10m\nC1 10u");
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(description: &str) -> Result<WasmRlcEngine, JsValue> {
        let params = CircuitParameters::from_description(description).map_err(to_js)?;
        Ok(Self::from_parameters(params, AnalysisConfig::default()))
    }

    /// Create an engine from a JSON snapshot.
    pub fn from_snapshot(json: &str) -> Result<WasmRlcEngine, JsValue> {
        let snapshot = Snapshot::from_json(json).map_err(to_js)?;
        validate_parameters(&snapshot.parameters).map_err(to_js)?;
        Ok(Self::from_parameters(snapshot.parameters, AnalysisConfig::default()))
    }

    /// Set R (ohms), L (henries) and C (farads).
    pub fn set_elements(&mut self, resistance: f64, inductance: f64, capacitance: f64) -> Result<(), JsValue> {
        let mut params = self.params;
        params.resistance = resistance;
        params.inductance = inductance;
        params.capacitance = capacitance;
        self.update(params)
    }

    /// Set the source frequency (Hz) and amplitude (V).
    pub fn set_source(&mut self, frequency: f64, amplitude: f64) -> Result<(), JsValue> {
        self.update(self.params.with_source(frequency, amplitude))
    }

    /// Set topology, preset and signal by name. Unknown names use defaults.
    pub fn set_mode(&mut self, topology: &str, preset: &str, signal: &str) -> Result<(), JsValue> {
        self.update(
            self.params
                .with_topology(Topology::resolve(topology))
                .with_preset(FilterPreset::resolve(preset))
                .with_signal(SignalType::resolve(signal)),
        )
    }

    /// Set the Bode zoom factor.
    pub fn set_zoom(&mut self, zoom: f64) {
        let config = self.analyzer.config().clone().with_zoom(zoom);
        self.analyzer = Analyzer::with_config(config);
        self.report = self.analyzer.analyze(&self.params);
    }

    /// `[f0, q, bandwidth]`.
    pub fn resonance(&self) -> Vec<f64> {
        let r = &self.report.resonance;
        vec![r.f0, r.q, r.bandwidth]
    }

    /// `[impedance_magnitude, phase_degrees, gain_db]` at the source frequency.
    pub fn steady_state(&self) -> Vec<f64> {
        let s = &self.report.steady_state;
        vec![s.impedance_magnitude, s.phase_degrees, s.gain_db]
    }

    /// Damping ratio ζ.
    #[wasm_bindgen(getter)]
    pub fn zeta(&self) -> f64 {
        self.report.damping.zeta
    }

    /// Waveform display window (s).
    #[wasm_bindgen(getter)]
    pub fn time_window(&self) -> f64 {
        self.report.time_window
    }

    /// Flattened `(frequency, dB, phase)` triples.
    pub fn bode(&self) -> Vec<f64> {
        self.report
            .bode
            .iter()
            .flat_map(|p| [p.frequency, p.magnitude_db, p.phase_degrees])
            .collect()
    }

    /// Flattened `(time, input, output)` triples.
    pub fn waveform(&self) -> Vec<f64> {
        self.report
            .waveform
            .iter()
            .flat_map(|s| [s.time, s.input, s.output])
            .collect()
    }

    /// Flattened `(real, imaginary)` pairs.
    pub fn nyquist(&self) -> Vec<f64> {
        self.report
            .nyquist
            .points
            .iter()
            .flat_map(|p| [p.real, p.imaginary])
            .collect()
    }

    /// Display scale mapping the largest observed |Z| onto `half_extent` pixels.
    pub fn nyquist_scale(&self, half_extent: f64) -> f64 {
        self.report.nyquist.scale_for(half_extent)
    }

    /// Flattened `(frequency, input, output)` harmonic lines.
    pub fn spectrum(&self) -> Vec<f64> {
        self.report
            .spectrum
            .iter()
            .flat_map(|l| [l.frequency, l.input_amplitude, l.output_amplitude])
            .collect()
    }

    /// `(magnitude, angle_degrees)` for V, I, VR, VL, VC at time `t`.
    pub fn phasors(&self, t: f64) -> Vec<f64> {
        let s = phasor_state(
            t,
            &self.report.effective,
            self.params.source_frequency,
            self.params.source_amplitude,
        );
        [s.voltage, s.current, s.resistor, s.inductor, s.capacitor]
            .iter()
            .flat_map(|p| [p.magnitude, p.angle_degrees])
            .collect()
    }

    /// JSON snapshot of the current parameters and results.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        Snapshot::capture(&self.params).to_json().map_err(to_js)
    }
}

impl WasmRlcEngine {
    fn from_parameters(params: CircuitParameters, config: AnalysisConfig) -> Self {
        let analyzer = Analyzer::with_config(config);
        let report = analyzer.analyze(&params);
        Self {
            analyzer,
            params,
            report,
        }
    }

    fn update(&mut self, params: CircuitParameters) -> Result<(), JsValue> {
        validate_parameters(&params).map_err(to_js)?;
        self.params = params;
        self.report = self.analyzer.analyze(&self.params);
        Ok(())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
