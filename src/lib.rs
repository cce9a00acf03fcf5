//! # RLC Core
//!
//! A closed-form analysis engine for series and parallel RLC circuits.
//!
//! This library provides:
//! - Resonance frequency, quality factor, bandwidth and impedance
//! - Preset transfer functions (low-pass, high-pass, band-pass, notch)
//! - Time-domain responses for sine, square, step and impulse excitation
//! - Bode and Nyquist frequency sweeps, harmonic spectra and phasor state
//! - A small description language for circuit files, plus CSV/JSON export
//!
//! ## Architecture
//!
//! - [`circuit`] - Parameter snapshot, normalization and validation
//! - [`analysis`] - The closed-form solver and the [`Analyzer`] pipeline
//! - [`dsl`] - Parser for the circuit description language
//! - [`export`] - CSV tables and JSON snapshots
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! rlc filter.rlc --view bode --zoom 2 > bode.csv
//! ```
//!
//! ### Library
//!
//! ```
//! use rlc_core::{Analyzer, CircuitParameters, Topology};
//!
//! let params = CircuitParameters::new(100.0, 10e-3, 10e-6).with_topology(Topology::Parallel);
//! let report = Analyzer::new().analyze(&params);
//! assert!((report.resonance.q - 10f64.sqrt()).abs() < 1e-9);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmRlcEngine } from 'rlc_core';
//!
//! const engine = new WasmRlcEngine("R1 100\nL1 10m\nC1 10u");
//! const bode = engine.bode(); // [f, dB, deg, f, dB, deg, ...]
//! ```
//!
//! ## Error Policy
//!
//! The analysis functions are total: zero, negative or missing element
//! values are clamped to small positive floors and every output is finite.
//! Only parsing, file access and output return [`Result`].

pub mod analysis;
pub mod circuit;
pub mod dsl;
pub mod error;
pub mod export;

// Re-export main types for convenience
pub use analysis::{AnalysisConfig, AnalysisReport, Analyzer};
pub use circuit::{CircuitParameters, FilterPreset, Parasitics, SignalType, Topology};
pub use error::{Result, RlcError};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmRlcEngine;
