//! Circuit parameter model and normalization.
//!
//! A circuit is one resistor, one inductor and one capacitor arranged in
//! series or in parallel, driven by a single source. [`CircuitParameters`]
//! holds the raw values as entered; [`normalize`] turns them into the
//! [`EffectiveParameters`] the analysis engine works with.

mod normalize;
mod params;
mod types;
mod validate;

pub use normalize::{
    normalize, EffectiveParameters, MIN_CAPACITANCE, MIN_INDUCTANCE, MIN_RESISTANCE,
};
pub use params::{CircuitParameters, DEFAULT_SOURCE_AMPLITUDE, DEFAULT_SOURCE_FREQUENCY};
pub use types::{FilterPreset, Parasitics, SignalType, Topology};
pub use validate::validate_parameters;
