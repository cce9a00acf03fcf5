//! The circuit parameter snapshot and its construction from a description.

use serde::{Deserialize, Serialize};

use super::types::{FilterPreset, Parasitics, SignalType, Topology};
use super::validate::validate_parameters;
use crate::dsl::{CircuitAst, ComponentType};
use crate::error::{Result, RlcError};

/// Default source frequency (Hz) when a description has no `.source`.
pub const DEFAULT_SOURCE_FREQUENCY: f64 = 1_000.0;

/// Default source amplitude (V) when a description has no `.source`.
pub const DEFAULT_SOURCE_AMPLITUDE: f64 = 1.0;

/// Raw parameters of one RLC circuit evaluation.
///
/// This is an immutable snapshot owned by the caller; every engine call
/// takes it (or the values derived from it) by reference and never keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParameters {
    /// Resistance (ohms)
    pub resistance: f64,
    /// Inductance (henries)
    pub inductance: f64,
    /// Capacitance (farads)
    pub capacitance: f64,
    /// Element arrangement
    pub topology: Topology,
    /// Parasitic elements, folded in when present
    #[serde(default)]
    pub parasitics: Option<Parasitics>,
    /// Excitation frequency (Hz)
    pub source_frequency: f64,
    /// Excitation amplitude (V)
    pub source_amplitude: f64,
    /// Time-domain excitation
    #[serde(default)]
    pub signal_type: SignalType,
    /// Transfer-function shape for gain/phase views
    #[serde(default)]
    pub active_preset: FilterPreset,
}

impl Default for CircuitParameters {
    fn default() -> Self {
        Self::new(100.0, 10e-3, 10e-6)
    }
}

impl CircuitParameters {
    /// Create a series, sine-driven, low-pass snapshot with the given elements.
    pub fn new(resistance: f64, inductance: f64, capacitance: f64) -> Self {
        Self {
            resistance,
            inductance,
            capacitance,
            topology: Topology::default(),
            parasitics: None,
            source_frequency: DEFAULT_SOURCE_FREQUENCY,
            source_amplitude: DEFAULT_SOURCE_AMPLITUDE,
            signal_type: SignalType::default(),
            active_preset: FilterPreset::default(),
        }
    }

    /// Set the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Enable parasitic elements.
    pub fn with_parasitics(mut self, parasitics: Parasitics) -> Self {
        self.parasitics = Some(parasitics);
        self
    }

    /// Set the excitation frequency (Hz) and amplitude (V).
    pub fn with_source(mut self, frequency: f64, amplitude: f64) -> Self {
        self.source_frequency = frequency;
        self.source_amplitude = amplitude;
        self
    }

    /// Set the time-domain excitation.
    pub fn with_signal(mut self, signal_type: SignalType) -> Self {
        self.signal_type = signal_type;
        self
    }

    /// Set the transfer-function preset.
    pub fn with_preset(mut self, preset: FilterPreset) -> Self {
        self.active_preset = preset;
        self
    }

    /// Build a parameter snapshot from a parsed description.
    ///
    /// Exactly one resistor, inductor and capacitor must be declared.
    /// Unknown topology/signal/preset names fall back to their defaults.
    pub fn from_ast(ast: &CircuitAst) -> Result<Self> {
        let mut resistance = None;
        let mut inductance = None;
        let mut capacitance = None;

        for def in &ast.components {
            let slot = match def.component_type {
                ComponentType::Resistor => &mut resistance,
                ComponentType::Inductor => &mut inductance,
                ComponentType::Capacitor => &mut capacitance,
            };
            if slot.replace(def.value).is_some() {
                return Err(RlcError::DuplicateComponent {
                    name: def.name.clone(),
                });
            }
        }

        let missing = |kind: ComponentType| RlcError::MissingComponent { kind: kind.letter() };
        let mut params = Self::new(
            resistance.ok_or_else(|| missing(ComponentType::Resistor))?,
            inductance.ok_or_else(|| missing(ComponentType::Inductor))?,
            capacitance.ok_or_else(|| missing(ComponentType::Capacitor))?,
        );

        if let Some(name) = &ast.topology {
            params.topology = Topology::resolve(name);
        }
        if let Some(name) = &ast.signal {
            params.signal_type = SignalType::resolve(name);
        }
        if let Some(name) = &ast.preset {
            params.active_preset = FilterPreset::resolve(name);
        }
        if let Some(source) = &ast.source {
            params.source_frequency = source.frequency;
            params.source_amplitude = source.amplitude;
        }
        if let Some(def) = &ast.parasitics {
            let mut parasitics = Parasitics::default();
            for (key, &value) in &def.params {
                match key.as_str() {
                    "esr_c" | "esr_capacitor" => parasitics.esr_capacitor = value,
                    "esl_c" | "esl_capacitor" => parasitics.esl_capacitor = value,
                    "esr_l" | "esr_inductor" => parasitics.esr_inductor = value,
                    _ => {
                        return Err(RlcError::parse(
                            def.line,
                            format!("unknown parasitic parameter '{}'", key),
                        ));
                    }
                }
            }
            params.parasitics = Some(parasitics);
        }

        validate_parameters(&params)?;
        Ok(params)
    }

    /// Parse and build a snapshot from description text.
    pub fn from_description(input: &str) -> Result<Self> {
        let ast = crate::dsl::parse(input)?;
        Self::from_ast(&ast)
    }
}
