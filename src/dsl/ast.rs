//! Abstract Syntax Tree types for the circuit description language.

use std::collections::HashMap;

/// Complete AST representation of a parsed description.
///
/// Enum-valued directives keep their raw text; name resolution (with its
/// fallback to defaults) happens when the AST is turned into parameters.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// Element declarations in source order
    pub components: Vec<ComponentDef>,
    /// `.topology` argument
    pub topology: Option<String>,
    /// `.preset` argument
    pub preset: Option<String>,
    /// `.signal` argument
    pub signal: Option<String>,
    /// `.source` arguments
    pub source: Option<SourceDef>,
    /// `.parasitics` key/value pairs
    pub parasitics: Option<ParasiticsDef>,
}

impl CircuitAst {
    /// Create a new empty AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An element declaration such as `R1 100`.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Element kind, taken from the name prefix
    pub component_type: ComponentType,
    /// Element name as written
    pub name: String,
    /// Element value in SI units
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Element kinds the description accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Resistor (ohms)
    Resistor,
    /// Inductor (henries)
    Inductor,
    /// Capacitor (farads)
    Capacitor,
}

impl ComponentType {
    /// Determine the element kind from its name prefix.
    pub fn from_prefix(name: &str) -> Option<Self> {
        match name.chars().next()?.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'L' => Some(Self::Inductor),
            'C' => Some(Self::Capacitor),
            _ => None,
        }
    }

    /// Single-letter designator.
    pub fn letter(&self) -> char {
        match self {
            Self::Resistor => 'R',
            Self::Inductor => 'L',
            Self::Capacitor => 'C',
        }
    }
}

/// `.source <frequency> <amplitude>`
#[derive(Debug, Clone, Copy)]
pub struct SourceDef {
    /// Excitation frequency (Hz)
    pub frequency: f64,
    /// Peak amplitude (V)
    pub amplitude: f64,
    /// Source line number
    pub line: usize,
}

/// `.parasitics key=value ...`
#[derive(Debug, Clone, Default)]
pub struct ParasiticsDef {
    /// Parameter values keyed by lower-case name
    pub params: HashMap<String, f64>,
    /// Source line number
    pub line: usize,
}
