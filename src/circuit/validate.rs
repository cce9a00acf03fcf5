//! Parameter validation at the configuration boundary.

use crate::error::{Result, RlcError};

use super::CircuitParameters;

/// Validate a parameter snapshot coming from user input.
///
/// Checks:
/// - R, L, C, source frequency and amplitude are finite and non-negative
/// - Parasitic values, when present, are finite and non-negative
///
/// Zero values pass; the normalizer clamps them to safe floors. The engine
/// itself never calls this, so a snapshot built in code still analyzes.
pub fn validate_parameters(params: &CircuitParameters) -> Result<()> {
    check("resistance", params.resistance)?;
    check("inductance", params.inductance)?;
    check("capacitance", params.capacitance)?;
    check("source_frequency", params.source_frequency)?;
    check("source_amplitude", params.source_amplitude)?;

    if let Some(p) = &params.parasitics {
        check("esr_capacitor", p.esr_capacitor)?;
        check("esl_capacitor", p.esl_capacitor)?;
        check("esr_inductor", p.esr_inductor)?;
    }

    Ok(())
}

fn check(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(RlcError::invalid_parameter(param, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(RlcError::invalid_parameter(param, format!("{} is negative", value)));
    }
    Ok(())
}
