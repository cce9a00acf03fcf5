//! Circuit description language.
//!
//! A small, line-oriented, SPICE-flavoured format for writing down one RLC
//! circuit together with its excitation and analysis preset. It is the
//! configuration format consumed by the `rlc` CLI and the WASM bindings.
//!
//! # Grammar Overview
//!
//! ```text
//! description = { line }
//! line        = comment | directive | component | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name { argument }
//! component   = name value
//!
//! directive_name = "topology" | "preset" | "signal" | "source" | "parasitics"
//! name        = ('R' | 'L' | 'C') { letter | digit | '_' }
//! value       = number [unit_suffix] [unit_name]
//!
//! number      = ['-'] (digit+ ['.' digit*] | '.' digit+) [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G'
//! unit_name   = "ohm" | "Ω" | "H" | "F" | "Hz" | "V"
//! ```
//!
//! # Directives
//!
//! | Directive | Syntax | Default |
//! |-----------|--------|---------|
//! | .topology | `.topology series\|parallel` | series |
//! | .preset | `.preset lowpass\|highpass\|bandpass\|notch` | lowpass |
//! | .signal | `.signal sine\|square\|step\|impulse` | sine |
//! | .source | `.source <frequency> <amplitude>` | 1k 1 |
//! | .parasitics | `.parasitics esr_c=<v> esl_c=<v> esr_l=<v>` | none |
//!
//! # Example
//!
//! ```text
//! # Series band-pass tank
//! .topology series
//! .preset bandpass
//! .signal square
//! .source 500 5
//!
//! R1 100
//! L1 10m
//! C1 10u
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a circuit description string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a circuit description file.
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::RlcError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
