//! Parser for the circuit description language.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{Result, RlcError};

/// Parser for circuit descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    ///
    /// Lexing errors in the first token surface from [`Parser::parse`].
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 1,
                column: 1,
            },
        }
    }

    /// Parse the entire circuit description.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();
        self.advance()?;

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(RlcError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            // Every statement ends at a newline or EOF
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(RlcError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(RlcError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_value(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| RlcError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.to_lowercase();
        let line = self.current.line;
        self.advance()?;

        let duplicate = || RlcError::parse(line, format!("duplicate directive: {}", directive));

        match directive.as_str() {
            ".topology" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                if ast.topology.replace(name).is_some() {
                    return Err(duplicate());
                }
            }
            ".preset" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                if ast.preset.replace(name).is_some() {
                    return Err(duplicate());
                }
            }
            ".signal" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                if ast.signal.replace(name).is_some() {
                    return Err(duplicate());
                }
            }
            ".source" => {
                let frequency = self.expect_value()?;
                let amplitude = self.expect_value()?;
                let source = SourceDef {
                    frequency,
                    amplitude,
                    line,
                };
                if ast.source.replace(source).is_some() {
                    return Err(duplicate());
                }
            }
            ".parasitics" => {
                let parasitics = self.parse_parasitics(line)?;
                if ast.parasitics.replace(parasitics).is_some() {
                    return Err(duplicate());
                }
            }
            _ => {
                return Err(RlcError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_parasitics(&mut self, line: usize) -> Result<ParasiticsDef> {
        let mut def = ParasiticsDef {
            line,
            ..Default::default()
        };

        // key=value pairs until end of line
        while self.current.kind == TokenKind::Identifier {
            let key = self.current.text.to_lowercase();
            self.advance()?;
            self.expect(TokenKind::Equals)?;
            let value = self.expect_value()?;
            def.params.insert(key, value);
        }

        Ok(def)
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let name = self.current.text.clone();
        let line = self.current.line;

        let component_type = ComponentType::from_prefix(&name).ok_or_else(|| {
            RlcError::parse(line, format!("unknown component type '{}'", name))
        })?;
        self.advance()?;

        let value = self.expect_value()?;

        Ok(ComponentDef {
            component_type,
            name,
            value,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<CircuitAst> {
        super::super::parse(input)
    }

    #[test]
    fn test_parse_components() {
        let ast = parse("R1 100\nL1 10m\nC1 10u").unwrap();
        assert_eq!(ast.components.len(), 3);
        assert_eq!(ast.components[0].component_type, ComponentType::Resistor);
        assert_eq!(ast.components[0].name, "R1");
        assert_eq!(ast.components[0].value, 100.0);
        assert_eq!(ast.components[1].component_type, ComponentType::Inductor);
        assert_eq!(ast.components[2].component_type, ComponentType::Capacitor);
        assert_eq!(ast.components[2].line, 3);
    }

    #[test]
    fn test_parse_directives() {
        let input = "\
.topology parallel
.preset notch
.signal step
.source 2k 5
.parasitics esr_c=0.05 ESL_C=2n esr_l=0.3
";
        let ast = parse(input).unwrap();
        assert_eq!(ast.topology.as_deref(), Some("parallel"));
        assert_eq!(ast.preset.as_deref(), Some("notch"));
        assert_eq!(ast.signal.as_deref(), Some("step"));

        let source = ast.source.unwrap();
        assert_eq!(source.frequency, 2000.0);
        assert_eq!(source.amplitude, 5.0);

        let parasitics = ast.parasitics.unwrap();
        assert_eq!(parasitics.params.len(), 3);
        assert!((parasitics.params["esl_c"] - 2e-9).abs() < 1e-20);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# Band-pass tank\nR1 1k ; damping resistor\n\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_unknown_component_prefix() {
        let err = parse("Q1 100").unwrap_err();
        assert!(matches!(err, RlcError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_value() {
        assert!(parse("R1\n").is_err());
        assert!(parse(".source 1k\n").is_err());
    }

    #[test]
    fn test_duplicate_directive() {
        let err = parse(".signal sine\n.signal step").unwrap_err();
        assert!(matches!(err, RlcError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_values_with_leading_dot_and_unit_names() {
        let ast = parse("R1 1kohm\nL1 10mH\nC1 .5uF\n.source 2kHz 5V").unwrap();
        assert_eq!(ast.components[0].value, 1_000.0);
        assert!((ast.components[1].value - 0.01).abs() < 1e-15);
        assert!((ast.components[2].value - 0.5e-6).abs() < 1e-18);
        assert_eq!(ast.source.map(|s| s.frequency), Some(2_000.0));
    }

    #[test]
    fn test_invalid_unit_name() {
        let err = parse("L1 10mX").unwrap_err();
        assert!(err.to_string().contains("invalid number: 10mX"));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse("R1 100 200").is_err());
    }
}
