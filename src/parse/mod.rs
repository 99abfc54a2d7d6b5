mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::{parse_rules, ParsedSchema};

/// Parse schema DSL input into a [`ParsedSchema`].
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid schema syntax.
pub fn parse(input: &str) -> Result<ParsedSchema, ParseError> {
    use winnow::Parser;
    grammar::parse_schema
        .parse(input)
        .map_err(|e| ParseError::new(e.inner().to_string(), e.offset()))
}
