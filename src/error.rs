use thiserror::Error;

use crate::parse::ParseError;
use crate::SchemaError;

/// Unified error type covering parsing, schema checks, and I/O.
///
/// Returned by convenience methods like [`Schema::from_dsl()`](crate::Schema::from_dsl)
/// and [`Schema::from_file()`](crate::Schema::from_file).
#[derive(Debug, Error)]
pub enum RulevalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
