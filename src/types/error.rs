use thiserror::Error;

/// Problems found while building or checking a [`Schema`](super::schema::Schema).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field '{path}' is declared more than once")]
    DuplicateField { path: String },

    #[error("field path must not be empty")]
    EmptyFieldName,

    #[error("unknown rule '{rule}' on field '{field}'")]
    UnknownRule { field: String, rule: String },
}
