//! Declarative, rule-based value validation.
//!
//! Rules are named in a compact expression language (`required|minLength[3]`),
//! resolved against a [`RuleRegistry`] and run one after another by a
//! [`Validator`], stopping at the first failure.
//!
//! ```
//! use ruleval::{ValidationRequest, Validator};
//!
//! # futures::executor::block_on(async {
//! let validator = Validator::new();
//! let failure = validator
//!     .validate(ValidationRequest::new(25_i64, "required|between[10,20]").field("age"))
//!     .await
//!     .unwrap_err();
//! assert_eq!(failure.message(), "The age must be between 10 and 20.");
//! # });
//! ```

mod compile;
mod error;
pub mod messages;
pub mod parse;
pub mod rules;
mod types;
mod validate;

pub use error::RulevalError;
pub use messages::{DefaultMessages, MessageParams, Translate};
pub use parse::{parse_rules, ParseError};
pub use rules::{one_of, OneOf};
pub use types::{
    async_rule, rule_fn, BoxError, Check, Context, Failure, FailureKind, FieldBuilder, FieldRules,
    InlineRule, IntoCheck, InvalidParams, Outcome, RegistryError, Rule, RuleFuture, RuleInput,
    RuleRegistry, RuleRequest, RuleSpec, Schema, SchemaBuilder, SchemaError, Validated,
    ValidationReport, ValidationRequest, Value,
};
pub use validate::{Validator, ValidatorBuilder};
