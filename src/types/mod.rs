mod context;
mod error;
mod outcome;
mod registry;
mod report;
mod request;
mod rule;
mod schema;
mod spec;
mod value;

pub use context::Context;
pub use error::SchemaError;
pub use outcome::{Failure, FailureKind, Outcome, Validated};
pub use registry::{RegistryError, RuleRegistry};
pub use report::ValidationReport;
pub use request::ValidationRequest;
pub use rule::{
    async_rule, rule_fn, BoxError, Check, IntoCheck, InvalidParams, Rule, RuleFuture, RuleRequest,
};
pub use schema::{FieldBuilder, FieldRules, Schema, SchemaBuilder};
pub use spec::{InlineRule, RuleInput, RuleSpec};
pub use value::Value;
