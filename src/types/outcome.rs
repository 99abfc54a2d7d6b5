use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::context::Context;
use super::spec::RuleSpec;
use super::value::Value;

/// Result of one `validate()` call.
pub type Outcome = Result<Validated, Failure>;

/// Successful validation: echoes the value, the parsed rules, and the context.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Validated {
    value: Value,
    rules: Arc<[RuleSpec]>,
    context: Context,
    field: Option<String>,
}

impl Validated {
    pub(crate) fn new(
        value: Value,
        rules: Arc<[RuleSpec]>,
        context: Context,
        field: Option<String>,
    ) -> Self {
        Self {
            value,
            rules,
            context,
            field,
        }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

/// Why a chain stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A named rule is not in the registry.
    UnknownRule,
    /// The rule rejected its own parameters.
    InvalidParameters,
    /// The rule returned an error or panicked.
    Execution,
    /// The rule ran and rejected the value.
    Rejected,
    /// The rule did not finish within the configured timeout.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::UnknownRule => "unknown rule",
            FailureKind::InvalidParameters => "invalid rule parameters",
            FailureKind::Execution => "rule execution error",
            FailureKind::Rejected => "rejected",
            FailureKind::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Failed validation. Every failure mode, including rule errors and panics,
/// arrives in this one shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct Failure {
    kind: FailureKind,
    value: Value,
    rule: RuleSpec,
    rules: Arc<[RuleSpec]>,
    message: String,
    context: Context,
    field: Option<String>,
}

impl Failure {
    pub(crate) fn new(
        kind: FailureKind,
        value: Value,
        rule: RuleSpec,
        rules: Arc<[RuleSpec]>,
        message: String,
    ) -> Self {
        Self {
            kind,
            value,
            rule,
            rules,
            message,
            context: Context::new(),
            field: None,
        }
    }

    pub(crate) fn with_origin(mut self, context: Context, field: Option<String>) -> Self {
        self.context = context;
        self.field = field;
        self
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The human-readable text to show for this failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending rule.
    #[must_use]
    pub fn rule(&self) -> &RuleSpec {
        &self.rule
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}
