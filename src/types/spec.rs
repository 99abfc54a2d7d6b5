use std::fmt;
use std::sync::Arc;

use super::rule::Rule;

/// An inline rule carried directly inside a rule list rather than looked up by name.
///
/// Two inline rules are equal when they share the same allocation.
#[derive(Clone)]
pub struct InlineRule(Arc<dyn Rule>);

impl InlineRule {
    #[must_use]
    pub fn new(rule: Arc<dyn Rule>) -> Self {
        Self(rule)
    }

    #[must_use]
    pub fn rule(&self) -> &Arc<dyn Rule> {
        &self.0
    }
}

impl fmt::Debug for InlineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InlineRule({:p})", Arc::as_ptr(&self.0))
    }
}

impl PartialEq for InlineRule {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

/// One parsed rule occurrence: an inline rule, or a registry name with raw parameters.
///
/// Parameters stay strings; each rule coerces them itself.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    Inline(InlineRule),
    Named { name: String, params: Vec<String> },
}

impl RuleSpec {
    #[must_use]
    pub fn named(name: impl Into<String>, params: Vec<String>) -> Self {
        RuleSpec::Named {
            name: name.into(),
            params,
        }
    }

    #[must_use]
    pub fn inline(rule: Arc<dyn Rule>) -> Self {
        RuleSpec::Inline(InlineRule::new(rule))
    }

    /// The registry name, or `None` for inline rules.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            RuleSpec::Named { name, .. } => Some(name),
            RuleSpec::Inline(_) => None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        match self {
            RuleSpec::Named { params, .. } => params,
            RuleSpec::Inline(_) => &[],
        }
    }

    /// Name used in messages and logs: the registry name, or `inline`.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name().unwrap_or("inline")
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Inline(_) => write!(f, "<inline>"),
            RuleSpec::Named { name, params } if params.is_empty() => write!(f, "{name}"),
            RuleSpec::Named { name, params } => write!(f, "{name}[{}]", params.join(",")),
        }
    }
}

/// Unparsed rule input, in any of the accepted shapes: a `|`-joined string, an
/// inline rule, an already-parsed spec, or a list mixing all of them.
#[derive(Clone)]
pub enum RuleInput {
    Text(String),
    Inline(Arc<dyn Rule>),
    Spec(RuleSpec),
    List(Vec<RuleInput>),
}

impl fmt::Debug for RuleInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleInput::Text(s) => f.debug_tuple("Text").field(s).finish(),
            RuleInput::Inline(rule) => write!(f, "Inline({:p})", Arc::as_ptr(rule)),
            RuleInput::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
            RuleInput::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl Default for RuleInput {
    fn default() -> Self {
        RuleInput::List(Vec::new())
    }
}

impl From<&str> for RuleInput {
    fn from(s: &str) -> Self {
        RuleInput::Text(s.to_owned())
    }
}

impl From<String> for RuleInput {
    fn from(s: String) -> Self {
        RuleInput::Text(s)
    }
}

impl From<&String> for RuleInput {
    fn from(s: &String) -> Self {
        RuleInput::Text(s.clone())
    }
}

impl From<Arc<dyn Rule>> for RuleInput {
    fn from(rule: Arc<dyn Rule>) -> Self {
        RuleInput::Inline(rule)
    }
}

impl From<RuleSpec> for RuleInput {
    fn from(spec: RuleSpec) -> Self {
        RuleInput::Spec(spec)
    }
}

impl From<&[RuleSpec]> for RuleInput {
    fn from(specs: &[RuleSpec]) -> Self {
        RuleInput::List(specs.iter().cloned().map(RuleInput::Spec).collect())
    }
}

impl<T: Into<RuleInput>> From<Vec<T>> for RuleInput {
    fn from(items: Vec<T>) -> Self {
        RuleInput::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RuleInput>, const N: usize> From<[T; N]> for RuleInput {
    fn from(items: [T; N]) -> Self {
        RuleInput::List(items.into_iter().map(Into::into).collect())
    }
}
