use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use super::context::Context;
use super::spec::RuleSpec;
use super::value::Value;
use crate::messages::MessageParams;
use crate::Validator;

/// Error type a rule may fail with. Its `Display` text becomes the failure message.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by [`Rule::check`].
pub type RuleFuture<'a> = BoxFuture<'a, Result<Check, BoxError>>;

/// A unit of validation logic.
///
/// Implementations receive an owned [`RuleRequest`] and resolve to a [`Check`].
/// Returning an error is treated the same as a failed check: the error's text
/// becomes the failure message. Use [`rule_fn`] and [`async_rule`] to build rules
/// from closures.
pub trait Rule: Send + Sync {
    fn check(&self, req: RuleRequest) -> RuleFuture<'_>;
}

/// The verdict of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The value satisfies the rule.
    Pass,
    /// The value fails; the engine resolves a message for the rule's name using
    /// these named parameters.
    Fail(MessageParams),
    /// The value fails with this exact message.
    Message(String),
}

impl Check {
    #[must_use]
    pub fn fail() -> Self {
        Check::Fail(MessageParams::new())
    }

    #[must_use]
    pub fn fail_with(params: impl Into<MessageParams>) -> Self {
        Check::Fail(params.into())
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Check::Pass)
    }
}

/// Conversion from the natural return values of rule closures into a [`Check`].
///
/// `true` and `()` pass, `false` fails generically, a non-empty string fails with
/// that message and an empty string passes. `Err` values become execution errors.
pub trait IntoCheck {
    /// # Errors
    ///
    /// Returns the rule's own error when the closure produced one.
    fn into_check(self) -> Result<Check, BoxError>;
}

impl IntoCheck for Check {
    fn into_check(self) -> Result<Check, BoxError> {
        Ok(self)
    }
}

impl IntoCheck for bool {
    fn into_check(self) -> Result<Check, BoxError> {
        Ok(if self { Check::Pass } else { Check::fail() })
    }
}

impl IntoCheck for () {
    fn into_check(self) -> Result<Check, BoxError> {
        Ok(Check::Pass)
    }
}

impl IntoCheck for String {
    fn into_check(self) -> Result<Check, BoxError> {
        Ok(if self.is_empty() {
            Check::Pass
        } else {
            Check::Message(self)
        })
    }
}

impl IntoCheck for &str {
    fn into_check(self) -> Result<Check, BoxError> {
        self.to_owned().into_check()
    }
}

impl IntoCheck for Option<String> {
    fn into_check(self) -> Result<Check, BoxError> {
        self.map_or(Ok(Check::Pass), IntoCheck::into_check)
    }
}

impl<T, E> IntoCheck for Result<T, E>
where
    T: IntoCheck,
    E: Into<BoxError>,
{
    fn into_check(self) -> Result<Check, BoxError> {
        self.map_err(Into::into)?.into_check()
    }
}

/// Raised by a rule whose own parameters are missing or malformed.
///
/// The executor classifies it separately from ordinary failures and resolves the
/// invalid-parameters message for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidParams {
    pub rule: String,
    pub reason: String,
}

impl InvalidParams {
    #[must_use]
    pub fn new(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

/// Everything a rule sees for one invocation.
#[derive(Clone)]
pub struct RuleRequest {
    pub(crate) value: Value,
    pub(crate) params: Vec<String>,
    pub(crate) spec: RuleSpec,
    pub(crate) rules: Arc<[RuleSpec]>,
    pub(crate) context: Arc<Context>,
    pub(crate) field: Option<String>,
    pub(crate) label: Option<String>,
    pub(crate) validator: Validator,
}

impl RuleRequest {
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Parameters after merging: the rule's own, else the request-level ones.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Parse parameter `index` as a number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParams`] if the parameter is absent or not numeric.
    pub fn number_param(&self, index: usize, what: &str) -> Result<f64, InvalidParams> {
        let raw = self.param(index).ok_or_else(|| {
            InvalidParams::new(self.rule_name(), format!("missing parameter '{what}'"))
        })?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| {
                InvalidParams::new(
                    self.rule_name(),
                    format!("parameter '{what}' is not a number: '{raw}'"),
                )
            })
    }

    /// The rule spec being executed.
    #[must_use]
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// The full rule list this invocation belongs to.
    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    #[must_use]
    pub fn rule_name(&self) -> &str {
        self.spec.label()
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Display name of the field, when one was given.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The validator running this rule. Composite rules use it to run nested chains.
    #[must_use]
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Resolve a message through the validator's translator, adding the
    /// standard `rule`, `value` and `field` parameters.
    #[must_use]
    pub fn translate(&self, key: &str, params: MessageParams) -> String {
        let params = crate::validate::standard_params(
            params,
            self.rule_name(),
            &self.value,
            self.label().or(self.field()),
        );
        self.validator.messages().translate(key, &params)
    }
}

impl std::fmt::Debug for RuleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRequest")
            .field("value", &self.value)
            .field("params", &self.params)
            .field("spec", &self.spec)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

struct FnRule<F, R> {
    f: F,
    _returns: PhantomData<fn() -> R>,
}

impl<F, R> Rule for FnRule<F, R>
where
    F: Fn(&RuleRequest) -> R + Send + Sync,
    R: IntoCheck,
{
    fn check(&self, req: RuleRequest) -> RuleFuture<'_> {
        Box::pin(async move { (self.f)(&req).into_check() })
    }
}

struct AsyncFnRule<F, Fut> {
    f: F,
    _returns: PhantomData<fn() -> Fut>,
}

impl<F, Fut> Rule for AsyncFnRule<F, Fut>
where
    F: Fn(RuleRequest) -> Fut + Send + Sync,
    Fut: Future + Send,
    Fut::Output: IntoCheck,
{
    fn check(&self, req: RuleRequest) -> RuleFuture<'_> {
        Box::pin(async move { (self.f)(req).await.into_check() })
    }
}

/// Build a rule from a synchronous closure.
///
/// ```
/// use ruleval::{rule_fn, Value};
///
/// let even = rule_fn(|req| matches!(req.value(), Value::Int(n) if n % 2 == 0));
/// # let _ = even;
/// ```
pub fn rule_fn<F, R>(f: F) -> Arc<dyn Rule>
where
    F: Fn(&RuleRequest) -> R + Send + Sync + 'static,
    R: IntoCheck + 'static,
{
    Arc::new(FnRule {
        f,
        _returns: PhantomData,
    })
}

/// Build a rule from a closure returning a future.
pub fn async_rule<F, Fut>(f: F) -> Arc<dyn Rule>
where
    F: Fn(RuleRequest) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoCheck,
{
    Arc::new(AsyncFnRule {
        f,
        _returns: PhantomData,
    })
}
