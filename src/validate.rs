use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, trace};

use crate::messages::{self, DefaultMessages, MessageParams, Translate};
use crate::parse::parse_rules;
use crate::types::{
    BoxError, Check, Context, Failure, FailureKind, InvalidParams, Outcome, Rule, RuleRegistry,
    RuleRequest, RuleSpec, Schema, Validated, ValidationReport, ValidationRequest, Value,
};

/// Runs rule chains against values.
///
/// A `Validator` bundles the rule registry it resolves names against, the
/// translator it resolves default messages with, and an optional per-rule
/// timeout. Cloning is cheap; clones share the same registry.
///
/// # Example
///
/// ```
/// use ruleval::{ValidationRequest, Validator};
///
/// # futures::executor::block_on(async {
/// let validator = Validator::new();
/// let ok = validator
///     .validate(ValidationRequest::new("hello", "minLength[3]|maxLength[10]"))
///     .await
///     .unwrap();
/// assert_eq!(ok.value().as_str(), Some("hello"));
/// # });
/// ```
#[derive(Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    messages: Arc<dyn Translate>,
    rule_timeout: Option<Duration>,
}

/// Builder for a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    registry: Option<Arc<RuleRegistry>>,
    messages: Option<Arc<dyn Translate>>,
    rule_timeout: Option<Duration>,
}

impl ValidatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve rule names against `registry`. Defaults to a fresh registry
    /// holding the built-in rules.
    #[must_use]
    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Resolve default messages with `messages`. Defaults to [`DefaultMessages`].
    #[must_use]
    pub fn messages(mut self, messages: impl Translate + 'static) -> Self {
        self.messages = Some(Arc::new(messages));
        self
    }

    /// Fail any single rule that runs longer than `limit`.
    ///
    /// Timeouts are driven by tokio's timer. When validation runs outside a
    /// tokio runtime, rules run without the limit.
    #[must_use]
    pub fn rule_timeout(mut self, limit: Duration) -> Self {
        self.rule_timeout = Some(limit);
        self
    }

    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(RuleRegistry::with_builtins())),
            messages: self
                .messages
                .unwrap_or_else(|| Arc::new(DefaultMessages::new())),
            rule_timeout: self.rule_timeout,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// A validator with its own registry of built-in rules and English messages.
    #[must_use]
    pub fn new() -> Self {
        ValidatorBuilder::new().build()
    }

    /// A validator over the process-wide [`RuleRegistry::global`].
    #[must_use]
    pub fn global() -> Self {
        ValidatorBuilder::new()
            .registry(RuleRegistry::global())
            .build()
    }

    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn messages(&self) -> &dyn Translate {
        self.messages.as_ref()
    }

    /// Shorthand for registering on this validator's registry.
    pub fn register(&self, name: &str, rule: Arc<dyn Rule>) -> bool {
        self.registry.register(name, rule)
    }

    /// Run the request's rules against its value, in order, stopping at the
    /// first failure.
    ///
    /// The returned future always yields once before doing any work, so even a
    /// chain of purely synchronous rules never completes on its first poll.
    /// Every failure mode (unknown rule, bad parameters, rule error, panic,
    /// timeout, rejection) resolves to [`Failure`]; nothing is raised.
    ///
    /// # Errors
    ///
    /// Returns [`Failure`] describing the first rule that did not pass.
    pub async fn validate(&self, request: ValidationRequest) -> Outcome {
        tokio::task::yield_now().await;

        let ValidationRequest {
            value,
            rules,
            params,
            context,
            field,
            label,
        } = request;
        let rules: Arc<[RuleSpec]> = parse_rules(rules).into();
        let context = Arc::new(context);
        debug!(rules = rules.len(), field = field.as_deref(), "validating value");

        let chain = Chain {
            value: &value,
            rules: &rules,
            params: &params,
            context: &context,
            field: field.as_deref(),
            label: label.as_deref().or(field.as_deref()),
        };
        for (index, spec) in rules.iter().enumerate() {
            trace!(index, rule = %spec, "running rule");
            if let Err(failure) = self.run_rule(&chain, spec).await {
                debug!(index, rule = %spec, kind = %failure.kind(), "rule failed");
                let context = Arc::unwrap_or_clone(context);
                return Err(failure.with_origin(context, field));
            }
        }

        let context = Arc::unwrap_or_clone(context);
        Ok(Validated::new(value, rules, context, field))
    }

    /// Validate every field of `schema` against the values in `context`.
    ///
    /// Fields run one after another in declaration order. A field whose path is
    /// missing from the context is validated as [`Value::Null`].
    pub async fn validate_schema(&self, schema: &Schema, context: &Context) -> ValidationReport {
        let started = Instant::now();
        let mut failures = Vec::new();
        let mut passed = Vec::new();
        let mut order = Vec::with_capacity(schema.len());

        for field in schema.fields() {
            order.push(field.path().to_owned());
            let mut request =
                ValidationRequest::new(context.value_of(field.path()), field.rules())
                    .field(field.path())
                    .context(context.clone());
            if let Some(label) = field.label() {
                request = request.label(label);
            }
            match self.validate(request).await {
                Ok(_) => passed.push(field.path().to_owned()),
                Err(failure) => failures.push(failure),
            }
        }

        ValidationReport::new(failures, passed, order, started.elapsed())
    }

    async fn run_rule(&self, chain: &Chain<'_>, spec: &RuleSpec) -> Result<(), Failure> {
        let rule = match spec {
            RuleSpec::Inline(inline) => Arc::clone(inline.rule()),
            RuleSpec::Named { name, .. } => match self.registry.lookup(name) {
                Some(rule) => rule,
                None => {
                    let message = self.resolve(chain, spec, messages::UNKNOWN_RULE, MessageParams::new());
                    return Err(chain.failure(FailureKind::UnknownRule, spec, message));
                }
            },
        };

        let params = if spec.params().is_empty() {
            chain.params.to_vec()
        } else {
            spec.params().to_vec()
        };
        let request = RuleRequest {
            value: chain.value.clone(),
            params,
            spec: spec.clone(),
            rules: Arc::clone(chain.rules),
            context: Arc::clone(chain.context),
            field: chain.field.map(str::to_owned),
            label: chain.label.map(str::to_owned),
            validator: self.clone(),
        };

        match self.invoke(rule.as_ref(), request).await {
            Ok(Check::Pass) => Ok(()),
            Ok(Check::Fail(params)) => {
                let key = spec
                    .name()
                    .map_or_else(|| messages::DEFAULT.to_owned(), messages::rule_key);
                let message = self.resolve(chain, spec, &key, params);
                Err(chain.failure(FailureKind::Rejected, spec, message))
            }
            Ok(Check::Message(message)) => Err(chain.failure(FailureKind::Rejected, spec, message)),
            Err(Fault::Error(err)) => Err(self.classify_error(chain, spec, &err)),
            Err(Fault::Panic(message)) => Err(chain.failure(FailureKind::Execution, spec, message)),
            Err(Fault::Timeout(limit)) => {
                let params = MessageParams::new().with("timeout_ms", limit.as_millis());
                let message = self.resolve(chain, spec, messages::TIMEOUT, params);
                Err(chain.failure(FailureKind::Timeout, spec, message))
            }
        }
    }

    /// Call the rule and await it, turning errors, panics and timeouts into a [`Fault`].
    async fn invoke(&self, rule: &dyn Rule, request: RuleRequest) -> Result<Check, Fault> {
        let future = panic::catch_unwind(AssertUnwindSafe(|| rule.check(request)))
            .map_err(|payload| Fault::Panic(panic_message(payload.as_ref())))?;
        let guarded = AssertUnwindSafe(future).catch_unwind();

        let settled = match self.timer() {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .map_err(|_| Fault::Timeout(limit))?,
            None => guarded.await,
        };

        match settled {
            Ok(Ok(check)) => Ok(check),
            Ok(Err(err)) => Err(Fault::Error(err)),
            Err(payload) => Err(Fault::Panic(panic_message(payload.as_ref()))),
        }
    }

    /// The per-rule timeout, if one is configured and a tokio timer is available.
    fn timer(&self) -> Option<Duration> {
        let limit = self.rule_timeout?;
        if tokio::runtime::Handle::try_current().is_err() {
            debug!(?limit, "no tokio runtime, running rule without its timeout");
            return None;
        }
        Some(limit)
    }

    fn classify_error(&self, chain: &Chain<'_>, spec: &RuleSpec, err: &BoxError) -> Failure {
        // A composite rule hands back the nested chain's failure as is.
        if let Some(nested) = err.downcast_ref::<Failure>() {
            return chain.failure(nested.kind(), spec, nested.message().to_owned());
        }
        if let Some(invalid) = err.downcast_ref::<InvalidParams>() {
            let params = MessageParams::new().with("reason", &invalid.reason);
            let message = self.resolve(chain, spec, messages::INVALID_PARAMS, params);
            return chain.failure(FailureKind::InvalidParameters, spec, message);
        }
        chain.failure(FailureKind::Execution, spec, err.to_string())
    }

    fn resolve(&self, chain: &Chain<'_>, spec: &RuleSpec, key: &str, params: MessageParams) -> String {
        let params = standard_params(params, spec.label(), chain.value, chain.label);
        self.messages.translate(key, &params)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("registry", &self.registry)
            .field("rule_timeout", &self.rule_timeout)
            .finish_non_exhaustive()
    }
}

/// Per-call state shared by every rule in one chain.
struct Chain<'a> {
    value: &'a Value,
    rules: &'a Arc<[RuleSpec]>,
    params: &'a [String],
    context: &'a Arc<Context>,
    field: Option<&'a str>,
    label: Option<&'a str>,
}

impl Chain<'_> {
    fn failure(&self, kind: FailureKind, spec: &RuleSpec, message: String) -> Failure {
        Failure::new(
            kind,
            self.value.clone(),
            spec.clone(),
            Arc::clone(self.rules),
            message,
        )
    }
}

enum Fault {
    Error(BoxError),
    Panic(String),
    Timeout(Duration),
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rule panicked".to_owned()
    }
}

/// Fill in the parameters every message may use: `rule`, `value`, `field`.
pub(crate) fn standard_params(
    mut params: MessageParams,
    rule: &str,
    value: &Value,
    field: Option<&str>,
) -> MessageParams {
    params.set_default("rule", rule);
    params.set_default("value", value.to_text());
    params.set_default("field", field.unwrap_or("value"));
    params
}
