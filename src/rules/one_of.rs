use std::sync::Arc;

use tracing::trace;

use crate::messages::{self, MessageParams};
use crate::parse::parse_rules;
use crate::{
    BoxError, Check, FailureKind, InvalidParams, Rule, RuleFuture, RuleInput, RuleRequest, RuleSpec,
    ValidationRequest,
};

/// Separates the rules of one alternative when alternatives are given as
/// parameters, as in `oneOf[required&isEmail,isPhoneNumber]`.
const PARAM_CHAIN: char = '&';

/// Passes when the value satisfies at least one of several rule chains.
///
/// Alternatives run in order through the calling [`Validator`](crate::Validator)
/// and the first one to pass wins; later alternatives are not tried. When all
/// of them fail, the rule fails with the `rules.one_of` message, whose
/// `{errors}` parameter lists every alternative's message joined by `"; "`.
/// An alternative that fails for any other reason than rejecting the value
/// (an unknown rule name, bad parameters, a rule error) stops the search and
/// its failure is reported with its own kind and message.
///
/// ```
/// use ruleval::{one_of, ValidationRequest, Validator};
///
/// # futures::executor::block_on(async {
/// let contact = one_of(["isEmail", "isPhoneNumber"]);
/// let ok = Validator::new()
///     .validate(ValidationRequest::new("+14155551234", vec![contact]))
///     .await;
/// assert!(ok.is_ok());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct OneOf {
    alternatives: Option<Vec<Arc<[RuleSpec]>>>,
}

impl OneOf {
    #[must_use]
    pub fn new<I, R>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleInput>,
    {
        Self {
            alternatives: Some(
                alternatives
                    .into_iter()
                    .map(|alt| parse_rules(alt).into())
                    .collect(),
            ),
        }
    }

    /// A `OneOf` that reads its alternatives from the rule's parameters, one
    /// alternative per parameter with `&` between chained rules.
    #[must_use]
    pub fn from_params() -> Self {
        Self { alternatives: None }
    }

    fn alternatives(&self, req: &RuleRequest) -> Result<Vec<Arc<[RuleSpec]>>, InvalidParams> {
        let alternatives = match &self.alternatives {
            Some(alternatives) => alternatives.clone(),
            None => req
                .params()
                .iter()
                .map(|param| parse_rules(param.replace(PARAM_CHAIN, "|")).into())
                .collect(),
        };
        let alternatives: Vec<Arc<[RuleSpec]>> = alternatives
            .into_iter()
            .filter(|alt: &Arc<[RuleSpec]>| !alt.is_empty())
            .collect();
        if alternatives.is_empty() {
            return Err(InvalidParams::new(
                req.rule_name(),
                "expected at least one alternative",
            ));
        }
        Ok(alternatives)
    }
}

impl OneOf {
    async fn run(&self, req: RuleRequest) -> Result<Check, BoxError> {
        let alternatives = self.alternatives(&req)?;
        let mut errors = Vec::with_capacity(alternatives.len());

        for (index, alternative) in alternatives.iter().enumerate() {
            let mut request = ValidationRequest::new(req.value().clone(), &alternative[..])
                .context(req.context().clone());
            if let Some(field) = req.field() {
                request = request.field(field);
            }
            if let Some(label) = req.label() {
                request = request.label(label);
            }
            match req.validator().validate(request).await {
                Ok(_) => {
                    trace!(index, "alternative matched");
                    return Ok(Check::Pass);
                }
                Err(failure) => match failure.kind() {
                    FailureKind::Rejected | FailureKind::Timeout => {
                        errors.push(failure.message().to_owned());
                    }
                    // A broken alternative is reported, not skipped.
                    _ => return Err(Box::new(failure) as BoxError),
                },
            }
        }

        let params = MessageParams::new().with("errors", errors.join("; "));
        Ok(Check::Message(req.translate(messages::ONE_OF, params)))
    }
}

impl Rule for OneOf {
    fn check(&self, req: RuleRequest) -> RuleFuture<'_> {
        Box::pin(self.run(req))
    }
}

/// Shorthand for `Arc::new(OneOf::new(alternatives))`.
pub fn one_of<I, R>(alternatives: I) -> Arc<dyn Rule>
where
    I: IntoIterator<Item = R>,
    R: Into<RuleInput>,
{
    Arc::new(OneOf::new(alternatives))
}
