use crate::{Check, InvalidParams, MessageParams, RuleRequest};

pub(super) fn one_of_values(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let allowed = non_empty_params(req)?;
    let text = req.value().to_text();
    if req.value().is_empty() || allowed.iter().any(|a| *a == text.trim()) {
        return Ok(Check::Pass);
    }
    Ok(Check::Fail(MessageParams::new().with("allowed", allowed.join(", "))))
}

pub(super) fn none_of_values(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let denied = non_empty_params(req)?;
    let text = req.value().to_text();
    if req.value().is_empty() || !denied.iter().any(|d| *d == text.trim()) {
        return Ok(Check::Pass);
    }
    Ok(Check::Fail(MessageParams::new().with("denied", denied.join(", "))))
}

/// Compares against another field of the request context.
pub(super) fn same_as(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let other = req
        .param(0)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| InvalidParams::new(req.rule_name(), "missing parameter 'field'"))?;
    if req.value().is_empty() || req.context().value_of(other) == *req.value() {
        return Ok(Check::Pass);
    }
    Ok(Check::Fail(MessageParams::new().with("other", other)))
}

fn non_empty_params(req: &RuleRequest) -> Result<&[String], InvalidParams> {
    if req.params().is_empty() {
        return Err(InvalidParams::new(
            req.rule_name(),
            "expected at least one value",
        ));
    }
    Ok(req.params())
}
