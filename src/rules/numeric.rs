use crate::{Check, InvalidParams, MessageParams, RuleRequest, Value};

pub(super) fn between(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let min = req.number_param(0, "min")?;
    let max = req.number_param(1, "max")?;
    if min > max {
        return Err(InvalidParams::new(
            req.rule_name(),
            format!("min ({min}) is greater than max ({max})"),
        ));
    }
    Ok(within(req, |n| n >= min && n <= max, || {
        MessageParams::new()
            .with("min", raw_param(req, 0))
            .with("max", raw_param(req, 1))
    }))
}

pub(super) fn min(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let min = req.number_param(0, "min")?;
    Ok(within(req, |n| n >= min, || {
        MessageParams::new().with("min", raw_param(req, 0))
    }))
}

pub(super) fn max(req: &RuleRequest) -> Result<Check, InvalidParams> {
    let max = req.number_param(0, "max")?;
    Ok(within(req, |n| n <= max, || {
        MessageParams::new().with("max", raw_param(req, 0))
    }))
}

pub(super) fn is_number(req: &RuleRequest) -> bool {
    req.value().is_empty() || req.value().as_number().is_some()
}

pub(super) fn is_integer(req: &RuleRequest) -> bool {
    match req.value() {
        v if v.is_empty() => true,
        Value::Int(_) => true,
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        other => other.as_number().is_some_and(|n| n.fract() == 0.0),
    }
}

pub(super) fn is_boolean(req: &RuleRequest) -> bool {
    match req.value() {
        v if v.is_empty() => true,
        Value::Bool(_) => true,
        Value::Int(n) => *n == 0 || *n == 1,
        Value::String(s) => matches!(s.trim(), "true" | "false" | "1" | "0"),
        _ => false,
    }
}

/// Pass empty values, fail non-numbers and numbers outside the accepted range.
fn within(
    req: &RuleRequest,
    accept: impl Fn(f64) -> bool,
    params: impl FnOnce() -> MessageParams,
) -> Check {
    if req.value().is_empty() {
        return Check::Pass;
    }
    match req.value().as_number() {
        Some(n) if accept(n) => Check::Pass,
        _ => Check::Fail(params()),
    }
}

fn raw_param(req: &RuleRequest, index: usize) -> String {
    req.param(index).unwrap_or_default().trim().to_owned()
}
