use crate::{Check, InvalidParams, MessageParams, RuleRequest};

pub(super) fn min_length(req: &RuleRequest) -> Result<Check, InvalidParams> {
    compare_length(req, "min", |len, bound| len >= bound)
}

pub(super) fn max_length(req: &RuleRequest) -> Result<Check, InvalidParams> {
    compare_length(req, "max", |len, bound| len <= bound)
}

pub(super) fn exact_length(req: &RuleRequest) -> Result<Check, InvalidParams> {
    compare_length(req, "length", |len, bound| (len - bound).abs() < f64::EPSILON)
}

#[allow(clippy::cast_precision_loss)]
fn compare_length(
    req: &RuleRequest,
    what: &str,
    accept: impl Fn(f64, f64) -> bool,
) -> Result<Check, InvalidParams> {
    let bound = req.number_param(0, what)?;
    if bound < 0.0 {
        return Err(InvalidParams::new(
            req.rule_name(),
            format!("parameter '{what}' must not be negative"),
        ));
    }
    if req.value().is_empty() || accept(req.value().len() as f64, bound) {
        return Ok(Check::Pass);
    }
    let raw = req.param(0).unwrap_or_default().trim();
    Ok(Check::Fail(MessageParams::new().with(what, raw)))
}
