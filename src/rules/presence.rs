use crate::{Check, RuleRequest};

pub(super) fn required(req: &RuleRequest) -> Check {
    if req.value().is_empty() {
        Check::fail()
    } else {
        Check::Pass
    }
}
