//! The built-in rule catalog.
//!
//! Every rule except `required` passes on empty values (null, blank strings,
//! empty lists), so `minLength[3]` alone accepts an omitted optional field and
//! `required|minLength[3]` demands both.

mod format;
mod length;
mod membership;
mod numeric;
mod one_of;
mod presence;

use crate::{rule_fn, RuleRegistry};

pub use one_of::{one_of, OneOf};

/// Register every built-in rule on `registry`, replacing same-named entries.
pub fn register_builtins(registry: &RuleRegistry) {
    registry.register("required", rule_fn(presence::required));

    registry.register("minLength", rule_fn(length::min_length));
    registry.register("maxLength", rule_fn(length::max_length));
    registry.register("length", rule_fn(length::exact_length));

    registry.register("between", rule_fn(numeric::between));
    registry.register("Between", rule_fn(numeric::between));
    registry.register("min", rule_fn(numeric::min));
    registry.register("max", rule_fn(numeric::max));
    registry.register("isNumber", rule_fn(numeric::is_number));
    registry.register("isInteger", rule_fn(numeric::is_integer));
    registry.register("isBoolean", rule_fn(numeric::is_boolean));

    registry.register("isEmail", rule_fn(format::is_email));
    registry.register("isPhoneNumber", rule_fn(format::is_phone_number));
    registry.register("isUrl", rule_fn(format::is_url));
    registry.register("alpha", rule_fn(format::alpha));
    registry.register("alphaNumeric", rule_fn(format::alpha_numeric));

    registry.register("in", rule_fn(membership::one_of_values));
    registry.register("notIn", rule_fn(membership::none_of_values));
    registry.register("sameAs", rule_fn(membership::same_as));

    registry.register("oneOf", std::sync::Arc::new(OneOf::from_params()));
}
