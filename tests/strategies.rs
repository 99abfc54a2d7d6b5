use proptest::prelude::*;
use ruleval::Value;

// --- Rule vocabulary ---
// Built-in rules that take no parameters, and parameterised ones with
// generated bounds. Everything here is registered by `with_builtins`.

const BARE_RULES: &[&str] = &[
    "required",
    "isNumber",
    "isInteger",
    "isBoolean",
    "isEmail",
    "isPhoneNumber",
    "isUrl",
    "alpha",
    "alphaNumeric",
];

/// A single rule segment such as `required` or `between[3,17]`.
pub fn arb_rule() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(BARE_RULES).prop_map(str::to_owned),
        (0_u32..20).prop_map(|n| format!("minLength[{n}]")),
        (0_u32..20).prop_map(|n| format!("maxLength[{n}]")),
        (-50_i64..50, 0_i64..100).prop_map(|(lo, span)| format!("between[{lo},{}]", lo + span)),
        prop::collection::vec("[a-z]{1,4}", 1..4).prop_map(|v| format!("in[{}]", v.join(","))),
    ]
}

/// A non-empty chain of rule segments.
pub fn arb_rules() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_rule(), 1..6)
}

/// Values of every shape the validator accepts.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000_i64..1000).prop_map(Value::Int),
        (-1000.0_f64..1000.0).prop_map(Value::Float),
        "[a-zA-Z0-9@.+ ]{0,24}".prop_map(Value::String),
        prop::collection::vec("[a-z]{0,5}", 0..4)
            .prop_map(|items| Value::List(items.into_iter().map(Value::String).collect())),
    ]
}

/// Arbitrary rule-expression text, including separators and stray brackets.
pub fn arb_expression() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9|\\[\\], ]{0,40}"
}
