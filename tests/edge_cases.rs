use std::sync::Arc;
use std::time::Duration;

use ruleval::{
    async_rule, parse_rules, rule_fn, Check, Context, FailureKind, InvalidParams, MessageParams,
    RegistryError, RuleRegistry, RuleRequest, RuleSpec, ValidationRequest, Validator, Value,
};

fn isolated() -> Validator {
    Validator::builder()
        .registry(Arc::new(RuleRegistry::with_builtins()))
        .build()
}

#[test]
fn blank_inputs_parse_to_nothing() {
    assert!(parse_rules("").is_empty());
    assert!(parse_rules("   ").is_empty());
    assert!(parse_rules("|||").is_empty());
    assert!(parse_rules(vec!["", " | "]).is_empty());
    assert!(parse_rules(Vec::<String>::new()).is_empty());
}

#[test]
fn duplicate_rules_are_kept() {
    let specs = parse_rules("minLength[2]|minLength[4]");
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].params(), &["2".to_owned()]);
    assert_eq!(specs[1].params(), &["4".to_owned()]);
}

#[test]
fn mixed_list_of_text_and_inline() {
    let inline = rule_fn(|_| true);
    let specs = parse_rules(vec![
        ruleval::RuleInput::from("required|alpha"),
        ruleval::RuleInput::from(Arc::clone(&inline)),
        ruleval::RuleInput::from("maxLength[4]"),
    ]);
    assert_eq!(specs.len(), 4);
    assert_eq!(specs[2], RuleSpec::inline(inline));
    assert_eq!(specs[3].name(), Some("maxLength"));
}

#[test]
fn blank_registration_is_ignored() {
    let registry = RuleRegistry::new();
    assert!(!registry.register("", rule_fn(|_| true)));
    assert!(!registry.register("   ", rule_fn(|_| true)));
    assert!(registry.is_empty());
    assert!(matches!(
        registry.try_register(" ", rule_fn(|_| true)),
        Err(RegistryError::InvalidName { .. })
    ));
}

#[tokio::test]
async fn inline_rule_sees_whole_request() {
    let validator = isolated();
    let probe = rule_fn(|req: &RuleRequest| {
        assert_eq!(req.rules().len(), 2);
        assert_eq!(req.rule_name(), "inline");
        assert_eq!(req.field(), Some("nickname"));
        assert_eq!(req.context().get("locale"), Some(&Value::from("en")));
        true
    });
    let ok = validator
        .validate(
            ValidationRequest::new("zed", vec![ruleval::RuleInput::from("required"), probe.into()])
                .field("nickname")
                .context(Context::new().set("locale", "en")),
        )
        .await
        .unwrap();
    assert_eq!(ok.field(), Some("nickname"));
    assert_eq!(ok.context().get("locale"), Some(&Value::from("en")));
}

#[tokio::test]
async fn failure_carries_request_context() {
    let failure = isolated()
        .validate(
            ValidationRequest::new("", "required|alpha")
                .field("name")
                .context(Context::new().set("form.id", 7_i64)),
        )
        .await
        .unwrap_err();
    assert_eq!(failure.value(), &Value::from(""));
    assert_eq!(failure.rules().len(), 2);
    assert_eq!(failure.context().get("form.id"), Some(&Value::Int(7)));
    assert_eq!(failure.to_string(), "The name is required.");
}

#[tokio::test]
async fn fail_params_feed_the_message() {
    let validator = isolated();
    validator.register(
        "divisibleBy",
        rule_fn(|req: &RuleRequest| -> Result<Check, InvalidParams> {
            let divisor = req.number_param(0, "divisor")?;
            let n = req.value().as_number().unwrap_or_default();
            if n % divisor == 0.0 {
                Ok(Check::Pass)
            } else {
                Ok(Check::fail_with([("divisor", divisor.to_string())]))
            }
        }),
    );

    let messages = ruleval::DefaultMessages::new()
        .with_template("rules.divisibleBy", "{field} must be divisible by {divisor}");
    let validator = Validator::builder()
        .registry(Arc::clone(validator.registry()))
        .messages(messages)
        .build();

    let failure = validator
        .validate(ValidationRequest::new(7_i64, "divisibleBy[3]").field("Count"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), "Count must be divisible by 3");

    let failure = validator
        .validate(ValidationRequest::new(7_i64, "divisibleBy[zero]"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::InvalidParameters);
}

#[tokio::test]
async fn translator_receives_standard_params() {
    let seen = Arc::new(parking_lot::Mutex::new(None));
    let sink = Arc::clone(&seen);
    let validator = Validator::builder()
        .registry(Arc::new(RuleRegistry::with_builtins()))
        .messages(move |key: &str, params: &MessageParams| {
            *sink.lock() = Some((key.to_owned(), params.clone()));
            format!("{key}!")
        })
        .build();

    let failure = validator
        .validate(ValidationRequest::new("abc", "isEmail"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), "rules.isEmail!");

    let (key, params) = seen.lock().clone().unwrap();
    assert_eq!(key, "rules.isEmail");
    assert_eq!(params.get("rule"), Some("isEmail"));
    assert_eq!(params.get("value"), Some("abc"));
    assert_eq!(params.get("field"), Some("value"));
}

#[tokio::test]
async fn panicking_async_rule_is_contained() {
    let validator = isolated();
    validator.register(
        "asyncPanic",
        async_rule(|_req: RuleRequest| async move {
            tokio::task::yield_now().await;
            if true {
                panic!("deep trouble");
            }
            true
        }),
    );
    let failure = validator
        .validate(ValidationRequest::new("x", "asyncPanic"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Execution);
    assert_eq!(failure.message(), "deep trouble");
}

#[tokio::test(start_paused = true)]
async fn slow_rule_times_out() {
    let validator = Validator::builder()
        .registry(Arc::new(RuleRegistry::with_builtins()))
        .rule_timeout(Duration::from_millis(100))
        .build();
    validator.register(
        "slow",
        async_rule(|_req: RuleRequest| async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            true
        }),
    );

    let failure = validator
        .validate(ValidationRequest::new("x", "required|slow|alpha"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Timeout);
    assert_eq!(failure.rule().name(), Some("slow"));
    assert_eq!(failure.message(), "Validation rule 'slow' timed out after 100ms.");
}

#[tokio::test]
async fn global_registry_is_shared() {
    let name = "edgeCasesGlobalProbe";
    RuleRegistry::global().register(name, rule_fn(|_| false));
    let failure = Validator::global()
        .validate(ValidationRequest::new("x", name))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Rejected);
    assert!(Validator::new()
        .validate(ValidationRequest::new("x", name))
        .await
        .is_err_and(|f| f.kind() == FailureKind::UnknownRule));
}
