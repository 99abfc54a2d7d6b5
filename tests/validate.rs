use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use ruleval::{
    async_rule, one_of, rule_fn, BoxError, FailureKind, RuleRegistry, RuleRequest, RuleSpec,
    ValidationRequest, Validator, Value,
};

fn isolated() -> Validator {
    Validator::builder()
        .registry(Arc::new(RuleRegistry::with_builtins()))
        .build()
}

// ---------------------------------------------------------------------------
// Short-circuit ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stops_at_first_failure() {
    let validator = isolated();
    let calls = Arc::new(AtomicUsize::new(0));
    let spy = Arc::clone(&calls);
    validator.register(
        "minLength",
        rule_fn(move |_| {
            spy.fetch_add(1, Ordering::SeqCst);
            true
        }),
    );

    let failure = validator
        .validate(ValidationRequest::new("", ["required", "minLength[5]"]))
        .await
        .unwrap_err();

    assert_eq!(failure.rule().name(), Some("required"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rules_run_in_given_order() {
    let validator = isolated();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let seen = Arc::clone(&seen);
        validator.register(
            name,
            rule_fn(move |req| {
                seen.lock().push(req.rule_name().to_owned());
                true
            }),
        );
    }

    validator
        .validate(ValidationRequest::new("x", "third|first|second|first"))
        .await
        .unwrap();

    assert_eq!(*seen.lock(), vec!["third", "first", "second", "first"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn async_rules_never_overlap() {
    let validator = isolated();
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

    for name in ["slowA", "slowB", "slowC"] {
        let (in_flight, peak, seen) = (Arc::clone(&in_flight), Arc::clone(&peak), Arc::clone(&seen));
        validator.register(
            name,
            async_rule(move |req: RuleRequest| {
                let (in_flight, peak, seen) =
                    (Arc::clone(&in_flight), Arc::clone(&peak), Arc::clone(&seen));
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    seen.lock().push(req.rule_name().to_owned());
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    tokio::task::yield_now().await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    true
                }
            }),
        );
    }

    validator
        .validate(ValidationRequest::new("x", "slowC|slowA|slowB|slowA"))
        .await
        .unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    assert_eq!(*seen.lock(), vec!["slowC", "slowA", "slowB", "slowA"]);
}

// ---------------------------------------------------------------------------
// Success, unknown rules, parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_echoes_value() {
    let ok = isolated()
        .validate(ValidationRequest::new("hello", "minLength[3]|maxLength[10]"))
        .await
        .unwrap();
    assert_eq!(ok.value(), &Value::from("hello"));
    assert_eq!(ok.rules().len(), 2);
}

#[tokio::test]
async fn unknown_rule_names_the_rule() {
    let failure = isolated()
        .validate(ValidationRequest::new("x", "totallyFakeRule"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::UnknownRule);
    assert!(failure.message().contains("totallyFakeRule"));
    assert_eq!(failure.rule(), &RuleSpec::named("totallyFakeRule", vec![]));
}

#[tokio::test]
async fn between_parses_bounds() {
    let validator = isolated();
    assert!(validator
        .validate(ValidationRequest::new(15_i64, "Between[10,20]"))
        .await
        .is_ok());

    let failure = validator
        .validate(ValidationRequest::new(25_i64, "Between[10,20]"))
        .await
        .unwrap_err();
    assert!(failure.message().contains("10"));
    assert!(failure.message().contains("20"));
    assert_eq!(failure.rule().params(), &["10".to_owned(), "20".to_owned()]);
}

#[tokio::test]
async fn request_params_fill_in_for_bare_rules() {
    let validator = isolated();
    let ok = validator
        .validate(ValidationRequest::new(15_i64, "between").params(["10", "20"]))
        .await;
    assert!(ok.is_ok());

    // Params written on the rule take precedence.
    let failure = validator
        .validate(ValidationRequest::new(15_i64, "between[1,5]").params(["10", "20"]))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Rejected);
}

#[tokio::test]
async fn missing_bounds_are_invalid_parameters() {
    let failure = isolated()
        .validate(ValidationRequest::new(15_i64, "between"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::InvalidParameters);
    assert!(failure.message().contains("between"));
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn last_registration_wins() {
    let validator = isolated();
    validator.register("A", rule_fn(|_| true));
    validator.register("A", rule_fn(|_| false));

    let failure = validator
        .validate(ValidationRequest::new("x", "A"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Rejected);
}

#[tokio::test]
async fn late_registration_is_visible() {
    let validator = isolated();
    assert!(validator
        .validate(ValidationRequest::new("x", "lateRule"))
        .await
        .is_err());
    validator.register("lateRule", rule_fn(|_| true));
    assert!(validator
        .validate(ValidationRequest::new("x", "lateRule"))
        .await
        .is_ok());
}

#[tokio::test]
async fn separate_registries_do_not_interfere() {
    let a = isolated();
    let b = isolated();
    a.register("onlyInA", rule_fn(|_| true));
    assert!(a.validate(ValidationRequest::new("x", "onlyInA")).await.is_ok());
    assert!(b.validate(ValidationRequest::new("x", "onlyInA")).await.is_err());
}

// ---------------------------------------------------------------------------
// Input forms and deferral
// ---------------------------------------------------------------------------

#[tokio::test]
async fn string_and_list_forms_are_equivalent() {
    let validator = isolated();
    let piped = validator
        .validate(ValidationRequest::new("ab", "required|minLength[3]"))
        .await
        .unwrap_err();
    let listed = validator
        .validate(ValidationRequest::new("ab", ["required", "minLength[3]"]))
        .await
        .unwrap_err();

    assert_eq!(piped.message(), listed.message());
    assert_eq!(piped.rule(), listed.rule());
    assert_eq!(piped.rules(), listed.rules());
    assert_eq!(piped.kind(), listed.kind());
}

#[test]
fn empty_rule_list_is_deferred() {
    let validator = isolated();
    let mut pending = Box::pin(validator.validate(ValidationRequest::new(42_i64, Vec::<&str>::new())));
    assert!((&mut pending).now_or_never().is_none());

    let ok = futures::executor::block_on(pending).unwrap();
    assert_eq!(ok.value(), &Value::Int(42));
}

// ---------------------------------------------------------------------------
// Error normalisation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rule_error_becomes_message() {
    let validator = isolated();
    validator.register(
        "explodes",
        rule_fn(|_| -> Result<bool, BoxError> { Err("boom".into()) }),
    );
    let failure = validator
        .validate(ValidationRequest::new("x", "explodes"))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Execution);
    assert_eq!(failure.message(), "boom");
}

#[tokio::test]
async fn returned_string_is_used_verbatim() {
    let validator = isolated();
    validator.register("picky", rule_fn(|_| "not picky enough"));
    let failure = validator
        .validate(ValidationRequest::new("x", "picky"))
        .await
        .unwrap_err();
    assert_eq!(failure.message(), "not picky enough");
}

// ---------------------------------------------------------------------------
// OneOf
// ---------------------------------------------------------------------------

#[tokio::test]
async fn one_of_email_or_phone() {
    let validator = isolated();
    let contact = one_of([vec!["isEmail"], vec!["isPhoneNumber"]]);

    assert!(validator
        .validate(ValidationRequest::new("+14155551234", vec![Arc::clone(&contact)]))
        .await
        .is_ok());

    let failure = validator
        .validate(ValidationRequest::new("neither", vec![contact]))
        .await
        .unwrap_err();
    assert!(failure.message().contains("valid email address"));
    assert!(failure.message().contains("valid phone number"));
}

#[tokio::test]
async fn one_of_registered_under_custom_name() {
    let validator = isolated();
    validator.register("contact", one_of(["isEmail", "isPhoneNumber"]));
    assert!(validator
        .validate(ValidationRequest::new("a@b.co", "required|contact"))
        .await
        .is_ok());
}
