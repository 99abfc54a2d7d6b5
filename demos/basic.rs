use ruleval::{rule_fn, Context, ValidationRequest, Validator};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let validator = Validator::new();

    // Custom rules join the built-ins under their own name
    validator.register(
        "noAdmin",
        rule_fn(|req| {
            if req.value().to_text().eq_ignore_ascii_case("admin") {
                "That username is reserved."
            } else {
                ""
            }
        }),
    );

    for username in ["ada", "", "x", "admin", "grace_hopper!"] {
        let request = ValidationRequest::new(username, "required|minLength[3]|noAdmin|alpha")
            .field("username")
            .context(Context::new().set("form", "signup"));

        match validator.validate(request).await {
            Ok(ok) => println!("{:>16}  ok    {}", format!("{username:?}"), ok.value()),
            Err(failure) => println!(
                "{:>16}  fail  {} ({})",
                format!("{username:?}"),
                failure.message(),
                failure.rule()
            ),
        }
    }
}
