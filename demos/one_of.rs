use ruleval::{one_of, ValidationRequest, Validator};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let validator = Validator::new();

    // Reusable composite, registered under its own name
    validator.register("contact", one_of(["isEmail", "isPhoneNumber"]));

    for value in ["ada@example.com", "+44 20 7946 0958", "carrier pigeon"] {
        let request = ValidationRequest::new(value, "required|contact").field("contact");
        match validator.validate(request).await {
            Ok(_) => println!("{value:>18}: accepted"),
            Err(failure) => println!("{value:>18}: {}", failure.message()),
        }
    }

    // The registered `oneOf` reads alternatives from its params; `&` chains rules
    let rules = "oneOf[isEmail, isUrl&maxLength[40]]";
    let outcome = validator
        .validate(ValidationRequest::new("https://example.com", rules))
        .await;
    println!("{rules}: {}", if outcome.is_ok() { "accepted" } else { "rejected" });
}
