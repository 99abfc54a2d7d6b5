use ruleval::{Context, Schema, Validator};

const DSL: &str = r#"
# profile form
field user.name as "Name":   required | alpha
field user.email as "Email": required | isEmail
field user.age as "Age":     isInteger | between[13,120]
field user.site as "Website": isUrl
"#;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let schema = Schema::from_dsl(DSL).expect("failed to parse schema");
    let validator = Validator::new();
    schema
        .check(validator.registry())
        .expect("schema uses unknown rules");
    println!("{schema}");

    let ctx = Context::new()
        .set("user.name", "Ada")
        .set("user.email", "ada@analytical")
        .set("user.age", 9_i64)
        .set("user.site", "https://example.com");

    let report = validator.validate_schema(&schema, &ctx).await;
    println!("{report}");
    for (field, message) in report.messages() {
        println!("  {field}: {message}");
    }
}
