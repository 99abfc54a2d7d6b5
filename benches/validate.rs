use criterion::{black_box, criterion_group, criterion_main, Criterion};
use futures::executor::block_on;
use ruleval::{parse_rules, Context, Schema, ValidationRequest, Validator};

/// A pipe-joined chain of `n` rules that all pass for the value `"abcdef"`.
fn passing_chain(n: usize) -> String {
    let pool = ["required", "alpha", "minLength[3]", "maxLength[32]", "alphaNumeric"];
    (0..n).map(|i| pool[i % pool.len()]).collect::<Vec<_>>().join("|")
}

fn build_schema(n: usize) -> (Schema, Context) {
    let mut dsl = String::new();
    let mut ctx = Context::new();
    for i in 0..n {
        dsl.push_str(&format!("field f{i}: required|isInteger|between[1,100]\n"));
        ctx = ctx.set(&format!("f{i}"), 10_i64);
    }
    (Schema::from_dsl(&dsl).unwrap(), ctx)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rules");

    for &n in &[5, 20, 50] {
        let chain = passing_chain(n);
        group.bench_function(&format!("{n}_segments"), |b| {
            b.iter(|| parse_rules(black_box(chain.as_str())));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let validator = Validator::new();

    for &n in &[5, 20, 50] {
        let chain = passing_chain(n);
        group.bench_function(&format!("{n}_rules_pass"), |b| {
            b.iter(|| {
                block_on(validator.validate(ValidationRequest::new(
                    black_box("abcdef"),
                    chain.as_str(),
                )))
            });
        });
    }

    let chain = format!("required|{}", passing_chain(49));
    group.bench_function("50_rules_fail_first", |b| {
        b.iter(|| block_on(validator.validate(ValidationRequest::new(black_box(""), chain.as_str()))));
    });

    group.finish();
}

fn bench_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_schema");
    let validator = Validator::new();

    for &n in &[5, 20, 50] {
        let (schema, ctx) = build_schema(n);
        group.bench_function(&format!("{n}_fields"), |b| {
            b.iter(|| block_on(validator.validate_schema(&schema, black_box(&ctx))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_validate, bench_schema);
criterion_main!(benches);
