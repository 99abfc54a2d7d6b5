use tracing::trace;
use winnow::Parser;

use crate::{FieldRules, RuleInput, RuleSpec};

use super::grammar::rule_segment;

const SEPARATOR: char = '|';

/// The result of parsing schema DSL input.
#[derive(Debug)]
pub struct ParsedSchema {
    pub fields: Vec<FieldRules>,
}

/// Parse rule input into an ordered list of rule specs.
///
/// Strings are split on `|`; each segment is trimmed of whitespace and stray
/// separators, and blank segments are dropped. `name[a, b]` yields the name and
/// the comma-separated, trimmed parameters. Order is preserved and nothing is
/// deduplicated. This never fails: unparseable input simply yields no specs.
///
/// ```
/// use ruleval::{parse_rules, RuleSpec};
///
/// let specs = parse_rules("required|between[10, 20]");
/// assert_eq!(specs[1], RuleSpec::named("between", vec!["10".into(), "20".into()]));
/// ```
pub fn parse_rules(input: impl Into<RuleInput>) -> Vec<RuleSpec> {
    let mut specs = Vec::new();
    collect(input.into(), &mut specs);
    trace!(count = specs.len(), "parsed rule specs");
    specs
}

fn collect(input: RuleInput, out: &mut Vec<RuleSpec>) {
    match input {
        RuleInput::Inline(rule) => out.push(RuleSpec::inline(rule)),
        RuleInput::Spec(spec) => out.push(spec),
        RuleInput::Text(text) => out.extend(text.split(SEPARATOR).filter_map(parse_segment)),
        RuleInput::List(items) => {
            for item in items {
                collect(item, out);
            }
        }
    }
}

fn parse_segment(segment: &str) -> Option<RuleSpec> {
    let trimmed = segment.trim_matches(|c: char| c == SEPARATOR || c.is_whitespace());
    if trimmed.is_empty() {
        return None;
    }
    let (name, raw_params) = rule_segment.parse(trimmed).unwrap_or((trimmed, None));
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(RuleSpec::named(name, raw_params.map(split_params).unwrap_or_default()))
}

/// Parameters are the text up to the first `]`; anything after it is ignored.
fn split_params(raw: &str) -> Vec<String> {
    let inner = raw.find(']').map_or(raw, |end| &raw[..end]);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(',').map(|token| token.trim().to_owned()).collect()
}
