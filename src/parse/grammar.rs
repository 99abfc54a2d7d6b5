use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, rest, take_till, take_while};

use crate::FieldRules;

use super::parser::{parse_rules, ParsedSchema};

// -- Rule segments ------------------------------------------------------------

/// One `|`-free segment: the name before `[`, and everything after it.
pub(crate) fn rule_segment<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Option<&'i str>)> {
    (take_till(0.., '['), opt(preceded('[', rest))).parse_next(input)
}

// -- Whitespace & comments ----------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

fn inline_space(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

// -- Field paths & labels -----------------------------------------------------

fn field_path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.'
        }),
    )
        .take()
        .parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        match any.parse_next(input)? {
            '"' => return Ok(s),
            '\\' => match any.parse_next(input)? {
                '"' => s.push('"'),
                '\\' => s.push('\\'),
                other => {
                    s.push('\\');
                    s.push(other);
                }
            },
            c => s.push(c),
        }
    }
}

fn label(input: &mut &str) -> ModalResult<String> {
    preceded(
        (inline_space, "as"),
        cut_err(preceded(inline_space, string_literal)).context(StrContext::Expected(
            StrContextValue::Description("quoted label"),
        )),
    )
    .parse_next(input)
}

// -- Field declarations -------------------------------------------------------

fn field_def(input: &mut &str) -> ModalResult<FieldRules> {
    ws.parse_next(input)?;
    "field".parse_next(input)?;
    inline_space.parse_next(input)?;

    let path = cut_err(field_path)
        .context(StrContext::Expected(StrContextValue::Description(
            "field path",
        )))
        .parse_next(input)?;

    let label = opt(label).parse_next(input)?;

    inline_space.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    inline_space.parse_next(input)?;

    let expression = till_line_ending.parse_next(input)?;

    let mut field = FieldRules::new(path).with_rules(parse_rules(expression));
    if let Some(label) = label {
        field = field.with_label(label);
    }
    Ok(field)
}

// -- Top-level parser ---------------------------------------------------------

pub fn parse_schema(input: &mut &str) -> ModalResult<ParsedSchema> {
    let fields: Vec<FieldRules> = repeat(0.., field_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedSchema { fields })
}
