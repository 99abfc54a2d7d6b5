use once_cell::sync::Lazy;
use regex::Regex;

use crate::RuleRequest;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://[a-z0-9\-._~%]+(:\d{1,5})?(/[^\s]*)?$").expect("url pattern is valid")
});

/// Optional leading `+`, then digits with spaces, dashes, dots or parentheses between them.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-.()]+$").expect("phone pattern is valid"));

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

pub(super) fn is_email(req: &RuleRequest) -> bool {
    matches_text(req, |s| EMAIL.is_match(s))
}

pub(super) fn is_url(req: &RuleRequest) -> bool {
    matches_text(req, |s| URL.is_match(s))
}

pub(super) fn is_phone_number(req: &RuleRequest) -> bool {
    matches_text(req, |s| {
        let digits = s.chars().filter(char::is_ascii_digit).count();
        PHONE.is_match(s) && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
    })
}

pub(super) fn alpha(req: &RuleRequest) -> bool {
    matches_text(req, |s| s.chars().all(char::is_alphabetic))
}

pub(super) fn alpha_numeric(req: &RuleRequest) -> bool {
    matches_text(req, |s| s.chars().all(char::is_alphanumeric))
}

/// Empty values pass; everything else is checked on its trimmed text form.
fn matches_text(req: &RuleRequest, accept: impl Fn(&str) -> bool) -> bool {
    let value = req.value();
    value.is_empty() || accept(value.to_text().trim())
}
