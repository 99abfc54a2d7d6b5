//! Failure-message resolution.
//!
//! The engine never renders text on its own: generic failures (a rule
//! returning `false`, an unknown rule name, bad rule parameters) are turned into
//! a message key plus named parameters and handed to a [`Translate`]
//! implementation. [`DefaultMessages`] is the English table used when the caller
//! does not supply one.

use std::collections::HashMap;
use std::fmt;

/// Key used when a rule name is not in the registry. Params: `rule`.
pub const UNKNOWN_RULE: &str = "rules.unknown";
/// Key used when a rule rejects its own parameters. Params: `rule`, `reason`.
pub const INVALID_PARAMS: &str = "rules.invalid_params";
/// Key used when a rule exceeds the configured timeout. Params: `rule`, `timeout_ms`.
pub const TIMEOUT: &str = "rules.timeout";
/// Key used by the one-of composite when every alternative fails. Params: `errors`.
pub const ONE_OF: &str = "rules.one_of";
/// Fallback for keys without a template.
pub const DEFAULT: &str = "rules.default";

/// Message key for a named rule's generic failure: `rules.<name>`.
#[must_use]
pub fn rule_key(name: &str) -> String {
    format!("rules.{name}")
}

/// Ordered named parameters for a message template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams {
    entries: Vec<(String, String)>,
}

impl MessageParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. An existing parameter with the same key is replaced in place.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add a parameter only if the key is not already present.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.entries.push((key, value.to_string()));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for MessageParams {
    fn from(pairs: [(K, V); N]) -> Self {
        let mut params = MessageParams::new();
        for (k, v) in pairs {
            params.set(k, v);
        }
        params
    }
}

impl fmt::Display for MessageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

/// Resolves a message key and its parameters into display text.
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str, params: &MessageParams) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, &MessageParams) -> String + Send + Sync,
{
    fn translate(&self, key: &str, params: &MessageParams) -> String {
        self(key, params)
    }
}

/// English message templates with `{param}` interpolation.
///
/// Unknown keys fall back to the [`DEFAULT`] template. Placeholders with no
/// matching parameter are left as written.
#[derive(Debug, Clone)]
pub struct DefaultMessages {
    templates: HashMap<String, String>,
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (DEFAULT, "The {field} is invalid."),
    (UNKNOWN_RULE, "Unknown validation rule '{rule}'."),
    (
        INVALID_PARAMS,
        "Validation rule '{rule}' has invalid parameters: {reason}.",
    ),
    (TIMEOUT, "Validation rule '{rule}' timed out after {timeout_ms}ms."),
    (ONE_OF, "The {field} did not match any of the allowed forms: {errors}"),
    ("rules.required", "The {field} is required."),
    ("rules.minLength", "The {field} must be at least {min} characters."),
    ("rules.maxLength", "The {field} must be at most {max} characters."),
    ("rules.length", "The {field} must be exactly {length} characters."),
    ("rules.between", "The {field} must be between {min} and {max}."),
    ("rules.Between", "The {field} must be between {min} and {max}."),
    ("rules.min", "The {field} must be at least {min}."),
    ("rules.max", "The {field} must be at most {max}."),
    ("rules.isNumber", "The {field} must be a number."),
    ("rules.isInteger", "The {field} must be an integer."),
    ("rules.isBoolean", "The {field} must be true or false."),
    ("rules.isEmail", "The {field} must be a valid email address."),
    ("rules.isPhoneNumber", "The {field} must be a valid phone number."),
    ("rules.isUrl", "The {field} must be a valid URL."),
    ("rules.alpha", "The {field} may only contain letters."),
    (
        "rules.alphaNumeric",
        "The {field} may only contain letters and numbers.",
    ),
    ("rules.in", "The {field} must be one of: {allowed}."),
    ("rules.notIn", "The {field} must not be one of: {denied}."),
    ("rules.sameAs", "The {field} must match {other}."),
];

impl Default for DefaultMessages {
    fn default() -> Self {
        Self {
            templates: BUILTIN_TEMPLATES
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

impl DefaultMessages {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override or add the template for `key`.
    #[must_use]
    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    #[must_use]
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }
}

impl Translate for DefaultMessages {
    fn translate(&self, key: &str, params: &MessageParams) -> String {
        let template = self
            .template(key)
            .or_else(|| self.template(DEFAULT))
            .unwrap_or("The {field} is invalid.");
        interpolate(template, params)
    }
}

/// Replace `{name}` placeholders with parameter values.
#[must_use]
pub fn interpolate(template: &str, params: &MessageParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
