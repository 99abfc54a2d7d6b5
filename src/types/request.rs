use super::context::Context;
use super::spec::RuleInput;
use super::value::Value;

/// Input to one [`Validator::validate`](crate::Validator::validate) call.
///
/// ```
/// use ruleval::{Context, ValidationRequest};
///
/// let request = ValidationRequest::new("hello", "required|minLength[3]")
///     .field("username")
///     .context(Context::new().set("form", "signup"));
/// # let _ = request;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationRequest {
    pub(crate) value: Value,
    pub(crate) rules: RuleInput,
    pub(crate) params: Vec<String>,
    pub(crate) context: Context,
    pub(crate) field: Option<String>,
    pub(crate) label: Option<String>,
}

impl ValidationRequest {
    #[must_use]
    pub fn new(value: impl Into<Value>, rules: impl Into<RuleInput>) -> Self {
        Self {
            value: value.into(),
            rules: rules.into(),
            ..Self::default()
        }
    }

    /// Request-level parameters, used by any rule whose spec carries none.
    #[must_use]
    pub fn params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Pass-through fields handed to every rule and echoed in the outcome.
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Name of the field being validated, used as `{field}` in messages.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.field = Some(name.into());
        self
    }

    /// Display name used as `{field}` in messages, in place of the field name.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_parts() {
        let req = ValidationRequest::new(15_i64, "between")
            .params(["10", "20"])
            .field("age")
            .label("Age")
            .context(Context::new().set("x", 1_i64));
        assert_eq!(req.value, Value::Int(15));
        assert_eq!(req.params, vec!["10".to_owned(), "20".to_owned()]);
        assert_eq!(req.field.as_deref(), Some("age"));
        assert_eq!(req.label.as_deref(), Some("Age"));
        assert_eq!(req.context.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn default_has_no_rules() {
        let req = ValidationRequest::default();
        assert_eq!(req.value, Value::Null);
        assert!(matches!(req.rules, RuleInput::List(ref items) if items.is_empty()));
    }
}
