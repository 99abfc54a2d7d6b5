use std::fmt;
use std::sync::Arc;

use super::error::SchemaError;
use super::registry::RuleRegistry;
use super::rule::Rule;
use super::spec::{RuleInput, RuleSpec};
use crate::parse::parse_rules;

/// The ordered rule list attached to one field path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    path: String,
    label: Option<String>,
    rules: Vec<RuleSpec>,
}

impl FieldRules {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RuleSpec>) -> Self {
        self.rules = rules;
        self
    }

    /// Dot-separated path of the value inside the validated [`Context`](crate::Context).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Name used for `{field}` in messages: the label if set, else the path.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}

/// Builder for constructing a [`Schema`].
///
/// Each field is described by a closure that appends rules to it, in order.
///
/// # Example
///
/// ```
/// use ruleval::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .field("email", |f| f.rules("required|isEmail"))
///     .field("age", |f| f.label("Age").rules("required").rules("between[18,99]"))
///     .build()
///     .unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldRules>,
}

/// Intermediate builder passed to the field definition closure.
#[derive(Debug, Default)]
pub struct FieldBuilder {
    label: Option<String>,
    rules: Vec<RuleSpec>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field and its rules.
    #[must_use]
    pub fn field(mut self, path: &str, f: impl FnOnce(FieldBuilder) -> FieldBuilder) -> Self {
        let builder = f(FieldBuilder::default());
        let mut field = FieldRules::new(path).with_rules(builder.rules);
        field.label = builder.label;
        self.fields.push(field);
        self
    }

    /// Validate the declarations and produce an immutable `Schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] on empty or duplicate field paths.
    pub fn build(self) -> Result<Schema, SchemaError> {
        crate::compile::compile(self.fields)
    }
}

impl FieldBuilder {
    /// Append rules in any accepted input form.
    #[must_use]
    pub fn rules(mut self, rules: impl Into<RuleInput>) -> Self {
        self.rules.extend(parse_rules(rules));
        self
    }

    /// Append an inline rule.
    #[must_use]
    pub fn check(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(RuleSpec::inline(rule));
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// An immutable set of field declarations, validated in declaration order.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) fields: Vec<FieldRules>,
}

impl Schema {
    #[must_use]
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, path: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.path == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Confirm every named rule resolves in `registry`.
    ///
    /// Validation itself reports unknown rules lazily, when a chain reaches
    /// them; this catches them before any value is checked.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownRule`] for the first unresolved name.
    pub fn check(&self, registry: &RuleRegistry) -> Result<(), SchemaError> {
        crate::compile::check_rules(&self.fields, registry)
    }

    /// Parse schema DSL and build a `Schema`.
    ///
    /// ```
    /// use ruleval::Schema;
    ///
    /// let schema = Schema::from_dsl("field email: required|isEmail").unwrap();
    /// assert!(schema.field("email").is_some());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RulevalError`](crate::RulevalError) on parse or schema errors.
    pub fn from_dsl(input: &str) -> Result<Self, crate::RulevalError> {
        let parsed = crate::parse::parse(input)?;
        let schema = crate::compile::compile(parsed.fields)?;
        Ok(schema)
    }

    /// Read a schema DSL file and build a `Schema`.
    ///
    /// # Errors
    ///
    /// Returns [`RulevalError`](crate::RulevalError) on I/O, parse, or schema errors.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::RulevalError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: usize = self.fields.iter().map(|field| field.rules.len()).sum();
        write!(f, "Schema({} fields, {} rules)", self.fields.len(), rules)
    }
}
