use std::fmt;
use std::time::Duration;

use super::outcome::Failure;

/// Result of validating every field of a [`Schema`](super::schema::Schema).
///
/// Each field's chain stops at its first failure, but every field is checked, so
/// the report can carry several failures at once.
#[derive(Debug, Clone)]
#[must_use]
pub struct ValidationReport {
    failures: Vec<Failure>,
    passed: Vec<String>,
    order: Vec<String>,
    duration: Duration,
}

impl ValidationReport {
    pub(crate) fn new(
        failures: Vec<Failure>,
        passed: Vec<String>,
        order: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            failures,
            passed,
            order,
            duration,
        }
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// One failure per failing field, in schema order.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// The failure recorded for the field at `path`, if any.
    #[must_use]
    pub fn failure_for(&self, path: &str) -> Option<&Failure> {
        self.failures.iter().find(|f| f.field() == Some(path))
    }

    /// Paths of fields that passed.
    #[must_use]
    pub fn passed(&self) -> &[String] {
        &self.passed
    }

    /// All field paths in the order they were validated.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// `(field, message)` pairs for display.
    #[must_use]
    pub fn messages(&self) -> Vec<(&str, &str)> {
        self.failures
            .iter()
            .map(|f| (f.field().unwrap_or_default(), f.message()))
            .collect()
    }

    /// Wall-clock duration of the whole schema run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed: Vec<&str> = self
            .failures
            .iter()
            .map(|f| f.field().unwrap_or_default())
            .collect();
        write!(f, "valid: {}", self.is_valid())?;
        write!(f, ", failed: [{}]", failed.join(", "))?;
        write!(f, ", passed: [{}]", self.passed.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
