use std::collections::HashSet;

use crate::{FieldRules, RuleRegistry, RuleSpec, Schema, SchemaError};

pub(crate) fn compile(fields: Vec<FieldRules>) -> Result<Schema, SchemaError> {
    check_paths(&fields)?;
    check_duplicates(&fields)?;
    Ok(Schema { fields })
}

fn check_paths(fields: &[FieldRules]) -> Result<(), SchemaError> {
    if fields.iter().any(|f| f.path().trim().is_empty()) {
        return Err(SchemaError::EmptyFieldName);
    }
    Ok(())
}

fn check_duplicates(fields: &[FieldRules]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.path()) {
            return Err(SchemaError::DuplicateField {
                path: field.path().to_owned(),
            });
        }
    }
    Ok(())
}

pub(crate) fn check_rules(fields: &[FieldRules], registry: &RuleRegistry) -> Result<(), SchemaError> {
    for field in fields {
        for spec in field.rules() {
            if let RuleSpec::Named { name, .. } = spec {
                if !registry.contains(name) {
                    return Err(SchemaError::UnknownRule {
                        field: field.path().to_owned(),
                        rule: name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
