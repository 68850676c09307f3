//! Contains the purely syntactic predicates the semantic pass asks of
//! [`Expression`]s.
//!
//! Everything here classifies shape only. Whether a given shape is *legal*
//! in a given position is a per-kind decision that stays with the semantic
//! pass.

use crate::tree::{Expression, LiteralValue};

/// Returns `true` if the expression has the shape of an element name: a
/// plain variable or a non-empty dotted chain of identifiers.
#[must_use]
pub fn is_valid_name(expression: &Expression) -> bool {
    match expression {
        Expression::Variable(_) => true,
        Expression::QualifiedName(qualified_name) => {
            !qualified_name.segments().is_empty()
        }
        _ => false,
    }
}

/// Returns `true` if the expression has the shape of an element alias: a
/// plain variable.
#[must_use]
pub fn is_valid_alias(expression: &Expression) -> bool {
    matches!(expression, Expression::Variable(_))
}

/// Returns `true` if the expression is a dotted chain of identifiers
/// rather than a plain variable.
#[must_use]
pub fn is_qualified(expression: &Expression) -> bool {
    matches!(expression, Expression::QualifiedName(_))
}

/// Splits a name expression into its segment texts, leading namespaces
/// first.
///
/// A plain variable yields a single segment. Returns [`None`] for any
/// expression [`is_valid_name`] rejects.
#[must_use]
pub fn destructure_name(expression: &Expression) -> Option<Vec<&str>> {
    match expression {
        Expression::Variable(variable) => {
            Some(vec![variable.value().as_str()])
        }
        Expression::QualifiedName(qualified_name)
            if !qualified_name.segments().is_empty() =>
        {
            Some(
                qualified_name
                    .segments()
                    .iter()
                    .map(|segment| segment.value().as_str())
                    .collect(),
            )
        }
        _ => None,
    }
}

/// Extracts the identifier text of a variable expression.
#[must_use]
pub fn extract_variable_name(expression: &Expression) -> Option<&str> {
    expression.as_variable().map(|variable| variable.value().as_str())
}

/// Extracts the normalized (lowercased) name of a setting entry.
///
/// Only a variable can name a setting; anything else yields [`None`] and
/// the caller skips the entry.
#[must_use]
pub fn extract_setting_name(expression: &Expression) -> Option<String> {
    extract_variable_name(expression).map(str::to_lowercase)
}

/// Extracts the content of a string literal expression.
#[must_use]
pub fn extract_string(expression: &Expression) -> Option<&str> {
    match expression.as_literal()?.value() {
        LiteralValue::String(content) => Some(content.as_str()),
        _ => None,
    }
}
