// crates/ignite-core/src/runtime/validation.rs
// ============================================================================
// Module: Document Validation
// Description: Field schema evaluation for a single document.
// Purpose: List every violation a document has against its schema.
// Dependencies: crate::core, serde_json, url
// ============================================================================

//! ## Overview
//! Validation never stops at the first problem. For each rule the value is
//! looked up by dotted path. A missing value is `Required` when the rule is
//! required and skipped otherwise. A stored `null` is skipped for optional
//! rules and is a kind mismatch for required ones. A value of the wrong kind
//! yields a single `Expected <kind>, received <actual>` message. Otherwise every
//! constraint is evaluated and each failing one is reported.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use url::Url;

use crate::core::audit::Document;
use crate::core::schema::Constraint;
use crate::core::schema::FieldRule;
use crate::core::schema::FieldSchema;
use crate::core::schema::ValueKind;

/// Message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "Required";

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Returns every violation of `document` against `schema`.
///
/// Each entry is formatted `"<dotted.path>: <message>"`; an empty result
/// means the document conforms.
#[must_use]
pub fn validate_document(schema: &FieldSchema, document: &Document) -> Vec<String> {
    let mut errors = Vec::new();
    for rule in &schema.fields {
        validate_rule(rule, &document.body, &mut errors);
    }
    errors
}

/// Evaluates one rule against a document body.
fn validate_rule(rule: &FieldRule, body: &Value, errors: &mut Vec<String>) {
    let Some(value) = lookup(body, rule) else {
        if rule.required {
            errors.push(format!("{}: {REQUIRED_MESSAGE}", rule.path));
        }
        return;
    };
    if value.is_null() && !rule.required {
        return;
    }
    if !matches_kind(rule.kind, value) {
        errors.push(format!(
            "{}: Expected {}, received {}",
            rule.path,
            expected_label(rule.kind),
            received_label(value)
        ));
        return;
    }
    for constraint in &rule.constraints {
        if constraint.applies_to(rule.kind) && !satisfies(constraint, value) {
            errors.push(format!("{}: {}", rule.path, constraint.message()));
        }
    }
}

/// Resolves a dotted path inside a JSON body.
fn lookup<'a>(body: &'a Value, rule: &FieldRule) -> Option<&'a Value> {
    rule.segments().try_fold(body, |node, segment| node.as_object()?.get(segment))
}

/// Returns true when `value` has the expected kind.
fn matches_kind(kind: ValueKind, value: &Value) -> bool {
    match kind {
        ValueKind::String => value.is_string(),
        ValueKind::Identifier => value.is_string() || value.is_i64() || value.is_u64(),
        ValueKind::Number => value.is_number(),
        ValueKind::Boolean => value.is_boolean(),
    }
}

/// Returns the expected-kind label for type violations.
const fn expected_label(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::String => "string",
        ValueKind::Identifier => "string or integer",
        ValueKind::Number => "number",
        ValueKind::Boolean => "boolean",
    }
}

/// Returns the received-kind label for type violations.
const fn received_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns true when `value` satisfies `constraint`.
fn satisfies(constraint: &Constraint, value: &Value) -> bool {
    match constraint {
        Constraint::NonEmpty { .. } => value.as_str().is_none_or(|text| !text.is_empty()),
        Constraint::Url { .. } => value.as_str().is_none_or(|text| Url::parse(text).is_ok()),
        Constraint::Min {
            value: bound, ..
        } => value.as_f64().is_some_and(|number| number >= *bound),
        Constraint::Max {
            value: bound, ..
        } => value.as_f64().is_some_and(|number| number <= *bound),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
