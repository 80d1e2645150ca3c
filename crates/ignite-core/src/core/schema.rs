// crates/ignite-core/src/core/schema.rs
// ============================================================================
// Module: Field Schemas
// Description: Canonical field requirements for content collections.
// Purpose: Declare the shape live documents must satisfy before promotion.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`FieldSchema`] lists the fields a collection's documents must carry and
//! the constraints each value must meet. Schemas are static: they are either
//! the built-in catalog from [`default_schemas`] or loaded from configuration.
//! [`json_schema`] renders a schema as JSON Schema (Draft 2020-12) for reuse by
//! other tooling.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::core::identifiers::CollectionName;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Expected value kind for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON string.
    String,
    /// Document identifier: a string or an integer.
    Identifier,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
}

impl ValueKind {
    /// Returns the kind label used in violation messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value constraint evaluated after the kind check passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Constraint {
    /// String must contain at least one character.
    NonEmpty {
        /// Violation message.
        message: String,
    },
    /// String must parse as an absolute URL.
    Url {
        /// Violation message.
        message: String,
    },
    /// Number must be greater than or equal to `value`.
    Min {
        /// Inclusive lower bound.
        value: f64,
        /// Violation message.
        message: String,
    },
    /// Number must be less than or equal to `value`.
    Max {
        /// Inclusive upper bound.
        value: f64,
        /// Violation message.
        message: String,
    },
}

impl Constraint {
    /// Returns the violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NonEmpty {
                message,
            }
            | Self::Url {
                message,
            }
            | Self::Min {
                message, ..
            }
            | Self::Max {
                message, ..
            } => message,
        }
    }

    /// Returns true when the constraint applies to values of `kind`.
    #[must_use]
    pub const fn applies_to(&self, kind: ValueKind) -> bool {
        match self {
            Self::NonEmpty { .. } | Self::Url { .. } => {
                matches!(kind, ValueKind::String | ValueKind::Identifier)
            }
            Self::Min { .. } | Self::Max { .. } => matches!(kind, ValueKind::Number),
        }
    }
}

/// Requirement on a single (possibly nested) field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Dotted field path (for example `meta.title`).
    pub path: String,
    /// Expected value kind.
    pub kind: ValueKind,
    /// Whether a missing or null value is a violation.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Constraints evaluated in order once the kind check passes.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// Fields are required unless declared otherwise.
const fn default_required() -> bool {
    true
}

impl FieldRule {
    /// Creates a required rule without constraints.
    #[must_use]
    pub fn required(path: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            path: path.into(),
            kind,
            required: true,
            constraints: Vec::new(),
        }
    }

    /// Marks the rule optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Appends a constraint.
    #[must_use]
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns the path split into segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }
}

/// Canonical shape for one content collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Collection the schema applies to.
    pub collection: CollectionName,
    /// Field requirements in report order.
    pub fields: Vec<FieldRule>,
}

// ============================================================================
// SECTION: Built-in Catalog
// ============================================================================

/// Builds a required string rule with a non-empty constraint.
fn non_empty(path: &str, message: &str) -> FieldRule {
    FieldRule::required(path, ValueKind::String).with(Constraint::NonEmpty {
        message: message.to_string(),
    })
}

/// Builds a schema for a collection known to be valid.
fn builtin(collection: &str, fields: Vec<FieldRule>) -> Option<FieldSchema> {
    CollectionName::parse(collection).ok().map(|collection| FieldSchema {
        collection,
        fields,
    })
}

/// Returns the built-in schemas for `media`, `pages`, and `posts`.
#[must_use]
pub fn default_schemas() -> Vec<FieldSchema> {
    let id = || FieldRule::required("id", ValueKind::Identifier);
    [
        builtin(
            "media",
            vec![
                id(),
                non_empty("alt", "Alt text is required for accessibility"),
                FieldRule::required("url", ValueKind::String).with(Constraint::Url {
                    message: "Invalid media URL".to_string(),
                }),
            ],
        ),
        builtin(
            "pages",
            vec![
                id(),
                non_empty("title", "Page title is required"),
                non_empty("slug", "Page slug is required"),
            ],
        ),
        builtin(
            "posts",
            vec![
                id(),
                non_empty("title", "Post title is required"),
                non_empty("slug", "Post slug is required"),
            ],
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

// ============================================================================
// SECTION: JSON Schema Export
// ============================================================================

/// Renders a field schema as a JSON Schema (Draft 2020-12) document.
///
/// Nested paths become nested `object` schemas. Optional fields also accept
/// `null`, matching the auditor's treatment of null as missing.
#[must_use]
pub fn json_schema(schema: &FieldSchema) -> Value {
    let mut root = object_schema();
    for rule in &schema.fields {
        insert_rule(&mut root, rule);
    }
    if let Value::Object(map) = &mut root {
        map.insert(
            "$schema".to_string(),
            Value::String("https://json-schema.org/draft/2020-12/schema".to_string()),
        );
        map.insert("title".to_string(), Value::String(schema.collection.to_string()));
    }
    root
}

/// Returns an empty object schema.
fn object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": [],
    })
}

/// Inserts a rule into an object schema, creating intermediate objects.
fn insert_rule(root: &mut Value, rule: &FieldRule) {
    let segments: Vec<&str> = rule.segments().collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    let mut node = root;
    for parent in parents {
        if rule.required {
            mark_required(node, parent);
        }
        let Some(properties) = node.get_mut("properties").and_then(Value::as_object_mut) else {
            return;
        };
        node = properties.entry((*parent).to_string()).or_insert_with(object_schema);
    }
    if rule.required {
        mark_required(node, leaf);
    }
    if let Some(properties) = node.get_mut("properties").and_then(Value::as_object_mut) {
        properties.insert((*leaf).to_string(), leaf_schema(rule));
    }
}

/// Adds `name` to the object's `required` list once.
fn mark_required(node: &mut Value, name: &str) {
    if let Some(required) = node.get_mut("required").and_then(Value::as_array_mut) {
        let name = Value::String(name.to_string());
        if !required.contains(&name) {
            required.push(name);
        }
    }
}

/// Builds the leaf schema for a rule.
fn leaf_schema(rule: &FieldRule) -> Value {
    let mut map = Map::new();
    let kind = match rule.kind {
        ValueKind::String => json!("string"),
        ValueKind::Identifier => json!(["string", "integer"]),
        ValueKind::Number => json!("number"),
        ValueKind::Boolean => json!("boolean"),
    };
    let kind = if rule.required {
        kind
    } else {
        match kind {
            Value::Array(mut kinds) => {
                kinds.push(json!("null"));
                Value::Array(kinds)
            }
            single => json!([single, "null"]),
        }
    };
    map.insert("type".to_string(), kind);
    for constraint in &rule.constraints {
        match constraint {
            Constraint::NonEmpty { .. } => {
                map.insert("minLength".to_string(), json!(1));
            }
            Constraint::Url { .. } => {
                map.insert("format".to_string(), json!("uri"));
            }
            Constraint::Min {
                value, ..
            } => {
                map.insert("minimum".to_string(), json!(value));
            }
            Constraint::Max {
                value, ..
            } => {
                map.insert("maximum".to_string(), json!(value));
            }
        }
    }
    Value::Object(map)
}
