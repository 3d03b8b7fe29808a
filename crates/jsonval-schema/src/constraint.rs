//! # Constraints
//!
//! Typed form of the keywords a schema node carries. Subschema-valued
//! keywords hold [`SchemaId`] edges into the graph; literal values are
//! frozen copies of the source document.
//!
//! Evaluating constraints against instances is not this crate's concern.

use std::collections::BTreeMap;

use jsonval_core::{FrozenValue, JsonType};
use serde::Serialize;

use crate::location::SchemaId;

/// One parsed keyword (or group of keywords) of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "keyword", rename_all = "camelCase")]
pub enum Constraint {
    /// `type`: the instance must be one of these types.
    Type { types: Vec<JsonType> },
    /// `enum`: the instance must equal one of these values.
    Enum { values: Vec<FrozenValue> },
    /// `const`
    Const { value: FrozenValue },
    /// `multipleOf` (`divisibleBy` in Draft 3).
    MultipleOf { divisor: f64 },
    /// `minimum`, or a Draft 7 `exclusiveMinimum`.
    Minimum { limit: f64, exclusive: bool },
    /// `maximum`, or a Draft 7 `exclusiveMaximum`.
    Maximum { limit: f64, exclusive: bool },
    MinLength { length: u64 },
    MaxLength { length: u64 },
    Pattern { pattern: String },
    Format { format: String },
    MinItems { count: u64 },
    MaxItems { count: u64 },
    UniqueItems,
    /// `items` and, for tuple form, `additionalItems`.
    Items { items: Items },
    Contains { schema: SchemaId },
    MinProperties { count: u64 },
    MaxProperties { count: u64 },
    /// `required`, including Draft 3 property-level `"required": true`.
    Required { properties: Vec<String> },
    /// `properties`, `patternProperties` and `additionalProperties`.
    Properties {
        properties: BTreeMap<String, SchemaId>,
        pattern_properties: BTreeMap<String, SchemaId>,
        additional: AdditionalSchema,
    },
    PropertyNames { schema: SchemaId },
    Dependencies { dependencies: BTreeMap<String, Dependency> },
    AllOf { schemas: Vec<SchemaId> },
    AnyOf { schemas: Vec<SchemaId> },
    OneOf { schemas: Vec<SchemaId> },
    Not { schema: SchemaId },
    /// `if` / `then` / `else`.
    Conditional {
        condition: SchemaId,
        then: Option<SchemaId>,
        otherwise: Option<SchemaId>,
    },
    /// The boolean schema `false`: no instance is valid.
    Never,
}

/// Form of the `items` keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Items {
    /// Every element must match one schema.
    Single(SchemaId),
    /// Positional schemas, plus the rule for elements past the tuple.
    Tuple {
        items: Vec<SchemaId>,
        additional: AdditionalSchema,
    },
}

/// Value of `additionalProperties` / `additionalItems`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AdditionalSchema {
    /// Absent or `true`.
    #[default]
    Allowed,
    /// `false`.
    Forbidden,
    Schema(SchemaId),
}

impl AdditionalSchema {
    pub fn schema(&self) -> Option<SchemaId> {
        match self {
            Self::Schema(id) => Some(*id),
            _ => None,
        }
    }
}

/// One entry of `dependencies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Dependency {
    /// The listed properties must also be present.
    Properties(Vec<String>),
    /// The instance must also match this schema.
    Schema(SchemaId),
}

impl Constraint {
    /// Subschema edges of this constraint, in keyword order.
    pub fn subschemas(&self) -> Vec<SchemaId> {
        match self {
            Self::Items { items } => match items {
                Items::Single(id) => vec![*id],
                Items::Tuple { items, additional } => {
                    items.iter().copied().chain(additional.schema()).collect()
                }
            },
            Self::Contains { schema } | Self::PropertyNames { schema } | Self::Not { schema } => {
                vec![*schema]
            }
            Self::Properties {
                properties,
                pattern_properties,
                additional,
            } => properties
                .values()
                .chain(pattern_properties.values())
                .copied()
                .chain(additional.schema())
                .collect(),
            Self::Dependencies { dependencies } => dependencies
                .values()
                .filter_map(|d| match d {
                    Dependency::Schema(id) => Some(*id),
                    Dependency::Properties(_) => None,
                })
                .collect(),
            Self::AllOf { schemas } | Self::AnyOf { schemas } | Self::OneOf { schemas } => {
                schemas.clone()
            }
            Self::Conditional {
                condition,
                then,
                otherwise,
            } => std::iter::once(*condition)
                .chain(*then)
                .chain(*otherwise)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The keyword name this constraint was parsed from.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Type { .. } => "type",
            Self::Enum { .. } => "enum",
            Self::Const { .. } => "const",
            Self::MultipleOf { .. } => "multipleOf",
            Self::Minimum { .. } => "minimum",
            Self::Maximum { .. } => "maximum",
            Self::MinLength { .. } => "minLength",
            Self::MaxLength { .. } => "maxLength",
            Self::Pattern { .. } => "pattern",
            Self::Format { .. } => "format",
            Self::MinItems { .. } => "minItems",
            Self::MaxItems { .. } => "maxItems",
            Self::UniqueItems => "uniqueItems",
            Self::Items { .. } => "items",
            Self::Contains { .. } => "contains",
            Self::MinProperties { .. } => "minProperties",
            Self::MaxProperties { .. } => "maxProperties",
            Self::Required { .. } => "required",
            Self::Properties { .. } => "properties",
            Self::PropertyNames { .. } => "propertyNames",
            Self::Dependencies { .. } => "dependencies",
            Self::AllOf { .. } => "allOf",
            Self::AnyOf { .. } => "anyOf",
            Self::OneOf { .. } => "oneOf",
            Self::Not { .. } => "not",
            Self::Conditional { .. } => "if",
            Self::Never => "false",
        }
    }
}
