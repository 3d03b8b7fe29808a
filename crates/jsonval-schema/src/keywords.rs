//! Keyword parsing: one schema value in, one [`NodeBody`] out.
//!
//! Subschema-valued keywords are handed to [`Builder::bind`], which either
//! reuses a known node or reserves and queues a new one, so this module
//! never recurses.

use std::collections::BTreeMap;

use jsonval_core::{freeze, Adapter, JsonType, NodeKind};

use crate::constraint::{AdditionalSchema, Constraint, Dependency, Items};
use crate::error::SchemaError;
use crate::location::{SchemaId, SchemaLocation};
use crate::options::Draft;
use crate::parser::Builder;
use crate::resolver::ExternalResolver;
use crate::store::NodeBody;

impl<A, R> Builder<'_, A, R>
where
    A: Adapter,
    R: ExternalResolver<A>,
{
    /// Parse the keywords of the schema value `node` found at `location`.
    pub(crate) fn parse_keywords(
        &mut self,
        location: &SchemaLocation,
        node: A,
    ) -> Result<NodeBody, SchemaError> {
        let draft = self.options.draft;
        match node.kind() {
            NodeKind::Object => {}
            NodeKind::Bool if draft.allows_boolean_schemas() => {
                let constraints = match node.as_bool() {
                    Some(false) => vec![Constraint::Never],
                    _ => Vec::new(),
                };
                return Ok(NodeBody {
                    constraints,
                    ..NodeBody::default()
                });
            }
            kind => {
                return Err(SchemaError::NotASchema {
                    location: self.describe(location),
                    kind,
                })
            }
        }

        let title = self.keyword(location, node, "title", string)?;
        let description = self.keyword(location, node, "description", string)?;
        let mut constraints = Vec::new();

        if let Some(types) = self.keyword(location, node, "type", |v| types(v, draft))? {
            if !types.is_empty() {
                constraints.push(Constraint::Type { types });
            }
        }
        if let Some(values) = self.keyword(location, node, "enum", enum_values)? {
            constraints.push(Constraint::Enum { values });
        }
        if draft == Draft::Draft7 {
            if let Some(value) = node.object_get("const") {
                constraints.push(Constraint::Const {
                    value: freeze(value),
                });
            }
        }

        let multiple_of = match draft {
            Draft::Draft3 => "divisibleBy",
            Draft::Draft4 | Draft::Draft7 => "multipleOf",
        };
        if let Some(divisor) = self.keyword(location, node, multiple_of, positive_number)? {
            constraints.push(Constraint::MultipleOf { divisor });
        }
        for (limit, exclusive) in self.limits(location, node, "minimum", "exclusiveMinimum")? {
            constraints.push(Constraint::Minimum { limit, exclusive });
        }
        for (limit, exclusive) in self.limits(location, node, "maximum", "exclusiveMaximum")? {
            constraints.push(Constraint::Maximum { limit, exclusive });
        }

        let counts: [(&str, fn(u64) -> Constraint); 6] = [
            ("minLength", |length| Constraint::MinLength { length }),
            ("maxLength", |length| Constraint::MaxLength { length }),
            ("minItems", |count| Constraint::MinItems { count }),
            ("maxItems", |count| Constraint::MaxItems { count }),
            ("minProperties", |count| Constraint::MinProperties { count }),
            ("maxProperties", |count| Constraint::MaxProperties { count }),
        ];
        for (keyword, make) in counts {
            if let Some(count) = self.keyword(location, node, keyword, count)? {
                constraints.push(make(count));
            }
        }

        if let Some(pattern) = self.keyword(location, node, "pattern", string)? {
            constraints.push(Constraint::Pattern { pattern });
        }
        if let Some(format) = self.keyword(location, node, "format", string)? {
            constraints.push(Constraint::Format { format });
        }
        if self.keyword(location, node, "uniqueItems", boolean)? == Some(true) {
            constraints.push(Constraint::UniqueItems);
        }

        if let Some(items) = self.items(location, node)? {
            constraints.push(Constraint::Items { items });
        }
        if draft == Draft::Draft7 {
            if let Some(value) = node.object_get("contains") {
                let schema = self.bind(location.join(["contains"]), value)?;
                constraints.push(Constraint::Contains { schema });
            }
        }

        match draft {
            Draft::Draft3 => {
                // Property-level `"required": true` is collected by the parent.
                self.keyword(location, node, "required", boolean)?;
            }
            Draft::Draft4 | Draft::Draft7 => {
                if let Some(properties) = self.keyword(location, node, "required", string_list)? {
                    constraints.push(Constraint::Required { properties });
                }
            }
        }
        constraints.extend(self.properties(location, node)?);
        if draft == Draft::Draft7 {
            if let Some(value) = node.object_get("propertyNames") {
                let schema = self.bind(location.join(["propertyNames"]), value)?;
                constraints.push(Constraint::PropertyNames { schema });
            }
        }
        if let Some(dependencies) = self.dependencies(location, node)? {
            constraints.push(Constraint::Dependencies { dependencies });
        }

        match draft {
            Draft::Draft3 => {
                if let Some(schemas) = self.extends(location, node)? {
                    constraints.push(Constraint::AllOf { schemas });
                }
            }
            Draft::Draft4 | Draft::Draft7 => {
                if let Some(schemas) = self.schema_list(location, node, "allOf")? {
                    constraints.push(Constraint::AllOf { schemas });
                }
                if let Some(schemas) = self.schema_list(location, node, "anyOf")? {
                    constraints.push(Constraint::AnyOf { schemas });
                }
                if let Some(schemas) = self.schema_list(location, node, "oneOf")? {
                    constraints.push(Constraint::OneOf { schemas });
                }
                if let Some(value) = node.object_get("not") {
                    let schema = self.bind(location.join(["not"]), value)?;
                    constraints.push(Constraint::Not { schema });
                }
            }
        }
        if draft == Draft::Draft7 {
            if let Some(constraint) = self.conditional(location, node)? {
                constraints.push(constraint);
            }
        }

        Ok(NodeBody {
            title,
            description,
            constraints,
        })
    }

    /// Read keyword `name` of `node` with `read`, if present.
    fn keyword<T>(
        &self,
        location: &SchemaLocation,
        node: A,
        name: &str,
        read: impl FnOnce(A) -> Result<T, String>,
    ) -> Result<Option<T>, SchemaError> {
        node.object_get(name)
            .map(read)
            .transpose()
            .map_err(|reason| self.invalid(location, name, reason))
    }

    fn invalid(&self, location: &SchemaLocation, keyword: &str, reason: String) -> SchemaError {
        SchemaError::InvalidKeyword {
            location: self.describe(location),
            keyword: keyword.to_string(),
            reason,
        }
    }

    /// `minimum`/`maximum` and their exclusive forms as `(limit, exclusive)`
    /// pairs.
    fn limits(
        &self,
        location: &SchemaLocation,
        node: A,
        limit_keyword: &str,
        exclusive_keyword: &str,
    ) -> Result<Vec<(f64, bool)>, SchemaError> {
        let limit = self.keyword(location, node, limit_keyword, number)?;
        if self.options.draft.boolean_exclusive_limits() {
            let exclusive = self
                .keyword(location, node, exclusive_keyword, boolean)?
                .unwrap_or(false);
            return Ok(limit.map(|l| (l, exclusive)).into_iter().collect());
        }
        let exclusive = self.keyword(location, node, exclusive_keyword, number)?;
        Ok(limit
            .map(|l| (l, false))
            .into_iter()
            .chain(exclusive.map(|l| (l, true)))
            .collect())
    }

    fn items(&mut self, location: &SchemaLocation, node: A) -> Result<Option<Items>, SchemaError> {
        let Some(value) = node.object_get("items") else {
            return Ok(None);
        };
        if !value.is_array() {
            let schema = self.bind(location.join(["items"]), value)?;
            return Ok(Some(Items::Single(schema)));
        }
        let items = self.bind_elements(location, "items", value)?;
        let additional = self.additional(location, node, "additionalItems")?;
        Ok(Some(Items::Tuple { items, additional }))
    }

    /// `additionalProperties` / `additionalItems`.
    fn additional(
        &mut self,
        location: &SchemaLocation,
        node: A,
        keyword: &str,
    ) -> Result<AdditionalSchema, SchemaError> {
        let Some(value) = node.object_get(keyword) else {
            return Ok(AdditionalSchema::Allowed);
        };
        match value.as_bool() {
            Some(true) => Ok(AdditionalSchema::Allowed),
            Some(false) => Ok(AdditionalSchema::Forbidden),
            None => Ok(AdditionalSchema::Schema(
                self.bind(location.join([keyword]), value)?,
            )),
        }
    }

    /// `properties`, `patternProperties` and `additionalProperties`, plus the
    /// Draft 3 `required` list gathered from the property schemas.
    fn properties(
        &mut self,
        location: &SchemaLocation,
        node: A,
    ) -> Result<Vec<Constraint>, SchemaError> {
        let declared = self.keyword(location, node, "properties", members)?;
        let patterns = self.keyword(location, node, "patternProperties", members)?;
        if declared.is_none() && patterns.is_none() && node.object_get("additionalProperties").is_none() {
            return Ok(Vec::new());
        }

        let mut required = Vec::new();
        let mut properties = BTreeMap::new();
        for (name, value) in declared.unwrap_or_default() {
            if self.options.draft == Draft::Draft3
                && value.object_get("required").and_then(|r| r.as_bool()) == Some(true)
            {
                required.push(name.clone());
            }
            let id = self.bind(location.join(["properties", name.as_str()]), value)?;
            properties.insert(name, id);
        }
        let mut pattern_properties = BTreeMap::new();
        for (pattern, value) in patterns.unwrap_or_default() {
            let id = self.bind(location.join(["patternProperties", pattern.as_str()]), value)?;
            pattern_properties.insert(pattern, id);
        }
        let additional = self.additional(location, node, "additionalProperties")?;

        let mut constraints = vec![Constraint::Properties {
            properties,
            pattern_properties,
            additional,
        }];
        if !required.is_empty() {
            constraints.push(Constraint::Required {
                properties: required,
            });
        }
        Ok(constraints)
    }

    fn dependencies(
        &mut self,
        location: &SchemaLocation,
        node: A,
    ) -> Result<Option<BTreeMap<String, Dependency>>, SchemaError> {
        let Some(entries) = self.keyword(location, node, "dependencies", members)? else {
            return Ok(None);
        };
        let draft = self.options.draft;
        let mut dependencies = BTreeMap::new();
        for (name, value) in entries {
            let dependency = match value.kind() {
                NodeKind::Array => Dependency::Properties(
                    string_list(value).map_err(|reason| self.invalid(location, "dependencies", reason))?,
                ),
                NodeKind::String if draft == Draft::Draft3 => {
                    Dependency::Properties(value.as_str().map(str::to_string).into_iter().collect())
                }
                _ => Dependency::Schema(
                    self.bind(location.join(["dependencies", name.as_str()]), value)?,
                ),
            };
            dependencies.insert(name, dependency);
        }
        Ok(Some(dependencies))
    }

    /// `allOf` / `anyOf` / `oneOf`: a non-empty array of schemas.
    fn schema_list(
        &mut self,
        location: &SchemaLocation,
        node: A,
        keyword: &str,
    ) -> Result<Option<Vec<SchemaId>>, SchemaError> {
        let Some(value) = node.object_get(keyword) else {
            return Ok(None);
        };
        match value.array_len() {
            Some(len) if len > 0 => Ok(Some(self.bind_elements(location, keyword, value)?)),
            Some(_) => Err(self.invalid(location, keyword, "expected at least one schema".into())),
            None => Err(self.invalid(
                location,
                keyword,
                format!("expected an array, found {}", value.kind()),
            )),
        }
    }

    /// Draft 3 `extends`: one schema or an array of them.
    fn extends(
        &mut self,
        location: &SchemaLocation,
        node: A,
    ) -> Result<Option<Vec<SchemaId>>, SchemaError> {
        let Some(value) = node.object_get("extends") else {
            return Ok(None);
        };
        if value.is_array() {
            return Ok(Some(self.bind_elements(location, "extends", value)?));
        }
        Ok(Some(vec![self.bind(location.join(["extends"]), value)?]))
    }

    /// `if` / `then` / `else`. `then` and `else` without `if` are ignored.
    fn conditional(
        &mut self,
        location: &SchemaLocation,
        node: A,
    ) -> Result<Option<Constraint>, SchemaError> {
        let Some(condition) = node.object_get("if") else {
            return Ok(None);
        };
        let condition = self.bind(location.join(["if"]), condition)?;
        let then = node
            .object_get("then")
            .map(|value| self.bind(location.join(["then"]), value))
            .transpose()?;
        let otherwise = node
            .object_get("else")
            .map(|value| self.bind(location.join(["else"]), value))
            .transpose()?;
        Ok(Some(Constraint::Conditional {
            condition,
            then,
            otherwise,
        }))
    }

    /// Bind every element of the array `value` found under `keyword`.
    fn bind_elements(
        &mut self,
        location: &SchemaLocation,
        keyword: &str,
        value: A,
    ) -> Result<Vec<SchemaId>, SchemaError> {
        let elements = elements(value).map_err(|reason| self.invalid(location, keyword, reason))?;
        let mut ids = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            let index = index.to_string();
            ids.push(self.bind(location.join([keyword, index.as_str()]), element)?);
        }
        Ok(ids)
    }
}

fn string<A: Adapter>(value: A) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected a string, found {}", value.kind()))
}

fn boolean<A: Adapter>(value: A) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean, found {}", value.kind()))
}

fn number<A: Adapter>(value: A) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected a number, found {}", value.kind()))
}

fn positive_number<A: Adapter>(value: A) -> Result<f64, String> {
    match number(value)? {
        n if n > 0.0 => Ok(n),
        n => Err(format!("expected a number greater than zero, found {n}")),
    }
}

/// A non-negative integer. `2.0` is accepted; `2.5` and `-1` are not.
fn count<A: Adapter>(value: A) -> Result<u64, String> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(format!(
            "expected a non-negative integer, found {}",
            value.kind()
        )),
    }
}

fn elements<A: Adapter>(value: A) -> Result<Vec<A>, String> {
    let len = value
        .array_len()
        .ok_or_else(|| format!("expected an array, found {}", value.kind()))?;
    Ok((0..len).filter_map(|i| value.array_get(i)).collect())
}

fn members<A: Adapter>(value: A) -> Result<Vec<(String, A)>, String> {
    value
        .object_members()
        .ok_or_else(|| format!("expected an object, found {}", value.kind()))
}

fn string_list<A: Adapter>(value: A) -> Result<Vec<String>, String> {
    elements(value)?.into_iter().map(string).collect()
}

fn enum_values<A: Adapter>(value: A) -> Result<Vec<jsonval_core::FrozenValue>, String> {
    let values = elements(value)?;
    if values.is_empty() {
        return Err("expected at least one value".to_string());
    }
    Ok(values.into_iter().map(freeze).collect())
}

/// `type` as a list of primitive types. An empty list means "any type"
/// (Draft 3 `"any"`).
fn types<A: Adapter>(value: A, draft: Draft) -> Result<Vec<JsonType>, String> {
    let names = match value.kind() {
        NodeKind::String => vec![string(value)?],
        NodeKind::Array => string_list(value)?,
        kind => return Err(format!("expected a string or an array, found {kind}")),
    };
    let mut types = Vec::with_capacity(names.len());
    for name in names {
        if draft == Draft::Draft3 && name == "any" {
            return Ok(Vec::new());
        }
        let ty = JsonType::from_name(&name).ok_or_else(|| format!("unknown type '{name}'"))?;
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    Ok(types)
}
