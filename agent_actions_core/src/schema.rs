//! Typed input schemas for actions.
//!
//! Every action declares its arguments as an [`InputSchema`]. Raw arguments
//! coming from an LLM tool call are validated against it before the action
//! runs: required fields must be present, defaults are filled in, numeric
//! strings are coerced and unknown fields are rejected. The same schema
//! renders the JSON schema advertised to the model.

use std::collections::HashSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Number, Value};

use crate::error::SchemaError;

/// Primitive type of a single schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Float,
    Integer,
}

impl FieldType {
    fn json_type(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Float => "number",
            FieldType::Integer => "integer",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Float => "float",
            FieldType::Integer => "integer",
        };
        f.write_str(name)
    }
}

/// Declaration of one named argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl FieldSpec {
    fn new(name: &str, field_type: FieldType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            description: description.to_string(),
            required: true,
            default: None,
            minimum: None,
            maximum: None,
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self::new(name, FieldType::String, description)
    }

    pub fn float(name: &str, description: &str) -> Self {
        Self::new(name, FieldType::Float, description)
    }

    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(name, FieldType::Integer, description)
    }

    /// Mark the field optional; `default` is used when it is absent.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(default.into());
        self
    }

    /// Mark the field optional with no default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.default = None;
        self
    }

    /// Inclusive lower bound for numeric fields.
    pub fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Inclusive upper bound for numeric fields.
    pub fn max(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    fn coerce(&self, value: &Value) -> Result<Value, SchemaError> {
        let mismatch = || SchemaError::TypeMismatch {
            field: self.name.clone(),
            expected: self.field_type,
            found: describe(value),
        };

        let coerced = match self.field_type {
            FieldType::String => match value {
                Value::String(_) => return Ok(value.clone()),
                _ => return Err(mismatch()),
            },
            FieldType::Float => {
                let number = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                let number = number.filter(|n| n.is_finite()).ok_or_else(mismatch)?;
                self.check_range(number)?;
                Number::from_f64(number).map(Value::Number).ok_or_else(mismatch)?
            }
            FieldType::Integer => {
                let number = match value {
                    Value::Number(n) => n.as_i64().or_else(|| {
                        n.as_f64()
                            .filter(|f| f.is_finite() && f.fract() == 0.0)
                            .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                            .map(|f| f as i64)
                    }),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                let number = number.ok_or_else(mismatch)?;
                self.check_range(number as f64)?;
                Value::from(number)
            }
        };

        Ok(coerced)
    }

    fn check_range(&self, value: f64) -> Result<(), SchemaError> {
        let below = self.minimum.is_some_and(|min| value < min);
        let above = self.maximum.is_some_and(|max| value > max);
        if below || above {
            return Err(SchemaError::OutOfRange {
                field: self.name.clone(),
                value,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }

    fn json_schema(&self) -> Value {
        let mut property = json!({
            "type": self.field_type.json_type(),
            "description": self.description,
        });
        if let Some(object) = property.as_object_mut() {
            if let Some(default) = &self.default {
                object.insert("default".to_string(), default.clone());
            }
            if let Some(min) = self.minimum {
                object.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = self.maximum {
                object.insert("maximum".to_string(), json!(max));
            }
        }
        property
    }
}

/// Ordered set of uniquely named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    /// A schema accepting no arguments at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate raw tool-call arguments.
    ///
    /// `null` is accepted as an empty argument object. Unknown fields are
    /// always rejected.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedArgs, SchemaError> {
        let empty = Map::new();
        let provided = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => return Err(SchemaError::NotAnObject(describe(other))),
        };

        if let Some(unknown) = provided.keys().find(|key| self.field(key).is_none()) {
            return Err(SchemaError::UnknownField(unknown.clone()));
        }

        let mut validated = Map::new();
        for field in &self.fields {
            match provided.get(&field.name) {
                Some(value) => {
                    validated.insert(field.name.clone(), field.coerce(value)?);
                }
                None if field.required => {
                    return Err(SchemaError::MissingField(field.name.clone()));
                }
                None => {
                    if let Some(default) = &field.default {
                        validated.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(ValidatedArgs(validated))
    }

    /// Render the schema in the JSON-schema dialect tool-calling LLMs expect.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Serializes as the rendered JSON schema.
impl Serialize for InputSchema {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.to_json_schema().serialize(serializer)
    }
}

/// Arguments that passed schema validation, with defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserialize into the action's typed input struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, SchemaError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| SchemaError::Malformed(e.to_string()))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
