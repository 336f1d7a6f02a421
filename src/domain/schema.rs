//! Response schema descriptors and the default structured answer shape

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// JSON type a schema field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    StringArray,
}

impl FieldKind {
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringArray => "array",
        }
    }

    fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| item.is_string())),
        }
    }
}

/// A single field constraint within a response schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// The expected shape of the chat model's reply.
///
/// Serialized into the prompt as a JSON-Schema-style object and used
/// afterwards to validate the raw reply field by field.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    pub fn with_optional_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Serialize the field/type description that is placed in the prompt.
    pub fn to_json(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut spec = serde_json::Map::new();
            spec.insert(
                "type".to_string(),
                serde_json::Value::String(field.kind.json_type().to_string()),
            );

            if field.kind == FieldKind::StringArray {
                spec.insert(
                    "items".to_string(),
                    serde_json::json!({ "type": "string" }),
                );
            }

            properties.insert(field.name.clone(), serde_json::Value::Object(spec));

            if field.required {
                required.push(serde_json::Value::String(field.name.clone()));
            }
        }

        serde_json::json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check a parsed reply against the field constraints: the value must
    /// be an object, every required field present with the right type, and
    /// any optional field that is present correctly typed.
    pub fn validate(&self, value: &serde_json::Value) -> bool {
        let Some(object) = value.as_object() else {
            return false;
        };

        self.fields.iter().all(|field| match object.get(&field.name) {
            Some(v) => field.kind.matches(v),
            None => !field.required,
        })
    }
}

/// The default answer schema: one answer field from the model, context and
/// sources attached by the orchestrator after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    pub answer: String,
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub sources: BTreeSet<String>,
}

impl StructuredAnswer {
    pub fn schema() -> SchemaDescriptor {
        SchemaDescriptor::new("StructuredAnswer").with_field("answer", FieldKind::String)
    }
}
