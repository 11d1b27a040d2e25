//! Frontmatter schemas for the `articles` and `projects` collections.

use serde_yaml::{Mapping, Value};

use crate::errors::SchemaValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    StringArray,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::StringArray => "string[]",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

const fn required(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: true,
    }
}

const fn optional(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        ty,
        required: false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static ARTICLES_SCHEMA: CollectionSchema = CollectionSchema {
    name: "articles",
    fields: &[
        required("title", FieldType::String),
        required("description", FieldType::String),
        required("date", FieldType::String),
        optional("readingTime", FieldType::Number),
        optional("tags", FieldType::StringArray),
    ],
};

pub static PROJECTS_SCHEMA: CollectionSchema = CollectionSchema {
    name: "projects",
    fields: &[
        required("title", FieldType::String),
        required("description", FieldType::String),
        optional("date", FieldType::String),
        optional("technologies", FieldType::StringArray),
        optional("github", FieldType::String),
        optional("demo", FieldType::String),
    ],
};

impl CollectionSchema {
    /// Checks every declared field; returns all failures, empty when valid.
    /// Undeclared keys are ignored. Optional fields may be absent but not null.
    pub fn validate(&self, frontmatter: &Mapping) -> Vec<SchemaValidationError> {
        let mut errors = Vec::new();
        for field in self.fields {
            match frontmatter.get(field.name) {
                None if field.required => errors.push(SchemaValidationError {
                    path: field.name.to_string(),
                    expected: field.ty.name(),
                    found: "missing".to_string(),
                }),
                None => {}
                Some(value) => check_value(field.name, field.ty, value, &mut errors),
            }
        }
        errors
    }
}

fn check_value(
    path: &str,
    ty: FieldType,
    value: &Value,
    errors: &mut Vec<SchemaValidationError>,
) {
    let mismatch = |expected: &'static str, path: String, value: &Value| SchemaValidationError {
        path,
        expected,
        found: type_name(value).to_string(),
    };

    match (ty, value) {
        (FieldType::String, Value::String(_)) | (FieldType::Number, Value::Number(_)) => {}
        (FieldType::StringArray, Value::Sequence(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    errors.push(mismatch("string", format!("{path}[{i}]"), item));
                }
            }
        }
        _ => errors.push(mismatch(ty.name(), path.to_string(), value)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}
