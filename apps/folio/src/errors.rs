use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// The resume text is not well-formed structured data, or lacks `basics`.
/// Fatal for the whole view layer: no partial model is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    /// serde_yaml messages already end with "at line X column Y".
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl From<serde_yaml::Error> for ParseError {
    fn from(e: serde_yaml::Error) -> Self {
        let location = e.location();
        ParseError {
            message: e.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

/// A content item's frontmatter field does not match its declared shape.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{path}: expected {expected}, found {found}")]
pub struct SchemaValidationError {
    /// Field path, e.g. `title` or `tags[2]`.
    pub path: String,
    pub expected: &'static str,
    pub found: String,
}

/// Structural problems in a markdown page before schema validation runs.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum ContentError {
    #[error("frontmatter opened with '---' but never closed")]
    UnclosedFrontmatter,

    #[error("frontmatter is not valid YAML: {0}")]
    InvalidYaml(String),

    #[error("frontmatter must be a mapping of keys to values")]
    NotAMapping,
}

/// Application-level error type.
/// `code()` and `to_json()` give the binary a stable machine-readable report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Content error in {path}: {source}")]
    Content {
        path: PathBuf,
        #[source]
        source: ContentError,
    },

    #[error("Schema validation failed for {item}: {}", JoinedErrors(.errors))]
    SchemaValidation {
        item: String,
        errors: Vec<SchemaValidationError>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

struct JoinedErrors<'a>(&'a [SchemaValidationError]);

impl fmt::Display for JoinedErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Content { .. } => "CONTENT_ERROR",
            AppError::SchemaValidation { .. } => "SCHEMA_VALIDATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Io { .. } => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Renders the error the way the CLI reports it on stderr.
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        });
        match self {
            AppError::SchemaValidation { errors, .. } => {
                body["error"]["fields"] = json!(errors);
            }
            AppError::Parse(ParseError {
                line: Some(line),
                column,
                ..
            }) => {
                body["error"]["line"] = json!(line);
                body["error"]["column"] = json!(column);
            }
            _ => {}
        }
        body
    }
}
