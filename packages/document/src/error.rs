use serde_json::Value;
use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized document shape: expected a node array, a `root` object, a node, a post or a collection, found {found}")]
    UnrecognizedShape { found: String },
}

impl DocumentError {
    pub fn unrecognized_shape(value: &Value) -> Self {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object without `type`, `root`, `children`, `content` or `docs`",
        };
        Self::UnrecognizedShape {
            found: found.to_string(),
        }
    }
}
