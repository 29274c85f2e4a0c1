use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::path::{Path, PathStep};
use crate::value::Kind;

/// The shape a terminal or navigation call asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    String,
    Float,
    Int,
    Bool,
    Map,
    Array,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::String => "a string",
            Shape::Float => "a float",
            Shape::Int => "an int",
            Shape::Bool => "a bool",
            Shape::Map => "a map",
            Shape::Array => "an array",
        })
    }
}

/// The first failure of an accessor chain.
///
/// Cloning is cheap and yields an error with identical `Display` text, which
/// is how a frozen error is handed out by every later call on the chain.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    #[error("decode error: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
    #[error("encode error: {0}")]
    Encode(#[source] Arc<serde_json::Error>),
    #[error("key not found: '{key}' at {path}; valid keys: [{}]", .valid_keys.join(", "))]
    KeyNotFound {
        key: String,
        path: Path,
        valid_keys: Vec<String>,
    },
    #[error("invalid index: {index} at {path}; {}", index_range(.len))]
    IndexOutOfRange { index: usize, len: usize, path: Path },
    #[error("type mismatch at {path}: item {step} was {}, not {expected}", article(.actual))]
    TypeMismatch {
        path: Path,
        step: PathStep,
        expected: Shape,
        actual: Kind,
    },
}

impl AccessError {
    pub(crate) fn decode(err: serde_json::Error) -> Self {
        AccessError::Decode(Arc::new(err))
    }

    pub(crate) fn encode(err: serde_json::Error) -> Self {
        AccessError::Encode(Arc::new(err))
    }

    /// The path of the last successfully resolved step before the failure.
    ///
    /// Decode and encode errors carry no path.
    pub fn path(&self) -> Option<&Path> {
        match self {
            AccessError::KeyNotFound { path, .. }
            | AccessError::IndexOutOfRange { path, .. }
            | AccessError::TypeMismatch { path, .. } => Some(path),
            AccessError::Decode(_) | AccessError::Encode(_) => None,
        }
    }
}

fn index_range(len: &usize) -> String {
    match *len {
        0 => String::from("the array is empty"),
        n => format!("it should be between 0 and {}", n - 1),
    }
}

fn article(kind: &Kind) -> String {
    match kind {
        Kind::Array => String::from("an array"),
        _ => format!("a {}", kind),
    }
}
