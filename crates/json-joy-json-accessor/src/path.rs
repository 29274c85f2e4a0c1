//! Traversal paths reported in accessor errors.
//!
//! A [`Path`] records the keys and indices an accessor chain has resolved so
//! far, rendered in bracket notation starting from the root marker `$`:
//!
//! ```
//! use json_joy_json_accessor::Path;
//!
//! let path = Path::root().append_key("people").append_index(0).append_key("score");
//! assert_eq!(path.to_string(), "$['people'][0]['score']");
//! ```

use std::fmt;

/// A single traversal step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Object member access: `['key']`
    Key(String),
    /// Array element access: `[0]`
    Index(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(key) => write!(f, "['{}']", escape_single_quoted(key)),
            PathStep::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// An immutable, append-only traversal path.
///
/// Appending never mutates the receiver; it returns a new path, so a parent
/// accessor keeps its own path when a child fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The path of the document root, rendered as `$`.
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn append_key(&self, key: &str) -> Self {
        self.append(PathStep::Key(key.to_owned()))
    }

    pub fn append_index(&self, idx: usize) -> Self {
        self.append(PathStep::Index(idx))
    }

    fn append(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

fn escape_single_quoted(input: &str) -> String {
    if !input.contains(|c: char| c == '\\' || c == '\'') {
        return input.to_owned();
    }
    let mut out = String::with_capacity(input.len() + 2);
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_marker() {
        assert_eq!(Path::root().to_string(), "$");
        assert!(Path::root().is_root());
    }

    #[test]
    fn test_append_keeps_receiver() {
        let parent = Path::root().append_key("object");
        let child = parent.append_index(3);
        assert_eq!(parent.to_string(), "$['object']");
        assert_eq!(child.to_string(), "$['object'][3]");
        assert_eq!(child.len(), 2);
        assert_eq!(
            child.steps(),
            &[PathStep::Key("object".to_string()), PathStep::Index(3)]
        );
    }

    #[test]
    fn test_key_escaping() {
        let path = Path::root().append_key("it's").append_key("a\\b");
        assert_eq!(path.to_string(), "$['it\\'s']['a\\\\b']");
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(Path::root().append_key("").to_string(), "$['']");
    }
}
