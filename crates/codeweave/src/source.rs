//! Generated source handed to downstream sinks

use serde::{Deserialize, Serialize};

/// A generated file: the name a sink should register it under and its text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeSource {
    /// File name hint, e.g. `Color.Extensions.g.cs`
    pub hint_name: String,
    /// Generated text
    pub text: String,
}

impl CodeSource {
    /// Create a source from a name and its text
    pub fn new(hint_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            hint_name: hint_name.into(),
            text: text.into(),
        }
    }
}
