//! Error types for template rendering and writer configuration

use thiserror::Error;

/// Result type for template operations
pub type Result<T, E = TemplateError> = std::result::Result<T, E>;

/// Errors raised while parsing or rendering a template
///
/// Positions are 1-based and refer to the template as it was passed in,
/// counting characters rather than bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `}` that is neither doubled nor closing a hole
    #[error("Unmatched closing brace at line {line}, column {column}")]
    UnmatchedClosingBrace {
        /// Line of the brace
        line: usize,
        /// Column of the brace
        column: usize,
    },

    /// A hole that runs to the end of its line without a `}`
    #[error("Missing '}}' for argument hole opened at line {line}, column {column}")]
    MissingHoleTerminator {
        /// Line of the opening brace
        line: usize,
        /// Column of the opening brace
        column: usize,
    },

    /// `{0,10}` style alignment, which the grammar does not support
    #[error("Alignment is not supported in argument holes (line {line}, column {column})")]
    UnsupportedAlignment {
        /// Line of the comma
        line: usize,
        /// Column of the comma
        column: usize,
    },

    /// A `{` inside a format specifier
    #[error("Unexpected '{{' inside format specifier at line {line}, column {column}")]
    NestedBraceInFormat {
        /// Line of the nested brace
        line: usize,
        /// Column of the nested brace
        column: usize,
    },

    /// A hole whose index is missing, malformed or too large
    #[error("Invalid argument index at line {line}, column {column}")]
    InvalidArgumentIndex {
        /// Line of the offending character
        line: usize,
        /// Column of the offending character
        column: usize,
    },

    /// A well-formed index that does not refer to a supplied argument
    #[error("Argument index {index} is out of range for {count} argument(s)")]
    ArgumentIndexOutOfRange {
        /// Index found in the hole
        index: usize,
        /// Number of arguments supplied
        count: usize,
    },

    /// A formattable value rejected its format specifier
    #[error("Unsupported format specifier: {spec:?}")]
    Format {
        /// The specifier as written in the hole
        spec: String,
    },
}

/// Errors raised while loading writer or pool configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML could not be decoded
    #[error("Invalid configuration document: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value decoded but is not acceptable
    #[error("Invalid value for {field}: {message}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_errors_report_position() {
        let err = TemplateError::UnmatchedClosingBrace { line: 2, column: 7 };
        assert_eq!(
            err.to_string(),
            "Unmatched closing brace at line 2, column 7"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = TemplateError::ArgumentIndexOutOfRange { index: 3, count: 1 };
        assert_eq!(
            err.to_string(),
            "Argument index 3 is out of range for 1 argument(s)"
        );
    }
}
