//! Writer and pool configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Line terminator of the host platform
#[cfg(windows)]
pub const PLATFORM_NEW_LINE: &str = "\r\n";
/// Line terminator of the host platform
#[cfg(not(windows))]
pub const PLATFORM_NEW_LINE: &str = "\n";

/// Where the opening brace of a bracket block goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyle {
    /// Opening brace on its own line
    #[default]
    NextLine,
    /// Opening brace at the end of the current line (Java / K&R style)
    SameLine,
}

/// Style options fixed for the lifetime of a writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Indent unit used by bracket blocks and [`CodeWriter::indent`](crate::CodeWriter::indent)
    pub indent: String,
    /// Line terminator written by every new line
    pub new_line: String,
    /// Placement of opening braces
    pub brace_style: BraceStyle,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            new_line: PLATFORM_NEW_LINE.to_string(),
            brace_style: BraceStyle::NextLine,
        }
    }
}

impl WriterOptions {
    /// Set the indent unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the line terminator
    pub fn with_new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = new_line.into();
        self
    }

    /// Set the brace placement
    pub fn with_brace_style(mut self, brace_style: BraceStyle) -> Self {
        self.brace_style = brace_style;
        self
    }

    /// Load options from a TOML document; missing keys keep their defaults
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(document)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the indent is blank and the terminator is a real line break
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Invalid {
                field: "indent",
                message: format!("{:?} must contain only spaces and tabs", self.indent),
            });
        }
        if !matches!(self.new_line.as_str(), "\n" | "\r\n" | "\r") {
            return Err(ConfigError::Invalid {
                field: "new_line",
                message: format!("{:?} is not a line terminator", self.new_line),
            });
        }
        Ok(())
    }
}

/// Retention limits for a [`CharPool`](crate::buffer::CharPool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of idle buffers kept for reuse
    pub max_retained: usize,
    /// Buffers larger than this are dropped instead of retained
    pub max_retained_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_retained: 32,
            max_retained_capacity: 1024 * 1024,
        }
    }
}

impl PoolConfig {
    /// Load a pool configuration from TOML
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        if config.max_retained_capacity == 0 && config.max_retained > 0 {
            return Err(ConfigError::Invalid {
                field: "max_retained_capacity",
                message: "must be non-zero when buffers are retained".to_string(),
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WriterOptions::default();
        assert_eq!(options.indent, "    ");
        assert_eq!(options.new_line, PLATFORM_NEW_LINE);
        assert_eq!(options.brace_style, BraceStyle::NextLine);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = WriterOptions::from_toml_str(
            r#"
            indent = "  "
            brace_style = "same-line"
            "#,
        )
        .unwrap();
        assert_eq!(options.indent, "  ");
        assert_eq!(options.brace_style, BraceStyle::SameLine);
        assert_eq!(options.new_line, PLATFORM_NEW_LINE);
    }

    #[test]
    fn test_rejects_visible_indent() {
        let result = WriterOptions::from_toml_str(r#"indent = "--""#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "indent", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_terminator() {
        let result = WriterOptions::from_toml_str(r#"new_line = ";""#);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { field: "new_line", .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = WriterOptions::from_toml_str("indent = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_pool_config_from_toml() {
        let config = PoolConfig::from_toml_str("max_retained = 4").unwrap();
        assert_eq!(config.max_retained, 4);
        assert_eq!(config.max_retained_capacity, 1024 * 1024);
    }
}
