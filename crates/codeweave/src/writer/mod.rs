//! Indentation-aware source writer
//!
//! [`CodeWriter`] appends text to a [`PooledBuffer`] and remembers a current
//! indent. The indent is only ever materialized by [`CodeWriter::new_line`],
//! which writes the line terminator followed by the indent; changing the
//! indent never rewrites text that is already in the buffer.

mod blocks;
mod text;

use std::{fmt, sync::Arc};

pub use blocks::IndentGuard;
pub use text::CommentStyle;
pub(crate) use text::{split_lines, strip_leading_line_break};

use crate::{
    buffer::{CharPool, PooledBuffer, MIN_CAPACITY},
    error::ConfigError,
    options::WriterOptions,
    source::CodeSource,
};

/// A fluent writer for indented source text
///
/// ```
/// use codeweave::{CodeWriter, WriterOptions};
///
/// let mut writer = CodeWriter::with_options(WriterOptions::default().with_new_line("\n"));
/// writer
///     .write("fn main()")
///     .bracket_block(|body| {
///         body.write("println!(\"hi\");");
///     });
/// assert_eq!(writer.to_string(), "fn main()\n{\n    println!(\"hi\");\n}");
/// ```
pub struct CodeWriter {
    buffer: PooledBuffer,
    indent: String,
    /// Terminator followed by the current indent, kept in sync with `indent`
    line_start: String,
    options: WriterOptions,
}

impl CodeWriter {
    /// Create a writer with default options on the shared pool
    pub fn new() -> Self {
        Self::with_capacity_and_options(MIN_CAPACITY, WriterOptions::default())
    }

    /// Create a writer with a capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_options(capacity, WriterOptions::default())
    }

    /// Create a writer with explicit style options
    pub fn with_options(options: WriterOptions) -> Self {
        Self::with_capacity_and_options(MIN_CAPACITY, options)
    }

    /// Create a writer after checking `options` with
    /// [`WriterOptions::validate`]
    pub fn try_with_options(options: WriterOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self::with_options(options))
    }

    /// Create a writer with a capacity hint and style options
    pub fn with_capacity_and_options(capacity: usize, options: WriterOptions) -> Self {
        Self::from_buffer(PooledBuffer::with_capacity(capacity), options)
    }

    /// Create a writer whose buffer is leased from `pool`
    pub fn with_pool(pool: Arc<CharPool>, capacity: usize, options: WriterOptions) -> Self {
        Self::from_buffer(PooledBuffer::with_pool(pool, capacity), options)
    }

    fn from_buffer(buffer: PooledBuffer, options: WriterOptions) -> Self {
        debug_assert!(options.validate().is_ok(), "invalid writer options: {:?}", options);
        Self {
            buffer,
            indent: String::new(),
            line_start: options.new_line.clone(),
            options,
        }
    }

    /// Style options of this writer
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// The indent written after each new line
    pub fn indent_str(&self) -> &str {
        &self.indent
    }

    /// Replace the current indent, returning the previous one
    pub(crate) fn replace_indent(&mut self, indent: String) -> String {
        self.line_start.truncate(self.options.new_line.len());
        self.line_start.push_str(&indent);
        std::mem::replace(&mut self.indent, indent)
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The text written so far
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// The underlying buffer
    pub fn buffer(&self) -> &PooledBuffer {
        &self.buffer
    }

    // ------------------------------------------------------------------
    // Primitive writes
    // ------------------------------------------------------------------

    /// Write text verbatim
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.buffer.write_str(text);
        self
    }

    /// Write one character
    pub fn write_char(&mut self, ch: char) -> &mut Self {
        self.buffer.write_char(ch);
        self
    }

    /// Write any `Display` value
    pub fn write_display<T: fmt::Display + ?Sized>(&mut self, value: &T) -> &mut Self {
        if fmt::write(self, format_args!("{}", value)).is_err() {
            tracing::warn!("Display implementation reported an error; output may be partial");
        }
        self
    }

    /// Write text, then a new line
    pub fn write_line(&mut self, text: &str) -> &mut Self {
        self.write(text).new_line()
    }

    /// Write a character, then a new line
    pub fn write_line_char(&mut self, ch: char) -> &mut Self {
        self.write_char(ch).new_line()
    }

    /// Write the line terminator and the current indent
    pub fn new_line(&mut self) -> &mut Self {
        self.buffer.write_str(&self.line_start);
        self
    }

    /// Write the line terminator without the indent
    pub(crate) fn line_break(&mut self) -> &mut Self {
        self.buffer.write_str(&self.options.new_line);
        self
    }

    /// Write `count` new lines
    pub fn new_lines(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.new_line();
        }
        self
    }

    /// Write a new line unless the writer already sits at the start of one
    pub fn ensure_on_new_line(&mut self) -> &mut Self {
        if !self.is_on_new_line() {
            self.new_line();
        }
        self
    }

    /// Write a space unless the text is empty or already ends in whitespace
    pub fn ensure_whitespace(&mut self) -> &mut Self {
        if !self.is_on_whitespace() {
            self.write_char(' ');
        }
        self
    }

    /// Drop trailing whitespace, line terminators included
    pub fn trim_trailing_whitespace(&mut self) -> &mut Self {
        let trimmed = self.buffer.as_str().trim_end().len();
        self.buffer.truncate(trimmed);
        self
    }

    /// Rewind to `len` bytes
    ///
    /// # Panics
    ///
    /// If `len` is past the written text or not on a character boundary.
    pub fn truncate(&mut self, len: usize) -> &mut Self {
        self.buffer.truncate(len);
        self
    }

    /// Remember the current text so a failed write can be undone
    ///
    /// Nested blocks may trim whitespace written before the checkpoint, so
    /// the trailing whitespace is kept aside rather than just the length.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        let written = self.buffer.as_str();
        let settled = written.trim_end().len();
        Checkpoint {
            settled,
            tail: written[settled..].to_string(),
        }
    }

    /// Restore the text captured by [`checkpoint`](Self::checkpoint)
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        let settled = checkpoint.settled.min(self.buffer.len());
        self.buffer.truncate(settled);
        self.buffer.write_str(&checkpoint.tail);
    }

    // ------------------------------------------------------------------
    // Queries over written text
    // ------------------------------------------------------------------

    /// Whether the writer sits at the start of a line: the text is empty,
    /// ends with terminator + current indent, or is exactly the current indent
    pub fn is_on_new_line(&self) -> bool {
        self.buffer.is_empty() || self.at_fresh_indent()
    }

    /// Whether the text ends in a line start that holds nothing but the indent
    pub(crate) fn at_fresh_indent(&self) -> bool {
        !self.buffer.is_empty()
            && (self.buffer.ends_with(&self.line_start) || self.buffer.as_str() == self.indent)
    }

    /// Whether the text is empty or ends in whitespace
    pub fn is_on_whitespace(&self) -> bool {
        self.buffer
            .as_str()
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    }

    /// Whether the written text starts with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.buffer.starts_with(prefix)
    }

    /// Whether the written text ends with `suffix`
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.buffer.ends_with(suffix)
    }

    /// Leading whitespace of the line currently being written
    pub fn current_line_indent(&self) -> &str {
        let written = self.buffer.as_str();
        let line = match written.rfind(self.options.new_line.as_str()) {
            Some(pos) => &written[pos + self.options.new_line.len()..],
            None => written,
        };
        let content = line.trim_start_matches([' ', '\t']);
        &line[..line.len() - content.len()]
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Take the written text; the storage does not go back to the pool
    pub fn into_string(self) -> String {
        self.buffer.into_string()
    }

    /// Snapshot the text as a named generated source
    pub fn to_source(&self, hint_name: impl Into<String>) -> CodeSource {
        CodeSource::new(hint_name, self.as_str())
    }

    /// Consume the writer into a named generated source
    pub fn into_source(self, hint_name: impl Into<String>) -> CodeSource {
        CodeSource::new(hint_name, self.into_string())
    }

    /// Release the buffer back to its pool
    ///
    /// Equivalent to dropping the writer.
    pub fn dispose(self) {}
}

/// Text state saved by [`CodeWriter::checkpoint`]
pub(crate) struct Checkpoint {
    settled: usize,
    tail: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for CodeWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.write_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.buffer.write_char(c);
        Ok(())
    }
}

impl fmt::Display for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for CodeWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeWriter")
            .field("indent", &self.indent)
            .field("options", &self.options)
            .field("buffer", &self.buffer)
            .finish()
    }
}
