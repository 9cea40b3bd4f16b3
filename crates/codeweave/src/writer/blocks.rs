//! Indent scopes and brace blocks

use std::ops::{Deref, DerefMut};

use super::CodeWriter;
use crate::{error::Result, options::BraceStyle};

/// Restores a writer's indent when dropped
///
/// Obtained from [`CodeWriter::indented`]; derefs to the writer so it can be
/// written through directly. If the scope ended right after a new line, the
/// stale indent at the tail is swapped for the restored one.
pub struct IndentGuard<'w> {
    writer: &'w mut CodeWriter,
    saved: Option<String>,
}

impl<'w> IndentGuard<'w> {
    fn replace(writer: &'w mut CodeWriter, indent: String) -> Self {
        let saved = writer.replace_indent(indent);
        Self {
            writer,
            saved: Some(saved),
        }
    }
}

impl Deref for IndentGuard<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        let Some(saved) = self.saved.take() else {
            return;
        };
        let writer = &mut *self.writer;
        let dangling = writer.at_fresh_indent();
        let stale = writer.replace_indent(saved);
        if dangling && stale != writer.indent {
            let len = writer.buffer.len() - stale.len();
            writer.buffer.truncate(len);
            writer.buffer.write_str(&writer.indent);
        }
    }
}

impl CodeWriter {
    /// Extend the indent by `extra` until the returned guard drops
    ///
    /// `extra` is written immediately when the writer sits at the start of a
    /// line, so the line being started picks up the new indent too.
    pub fn indented(&mut self, extra: &str) -> IndentGuard<'_> {
        if self.is_on_new_line() {
            self.write(extra);
        }
        let indent = format!("{}{}", self.indent, extra);
        IndentGuard::replace(self, indent)
    }

    fn scoped<R>(&mut self, extra: &str, block: impl FnOnce(&mut CodeWriter) -> R) -> R {
        let mut guard = self.indented(extra);
        block(&mut guard)
    }

    /// Run `block` with the indent fixed to the indent of the current line
    pub(crate) fn at_line_indent<R>(&mut self, block: impl FnOnce(&mut CodeWriter) -> R) -> R {
        let indent = self.current_line_indent().to_string();
        let mut guard = IndentGuard::replace(self, indent);
        block(&mut guard)
    }

    /// Run `block` with the indent extended by `extra`
    pub fn indent_block<F>(&mut self, extra: &str, block: F) -> &mut Self
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.scoped(extra, block);
        self
    }

    /// Fallible form of [`indent_block`](Self::indent_block)
    pub fn try_indent_block<F>(&mut self, extra: &str, block: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut CodeWriter) -> Result<()>,
    {
        self.scoped(extra, block)?;
        Ok(self)
    }

    /// Run `block` indented by one indent unit
    pub fn indent<F>(&mut self, block: F) -> &mut Self
    where
        F: FnOnce(&mut CodeWriter),
    {
        let unit = self.options.indent.clone();
        self.indent_block(&unit, block)
    }

    /// Write `{`, run `block` one indent unit deeper, then write `}`
    ///
    /// Trailing whitespace before the block is dropped and the closing brace
    /// always starts its own line. Nothing is written after the `}`.
    pub fn bracket_block<F>(&mut self, block: F) -> &mut Self
    where
        F: FnOnce(&mut CodeWriter),
    {
        self.open_brace();
        let unit = self.options.indent.clone();
        self.scoped(&unit, block);
        self.close_brace()
    }

    /// Fallible form of [`bracket_block`](Self::bracket_block)
    pub fn try_bracket_block<F>(&mut self, block: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut CodeWriter) -> Result<()>,
    {
        self.open_brace();
        let unit = self.options.indent.clone();
        self.scoped(&unit, block)?;
        Ok(self.close_brace())
    }

    fn open_brace(&mut self) {
        self.trim_trailing_whitespace();
        if self.buffer.is_empty() {
            self.buffer.write_str(&self.indent);
        }
        match self.options.brace_style {
            BraceStyle::NextLine => {
                self.ensure_on_new_line();
            }
            BraceStyle::SameLine => {
                if !self.is_on_new_line() {
                    self.write_char(' ');
                }
            }
        }
        self.write_char('{').new_line();
    }

    fn close_brace(&mut self) -> &mut Self {
        self.ensure_on_new_line().write_char('}')
    }
}
