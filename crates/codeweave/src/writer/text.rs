//! Multi-line text, comments, enumerations and file prologue helpers

use std::fmt::Display;

use super::CodeWriter;
use crate::naming::Naming;

/// Iterate the lines of `text`, accepting `\n`, `\r\n` and `\r` terminators
///
/// A trailing terminator yields a final empty line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(pos) => {
                let skip = if current[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[pos + skip..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Drop a single leading line terminator
pub(crate) fn strip_leading_line_break(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .or_else(|| text.strip_prefix('\r'))
        .unwrap_or(text)
}

/// Comment syntax used by [`CodeWriter::comment_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// text`
    #[default]
    SingleLine,
    /// `/// text`
    Doc,
    /// `/* text */`, continued with ` * ` on further lines
    Block,
}

impl CommentStyle {
    fn prefix(self) -> &'static str {
        match self {
            CommentStyle::SingleLine => "// ",
            CommentStyle::Doc => "/// ",
            CommentStyle::Block => "/* ",
        }
    }
}

impl CodeWriter {
    /// Write multi-line text so every line after the first starts at the
    /// current indent
    ///
    /// One leading line terminator is ignored, which lets callers write raw
    /// string literals that open on their own line. Indentation inside the
    /// text is kept as written.
    pub fn code_block(&mut self, text: &str) -> &mut Self {
        let mut lines = split_lines(strip_leading_line_break(text)).peekable();
        if let Some(first) = lines.next() {
            self.write(first);
        }
        while let Some(line) = lines.next() {
            if line.is_empty() && lines.peek().is_some() {
                self.line_break();
            } else {
                self.new_line().write(line);
            }
        }
        self
    }

    /// Write `text` as `//` comment lines
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comment_with(text, CommentStyle::SingleLine)
    }

    /// Write `text` as comment lines in the given style, ending on a new line
    pub fn comment_with(&mut self, text: &str, style: CommentStyle) -> &mut Self {
        match style {
            CommentStyle::SingleLine | CommentStyle::Doc => {
                for line in split_lines(text) {
                    self.write(style.prefix()).write_line(line);
                }
            }
            CommentStyle::Block => {
                let mut lines = split_lines(text);
                let first = lines.next().unwrap_or_default();
                self.write(style.prefix()).write(first);
                let mut multi_line = false;
                for line in lines {
                    multi_line = true;
                    self.new_line().write(" * ").write(line);
                }
                if multi_line {
                    self.new_line().write_line(" */");
                } else {
                    self.write_line(" */");
                }
            }
        }
        self
    }

    /// Write the `// <auto-generated/>` marker line
    pub fn auto_generated_header(&mut self) -> &mut Self {
        self.write_line("// <auto-generated/>")
    }

    /// Write a `#nullable enable` or `#nullable disable` directive line
    pub fn nullable(&mut self, enable: bool) -> &mut Self {
        self.write("#nullable ")
            .write_line(if enable { "enable" } else { "disable" })
    }

    /// Write a `using` directive line
    ///
    /// A `using ` prefix or trailing `;` already on `namespace` is not repeated.
    pub fn using(&mut self, namespace: &str) -> &mut Self {
        let name = namespace.trim();
        let name = name.strip_prefix("using ").unwrap_or(name);
        let name = name.strip_suffix(';').unwrap_or(name).trim();
        self.write("using ").write(name).write_line(";")
    }

    /// Write a file-scoped `namespace` declaration line; blank names are skipped
    pub fn namespace(&mut self, name: &str) -> &mut Self {
        let name = name.trim();
        if name.is_empty() {
            return self;
        }
        self.write("namespace ").write(name).write_line(";")
    }

    /// Write `text` converted to the given naming convention
    pub fn write_named(&mut self, text: &str, naming: Naming) -> &mut Self {
        let converted = naming.apply(text);
        self.write(&converted)
    }

    /// Call `per_value` for each value
    pub fn enumerate<I, F>(&mut self, values: I, mut per_value: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for value in values {
            per_value(self, value);
        }
        self
    }

    /// Call `per_value` for each value, following each with a new line
    pub fn enumerate_lines<I, F>(&mut self, values: I, mut per_value: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for value in values {
            per_value(self, value);
            self.new_line();
        }
        self
    }

    /// Call `per_value` for each value, writing `delimiter` between them
    pub fn delimited<I, F>(&mut self, delimiter: &str, values: I, per_value: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        self.delimited_with(delimiter, values, per_value, false)
    }

    /// Like [`delimited`](Self::delimited), with `after_last` also writing
    /// the delimiter after the final value
    pub fn delimited_with<I, F>(
        &mut self,
        delimiter: &str,
        values: I,
        mut per_value: F,
        after_last: bool,
    ) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        let mut values = values.into_iter().peekable();
        while let Some(value) = values.next() {
            per_value(self, value);
            if after_last || values.peek().is_some() {
                self.write(delimiter);
            }
        }
        self
    }

    /// Call `per_value` for each value, with a new line between them
    pub fn delimit_lines<I, F>(&mut self, values: I, mut per_value: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                self.new_line();
            }
            per_value(self, value);
        }
        self
    }

    /// Write each value with `Display`, separated by `delimiter`
    pub fn write_delimited<I>(&mut self, delimiter: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.delimited(delimiter, values, |w, value| {
            w.write_display(&value);
        })
    }
}
