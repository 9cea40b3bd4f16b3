//! Positional templates
//!
//! A template is literal text with `{index}` or `{index:format}` holes that
//! refer to a slice of [`Arg`]s. `{{` and `}}` stand for literal braces.
//! Templates are processed one line at a time and the writer's
//! [`new_line`](CodeWriter::new_line) is called between lines, so every line
//! after the first picks up the current indent. A single leading line break
//! is ignored.
//!
//! Alignment (`{0,10}`) is rejected, as is any malformed hole. Parsing
//! completes before anything is written.

mod parser;
mod render;

pub use parser::INDEX_LIMIT;

use tracing::debug;

use crate::{
    error::{Result, TemplateError},
    value::Arg,
    writer::{split_lines, strip_leading_line_break, CodeWriter},
};
use parser::Parser;

/// One piece of a parsed template line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text written as is
    Literal(&'t str),
    /// A reference to an argument
    Hole {
        /// Position in the argument slice
        index: usize,
        /// Text after `:`; `Some("")` for an empty specifier
        format: Option<&'t str>,
    },
}

/// A parsed template, reusable across renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    lines: Vec<Vec<Segment<'t>>>,
}

impl<'t> Template<'t> {
    /// Parse `text`, reporting the first syntax error
    pub fn parse(text: &'t str) -> Result<Self> {
        let body = strip_leading_line_break(text);
        let first_line = if body.len() == text.len() { 1 } else { 2 };

        let lines = split_lines(body)
            .enumerate()
            .map(|(i, line)| Parser::new(line, first_line + i).parse())
            .collect::<Result<Vec<_>>>()
            .map_err(|error| {
                debug!(%error, "Rejected template");
                error
            })?;

        Ok(Self { lines })
    }

    /// Parsed lines, in order
    pub fn lines(&self) -> &[Vec<Segment<'t>>] {
        &self.lines
    }

    /// Smallest argument count that satisfies every hole
    pub fn required_args(&self) -> usize {
        self.holes().map(|index| index + 1).max().unwrap_or(0)
    }

    fn holes(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().flatten().filter_map(|segment| match segment {
            Segment::Hole { index, .. } => Some(*index),
            Segment::Literal(_) => None,
        })
    }

    /// Write the template into `writer`
    ///
    /// Indices are checked against `args` before any text is written. If an
    /// argument fails while rendering, the writer is rewound to where it was
    /// before the call.
    pub fn render(&self, writer: &mut CodeWriter, args: &[Arg<'_>]) -> Result<()> {
        if let Some(index) = self.holes().find(|&index| index >= args.len()) {
            debug!(index, count = args.len(), "Template argument out of range");
            return Err(TemplateError::ArgumentIndexOutOfRange {
                index,
                count: args.len(),
            });
        }

        let checkpoint = writer.checkpoint();
        let result = self.render_lines(writer, args);
        if let Err(error) = &result {
            debug!(%error, "Template rendering failed, discarding partial output");
            writer.rewind(checkpoint);
        }
        result
    }

    fn render_lines(&self, writer: &mut CodeWriter, args: &[Arg<'_>]) -> Result<()> {
        let last = self.lines.len().saturating_sub(1);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                if line.is_empty() && i < last {
                    writer.line_break();
                } else {
                    writer.new_line();
                }
            }
            for segment in line {
                match *segment {
                    Segment::Literal(text) => {
                        writer.write(text);
                    }
                    Segment::Hole { index, format } => {
                        writer.write_arg(&args[index], format)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl CodeWriter {
    /// Parse and write a template
    ///
    /// On error nothing from this template is left in the writer.
    pub fn template(&mut self, template: &str, args: &[Arg<'_>]) -> Result<&mut Self> {
        Template::parse(template)?.render(self, args)?;
        Ok(self)
    }

    /// Write a template, then a new line
    pub fn template_line(&mut self, template: &str, args: &[Arg<'_>]) -> Result<&mut Self> {
        Ok(self.template(template, args)?.new_line())
    }

    /// Write an already parsed template
    pub fn write_template(&mut self, template: &Template<'_>, args: &[Arg<'_>]) -> Result<&mut Self> {
        template.render(self, args)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args, writer::tests::writer};

    #[test]
    fn test_escapes_with_no_args() {
        let mut w = writer();
        w.template("{{}}", &args![]).unwrap();
        assert_eq!(w.as_str(), "{}");
    }

    #[test]
    fn test_positional_holes() {
        let mut w = writer();
        w.template("{0}-{1}", &args!["a", "b"]).unwrap();
        assert_eq!(w.as_str(), "a-b");
    }

    #[test]
    fn test_reordered_and_repeated_holes() {
        let mut w = writer();
        w.template("{1}{0}{1}", &args!["x", "y"]).unwrap();
        assert_eq!(w.as_str(), "yxy");
    }

    #[test]
    fn test_out_of_range_writes_nothing() {
        let mut w = writer();
        w.write("before;");
        let err = w.template("{0}-{1}", &args!["a"]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::ArgumentIndexOutOfRange { index: 1, count: 1 }
        );
        assert_eq!(w.as_str(), "before;");
    }

    #[test]
    fn test_syntax_error_writes_nothing() {
        let mut w = writer();
        let err = w.template("ok {0}\nbad }", &args!["x"]).unwrap_err();
        assert_eq!(err, TemplateError::UnmatchedClosingBrace { line: 2, column: 5 });
        assert!(w.is_empty());
    }

    #[test]
    fn test_format_error_rewinds() {
        let mut w = writer();
        w.write("keep ");
        let err = w.template("a {0} b {1:q}", &args!["x", 5]).unwrap_err();
        assert_eq!(err, TemplateError::Format { spec: "q".into() });
        assert_eq!(w.as_str(), "keep ");
    }

    #[test]
    fn test_multi_line_template_reindents() {
        let mut w = writer();
        w.indent(|i| {
            i.template("\nif ({0})\n{{\n  {1};\n}}", &args!["ready", "go()"])
                .unwrap();
        });
        assert_eq!(w.as_str(), "  if (ready)\n  {\n    go();\n  }");
    }

    #[test]
    fn test_block_trimming_before_failure_is_undone() {
        let body = |w: &mut CodeWriter| -> Result<()> {
            w.try_bracket_block(|b| {
                b.template("{5}", &[])?;
                Ok(())
            })?;
            Ok(())
        };
        let mut w = writer();
        w.write("class A        ");
        let err = w.template("{0}", &[Arg::block(&body)]).unwrap_err();
        assert_eq!(err, TemplateError::ArgumentIndexOutOfRange { index: 5, count: 0 });
        assert_eq!(w.as_str(), "class A        ");
    }

    #[test]
    fn test_rewritten_whitespace_is_restored_on_failure() {
        let body = |w: &mut CodeWriter| -> Result<()> {
            w.trim_trailing_whitespace().write("XYZ");
            Err(TemplateError::Format { spec: "q".into() })
        };
        let mut w = writer();
        w.write("a ");
        assert!(w.template("{0}", &[Arg::block(&body)]).is_err());
        assert_eq!(w.as_str(), "a ");
    }

    #[test]
    fn test_blank_template_lines_carry_no_indent() {
        let mut w = writer();
        w.indent(|i| {
            i.template("a\n\nb {0}", &args![1]).unwrap();
        });
        assert_eq!(w.as_str(), "  a\n\n  b 1");
    }

    #[test]
    fn test_trailing_blank_template_line_keeps_indent() {
        let mut w = writer();
        w.indent(|i| {
            i.template("a\n", &args![]).unwrap().write("b");
        });
        assert_eq!(w.as_str(), "  a\n  b");
    }

    #[test]
    fn test_line_numbers_count_stripped_break() {
        let err = Template::parse("\nfine\n{").unwrap_err();
        assert_eq!(err, TemplateError::MissingHoleTerminator { line: 3, column: 1 });
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let mut w = writer();
        w.template("a\n\nb", &args![]).unwrap();
        assert_eq!(w.as_str(), "a\n\nb");
    }

    #[test]
    fn test_template_line() {
        let mut w = writer();
        w.template_line("x = {0};", &args![1]).unwrap().write("y");
        assert_eq!(w.as_str(), "x = 1;\ny");
    }

    #[test]
    fn test_required_args() {
        assert_eq!(Template::parse("none").unwrap().required_args(), 0);
        assert_eq!(Template::parse("{2} {0}\n{5:x}").unwrap().required_args(), 6);
    }

    #[test]
    fn test_parsed_template_renders_repeatedly() {
        let template = Template::parse("case {0}: return \"{1}\";").unwrap();
        let mut w = writer();
        for (value, name) in [(1, "One"), (2, "Two")] {
            w.write_template(&template, &args![value, name]).unwrap().new_line();
        }
        assert_eq!(
            w.as_str(),
            "case 1: return \"One\";\ncase 2: return \"Two\";\n"
        );
    }
}
