//! Rendering of individual arguments

use crate::{
    error::{Result, TemplateError},
    value::Arg,
    writer::CodeWriter,
};

impl CodeWriter {
    /// Write one argument under an optional format specifier
    ///
    /// - text goes through [`code_block`](Self::code_block), so its lines
    ///   follow the current indent
    /// - formattable values receive the specifier (empty when absent)
    /// - callbacks run with the indent set to the current line's indent
    /// - sequences use a non-empty specifier as the delimiter between elements
    /// - anything else is written with `Display`
    pub fn write_arg(&mut self, arg: &Arg<'_>, format: Option<&str>) -> Result<&mut Self> {
        match arg {
            Arg::Text(text) => {
                self.code_block(text);
            }
            Arg::Formatted(value) => {
                let spec = format.unwrap_or("");
                let mark = self.len();
                if value.format_to(spec, &mut *self).is_err() {
                    self.truncate(mark);
                    return Err(TemplateError::Format {
                        spec: spec.to_string(),
                    });
                }
            }
            Arg::Block(block) => {
                self.at_line_indent(*block)?;
            }
            Arg::Seq(items) => {
                let delimiter = format.filter(|spec| !spec.is_empty());
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        if let Some(delimiter) = delimiter {
                            self.write(delimiter);
                        }
                    }
                    self.write_arg(item, None)?;
                }
            }
            Arg::Display(value) => {
                self.write_display(*value);
            }
        }
        Ok(self)
    }
}
