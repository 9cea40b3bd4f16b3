//! Single-pass scanner for positional template lines

use super::Segment;
use crate::error::{Result, TemplateError};

/// Indices at or past this value stop accepting further digits
pub const INDEX_LIMIT: usize = 1_000_000;

/// Scanner state for one template line
///
/// Delimiters are all ASCII, so the scan works on byte offsets; columns are
/// converted to character counts only when an error is reported.
pub(crate) struct Parser<'t> {
    text: &'t str,
    line: usize,
    position: usize,
    literal_start: usize,
    segments: Vec<Segment<'t>>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, line: usize) -> Self {
        Self {
            text,
            line,
            position: 0,
            literal_start: 0,
            segments: Vec::new(),
        }
    }

    pub(crate) fn parse(mut self) -> Result<Vec<Segment<'t>>> {
        let bytes = self.text.as_bytes();
        while let Some(offset) = self.text[self.position..].find(['{', '}']) {
            let at = self.position + offset;
            let brace = bytes[at];

            if bytes.get(at + 1) == Some(&brace) {
                // Keep the first brace of the pair as literal text
                self.push_literal(at + 1);
                self.position = at + 2;
                self.literal_start = self.position;
                continue;
            }
            if brace == b'}' {
                return Err(TemplateError::UnmatchedClosingBrace {
                    line: self.line,
                    column: self.column(at),
                });
            }

            self.push_literal(at);
            let hole = self.parse_hole(at)?;
            self.segments.push(hole);
            self.literal_start = self.position;
        }
        self.push_literal(self.text.len());
        Ok(self.segments)
    }

    fn parse_hole(&mut self, open: usize) -> Result<Segment<'t>> {
        let bytes = self.text.as_bytes();
        let mut pos = open + 1;

        let mut index = 0usize;
        while let Some(&digit) = bytes.get(pos).filter(|b| b.is_ascii_digit()) {
            if index >= INDEX_LIMIT {
                return Err(self.invalid_index(pos));
            }
            index = index * 10 + usize::from(digit - b'0');
            pos += 1;
        }
        if pos == open + 1 {
            return match bytes.get(pos) {
                None => Err(self.missing_terminator(open)),
                Some(_) => Err(self.invalid_index(pos)),
            };
        }

        while bytes.get(pos) == Some(&b' ') {
            pos += 1;
        }

        match bytes.get(pos) {
            None => Err(self.missing_terminator(open)),
            Some(b'}') => {
                self.position = pos + 1;
                Ok(Segment::Hole {
                    index,
                    format: None,
                })
            }
            Some(b':') => {
                let spec_start = pos + 1;
                let close = self.text[spec_start..]
                    .find(['{', '}'])
                    .map(|offset| spec_start + offset);
                match close {
                    None => Err(self.missing_terminator(open)),
                    Some(at) if bytes[at] == b'{' => Err(TemplateError::NestedBraceInFormat {
                        line: self.line,
                        column: self.column(at),
                    }),
                    Some(at) => {
                        self.position = at + 1;
                        Ok(Segment::Hole {
                            index,
                            format: Some(&self.text[spec_start..at]),
                        })
                    }
                }
            }
            Some(b',') => Err(TemplateError::UnsupportedAlignment {
                line: self.line,
                column: self.column(pos),
            }),
            Some(_) => Err(self.invalid_index(pos)),
        }
    }

    fn push_literal(&mut self, end: usize) {
        if end > self.literal_start {
            self.segments
                .push(Segment::Literal(&self.text[self.literal_start..end]));
        }
    }

    fn column(&self, byte: usize) -> usize {
        self.text[..byte].chars().count() + 1
    }

    fn invalid_index(&self, byte: usize) -> TemplateError {
        TemplateError::InvalidArgumentIndex {
            line: self.line,
            column: self.column(byte),
        }
    }

    fn missing_terminator(&self, open: usize) -> TemplateError {
        TemplateError::MissingHoleTerminator {
            line: self.line,
            column: self.column(open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Segment<'_>>> {
        Parser::new(text, 1).parse()
    }

    fn hole(index: usize) -> Segment<'static> {
        Segment::Hole {
            index,
            format: None,
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse("let x;").unwrap(), vec![Segment::Literal("let x;")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(
            parse("{{}}").unwrap(),
            vec![Segment::Literal("{"), Segment::Literal("}")]
        );
        assert_eq!(
            parse("a {{ b }} c").unwrap(),
            vec![
                Segment::Literal("a {"),
                Segment::Literal(" b }"),
                Segment::Literal(" c")
            ]
        );
    }

    #[test]
    fn test_holes_between_literals() {
        assert_eq!(
            parse("{0}-{1}").unwrap(),
            vec![hole(0), Segment::Literal("-"), hole(1)]
        );
    }

    #[test]
    fn test_trailing_spaces_after_index() {
        assert_eq!(parse("{12  }").unwrap(), vec![hole(12)]);
    }

    #[test]
    fn test_format_specifier() {
        assert_eq!(
            parse("{0:x4} {1:, }").unwrap(),
            vec![
                Segment::Hole {
                    index: 0,
                    format: Some("x4")
                },
                Segment::Literal(" "),
                Segment::Hole {
                    index: 1,
                    format: Some(", ")
                },
            ]
        );
        assert_eq!(
            parse("{0:}").unwrap(),
            vec![Segment::Hole {
                index: 0,
                format: Some("")
            }]
        );
    }

    #[test]
    fn test_escaped_close_after_hole() {
        assert_eq!(
            parse("{0}}}").unwrap(),
            vec![hole(0), Segment::Literal("}")]
        );
    }

    #[test]
    fn test_unmatched_closing_brace() {
        assert_eq!(
            parse("ab}c"),
            Err(TemplateError::UnmatchedClosingBrace { line: 1, column: 3 })
        );
        assert_eq!(
            parse("{{0}"),
            Err(TemplateError::UnmatchedClosingBrace { line: 1, column: 4 })
        );
    }

    #[test]
    fn test_missing_terminator() {
        assert_eq!(
            parse("x {"),
            Err(TemplateError::MissingHoleTerminator { line: 1, column: 3 })
        );
        assert_eq!(
            parse("{0"),
            Err(TemplateError::MissingHoleTerminator { line: 1, column: 1 })
        );
        assert_eq!(
            parse("{0:x"),
            Err(TemplateError::MissingHoleTerminator { line: 1, column: 1 })
        );
    }

    #[test]
    fn test_alignment_rejected() {
        assert_eq!(
            parse("{0,10}"),
            Err(TemplateError::UnsupportedAlignment { line: 1, column: 3 })
        );
    }

    #[test]
    fn test_nested_brace_in_format() {
        assert_eq!(
            parse("{0:a{b}"),
            Err(TemplateError::NestedBraceInFormat { line: 1, column: 5 })
        );
    }

    #[test]
    fn test_invalid_index() {
        assert_eq!(
            parse("{}"),
            Err(TemplateError::InvalidArgumentIndex { line: 1, column: 2 })
        );
        assert_eq!(
            parse("{x}"),
            Err(TemplateError::InvalidArgumentIndex { line: 1, column: 2 })
        );
        assert_eq!(
            parse("{0 1}"),
            Err(TemplateError::InvalidArgumentIndex { line: 1, column: 4 })
        );
    }

    #[test]
    fn test_index_limit() {
        assert_eq!(parse("{999999}").unwrap(), vec![hole(999_999)]);
        assert_eq!(parse("{1000000}").unwrap(), vec![hole(1_000_000)]);
        assert_eq!(
            parse("{10000000}"),
            Err(TemplateError::InvalidArgumentIndex { line: 1, column: 9 })
        );
    }

    #[test]
    fn test_columns_count_characters() {
        assert_eq!(
            parse("ñü}"),
            Err(TemplateError::UnmatchedClosingBrace { line: 1, column: 3 })
        );
    }
}
