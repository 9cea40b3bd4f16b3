//! C# literal rendering for primitive values
//!
//! [`ToCode`] writes a value the way it would appear in generated source:
//! strings and characters quoted and escaped, narrow integers cast, wide and
//! unsigned integers and floating-point numbers suffixed. `None` becomes
//! `null`.
//!
//! ```
//! use codeweave::{args, CodeWriter, Literal};
//!
//! let mut writer = CodeWriter::new();
//! writer
//!     .template("Set({0}, {1});", &args![Literal("a\tb"), Literal(3u64)])
//!     .unwrap();
//! assert_eq!(writer.to_string(), "Set(\"a\\tb\", 3UL);");
//! ```

use std::fmt::{self, Write as _};

use crate::{
    value::{Arg, Formattable},
    writer::CodeWriter,
};

/// A value with a source-literal form
pub trait ToCode {
    /// Write the literal form of the value
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// Literal form of `value` as a string
pub fn to_code<T: ToCode + ?Sized>(value: &T) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = value.write_code(&mut out);
    out
}

macro_rules! impl_to_code_int {
    ($($ty:ty => $prefix:literal, $suffix:literal;)*) => {
        $(
            impl ToCode for $ty {
                fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    write!(out, concat!($prefix, "{}", $suffix), self)
                }
            }
        )*
    };
}

impl_to_code_int! {
    i8 => "(sbyte)", "";
    u8 => "(byte)", "";
    i16 => "(short)", "";
    u16 => "(ushort)", "";
    i32 => "", "";
    u32 => "", "U";
    i64 => "", "L";
    u64 => "", "UL";
}

macro_rules! impl_to_code_float {
    ($($ty:ty => $keyword:literal, $suffix:literal;)*) => {
        $(
            impl ToCode for $ty {
                fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    if self.is_nan() {
                        write!(out, "{}.NaN", $keyword)
                    } else if self.is_infinite() {
                        let sign = if self.is_sign_positive() { "Positive" } else { "Negative" };
                        write!(out, "{}.{}Infinity", $keyword, sign)
                    } else {
                        write!(out, "{}{}", self, $suffix)
                    }
                }
            }
        )*
    };
}

impl_to_code_float! {
    f32 => "float", "f";
    f64 => "double", "d";
}

impl ToCode for bool {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(if *self { "true" } else { "false" })
    }
}

fn write_escaped(ch: char, quote: char, out: &mut dyn fmt::Write) -> fmt::Result {
    match ch {
        '\\' => out.write_str("\\\\"),
        '\n' => out.write_str("\\n"),
        '\r' => out.write_str("\\r"),
        '\t' => out.write_str("\\t"),
        '\0' => out.write_str("\\0"),
        c if c == quote => {
            out.write_char('\\')?;
            out.write_char(c)
        }
        c if c.is_control() => write!(out, "\\u{:04X}", c as u32),
        c => out.write_char(c),
    }
}

impl ToCode for char {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char('\'')?;
        write_escaped(*self, '\'', out)?;
        out.write_char('\'')
    }
}

impl ToCode for str {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char('"')?;
        for ch in self.chars() {
            write_escaped(ch, '"', out)?;
        }
        out.write_char('"')
    }
}

impl ToCode for String {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.as_str().write_code(out)
    }
}

impl<T: ToCode> ToCode for Option<T> {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Some(value) => value.write_code(out),
            None => out.write_str("null"),
        }
    }
}

impl<T: ToCode + ?Sized> ToCode for &T {
    fn write_code(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (**self).write_code(out)
    }
}

/// Template argument that renders its value as a source literal
///
/// Only the empty format specifier is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal<T>(pub T);

impl<T: ToCode> Formattable for Literal<T> {
    fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        if !spec.is_empty() {
            return Err(fmt::Error);
        }
        self.0.write_code(out)
    }
}

impl<'a, T: ToCode + 'a> From<Literal<T>> for Arg<'a> {
    fn from(literal: Literal<T>) -> Self {
        Arg::formatted(literal)
    }
}

impl CodeWriter {
    /// Write the source-literal form of `value`
    pub fn write_literal<T: ToCode + ?Sized>(&mut self, value: &T) -> &mut Self {
        if value.write_code(self).is_err() {
            tracing::warn!("Literal rendering reported an error; output may be partial");
        }
        self
    }
}
