//! Values accepted by template holes
//!
//! An [`Arg`] is one of the renderable shapes the writer knows how to emit.
//! Rendering dispatches on the variant in this order: text, formattable,
//! nested-writer callback, sequence, then plain `Display` fallback.

use std::{
    borrow::Cow,
    fmt::{self, Display, Write as _},
};

use crate::{error::Result, writer::CodeWriter};

/// Callback that emits into the writer rendering the template
pub type BlockFn<'a> = &'a dyn Fn(&mut CodeWriter) -> Result<()>;

/// A value that renders itself under a format specifier
///
/// An empty specifier means the value's natural representation. Returning
/// `Err` reports the specifier as unsupported.
pub trait Formattable {
    /// Write the value formatted according to `spec`
    fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// A renderable template argument
pub enum Arg<'a> {
    /// Text, re-indented line by line
    Text(Cow<'a, str>),
    /// A value with its own formatting rules
    Formatted(Box<dyn Formattable + 'a>),
    /// A callback that writes at the indent of the current line
    Block(BlockFn<'a>),
    /// Elements rendered one after another, optionally delimited
    Seq(Vec<Arg<'a>>),
    /// Anything else, rendered through `Display`
    Display(&'a dyn Display),
}

impl<'a> Arg<'a> {
    /// Text argument
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Arg::Text(text.into())
    }

    /// Formattable argument
    pub fn formatted(value: impl Formattable + 'a) -> Self {
        Arg::Formatted(Box::new(value))
    }

    /// Nested-writer callback argument
    pub fn block(block: BlockFn<'a>) -> Self {
        Arg::Block(block)
    }

    /// Sequence argument built from anything convertible into arguments
    pub fn seq<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg<'a>>,
    {
        Arg::Seq(values.into_iter().map(Into::into).collect())
    }

    /// Fallback argument rendered with `Display`
    pub fn display(value: &'a dyn Display) -> Self {
        Arg::Display(value)
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Arg::Formatted(_) => f.write_str("Formatted(..)"),
            Arg::Block(_) => f.write_str("Block(..)"),
            Arg::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Arg::Display(value) => f.debug_tuple("Display").field(&value.to_string()).finish(),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(text: &'a str) -> Self {
        Arg::Text(Cow::Borrowed(text))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(text: &'a String) -> Self {
        Arg::Text(Cow::Borrowed(text.as_str()))
    }
}

impl From<String> for Arg<'_> {
    fn from(text: String) -> Self {
        Arg::Text(Cow::Owned(text))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    fn from(text: Cow<'a, str>) -> Self {
        Arg::Text(text)
    }
}

impl<'a, T: Into<Arg<'a>>> From<Vec<T>> for Arg<'a> {
    fn from(values: Vec<T>) -> Self {
        Arg::seq(values)
    }
}

impl<'a, T> From<&'a [T]> for Arg<'a>
where
    &'a T: Into<Arg<'a>>,
{
    fn from(values: &'a [T]) -> Self {
        Arg::seq(values)
    }
}

/// Split an integer specifier into zero-padded width and radix letter
fn integer_spec(spec: &str) -> Option<(usize, Option<char>)> {
    let (width, radix) = match spec.chars().last() {
        Some(c @ ('x' | 'X' | 'b' | 'o')) => (&spec[..spec.len() - 1], Some(c)),
        _ => (spec, None),
    };
    if width.is_empty() {
        return Some((0, radix));
    }
    if !width.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    width.parse().ok().map(|w| (w, radix))
}

macro_rules! impl_formattable_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Formattable for $ty {
                fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
                    let (width, radix) = integer_spec(spec).ok_or(fmt::Error)?;
                    match radix {
                        None => write!(out, "{:0width$}", self, width = width),
                        Some('x') => write!(out, "{:0width$x}", self, width = width),
                        Some('X') => write!(out, "{:0width$X}", self, width = width),
                        Some('b') => write!(out, "{:0width$b}", self, width = width),
                        Some('o') => write!(out, "{:0width$o}", self, width = width),
                        Some(_) => Err(fmt::Error),
                    }
                }
            }

            impl<'a> From<$ty> for Arg<'a> {
                fn from(value: $ty) -> Self {
                    Arg::formatted(value)
                }
            }

            impl<'a> From<&'a $ty> for Arg<'a> {
                fn from(value: &'a $ty) -> Self {
                    Arg::formatted(*value)
                }
            }
        )*
    };
}

impl_formattable_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_formattable_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Formattable for $ty {
                fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
                    let (body, exponent) = match spec.chars().last() {
                        Some(c @ ('e' | 'E')) => (&spec[..spec.len() - 1], Some(c)),
                        _ => (spec, None),
                    };
                    let precision = match body.strip_prefix('.') {
                        Some(digits) if !digits.is_empty()
                            && digits.bytes().all(|b| b.is_ascii_digit()) =>
                        {
                            Some(digits.parse::<usize>().map_err(|_| fmt::Error)?)
                        }
                        None if body.is_empty() => None,
                        _ => return Err(fmt::Error),
                    };
                    match (precision, exponent) {
                        (None, None) => write!(out, "{}", self),
                        (Some(p), None) => write!(out, "{:.*}", p, self),
                        (None, Some('e')) => write!(out, "{:e}", self),
                        (Some(p), Some('e')) => write!(out, "{:.*e}", p, self),
                        (None, Some(_)) => write!(out, "{:E}", self),
                        (Some(p), Some(_)) => write!(out, "{:.*E}", p, self),
                    }
                }
            }

            impl<'a> From<$ty> for Arg<'a> {
                fn from(value: $ty) -> Self {
                    Arg::formatted(value)
                }
            }

            impl<'a> From<&'a $ty> for Arg<'a> {
                fn from(value: &'a $ty) -> Self {
                    Arg::formatted(*value)
                }
            }
        )*
    };
}

impl_formattable_float!(f32, f64);

impl Formattable for bool {
    fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        if !spec.is_empty() {
            return Err(fmt::Error);
        }
        out.write_str(if *self { "true" } else { "false" })
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::formatted(value)
    }
}

impl Formattable for char {
    fn format_to(&self, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
        if !spec.is_empty() {
            return Err(fmt::Error);
        }
        out.write_char(*self)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::formatted(value)
    }
}

/// Build an argument array for [`CodeWriter::template`](crate::CodeWriter::template)
///
/// Each expression goes through `Arg::from`.
///
/// ```
/// use codeweave::{args, CodeWriter};
///
/// let mut writer = CodeWriter::new();
/// writer.template("{0} = {1:x};", &args!["mask", 255]).unwrap();
/// assert_eq!(writer.to_string(), "mask = ff;");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        [] as [$crate::Arg<'static>; 0]
    };
    ($($value:expr),+ $(,)?) => {
        [$($crate::Arg::from($value)),+]
    };
}
