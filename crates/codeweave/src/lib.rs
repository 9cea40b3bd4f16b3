#![warn(missing_docs)]

//! Pooled, indentation-aware source text writer
//!
//! Source generators build files with a [`CodeWriter`]: literal writes,
//! positional templates (`"{0} = {1:x};"`), indented scopes and brace blocks.
//! The writer's buffer is leased from a [`CharPool`] and handed back when the
//! writer is dropped, so generators that produce many small files reuse
//! storage instead of allocating per file.
//!
//! ```
//! use codeweave::{args, CodeWriter, WriterOptions};
//!
//! let mut writer = CodeWriter::with_options(WriterOptions::default().with_new_line("\n"));
//! writer.template("enum {0}", &args!["Color"]).unwrap();
//! writer.bracket_block(|body| {
//!     body.delimit_lines(["Red,", "Green,"], |w, member| {
//!         w.write(member);
//!     });
//! });
//! assert_eq!(writer.to_string(), "enum Color\n{\n    Red,\n    Green,\n}");
//! ```

pub mod buffer;
pub mod error;
pub mod literal;
pub mod naming;
pub mod options;
pub mod source;
pub mod template;
pub mod value;
pub mod writer;

pub use buffer::{CharPool, PoolStats, PooledBuffer};
pub use error::{ConfigError, Result, TemplateError};
pub use literal::{to_code, Literal, ToCode};
pub use naming::Naming;
pub use options::{BraceStyle, PoolConfig, WriterOptions};
pub use source::CodeSource;
pub use template::{Segment, Template};
pub use value::{Arg, BlockFn, Formattable};
pub use writer::{CodeWriter, CommentStyle, IndentGuard};
