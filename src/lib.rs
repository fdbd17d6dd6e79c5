use std::collections::TryReserveError;
use std::io::{self, Write};

pub mod args;
pub mod escape;
pub mod parser;
pub mod quote;
pub mod window;

pub use args::{ParsedArgs, split};
pub use parser::tokenize;
pub use quote::Syntax;

/// Errors raised while building an argument list.
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    /// The working buffer or the argument slots could not be allocated.
    #[error("failed to allocate {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
    /// A quote or escape character outside ASCII.
    #[error("syntax characters must be ASCII, got byte {byte:#04x}")]
    NonAsciiSyntax { byte: u8 },
}

pub type Result<T, E = ArgsError> = std::result::Result<T, E>;

/// Writes the argument count followed by each argument in brackets, with
/// escape markers in front of quotes removed.
///
/// ```
/// let mut args = argsplit::split("say *\"hi*\"").unwrap();
/// let mut out = Vec::new();
/// argsplit::write_report(&mut args, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "== 2\n[say]\n[\"hi\"]\n");
/// ```
pub fn write_report<W: Write>(args: &mut ParsedArgs, writer: &mut W) -> io::Result<()> {
    args.strip_escapes();
    writeln!(writer, "== {}", args.len())?;
    for arg in args.iter() {
        writeln!(writer, "[{}]", arg)?;
    }
    Ok(())
}
