use crate::escape;
use crate::parser::{text_len, tokenize};
use crate::quote::Syntax;
use crate::window::NUL;
use crate::{ArgsError, Result};

/// A parsed argument line.
///
/// Owns the working copy of the input together with the start offset of
/// every argument in it. The arguments are NUL-terminated runs inside that
/// buffer and borrow from this value, so both are released together when it
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    buffer: Vec<u8>,
    slots: Vec<usize>,
    syntax: Syntax,
}

/// Splits `input` into arguments using the default [`Syntax`].
///
/// # Example
/// ```
/// let args = argsplit::split("echo \"hello world\"").unwrap();
/// assert_eq!(args.to_vec(), vec!["echo", "\"hello world\""]);
/// ```
pub fn split(input: &str) -> Result<ParsedArgs> {
    ParsedArgs::parse(Some(input))
}

impl ParsedArgs {
    /// Parses `input`; an absent, empty or blank line gives no arguments.
    pub fn parse(input: Option<&str>) -> Result<Self> {
        Self::parse_with(input, Syntax::default())
    }

    /// Parses `input` with a custom quote and escape [`Syntax`].
    pub fn parse_with(input: Option<&str>, syntax: Syntax) -> Result<Self> {
        let empty = ParsedArgs {
            syntax,
            ..Default::default()
        };
        let Some(input) = input else {
            return Ok(empty);
        };

        let text = &input.as_bytes()[..text_len(input.as_bytes())];
        if text.is_empty() {
            return Ok(empty);
        }

        // Room for the terminator after the last argument.
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(text.len() + 1)
            .map_err(|source| ArgsError::Allocation {
                what: "working buffer",
                source,
            })?;
        buffer.extend_from_slice(text);
        buffer.push(NUL);

        let count = tokenize(&mut buffer, None, &syntax);
        tracing::trace!(count, "counted arguments");
        if count == 0 {
            return Ok(empty);
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(count)
            .map_err(|source| ArgsError::Allocation {
                what: "argument slots",
                source,
            })?;
        let filled = tokenize(&mut buffer, Some(&mut slots), &syntax);
        debug_assert_eq!(filled, count);
        tracing::debug!(count = filled, "built argument list");

        Ok(ParsedArgs {
            buffer,
            slots,
            syntax,
        })
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the line held no arguments.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The syntax the line was parsed with.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Returns the argument at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        let range = self.range(index)?;
        // Syntax characters are ASCII, so in-place passes never split a
        // UTF-8 sequence.
        Some(std::str::from_utf8(&self.buffer[range]).unwrap_or_default())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            args: self,
            index: 0,
        }
    }

    /// Copies the arguments out into owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Removes escape markers in front of quotes from the argument at
    /// `index`, in place. Out of range indices are ignored.
    pub fn strip_escapes_at(&mut self, index: usize) {
        let syntax = self.syntax;
        self.rewrite(index, |token, _| escape::strip_escapes(token, &syntax));
    }

    /// [`strip_escapes_at`](Self::strip_escapes_at) for every argument.
    pub fn strip_escapes(&mut self) {
        for index in 0..self.len() {
            self.strip_escapes_at(index);
        }
    }

    /// Removes the unescaped quote characters from every argument, in place.
    pub fn unquote(&mut self) {
        let syntax = self.syntax;
        for index in 0..self.len() {
            self.rewrite(index, |token, start| escape::unquote(token, start, &syntax));
        }
    }

    fn range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.slots.get(index)?;
        Some(start..start + text_len(&self.buffer[start..]))
    }

    /// Runs `pass` over one argument and terminates it at the new length.
    fn rewrite(&mut self, index: usize, pass: impl FnOnce(&mut [u8], usize) -> usize) {
        let Some(range) = self.range(index) else {
            return;
        };
        let start = range.start;
        let len = pass(&mut self.buffer[range.clone()], start);
        if start + len < range.end {
            self.buffer[start + len] = NUL;
        }
    }
}

/// Iterator over the arguments of a [`ParsedArgs`].
pub struct Iter<'a> {
    args: &'a ParsedArgs,
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.args.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.args.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ParsedArgs {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
