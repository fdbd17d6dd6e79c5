use crate::quote::{QuoteState, Syntax};
use crate::window::{NUL, Window};

/// ASCII whitespace as classified by C's `isspace`, vertical tab included.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Length of the C-string held in `buf`: everything before the first NUL.
pub fn text_len(buf: &[u8]) -> usize {
    buf.iter().position(|&b| b == NUL).unwrap_or(buf.len())
}

/// Walks `buf` once, left to right, and returns the number of arguments.
///
/// Arguments are separated by runs of whitespace, except whitespace inside a
/// quoted span, which stays part of the argument. The text ends at the first
/// NUL in `buf` (or at its end).
///
/// When `slots` is given this is the fill pass: the start offset of each
/// argument is pushed onto it and the whitespace byte ending each argument is
/// overwritten with a NUL terminator. Without `slots` the buffer is left
/// untouched, and both passes always agree on the count.
///
/// An unterminated quote is not an error; the remaining text is consumed as
/// quoted.
///
/// # Example
/// ```
/// use argsplit::parser::tokenize;
/// use argsplit::quote::Syntax;
///
/// let mut buf = b"echo \"hello world\"".to_vec();
/// let mut slots = Vec::new();
/// assert_eq!(tokenize(&mut buf, Some(&mut slots), &Syntax::default()), 2);
/// assert_eq!(slots, vec![0, 5]);
/// assert_eq!(buf[4], 0);
/// ```
pub fn tokenize(buf: &mut [u8], mut slots: Option<&mut Vec<usize>>, syntax: &Syntax) -> usize {
    let len = text_len(buf);
    if len == 0 {
        return 0;
    }
    // Lookahead is blanked at the last character, not one past it.
    let end = len - 1;

    let mut count = 0;
    let mut quote = QuoteState::new();
    let mut pos = 0;

    while pos < len && is_space(buf[pos]) {
        pos += 1;
    }

    while pos < len && buf[pos] != NUL {
        if let Some(slots) = slots.as_deref_mut() {
            slots.push(pos);
        }

        let mut window = Window::sense(buf, pos, end);
        quote.update(&window, syntax);

        while window.current != NUL && (!is_space(window.current) || quote.is_open()) {
            pos += 1;
            window = Window::sense(buf, pos, end);
            quote.update(&window, syntax);
        }

        if slots.is_some() && window.current != NUL {
            buf[pos] = NUL;
            pos += 1;
            window = Window::sense(buf, pos, end);
        }

        while is_space(window.current) {
            pos += 1;
            window = Window::sense(buf, pos, end);
        }

        count += 1;
    }

    if quote.is_open() {
        tracing::trace!(count, "input ended inside a quoted span");
    }
    count
}

/// Counts the arguments in `input` without building them.
pub fn count_tokens(input: &str, syntax: &Syntax) -> usize {
    let mut scratch = input.as_bytes().to_vec();
    tokenize(&mut scratch, None, syntax)
}
