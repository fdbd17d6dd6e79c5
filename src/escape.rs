//! Post-processing passes applied to a finished argument.
//!
//! Both passes rewrite the argument in place and return its new length; the
//! bytes past that length are left as they were.

use crate::quote::Syntax;
use crate::window::Window;

/// Removes the strip escape wherever it directly precedes a quote.
///
/// With the default syntax `*"` becomes `"`, while `\"` is kept as is even
/// though it also suppresses quote toggling during tokenization.
///
/// ```
/// use argsplit::escape::strip_escapes;
/// use argsplit::quote::Syntax;
///
/// let mut token = b"*\"hi*\"".to_vec();
/// let len = strip_escapes(&mut token, &Syntax::default());
/// assert_eq!(&token[..len], b"\"hi\"");
/// ```
pub fn strip_escapes(token: &mut [u8], syntax: &Syntax) -> usize {
    let end = token.len();
    let mut kept = 0;

    for pos in 0..end {
        let window = Window::sense(token, pos, end);
        if window.current == syntax.strip_escape() && window.ahead == syntax.quote() {
            continue;
        }
        token[kept] = window.current;
        kept += 1;
    }
    kept
}

/// [`strip_escapes`] over an owned string, reusing its allocation.
pub fn strip_escapes_in(token: &mut String, syntax: &Syntax) {
    let mut bytes = std::mem::take(token).into_bytes();
    let len = strip_escapes(&mut bytes, syntax);
    bytes.truncate(len);
    // Syntax characters are ASCII, so the text stays valid UTF-8.
    *token = String::from_utf8(bytes).unwrap_or_default();
}

/// Removes the quote characters that open or close a quoted span.
///
/// A quote is kept when the byte right before it is one of the toggle
/// escapes. `offset` is where the argument starts in its line: like the
/// tokenizer, the first byte of the line never escapes the quote after it.
/// Run this before [`strip_escapes`], which would otherwise remove the
/// escapes it relies on.
///
/// ```
/// use argsplit::escape::unquote;
/// use argsplit::quote::Syntax;
///
/// let mut token = b"\"b c\"".to_vec();
/// let len = unquote(&mut token, 2, &Syntax::default());
/// assert_eq!(&token[..len], b"b c");
/// ```
pub fn unquote(token: &mut [u8], offset: usize, syntax: &Syntax) -> usize {
    let mut kept = 0;
    let mut behind = None;

    for pos in 0..token.len() {
        let current = token[pos];
        let escaped = offset + pos > 1 && behind.is_some_and(|b| syntax.is_escape(b));
        behind = Some(current);
        if current == syntax.quote() && !escaped {
            continue;
        }
        token[kept] = current;
        kept += 1;
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stripped(input: &str) -> String {
        let mut token = input.to_string();
        strip_escapes_in(&mut token, &Syntax::default());
        token
    }

    fn unquoted(input: &str) -> String {
        let mut bytes = input.as_bytes().to_vec();
        let len = unquote(&mut bytes, 2, &Syntax::default());
        bytes.truncate(len);
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_strip_star_before_quote() {
        assert_eq!(stripped("*\"hi*\""), "\"hi\"");
        assert_eq!(stripped("a*\"b"), "a\"b");
    }

    #[test]
    fn test_backslash_escape_is_kept() {
        assert_eq!(stripped("\\\"hi\\\""), "\\\"hi\\\"");
    }

    #[test]
    fn test_star_not_before_quote_is_kept() {
        assert_eq!(stripped("a*b"), "a*b");
        assert_eq!(stripped("end*"), "end*");
        assert_eq!(stripped("**\""), "*\"");
    }

    #[test]
    fn test_strip_is_idempotent_without_pattern() {
        for input in ["plain", "\"q\"", "x*y", "", "\\\""] {
            let once = stripped(input);
            assert_eq!(once, input);
            assert_eq!(stripped(&once), once);
        }
    }

    #[test]
    fn test_strip_keeps_multibyte_text() {
        assert_eq!(stripped("héllo*\"wörld"), "héllo\"wörld");
    }

    #[test]
    fn test_strip_reports_length_without_reallocating() {
        let mut token = *b"*\"x";
        let len = strip_escapes(&mut token, &Syntax::default());
        assert_eq!(len, 2);
        assert_eq!(&token[..len], b"\"x");
    }

    #[test]
    fn test_unquote_removes_span_delimiters() {
        assert_eq!(unquoted("\"b c\""), "b c");
        assert_eq!(unquoted("x\"y z\"w"), "xy zw");
        assert_eq!(unquoted("\"\""), "");
    }

    #[test]
    fn test_unquote_keeps_escaped_quotes() {
        assert_eq!(unquoted("*\"hi*\""), "*\"hi*\"");
        assert_eq!(unquoted("\\\"hi\\\""), "\\\"hi\\\"");
    }

    #[test]
    fn test_unquote_then_strip() {
        let mut bytes = b"\"say *\"hi*\"\"".to_vec();
        let syntax = Syntax::default();
        let len = unquote(&mut bytes, 0, &syntax);
        let len = strip_escapes(&mut bytes[..len], &syntax);
        assert_eq!(&bytes[..len], b"say \"hi\"");
    }

    #[test]
    fn test_unquote_first_byte_of_line_does_not_escape() {
        let syntax = Syntax::default();

        let mut bytes = b"*\"x y\"".to_vec();
        let len = unquote(&mut bytes, 0, &syntax);
        assert_eq!(&bytes[..len], b"*x y");

        let mut bytes = b"*\"x".to_vec();
        let len = unquote(&mut bytes, 1, &syntax);
        assert_eq!(&bytes[..len], b"*\"x");
    }
}
