use crate::window::Window;
use crate::{ArgsError, Result};

/// The quote character that groups whitespace into a single argument.
pub const QUOTE: u8 = b'"';
/// Escape marker that suppresses a quote toggle and is removed when stripping.
pub const STAR_ESCAPE: u8 = b'*';
/// Escape marker that suppresses a quote toggle but is kept when stripping.
pub const BACKSLASH_ESCAPE: u8 = b'\\';

/// Characters that drive quoting and escaping.
///
/// The default recognises both `*` and `\` as escapes for the purpose of
/// quote toggling, while only `*` is removed by the escape stripper. All
/// characters are ASCII, so removing one never splits a UTF-8 sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// Opens and closes a quoted span.
    quote: u8,
    /// Any of these directly before a quote keeps it from toggling.
    toggle_escapes: &'static [u8],
    /// Removed by the escape stripper when it directly precedes a quote.
    strip_escape: u8,
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax {
            quote: QUOTE,
            toggle_escapes: &[STAR_ESCAPE, BACKSLASH_ESCAPE],
            strip_escape: STAR_ESCAPE,
        }
    }
}

impl Syntax {
    /// Builds a syntax from ASCII characters; any other byte is rejected.
    pub fn new(quote: u8, toggle_escapes: &'static [u8], strip_escape: u8) -> Result<Self> {
        let bytes = [quote, strip_escape];
        if let Some(&byte) = bytes.iter().chain(toggle_escapes).find(|b| !b.is_ascii()) {
            return Err(ArgsError::NonAsciiSyntax { byte });
        }
        Ok(Syntax {
            quote,
            toggle_escapes,
            strip_escape,
        })
    }

    pub fn quote(&self) -> u8 {
        self.quote
    }

    pub fn toggle_escapes(&self) -> &'static [u8] {
        self.toggle_escapes
    }

    pub fn strip_escape(&self) -> u8 {
        self.strip_escape
    }

    /// True when `byte` keeps a following quote from toggling.
    pub fn is_escape(&self, byte: u8) -> bool {
        self.toggle_escapes.contains(&byte)
    }

    /// True when the window sits on a quote that is not escaped.
    pub fn toggles(&self, window: &Window) -> bool {
        window.current == self.quote && !self.is_escape(window.behind)
    }
}

/// Whether the scanner is inside a quoted span.
///
/// A fresh state is used for every pass over a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteState {
    open: bool,
}

impl QuoteState {
    /// A closed state, as at the start of a pass.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the state if the window is on an unescaped quote.
    pub fn update(&mut self, window: &Window, syntax: &Syntax) {
        if syntax.toggles(window) {
            self.open = !self.open;
        }
    }
}
