/// Byte read in place of anything outside the buffer.
pub const NUL: u8 = 0;

/// Five bytes of context around a cursor: two behind, the current byte and
/// two ahead.
///
/// Every decision the tokenizer and the escape stripper make is based on a
/// freshly sensed window; it carries nothing between positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    pub far_behind: u8,
    pub behind: u8,
    pub current: u8,
    pub ahead: u8,
    pub far_ahead: u8,
}

impl Window {
    /// Senses the window at `pos` in `buf`.
    ///
    /// The slots behind are only filled while they stay strictly past the
    /// first byte of the buffer, so index 0 is never seen as `behind`. The
    /// slots ahead are blanked when they land exactly on `end`. Any read past
    /// the buffer yields [`NUL`].
    ///
    /// ```
    /// use argsplit::window::{Window, NUL};
    ///
    /// let w = Window::sense(b"abcde", 3, 4);
    /// assert_eq!(w.behind, b'c');
    /// assert_eq!(w.current, b'd');
    /// assert_eq!(w.ahead, NUL);
    /// ```
    pub fn sense(buf: &[u8], pos: usize, end: usize) -> Self {
        let at = |i: usize| buf.get(i).copied().unwrap_or(NUL);

        Window {
            far_behind: if pos > 2 { at(pos - 2) } else { NUL },
            behind: if pos > 1 { at(pos - 1) } else { NUL },
            current: at(pos),
            ahead: if pos + 1 != end { at(pos + 1) } else { NUL },
            far_ahead: if pos + 2 != end { at(pos + 2) } else { NUL },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense_middle_of_buffer() {
        let w = Window::sense(b"abcdef", 3, 5);
        assert_eq!(
            w,
            Window {
                far_behind: b'b',
                behind: b'c',
                current: b'd',
                ahead: b'e',
                far_ahead: NUL,
            }
        );
    }

    #[test]
    fn test_first_byte_is_never_behind() {
        let w = Window::sense(b"*\"x", 1, 2);
        assert_eq!(w.behind, NUL);
        assert_eq!(w.current, b'"');

        let w = Window::sense(b"ab", 0, 1);
        assert_eq!(w.far_behind, NUL);
        assert_eq!(w.behind, NUL);
    }

    #[test]
    fn test_far_behind_needs_two_bytes_of_room() {
        assert_eq!(Window::sense(b"abcde", 2, 4).far_behind, NUL);
        assert_eq!(Window::sense(b"abcde", 3, 4).far_behind, b'b');
    }

    #[test]
    fn test_ahead_blanked_only_at_end_marker() {
        let w = Window::sense(b"abcde", 2, 4);
        assert_eq!(w.ahead, b'd');
        assert_eq!(w.far_ahead, NUL);

        // Past the end marker the buffer is read again, bounded by its length.
        let w = Window::sense(b"abcde", 4, 4);
        assert_eq!(w.ahead, NUL);
        assert_eq!(w.far_ahead, NUL);
    }

    #[test]
    fn test_current_past_buffer_reads_nul() {
        let w = Window::sense(b"abc", 3, 2);
        assert_eq!(w.current, NUL);
        assert_eq!(w.behind, b'c');
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(Window::sense(b"", 0, 0), Window::default());
    }
}
