use crate::Position;

/// A single character read from the input, paired with the byte offset it sits at and its
/// line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharItem {
    /// The character itself.
    pub character: char,
    /// The byte offset of the character within the input.
    pub byte_index: usize,
    /// The line/column position of the character.
    pub position: Position,
}

/// A character-at-a-time cursor over an input string.
///
/// Tracks 1-based line/column as it advances and supports a single save/restore snapshot, as
/// required by the match finder (see crate documentation: the match finder overwrites one slot
/// repeatedly rather than maintaining a save stack).
#[derive(Debug, Clone)]
pub struct CharIterator<'input> {
    input: &'input str,
    chars: std::str::CharIndices<'input>,
    position: Position,
    saved: Option<(std::str::CharIndices<'input>, Position)>,
}

impl<'input> CharIterator<'input> {
    /// Creates a new iterator positioned at the start of `input`.
    pub fn new(input: &'input str) -> Self {
        CharIterator {
            input,
            chars: input.char_indices(),
            position: Position::start(),
            saved: None,
        }
    }

    /// Returns the character at the current offset without advancing.
    #[inline]
    pub fn peek(&self) -> Option<CharItem> {
        let mut chars = self.chars.clone();
        chars.next().map(|(byte_index, character)| CharItem {
            character,
            byte_index,
            position: self.position,
        })
    }

    /// Returns the character at the current offset, then advances the iterator by one character,
    /// updating line/column.
    #[inline]
    pub fn next(&mut self) -> Option<CharItem> {
        let (byte_index, character) = self.chars.next()?;
        let item = CharItem {
            character,
            byte_index,
            position: self.position,
        };
        self.position = self.position.advance(character);
        Some(item)
    }

    /// The full input this iterator was built over.
    #[inline]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// The byte offset the iterator is currently positioned at (i.e. the offset `next()` would
    /// return next, or `input.len()` at end of input).
    #[inline]
    pub fn offset(&self) -> usize {
        self.chars
            .clone()
            .next()
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Snapshots the current iterator state into the single save slot, overwriting whatever was
    /// saved before.
    #[inline]
    pub fn save_state(&mut self) {
        self.saved = Some((self.chars.clone(), self.position));
    }

    /// Restores the iterator state from the single save slot.
    ///
    /// Does nothing if no state has been saved yet.
    #[inline]
    pub fn restore_state(&mut self) {
        if let Some((chars, position)) = self.saved.clone() {
            self.chars = chars;
            self.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let mut it = CharIterator::new("ab");
        assert_eq!(it.peek().unwrap().character, 'a');
        assert_eq!(it.peek().unwrap().character, 'a');
        assert_eq!(it.next().unwrap().character, 'a');
        assert_eq!(it.peek().unwrap().character, 'b');
    }

    #[test]
    fn tracks_line_and_column() {
        let mut it = CharIterator::new("a\nb");
        let a = it.next().unwrap();
        assert_eq!(a.position, Position::new(1, 1));
        let nl = it.next().unwrap();
        assert_eq!(nl.position, Position::new(1, 2));
        let b = it.next().unwrap();
        assert_eq!(b.position, Position::new(2, 1));
    }

    #[test]
    fn save_restore_round_trip() {
        let mut it = CharIterator::new("abc");
        it.next();
        it.save_state();
        it.next();
        it.next();
        assert_eq!(it.peek(), None);
        it.restore_state();
        assert_eq!(it.peek().unwrap().character, 'b');
    }

    #[test]
    fn save_slot_is_overwritten() {
        let mut it = CharIterator::new("abcd");
        it.save_state();
        it.next();
        it.save_state();
        it.next();
        it.restore_state();
        assert_eq!(it.peek().unwrap().character, 'b');
    }

    #[test]
    fn byte_index_is_monotonic() {
        let mut it = CharIterator::new("a\u{1F600}b");
        let mut last = None;
        while let Some(item) = it.next() {
            if let Some(prev) = last {
                assert!(item.byte_index > prev);
            }
            last = Some(item.byte_index);
        }
    }
}
