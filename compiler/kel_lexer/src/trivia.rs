use bitflags::bitflags;

bitflags! {
    /// Trivia kinds to keep when advancing the token cursor.
    ///
    /// The empty set (the default) skips all trivia.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Trivia: u8 {
        const WHITESPACE = 1 << 0;
        const NEWLINE = 1 << 1;
        const COMMENT = 1 << 2;
    }
}

impl Trivia {
    /// Whether a token of `kind` is skipped under this mask.
    #[inline]
    pub(crate) fn skips(self, kind: &crate::TokenKind) -> bool {
        use crate::TokenKind;
        match kind {
            TokenKind::Whitespace => !self.contains(Trivia::WHITESPACE),
            TokenKind::Newline => !self.contains(Trivia::NEWLINE),
            TokenKind::Comment => !self.contains(Trivia::COMMENT),
            _ => false,
        }
    }
}
