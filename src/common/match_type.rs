use crate::{Positions, Span};

/// A match produced by the scanner's match finder.
///
/// This is the output unit of the scanner before it is wrapped into a [`Token`](crate::Token) by
/// the scanner façade.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub struct Match {
    /// The byte span covered by the match.
    span: Span,
    /// The token type assigned to the match by the winning `AcceptData` entry.
    token_type: usize,
    /// Start/end line-column positions of the match.
    positions: Positions,
}

impl Match {
    /// Creates a new match.
    #[inline]
    pub fn new(span: Span, token_type: usize, positions: Positions) -> Self {
        Match {
            span,
            token_type,
            positions,
        }
    }

    /// The byte span of the match.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The token type of the match.
    #[inline]
    pub fn token_type(&self) -> usize {
        self.token_type
    }

    /// The start/end positions of the match.
    #[inline]
    pub fn positions(&self) -> Positions {
        self.positions
    }

    /// Whether the match is empty. The scanner never emits an empty match (see
    /// [`MatchFinder`](crate::MatchFinder)), but the check is kept cheap and available for
    /// callers that assemble matches by hand, e.g. in tests.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
