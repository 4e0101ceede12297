use crate::Match;

/// A token, as yielded by the scanner façade after trivia filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The substring of the input covered by the token's span.
    text: String,
    /// The token type.
    token_type: usize,
    /// The underlying match this token was built from.
    matched: Match,
}

impl Token {
    /// Creates a new token from an input string and a match.
    #[inline]
    pub fn new(input: &str, matched: Match) -> Self {
        let text = input[matched.span().range()].to_string();
        Token {
            text,
            token_type: matched.token_type(),
            matched,
        }
    }

    /// The text covered by the token.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token's type.
    #[inline]
    pub fn token_type(&self) -> usize {
        self.token_type
    }

    /// The underlying match.
    #[inline]
    pub fn matched(&self) -> Match {
        self.matched
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' (type {})", self.text, self.token_type)
    }
}
