/// Module that provides the `Span` type.
mod span;
pub use span::Span;

/// Module that provides the `Position` and `Positions` types.
mod position;
pub use position::{Position, Positions};

/// Module that provides the `Match` type.
mod match_type;
pub use match_type::Match;

/// Module that provides the `Token` type.
mod token;
pub use token::Token;
