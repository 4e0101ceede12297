/// Module with the character-at-a-time input cursor.
mod char_iter;
pub use char_iter::{CharItem, CharIterator};

/// Module with the DFA table types.
mod dfa;
pub use dfa::{AcceptData, Dfa, DfaState, Lookahead};

/// Module with scanner modes and the mode-stack context.
mod scanner_mode;
pub use scanner_mode::{ModeAction, ScannerContext, ScannerMode};

/// Module with the maximal-munch match finder.
mod match_finder;
pub use match_finder::{ClassifyFn, MatchFinder};

/// Module with the scanner facade.
mod scanner;
pub use scanner::{Scanner, Tokens, DEFAULT_TRIVIA};

/// Module with the k-lookahead token stream buffer.
mod token_stream;
pub use token_stream::TokenStream;
