use log::trace;

use crate::{CharIterator, MatchFinder, ScannerContext, ScannerMode, Token};

use super::match_finder::ClassifyFn;

/// Token types the facade drops before a token ever reaches a caller: whitespace, comments and
/// the like. Hard-wired contract with the generator (see [`Scanner::with_trivia`] to override).
pub const DEFAULT_TRIVIA: &[usize] = &[1, 2, 3, 4];

/// The scanner facade: drives the match finder across a whole input, filters trivia token types,
/// and wraps surviving matches into [`Token`]s.
///
/// Holds no per-input state of its own; all of that lives in the [`Tokens`] iterator returned by
/// [`Scanner::scan`], so one `Scanner` can be reused (with a fresh `ScannerContext`) across
/// multiple inputs of the same grammar.
pub struct Scanner {
    modes: Vec<ScannerMode>,
    trivia: Vec<usize>,
}

impl Scanner {
    /// Creates a scanner over the given modes, dropping the default trivia token types
    /// `{1, 2, 3, 4}` (see [`DEFAULT_TRIVIA`]).
    pub fn new(modes: Vec<ScannerMode>) -> Self {
        Scanner::with_trivia(modes, DEFAULT_TRIVIA.to_vec())
    }

    /// Creates a scanner over the given modes, dropping the given set of trivia token types
    /// instead of the default.
    pub fn with_trivia(modes: Vec<ScannerMode>, trivia: Vec<usize>) -> Self {
        Scanner { modes, trivia }
    }

    /// Scans the whole of `input`, returning an iterator of the surviving (non-trivia) tokens.
    ///
    /// `file_name` is accepted for diagnostic symmetry with the generator's other entry points
    /// but is not read by the core; see [`Tokens::file_name`].
    pub fn scan<'h, 'c>(
        &self,
        input: &'h str,
        file_name: &'h str,
        classify: &'c ClassifyFn<'c>,
    ) -> Tokens<'h, 'c> {
        Tokens {
            context: ScannerContext::new(self.modes.clone()),
            iter: CharIterator::new(input),
            finder: MatchFinder::new(classify),
            trivia: self.trivia.clone(),
            file_name,
        }
    }
}

/// An iterator over the tokens produced by scanning one input, with trivia already filtered out.
///
/// Produced by [`Scanner::scan`].
pub struct Tokens<'h, 'c> {
    context: ScannerContext,
    iter: CharIterator<'h>,
    finder: MatchFinder<'c>,
    trivia: Vec<usize>,
    file_name: &'h str,
}

impl<'h, 'c> Tokens<'h, 'c> {
    /// The file name this scan was started with. Unused by the core; preserved for API
    /// compatibility with generators that thread it through for diagnostics.
    pub fn file_name(&self) -> &'h str {
        self.file_name
    }

    /// The scanner context driving this scan, e.g. for a parser that wants to inspect or force
    /// the current mode.
    pub fn context(&self) -> &ScannerContext {
        &self.context
    }

    /// The scanner context driving this scan, mutably.
    pub fn context_mut(&mut self) -> &mut ScannerContext {
        &mut self.context
    }
}

impl<'h, 'c> Iterator for Tokens<'h, 'c> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            match self.finder.find_next(&mut self.context, &mut self.iter) {
                Some(matched) => {
                    if self.trivia.contains(&matched.token_type()) {
                        trace!("scanner: dropping trivia token_type={}", matched.token_type());
                        continue;
                    }
                    return Some(Token::new(self.iter.input(), matched));
                }
                None => {
                    if self.iter.next().is_none() {
                        return None;
                    }
                    trace!("scanner: no match at current position, skipping one character");
                }
            }
        }
    }
}
