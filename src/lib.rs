#![forbid(missing_docs)]
//! # llk_runtime
//!
//! Runtime engine for generated LL(k) parsers and their DFA-based lexical scanners.
//!
//! A generator (out of scope for this crate) compiles a grammar into immutable tables: scanner
//! modes with their lookahead DFAs, a set of productions, a per-non-terminal lookahead DFA for
//! prediction, and a character-classification function. This crate consumes those tables to turn
//! an input string into a token stream ([`Scanner`]) and then drive a table-driven LL(k) parse
//! over that stream ([`ParseDriver`]), dispatching semantic actions through a
//! generator-implemented [`UserActions`].
//!
//! The crate does no error recovery: the first syntax mismatch, failed prediction, or rejected
//! semantic action ends the parse (see [`RuntimeError`]). It does no Unicode-class computation
//! (the caller supplies `classify`) and does not stream input incrementally — a parse consumes a
//! complete in-memory `&str`.
//!
//! # Example
//!
//! ```
//! use llk_runtime::{
//!     AcceptData, ActionError, Dfa, DfaState, GrammarTables, LookaheadDfa, ParseDriver,
//!     ParseItem, Production, Scanner, ScannerMode, UserActions, Value,
//! };
//!
//! // A DFA recognizing a single digit as terminal type 1.
//! fn digit_dfa() -> Dfa {
//!     vec![
//!         DfaState::new(vec![Some(1)]),
//!         DfaState::with_accepts(vec![], vec![AcceptData::new(1, 0)]),
//!     ]
//! }
//!
//! fn classify(c: char) -> Option<usize> {
//!     if c.is_ascii_digit() {
//!         Some(0)
//!     } else {
//!         None
//!     }
//! }
//!
//! struct SumDigits;
//! impl UserActions for SumDigits {
//!     fn call_semantic_action(
//!         &self,
//!         _production_number: usize,
//!         children: &[Value],
//!     ) -> Result<Value, ActionError> {
//!         Ok(Value::user(children.len()))
//!     }
//! }
//!
//! let scanner = Scanner::new(vec![ScannerMode::new("INITIAL", digit_dfa(), vec![])]);
//! let classify_fn: &dyn Fn(char) -> Option<usize> = &classify;
//! let tokens = scanner.scan("5", "input", classify_fn);
//!
//! let grammar = GrammarTables::new(
//!     vec![Production::new(0, vec![ParseItem::T(1)])],
//!     vec![LookaheadDfa::new(0, vec![], 1)],
//!     0,
//!     vec!["EOF".into(), "digit".into()],
//!     vec!["start".into()],
//! );
//! let driver = ParseDriver::new(&grammar);
//! let result = driver.parse(&SumDigits, None, tokens).unwrap();
//! let count: usize = llk_runtime::convert_to(result).unwrap();
//! assert_eq!(count, 1);
//! ```

/// Module with common, scan-and-parse-agnostic value types: spans, positions, matches, tokens.
mod common;
pub use common::{Match, Position, Positions, Span, Token};

/// Module with the crate's error and result types.
mod errors;
pub use errors::{Result, RuntimeError};

/// Module with the scanner: character iterator, DFA tables, match finder, scanner façade, and
/// the k-lookahead token stream.
mod scan;
pub use scan::{
    AcceptData, CharItem, CharIterator, ClassifyFn, Dfa, DfaState, Lookahead, MatchFinder,
    ModeAction, Scanner, ScannerContext, ScannerMode, TokenStream, Tokens, DEFAULT_TRIVIA,
};

/// Module with the LL(k) parser: grammar tables, prediction engine, parse driver, semantic
/// actions, and the heterogeneous value stack with its conversion facade.
mod parse;
pub use parse::{
    convert_to, predict_production, ActionError, Converter, ConverterGuard, GrammarTables,
    LookaheadDfa, LookaheadTransition, ParseDriver, ParseItem, Production, ProvidesConverter,
    UserActions, Value,
};
