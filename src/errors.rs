use thiserror::Error;

use crate::ActionError;

/// The result type used throughout the `llk_runtime` crate.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// The error type of the `llk_runtime` crate.
///
/// None of these errors are recoverable: the runtime implements no error
/// recovery strategy (see the crate-level documentation), so every variant
/// terminates the current parse.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The parser expected a specific terminal but found a mismatching token, or ran out of
    /// input.
    #[error("syntax error at {position}: expected '{expected}', found {found}")]
    SyntaxError {
        /// Name of the terminal the parser expected.
        expected: String,
        /// Description of what was actually found, or `"EOF"`.
        found: String,
        /// Position of the mismatching token.
        position: crate::Position,
    },

    /// A non-terminal's lookahead DFA terminated without ever settling on a production number.
    #[error("no viable alternative for non-terminal '{non_terminal}' at {position}")]
    PredictionFailure {
        /// Name of the non-terminal that could not be predicted.
        non_terminal: String,
        /// Position of the token the prediction failed at.
        position: crate::Position,
    },

    /// The value stack ran dry while popping children for a production's semantic action.
    /// This indicates a bug in the generated tables, not in the input.
    #[error("internal parser error: value stack underrun while reducing production {production}")]
    InternalParseError {
        /// Index of the production whose reduction under-ran the value stack.
        production: usize,
    },

    /// A semantic action rejected both the raw and the token-filtered child list.
    #[error(
        "semantic action for production {production} rejected children {raw_children:?} \
         and filtered children {filtered_children:?}"
    )]
    SemanticMappingError {
        /// Index of the production whose action failed.
        production: usize,
        /// Type names of the raw (unfiltered) children, in RHS order.
        raw_children: Vec<&'static str>,
        /// Type names of the children after filtering out tokens.
        filtered_children: Vec<&'static str>,
        /// The error returned by the retry attempt.
        #[source]
        cause: ActionError,
    },

    /// A value could not be converted to the requested target type.
    #[error("cannot convert value of type '{source_type}' to '{target_type}'")]
    ValueConversionError {
        /// Name of the type the value actually has.
        source_type: &'static str,
        /// Name of the type conversion was requested to.
        target_type: &'static str,
    },

    /// A user action raised an error that was not a semantic-mapping mismatch; propagated as-is.
    #[error(transparent)]
    Action(#[from] ActionError),
}
