use std::rc::Rc;

use thiserror::Error;

use crate::{Token, Value};

use super::value::Converter;

/// An error a user-supplied semantic action can raise from
/// [`UserActions::call_semantic_action`].
#[derive(Error, Debug)]
pub enum ActionError {
    /// The action could not map the given children to a meaning. The parse driver retries once
    /// with tokens filtered out of `children` before surfacing a
    /// [`RuntimeError::SemanticMappingError`](crate::RuntimeError::SemanticMappingError) (see
    /// the parse driver's retry policy).
    #[error("semantic action could not map the given children")]
    SemanticMapping,
    /// Any other failure. Propagated as-is; the parse driver never retries this kind.
    #[error("{0}")]
    Other(String),
}

/// The callback surface a generated parser implements to synthesize semantic values.
pub trait UserActions {
    /// Synthesizes the value for production `production_number` from its already-reduced
    /// `children`, supplied in right-hand-side order.
    ///
    /// `children` is borrowed, not owned: the parse driver retains ownership so it can retry with
    /// a token-filtered subset if this call fails with [`ActionError::SemanticMapping`] (see the
    /// parse driver's retry policy).
    fn call_semantic_action(
        &self,
        production_number: usize,
        children: &[Value],
    ) -> Result<Value, ActionError>;

    /// Called for each trivia token the scanner drops that the generator has designated a
    /// comment, so it can still be surfaced (e.g. attached to the nearest node, or collected for
    /// a formatter). Most grammars have no use for this and can accept the default no-op.
    fn on_comment(&self, _token: Token) {}
}

/// Optional capability: a [`UserActions`] implementation that wants to install a [`Converter`]
/// for the duration of one parse.
pub trait ProvidesConverter {
    /// Returns the converter to install for this parse, if any.
    fn converter(&self) -> Option<Rc<dyn Converter>>;
}
