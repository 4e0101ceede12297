use log::trace;

use super::Dfa;

/// The action taken on a scanner mode transition, see [`ScannerMode::mode_transitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Switch the current mode to the given mode index.
    SetMode(usize),
    /// Push the current mode onto the mode stack, then switch to the given mode index.
    PushMode(usize),
    /// Pop a mode off the mode stack and make it the current mode. A pop on an empty stack is
    /// silently ignored.
    PopMode,
}

/// A named scanner mode: the DFA active while in this mode, plus the mode transitions it
/// triggers when one of its token types is accepted.
#[derive(Debug, Clone)]
pub struct ScannerMode {
    /// The name of the mode, used only for diagnostics.
    pub name: String,
    /// Transitions triggered by an accepted token type, checked in order; the first matching
    /// entry wins.
    pub mode_transitions: Vec<(usize, ModeAction)>,
    /// The DFA active while this mode is current.
    pub dfa: Dfa,
}

impl ScannerMode {
    /// Creates a new scanner mode.
    pub fn new(
        name: impl Into<String>,
        dfa: Dfa,
        mode_transitions: Vec<(usize, ModeAction)>,
    ) -> Self {
        ScannerMode {
            name: name.into(),
            mode_transitions,
            dfa,
        }
    }

    /// Looks up the mode action for a token type, if any transition is defined for it.
    fn action_for(&self, token_type: usize) -> Option<ModeAction> {
        self.mode_transitions
            .iter()
            .find(|(tt, _)| *tt == token_type)
            .map(|(_, action)| *action)
    }
}

/// The mutable scanning context: which mode is active, and the stack of modes saved by
/// `PushMode`.
///
/// The initial mode is always mode `0` and the mode stack starts empty.
#[derive(Debug, Clone)]
pub struct ScannerContext {
    modes: Vec<ScannerMode>,
    current_mode: usize,
    mode_stack: Vec<usize>,
}

impl ScannerContext {
    /// Creates a new context over the given modes, starting in mode `0`.
    pub fn new(modes: Vec<ScannerMode>) -> Self {
        ScannerContext {
            modes,
            current_mode: 0,
            mode_stack: Vec::new(),
        }
    }

    /// The currently active mode.
    #[inline]
    pub fn current(&self) -> &ScannerMode {
        &self.modes[self.current_mode]
    }

    /// The index of the currently active mode.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_mode
    }

    /// Applies the mode transition (if any) defined for `token_type` in the current mode.
    pub fn handle_mode_transition(&mut self, token_type: usize) {
        let Some(action) = self.current().action_for(token_type) else {
            return;
        };
        match action {
            ModeAction::SetMode(target) => {
                trace!("scanner mode: {} -> {}", self.current_mode, target);
                self.current_mode = target;
            }
            ModeAction::PushMode(target) => {
                trace!(
                    "scanner mode: push {}, {} -> {}",
                    self.current_mode,
                    self.current_mode,
                    target
                );
                self.mode_stack.push(self.current_mode);
                self.current_mode = target;
            }
            ModeAction::PopMode => {
                if let Some(previous) = self.mode_stack.pop() {
                    trace!("scanner mode: pop, {} -> {}", self.current_mode, previous);
                    self.current_mode = previous;
                } else {
                    trace!("scanner mode: pop on empty mode stack, ignored");
                }
            }
        }
    }
}
