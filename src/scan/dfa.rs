/// One state of a [`Dfa`]. State `0` of a `Dfa` is always its initial state.
#[derive(Debug, Clone, Default)]
pub struct DfaState {
    /// Transitions out of this state, indexed by character-class index. A `None` slot is a dead
    /// transition; a class index beyond the end of this vector is likewise dead.
    pub transitions: Vec<Option<usize>>,
    /// Accept data associated with this state, evaluated in order. List order encodes priority
    /// among co-located accepts (see [`AcceptData`]).
    pub accept_data: Vec<AcceptData>,
}

impl DfaState {
    /// Creates a state with the given dense transition table and no accepts.
    pub fn new(transitions: Vec<Option<usize>>) -> Self {
        DfaState {
            transitions,
            accept_data: Vec::new(),
        }
    }

    /// Creates a state with the given transitions and accept data.
    pub fn with_accepts(transitions: Vec<Option<usize>>, accept_data: Vec<AcceptData>) -> Self {
        DfaState {
            transitions,
            accept_data,
        }
    }

    /// Looks up the transition for a character-class index, returning `None` if the slot is
    /// absent or out of range.
    #[inline]
    pub fn transition(&self, class_index: usize) -> Option<usize> {
        self.transitions.get(class_index).copied().flatten()
    }
}

/// A deterministic finite automaton: a dense array of states, indexed by state number, with state
/// `0` as the initial state.
pub type Dfa = Vec<DfaState>;

/// A zero-width lookahead constraint attached to an [`AcceptData`] entry.
#[derive(Debug, Clone)]
pub enum Lookahead {
    /// No lookahead constraint; the accept is always satisfied.
    None,
    /// The sub-DFA must match starting at the position immediately after the candidate match.
    Positive(Dfa),
    /// The sub-DFA must *not* match starting at the position immediately after the candidate
    /// match.
    Negative(Dfa),
}

/// One potential accept at a DFA state.
///
/// When a state is reached that has more than one `AcceptData` entry, they are evaluated in list
/// order and the first one whose lookahead is satisfied wins (see
/// [`MatchFinder`](crate::MatchFinder)). `priority` only breaks ties between two accepts of equal
/// match length encountered via different loop iterations, never between entries in the same
/// list.
#[derive(Debug, Clone)]
pub struct AcceptData {
    /// The token type this accept produces.
    pub token_type: usize,
    /// Lower values win when two accepts of equal match length are compared.
    pub priority: i32,
    /// The lookahead constraint attached to this accept, if any.
    pub lookahead: Lookahead,
}

impl AcceptData {
    /// Creates a new accept with no lookahead constraint.
    pub fn new(token_type: usize, priority: i32) -> Self {
        AcceptData {
            token_type,
            priority,
            lookahead: Lookahead::None,
        }
    }

    /// Creates a new accept with the given lookahead constraint.
    pub fn with_lookahead(token_type: usize, priority: i32, lookahead: Lookahead) -> Self {
        AcceptData {
            token_type,
            priority,
            lookahead,
        }
    }
}
