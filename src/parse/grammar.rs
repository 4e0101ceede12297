/// One symbol on the right-hand side of a [`Production`].
///
/// `T` and `C` both match and consume a terminal; only `T` forwards the matched token to the
/// value stack. `N` expands into one of the non-terminal's productions, chosen by the prediction
/// engine. `E` is the synthetic end-of-production marker whose pop triggers the production's
/// semantic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseItem {
    /// Match and consume terminal `t`, pushing the token onto the value stack.
    T(usize),
    /// Match and consume terminal `t`, without pushing anything onto the value stack.
    C(usize),
    /// Expand non-terminal `n` via the production the prediction engine selects.
    N(usize),
    /// End-of-production marker for production `p`; triggers its semantic action.
    E(usize),
}

impl ParseItem {
    /// True for the symbols that push a value onto the value stack when matched (`T`), as
    /// opposed to clipped terminals (`C`) which do not.
    #[inline]
    pub fn contributes_value(&self) -> bool {
        !matches!(self, ParseItem::C(_))
    }
}

/// A single grammar production: `lhs -> rhs`.
#[derive(Debug, Clone)]
pub struct Production {
    /// The non-terminal this production reduces to.
    pub lhs: usize,
    /// The right-hand side, in left-to-right order.
    pub rhs: Vec<ParseItem>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: usize, rhs: Vec<ParseItem>) -> Self {
        Production { lhs, rhs }
    }

    /// The number of `rhs` items that are not clipped terminals, i.e. the number of values the
    /// parse driver pops from the value stack when this production's `E` marker fires.
    pub fn child_count(&self) -> usize {
        self.rhs.iter().filter(|item| item.contributes_value()).count()
    }
}

/// One transition of a [`LookaheadDfa`]: from a lookahead state, on a terminal type, to a
/// successor state, optionally selecting a production.
///
/// `production` is `-1` when this transition only advances lookahead state without yet
/// committing to a production (see [`crate::parse::predict_production`]).
#[derive(Debug, Clone, Copy)]
pub struct LookaheadTransition {
    /// The lookahead state this transition leaves from.
    pub from_state: usize,
    /// The terminal type (`0` denotes EOF) that triggers this transition.
    pub terminal_type: usize,
    /// The lookahead state this transition arrives at.
    pub to_state: usize,
    /// The production selected once this transition is taken, or `-1` if none yet.
    pub production: i64,
}

/// The per-non-terminal lookahead automaton used to select a production.
#[derive(Debug, Clone)]
pub struct LookaheadDfa {
    /// The production selected when `transitions` is empty, or as the fallback when lookahead
    /// state is abandoned without committing to one (see §4.7 step 4).
    pub default_production: i64,
    /// Transitions, in no particular order; state `0` is always the initial lookahead state.
    pub transitions: Vec<LookaheadTransition>,
    /// The number of lookahead tokens this automaton consults at most.
    pub k: usize,
}

impl LookaheadDfa {
    /// Creates a new lookahead automaton.
    pub fn new(default_production: i64, transitions: Vec<LookaheadTransition>, k: usize) -> Self {
        LookaheadDfa {
            default_production,
            transitions,
            k,
        }
    }
}

/// The complete, immutable set of grammar tables a generated parser hands to the runtime.
///
/// Constructed once by the generator and shared (read-only) across any number of parses.
#[derive(Debug, Clone)]
pub struct GrammarTables {
    /// All productions, indexed by production number.
    pub productions: Vec<Production>,
    /// One lookahead automaton per non-terminal, indexed by non-terminal index.
    pub lookahead_automata: Vec<LookaheadDfa>,
    /// The non-terminal index the parse starts from.
    pub start_symbol: usize,
    /// Terminal names, indexed by terminal index, for diagnostics only.
    pub terminal_names: Vec<String>,
    /// Non-terminal names, indexed by non-terminal index, for diagnostics only.
    pub non_terminal_names: Vec<String>,
}

impl GrammarTables {
    /// Creates a new grammar table set.
    pub fn new(
        productions: Vec<Production>,
        lookahead_automata: Vec<LookaheadDfa>,
        start_symbol: usize,
        terminal_names: Vec<String>,
        non_terminal_names: Vec<String>,
    ) -> Self {
        GrammarTables {
            productions,
            lookahead_automata,
            start_symbol,
            terminal_names,
            non_terminal_names,
        }
    }

    /// The human-readable name of a terminal, or `"EOF"` for terminal `0`, falling back to the
    /// numeric index if the table is shorter than expected.
    pub fn terminal_name(&self, terminal: usize) -> String {
        if terminal == 0 {
            return "EOF".to_string();
        }
        self.terminal_names
            .get(terminal)
            .cloned()
            .unwrap_or_else(|| format!("<terminal {terminal}>"))
    }

    /// The human-readable name of a non-terminal, falling back to the numeric index if the table
    /// is shorter than expected.
    pub fn non_terminal_name(&self, non_terminal: usize) -> String {
        self.non_terminal_names
            .get(non_terminal)
            .cloned()
            .unwrap_or_else(|| format!("<non-terminal {non_terminal}>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_count_excludes_clipped_terminals() {
        let production = Production::new(
            0,
            vec![ParseItem::C(1), ParseItem::T(2), ParseItem::N(3)],
        );
        assert_eq!(production.child_count(), 2);
    }

    #[test]
    fn terminal_name_falls_back_to_index() {
        let tables = GrammarTables::new(vec![], vec![], 0, vec!["EOF".into()], vec![]);
        assert_eq!(tables.terminal_name(0), "EOF");
        assert_eq!(tables.terminal_name(5), "<terminal 5>");
    }
}
