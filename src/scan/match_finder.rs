use log::trace;

use crate::{AcceptData, CharIterator, Dfa, Lookahead, Match, Positions, ScannerContext, Span};

/// A character classification function: maps a character to a character-class index, or `None`
/// if the character cannot start or continue any transition from the DFA's perspective.
pub type ClassifyFn<'a> = dyn Fn(char) -> Option<usize> + 'a;

/// Drives a [`Dfa`] over a [`CharIterator`] to find the longest accepting match at the current
/// position, applying positive/negative lookahead and the priority tie-break rule.
///
/// A `MatchFinder` is stateless beyond the `classify` function it was built with; all mutable
/// state lives in the [`CharIterator`] and [`ScannerContext`] it is given.
pub struct MatchFinder<'c> {
    classify: &'c ClassifyFn<'c>,
}

impl<'c> MatchFinder<'c> {
    /// Creates a new match finder using the given character classification function.
    pub fn new(classify: &'c ClassifyFn<'c>) -> Self {
        MatchFinder { classify }
    }

    /// Finds the next match starting at the iterator's current position, using the DFA of the
    /// scanner context's current mode, and applies the resulting mode transition (if any) before
    /// returning.
    pub fn find_next(&self, ctx: &mut ScannerContext, iter: &mut CharIterator) -> Option<Match> {
        let matched = {
            let dfa = &ctx.current().dfa;
            self.find_in_dfa(dfa, iter)
        };
        if let Some(m) = matched.as_ref() {
            ctx.handle_mode_transition(m.token_type());
        }
        matched
    }

    /// Runs the maximal-munch search described in the crate's match-finder algorithm: advances
    /// the DFA character by character, tracking the best (longest, then lowest-priority)
    /// satisfied accept seen so far, and rolls the iterator back to just past that accept before
    /// returning.
    fn find_in_dfa(&self, dfa: &Dfa, iter: &mut CharIterator) -> Option<Match> {
        iter.save_state();

        let mut state = 0usize;
        let mut start_item = None;
        let mut best_end = None;
        let mut best_token = None;
        let mut best_priority = i32::MAX;
        let mut best_len = 0usize;

        loop {
            let Some(peeked) = iter.peek() else {
                break;
            };
            let Some(class_index) = (self.classify)(peeked.character) else {
                break;
            };
            let Some(next_state) = dfa[state].transition(class_index) else {
                break;
            };
            state = next_state;
            let consumed = iter.next().expect("a peeked character must be consumable");
            if start_item.is_none() {
                start_item = Some(consumed);
            }

            if let Some(accept) = self.first_satisfied_accept(&dfa[state].accept_data, dfa, iter) {
                let start_byte = start_item.unwrap().byte_index;
                let end_byte = consumed.byte_index + consumed.character.len_utf8();
                let cur_len = end_byte - start_byte;
                let is_better = best_end.is_none()
                    || cur_len > best_len
                    || (cur_len == best_len && accept.priority < best_priority);
                if is_better {
                    trace!(
                        "match finder: new best token_type={} len={} priority={}",
                        accept.token_type,
                        cur_len,
                        accept.priority
                    );
                    best_end = Some(consumed);
                    best_token = Some(accept.token_type);
                    best_priority = accept.priority;
                    best_len = cur_len;
                    iter.save_state();
                }
            }
        }

        match (start_item, best_end, best_token) {
            (Some(start), Some(end), Some(token_type)) => {
                iter.restore_state();
                let end_position = end.position.advance(end.character);
                let span = Span::new(start.byte_index, end.byte_index + end.character.len_utf8());
                Some(Match::new(
                    span,
                    token_type,
                    Positions::new(start.position, end_position),
                ))
            }
            _ => {
                iter.restore_state();
                None
            }
        }
    }

    /// Returns the first entry of `accept_data` whose lookahead constraint is satisfied, if any.
    fn first_satisfied_accept<'a>(
        &self,
        accept_data: &'a [AcceptData],
        _dfa: &Dfa,
        iter: &CharIterator,
    ) -> Option<&'a AcceptData> {
        accept_data.iter().find(|accept| match &accept.lookahead {
            Lookahead::None => true,
            Lookahead::Positive(sub) => self.check_lookahead(sub, iter),
            Lookahead::Negative(sub) => !self.check_lookahead(sub, iter),
        })
    }

    /// Evaluates a zero-width lookahead sub-DFA starting at the iterator's current position.
    ///
    /// Operates on a private clone of the iterator, so the passed-in iterator is never mutated:
    /// this both satisfies the "lookahead never alters observable position" invariant and avoids
    /// any interference with the enclosing match's own rollback bookkeeping.
    fn check_lookahead(&self, dfa: &Dfa, iter: &CharIterator) -> bool {
        let mut probe = iter.clone();
        let mut state = 0usize;
        loop {
            let Some(peeked) = probe.peek() else {
                return false;
            };
            let Some(class_index) = (self.classify)(peeked.character) else {
                return false;
            };
            let Some(next_state) = dfa[state].transition(class_index) else {
                return false;
            };
            state = next_state;
            probe.next();
            if !dfa[state].accept_data.is_empty() {
                return true;
            }
        }
    }
}
