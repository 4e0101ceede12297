use log::trace;

use crate::{GrammarTables, Position, RuntimeError, Token, TokenStream};

/// Walks the lookahead automaton of `non_terminal` against `stream`, peeking (never consuming),
/// to select a production number.
///
/// `position` is used only to enrich a [`RuntimeError::PredictionFailure`], should one occur; it
/// should be the position of the token currently under the parser's cursor.
pub fn predict_production<I: Iterator<Item = Token>>(
    non_terminal: usize,
    grammar: &GrammarTables,
    stream: &mut TokenStream<I>,
    position: Position,
) -> crate::Result<usize> {
    let dfa = &grammar.lookahead_automata[non_terminal];

    if dfa.transitions.is_empty() {
        return Ok(dfa.default_production as usize);
    }

    let mut state = 0usize;
    let mut prod = dfa.default_production;
    let mut last_valid_prod: i64 = -1;

    for i in 0..dfa.k {
        let term = stream.peek(i).map(|token| token.token_type()).unwrap_or(0);
        let Some(transition) = dfa
            .transitions
            .iter()
            .find(|t| t.from_state == state && t.terminal_type == term)
        else {
            break;
        };
        state = transition.to_state;
        prod = transition.production;
        if transition.production >= 0 {
            last_valid_prod = transition.production;
        }
    }

    if prod >= 0 {
        Ok(prod as usize)
    } else if last_valid_prod >= 0 {
        Ok(last_valid_prod as usize)
    } else {
        trace!(
            "prediction failure for non-terminal '{}' at {}",
            grammar.non_terminal_name(non_terminal),
            position
        );
        Err(RuntimeError::PredictionFailure {
            non_terminal: grammar.non_terminal_name(non_terminal),
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::grammar::LookaheadTransition;
    use crate::{Match, Positions, Span};

    fn token(token_type: usize) -> Token {
        let matched = Match::new(
            Span::new(0, 1),
            token_type,
            Positions::new(Position::new(1, 1), Position::new(1, 2)),
        );
        Token::new("x", matched)
    }

    fn grammar_with(dfa: crate::parse::grammar::LookaheadDfa) -> GrammarTables {
        GrammarTables::new(vec![], vec![dfa], 0, vec![], vec!["expr".into()])
    }

    /// LL(2) prediction, success path.
    #[test]
    fn predicts_via_two_lookahead_tokens() {
        let dfa = crate::parse::grammar::LookaheadDfa::new(
            0,
            vec![
                LookaheadTransition { from_state: 0, terminal_type: 10, to_state: 1, production: -1 },
                LookaheadTransition { from_state: 1, terminal_type: 20, to_state: 2, production: 3 },
            ],
            2,
        );
        let grammar = grammar_with(dfa);
        let mut stream = TokenStream::new(vec![token(10), token(20)].into_iter());
        let prod = predict_production(0, &grammar, &mut stream, Position::start()).unwrap();
        assert_eq!(prod, 3);
        // Prediction never consumes.
        assert_eq!(stream.peek(0).unwrap().token_type(), 10);
    }

    /// Falls through the transition table, falls back to the default production.
    #[test]
    fn falls_back_to_default_when_no_transition_matches() {
        let dfa = crate::parse::grammar::LookaheadDfa::new(
            0,
            vec![
                LookaheadTransition { from_state: 0, terminal_type: 10, to_state: 1, production: -1 },
                LookaheadTransition { from_state: 1, terminal_type: 20, to_state: 2, production: 3 },
            ],
            2,
        );
        let grammar = grammar_with(dfa);
        let mut stream = TokenStream::new(vec![token(10), token(99)].into_iter());
        let prod = predict_production(0, &grammar, &mut stream, Position::start()).unwrap();
        assert_eq!(prod, 0);
    }

    #[test]
    fn falls_back_to_last_valid_production_seen() {
        let dfa = crate::parse::grammar::LookaheadDfa::new(
            -1,
            vec![
                LookaheadTransition { from_state: 0, terminal_type: 10, to_state: 1, production: 7 },
                LookaheadTransition { from_state: 1, terminal_type: 20, to_state: 2, production: -1 },
            ],
            2,
        );
        let grammar = grammar_with(dfa);
        let mut stream = TokenStream::new(vec![token(10), token(20)].into_iter());
        let prod = predict_production(0, &grammar, &mut stream, Position::start()).unwrap();
        assert_eq!(prod, 7);
    }

    #[test]
    fn no_transitions_always_returns_default() {
        let dfa = crate::parse::grammar::LookaheadDfa::new(4, vec![], 1);
        let grammar = grammar_with(dfa);
        let mut stream = TokenStream::new(std::iter::empty());
        let prod = predict_production(0, &grammar, &mut stream, Position::start()).unwrap();
        assert_eq!(prod, 4);
    }

    #[test]
    fn fails_when_no_production_ever_valid() {
        let dfa = crate::parse::grammar::LookaheadDfa::new(
            -1,
            vec![LookaheadTransition { from_state: 0, terminal_type: 10, to_state: 1, production: -1 }],
            2,
        );
        let grammar = grammar_with(dfa);
        let mut stream = TokenStream::new(vec![token(10)].into_iter());
        let err = predict_production(0, &grammar, &mut stream, Position::start()).unwrap_err();
        assert!(matches!(err, RuntimeError::PredictionFailure { .. }));
    }
}
