/// Module with the grammar table types: parse items, productions, lookahead automata.
mod grammar;
pub use grammar::{GrammarTables, LookaheadDfa, LookaheadTransition, ParseItem, Production};

/// Module with the per-non-terminal lookahead prediction engine.
mod prediction;
pub use prediction::predict_production;

/// Module with the heterogeneous value stack and the value-conversion facade.
mod value;
pub use value::{convert_to, Converter, ConverterGuard, Value};

/// Module with the semantic-action callback contract.
mod actions;
pub use actions::{ActionError, ProvidesConverter, UserActions};

/// Module with the parse driver itself.
mod driver;
pub use driver::ParseDriver;
