use crate::nim::NimState;
use serde::{Deserialize, Serialize};

/// Cost-to-go estimate used to order the search frontier.
pub type Heuristic<G> = fn(&G) -> usize;

/// Objects left on the board.
///
/// Not a lower bound on the remaining moves: a single move can take up to
/// three objects, so this overestimates whenever a pile holds more than one.
/// Saturates at `usize::MAX` on huge boards.
pub fn heuristic_sum(state: &NimState) -> usize {
    state
        .piles()
        .iter()
        .fold(0, |acc: usize, &pile| acc.saturating_add(pile))
}

/// Objects left plus the nim-sum (XOR of all pile counts).
pub fn heuristic_combined(state: &NimState) -> usize {
    let nim_sum = state.piles().iter().fold(0, |acc, &pile| acc ^ pile);
    heuristic_sum(state).saturating_add(nim_sum)
}

/// Named heuristic selection for configuration and the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Sum,
    Combined,
}

impl HeuristicKind {
    pub fn function(self) -> Heuristic<NimState> {
        match self {
            HeuristicKind::Sum => heuristic_sum,
            HeuristicKind::Combined => heuristic_combined,
        }
    }
}
