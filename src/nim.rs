use crate::error::{Error, Result};
use crate::Impartial;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Most objects a single turn may take from one pile.
pub const MAX_REMOVE: usize = 3;

/// A Nim position: one object count per pile, in pile order.
///
/// The piles are private so a state can only change by producing a new one.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NimState {
    piles: Vec<usize>,
}

/// Removal of `count` objects from the pile at `pile` (0-based).
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub pile: usize,
    pub count: usize,
}

impl Move {
    /// Builds a move from raw, possibly negative, input.
    /// Only the sign is checked here; `NimState::apply` does the rest.
    pub fn new(pile: i64, count: i64) -> Result<Move> {
        let reject = |reason| Error::InvalidMove {
            pile,
            count,
            reason,
        };
        let pile = usize::try_from(pile).map_err(|_| reject("pile index out of range"))?;
        if count <= 0 {
            return Err(reject("count must be positive"));
        }
        Ok(Move {
            pile,
            count: count as usize,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "object" } else { "objects" };
        write!(f, "remove {} {} from pile {}", self.count, noun, self.pile + 1)
    }
}

impl NimState {
    pub fn new(piles: Vec<usize>) -> NimState {
        NimState { piles }
    }

    pub fn piles(&self) -> &[usize] {
        &self.piles
    }

    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&pile| pile == 0)
    }

    /// The legality gate: removes `count` objects from pile `pile`,
    /// or rejects the move and leaves `self` untouched.
    pub fn apply_move(&self, pile: usize, count: usize) -> Result<NimState> {
        let reject = |reason| Error::InvalidMove {
            pile: pile as i64,
            count: count as i64,
            reason,
        };
        let size = *self
            .piles
            .get(pile)
            .ok_or_else(|| reject("pile index out of range"))?;
        if count == 0 {
            return Err(reject("count must be positive"));
        }
        if count > MAX_REMOVE {
            return Err(reject("count exceeds the per-turn cap"));
        }
        if count > size {
            return Err(reject("count exceeds the pile size"));
        }
        Ok(self.reduced(Move { pile, count }))
    }

    pub fn apply(&self, mv: Move) -> Result<NimState> {
        self.apply_move(mv.pile, mv.count)
    }

    /// Every move `apply_move` accepts, by ascending pile then ascending count.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.piles.iter().enumerate().flat_map(|(pile, &size)| {
            (1..=size.min(MAX_REMOVE)).map(move |count| Move { pile, count })
        })
    }

    /// States one legal move away, in `legal_moves` order.
    pub fn successors(&self) -> Vec<NimState> {
        self.legal_moves().map(|mv| self.reduced(mv)).collect()
    }

    /// Picks a non-empty pile uniformly, then a count uniformly in
    /// `1..=min(MAX_REMOVE, pile)`. `None` once every pile is empty.
    pub fn random_move<R: Rng>(&self, rng: &mut R) -> Option<(Move, NimState)> {
        let candidates: Vec<usize> = (0..self.piles.len())
            .filter(|&i| self.piles[i] > 0)
            .collect();
        let &pile = candidates.choose(rng)?;
        let count = rng.random_range(1..=self.piles[pile].min(MAX_REMOVE));
        let mv = Move { pile, count };
        self.apply(mv).ok().map(|next| (mv, next))
    }

    /// The legal move leading from `self` to `next`, if there is one.
    pub fn move_to(&self, next: &NimState) -> Option<Move> {
        self.legal_moves().find(|&mv| self.reduced(mv) == *next)
    }

    /// One line per pile, numbered from 1.
    pub fn render(&self) -> String {
        self.piles
            .iter()
            .enumerate()
            .map(|(i, &pile)| match pile {
                1 => format!("Pile {}: 1 object", i + 1),
                n => format!("Pile {}: {} objects", i + 1, n),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    // callers guarantee `mv` is legal
    fn reduced(&self, mv: Move) -> NimState {
        let mut piles = self.piles.clone();
        piles[mv.pile] -= mv.count;
        NimState { piles }
    }
}

impl fmt::Display for NimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.piles)
    }
}

impl Impartial for NimState {
    fn get_moves(&self) -> Vec<NimState> {
        self.successors()
    }

    fn is_terminal(&self) -> bool {
        NimState::is_terminal(self)
    }
}
