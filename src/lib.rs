pub mod error;
pub mod game;
pub mod heuristic;
pub mod history;
pub mod nim;
pub mod node;
pub mod search;


use dashmap::DashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub use error::{Error, Result};
pub use heuristic::{heuristic_combined, heuristic_sum, Heuristic, HeuristicKind};
pub use nim::{Move, NimState, MAX_REMOVE};
pub use node::{reconstruct_path, SearchNode, SearchTree};
pub use search::{explore, find_next_move, shortest_path, SearchLimits};

/// Provides the interface the search needs from a game.
pub trait Impartial: Sized + Clone + Hash + Eq + Debug + Send + Sync {
    /// Returns the list of successor game states (i.e., possible moves).
    fn get_moves(&self) -> Vec<Self>;

    /// Returns whether no move is left to play.
    fn is_terminal(&self) -> bool;
}

/// Settings for a `Planner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub heuristic: HeuristicKind,
    pub limits: SearchLimits,
}

impl PlannerConfig {
    pub fn new() -> PlannerConfig {
        PlannerConfig::default()
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Picks next moves by A* search and remembers the answers.
///
/// `G` is the game type, which must implement `Impartial`.
/// Clones share the cache and the cancellation flag.
#[derive(Clone)]
pub struct Planner<G>
where
    G: Impartial,
{
    heuristic: Heuristic<G>,
    limits: SearchLimits,
    cache: Arc<DashMap<G, G>>,
    cancel_flag: Arc<AtomicBool>,
}

impl<G> Debug for Planner<G>
where
    G: Impartial,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("limits", &self.limits)
            .field("cache_size", &self.cache.len())
            .field("cancelled", &self.cancel_flag.load(Ordering::Relaxed))
            .finish()
    }
}

impl Planner<NimState> {
    /// Constructs a Nim planner from a configuration.
    pub fn from_config(config: PlannerConfig) -> Planner<NimState> {
        Planner::new(config.heuristic.function(), config.limits)
    }
}

impl<G> Planner<G>
where
    G: Impartial,
{
    /// Constructs a new planner with an empty cache.
    pub fn new(heuristic: Heuristic<G>, limits: SearchLimits) -> Planner<G> {
        Planner {
            heuristic,
            limits,
            cache: Arc::new(DashMap::new()),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the number of positions with a remembered next move.
    pub fn get_cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Returns a handle to the planner's cancellation flag.
    /// Can be set externally to abort ongoing searches.
    pub fn get_cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the state one move along a shortest path to a terminal state.
    pub fn next_move(&self, state: &G) -> Result<G> {
        if state.is_terminal() {
            return Err(Error::AlreadyTerminal);
        }
        if let Some(next) = self.cache.get(state) {
            log::trace!("cache hit for {:?}", state);
            return Ok(next.clone());
        }
        if self.cancel_flag.load(Ordering::Relaxed) {
            return Err(Error::Cancelled);
        }
        let path = shortest_path(
            state,
            self.heuristic,
            &self.limits,
            Some(self.cancel_flag.as_ref()),
        )?
        .ok_or(Error::NoPathFound)?;
        let next = path.into_iter().nth(1).ok_or(Error::NoPathFound)?;
        self.cache.insert(state.clone(), next.clone());
        Ok(next)
    }

    /// Plans every state in parallel; results keep the input order.
    pub fn plan_all(&self, states: &[G]) -> Vec<Result<G>> {
        states.par_iter().map(|state| self.next_move(state)).collect()
    }
}
