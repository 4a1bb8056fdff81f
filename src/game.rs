use crate::error::{Error, Result};
use crate::history::Record;
use crate::nim::{Move, NimState};
use crate::Planner;
use dialoguer::Input;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who made a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Human,
    Random,
    Ai,
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Human => write!(f, "human"),
            Actor::Random => write!(f, "random"),
            Actor::Ai => write!(f, "ai"),
        }
    }
}

/// Anything that can take a turn.
pub trait Player {
    fn actor(&self) -> Actor;

    /// Chooses a legal move from a non-terminal state.
    fn play(&mut self, state: &NimState) -> Result<(Move, NimState)>;
}

/// Reads moves from the terminal, asking again until one is legal.
pub struct Human;

impl Human {
    fn ask(prompt: String) -> Result<i64> {
        Ok(Input::<i64>::new().with_prompt(prompt).interact_text()?)
    }
}

impl Player for Human {
    fn actor(&self) -> Actor {
        Actor::Human
    }

    fn play(&mut self, state: &NimState) -> Result<(Move, NimState)> {
        loop {
            let pile = Human::ask(format!("Choose a pile (1-{})", state.piles().len()))?;
            let count = Human::ask("How many objects do you remove?".to_string())?;
            let chosen = Move::new(pile.saturating_sub(1), count)
                .and_then(|mv| state.apply(mv).map(|next| (mv, next)));
            match chosen {
                Err(e @ Error::InvalidMove { .. }) => println!("{}, try again.", e),
                other => return other,
            }
        }
    }
}

/// Plays uniformly random legal moves.
pub struct RandomPlayer<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlayer<R> {
    pub fn new(rng: R) -> RandomPlayer<R> {
        RandomPlayer { rng }
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn actor(&self) -> Actor {
        Actor::Random
    }

    fn play(&mut self, state: &NimState) -> Result<(Move, NimState)> {
        state
            .random_move(&mut self.rng)
            .ok_or(Error::AlreadyTerminal)
    }
}

/// Follows the planner's shortest path to the empty board.
pub struct AiPlayer {
    planner: Planner<NimState>,
}

impl AiPlayer {
    pub fn new(planner: Planner<NimState>) -> AiPlayer {
        AiPlayer { planner }
    }
}

impl Player for AiPlayer {
    fn actor(&self) -> Actor {
        Actor::Ai
    }

    fn play(&mut self, state: &NimState) -> Result<(Move, NimState)> {
        let next = self.planner.next_move(state)?;
        let mv = state.move_to(&next).ok_or(Error::NoPathFound)?;
        Ok((mv, next))
    }
}

/// Two players alternating on one board, `first` to move.
pub struct Match {
    players: [Box<dyn Player>; 2],
    state: NimState,
    turn: usize,
}

impl Match {
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>, initial: NimState) -> Match {
        Match {
            players: [first, second],
            state: initial,
            turn: 0,
        }
    }

    pub fn state(&self) -> &NimState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Plays one ply and returns its record.
    pub fn play_turn(&mut self) -> Result<Record> {
        if self.is_over() {
            return Err(Error::AlreadyTerminal);
        }
        let player = &mut self.players[self.turn % 2];
        let (mv, after) = player.play(&self.state)?;
        self.turn += 1;
        let record = Record {
            turn: self.turn,
            before: self.state.clone(),
            description: mv.to_string(),
            actor: player.actor(),
            after: after.clone(),
        };
        log::info!("turn {}: {} plays {} -> {}", record.turn, record.actor, mv, after);
        self.state = after;
        Ok(record)
    }

    /// Plays until the board is empty and returns the winner: whoever took
    /// the last object, leaving the other player without a move.
    pub fn run<F>(&mut self, mut on_record: F) -> Result<Actor>
    where
        F: FnMut(&Record) -> Result<()>,
    {
        let mut last = None;
        while !self.is_over() {
            let record = self.play_turn()?;
            on_record(&record)?;
            last = Some(record.actor);
        }
        last.ok_or(Error::AlreadyTerminal)
    }
}
