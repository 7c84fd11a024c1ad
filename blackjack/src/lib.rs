pub mod error;
pub mod policy;
pub mod q_table;
pub mod simulation;
pub mod training;

pub use error::Error;
pub use policy::{Policy, PolicyCharts};
pub use q_table::{ActionValues, QTable, State};
pub use simulation::{
    deck::Deck,
    hand::{Hand, HandState},
    Card, Suit,
};
pub use training::{EpisodePhase, Trainer, TrainingEventHandler};

use strum_macros::Display;

/// Reward for a won hand. Also the seed of standing on 21.
pub const WIN: f64 = 100.0;
/// Reward for a pushed hand. Also the neutral seed of every other Q-value.
pub const DRAW: f64 = 0.0;
/// Reward for a lost hand, and the bootstrapped target of a bust.
pub const LOSS: f64 = -100.0;

/// Table rules the dealer follows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rule {
    /// Off by default: a soft 17 stands like any other 17.
    pub dealer_hit_on_soft17: bool,
}

/// Hyper-parameters of the learning agent. Construct through [`AgentConfig::new`]
/// so out-of-range values never reach the trainer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
    learning_rate: f64,
    exploration_rate: f64,
    iterations: u64,
}

impl AgentConfig {
    pub fn new(learning_rate: f64, exploration_rate: f64, iterations: u64) -> Result<Self, Error> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning_rate must be in (0, 1], got {}", learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&exploration_rate) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "exploration_rate must be in [0, 1], got {}",
                    exploration_rate
                ),
            });
        }
        if iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: String::from("iterations must be positive"),
            });
        }
        Ok(AgentConfig {
            learning_rate,
            exploration_rate,
            iterations,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Action {
    Stand,
    Hit,
}

/// Result of a finished hand from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn reward(&self) -> f64 {
        match self {
            Outcome::Win => WIN,
            Outcome::Draw => DRAW,
            Outcome::Loss => LOSS,
        }
    }
}

/// Scores a hand in which the player has stood (or busted). A natural is 21 made
/// with exactly two cards.
pub fn check_winner(
    player_total: u8,
    player_cards: usize,
    dealer_total: u8,
    dealer_cards: usize,
) -> Outcome {
    let player_natural = player_total == 21 && player_cards == 2;
    let dealer_natural = dealer_total == 21 && dealer_cards == 2;

    if player_total > 21 || (dealer_natural && !player_natural) {
        Outcome::Loss
    } else if player_natural && dealer_natural {
        Outcome::Draw
    } else if player_natural || dealer_total > 21 {
        Outcome::Win
    } else if player_total < dealer_total {
        Outcome::Loss
    } else if player_total == dealer_total {
        Outcome::Draw
    } else {
        Outcome::Win
    }
}
