use thiserror::Error;

use crate::training::EpisodePhase;

/// Every failure is fatal to a training run; none of them is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("cannot draw from an empty deck")]
    EmptyDeck,

    #[error("face value {face_value} is not between 1 and 13")]
    InvalidCard { face_value: u8 },

    #[error("no card of value {value} left to stack on top of the deck")]
    CardUnavailable { value: u8 },

    #[error(
        "state out of range: player total {player_total}, dealer up card {dealer_up_card}, usable ace {usable_ace}"
    )]
    InvalidState {
        player_total: u8,
        dealer_up_card: u8,
        usable_ace: bool,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("{method} is only allowed in {expected:?} phase, current phase is {actual:?}")]
    InvalidPhase {
        method: &'static str,
        expected: EpisodePhase,
        actual: EpisodePhase,
    },
}
