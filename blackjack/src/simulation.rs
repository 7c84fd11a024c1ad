pub mod dealer;
pub mod deck;
pub mod hand;

use strum_macros::EnumIter;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Suit {
    Diamond = 0,
    Club,
    Heart,
    Spade,
}

/// A playing card. The face value runs from 1 (Ace) to 13 (King).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    face_value: u8,
    suit: Suit,
}

impl Card {
    pub fn new(face_value: u8, suit: Suit) -> Result<Card, Error> {
        if !(1..=13).contains(&face_value) {
            return Err(Error::InvalidCard { face_value });
        }
        Ok(Card { face_value, suit })
    }

    pub fn face_value(&self) -> u8 {
        self.face_value
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// 1 stands for A. 10 stands for 10, J, Q and K.
    pub fn blackjack_value(&self) -> u8 {
        self.face_value.min(10)
    }

    pub fn is_ace(&self) -> bool {
        self.face_value == 1
    }

    /// The value the agent sees when this is the dealer's up card. Ace shows as 11.
    pub fn up_card_value(&self) -> u8 {
        if self.is_ace() {
            11
        } else {
            self.blackjack_value()
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suit = match self.suit {
            Suit::Diamond => 'D',
            Suit::Club => 'C',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        };
        let value = match self.face_value {
            1 => 'A',
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            v @ 2..=9 => (b'0' + v) as char,
            _ => '?',
        };
        write!(f, "{}{}", suit, value)
    }
}
