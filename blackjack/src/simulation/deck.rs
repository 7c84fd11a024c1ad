use crate::Error;

use super::{Card, Suit};

use rand::Rng;
use strum::IntoEnumIterator;

const DECK_SIZE: usize = 52;

/// A single 52-card deck. Cards are drawn uniformly at random from whatever is
/// left, without replacement, until the deck is replenished.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    // Stacked cards are drawn before any random draw. Stored in reverse order.
    firsts: Vec<Card>,
}

impl Deck {
    /// Creates a full deck.
    pub fn new() -> Deck {
        let mut deck = Deck {
            cards: Vec::with_capacity(DECK_SIZE),
            firsts: Vec::new(),
        };
        deck.replenish();
        deck
    }

    /// Returns every drawn card to the deck.
    pub fn replenish(&mut self) {
        self.cards.clear();
        self.firsts.clear();
        for suit in Suit::iter() {
            for face_value in 1..=13 {
                self.cards.push(Card { face_value, suit });
            }
        }
    }

    /// Replenishes the deck and makes sure the given first few cards will be drawn
    /// first, in order. Cards are given in blackjack values (i.e., 1 stands for A,
    /// 10 stands for 10 and J, Q, K). The deck is left full if the request cannot
    /// be met.
    pub fn replenish_with_firsts(&mut self, firsts: &[u8]) -> Result<(), Error> {
        self.replenish();
        let mut stacked = Vec::with_capacity(firsts.len());
        for &value in firsts {
            let position = self
                .cards
                .iter()
                .position(|card| card.blackjack_value() == value);
            match position {
                Some(position) => stacked.push(self.cards.remove(position)),
                None => {
                    self.replenish();
                    return Err(Error::CardUnavailable { value });
                }
            }
        }
        stacked.reverse();
        self.firsts = stacked;
        Ok(())
    }

    /// Removes and returns one card. Fails if the deck is empty.
    pub fn draw_card<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, Error> {
        if let Some(card) = self.firsts.pop() {
            return Ok(card);
        }
        if self.cards.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let index = rng.gen_range(0..self.cards.len());
        Ok(self.cards.swap_remove(index))
    }

    /// Draws `count` cards one after another.
    pub fn draw_cards<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, Error> {
        (0..count).map(|_| self.draw_card(rng)).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len() + self.firsts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
