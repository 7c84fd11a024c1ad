use super::Card;

/// Adds one card to a running blackjack total.
///
/// An Ace counts as 11 when that does not take the total over 21, and the
/// usable-ace flag is raised. Otherwise it counts as 1 and the flag is left as
/// it was. Any other card adds its blackjack value.
pub fn add_card_value(card: Card, total: u8, usable_ace: bool) -> (u8, bool) {
    if card.is_ace() {
        if total + 11 > 21 {
            (total + 1, usable_ace)
        } else {
            (total + 11, true)
        }
    } else {
        (total + card.blackjack_value(), usable_ace)
    }
}

/// Running value of a hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandState {
    pub total: u8,
    pub usable_ace: bool,
}

impl HandState {
    pub fn with_card(self, card: Card) -> HandState {
        let (total, usable_ace) = add_card_value(card, self.total, self.usable_ace);
        HandState { total, usable_ace }
    }

    pub fn bust(&self) -> bool {
        self.total > 21
    }
}

/// Cards of one player (or the dealer) together with their running value. The
/// value is updated once per received card and never recomputed.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    state: HandState,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(11),
            state: Default::default(),
        }
    }

    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
        self.state = self.state.with_card(card);
    }

    /// Turns a usable Ace from 11 into 1. Returns false if there was none.
    pub fn soften_ace(&mut self) -> bool {
        if !self.state.usable_ace {
            return false;
        }
        self.state.total -= 10;
        self.state.usable_ace = false;
        true
    }

    pub fn get_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_state(&self) -> HandState {
        self.state
    }

    pub fn get_total(&self) -> u8 {
        self.state.total
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_natural(&self) -> bool {
        self.cards.len() == 2 && self.state.total == 21
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.state = Default::default();
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for card in iter {
            hand.receive_card(card);
        }
        hand
    }
}
