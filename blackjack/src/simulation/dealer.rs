use rand::Rng;

use crate::{Error, Rule};

use super::{
    deck::Deck,
    hand::{Hand, HandState},
};

const DEALER_STAND_TOTAL: u8 = 17;

/// Plays the dealer's hand to the end and returns its final value.
///
/// The dealer draws below 17 and stands on 17 or more. A soft 17 stands unless
/// `rule.dealer_hit_on_soft17` is set. When drawing takes a soft hand over 21,
/// the Ace is turned into 1. If that leaves the hand below 17, exactly one more
/// card is drawn and the dealer stops, whatever the new total. That recovery
/// happens at most once.
pub fn dealer_plays<R: Rng + ?Sized>(
    rule: &Rule,
    hand: &mut Hand,
    deck: &mut Deck,
    rng: &mut R,
) -> Result<HandState, Error> {
    loop {
        let state = hand.get_state();
        let must_draw = state.total < DEALER_STAND_TOTAL
            || (state.total == DEALER_STAND_TOTAL && state.usable_ace && rule.dealer_hit_on_soft17);
        if must_draw {
            hand.receive_card(deck.draw_card(rng)?);
            continue;
        }

        // Only a hit soft 17 can soften into 17 or more.
        if state.bust() && hand.soften_ace() && hand.get_total() < DEALER_STAND_TOTAL {
            hand.receive_card(deck.draw_card(rng)?);
        }
        return Ok(hand.get_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Deals the first two stacked cards to the dealer and leaves the rest on top
    /// of the deck.
    fn setup(firsts: &[u8]) -> (Hand, Deck, StdRng) {
        let mut rng = StdRng::seed_from_u64(17);
        let mut deck = Deck::new();
        deck.replenish_with_firsts(firsts).unwrap();
        let hand: Hand = deck.draw_cards(2, &mut rng).unwrap().into_iter().collect();
        (hand, deck, rng)
    }

    fn state(total: u8, usable_ace: bool) -> HandState {
        HandState { total, usable_ace }
    }

    #[test]
    fn hard_17_stands() {
        let (mut hand, mut deck, mut rng) = setup(&[10, 7]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(17, false));
        assert_eq!(hand.len(), 2);
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn soft_17_stands_by_default() {
        let (mut hand, mut deck, mut rng) = setup(&[1, 6, 3]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(17, true));
        assert_eq!(hand.len(), 2);
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn soft_17_hits_when_rule_says_so() {
        let rule = Rule {
            dealer_hit_on_soft17: true,
        };
        let (mut hand, mut deck, mut rng) = setup(&[1, 6, 3]);
        let result = dealer_plays(&rule, &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(20, true));
        assert_eq!(hand.len(), 3);
        assert_eq!(deck.len(), 49);
    }

    #[test]
    fn hit_soft_17_softens_into_hard_17() {
        let rule = Rule {
            dealer_hit_on_soft17: true,
        };
        let (mut hand, mut deck, mut rng) = setup(&[1, 6, 10, 5]);
        let result = dealer_plays(&rule, &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(17, false));
        assert_eq!(hand.len(), 3);
        assert_eq!(deck.len(), 49);
    }

    #[test]
    fn hit_soft_17_recovers_below_17() {
        // A6 + 8 = soft 25, the Ace becomes 1 (15) and one more card is drawn.
        let rule = Rule {
            dealer_hit_on_soft17: true,
        };
        let (mut hand, mut deck, mut rng) = setup(&[1, 6, 8, 3, 10]);
        let result = dealer_plays(&rule, &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(18, false));
        assert_eq!(hand.len(), 4);
    }

    #[test]
    fn draws_until_17() {
        let (mut hand, mut deck, mut rng) = setup(&[10, 2, 3, 4]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(19, false));
        assert_eq!(hand.len(), 4);
    }

    #[test]
    fn soft_bust_is_recovered_once_then_stops() {
        // A5 = soft 16, 8 takes it to 24, the Ace becomes 1 (14) and one more card
        // is drawn. The dealer stops at 16.
        let (mut hand, mut deck, mut rng) = setup(&[1, 5, 8, 2, 10]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(16, false));
        assert_eq!(hand.len(), 4);
        assert_eq!(deck.len(), 48);
    }

    #[test]
    fn recovered_hand_can_still_bust() {
        let (mut hand, mut deck, mut rng) = setup(&[1, 5, 8, 10]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(24, false));
        assert_eq!(hand.len(), 4);
    }

    #[test]
    fn hard_bust_stays_bust() {
        let (mut hand, mut deck, mut rng) = setup(&[10, 6, 10]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(26, false));
        assert_eq!(hand.len(), 3);
    }

    #[test]
    fn natural_stands_with_two_cards() {
        let (mut hand, mut deck, mut rng) = setup(&[1, 10]);
        let result = dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng).unwrap();
        assert_eq!(result, state(21, true));
        assert!(hand.is_natural());
    }

    #[test]
    fn empty_deck_is_reported() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut deck = Deck::new();
        let mut hand: Hand = deck.draw_cards(2, &mut rng).unwrap().into_iter().collect();
        hand.clear();
        deck.draw_cards(50, &mut rng).unwrap();
        assert_eq!(
            dealer_plays(&Rule::default(), &mut hand, &mut deck, &mut rng),
            Err(Error::EmptyDeck)
        );
    }
}
