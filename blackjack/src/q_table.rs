use std::ops::{Index, IndexMut};

use crate::{Action, Error, DRAW, WIN};

pub const MIN_PLAYER_TOTAL: u8 = 4;
pub const MAX_PLAYER_TOTAL: u8 = 21;
pub const MIN_DEALER_UP_CARD: u8 = 2;
pub const MAX_DEALER_UP_CARD: u8 = 11;

const PLAYER_TOTALS: usize = (MAX_PLAYER_TOTAL - MIN_PLAYER_TOTAL + 1) as usize;
const DEALER_UP_CARDS: usize = (MAX_DEALER_UP_CARD - MIN_DEALER_UP_CARD + 1) as usize;
const NUMBER_OF_STATES: usize = PLAYER_TOTALS * DEALER_UP_CARDS * 2;

/// What the agent observes before each decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub player_total: u8,
    /// 2 to 10, Ace is 11.
    pub dealer_up_card: u8,
    pub usable_ace: bool,
}

impl State {
    pub fn new(player_total: u8, dealer_up_card: u8, usable_ace: bool) -> State {
        State {
            player_total,
            dealer_up_card,
            usable_ace,
        }
    }

    /// A hand cannot hold an Ace counted as 11 and still total less than 11.
    pub fn is_reachable(&self) -> bool {
        !(self.usable_ace && self.player_total < 11)
    }
}

/// Value estimates of both actions in one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionValues {
    pub stand: f64,
    pub hit: f64,
}

impl ActionValues {
    /// Stand wins ties.
    pub fn get_max_value(&self) -> (f64, Action) {
        if self.hit > self.stand {
            (self.hit, Action::Hit)
        } else {
            (self.stand, Action::Stand)
        }
    }
}

impl Index<Action> for ActionValues {
    type Output = f64;
    fn index(&self, action: Action) -> &Self::Output {
        match action {
            Action::Stand => &self.stand,
            Action::Hit => &self.hit,
        }
    }
}

impl IndexMut<Action> for ActionValues {
    fn index_mut(&mut self, action: Action) -> &mut Self::Output {
        match action {
            Action::Stand => &mut self.stand,
            Action::Hit => &mut self.hit,
        }
    }
}

/// Dense table of action values over every player total in [4, 21], dealer up
/// card in [2, 11] and usable-ace flag. All entries exist from construction on;
/// anything outside those bounds is an [`Error::InvalidState`].
#[derive(Debug, Clone)]
pub struct QTable {
    values: Vec<ActionValues>,
}

impl QTable {
    /// Every value starts as a draw, except standing on 21 which starts as a win.
    pub fn new() -> QTable {
        let mut values = Vec::with_capacity(NUMBER_OF_STATES);
        values.extend(Self::states().map(|state| ActionValues {
            stand: if state.player_total == MAX_PLAYER_TOTAL {
                WIN
            } else {
                DRAW
            },
            hit: DRAW,
        }));
        QTable { values }
    }

    /// All keys, in storage order.
    pub fn states() -> impl Iterator<Item = State> {
        (MIN_PLAYER_TOTAL..=MAX_PLAYER_TOTAL).flat_map(|player_total| {
            (MIN_DEALER_UP_CARD..=MAX_DEALER_UP_CARD).flat_map(move |dealer_up_card| {
                [false, true]
                    .into_iter()
                    .map(move |usable_ace| State::new(player_total, dealer_up_card, usable_ace))
            })
        })
    }

    fn index_of(state: &State) -> Result<usize, Error> {
        let in_range = (MIN_PLAYER_TOTAL..=MAX_PLAYER_TOTAL).contains(&state.player_total)
            && (MIN_DEALER_UP_CARD..=MAX_DEALER_UP_CARD).contains(&state.dealer_up_card);
        if !in_range {
            return Err(Error::InvalidState {
                player_total: state.player_total,
                dealer_up_card: state.dealer_up_card,
                usable_ace: state.usable_ace,
            });
        }
        let row = (state.player_total - MIN_PLAYER_TOTAL) as usize;
        let col = (state.dealer_up_card - MIN_DEALER_UP_CARD) as usize;
        Ok((row * DEALER_UP_CARDS + col) * 2 + state.usable_ace as usize)
    }

    pub fn get(&self, state: &State) -> Result<ActionValues, Error> {
        Ok(self.values[Self::index_of(state)?])
    }

    pub fn set(&mut self, state: &State, action: Action, value: f64) -> Result<(), Error> {
        self.values[Self::index_of(state)?][action] = value;
        Ok(())
    }

    pub fn best_action(&self, state: &State) -> Result<Action, Error> {
        Ok(self.get(state)?.get_max_value().1)
    }

    pub fn max_value(&self, state: &State) -> Result<f64, Error> {
        Ok(self.get(state)?.get_max_value().0)
    }

    /// Moves Q(state, action) toward `target`:
    /// Q ← Q + α (target − Q). Returns the new value.
    pub fn update(
        &mut self,
        state: &State,
        action: Action,
        target: f64,
        learning_rate: f64,
    ) -> Result<f64, Error> {
        let value = &mut self.values[Self::index_of(state)?][action];
        *value += learning_rate * (target - *value);
        Ok(*value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LOSS;

    #[test]
    fn covers_the_whole_key_space() {
        let q_table = QTable::new();
        assert_eq!(q_table.len(), NUMBER_OF_STATES);
        assert_eq!(NUMBER_OF_STATES, 360);
        for (position, state) in QTable::states().enumerate() {
            assert_eq!(QTable::index_of(&state).unwrap(), position);
        }
    }

    #[test]
    fn initial_values() {
        let q_table = QTable::new();
        for state in QTable::states() {
            let values = q_table.get(&state).unwrap();
            assert_eq!(values.hit, DRAW);
            if state.player_total == 21 {
                assert_eq!(values.stand, WIN);
            } else {
                assert_eq!(values.stand, DRAW);
            }
            assert_eq!(q_table.best_action(&state).unwrap(), Action::Stand);
        }
    }

    #[test]
    fn out_of_range_states_are_rejected() {
        let mut q_table = QTable::new();
        for (player_total, dealer_up_card) in [(3, 5), (22, 5), (12, 1), (12, 12), (0, 0)] {
            let state = State::new(player_total, dealer_up_card, false);
            let expected = Err(Error::InvalidState {
                player_total,
                dealer_up_card,
                usable_ace: false,
            });
            assert_eq!(q_table.get(&state).map(|_| ()), expected);
            assert_eq!(q_table.set(&state, Action::Hit, 1.0), expected);
            assert_eq!(q_table.best_action(&state).map(|_| ()), expected);
            assert_eq!(
                q_table.update(&state, Action::Hit, LOSS, 0.5).map(|_| ()),
                expected
            );
        }
    }

    #[test]
    fn set_only_touches_one_entry() {
        let mut q_table = QTable::new();
        let state = State::new(15, 10, false);
        q_table.set(&state, Action::Hit, 42.0).unwrap();
        assert_eq!(q_table.get(&state).unwrap()[Action::Hit], 42.0);
        assert_eq!(q_table.get(&state).unwrap()[Action::Stand], DRAW);
        let soft = State::new(15, 10, true);
        assert_eq!(q_table.get(&soft).unwrap()[Action::Hit], DRAW);
    }

    #[test]
    fn best_action_prefers_stand_on_ties() {
        let mut q_table = QTable::new();
        let state = State::new(16, 7, false);
        q_table.set(&state, Action::Stand, -30.0).unwrap();
        q_table.set(&state, Action::Hit, -30.0).unwrap();
        assert_eq!(q_table.best_action(&state).unwrap(), Action::Stand);
        q_table.set(&state, Action::Hit, -29.5).unwrap();
        assert_eq!(q_table.best_action(&state).unwrap(), Action::Hit);
        assert_eq!(q_table.max_value(&state).unwrap(), -29.5);
    }

    #[test]
    fn update_moves_toward_the_target() {
        let mut q_table = QTable::new();
        let state = State::new(20, 10, false);
        assert_eq!(q_table.update(&state, Action::Hit, LOSS, 0.5).unwrap(), -50.0);
        assert_eq!(q_table.update(&state, Action::Hit, LOSS, 0.5).unwrap(), -75.0);
        assert_eq!(q_table.update(&state, Action::Stand, WIN, 1.0).unwrap(), WIN);
        assert_eq!(q_table.get(&state).unwrap().hit, -75.0);
    }

    #[test]
    fn reachable_states() {
        assert!(!State::new(10, 5, true).is_reachable());
        assert!(!State::new(4, 11, true).is_reachable());
        assert!(State::new(11, 5, true).is_reachable());
        assert!(State::new(4, 5, false).is_reachable());
    }
}
