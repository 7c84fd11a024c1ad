use std::collections::BTreeMap;

use crate::{
    q_table::{MAX_DEALER_UP_CARD, MAX_PLAYER_TOTAL, MIN_DEALER_UP_CARD},
    Action, Error, QTable, State,
};

/// Lowest player total shown in the charts.
pub const MIN_CHART_TOTAL: u8 = 13;

const CHART_ROWS: usize = (MAX_PLAYER_TOTAL - MIN_CHART_TOTAL + 1) as usize;
const CHART_COLS: usize = (MAX_DEALER_UP_CARD - MIN_DEALER_UP_CARD + 1) as usize;

/// Greedy decision for every reachable state of a trained [`QTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    actions: BTreeMap<State, Action>,
}

impl Policy {
    /// Takes the best action of every state, skipping states no hand can reach.
    pub fn extract(q_table: &QTable) -> Result<Policy, Error> {
        let mut actions = BTreeMap::new();
        for state in QTable::states().filter(State::is_reachable) {
            actions.insert(state, q_table.best_action(&state)?);
        }
        Ok(Policy { actions })
    }

    pub fn get(&self, state: &State) -> Option<Action> {
        self.actions.get(state).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&State, &Action)> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Lays the policy out as one chart per usable-ace flag.
    pub fn charts(&self) -> PolicyCharts {
        let mut charts = PolicyCharts {
            hard_chart: [[Action::Stand; CHART_COLS]; CHART_ROWS],
            soft_chart: [[Action::Stand; CHART_COLS]; CHART_ROWS],
        };
        for (state, action) in self.iter() {
            if state.player_total < MIN_CHART_TOTAL {
                continue;
            }
            let row = (state.player_total - MIN_CHART_TOTAL) as usize;
            let col = (state.dealer_up_card - MIN_DEALER_UP_CARD) as usize;
            if state.usable_ace {
                charts.soft_chart[row][col] = *action;
            } else {
                charts.hard_chart[row][col] = *action;
            }
        }
        charts
    }
}

/// Decision charts indexed by `[player_total - 13][dealer_up_card - 2]`, for
/// player totals 13 to 21 and dealer up cards 2 to 11 (Ace).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyCharts {
    /// Hands without a usable Ace.
    pub hard_chart: [[Action; CHART_COLS]; CHART_ROWS],
    /// Hands with an Ace counted as 11.
    pub soft_chart: [[Action; CHART_COLS]; CHART_ROWS],
}

impl PolicyCharts {
    pub fn get(&self, usable_ace: bool, player_total: u8, dealer_up_card: u8) -> Option<Action> {
        if !(MIN_CHART_TOTAL..=MAX_PLAYER_TOTAL).contains(&player_total)
            || !(MIN_DEALER_UP_CARD..=MAX_DEALER_UP_CARD).contains(&dealer_up_card)
        {
            return None;
        }
        let row = (player_total - MIN_CHART_TOTAL) as usize;
        let col = (dealer_up_card - MIN_DEALER_UP_CARD) as usize;
        let chart = if usable_ace {
            &self.soft_chart
        } else {
            &self.hard_chart
        };
        Some(chart[row][col])
    }

    pub fn hit_count(&self, usable_ace: bool) -> usize {
        let chart = if usable_ace {
            &self.soft_chart
        } else {
            &self.hard_chart
        };
        chart
            .iter()
            .flatten()
            .filter(|action| **action == Action::Hit)
            .count()
    }
}
