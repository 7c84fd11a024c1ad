use crate::{
    check_winner,
    simulation::{dealer::dealer_plays, deck::Deck, hand::Hand},
    Action, AgentConfig, Error, Outcome, Policy, QTable, Rule, State, LOSS,
};
use blackjack_rl_macros::allowed_phase;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    DealInitialCards,
    PlayerDecision,
    DealerPlayAndScore,
}

/// Trains the agent by playing hands against the dealer and updating the
/// Q-table after every decision.
///
/// A full run is [`Trainer::train`]. The episode steps are public as well and
/// follow the phases of [`EpisodePhase`]; calling a step out of phase fails
/// with [`Error::InvalidPhase`].
pub struct Trainer<R: Rng> {
    config: AgentConfig,
    rule: Rule,
    deck: Deck,
    rng: R,
    q_table: QTable,

    // Episode state
    current_phase: EpisodePhase,
    player_hand: Hand,
    dealer_hand: Hand,
    state: State,
}

impl<R: Rng> Trainer<R> {
    pub fn new(config: AgentConfig, rule: Rule, deck: Deck, rng: R) -> Self {
        Self {
            config,
            rule,
            deck,
            rng,
            q_table: QTable::new(),
            current_phase: EpisodePhase::DealInitialCards,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            state: State::new(0, 0, false),
        }
    }

    /// Plays the configured number of episodes and extracts the greedy policy.
    pub fn train(&mut self) -> Result<Policy, Error> {
        self.train_with_handler(&mut ())
    }

    /// Same as [`Trainer::train`], reporting every episode to `handler`.
    pub fn train_with_handler<H: TrainingEventHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<Policy, Error> {
        log::info!(
            "training for {} episodes (learning rate {}, exploration rate {})",
            self.config.iterations(),
            self.config.learning_rate(),
            self.config.exploration_rate()
        );

        for episode in 0..self.config.iterations() {
            handler.on_episode_begin(episode);
            let state = self.deal_initial_cards()?;
            handler.on_deal_cards(&state);

            let outcome = self.loop_make_decisions(handler)?;
            log::debug!(
                "episode {}: {} with {} against {}",
                episode,
                outcome,
                self.player_hand.get_total(),
                self.dealer_hand.get_total()
            );
            handler.on_summary_episode(outcome, &self.player_hand, &self.dealer_hand);
        }

        log::info!("training finished, extracting policy");
        Policy::extract(&self.q_table)
    }

    /// Replenishes the deck, then deals two cards to the player and two to the
    /// dealer. Returns the initial state.
    #[allowed_phase(DealInitialCards)]
    pub fn deal_initial_cards(&mut self) -> Result<State, Error> {
        self.deck.replenish();
        self.deal()
    }

    /// Like [`Trainer::deal_initial_cards`], but the given blackjack values are
    /// drawn first: two for the player, two for the dealer, then any hits.
    #[allowed_phase(DealInitialCards)]
    pub fn deal_initial_cards_with_firsts(&mut self, firsts: &[u8]) -> Result<State, Error> {
        self.deck.replenish_with_firsts(firsts)?;
        self.deal()
    }

    /// Epsilon-greedy choice for the current state.
    #[allowed_phase(PlayerDecision)]
    pub fn select_action(&mut self) -> Result<Action, Error> {
        if self.rng.gen_bool(self.config.exploration_rate()) {
            if self.rng.gen_bool(0.5) {
                Ok(Action::Hit)
            } else {
                Ok(Action::Stand)
            }
        } else {
            self.q_table.best_action(&self.state)
        }
    }

    /// Draws a card and updates Q(state, Hit) toward the best value of the next
    /// state, or toward a loss on a bust. Returns true if the player busts, which
    /// ends the episode.
    #[allowed_phase(PlayerDecision)]
    pub fn play_hit(&mut self) -> Result<bool, Error> {
        let card = self.deck.draw_card(&mut self.rng)?;
        self.player_hand.receive_card(card);
        let player = self.player_hand.get_state();

        let bust = player.bust();
        let next_state = State::new(player.total, self.state.dealer_up_card, player.usable_ace);
        let target = if bust {
            LOSS
        } else {
            self.q_table.max_value(&next_state)?
        };
        let value = self
            .q_table
            .update(&self.state, Action::Hit, target, self.config.learning_rate())?;
        log::trace!("{:?} hit {} -> {:.3}", self.state, card, value);

        if bust {
            self.current_phase = EpisodePhase::DealInitialCards;
        } else {
            self.state = next_state;
        }
        Ok(bust)
    }

    #[allowed_phase(PlayerDecision)]
    pub fn play_stand(&mut self) -> Result<(), Error> {
        self.current_phase = EpisodePhase::DealerPlayAndScore;
        Ok(())
    }

    /// Plays the dealer's hand, scores the episode and updates Q(state, Stand)
    /// toward the reward.
    #[allowed_phase(DealerPlayAndScore)]
    pub fn dealer_plays_and_score(&mut self) -> Result<Outcome, Error> {
        let dealer = dealer_plays(
            &self.rule,
            &mut self.dealer_hand,
            &mut self.deck,
            &mut self.rng,
        )?;
        let outcome = check_winner(
            self.player_hand.get_total(),
            self.player_hand.len(),
            dealer.total,
            self.dealer_hand.len(),
        );
        let value = self.q_table.update(
            &self.state,
            Action::Stand,
            outcome.reward(),
            self.config.learning_rate(),
        )?;
        log::trace!("{:?} stand, {} -> {:.3}", self.state, outcome, value);

        self.current_phase = EpisodePhase::DealInitialCards;
        Ok(outcome)
    }

    pub fn get_q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn get_state(&self) -> State {
        self.state
    }

    pub fn get_current_phase(&self) -> EpisodePhase {
        self.current_phase
    }

    pub fn get_player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn get_dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn get_deck(&self) -> &Deck {
        &self.deck
    }

    fn deal(&mut self) -> Result<State, Error> {
        self.player_hand.clear();
        self.dealer_hand.clear();
        for card in self.deck.draw_cards(2, &mut self.rng)? {
            self.player_hand.receive_card(card);
        }
        for card in self.deck.draw_cards(2, &mut self.rng)? {
            self.dealer_hand.receive_card(card);
        }

        let player = self.player_hand.get_state();
        let dealer_up_card = self.dealer_hand.get_cards()[0].up_card_value();
        self.state = State::new(player.total, dealer_up_card, player.usable_ace);
        self.current_phase = EpisodePhase::PlayerDecision;
        Ok(self.state)
    }

    fn loop_make_decisions<H: TrainingEventHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<Outcome, Error> {
        loop {
            let action = self.select_action()?;
            handler.on_make_decision(&self.state, action);
            match action {
                Action::Stand => {
                    self.play_stand()?;
                    return self.dealer_plays_and_score();
                }
                Action::Hit => {
                    if self.play_hit()? {
                        handler.on_player_bust(&self.player_hand);
                        return Ok(Outcome::Loss);
                    }
                }
            }
        }
    }
}

/// Receives the events of a training run. Every method does nothing by default.
pub trait TrainingEventHandler {
    fn on_episode_begin(&mut self, _episode: u64) {}
    fn on_deal_cards(&mut self, _state: &State) {}
    fn on_make_decision(&mut self, _state: &State, _action: Action) {}
    fn on_player_bust(&mut self, _player_hand: &Hand) {}
    fn on_summary_episode(&mut self, _outcome: Outcome, _player_hand: &Hand, _dealer_hand: &Hand) {}
}

impl TrainingEventHandler for () {}
