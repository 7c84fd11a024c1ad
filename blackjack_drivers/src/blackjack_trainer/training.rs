use self::private::Statistics;
use blackjack_rl::{Deck, Hand, Outcome, Trainer, TrainingEventHandler};
use blackjack_rl_drivers::Config;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod private {
    use blackjack_rl::Outcome;

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        wins: u64,
        draws: u64,
        losses: u64,
        busts: u64,

        last_reward_sum: f64,
        reward_sum: f64,
        last_episodes: u64,
    }

    impl Statistics {
        pub fn record(&mut self, outcome: Outcome) {
            match outcome {
                Outcome::Win => self.wins += 1,
                Outcome::Draw => self.draws += 1,
                Outcome::Loss => self.losses += 1,
            }
            self.reward_sum += outcome.reward();
        }

        pub fn record_bust(&mut self) {
            self.busts += 1;
        }

        pub fn get_episodes(&self) -> u64 {
            self.wins + self.draws + self.losses
        }

        pub fn get_rate(&self, count: u64) -> f64 {
            count as f64 / self.get_episodes().max(1) as f64
        }

        pub fn get_wins(&self) -> u64 {
            self.wins
        }

        pub fn get_draws(&self) -> u64 {
            self.draws
        }

        pub fn get_losses(&self) -> u64 {
            self.losses
        }

        pub fn get_busts(&self) -> u64 {
            self.busts
        }

        /// Mean reward since the previous call.
        pub fn get_delta_mean_reward(&mut self) -> f64 {
            let episodes = self.get_episodes() - self.last_episodes;
            let reward = self.reward_sum - self.last_reward_sum;
            self.last_episodes = self.get_episodes();
            self.last_reward_sum = self.reward_sum;
            reward / episodes.max(1) as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Handler {
    episodes_in_period: u64,
    stat: Statistics,
}

impl TrainingEventHandler for Handler {
    fn on_player_bust(&mut self, _: &Hand) {
        self.stat.record_bust();
    }

    fn on_summary_episode(&mut self, outcome: Outcome, _: &Hand, _: &Hand) {
        self.stat.record(outcome);
        if self.stat.get_episodes() % self.episodes_in_period != 0 {
            return;
        }

        log::info!(
            "Episode {}: win {:.2}%, draw {:.2}%, loss {:.2}% (bust {:.2}%). Mean reward of period: {:.3}.",
            self.stat.get_episodes(),
            self.stat.get_rate(self.stat.get_wins()) * 100.0,
            self.stat.get_rate(self.stat.get_draws()) * 100.0,
            self.stat.get_rate(self.stat.get_losses()) * 100.0,
            self.stat.get_rate(self.stat.get_busts()) * 100.0,
            self.stat.get_delta_mean_reward(),
        );
    }
}

pub fn train_from_config(config: Config) -> anyhow::Result<()> {
    let agent_config: blackjack_rl::AgentConfig = config.agent.clone().try_into()?;
    let rule: blackjack_rl::Rule = config.rule.into();
    let rng = match config.agent.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut handler = Handler {
        episodes_in_period: config.trainer.episodes_in_period,
        ..Default::default()
    };
    let mut trainer = Trainer::new(agent_config, rule, Deck::new(), rng);
    let policy = trainer.train_with_handler(&mut handler)?;

    let charts = policy.charts();
    log::info!(
        "Learned {} decisions. Hit cells: {} without usable ace, {} with usable ace.",
        policy.len(),
        charts.hit_count(false),
        charts.hit_count(true),
    );
    Ok(())
}
