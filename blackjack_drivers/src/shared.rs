use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub agent: ConfigAgent,
    #[serde(default)]
    pub rule: ConfigRule,
    #[serde(default)]
    pub trainer: ConfigTrainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigAgent {
    pub learning_rate: f64,
    pub exploration_rate: f64,
    pub iterations: u64,
    /// Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TryInto<blackjack_rl::AgentConfig> for ConfigAgent {
    type Error = blackjack_rl::Error;

    fn try_into(self) -> Result<blackjack_rl::AgentConfig, Self::Error> {
        blackjack_rl::AgentConfig::new(self.learning_rate, self.exploration_rate, self.iterations)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRule {
    #[serde(default)]
    pub dealer_hit_on_soft17: bool,
}

impl From<ConfigRule> for blackjack_rl::Rule {
    fn from(rule: ConfigRule) -> Self {
        blackjack_rl::Rule {
            dealer_hit_on_soft17: rule.dealer_hit_on_soft17,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigTrainer {
    pub episodes_in_period: u64,
}

impl Default for ConfigTrainer {
    fn default() -> Self {
        ConfigTrainer {
            episodes_in_period: 10000,
        }
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> anyhow::Result<Config> {
    let file_content = fs::read_to_string(filename)
        .with_context(|| format!("cannot read config file {}", filename))?;
    parse_config(&file_content).with_context(|| format!("cannot parse config file {}", filename))
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    if config.trainer.episodes_in_period == 0 {
        anyhow::bail!("trainer.episodes_in_period must be positive");
    }
    Ok(config)
}
