mod training;

use anyhow::Context;
use blackjack_rl_drivers::parse_config_from_file;
use clap::Parser;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_rl.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = CommandLineArgs::parse();
    if args.config == DEFAULT_CONFIG_PATH {
        let home_dir = home::home_dir().context("cannot find home directory")?;
        let config_file_path = home_dir.join(".blackjack_rl.yml");
        if !config_file_path.is_file() {
            anyhow::bail!("config file {} does not exist", config_file_path.display());
        }
        args.config = config_file_path.to_string_lossy().into_owned();
    }
    let args = args;

    let config = parse_config_from_file(&args.config)?;
    log::debug!("{:#?}", config);
    training::train_from_config(config)
}
