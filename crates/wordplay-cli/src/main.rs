//! CLI entry point for the wordplay session driver.
//!
//! Results are written to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use wordplay_core::{GameKind, WordplayConfig};

use wordplay_cli::play::{parse_options, parse_outcomes, parse_policy, play_once};
use wordplay_cli::script::{parse_script, run_script};

#[derive(Parser)]
#[command(name = "wordplay")]
#[command(about = "Drive Wordplay mini-game sessions from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: wordplay).
    #[arg(short, long, default_value = "wordplay", global = true)]
    config: String,

    /// Override the conflict policy: supersede, reject.
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play one session from an outcome string and print its statistics.
    Run {
        /// Mini-game kind (e.g. match, spell, listen).
        #[arg(short, long, default_value = "match")]
        kind: String,

        /// Round outcomes: '+' correct, '-' missed (e.g. "+++-++").
        #[arg(short, long, default_value = "")]
        outcomes: String,

        /// Game option as key=value; repeatable.
        #[arg(long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,
    },
    /// Run a JSON step script read from stdin.
    Script,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let mut config = WordplayConfig::load(&cli.config)?;
    if let Some(policy) = cli.policy.as_deref() {
        config.session.conflict_policy = parse_policy(policy)?;
    }
    tracing::debug!(policy = ?config.session.conflict_policy, "Configuration loaded");

    match cli.command {
        Command::Run {
            ref kind,
            ref outcomes,
            ref options,
        } => {
            let options = parse_options(options)?;
            let outcomes = parse_outcomes(outcomes)?;
            let report = play_once(&config, GameKind::new(kind.as_str()), &options, &outcomes)?;
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::Script => {
            let input = std::io::read_to_string(std::io::stdin())?;
            let script = parse_script(&input)?;
            let report = run_script(&config, &script);
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
