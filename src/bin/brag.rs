//! brag-bonus CLI: score hands, print rule texts and generate example hands.

use brag_bonus::cards::{parse_cards, Card};
use brag_bonus::game_mode::GameMode;
use brag_bonus::hand::Hand;
use brag_bonus::rules::DOC_TRUMP;
use brag_bonus::selector::RuleCatalog;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brag-bonus", version)]
#[command(about = "Bonus-hand rules for Brag style games with trump wildcards")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a hand and print the winning rule
    Evaluate {
        /// Cards separated by spaces, e.g. "A♠ K♠ Q♠" or "As Ks Qs"
        cards: String,

        /// Trump card for the round
        #[arg(long)]
        trump: Option<Card>,

        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Print the rule texts of every enabled rule
    Rules {
        /// Print the machine-oriented texts instead of the player texts
        #[arg(long)]
        llm: bool,

        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Generate one example hand per enabled rule
    Examples {
        /// Seed for the example generator
        #[arg(long, default_value_t = brag_bonus::rules::EXAMPLE_SEED)]
        seed: u64,

        #[command(flatten)]
        mode: ModeArgs,
    },
}

#[derive(Args)]
struct ModeArgs {
    /// Game mode JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cards per hand (overrides the config)
    #[arg(long)]
    cards: Option<usize>,

    /// Play with a trump card (overrides the config)
    #[arg(long)]
    use_trump: bool,
}

impl ModeArgs {
    /// Game mode from the config file (or defaults) with flag overrides applied.
    fn load(&self, dealt: Option<usize>) -> Result<GameMode, Box<dyn std::error::Error>> {
        let mut mode = match &self.config {
            Some(path) => GameMode::from_json_file(path)?,
            None => GameMode::default(),
        };
        // Without a config file the hand size follows the dealt hand.
        if let Some(n) = self.cards.or_else(|| dealt.filter(|_| self.config.is_none())) {
            mode.number_of_cards = n;
        }
        if self.use_trump {
            mode.use_trump = true;
        }
        mode.validate()?;
        debug!(cards = mode.number_of_cards, use_trump = mode.use_trump, "game mode loaded");
        Ok(mode)
    }
}

/// The trump passed to the catalog. A trump given to a plain game mode
/// would be ignored by every rule, so it is dropped here with a warning.
fn effective_trump(mode: &GameMode, trump: Option<Card>) -> Option<Card> {
    match trump {
        Some(card) if !mode.use_trump => {
            warn!(trump = %card, "trump ignored: game mode does not use trump, pass --use-trump");
            None
        }
        other => other,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Command::Evaluate { cards, trump, mode } => {
            let hand = Hand::try_new(parse_cards(&cards)?)?;
            let mode = mode.load(Some(hand.len()))?;
            let catalog = RuleCatalog::new(&mode)?;
            let trump = effective_trump(&mode, trump);
            info!(hand = %hand, rules = catalog.len(), "evaluating");
            match catalog.select(&hand, trump) {
                Some(detail) => {
                    println!("{}: {}", detail.rule_name, detail.total_bonus());
                    println!("  {}", detail.calculation);
                    for line in &detail.descriptions {
                        println!("  - {line}");
                    }
                }
                None => println!("no bonus for {hand}"),
            }
        }
        Command::Rules { llm, mode } => {
            let catalog = RuleCatalog::new(&mode.load(None)?)?;
            for (_, text) in catalog.rules_texts() {
                println!("{}", if llm { &text.llm } else { &text.player });
            }
        }
        Command::Examples { seed, mode } => {
            let mode = mode.load(None)?;
            let catalog = RuleCatalog::new(&mode)?;
            let trump = mode.use_trump.then_some(DOC_TRUMP);
            if let Some(t) = trump {
                println!("trump: {t}");
            }
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for (kind, example) in catalog.examples(&mut rng, trump) {
                match example.and_then(|hand| catalog.select(&hand, trump).map(|d| (hand, d))) {
                    Some((hand, detail)) => {
                        println!("{kind:<26} {hand}  => {}", detail.total_bonus());
                    }
                    None => println!("{kind:<26} (no example)"),
                }
            }
        }
    }
    Ok(())
}
