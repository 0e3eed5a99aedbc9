//! Self-play simulator.
//!
//! Runs a batch of seeded games between computer players and prints how
//! often each seat won.

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use virus_engine::{
    BlankPresenter, DecisionProvider, EngineError, GameBuilder, GameConfig, GameRng, LookaheadConfig, LookaheadStrategy,
    RandomProvider, RuleBasedStrategy, TracingPresenter,
};

/// Seat controllers the simulator can field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Lookahead,
    Rule,
    Random,
}

impl Kind {
    fn provider(self, seed: u64, seat: usize, win_bonus: i32) -> Box<dyn DecisionProvider> {
        match self {
            Kind::Lookahead => Box::new(LookaheadStrategy::new(
                LookaheadConfig::default().with_win_bonus(win_bonus),
            )),
            Kind::Rule => Box::new(RuleBasedStrategy::new()),
            Kind::Random => Box::new(RandomProvider::new(
                GameRng::new(seed).for_context(&format!("seat-{seat}")),
            )),
        }
    }
}

/// Virus! self-play simulator
#[derive(Parser, Debug)]
#[command(name = "virus-sim")]
#[command(author, version, about = "Play Virus! between computer players", long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long = "games", default_value_t = 100)]
    games: u64,

    /// Seed of the first game; game i uses seed + i
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Comma-separated seat controllers, 2 to 6 of them
    #[arg(short = 'p', long = "players", value_delimiter = ',', default_value = "lookahead,rule")]
    players: Vec<Kind>,

    /// Turn ceiling per game
    #[arg(long = "max-turns", default_value_t = 10_000)]
    max_turns: u32,

    /// Score bonus a lookahead player gives a winning simulation
    #[arg(long = "win-bonus", default_value_t = 100)]
    win_bonus: i32,

    /// Log every turn
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<(), EngineError> {
    let args = Args::parse();

    let default_filter = if args.verbose { "virus_engine=info" } else { "virus_engine=warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GameConfig::default().with_max_turns(args.max_turns);
    let mut wins = vec![0u64; args.players.len()];
    let mut total_turns = 0u64;

    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index);

        let mut builder = GameBuilder::new().seed(seed).config(config.clone());
        for (seat, kind) in args.players.iter().enumerate() {
            builder = builder.boxed_seat(format!("{kind:?}-{seat}"), kind.provider(seed, seat, args.win_bonus));
        }
        builder = if args.verbose {
            builder.presenter(TracingPresenter)
        } else {
            builder.presenter(BlankPresenter)
        };

        let summary = builder.build()?.run()?;
        info!(game = game_index, seed, winner = %summary.name, turns = summary.turns, "game finished");

        if let Some(count) = wins.get_mut(summary.winner.index()) {
            *count += 1;
        }
        total_turns += u64::from(summary.turns);
    }

    println!("{} games, seed {}", args.games, args.seed);
    for (seat, (kind, count)) in args.players.iter().zip(&wins).enumerate() {
        let share = if args.games == 0 { 0.0 } else { *count as f64 / args.games as f64 * 100.0 };
        println!("  seat {seat} {kind:?}: {count} wins ({share:.1}%)");
    }
    if args.games > 0 {
        println!("  average turns: {:.1}", total_turns as f64 / args.games as f64);
    }

    Ok(())
}
