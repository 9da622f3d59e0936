use std::io::{self, Write};

use autoplay::{play_game, PlayerKind};
use clap::Parser;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::{Board, RandomSpawner, Tile, DEFAULT_SIZE};

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_SIZE.0 as u8, value_parser = clap::value_parser!(u8).range(1..))]
    height: u8,

    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_SIZE.1 as u8, value_parser = clap::value_parser!(u8).range(1..))]
    width: u8,

    /// Who makes the moves
    #[arg(short, long, value_enum, default_value_t = PlayerKind::Random)]
    player: PlayerKind,

    /// Print a JSON summary of every game to stdout
    #[arg(long, default_value_t = false)]
    json: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

// prints how often each max tile was reached
fn print_max_tile_distribution(max_tiles: &[Tile]) {
    eprintln!("\nMax tile reached in {} games:\n", max_tiles.len());
    eprintln!(" {:>8} | {:>6} | games", "tile", "%");
    eprintln!("----------|--------|------");
    for (tile, count) in max_tiles.iter().counts().into_iter().sorted() {
        let percentage = count as f32 / max_tiles.len() as f32 * 100.0;
        eprintln!(" {:>8} | {:5.1}% | {}", tile, percentage, count);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut player = args.player.build(&mut rng);
    let mut stdout = io::stdout().lock();
    let mut max_tiles = Vec::with_capacity(args.num_games);

    for game_idx in 0..args.num_games {
        let spawner = RandomSpawner::seeded(rng.gen());
        let board = Board::with_spawner(args.height.into(), args.width.into(), spawner);
        let summary = play_game(board, player.as_mut());
        debug!(
            game_idx,
            moves = summary.moves,
            max_tile = summary.max_tile,
            "Game over"
        );

        if args.json {
            serde_json::to_writer(&mut stdout, &summary)?;
            writeln!(stdout)?;
        }
        max_tiles.push(summary.max_tile);
    }
    stdout.flush()?;

    if !max_tiles.is_empty() {
        print_max_tile_distribution(&max_tiles);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for the JSON summaries
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .event_format(format),
        )
        .with(filter)
        .init();
}
