use clap::{Parser, Subcommand};
use log::info;
use puzzle_2048::config::Config;
use puzzle_2048::game::{Game, StepOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "puzzle-2048", about = "Play 2048 in the terminal")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Cmd>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Board size (overrides the config file)
    #[arg(long)]
    size: Option<usize>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Log level, e.g. "info" or "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Read moves from stdin: w/a/s/d or up/left/down/right, r to restart, q to quit
    Play,
    /// Play random valid moves until the game ends
    Auto {
        /// Stop after this many moves
        #[arg(long)]
        steps: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    if let Some(size) = args.size { cfg.size = size; }
    if let Some(seed) = args.seed { cfg.seed = Some(seed); }
    if let Some(level) = &args.log_level { cfg.log_level = level.clone(); }
    cfg.validate()?;

    let _logger = flexi_logger::Logger::try_with_env_or_str(&cfg.log_level)?.start()?;
    info!("starting with {:?}", cfg);

    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let game = Game::new(cfg.size, rng)?;

    match args.cmd.unwrap_or(Cmd::Play) {
        Cmd::Play => play(game),
        Cmd::Auto { steps } => {
            let picker = match cfg.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                None => StdRng::from_entropy(),
            };
            auto(game, picker, steps);
            Ok(())
        }
    }
}

fn play(mut game: Game<StdRng>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    println!("Use WASD keys to move tiles (W: Up, A: Left, S: Down, D: Right). r: new game, q: quit.");
    println!("{}\n", game.board());
    for line in stdin.lock().lines() {
        let line = line?;
        let key = line.trim();
        match key.to_ascii_lowercase().as_str() {
            "q" | "quit" => break,
            "r" | "reset" => {
                game.reset();
                println!("{}\n", game.board());
            }
            _ => match game.press(key) {
                None => println!("Unknown key {key:?}."),
                Some(StepOutcome::Rejected) if game.is_over() => println!("Game over. r to play again, q to quit."),
                Some(StepOutcome::Rejected) => println!("Nothing moves that way."),
                Some(StepOutcome::Moved) => println!("{}\n", game.board()),
                Some(StepOutcome::GameOver) => {
                    println!("{}\n", game.board());
                    println!("Game Over! Moves: {}. r to play again, q to quit.", game.moves());
                }
            },
        }
        out.flush()?;
    }
    Ok(())
}

fn auto(mut game: Game<StdRng>, mut picker: StdRng, steps: Option<u64>) {
    println!("{}\n", game.board());
    while !game.is_over() {
        if let Some(limit) = steps { if game.moves() >= limit { break; } }
        let moves = game.valid_moves();
        if moves.is_empty() { break; }
        let dir = moves[picker.gen_range(0..moves.len())];
        game.step(dir);
    }
    println!("{}\n", game.board());
    println!(
        "Moves made: {}, Highest tile: {}, Game over: {}",
        game.moves(),
        game.board().highest_tile(),
        game.is_over()
    );
}
