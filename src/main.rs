//! White Rains entry point
//!
//! Headless runner: plays the game on the logical clock (optionally with the
//! autopilot), printing text frames and a final summary.
//!
//! Usage:
//!   white-rains [--config <file.json>] [--seed <n>] [--max-ms <n>]
//!               [--frame-every <ticks>] [--no-autopilot]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use white_rains::render::{Renderer, hud_text};
use white_rains::sim::GameState;
use white_rains::{AsciiRenderer, Assets, Game, Settings};

/// Logical time advanced per host frame (one 60 Hz frame, rounded)
const FRAME_MS: u64 = 16;

#[derive(Debug, Parser)]
#[command(name = "white-rains")]
#[command(about = "Headless White Rains runner: dodge hazard tiles on a logical clock")]
struct Args {
    /// JSON settings file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this much logical time (ms)
    #[arg(long, default_value_t = 60_000)]
    max_ms: u64,

    /// Print every Nth frame (0 prints only the final frame)
    #[arg(long, default_value_t = 40)]
    frame_every: u64,

    /// Leave the player idle instead of letting the autopilot play
    #[arg(long)]
    no_autopilot: bool,
}

/// Prints every `every`-th frame, plus the final one
struct FramePrinter {
    inner: AsciiRenderer,
    every: u64,
}

impl Renderer for FramePrinter {
    fn render(&mut self, state: &GameState) {
        self.inner.render(state);
        let n = self.inner.frames_drawn();
        if state.is_over() || (self.every > 0 && n.is_multiple_of(self.every)) {
            println!("t={}ms tick={}", state.time_ms, state.time_ticks);
            print!("{}", self.inner.last_frame());
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("White Rains starting...");

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from_path(path)?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let seed = settings.resolve_seed();
    log::info!("Game initialized with seed: {}", seed);

    let assets = Assets::load(&settings.asset_dir);
    let mut renderer = FramePrinter {
        inner: AsciiRenderer::new(assets),
        every: args.frame_every,
    };

    let mut game = Game::new(&settings, seed)?;
    game.set_idle_mode(!args.no_autopilot);

    while !game.is_over() && game.clock_ms() < args.max_ms {
        let step = FRAME_MS.min(args.max_ms - game.clock_ms());
        game.advance(step, &mut renderer);
    }

    let state = game.state();
    println!();
    println!("=== RESULT ===");
    println!("  Seed:     {}", seed);
    println!("  Time:     {}ms ({} ticks)", state.time_ms, state.time_ticks);
    println!("  Status:   {}", hud_text(&state.player));
    println!("  Outcome:  {}", if state.is_over() { "game over" } else { "survived" });

    Ok(())
}
