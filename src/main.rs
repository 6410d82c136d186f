use std::thread;

use anyhow::{Context, Result};
use quadlife::{GRID_SIZE, GameOfLife, Grid, seed};
use rand::{SeedableRng, rngs::StdRng};

mod console;
mod logging;
mod options;
mod render;
mod stats;
mod window;

use stats::Stats;
use window::RunLimits;

fn args_to_game(args: &options::Args) -> GameOfLife {
    let mut grid = Grid::new(GRID_SIZE);
    let mut rng = match args.rng_seed() {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_os_rng(),
    };
    seed::seed(&mut grid, args.seed_mode(), &mut rng);
    GameOfLife::new(grid, args.update_mode())
}

fn run_console(mut game: GameOfLife, limits: RunLimits) -> Result<()> {
    let mut console = console::ConsoleRender::new().context("failed to enter raw mode")?;
    let mut stats = Stats::new(game.alive_count());

    'generations: while !limits.is_done(&game) {
        while let Some(cmd) = console.poll_events()? {
            if let console::ConsoleCommand::Exit = cmd {
                break 'generations;
            }
        }
        console.render(game.grid())?;

        // the log would tear the raw-mode screen, report in the footer instead
        if stats.has_report() {
            console.set_report(stats.report());
        }

        game.next_generation();
        stats.record(game.alive_count());
        if let Some(time) = limits.sleep {
            thread::sleep(time);
        }
    }
    drop(console);

    log::info!(
        "stopped after {} generations, alive: {}",
        game.generation(),
        game.alive_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    logging::init_logging(logging::LoggingConfig {
        filter: args.log_filter(),
        ..Default::default()
    });

    let game = args_to_game(&args);
    log::info!(
        "{0}x{0} grid, {1:?} update, {2:?} seed, alive: {3}",
        GRID_SIZE,
        game.mode(),
        args.seed_mode(),
        game.alive_count()
    );

    let limits = RunLimits {
        generations: args.generations(),
        sleep: args.sleep(),
    };

    if args.console() {
        run_console(game, limits)
    } else {
        window::run(window::WindowConfig::default(), game, limits)
    }
}
