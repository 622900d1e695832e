/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use config::{GameConfig, GeneralConfig};
use sim::command::Command;
use sim::event::GameEvent;
use sim::step;
use sim::world::WorldState;
use ui::input::KeySession;
use ui::renderer::Renderer;

fn main() {
    let config = GameConfig::load();

    if let Err(e) = init_logging(&config.general) {
        eprintln!("Warning: {e:#}");
    }

    let mut world = match WorldState::new(&config) {
        Ok(world) => world,
        Err(e) => {
            tracing::error!("sprite setup failed: {e}");
            eprintln!("Sprite setup failed: {e}");
            std::process::exit(1);
        }
    };

    let mut renderer = Renderer::new(config.render.color);

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        std::process::exit(1);
    }

    tracing::info!(seed = ?config.general.seed, clip = ?config.clip, "game started");
    let result = play(&mut world, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        tracing::error!("game error: {e:#}");
        eprintln!("Game error: {e:#}");
        std::process::exit(1);
    }

    tracing::info!(tick = world.tick, score = world.score, "game over");
    println!();
    println!("Thanks for playing Rock Runner!");
    println!("Ticks: {}  Score: {}", world.tick, world.score);
}

/// Install a file-backed subscriber when `log_file` is set.
/// Without one, tracing macros are no-ops and the screen stays clean.
fn init_logging(general: &GeneralConfig) -> anyhow::Result<()> {
    let Some(path) = &general.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&general.log_level)
        .with_context(|| format!("bad log_level {:?}", general.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Holds raw mode for the duration of the loop.
fn play(world: &mut WorldState, renderer: &mut Renderer) -> anyhow::Result<()> {
    let mut keys = KeySession::acquire().context("could not enter raw mode")?;
    game_loop(world, renderer, &mut keys)
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    keys: &mut KeySession,
) -> anyhow::Result<()> {
    let mut pending: Option<Command> = None;

    loop {
        step::compose(world);
        renderer.render(&world.grid).context("render failed")?;

        if let Some(command) = pending.take() {
            if let Some(event) = step::apply(world, command) {
                if event == GameEvent::ExitRequested {
                    tracing::info!(tick = world.tick, "exit requested");
                    break;
                }
                process_events(&[event]);
            }
        }

        let events = step::resolve_collisions(world);
        process_events(&events);

        // the wait for the next key is also the frame delay
        pending = keys
            .next_token(world.moment)
            .context("keyboard read failed")?
            .and_then(Command::from_token);
    }

    Ok(())
}

fn process_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::RockHit { x } => tracing::info!(x, "rock hit"),
            GameEvent::LightningStrike { x, y } => tracing::info!(x, y, "lightning strike"),
            GameEvent::PlayerDied { tick } => tracing::warn!(tick, "runner down"),
            GameEvent::Respawned => tracing::info!("respawned"),
            GameEvent::DelayChanged { ms } => tracing::debug!(ms, "tick delay changed"),
            GameEvent::ExitRequested => {}
        }
    }
}
