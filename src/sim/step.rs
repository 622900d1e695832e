/// The tick pipeline, split at the points where the loop does IO.
///
/// Processing order per tick:
///   1. `compose`: clear grid, draw runner → cloud → rocks, then the HUD
///   2. (loop): flush the grid to the terminal
///   3. `apply`: last tick's command, if any
///   4. `resolve_collisions`: rock hits, lightning, then the death check
///   5. (loop): wait for the next key; the wait is the frame delay

use crate::domain::entity::Entity;
use crate::domain::grid::Tint;
use super::command::Command;
use super::event::GameEvent;
use super::world::WorldState;

const HEALTH_COLUMN: i32 = 2;
const OXYGEN_COLUMN: i32 = 4;
const WATER_COLUMN: i32 = 6;
const BAR_TOP: i32 = 1;
const STATUS_COLUMN: i32 = 8;

// ══════════════════════════════════════════════════════════════
// Compose
// ══════════════════════════════════════════════════════════════

pub fn compose(world: &mut WorldState) {
    world.tick += 1;
    if !world.man.dead() {
        world.score += 1;
    }

    world.grid.clear();
    world.man.draw(&mut world.grid);
    world.cloud.draw(&mut world.grid);
    for rock in &mut world.rocks {
        rock.draw(&mut world.grid);
    }
    draw_hud(world);
}

fn draw_hud(world: &mut WorldState) {
    let man = &world.man;
    let grid = &mut world.grid;

    grid.vertical_run(HEALTH_COLUMN, BAR_TOP, man.health, '♥', Some(Tint::Red));
    grid.vertical_run(OXYGEN_COLUMN, BAR_TOP, man.oxygen, 'o', Some(Tint::Blue));
    grid.vertical_run(WATER_COLUMN, BAR_TOP, man.water, '~', Some(Tint::Cyan));

    let status = format!(
        "tick {:<6} score {:<6} hp {} o2 {} water {:<3} delay {}ms",
        world.tick,
        world.score,
        man.health,
        man.oxygen,
        man.water,
        world.moment.as_millis(),
    );
    grid.text(&status, STATUS_COLUMN, 0);

    if man.dead() {
        grid.text("DOWN!  [z] respawn  [e] exit", STATUS_COLUMN, BAR_TOP);
    } else if world.cloud.lightning().lit() {
        grid.text("ZAP!", STATUS_COLUMN, BAR_TOP);
    }
}

// ══════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════

pub fn apply(world: &mut WorldState, command: Command) -> Option<GameEvent> {
    match command {
        Command::Jump => world.man.jump(),
        Command::Left => world.man.left(),
        Command::Right => world.man.right(),
        Command::ResetVertical => world.man.reset_vertical(),
        Command::Crouch => world.man.crouch(),
        Command::Respawn => {
            world.man.respawn();
            return Some(GameEvent::Respawned);
        }
        Command::SlowDown => {
            world.moment += world.moment_step;
            return Some(delay_changed(world));
        }
        Command::SpeedUp => {
            world.moment = world
                .moment
                .saturating_sub(world.moment_step)
                .max(world.min_moment);
            return Some(delay_changed(world));
        }
        Command::Exit => return Some(GameEvent::ExitRequested),
    }
    None
}

fn delay_changed(world: &WorldState) -> GameEvent {
    GameEvent::DelayChanged { ms: world.moment.as_millis() as u64 }
}

// ══════════════════════════════════════════════════════════════
// Collisions
// ══════════════════════════════════════════════════════════════

pub fn resolve_collisions(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let rows = world.rows();

    for rock in &mut world.rocks {
        if rock.hit(&mut world.man, rows) {
            events.push(GameEvent::RockHit { x: rock.x() });
        }
    }

    if world.cloud.hit(&mut world.man, rows) {
        events.push(GameEvent::LightningStrike { x: world.man.x, y: world.man.y });
    }

    let dead = world.man.dead();
    if dead && !world.down {
        events.push(GameEvent::PlayerDied { tick: world.tick });
    }
    world.down = dead;

    events
}
