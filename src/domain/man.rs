/// The runner: posture state machine plus health, oxygen and water.
///
/// `(x, y)` is the head anchor. The figure is drawn one row below it,
/// five rows tall, centered on `x`.
///
/// Timers all count ticks, one per `draw()`:
///   - jump phase: 0..JUMP_DURATION, triangular path peaking at JUMP_HEIGHT
///   - submersion: oxygen drops once every SUBMERGE_TICKS below the grid
///   - water: drops once every WATER_TICKS, always

use super::entity::Entity;
use super::grid::{Grid, Tint};
use super::sprite::{ClipMode, Sprite};
use crate::error::Result;

pub const HEALTH: i32 = 5;
pub const OXYGEN: i32 = 7;
pub const WATER: i32 = 20;

pub const JUMP_DURATION: i32 = 10;
pub const JUMP_HEIGHT: i32 = 5;
pub const CROUCH_OFFSET: i32 = 1;
pub const SUBMERGE_TICKS: u32 = 30;
pub const WATER_TICKS: u32 = 20;

/// Rows above the bottom edge where a dead runner lies.
const COLLAPSED_ROW: i32 = 3;

const RUN_FRAMES: &str = r"
$  O  $  O  $  O  $
$/^|^\$/^|^\$/^|^\$
$  @  $  @  $  @  $
$ / \ $  |  $  |  $
$/   /$  /  $ / / $
";

const JUMP_FRAMES: &str = r"
$  O  $
$ \|/ $
$  @  $
$  |\ $
$  // $
";

const CROUCH_FRAMES: &str = r"
$  O  $  O  $
$/^|^\$/^|^\$
$  @  $  @  $
$ /\_ $ _/\ $
";

const COLLAPSED_FRAMES: &str = r"
$  O  $
$/^|^\$
$     $
$     $
$     $
";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Posture {
    Running,
    Jumping,
    Crouching,
}

#[derive(Clone, Debug)]
pub struct Man {
    pub x: i32,
    pub y: i32,
    head_init: i32,

    pub health: i32,
    pub oxygen: i32,
    pub water: i32,
    health_init: i32,
    oxygen_init: i32,
    water_init: i32,

    under: u32,
    water_timer: u32,

    jump_position: i32,
    in_jump: bool,
    in_sit_down: bool,

    run: Sprite,
    jump: Sprite,
    crouch: Sprite,
    collapsed: Sprite,
}

impl Man {
    pub fn new(x: i32, y: i32, clip: ClipMode) -> Result<Self> {
        let sprite = |pattern: &str| -> Result<Sprite> {
            Ok(Sprite::from_pattern(pattern, '$', x, y + 1, false)?
                .with_tint(Tint::Green)
                .with_clip(clip))
        };

        Ok(Man {
            x,
            y,
            head_init: y,
            health: HEALTH,
            oxygen: OXYGEN,
            water: WATER,
            health_init: HEALTH,
            oxygen_init: OXYGEN,
            water_init: WATER,
            under: 0,
            water_timer: 0,
            jump_position: 0,
            in_jump: false,
            in_sit_down: false,
            run: sprite(RUN_FRAMES)?,
            jump: sprite(JUMP_FRAMES)?,
            crouch: sprite(CROUCH_FRAMES)?,
            collapsed: sprite(COLLAPSED_FRAMES)?,
        })
    }

    // ── Queries ──

    pub fn dead(&self) -> bool {
        self.health <= 0
    }

    pub fn posture(&self) -> Posture {
        if self.in_jump {
            Posture::Jumping
        } else if self.in_sit_down {
            Posture::Crouching
        } else {
            Posture::Running
        }
    }

    // ── Commands ──

    pub fn right(&mut self) {
        self.x += 1;
    }

    pub fn left(&mut self) {
        self.x -= 1;
    }

    /// Start a jump. No effect mid-air; a crouch is cancelled first.
    pub fn jump(&mut self) {
        if self.in_jump {
            return;
        }
        if self.in_sit_down {
            self.in_sit_down = false;
            self.y -= CROUCH_OFFSET;
        }
        self.in_jump = true;
    }

    /// Toggle crouch. Ignored mid-air.
    pub fn crouch(&mut self) {
        if self.in_jump {
            return;
        }
        self.in_sit_down = !self.in_sit_down;
        self.y = if self.in_sit_down {
            self.head_init + CROUCH_OFFSET
        } else {
            self.head_init
        };
    }

    /// Back to standing height, dropping any jump or crouch.
    pub fn reset_vertical(&mut self) {
        self.y = self.head_init;
        self.in_jump = false;
        self.in_sit_down = false;
        self.jump_position = 0;
    }

    /// Refill the stats. Position is kept.
    pub fn respawn(&mut self) {
        self.health = self.health_init;
        self.oxygen = self.oxygen_init;
        self.water = self.water_init;
    }

    /// Take damage; health never drops below zero.
    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    // ── Per-tick updates ──

    /// Advance every timer by one tick. `rows` is the grid height.
    pub fn tick(&mut self, rows: i32) {
        self.do_jump();
        self.check_oxygen(rows);
        self.drain_water();
    }

    pub fn do_jump(&mut self) {
        if !self.in_jump {
            self.jump_position = 0;
            return;
        }
        self.jump_position += 1;

        if self.jump_position == JUMP_DURATION {
            self.in_jump = false;
            self.jump_position = 0;
        } else if self.jump_position == JUMP_HEIGHT {
            // apex
        } else if self.jump_position > JUMP_DURATION - JUMP_HEIGHT {
            self.y += 1;
        } else if self.jump_position < JUMP_HEIGHT {
            self.y -= 1;
        }
    }

    fn check_oxygen(&mut self, rows: i32) {
        if self.y > rows {
            self.under += 1;
            if self.under >= SUBMERGE_TICKS {
                self.under = 0;
                self.oxygen -= 1;
            }
            if self.oxygen < 0 {
                self.damage(1);
            }
        } else {
            self.oxygen = self.oxygen_init;
            self.under = 0;
        }
    }

    fn drain_water(&mut self) {
        self.water_timer += 1;
        if self.water_timer >= WATER_TICKS {
            self.water_timer = 0;
            self.water = (self.water - 1).max(0);
        }
    }
}

impl Entity for Man {
    fn draw(&mut self, grid: &mut Grid) {
        let rows = grid.height() as i32;
        self.tick(rows);

        if self.dead() {
            // lying still: upper body only, no leg animation
            self.collapsed.place(self.x, rows - COLLAPSED_ROW + 1);
            self.collapsed.paint(grid);
            return;
        }

        let (x, y) = (self.x, self.y + 1);
        let sprite = match self.posture() {
            Posture::Jumping => &mut self.jump,
            Posture::Crouching => &mut self.crouch,
            Posture::Running => &mut self.run,
        };
        sprite.place(x, y);
        sprite.render(grid);
    }
}
