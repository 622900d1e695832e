/// WorldState: everything a running game owns.
///
/// The grid is rebuilt from scratch every tick; all persistent state lives
/// in the entities and the counters here.

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use crate::config::GameConfig;
use crate::domain::cloud::Cloud;
use crate::domain::grid::Grid;
use crate::domain::man::Man;
use crate::domain::rock::Rock;
use crate::error::Result;

pub const GRID_WIDTH: usize = 80;
pub const GRID_HEIGHT: usize = 30;

const MAN_X: i32 = 18;
const MAN_Y: i32 = 24;
const CLOUD_X: i32 = 14;
const CLOUD_Y: i32 = 12;
const ROCK_Y: i32 = 27;
/// Start columns; the second rock trails off-screen.
const ROCK_STARTS: [i32; 2] = [80, 120];

pub struct WorldState {
    pub grid: Grid,
    pub man: Man,
    pub cloud: Cloud,
    pub rocks: Vec<Rock>,

    pub tick: u64,
    pub score: u64,
    /// Whether the runner was already down at the last collision pass.
    pub down: bool,

    pub moment: Duration,
    pub min_moment: Duration,
    pub moment_step: Duration,
}

impl WorldState {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let rng = match config.general.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let rocks = ROCK_STARTS
            .iter()
            .map(|&x| Rock::new(x, ROCK_Y, config.clip))
            .collect::<Result<Vec<_>>>()?;

        Ok(WorldState {
            grid: Grid::new(GRID_WIDTH, GRID_HEIGHT),
            man: Man::new(MAN_X, MAN_Y, config.clip)?,
            cloud: Cloud::new(CLOUD_X, CLOUD_Y, rng, config.clip)?,
            rocks,
            tick: 0,
            score: 0,
            down: false,
            moment: Duration::from_millis(config.speed.tick_ms),
            min_moment: Duration::from_millis(config.speed.min_tick_ms),
            moment_step: Duration::from_millis(config.speed.tick_step_ms),
        })
    }

    pub fn rows(&self) -> i32 {
        self.grid.height() as i32
    }
}
