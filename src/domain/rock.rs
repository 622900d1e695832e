/// Ground obstacle scrolling right to left.
///
/// A rock lands at most one hit per pass: the hit disarms it, and it only
/// re-arms once it is back at exactly `REARM_DISTANCE` columns ahead of the
/// runner. Overlapping the runner for several ticks therefore costs one
/// point of health, not one per tick.

use super::entity::Entity;
use super::grid::{Grid, Tint};
use super::man::Man;
use super::sprite::{ClipMode, Sprite};
use crate::error::Result;

pub const REARM_DISTANCE: i32 = 10;
/// A head at or above this row clears the rock.
pub const CLEARANCE_ROW: i32 = 23;

const ROCK_FRAMES: &str = r"
$ _ $ _ $
$/#\$/%\$
$###$#%#$
";

#[derive(Clone, Debug)]
pub struct Rock {
    sprite: Sprite,
    armed: bool,
}

impl Rock {
    pub fn new(x: i32, y: i32, clip: ClipMode) -> Result<Self> {
        let sprite = Sprite::from_pattern(ROCK_FRAMES, '$', x, y, true)?
            .with_tint(Tint::Red)
            .with_clip(clip);
        Ok(Rock { sprite, armed: true })
    }

    pub fn x(&self) -> i32 {
        self.sprite.x
    }

    /// Move the rock without animating it.
    #[cfg(test)]
    pub fn place(&mut self, x: i32) {
        let y = self.sprite.y;
        self.sprite.place(x, y);
    }
}

impl Entity for Rock {
    fn draw(&mut self, grid: &mut Grid) {
        self.sprite.render(grid);
    }

    fn hit(&mut self, target: &mut Man, rows: i32) -> bool {
        if self.x() == target.x + REARM_DISTANCE {
            self.armed = true;
        }

        let distance = self.x() - target.x;
        let grounded = target.y > CLEARANCE_ROW && target.y < rows;
        if distance > -1 && distance < 1 && grounded && self.armed {
            target.damage(1);
            self.armed = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::man::HEALTH;

    const ROWS: i32 = 30;

    fn runner(y: i32) -> Man {
        let mut m = Man::new(18, 24, ClipMode::Strict).unwrap();
        m.y = y;
        m
    }

    #[test]
    fn one_hit_per_pass() {
        let mut rock = Rock::new(18, 27, ClipMode::Strict).unwrap();
        let mut m = runner(25);

        assert!(rock.hit(&mut m, ROWS));
        assert_eq!(m.health, HEALTH - 1);
        for _ in 0..5 {
            assert!(!rock.hit(&mut m, ROWS));
        }
        assert_eq!(m.health, HEALTH - 1);
        assert!(!rock.armed);
    }

    #[test]
    fn rearms_ten_columns_ahead() {
        let mut rock = Rock::new(18, 27, ClipMode::Strict).unwrap();
        let mut m = runner(25);
        rock.hit(&mut m, ROWS);

        rock.place(m.x + REARM_DISTANCE - 1);
        rock.hit(&mut m, ROWS);
        assert!(!rock.armed);

        rock.place(m.x + REARM_DISTANCE);
        rock.hit(&mut m, ROWS);
        assert!(rock.armed);

        rock.place(m.x);
        assert!(rock.hit(&mut m, ROWS));
        assert_eq!(m.health, HEALTH - 2);
    }

    #[test]
    fn airborne_runner_clears_rock() {
        let mut rock = Rock::new(18, 27, ClipMode::Strict).unwrap();
        let mut m = runner(CLEARANCE_ROW);
        assert!(!rock.hit(&mut m, ROWS));
        assert_eq!(m.health, HEALTH);
        assert!(rock.armed);
    }

    #[test]
    fn submerged_runner_is_not_hit() {
        let mut rock = Rock::new(18, 27, ClipMode::Strict).unwrap();
        let mut m = runner(ROWS);
        assert!(!rock.hit(&mut m, ROWS));
    }

    #[test]
    fn adjacent_column_is_a_miss() {
        let mut rock = Rock::new(19, 27, ClipMode::Strict).unwrap();
        let mut m = runner(24);
        assert!(!rock.hit(&mut m, ROWS));
        rock.place(17);
        assert!(!rock.hit(&mut m, ROWS));
        rock.place(18);
        assert!(rock.hit(&mut m, ROWS));
    }

    #[test]
    fn scrolls_left_and_wraps() {
        let mut grid = Grid::new(80, ROWS as usize);
        let mut rock = Rock::new(80, 27, ClipMode::Strict).unwrap();
        rock.draw(&mut grid);
        assert_eq!(rock.x(), 79);
        // rows = 3: wraps once x passes -3
        rock.place(-3);
        rock.draw(&mut grid);
        assert_eq!(rock.x(), 83);
    }

    #[test]
    fn drawn_on_ground_rows() {
        let mut grid = Grid::new(80, ROWS as usize);
        let mut rock = Rock::new(41, 27, ClipMode::Strict).unwrap();
        rock.draw(&mut grid);
        assert_eq!(rock.x(), 40);
        assert_eq!(grid.get(40, 29).unwrap().glyph, '%');
        assert_eq!(grid.get(39, 29).unwrap().tint, Some(Tint::Red));
        assert_eq!(grid.get(40, 26).unwrap().glyph, ' ');
    }
}
