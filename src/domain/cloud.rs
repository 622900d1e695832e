/// Storm cloud and its lightning bolt.
///
/// The cloud never moves. Every tick it re-anchors the bolt one column
/// left of itself, just under its bottom row.
///
/// ## Strike timing
///
/// Each tick the bolt draws `r` in `[0, 1)`. It is lit when `r` falls in
/// `STRIKE_BAND`, and also on the tick right after such a trigger, so a
/// strike flickers on for at least two ticks.
///
/// ## Hit corridor
///
/// `depth = bolt bottom - target.y` measures how far the bolt reaches past
/// the target's head. The deeper it reaches, the wider the band of
/// horizontal offsets (`target.x - bolt.x`) that counts as a hit:
///
///   depth 1  → 5..=6
///   depth 2  → 4..=7
///   depth 3+ → 3..=8

use std::ops::{Range, RangeInclusive};

use rand::{rngs::StdRng, Rng};

use super::entity::Entity;
use super::grid::{Grid, Tint};
use super::man::Man;
use super::sprite::{ClipMode, Sprite};
use crate::error::Result;

pub const STRIKE_BAND: Range<f64> = 0.6..0.7;

const CLOUD_FRAMES: &str = r"
$    .--.      $    .--.      $
$ .-(    )-.   $ .-(    )-.   $
$(___.__)___)  $(___.__)___)  $
$  '  '  '     $ '  '  '      $
";

const BOLT_FRAMES: &str = r"
$     \        $      \       $
$      \       $     /        $
$       \__    $    /__       $
$         /    $       \      $
$        /     $        \     $
$       /__    $         >    $
$         \    $        /     $
$          \   $         \    $
$         \|/  $        -\|-  $
$          \/  $          \/  $
";

fn corridor(depth: i32) -> RangeInclusive<i32> {
    match depth {
        1 => 5..=6,
        2 => 4..=7,
        _ => 3..=8,
    }
}

#[derive(Clone, Debug)]
pub struct Lightning {
    sprite: Sprite,
    lit: bool,
    redraw: bool,
    rng: StdRng,
}

impl Lightning {
    pub fn new(x: i32, y: i32, rng: StdRng, clip: ClipMode) -> Result<Self> {
        let sprite = Sprite::from_pattern(BOLT_FRAMES, '$', x, y, false)?
            .with_tint(Tint::Yellow)
            .with_clip(clip);
        Ok(Lightning { sprite, lit: false, redraw: false, rng })
    }

    pub fn lit(&self) -> bool {
        self.lit
    }

    pub fn x(&self) -> i32 {
        self.sprite.x
    }

    pub fn y(&self) -> i32 {
        self.sprite.y
    }

    pub fn rows(&self) -> i32 {
        self.sprite.rows()
    }

    pub fn place(&mut self, x: i32, y: i32) {
        self.sprite.place(x, y);
    }

    /// Draw this tick's random value and update the lit state.
    pub fn roll(&mut self) {
        let r: f64 = self.rng.gen();
        self.settle(r);
    }

    /// Update the lit state from a given random value.
    pub fn settle(&mut self, r: f64) {
        let triggered = STRIKE_BAND.contains(&r);
        self.lit = triggered || self.redraw;
        self.redraw = triggered;
    }

    /// Does the bolt, as currently lit and placed, reach a head at (x, y)?
    pub fn strikes(&self, x: i32, y: i32) -> bool {
        if !self.lit {
            return false;
        }
        let bottom = self.y() + self.rows();
        if y >= bottom {
            return false;
        }
        let depth = bottom - y;
        corridor(depth).contains(&(x - self.x()))
    }
}

impl Entity for Lightning {
    fn draw(&mut self, grid: &mut Grid) {
        self.roll();
        if self.lit {
            self.sprite.render(grid);
        }
    }

    fn hit(&mut self, target: &mut Man, _rows: i32) -> bool {
        self.strikes(target.x, target.y)
    }
}

#[derive(Clone, Debug)]
pub struct Cloud {
    sprite: Sprite,
    lightning: Lightning,
}

impl Cloud {
    pub fn new(x: i32, y: i32, rng: StdRng, clip: ClipMode) -> Result<Self> {
        let sprite = Sprite::from_pattern(CLOUD_FRAMES, '$', x, y, false)?
            .with_tint(Tint::Grey)
            .with_clip(clip);
        let lightning = Lightning::new(x - 1, y + sprite.rows(), rng, clip)?;
        Ok(Cloud { sprite, lightning })
    }

    pub fn lightning(&self) -> &Lightning {
        &self.lightning
    }

    #[cfg(test)]
    pub fn lightning_mut(&mut self) -> &mut Lightning {
        &mut self.lightning
    }
}

impl Entity for Cloud {
    fn draw(&mut self, grid: &mut Grid) {
        self.sprite.render(grid);
        self.lightning
            .place(self.sprite.x - 1, self.sprite.y + self.sprite.rows());
        self.lightning.draw(grid);
    }

    /// One point of damage for every tick the bolt connects.
    fn hit(&mut self, target: &mut Man, rows: i32) -> bool {
        if self.lightning.hit(target, rows) {
            target.damage(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::man::HEALTH;
    use rand::SeedableRng;

    fn cloud() -> Cloud {
        Cloud::new(14, 12, StdRng::seed_from_u64(7), ClipMode::Strict).unwrap()
    }

    fn lit_bolt() -> Lightning {
        let mut l = cloud().lightning().clone();
        l.settle(0.65);
        l
    }

    fn man_at(x: i32, y: i32) -> Man {
        let mut m = Man::new(x, 24, ClipMode::Strict).unwrap();
        m.y = y;
        m
    }

    #[test]
    fn bolt_hangs_under_cloud() {
        let c = cloud();
        assert_eq!(c.lightning().x(), 13);
        assert_eq!(c.lightning().y(), 16);
        assert_eq!(c.lightning().rows(), 10);
    }

    #[test]
    fn trigger_holds_for_one_extra_tick() {
        let mut l = cloud().lightning().clone();
        l.settle(0.1);
        assert!(!l.lit);
        l.settle(0.6);
        assert!(l.lit);
        l.settle(0.9);
        assert!(l.lit);
        l.settle(0.9);
        assert!(!l.lit);
        l.settle(0.7);
        assert!(!l.lit);
    }

    #[test]
    fn seeded_rolls_never_flash_for_a_single_tick() {
        let mut l = cloud().lightning().clone();
        let mut history = vec![];
        for _ in 0..2000 {
            l.roll();
            history.push(l.lit);
        }
        assert!(history.iter().any(|&lit| lit));
        for w in history.windows(3) {
            if !w[0] && w[1] {
                assert!(w[2], "strike must last two ticks");
            }
        }
    }

    #[test]
    fn unlit_bolt_never_hits() {
        let l = cloud().lightning().clone();
        for x in 0..30 {
            assert!(!l.strikes(x, 24));
        }
    }

    #[test]
    fn corridor_at_depth_two() {
        let l = lit_bolt();
        let y = l.y() + l.rows() - 2;
        for offset in 0..12 {
            let hit = l.strikes(l.x() + offset, y);
            assert_eq!(hit, (4..=7).contains(&offset), "offset {offset}");
        }
    }

    #[test]
    fn corridor_widens_with_depth() {
        let l = lit_bolt();
        let bottom = l.y() + l.rows();
        assert!(!l.strikes(l.x() + 5, bottom));
        assert!(l.strikes(l.x() + 5, bottom - 1));
        assert!(!l.strikes(l.x() + 4, bottom - 1));
        assert!(l.strikes(l.x() + 3, bottom - 3));
        assert!(l.strikes(l.x() + 8, bottom - 6));
        assert!(!l.strikes(l.x() + 9, bottom - 6));
    }

    #[test]
    fn cloud_hit_costs_one_health_per_tick() {
        let mut c = cloud();
        c.lightning_mut().settle(0.65);
        // standing runner: depth 2, offset 5
        let mut m = man_at(18, 24);
        assert!(c.hit(&mut m, 30));
        assert_eq!(m.health, HEALTH - 1);
        assert!(c.hit(&mut m, 30));
        assert_eq!(m.health, HEALTH - 2);
    }

    #[test]
    fn crouching_narrows_the_corridor() {
        let mut c = cloud();
        c.lightning_mut().settle(0.65);
        // crouched at y 25 is depth 1: offset 4 escapes
        let mut m = man_at(17, 25);
        assert!(!c.hit(&mut m, 30));
        assert_eq!(m.health, HEALTH);
        let mut m = man_at(17, 24);
        assert!(c.hit(&mut m, 30));
    }

    #[test]
    fn draw_anchors_bolt_and_shows_it_only_when_lit() {
        let mut grid = Grid::new(80, 30);
        let mut c = Cloud::new(14, 12, StdRng::seed_from_u64(3), ClipMode::Strict).unwrap();
        let mut lit_ticks = 0;
        for _ in 0..500 {
            grid.clear();
            c.lightning.place(0, 0);
            c.draw(&mut grid);
            assert_eq!((c.lightning().x(), c.lightning().y()), (13, 16));

            let yellow = (0..30)
                .flat_map(|y| (0..80).map(move |x| (x, y)))
                .filter(|&(x, y)| grid.get(x, y).unwrap().tint == Some(Tint::Yellow))
                .count();
            if c.lightning().lit() {
                lit_ticks += 1;
                assert!(yellow > 0);
            } else {
                assert_eq!(yellow, 0);
            }
        }
        assert!(lit_ticks > 0);
    }

    #[test]
    fn lit_bolt_is_drawn_below_cloud() {
        let mut grid = Grid::new(80, 30);
        let mut c = cloud();
        c.sprite.render(&mut grid);
        c.lightning.settle(0.65);
        c.lightning.sprite.render(&mut grid);
        let bolt_cells = (16..26)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.get(x, y).unwrap().tint == Some(Tint::Yellow))
            .count();
        assert!(bolt_cells > 0);
        // cloud rows stay grey
        assert!((12..16).any(|y| grid.get(14, y).unwrap().tint == Some(Tint::Grey)));
    }
}
