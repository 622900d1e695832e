/// Entities: anything drawn onto the grid each tick.
///
/// Every entity owns its sprites and is handed the grid explicitly, so
/// sampling and collision can be tested without a screen.
/// The runner is the only collision target in play.

use super::grid::Grid;
use super::man::Man;

pub trait Entity {
    /// Advance one tick of animation/state and draw onto `grid`.
    fn draw(&mut self, grid: &mut Grid);

    /// Collision response against the runner. `rows` is the grid height.
    /// Returns true when the runner was struck this tick.
    fn hit(&mut self, _target: &mut Man, _rows: i32) -> bool {
        false
    }
}
