/// Grid buffer: the character screen every entity draws onto.
///
/// Coordinates are signed so sprites can sit partly off-screen.
/// Any write outside `[0, width) × [0, height)` is dropped.

/// Color tag for a cell. The renderer decides how to show it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tint {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    Grey,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub glyph: char,
    pub tint: Option<Tint>,
}

impl Cell {
    pub const BLANK: Cell = Cell { glyph: ' ', tint: None };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write one cell. Silently ignored when out of bounds.
    pub fn put(&mut self, x: i32, y: i32, glyph: char, tint: Option<Tint>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { glyph, tint };
        }
    }

    /// `length` cells downward from (x, y), each clipped on its own.
    pub fn vertical_run(&mut self, x: i32, y: i32, length: i32, glyph: char, tint: Option<Tint>) {
        for row in y..y.saturating_add(length.max(0)) {
            self.put(x, row, glyph, tint);
        }
    }

    /// Left-to-right text; characters that fall off the grid are dropped.
    pub fn text(&mut self, text: &str, x: i32, y: i32) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x.saturating_add(i as i32), y, ch, None);
        }
    }

    /// Row slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(g: &Grid) -> Vec<Cell> {
        g.rows().flat_map(|r| r.iter().copied()).collect()
    }

    #[test]
    fn put_in_bounds() {
        let mut g = Grid::new(4, 3);
        g.put(3, 2, '#', Some(Tint::Red));
        assert_eq!(g.get(3, 2), Some(Cell { glyph: '#', tint: Some(Tint::Red) }));
        assert_eq!(g.get(0, 0), Some(Cell::BLANK));
    }

    #[test]
    fn put_out_of_bounds_is_noop() {
        let mut g = Grid::new(4, 3);
        let before = snapshot(&g);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MAX, i32::MAX), (i32::MIN, 1)] {
            g.put(x, y, 'X', None);
        }
        assert_eq!(snapshot(&g), before);
        assert_eq!(g.get(4, 0), None);
    }

    #[test]
    fn vertical_run_clips_each_cell() {
        let mut g = Grid::new(3, 4);
        g.vertical_run(1, 2, 5, '|', Some(Tint::Blue));
        assert_eq!(g.get(1, 1).unwrap().glyph, ' ');
        assert_eq!(g.get(1, 2).unwrap().glyph, '|');
        assert_eq!(g.get(1, 3).unwrap().glyph, '|');

        let mut g = Grid::new(3, 4);
        g.vertical_run(0, -2, 3, '|', None);
        assert_eq!(g.get(0, 0).unwrap().glyph, '|');
        assert_eq!(g.get(0, 1).unwrap().glyph, ' ');
    }

    #[test]
    fn text_is_partially_clipped() {
        let mut g = Grid::new(5, 1);
        g.text("abcdef", 2, 0);
        let row: String = g.rows().next().unwrap().iter().map(|c| c.glyph).collect();
        assert_eq!(row, "  abc");

        let mut g = Grid::new(5, 1);
        g.text("abc", -1, 0);
        let row: String = g.rows().next().unwrap().iter().map(|c| c.glyph).collect();
        assert_eq!(row, "bc   ");
    }

    #[test]
    fn clear_resets_everything() {
        let mut g = Grid::new(2, 2);
        g.put(1, 1, '@', Some(Tint::Green));
        g.clear();
        assert!(snapshot(&g).iter().all(|c| *c == Cell::BLANK));
    }
}
