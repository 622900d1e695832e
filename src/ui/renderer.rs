/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Lay out the next frame into `front` (rulers, borders, grid rows)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Layout, for a grid `W` wide and `H` tall:
///
///   ```text
///      tens digits          ← ruler
///      unit digits          ← ruler
///   ----------------------  ← W + 4 dashes
///    0|<grid row 0>|
///   ..
///   H-1|<grid row H-1>|
///   ----------------------
///   key help
///   ```

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::grid::{Grid, Tint};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Cell {
    const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '\0', fg: Color::Magenta };
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y). Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width {
                break;
            }
            self.set(x + i, y, Cell { ch, fg });
        }
    }
}

// ── Layout ──

/// Row-number gutter: two digits and a bar.
const GUTTER: usize = 3;
/// Ruler lines + top border.
const GRID_ROW: usize = 3;
const HELP: &str = "[space] jump  [←→] move  [c] crouch  [r] stand  [z] respawn  [+-] delay  [e] exit";

const RULER_FG: Color = Color::DarkGrey;
const TOP_FG: Color = Color::Blue;
const BOTTOM_FG: Color = Color::Green;

/// Column ruler for a grid `width` wide: (tens line, units line).
/// Columns below ten get a blank in the tens line.
pub fn ruler(width: usize) -> (String, String) {
    let tens = (0..width)
        .map(|i| match i / 10 {
            0 => ' ',
            t => char::from_digit((t % 10) as u32, 10).unwrap_or(' '),
        })
        .collect();
    let units = (0..width)
        .map(|i| char::from_digit((i % 10) as u32, 10).unwrap_or(' '))
        .collect();
    (tens, units)
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Yellow => Color::Yellow,
        Tint::Blue => Color::Blue,
        Tint::Cyan => Color::Cyan,
        Tint::Grey => Color::Grey,
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_size: (u16, u16),
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_size: (0, 0),
            color,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        self.term_size = terminal::size().unwrap_or((80, 24));
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )
    }

    pub fn render(&mut self, grid: &Grid) -> io::Result<()> {
        let (w, h) = (grid.width() + GUTTER + 1, grid.height() + GRID_ROW + 2);
        let size_changed = self.front.width != w || self.front.height != h;
        self.front.resize(w, h);
        self.back.resize(w, h);

        // Detect terminal resize
        let term_size = terminal::size().unwrap_or(self.term_size);
        if size_changed || term_size != self.term_size {
            self.term_size = term_size;
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose(grid);
        self.flush_diff()?;

        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn fg(&self, color: Color) -> Color {
        if self.color { color } else { Color::Reset }
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, grid: &Grid) {
        let width = grid.width();
        let gutter = " ".repeat(GUTTER);
        let (tens, units) = ruler(width);
        let border = "-".repeat(width + GUTTER + 1);

        let ruler_fg = self.fg(RULER_FG);
        let (top_fg, bottom_fg) = (self.fg(TOP_FG), self.fg(BOTTOM_FG));
        self.front.put_str(0, 0, &format!("{gutter}{tens}"), ruler_fg);
        self.front.put_str(0, 1, &format!("{gutter}{units}"), ruler_fg);
        self.front.put_str(0, 2, &border, top_fg);

        for (y, row) in grid.rows().enumerate() {
            let line = GRID_ROW + y;
            self.front.put_str(0, line, &format!("{:>2}|", y % 100), ruler_fg);
            for (x, cell) in row.iter().enumerate() {
                let fg = cell.tint.map_or(Color::Reset, |t| self.fg(tint_color(t)));
                self.front.set(GUTTER + x, line, Cell { ch: cell.glyph, fg });
            }
            self.front.put_str(GUTTER + width, line, "|", ruler_fg);
        }

        let bottom = GRID_ROW + grid.height();
        self.front.put_str(0, bottom, &border, bottom_fg);
        self.front.put_str(0, bottom + 1, HELP, ruler_fg);
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::Reset;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(Color::Reset))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                queue!(self.writer, Print(cell.ch))?;

                last_x = x;
                last_y = y;
            }
        }

        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(r: &Renderer, y: usize) -> String {
        (0..r.front.width).map(|x| r.front.get(x, y).ch).collect()
    }

    #[test]
    fn ruler_digits() {
        let (tens, units) = ruler(12);
        assert_eq!(tens, "          11");
        assert_eq!(units, "012345678901");
        let (tens, _) = ruler(101);
        assert_eq!(tens.chars().nth(100), Some('0'));
    }

    #[test]
    fn layout_frames_every_grid_row() {
        let mut grid = Grid::new(12, 11);
        grid.put(0, 0, 'A', None);
        grid.put(11, 10, 'Z', Some(Tint::Red));

        let mut r = Renderer::new(true);
        r.front.resize(12 + GUTTER + 1, 11 + GRID_ROW + 2);
        r.compose(&grid);

        assert_eq!(line(&r, 0), "             11 ");
        assert_eq!(line(&r, 1), "   012345678901 ");
        assert_eq!(line(&r, 2), "-".repeat(16));
        assert_eq!(line(&r, 3), " 0|A           |");
        assert_eq!(line(&r, 13), "10|           Z|");
        assert_eq!(line(&r, 14), "-".repeat(16));
        assert_eq!(r.front.get(GUTTER + 11, 13).fg, Color::Red);
        assert_eq!(r.front.get(2, 14).fg, BOTTOM_FG);
    }

    #[test]
    fn colorless_mode_drops_tints() {
        let mut grid = Grid::new(4, 2);
        grid.put(1, 1, '#', Some(Tint::Yellow));
        let mut r = Renderer::new(false);
        r.front.resize(4 + GUTTER + 1, 2 + GRID_ROW + 2);
        r.compose(&grid);
        assert_eq!(r.front.get(GUTTER + 1, GRID_ROW + 1).ch, '#');
        assert_eq!(r.front.get(GUTTER + 1, GRID_ROW + 1).fg, Color::Reset);
        assert_eq!(r.front.get(0, 0).fg, Color::Reset);
    }
    #[test]
    fn help_line_fits_game_width() {
        let grid = Grid::new(80, 30);
        let mut r = Renderer::new(true);
        r.front.resize(80 + GUTTER + 1, 30 + GRID_ROW + 2);
        r.compose(&grid);
        let help = line(&r, GRID_ROW + 30 + 1);
        assert!(help.trim_end().ends_with("[e] exit"), "{help:?}");
    }
}
