/// Frame-based ASCII sprites.
///
/// ## Pattern format
///
/// A pattern holds every frame side by side. Each line carries one row of
/// every frame, separated by a delimiter:
///
///   ```text
///   $ o $ o $
///   $/|\$\|/$
///   ```
///
/// Empty segments are dropped, so leading/trailing delimiters are fine.
/// The first line fixes the frame count; later lines append their n-th
/// segment to frame n. The example above is two frames of two rows.
///
/// ## Placement
///
/// `(x, y)` is the sprite anchor. The frame's top row sits on `y` and its
/// left column on `x - rows / 2`, so `x` is roughly the middle for square art.

use super::grid::{Grid, Tint};
use crate::error::{GameError, Result};

/// Vertical clipping used when sampling a sprite.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ClipMode {
    /// Rows outside `[y, y + rows)` contribute nothing.
    #[default]
    Strict,
    /// Older permissive behavior: the vertical test never rejects. Offsets
    /// above the sprite index from the bottom of the frame; offsets below
    /// the last row contribute nothing.
    Legacy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<char>>,
}

impl Frame {
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }
}

/// Non-empty set of equally-shaped frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<Frame>,
    rows: usize,
    width: usize,
}

impl FrameSet {
    /// Parse a delimited multi-frame pattern. See module docs for the format.
    pub fn parse(pattern: &str, delimiter: char) -> Result<Self> {
        let mut columns: Vec<Vec<Vec<char>>> = Vec::new();

        let lines = pattern.lines().filter(|l| !l.trim().is_empty());
        for (line_no, line) in lines.enumerate() {
            let segments: Vec<&str> = line.split(delimiter).filter(|s| !s.is_empty()).collect();
            if line_no == 0 {
                columns = segments.iter().map(|s| vec![s.chars().collect()]).collect();
                continue;
            }
            if segments.len() != columns.len() {
                return Err(GameError::SegmentCount {
                    line: line_no,
                    expected: columns.len(),
                    found: segments.len(),
                });
            }
            for (col, seg) in columns.iter_mut().zip(&segments) {
                col.push(seg.chars().collect());
            }
        }

        let frames = columns.into_iter().map(|rows| Frame { rows }).collect();
        Self::from_frames(frames)
    }

    /// Build from already split frames, enforcing the shape invariants.
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let first = frames.first().ok_or(GameError::EmptyPattern)?;
        let rows = first.rows.len();
        let width = first.width();
        if rows == 0 || width == 0 {
            return Err(GameError::EmptyPattern);
        }

        for (f, frame) in frames.iter().enumerate() {
            if frame.rows.len() != rows {
                return Err(GameError::FrameHeight {
                    frame: f,
                    expected: rows,
                    found: frame.rows.len(),
                });
            }
            for (r, row) in frame.rows.iter().enumerate() {
                if row.len() != width {
                    return Err(GameError::RaggedFrame {
                        frame: f,
                        row: r,
                        expected: width,
                        found: row.len(),
                    });
                }
            }
        }

        Ok(FrameSet { frames, rows, width })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn frame(&self, idx: usize) -> &Frame {
        &self.frames[idx % self.frames.len()]
    }
}

/// A positioned, animated frame set.
#[derive(Clone, Debug)]
pub struct Sprite {
    frames: FrameSet,
    pub x: i32,
    pub y: i32,
    init_x: i32,
    frame: usize,
    moving: bool,
    tint: Option<Tint>,
    clip: ClipMode,
}

impl Sprite {
    pub fn new(frames: FrameSet, x: i32, y: i32, moving: bool) -> Self {
        Sprite {
            frames,
            x,
            y,
            init_x: x,
            frame: 0,
            moving,
            tint: None,
            clip: ClipMode::Strict,
        }
    }

    /// Parse `pattern` and build a sprite from it in one go.
    pub fn from_pattern(pattern: &str, delimiter: char, x: i32, y: i32, moving: bool) -> Result<Self> {
        Ok(Self::new(FrameSet::parse(pattern, delimiter)?, x, y, moving))
    }

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_clip(mut self, clip: ClipMode) -> Self {
        self.clip = clip;
        self
    }

    pub fn rows(&self) -> i32 {
        self.frames.rows() as i32
    }

    pub fn place(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Step the animation and, for moving sprites, scroll one cell left.
    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % self.frames.len();
        if self.moving {
            self.x -= 1;
            if self.x < -self.rows() {
                self.x = self.init_x + self.rows();
            }
        }
    }

    /// Advance, then draw.
    pub fn render(&mut self, grid: &mut Grid) {
        self.advance();
        self.paint(grid);
    }

    /// Draw the current frame without advancing. Blank glyphs are transparent.
    pub fn paint(&self, grid: &mut Grid) {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                if let Some(glyph) = self.dot(x, y) {
                    if glyph != ' ' {
                        grid.put(x, y, glyph, self.tint);
                    }
                }
            }
        }
    }

    /// Glyph this sprite contributes at grid cell (x, y), if any.
    pub fn dot(&self, x: i32, y: i32) -> Option<char> {
        let rows = self.rows();
        let half = rows / 2;
        let fy = y - self.y;
        let fx = x - (self.x - half);

        let fy = match self.clip {
            ClipMode::Strict if fy < 0 || fy >= rows => return None,
            ClipMode::Strict => fy,
            ClipMode::Legacy if fy >= rows || fy < -rows => return None,
            ClipMode::Legacy if fy < 0 => fy + rows,
            ClipMode::Legacy => fy,
        };
        if fx < 0 || fx >= self.frames.width() as i32 {
            return None;
        }

        let frame = self.frames.frame(self.frame);
        Some(frame.rows()[fy as usize][fx as usize])
    }
}
