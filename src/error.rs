/// Error types.
///
/// Drawing never fails (out-of-bounds writes are clipped), so the only
/// errors come from malformed sprite art.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Pattern contained no frame rows at all.
    #[error("sprite pattern has no frames")]
    EmptyPattern,

    /// A pattern line split into a different number of frames than the first.
    #[error("pattern line {line} has {found} frames, expected {expected}")]
    SegmentCount { line: usize, expected: usize, found: usize },

    /// A frame has a different number of rows than the first frame.
    #[error("frame {frame} has {found} rows, expected {expected}")]
    FrameHeight { frame: usize, expected: usize, found: usize },

    /// A frame row is narrower or wider than the first row of the set.
    #[error("frame {frame} row {row} is {found} wide, expected {expected}")]
    RaggedFrame { frame: usize, row: usize, expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
