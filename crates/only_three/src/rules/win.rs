//! Win detection.
//!
//! Each side holds at most three cells, so a side wins exactly when its
//! cell set equals one of the eight lines.

use super::super::{Mark, MarkQueue, MarkQueues, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cells forming a row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// The line's cells in index order.
    pub fn cells(&self) -> [Position; 3] {
        self.0
    }

    /// Whether `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// True when `queue` holds exactly this line's cells.
    pub fn matches(&self, queue: &MarkQueue) -> bool {
        queue.len() == 3 && queue.iter().all(|pos| self.contains(pos))
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{{{},{},{}}}", a.to_index(), b.to_index(), c.to_index())
    }
}

/// The eight winning lines.
pub const LINES: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Line formed by `queue`, if its cells are exactly one of [`LINES`].
#[instrument(level = "trace")]
pub fn winning_line(queue: &MarkQueue) -> Option<Line> {
    LINES.into_iter().find(|line| line.matches(queue))
}

/// First mark (X before O) whose queue forms a line.
#[instrument(level = "trace")]
pub fn check_winner(queues: &MarkQueues) -> Option<(Mark, Line)> {
    Mark::BOTH
        .into_iter()
        .find_map(|mark| winning_line(queues.get(mark)).map(|line| (mark, line)))
}
