//! Per-mark placement queues and the eviction rule.

use super::position::Position;
use super::types::Mark;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Cells held by one mark, oldest first.
///
/// Never holds more than [`MarkQueue::CAPACITY`] distinct entries: pushing
/// a fourth evicts the oldest, and deserialization rejects anything longer
/// or with a repeated cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct MarkQueue {
    cells: VecDeque<Position>,
}

/// Why a list of cells is not a valid queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum QueueError {
    /// More cells than [`MarkQueue::CAPACITY`].
    #[display("{} cells exceed the capacity of {}", _0, MarkQueue::CAPACITY)]
    Overfull(usize),

    /// The same cell listed twice.
    #[display("{} is listed more than once", _0)]
    Duplicate(Position),
}

impl std::error::Error for QueueError {}

impl MarkQueue {
    /// Maximum number of live marks per side.
    pub const CAPACITY: usize = 3;

    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `pos`; returns the evicted oldest cell when over capacity.
    #[instrument(level = "trace", skip(self))]
    pub fn push(&mut self, pos: Position) -> Option<Position> {
        self.cells.push_back(pos);
        if self.cells.len() > Self::CAPACITY {
            let evicted = self.cells.pop_front();
            debug!(?evicted, "Queue over capacity, evicted oldest");
            evicted
        } else {
            None
        }
    }

    /// Oldest live cell.
    pub fn oldest(&self) -> Option<Position> {
        self.cells.front().copied()
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cells are held.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when the next push will evict.
    pub fn is_full(&self) -> bool {
        self.cells.len() >= Self::CAPACITY
    }

    /// Whether `pos` is held by this queue.
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Appends without evicting, so tests can build states the engine never would.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, pos: Position) {
        self.cells.push_back(pos);
    }

    /// Cells oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }
}

impl TryFrom<Vec<Position>> for MarkQueue {
    type Error = QueueError;

    fn try_from(cells: Vec<Position>) -> Result<Self, Self::Error> {
        if cells.len() > Self::CAPACITY {
            return Err(QueueError::Overfull(cells.len()));
        }
        for (i, pos) in cells.iter().enumerate() {
            if cells[..i].contains(pos) {
                return Err(QueueError::Duplicate(*pos));
            }
        }
        Ok(Self {
            cells: cells.into(),
        })
    }
}

impl From<MarkQueue> for Vec<Position> {
    fn from(queue: MarkQueue) -> Self {
        queue.cells.into()
    }
}

impl<'a> IntoIterator for &'a MarkQueue {
    type Item = Position;
    type IntoIter = std::iter::Copied<std::collections::vec_deque::Iter<'a, Position>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

/// The X and O queues together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MarkQueues {
    x: MarkQueue,
    o: MarkQueue,
}

impl MarkQueues {
    /// Creates empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue for `mark`.
    pub fn get(&self, mark: Mark) -> &MarkQueue {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    pub(crate) fn get_mut(&mut self, mark: Mark) -> &mut MarkQueue {
        match mark {
            Mark::X => &mut self.x,
            Mark::O => &mut self.o,
        }
    }

    /// Mark whose queue holds `pos`, if any.
    pub fn owner(&self, pos: Position) -> Option<Mark> {
        Mark::BOTH
            .into_iter()
            .find(|mark| self.get(*mark).contains(pos))
    }
}

impl std::ops::Index<Mark> for MarkQueues {
    type Output = MarkQueue;

    fn index(&self, mark: Mark) -> &MarkQueue {
        self.get(mark)
    }
}
