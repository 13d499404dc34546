//! Game rules for only-three tic-tac-toe.
//!
//! Pure functions over the queues. Rules are kept apart from the engine so
//! invariants and snapshot projections can reuse them.

pub mod win;

pub use win::{LINES, Line, check_winner, winning_line};
