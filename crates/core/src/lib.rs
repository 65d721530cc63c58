//! stacker core crate - fundamental types for the falling-block engine.

mod board;
mod board_heights;
mod error;
mod moves;
mod piece;

pub use board::{Board, Cell};
pub use board_heights::BoardWithHeights;
pub use error::ParseError;
pub use moves::{Approach, Move, RotateDir, TSpin};
pub use piece::{ActivePiece, Piece, Rotation};
