mod bitboard;
mod board;
mod castles;
mod color;
mod file;
mod r#move;
mod outcome;
mod piece;
mod position;
mod promotion;
mod rank;
mod role;
mod square;
mod state;

pub use bitboard::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use outcome::*;
pub use piece::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use rank::*;
pub use role::*;
pub use square::*;
pub use state::*;
