/// Chess domain types.
pub mod chess;
/// A game of chess and its navigable history.
pub mod game;
/// Assorted utilities.
pub mod util;
