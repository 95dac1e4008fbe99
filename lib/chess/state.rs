use crate::chess::{Bitboard, Board, Color};
use crate::util::Integer;

/// What the pieces on a [`Board`] threaten.
///
/// Derived on demand and never stored alongside the board it was computed from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameState {
    turn: Color,
    attacks: [Bitboard; 2],
    checks: [bool; 2],
}

impl GameState {
    /// Computes the attack sets and check flags of both sides.
    pub fn new(board: &Board) -> Self {
        let mut attacks = [Bitboard::empty(); 2];
        for (p, sq) in board.iter() {
            attacks[p.color().get() as usize] |= p.role().attacks(p.color(), sq, board);
        }

        let checks = [Color::White, Color::Black].map(|side| {
            let threats = attacks[(!side).get() as usize];
            board.king(side).is_some_and(|k| threats.contains(k))
        });

        GameState {
            turn: board.turn,
            attacks,
            checks,
        }
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Squares attacked by the pieces of a [`Color`].
    ///
    /// Attacked squares are not necessarily legal destinations.
    #[inline(always)]
    pub fn attacks(&self, side: Color) -> Bitboard {
        self.attacks[side.get() as usize]
    }

    /// Whether the king of a [`Color`] is attacked by the opponent.
    #[inline(always)]
    pub fn is_king_attacked(&self, side: Color) -> bool {
        self.checks[side.get() as usize]
    }

    /// Whether the side to move is in check.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.turn)
    }
}

impl Board {
    /// Computes the [`GameState`] of this board.
    #[inline(always)]
    pub fn state(&self) -> GameState {
        GameState::new(self)
    }
}
