use crate::chess::{Bitboard, Board, Color, Rank, Square};
use crate::util::Integer;
use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The type of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Role {
    /// The squares a piece of this role could move to from `whence`.
    ///
    /// This is pure geometry: whether the move exposes the mover's own king is not considered.
    pub fn moves(self, side: Color, whence: Square, board: &Board) -> Bitboard {
        match self {
            Role::Pawn => pawn_pushes(side, whence, board) | pawn_captures(side, whence, board),
            Role::Knight => step(side, whence, &KNIGHT_STEPS, board),
            Role::Bishop => slide(side, whence, &DIAGONALS, board),
            Role::Rook => slide(side, whence, &ORTHOGONALS, board),
            Role::Queen => slide(side, whence, &ALL_DIRECTIONS, board),
            Role::King => step(side, whence, &ALL_DIRECTIONS, board),
        }
    }

    /// The squares a piece of this role threatens from `whence`.
    ///
    /// Same as [`Role::moves`], except pawns threaten both forward diagonals regardless of
    /// what occupies them.
    pub fn attacks(self, side: Color, whence: Square, board: &Board) -> Bitboard {
        match self {
            Role::Pawn => pawn_attacks(side, whence),
            r => r.moves(side, whence, board),
        }
    }
}

/// The direction pawns of a [`Color`] advance in.
#[inline(always)]
pub(crate) fn forward(side: Color) -> i8 {
    match side {
        Color::White => 1,
        Color::Black => -1,
    }
}

fn step(side: Color, whence: Square, steps: &[(i8, i8)], board: &Board) -> Bitboard {
    steps
        .iter()
        .filter_map(|&(df, dr)| whence.offset(df, dr))
        .filter(|&sq| board.color_on(sq) != Some(side))
        .collect()
}

fn slide(side: Color, whence: Square, directions: &[(i8, i8)], board: &Board) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(df, dr) in directions {
        let mut sq = whence;
        while let Some(next) = sq.offset(df, dr) {
            match board.color_on(next) {
                Some(c) if c == side => break,
                Some(_) => {
                    bb = bb.with(next);
                    break;
                }
                None => bb = bb.with(next),
            }

            sq = next;
        }
    }

    bb
}

fn pawn_pushes(side: Color, whence: Square, board: &Board) -> Bitboard {
    let dr = forward(side);
    let mut bb = Bitboard::empty();

    if let Some(one) = whence.offset(0, dr).filter(|&sq| board[sq].is_none()) {
        bb = bb.with(one);

        if whence.rank() == Rank::pawns(side) {
            if let Some(two) = one.offset(0, dr).filter(|&sq| board[sq].is_none()) {
                bb = bb.with(two);
            }
        }
    }

    bb
}

fn pawn_captures(side: Color, whence: Square, board: &Board) -> Bitboard {
    pawn_attacks(side, whence)
        .into_iter()
        .filter(|&sq| match board.color_on(sq) {
            None => board.en_passant == Some(sq),
            Some(c) => c != side,
        })
        .collect()
}

fn pawn_attacks(side: Color, whence: Square) -> Bitboard {
    let dr = forward(side);
    [-1, 1]
        .into_iter()
        .filter_map(|df| whence.offset(df, dr))
        .collect()
}

unsafe impl Integer for Role {
    type Repr = u8;
    const MIN: Self::Repr = Role::Pawn as _;
    const MAX: Self::Repr = Role::King as _;
}

impl Role {
    /// The lowercase letter naming this role.
    #[inline(always)]
    pub fn letter(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }

    /// The role named by a lowercase letter, if any.
    #[inline(always)]
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'p' => Some(Role::Pawn),
            'n' => Some(Role::Knight),
            'b' => Some(Role::Bishop),
            'r' => Some(Role::Rook),
            'q' => Some(Role::Queen),
            'k' => Some(Role::King),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char(self.letter())
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse role")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match *s.as_bytes() {
            [c] => Role::from_letter(c as char).ok_or(ParseRoleError),
            _ => Err(ParseRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Piece;
    use std::mem::size_of;
    use test_strategy::proptest;

    fn board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    #[test]
    fn role_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Role>>(), size_of::<Role>());
    }

    #[proptest]
    fn parsing_printed_role_is_an_identity(r: Role) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_role_fails_if_not_one_of_lowercase_pnbrqk(
        #[filter(!['p', 'n', 'b', 'r', 'q', 'k'].contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn parsing_role_fails_if_length_not_one(#[filter(#s.len() != 1)] s: String) {
        assert_eq!(s.parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn pieces_never_move_onto_friendly_pieces(b: Board) {
        for (p, sq) in b.iter() {
            for dst in p.role().moves(p.color(), sq, &b) {
                assert_ne!(b.color_on(dst), Some(p.color()));
            }
        }
    }

    #[proptest]
    fn only_pawns_attack_differently_than_they_move(b: Board) {
        for (p, sq) in b.iter() {
            if p.role() != Role::Pawn {
                assert_eq!(
                    p.role().attacks(p.color(), sq, &b),
                    p.role().moves(p.color(), sq, &b)
                );
            }
        }
    }

    #[test]
    fn knight_jumps_over_pieces_and_stays_on_the_board() {
        let b = Board::default();
        assert_eq!(
            Role::Knight.moves(Color::White, Square::B1, &b),
            Bitboard::from_iter([Square::A3, Square::C3])
        );
    }

    #[test]
    fn king_steps_one_square_in_every_direction() {
        let b = board("8/8/8/8/3K4/8/8/k7 w - -");
        assert_eq!(Role::King.moves(Color::White, Square::D4, &b).len(), 8);
        assert_eq!(Role::King.moves(Color::White, Square::A1, &b).len(), 3);
    }

    #[test]
    fn sliding_pieces_stop_before_friendly_pieces_and_on_enemy_pieces() {
        let b = board("8/8/8/1p6/8/8/8/R2P3k w - -");
        assert_eq!(
            Role::Rook.moves(Color::White, Square::A1, &b),
            Bitboard::from_iter([
                Square::B1,
                Square::C1,
                Square::A2,
                Square::A3,
                Square::A4,
                Square::A5,
                Square::A6,
                Square::A7,
                Square::A8,
            ])
        );

        let b = board("8/8/8/1p6/8/8/8/B6k w - -");
        assert_eq!(
            Role::Bishop.moves(Color::White, Square::A1, &b),
            Bitboard::from_iter([
                Square::B2,
                Square::C3,
                Square::D4,
                Square::E5,
                Square::F6,
                Square::G7,
                Square::H8,
            ])
        );

        let b = board("8/8/8/1p6/8/8/8/Q6k w - -");
        assert_eq!(Role::Queen.moves(Color::White, Square::A1, &b).len(), 7 + 7 + 7);
    }

    #[test]
    fn pawn_may_advance_twice_only_from_its_starting_rank() {
        let b = board("4k3/8/8/8/8/4P3/3P4/4K3 w - -");
        assert_eq!(
            Role::Pawn.moves(Color::White, Square::D2, &b),
            Bitboard::from_iter([Square::D3, Square::D4])
        );

        assert_eq!(
            Role::Pawn.moves(Color::White, Square::E3, &b),
            Bitboard::from_iter([Square::E4])
        );
    }

    #[test]
    fn pawn_cannot_advance_through_pieces() {
        let b = board("4k3/8/8/8/8/3n4/3P4/4K3 w - -");
        assert_eq!(Role::Pawn.moves(Color::White, Square::D2, &b), Bitboard::empty());

        let b = board("4k3/8/8/8/3n4/8/3P4/4K3 w - -");
        assert_eq!(
            Role::Pawn.moves(Color::White, Square::D2, &b),
            Bitboard::from_iter([Square::D3])
        );
    }

    #[test]
    fn pawn_captures_diagonally_enemies_and_the_en_passant_square() {
        let b = board("4k3/8/8/2pPp3/8/8/8/4K3 w - c6");
        assert_eq!(
            Role::Pawn.moves(Color::White, Square::D5, &b),
            Bitboard::from_iter([Square::C6, Square::D6])
        );
    }

    #[test]
    fn black_pawns_advance_downwards() {
        let b = board("4k3/3p4/8/8/8/8/8/4K3 b - -");
        assert_eq!(
            Role::Pawn.moves(Color::Black, Square::D7, &b),
            Bitboard::from_iter([Square::D6, Square::D5])
        );
    }

    #[test]
    fn pawn_attacks_both_diagonals_even_if_empty() {
        let b = board("4k3/8/8/8/8/8/3P4/4K3 w - -");
        assert_eq!(
            Role::Pawn.attacks(Color::White, Square::D2, &b),
            Bitboard::from_iter([Square::C3, Square::E3])
        );

        assert_eq!(
            Role::Pawn.attacks(Color::White, Square::A2, &b),
            Bitboard::from_iter([Square::B3])
        );
    }

    #[test]
    fn pieces_have_a_role() {
        assert_eq!(Piece::new(Role::Queen, Color::Black).role(), Role::Queen);
    }
}
