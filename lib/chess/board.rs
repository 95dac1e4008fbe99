use crate::chess::*;
use crate::util::Integer;
use arrayvec::ArrayString;
use derive_more::{DebugCustom, Display, Error};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// Identifies a piece within a [`Board`].
///
/// Identities are stable for as long as the piece stays on the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PieceId(u8);

impl PieceId {
    #[inline(always)]
    fn index(self) -> usize {
        self.0 as _
    }
}

/// A [`Piece`] standing on a [`Square`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Placed {
    pub piece: Piece,
    pub square: Square,
}

/// A snapshot of the chess board.
///
/// Pieces are owned by an arena addressed by [`PieceId`], while the grid only refers to them.
/// This type makes no attempt at validating the placement of pieces,
/// see [`Position`] for that.
#[derive(DebugCustom, Clone)]
#[debug(fmt = "Board({})", self)]
pub struct Board {
    grid: [Option<PieceId>; 64],
    pieces: Vec<Option<Placed>>,
    pub turn: Color,
    pub castles: Castles,
    pub en_passant: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        use Role::*;
        let mut board = Board::bare(Color::White, Castles::all(), None);

        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for side in Color::iter() {
            for (f, &role) in File::iter().zip(back.iter()) {
                board.place(Piece::new(role, side), Square::new(f, Rank::home(side)));
                board.place(Piece::new(Pawn, side), Square::new(f, Rank::pawns(side)));
            }
        }

        board
    }
}

/// Two boards are equal if they hold the same pieces on the same squares,
/// regardless of their identities.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.turn == other.turn
            && self.castles == other.castles
            && self.en_passant == other.en_passant
            && Square::iter().all(|sq| self[sq] == other[sq])
    }
}

impl Eq for Board {}

impl Board {
    fn bare(turn: Color, castles: Castles, en_passant: Option<Square>) -> Self {
        Board {
            grid: [None; 64],
            pieces: Vec::with_capacity(32),
            turn,
            castles,
            en_passant,
        }
    }

    /// Places a [`Piece`] on a [`Square`], replacing whatever stood there.
    fn place(&mut self, piece: Piece, square: Square) -> PieceId {
        self.remove(square);
        let id = PieceId(self.pieces.len() as _);
        self.pieces.push(Some(Placed { piece, square }));
        self.grid[square as usize] = Some(id);
        id
    }

    /// Removes the piece standing on a [`Square`], if any.
    fn remove(&mut self, square: Square) -> Option<Placed> {
        let id = self.grid[square as usize].take()?;
        self.pieces[id.index()].take()
    }

    /// Moves the piece standing on `whence`, if any, to `whither`,
    /// removing whatever stood there.
    fn relocate(&mut self, whence: Square, whither: Square) {
        if whence == whither {
            return;
        }

        if let Some(id) = self.grid[whence as usize].take() {
            self.remove(whither);
            if let Some(placed) = &mut self.pieces[id.index()] {
                placed.square = whither;
                self.grid[whither as usize] = Some(id);
            }
        }
    }

    /// The [`PieceId`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn id_on(&self, sq: Square) -> Option<PieceId> {
        self.grid[sq as usize]
    }

    /// The piece identified by [`PieceId`], if it is still on the board.
    #[inline(always)]
    pub fn get(&self, id: PieceId) -> Option<Placed> {
        self.pieces.get(id.index()).copied().flatten()
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.get(self.id_on(sq)?).map(|p| p.piece)
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(|p| p.color())
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn role_on(&self, sq: Square) -> Option<Role> {
        self.piece_on(sq).map(|p| p.role())
    }

    /// An iterator over the pieces on the board and their identities.
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, Placed)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some((PieceId(i as _), (*p)?)))
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.pieces().map(|(_, p)| (p.piece, p.square))
    }

    /// [`Square`]s occupied by a [`Color`].
    #[inline(always)]
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.iter()
            .filter(|(p, _)| p.color() == c)
            .map(|(_, sq)| sq)
            .collect()
    }

    /// [`Square`]s occupied by a [`Piece`].
    #[inline(always)]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.iter()
            .filter(|(p, _)| *p == piece)
            .map(|(_, sq)| sq)
            .collect()
    }

    /// [`Square`] occupied by a the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let piece = Piece::new(Role::King, side);
        self.by_piece(piece).into_iter().next()
    }

    /// Whether the grid and the piece list agree with each other.
    ///
    /// Every live piece must be referenced by the grid at its own square and nowhere else.
    pub fn is_consistent(&self) -> bool {
        let referenced = Square::iter().all(|sq| match self.id_on(sq) {
            None => true,
            Some(id) => self.get(id).is_some_and(|p| p.square == sq),
        });

        let placed = self.pieces().all(|(id, p)| self.id_on(p.square) == Some(id));

        referenced && placed
    }

    /// Plays a [`Move`] without checking whether it is legal.
    ///
    /// Fails only if there is no piece on the source square or if it coincides with the
    /// destination, in which case the board is left untouched.
    pub fn play(&mut self, m: Move) -> Result<MoveContext, IllegalMove> {
        let (whence, whither) = (m.whence(), m.whither());

        let mover = match self.id_on(whence).and_then(|id| self.get(id)) {
            Some(p) if whence != whither => p.piece,
            _ => return Err(IllegalMove(m)),
        };

        let (role, side) = (mover.role(), mover.color());
        let mut capture = self.remove(whither).map(|p| (p.piece.role(), whither));

        if role == Role::Pawn && self.en_passant == Some(whither) {
            if let Some(victim) = whither.offset(0, -forward(side)) {
                if self.piece_on(victim) == Some(Piece::new(Role::Pawn, !side)) {
                    self.remove(victim);
                    capture = Some((Role::Pawn, victim));
                }
            }
        }

        self.en_passant = match role {
            Role::Pawn if (whither.rank() - whence.rank()).abs() == 2 => {
                whence.offset(0, forward(side))
            }
            _ => None,
        };

        let mut promotion = Promotion::None;
        if let Some(r) = Option::<Role>::from(m.promotion()) {
            if role == Role::Pawn && whither.rank() == Rank::last(side) {
                if let Some(id) = self.id_on(whence) {
                    self.pieces[id.index()] = Some(Placed {
                        piece: Piece::new(r, side),
                        square: whence,
                    });

                    promotion = m.promotion();
                }
            }
        }

        self.relocate(whence, whither);

        if role == Role::King {
            self.castles.revoke(Castles::from(side));

            let rook = match (whence, whither) {
                (Square::E1, Square::G1) => Some((Square::H1, Square::F1)),
                (Square::E1, Square::C1) => Some((Square::A1, Square::D1)),
                (Square::E8, Square::G8) => Some((Square::H8, Square::F8)),
                (Square::E8, Square::C8) => Some((Square::A8, Square::D8)),
                _ => None,
            };

            // The rook only jumps over the king if it is there and has somewhere to land.
            if let Some((wc, wt)) = rook {
                let rook = Piece::new(Role::Rook, side);
                if self.piece_on(wc) == Some(rook) && self.id_on(wt).is_none() {
                    self.relocate(wc, wt);
                }
            }
        }

        if role == Role::Rook {
            self.castles.revoke(Castles::from(whence));
        }

        self.castles.revoke(Castles::from(whither));
        self.turn = !self.turn;

        Ok(MoveContext(Move(whence, whither, promotion), role, capture))
    }
}

/// Every [`Piece`] in [`Integer`] order, so the grid can hand out references to them.
static PIECES: [Option<Piece>; 12] = [
    Some(Piece::WhitePawn),
    Some(Piece::BlackPawn),
    Some(Piece::WhiteKnight),
    Some(Piece::BlackKnight),
    Some(Piece::WhiteBishop),
    Some(Piece::BlackBishop),
    Some(Piece::WhiteRook),
    Some(Piece::BlackRook),
    Some(Piece::WhiteQueen),
    Some(Piece::BlackQueen),
    Some(Piece::WhiteKing),
    Some(Piece::BlackKing),
];

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        match self.piece_on(sq) {
            Some(p) => &PIECES[p.get() as usize],
            None => &None,
        }
    }
}

/// Prints the board in [FEN] without move counters.
///
/// The alternate flag `{:#}` prints a diagram instead.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.diagram(f);
        }

        for rank in Rank::iter().rev() {
            let mut skip = 0;
            for file in File::iter() {
                match self[Square::new(file, rank)] {
                    None => skip += 1,
                    Some(p) => {
                        if skip > 0 {
                            write!(f, "{}", skip)?;
                            skip = 0;
                        }

                        f.write_char(p.letter())?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{}", skip)?;
            }

            if rank > Rank::First {
                f.write_char('/')?;
            }
        }

        match self.turn {
            Color::White => f.write_str(" w ")?,
            Color::Black => f.write_str(" b ")?,
        }

        if self.castles != Castles::none() {
            write!(f, "{} ", self.castles)?;
        } else {
            f.write_str("- ")?;
        }

        match self.en_passant {
            Some(ep) => write!(f, "{}", ep),
            None => f.write_str("-"),
        }
    }
}

impl Board {
    fn diagram(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut line = ArrayString::<32>::new();
            write!(line, "{rank}")?;
            for file in File::iter() {
                match self[Square::new(file, rank)] {
                    None => write!(line, " .")?,
                    Some(p) => write!(line, " {p}")?,
                }
            }

            writeln!(f, "{line}")?;
        }

        writeln!(f, "  a b c d e f g h")?;

        match self.castles {
            c if c == Castles::none() => writeln!(f, "castling: -")?,
            c => writeln!(f, "castling: {c}")?,
        }

        match self.en_passant {
            Some(ep) => writeln!(f, "en passant: {ep}")?,
            None => writeln!(f, "en passant: -")?,
        }

        write!(f, "turn: {}", self.turn)
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseFenError {
    #[display(fmt = "failed to parse piece placement")]
    InvalidPlacement,
    #[display(fmt = "failed to parse side to move")]
    InvalidSideToMove,
    #[display(fmt = "failed to parse castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "failed to parse en passant square")]
    InvalidEnPassantSquare,
    #[display(fmt = "expected between 4 and 6 space separated fields")]
    InvalidSyntax,
}

impl FromStr for Board {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_ascii_whitespace().collect();
        let (placement, turn, castles, en_passant) = match &fields[..] {
            [p, t, c, ep] | [p, t, c, ep, _] | [p, t, c, ep, _, _] => (*p, *t, *c, *ep),
            _ => return Err(ParseFenError::InvalidSyntax),
        };

        let turn = match turn {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidSideToMove),
        };

        let castles = match castles {
            "-" => Castles::none(),
            _ => match castles.parse() {
                Err(_) => return Err(ParseFenError::InvalidCastlingRights),
                Ok(castles) => castles,
            },
        };

        let en_passant = match en_passant {
            "-" => None,
            ep => match ep.parse() {
                Err(_) => return Err(ParseFenError::InvalidEnPassantSquare),
                Ok(sq) => Some(sq),
            },
        };

        let ranks: Vec<_> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseFenError::InvalidPlacement);
        }

        let mut board = Board::bare(turn, castles, en_passant);
        for (rank, segment) in Rank::iter().rev().zip(ranks) {
            let mut file = 0;
            for c in segment.chars() {
                let mut buffer = [0; 4];

                if let Some(skip @ 1..=8) = c.to_digit(10) {
                    file += skip as i8;
                } else if let Ok(p) = Piece::from_str(c.encode_utf8(&mut buffer)) {
                    let Some(f) = File::try_new(file) else {
                        return Err(ParseFenError::InvalidPlacement);
                    };

                    board.place(p, Square::new(f, rank));
                    file += 1;
                } else {
                    return Err(ParseFenError::InvalidPlacement);
                }

                if file > 8 {
                    return Err(ParseFenError::InvalidPlacement);
                }
            }

            if file != 8 {
                return Err(ParseFenError::InvalidPlacement);
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::hash_map, prelude::*};

        (
            hash_map(any::<Square>(), any::<Piece>(), 0..=32),
            any::<Color>(),
            any::<Castles>(),
            any::<Option<Square>>(),
        )
            .prop_map(|(placement, turn, castles, en_passant)| {
                let mut board = Board::bare(turn, castles, en_passant);
                for (sq, p) in placement {
                    board.place(p, sq);
                }

                board
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn default_board_is_the_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (p, sq) in b.iter() {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn pieces_are_reachable_by_their_identity(b: Board) {
        for (id, p) in b.pieces() {
            assert_eq!(b.get(id), Some(p));
            assert_eq!(b.id_on(p.square), Some(id));
        }
    }

    #[proptest]
    fn by_color_returns_squares_occupied_by_pieces_of_a_color(b: Board, c: Color) {
        for sq in b.by_color(c) {
            assert_eq!(b[sq].map(|p| p.color()), Some(c));
        }
    }

    #[proptest]
    fn by_piece_returns_squares_occupied_by_a_piece(b: Board, p: Piece) {
        for sq in b.by_piece(p) {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn king_returns_square_occupied_by_a_king(b: Board, c: Color) {
        if let Some(sq) = b.king(c) {
            assert_eq!(b[sq], Some(Piece::new(Role::King, c)));
        }
    }

    #[proptest]
    fn piece_on_returns_piece_on_the_given_square(b: Board, sq: Square) {
        assert_eq!(
            b.piece_on(sq),
            Option::zip(b.role_on(sq), b.color_on(sq)).map(|(r, c)| Piece::new(r, c))
        );
    }

    #[proptest]
    fn indexing_agrees_with_piece_on(b: Board, sq: Square) {
        assert_eq!(b[sq], b.piece_on(sq));
    }

    #[proptest]
    fn arbitrary_boards_are_consistent(b: Board) {
        assert!(b.is_consistent());
    }

    #[proptest]
    fn playing_keeps_the_board_consistent(mut b: Board, whence: Square, whither: Square) {
        let _ = b.play(Move(whence, whither, Promotion::None));
        assert!(b.is_consistent());
    }

    #[proptest]
    fn playing_from_an_empty_square_fails_without_changing_the_board(
        mut b: Board,
        #[filter(#b[#whence].is_none())] whence: Square,
        whither: Square,
    ) {
        let before = b.clone();
        let m = Move(whence, whither, Promotion::None);
        assert_eq!(b.play(m), Err(IllegalMove(m)));
        assert_eq!(b, before);
    }

    #[proptest]
    fn playing_flips_the_side_to_move(
        mut b: Board,
        #[filter(#b[#whence].is_some())] whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let turn = b.turn;
        b.play(Move(whence, whither, Promotion::None))?;
        assert_eq!(b.turn, !turn);
    }

    #[proptest]
    fn playing_moves_the_piece(
        mut b: Board,
        #[filter(#b[#whence].is_some_and(|p| p.role() != Role::King))] whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let p = b[whence];
        b.play(Move(whence, whither, Promotion::None))?;
        assert_eq!(b[whence], None);
        assert_eq!(b[whither], p);
    }

    #[proptest]
    fn castling_rights_never_grow(
        mut b: Board,
        #[filter(#b[#whence].is_some())] whence: Square,
        #[filter(#whence != #whither)] whither: Square,
    ) {
        let before = b.castles;
        b.play(Move(whence, whither, Promotion::None))?;
        assert_eq!(b.castles & before, b.castles);
    }

    #[test]
    fn double_push_sets_the_en_passant_square() {
        let mut b = Board::default();
        b.play(Move(Square::E2, Square::E4, Promotion::None)).unwrap();
        assert_eq!(b.en_passant, Some(Square::E3));
        b.play(Move(Square::G8, Square::F6, Promotion::None)).unwrap();
        assert_eq!(b.en_passant, None);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind_the_destination() {
        let mut b: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6".parse().unwrap();
        let mc = b.play(Move(Square::E5, Square::D6, Promotion::None)).unwrap();
        assert_eq!(mc.capture(), Some((Role::Pawn, Square::D5)));
        assert!(mc.is_en_passant());
        assert_eq!(b[Square::D5], None);
        assert_eq!(b[Square::D6], Some(Piece::WhitePawn));
        assert!(b.is_consistent());
    }

    #[test]
    fn promotion_replaces_the_pawn_only_on_the_last_rank() {
        let mut b: Board = "4k3/P7/8/8/8/8/1P6/4K3 w - -".parse().unwrap();
        let mc = b.play(Move(Square::B2, Square::B3, Promotion::Queen)).unwrap();
        assert!(!mc.is_promotion());
        assert_eq!(b[Square::B3], Some(Piece::WhitePawn));

        let mc = b.play(Move(Square::A7, Square::A8, Promotion::Knight)).unwrap();
        assert!(mc.is_promotion());
        assert_eq!(b[Square::A8], Some(Piece::WhiteKnight));
    }

    #[test]
    fn promotion_requires_a_specifier() {
        let mut b: Board = "4k3/P7/8/8/8/8/8/4K3 w - -".parse().unwrap();
        b.play(Move(Square::A7, Square::A8, Promotion::None)).unwrap();
        assert_eq!(b[Square::A8], Some(Piece::WhitePawn));
    }

    #[test]
    fn castling_moves_the_rook_and_revokes_rights() {
        let mut b: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -".parse().unwrap();
        let mc = b.play(Move(Square::E1, Square::G1, Promotion::None)).unwrap();
        assert!(mc.is_castling());
        assert_eq!(b[Square::F1], Some(Piece::WhiteRook));
        assert_eq!(b[Square::H1], None);
        assert_eq!(b.castles.to_string(), "kq");

        b.play(Move(Square::E8, Square::C8, Promotion::None)).unwrap();
        assert_eq!(b[Square::D8], Some(Piece::BlackRook));
        assert_eq!(b[Square::A8], None);
        assert_eq!(b.castles, Castles::none());
        assert!(b.is_consistent());
    }

    #[test]
    fn castling_leaves_the_rook_when_its_landing_square_is_taken() {
        let mut b: Board = "4k3/8/8/8/8/8/8/4KN1R w K -".parse().unwrap();
        b.play(Move(Square::E1, Square::G1, Promotion::None)).unwrap();
        assert!(b.is_consistent());
        assert_eq!(b[Square::F1], Some(Piece::WhiteKnight));
        assert_eq!(b[Square::H1], Some(Piece::WhiteRook));
        assert_eq!(b.to_string(), "4k3/8/8/8/8/8/8/5NKR b - -");
    }

    #[test]
    fn castling_without_a_rook_only_moves_the_king() {
        let mut b: Board = "4k3/8/8/8/8/8/8/4K2n w K -".parse().unwrap();
        b.play(Move(Square::E1, Square::G1, Promotion::None)).unwrap();
        assert!(b.is_consistent());
        assert_eq!(b.to_string(), "4k3/8/8/8/8/8/8/6Kn b - -");
    }

    #[proptest]
    fn castling_shaped_king_moves_keep_the_board_consistent(
        mut b: Board,
        c: Color,
        #[strategy(proptest::sample::select(vec![
            (Square::E1, Square::G1),
            (Square::E1, Square::C1),
            (Square::E8, Square::G8),
            (Square::E8, Square::C8),
        ]))]
        m: (Square, Square),
    ) {
        b.place(Piece::new(Role::King, c), m.0);
        b.play(Move(m.0, m.1, Promotion::None))?;
        assert!(b.is_consistent());
        assert_eq!(b[m.1], Some(Piece::new(Role::King, c)));
    }

    #[test]
    fn moving_or_capturing_rooks_revokes_rights() {
        let mut b: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq -".parse().unwrap();
        b.play(Move(Square::A1, Square::A8, Promotion::None)).unwrap();
        assert_eq!(b.castles.to_string(), "Kk");
    }

    #[test]
    fn landing_on_a_vacated_corner_still_revokes_rights() {
        let mut b: Board = "4k3/8/8/8/8/8/5N2/4K3 w K -".parse().unwrap();
        b.play(Move(Square::F2, Square::G4, Promotion::None)).unwrap();
        assert_eq!(b.castles.to_string(), "K");

        let mut b: Board = "4k3/8/8/8/8/8/5N2/4K3 w K -".parse().unwrap();
        b.play(Move(Square::F2, Square::H1, Promotion::None)).unwrap();
        assert_eq!(b.castles, Castles::none());
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn parsing_ignores_move_counters(b: Board, halfmoves: u8, fullmoves: u16) {
        assert_eq!(format!("{b} {halfmoves} {fullmoves}").parse(), Ok(b));
    }

    #[proptest]
    fn parsing_board_fails_for_invalid_fen(
        b: Board,
        #[strategy(..=#b.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = b.to_string();
        assert_eq!([&s[..n], &r, &s[n..]].concat().parse().ok(), None::<Board>);
    }

    #[test]
    fn parsing_board_fails_for_wrong_number_of_fields() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w -".parse::<Board>(),
            Err(ParseFenError::InvalidSyntax)
        );

        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1 x".parse::<Board>(),
            Err(ParseFenError::InvalidSyntax)
        );
    }

    #[test]
    fn parsing_board_fails_for_impossible_dimensions() {
        for fen in [
            "8/8/8/8/8/8/8 w - -",
            "8/8/8/8/8/8/8/8/8 w - -",
            "9/8/8/8/8/8/8/8 w - -",
            "7/8/8/8/8/8/8/8 w - -",
            "44p/8/8/8/8/8/8/8 w - -",
            "0p7/8/8/8/8/8/8/8 w - -",
            "x7/8/8/8/8/8/8/8 w - -",
        ] {
            assert_eq!(fen.parse::<Board>(), Err(ParseFenError::InvalidPlacement));
        }
    }

    #[test]
    fn parsing_board_fails_for_invalid_fields() {
        let placement = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

        assert_eq!(
            format!("{placement} x KQkq -").parse::<Board>(),
            Err(ParseFenError::InvalidSideToMove)
        );

        assert_eq!(
            format!("{placement} w KX -").parse::<Board>(),
            Err(ParseFenError::InvalidCastlingRights)
        );

        assert_eq!(
            format!("{placement} w KQkq e9").parse::<Board>(),
            Err(ParseFenError::InvalidEnPassantSquare)
        );
    }

    #[test]
    fn alternate_format_prints_a_diagram() {
        let diagram = format!("{:#}", Board::default());
        let lines: Vec<_> = diagram.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[4], "4 . . . . . . . .");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert_eq!(lines[9], "castling: KQkq");
        assert_eq!(lines[10], "en passant: -");
        assert_eq!(lines[11], "turn: white");
    }
}
