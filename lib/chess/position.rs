use crate::chess::{Bitboard, Board, Castles, Color, File, GameState, Outcome, ParseFenError};
use crate::chess::{Move, MoveContext, Piece, PieceId, Promotion, Rank, Role, Square};
use derive_more::{DebugCustom, Display, Error, From};
use proptest::sample::{Selector, SelectorStrategy};
use proptest::{prelude::*, strategy::Map};
use std::ops::{Index, Range};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "move `{}` is illegal in this position", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// The legal destinations of a piece.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PieceMoves {
    pub piece: Piece,
    pub square: Square,
    pub destinations: Bitboard,
}

/// The current position on the chess board.
///
/// This type guarantees that it only holds valid positions,
/// that is, each side has exactly one king and the side not to move is not in check.
#[derive(DebugCustom, Display, Clone)]
#[debug(fmt = "Position({})", self)]
#[display(fmt = "{}", _0)]
pub struct Position(Board, Vec<(PieceId, Bitboard)>);

impl Default for Position {
    fn default() -> Self {
        Position::new(Board::default())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Position {}

impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Position>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..50, any::<Selector>()).prop_map(|(plies, selector)| {
            let mut pos = Position::default();

            for _ in 0..plies {
                let moves: Vec<_> = pos.moves().collect();
                match selector.try_select(moves) {
                    None => break,
                    Some(m) => {
                        if pos.play(m).is_err() {
                            break;
                        }
                    }
                }
            }

            pos
        })
    }
}

impl Position {
    fn new(board: Board) -> Self {
        let table = legal_moves(&board);
        Position(board, table)
    }

    /// The underlying [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.0
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.0.turn
    }

    /// The castling rights.
    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.0.castles
    }

    /// The en passant square.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.0.en_passant
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.0.iter()
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.0.piece_on(sq)
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.0.king(side)
    }

    /// What the pieces in this position threaten.
    #[inline(always)]
    pub fn state(&self) -> GameState {
        self.0.state()
    }

    /// Whether this position is a [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        self.state().is_check()
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        self.is_immobile() && self.is_check()
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        self.is_immobile() && !self.is_check()
    }

    fn is_immobile(&self) -> bool {
        self.1.iter().all(|(_, bb)| bb.is_empty())
    }

    /// The [`Outcome`] of the game in case this position is final.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_checkmate() {
            Some(Outcome::Checkmate(!self.turn()))
        } else if self.is_stalemate() {
            Some(Outcome::Stalemate)
        } else {
            None
        }
    }

    /// The legal destinations of the piece on a [`Square`].
    ///
    /// Pieces of the side not to move have no legal destinations.
    pub fn destinations(&self, whence: Square) -> Bitboard {
        match self.0.id_on(whence) {
            None => Bitboard::empty(),
            Some(id) => self
                .1
                .iter()
                .find(|(i, _)| *i == id)
                .map_or_else(Bitboard::empty, |(_, bb)| *bb),
        }
    }

    /// Every piece on the board along with its legal destinations.
    pub fn possible_moves(&self) -> Vec<PieceMoves> {
        self.0
            .iter()
            .map(|(piece, square)| PieceMoves {
                piece,
                square,
                destinations: self.destinations(square),
            })
            .collect()
    }

    /// An iterator over the legal [`Move`]s that can be played in this position.
    ///
    /// Promotions are expanded into one move per promotion kind.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.1
            .iter()
            .filter_map(|&(id, bb)| Some((self.0.get(id)?, bb)))
            .flat_map(|(placed, bb)| {
                let (whence, piece) = (placed.square, placed.piece);
                bb.into_iter().flat_map(move |whither| {
                    let promotions: &'static [Promotion] = match piece.role() {
                        Role::Pawn if whither.rank() == Rank::last(piece.color()) => {
                            &Promotion::ROLES
                        }
                        _ => &[Promotion::None],
                    };

                    promotions.iter().map(move |&p| Move(whence, whither, p))
                })
            })
    }

    /// Play a [`Move`] if legal in this position.
    #[instrument(level = "trace", skip(self), err, fields(pos = %self))]
    pub fn play(&mut self, m: Move) -> Result<MoveContext, IllegalMove> {
        if !self.destinations(m.whence()).contains(m.whither()) {
            warn!(%m, "rejected illegal move");
            return Err(IllegalMove(m));
        }

        let mut board = self.0.clone();
        let mc = board.play(m)?;
        *self = Position::new(board);

        debug!(%m, capture = mc.is_capture(), "played move");
        Ok(mc)
    }
}

fn legal_moves(board: &Board) -> Vec<(PieceId, Bitboard)> {
    let side = board.turn;
    let state = board.state();

    board
        .pieces()
        .filter(|(_, p)| p.piece.color() == side)
        .map(|(id, p)| {
            let whence = p.square;
            let role = p.piece.role();

            let mut bb: Bitboard = role
                .moves(side, whence, board)
                .into_iter()
                .filter(|&whither| {
                    let mut next = board.clone();
                    let m = Move(whence, whither, Promotion::None);
                    next.play(m).is_ok() && !next.state().is_king_attacked(side)
                })
                .collect();

            if role == Role::King {
                bb |= castling(board, &state, whence);
            }

            (id, bb)
        })
        .collect()
}

fn castling(board: &Board, state: &GameState, whence: Square) -> Bitboard {
    let side = board.turn;
    let rank = Rank::home(side);
    let rook = Some(Piece::new(Role::Rook, side));
    let threats = state.attacks(!side);

    let mut bb = Bitboard::empty();
    if whence != Castles::king(side) || state.is_king_attacked(side) {
        return bb;
    }

    let clear = |files: &[File]| {
        files.iter().all(|&f| {
            let sq = Square::new(f, rank);
            board[sq].is_none() && !threats.contains(sq)
        })
    };

    if board.castles.has_short(side)
        && board[Castles::short_rook(side)] == rook
        && clear(&[File::F, File::G])
    {
        bb = bb.with(Square::new(File::G, rank));
    }

    if board.castles.has_long(side)
        && board[Castles::long_rook(side)] == rook
        && board[Square::new(File::B, rank)].is_none()
        && clear(&[File::D, File::C])
    {
        bb = bb.with(Square::new(File::C, rank));
    }

    bb
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Position {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq]
    }
}

/// The reason why the [`Board`] does not represent a valid [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
}

impl TryFrom<Board> for Position {
    type Error = IllegalPosition;

    fn try_from(board: Board) -> Result<Self, Self::Error> {
        for side in [Color::White, Color::Black] {
            match board.by_piece(Piece::new(Role::King, side)).len() {
                0 => return Err(IllegalPosition::MissingKing),
                1 => continue,
                _ => return Err(IllegalPosition::TooManyKings),
            }
        }

        if board.state().is_king_attacked(!board.turn) {
            return Err(IllegalPosition::OppositeCheck);
        }

        Ok(Position::new(board))
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    InvalidFen(ParseFenError),
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let board: Board = s.parse()?;
        Ok(Position::try_from(board)?)
    }
}
