use crate::chess::{Color, IllegalMove, Move, MoveContext, Outcome, ParsePositionError};
use crate::chess::{PieceMoves, Position};
use derive_more::Display;
use std::fmt::{self, Formatter};
use std::str::FromStr;
use tracing::{debug, instrument};

/// A summary of the [`Game`] as seen from the position being viewed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Title {
    /// The side to move.
    pub turn: Color,
    /// The outcome, if the game is over.
    pub outcome: Option<Outcome>,
    /// Whether either king is attacked.
    pub king_attacked: bool,
    /// The 1-based index of the position being viewed and the length of the history,
    /// if the position being viewed is not the latest.
    pub history: Option<(usize, usize)>,
}

#[derive(Display)]
enum Side {
    #[display(fmt = "White")]
    White,
    #[display(fmt = "Black")]
    Black,
}

impl From<Color> for Side {
    fn from(c: Color) -> Self {
        match c {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Chess | Move Turn: {}", Side::from(self.turn))?;

        match self.outcome.map(|o| o.winner()) {
            Some(None) => return f.write_str(" | Draw by stalemate"),
            Some(Some(c)) => return write!(f, " | {} won", Side::from(c)),
            None => {}
        }

        if self.king_attacked {
            f.write_str(" | King under attack!")?;
        }

        if let Some((i, n)) = self.history {
            write!(f, " | Watching game history {i}/{n}")?;
        }

        Ok(())
    }
}

/// A game of chess.
///
/// Positions are kept in a linear history navigable by a cursor.
/// Playing a move while viewing an earlier position discards every position after it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    initial: Position,
    history: Vec<Position>,
    cursor: usize,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Position::default())
    }
}

impl FromStr for Game {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Game::new(s.parse()?))
    }
}

impl Game {
    /// Starts a game from the given [`Position`].
    pub fn new(initial: Position) -> Self {
        Game {
            history: vec![initial.clone()],
            initial,
            cursor: 0,
        }
    }

    /// The [`Position`] being viewed.
    pub fn position(&self) -> &Position {
        &self.history[self.cursor]
    }

    /// The index of the [`Position`] being viewed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The number of positions in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the history holds nothing but the initial position.
    pub fn is_empty(&self) -> bool {
        self.history.len() == 1
    }

    /// Whether the [`Position`] being viewed is not the latest.
    pub fn is_viewing_history(&self) -> bool {
        self.cursor + 1 != self.history.len()
    }

    /// Every piece in the position being viewed along with its legal destinations.
    pub fn possible_moves(&self) -> Vec<PieceMoves> {
        self.position().possible_moves()
    }

    /// A summary of the position being viewed.
    pub fn title(&self) -> Title {
        let pos = self.position();
        let state = pos.state();

        Title {
            turn: pos.turn(),
            outcome: pos.outcome(),
            king_attacked: state.is_king_attacked(Color::White)
                || state.is_king_attacked(Color::Black),
            history: match self.is_viewing_history() {
                true => Some((self.cursor + 1, self.history.len())),
                false => None,
            },
        }
    }

    /// Plays a [`Move`] from the position being viewed.
    ///
    /// Every position after the one being viewed is discarded.
    #[instrument(level = "debug", skip(self), err, fields(cursor = self.cursor))]
    pub fn play(&mut self, m: Move) -> Result<MoveContext, IllegalMove> {
        let mut next = self.position().clone();
        let mc = next.play(m)?;

        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;

        Ok(mc)
    }

    /// Views the initial position.
    #[instrument(level = "trace", skip(self))]
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Views the previous position, if any.
    #[instrument(level = "trace", skip(self))]
    pub fn skip_backward(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Views the next position, if any.
    #[instrument(level = "trace", skip(self))]
    pub fn skip(&mut self) {
        self.cursor = (self.cursor + 1).min(self.history.len() - 1);
    }

    /// Views the latest position.
    #[instrument(level = "trace", skip(self))]
    pub fn fast_forward(&mut self) {
        self.cursor = self.history.len() - 1;
    }

    /// Discards the history and starts over from the initial position.
    #[instrument(level = "debug", skip(self))]
    pub fn restart(&mut self) {
        self.history = vec![self.initial.clone()];
        self.cursor = 0;
    }

    /// Discards the history and starts over from a new initial position.
    ///
    /// Nothing changes if the FEN string does not represent a valid position.
    #[instrument(level = "debug", skip(self), err)]
    pub fn restart_with(&mut self, fen: &str) -> Result<(), ParsePositionError> {
        self.initial = fen.parse()?;
        debug!(initial = %self.initial, "replaced the initial position");
        self.restart();
        Ok(())
    }

    /// Discards the history and starts over from the standard starting position.
    #[instrument(level = "debug", skip(self))]
    pub fn restart_with_starting_position(&mut self) {
        self.initial = Position::default();
        self.restart();
    }
}
