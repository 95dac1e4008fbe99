use crate::chess::{ParsePromotionError, ParseSquareError, Promotion, Role, Square};
use derive_more::{DebugCustom, Deref, Display, Error, From};
use std::str::FromStr;

/// The context of a chess move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deref)]
pub struct MoveContext(#[deref] pub Move, pub Role, pub Option<(Role, Square)>);

impl MoveContext {
    /// The [`Role`] of the piece moved.
    pub fn role(&self) -> Role {
        self.1
    }

    /// The [`Role`] of the piece captured and where it stood.
    pub fn capture(&self) -> Option<(Role, Square)> {
        self.2
    }

    /// Whether this is a promotion move.
    pub fn is_promotion(&self) -> bool {
        self.role() == Role::Pawn && self.promotion() != Promotion::None
    }

    /// Whether this is a castling move.
    pub fn is_castling(&self) -> bool {
        self.role() == Role::King && (self.whence().file() - self.whither().file()).abs() > 1
    }

    /// Whether this is a capture move.
    pub fn is_capture(&self) -> bool {
        self.capture().is_some()
    }

    /// Whether this is an en passant capture move.
    pub fn is_en_passant(&self) -> bool {
        self.capture().is_some_and(|(_, s)| self.whither() != s)
    }
}

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}{}", _0, _1, _2)]
pub struct Move(pub Square, pub Square, pub Promotion);

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier.
    pub fn promotion(&self) -> Promotion {
        self.2
    }
}

/// The reason why the string is not valid move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "failed to parse move")]
    InvalidPromotion(ParsePromotionError),
    #[display(fmt = "failed to parse move, expected 4 or 5 characters")]
    InvalidLength,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(ParseMoveError::InvalidLength);
        }

        Ok(Move(s[..2].parse()?, s[2..4].parse()?, s[4..].parse()?))
    }
}
