use crate::chess::{Color, Piece, Role, Square};
use crate::util::Integer;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, DebugCustom, Display, Error, Not};
use std::{fmt, str::FromStr};

/// The castling rights in a chess [`Position`][`crate::chess::Position`].
///
/// Bits are, from least to most significant: white kingside, white queenside,
/// black kingside, black queenside.
#[derive(
    DebugCustom,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Castles({})", self)]
pub struct Castles(#[cfg_attr(test, strategy(0u8..16))] u8);

impl Castles {
    /// No castling rights.
    #[inline(always)]
    pub fn none() -> Self {
        Castles(0b0000)
    }

    /// All castling rights.
    #[inline(always)]
    pub fn all() -> Self {
        Castles(0b1111)
    }

    /// Whether the given side has kingside castling rights.
    #[inline(always)]
    pub fn has_short(&self, side: Color) -> bool {
        *self & Castles::from(Self::short_rook(side)) != Castles::none()
    }

    /// Whether the given side has queenside castling rights.
    #[inline(always)]
    pub fn has_long(&self, side: Color) -> bool {
        *self & Castles::from(Self::long_rook(side)) != Castles::none()
    }

    /// The square the king starts on.
    #[inline(always)]
    pub fn king(side: Color) -> Square {
        match side {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// The home square of the kingside rook.
    #[inline(always)]
    pub fn short_rook(side: Color) -> Square {
        match side {
            Color::White => Square::H1,
            Color::Black => Square::H8,
        }
    }

    /// The home square of the queenside rook.
    #[inline(always)]
    pub fn long_rook(side: Color) -> Square {
        match side {
            Color::White => Square::A1,
            Color::Black => Square::A8,
        }
    }

    /// Revokes every right in `rights`.
    #[inline(always)]
    pub fn revoke(&mut self, rights: Castles) {
        *self &= !rights;
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

/// The right tied to the rook that starts on this square, if any.
impl From<Square> for Castles {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        match sq {
            Square::H1 => Castles(0b0001),
            Square::A1 => Castles(0b0010),
            Square::H8 => Castles(0b0100),
            Square::A8 => Castles(0b1000),
            _ => Castles::none(),
        }
    }
}

/// Both rights of a side.
impl From<Color> for Castles {
    #[inline(always)]
    fn from(side: Color) -> Self {
        Castles(0b0011 << (2 * side.get()))
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in Color::iter() {
            if self.has_short(side) {
                fmt::Display::fmt(&Piece::new(Role::King, side), f)?;
            }

            if self.has_long(side) {
                fmt::Display::fmt(&Piece::new(Role::Queen, side), f)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut castles = Castles::none();

        use Piece::*;
        for c in s.chars() {
            let mut buffer = [0; 4];

            match Piece::from_str(c.encode_utf8(&mut buffer)) {
                Ok(p @ WhiteKing | p @ BlackKing) if !castles.has_short(p.color()) => {
                    castles |= Castles::from(Castles::short_rook(p.color()));
                }

                Ok(p @ WhiteQueen | p @ BlackQueen) if !castles.has_long(p.color()) => {
                    castles |= Castles::from(Castles::long_rook(p.color()));
                }

                _ => return Err(ParseCastlesError),
            }
        }

        Ok(castles)
    }
}
