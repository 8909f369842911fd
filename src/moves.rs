use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use self::Move::*;
use crate::constants::N_MOVE;
use crate::error::Error;

/// The six faces in move-id order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Face {
    L,
    R,
    F,
    B,
    U,
    D,
}

pub const ALL_FACES: [Face; 6] = [Face::L, Face::R, Face::F, Face::B, Face::U, Face::D];

impl Face {
    pub fn letter(self) -> char {
        match self {
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
            Face::U => 'U',
            Face::D => 'D',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        ALL_FACES.into_iter().find(|f| f.letter() == c)
    }

    /// Home color code of the face.
    pub fn color(self) -> u8 {
        self as u8 + 1
    }
}

/// Layer moves, Left, Right, Front, Back, Up, Down.
///
/// $ clockwise, $2 double, $3 counter-clockwise. The discriminant is the move id:
/// `id / 3` is the face, `id % 3` the turn and `id / 6` the axis.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Move {
    L, L2, L3,
    R, R2, R3,
    F, F2, F3,
    B, B2, B3,
    U, U2, U3,
    D, D2, D3,
}

#[rustfmt::skip]
pub const ALL_MOVES: [Move; N_MOVE] = [
    L, L2, L3,
    R, R2, R3,
    F, F2, F3,
    B, B2, B3,
    U, U2, U3,
    D, D2, D3,
];

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = self.face().letter();
        match self.turn() {
            0 => write!(f, "{face}"),
            1 => write!(f, "{face}2"),
            _ => write!(f, "{face}'"),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = chars
            .next()
            .and_then(Face::from_letter)
            .ok_or_else(|| Error::InvalidMove(s.to_string()))?;
        let turn = match chars.as_str() {
            "" => 0,
            "2" => 1,
            "'" | "3" => 2,
            _ => return Err(Error::InvalidMove(s.to_string())),
        };
        Ok(Move::from_parts(face, turn))
    }
}

impl Move {
    pub fn from_id(id: u8) -> Option<Move> {
        ALL_MOVES.get(id as usize).copied()
    }

    fn from_parts(face: Face, turn: u8) -> Move {
        ALL_MOVES[face as usize * 3 + turn as usize]
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn face(self) -> Face {
        ALL_FACES[self as usize / 3]
    }

    /// 0 clockwise quarter, 1 half, 2 counter-clockwise quarter.
    pub fn turn(self) -> u8 {
        self as u8 % 3
    }

    /// Opposite faces share an axis: L/R, F/B, U/D.
    pub fn axis(self) -> u8 {
        self as u8 / 6
    }

    /// Number of clockwise quarter turns the move performs.
    pub fn quarter_turns(self) -> usize {
        self.turn() as usize + 1
    }

    pub fn is_same_layer(self, other: Move) -> bool {
        self.face() == other.face()
    }

    pub fn is_same_axis(self, other: Move) -> bool {
        self.axis() == other.axis()
    }

    pub fn get_inverse(self) -> Self {
        Move::from_parts(self.face(), 2 - self.turn())
    }
}

#[cfg(test)]
mod test {
    use crate::moves::*;

    #[test]
    fn test_move_ids() {
        for (i, m) in ALL_MOVES.iter().enumerate() {
            assert_eq!(m.id() as usize, i);
            assert_eq!(Move::from_id(i as u8), Some(*m));
        }
        assert_eq!(Move::from_id(18), None);
        assert_eq!(U2.face(), Face::U);
        assert_eq!(D3.turn(), 2);
        assert_eq!(R.axis(), L3.axis());
        assert_ne!(F.axis(), U.axis());
    }

    #[test]
    fn test_notation() {
        assert_eq!(L.to_string(), "L");
        assert_eq!(B2.to_string(), "B2");
        assert_eq!(U3.to_string(), "U'");
        assert_eq!("D'".parse::<Move>().unwrap(), D3);
        assert_eq!("F3".parse::<Move>().unwrap(), F3);
        assert_eq!("R2".parse::<Move>().unwrap(), R2);
        assert!("X".parse::<Move>().is_err());
        assert!("U4".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_inverse() {
        assert_eq!(L.get_inverse(), L3);
        assert_eq!(D3.get_inverse(), D);
        assert_eq!(F2.get_inverse(), F2);
        assert!(U.is_same_layer(U3));
        assert!(!U.is_same_layer(D));
        assert!(U.is_same_axis(D2));
    }
}
