use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::facelet::CubeState;
use crate::{error::Error, moves::Move};

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(Move::from_str).collect()
}

pub fn scramble_to_str(s: &[Move]) -> String {
    s.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
}

/// A move sequence together with its notation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scramble {
    pub moves: Vec<Move>,
    pub notation: String,
}

impl Scramble {
    pub fn new(moves: Vec<Move>) -> Self {
        let notation = scramble_to_str(&moves);
        Self { moves, notation }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The solved cube with the scramble applied and no recorded history.
    pub fn cube(&self) -> CubeState {
        let mut cube = CubeState::default();
        cube.apply_moves(&self.moves);
        cube.forget_history();
        cube
    }
}

impl FromStr for Scramble {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Scramble::new(scramble_from_str(s)?))
    }
}

/// A random cube at least 25 canonical moves away from solved, and the moves that made it.
pub fn gen_scramble<R: Rng>(rng: &mut R) -> (CubeState, Scramble) {
    let mut cube = CubeState::default();
    let scramble = cube.randomize(rng);
    (cube, scramble)
}
