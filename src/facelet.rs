use std::fmt;

use rand::Rng;

use crate::constants::*;
use crate::error::Error;
use crate::history::MoveHistory;
use crate::moves::{Face, Move, ALL_FACES, ALL_MOVES};
use crate::phase::Phase;
use crate::scramble::Scramble;

/** Cube on the facelet level.

The 48 movable facelets are stored face by face in the order L, R, F, B, U, D, eight per face,
numbered clockwise from the top-left corner as seen when looking at that face:

```text
0 1 2
7 . 3
6 5 4
```

Up is seen with Back at its top edge, Down with Front at its top edge, and the four side faces
with Up on top. Centers never move and are not stored.
*/
#[derive(Clone)]
pub struct CubeState {
    pub(crate) tiles: [u8; N_TILE],
    history: MoveHistory,
    fitness: u32,
    fitness_plus_size: f64,
}

/// (destination, source) pairs of the 12 side facelets moved by a clockwise quarter turn of
/// each face. The face's own facelets are rotated separately.
#[rustfmt::skip]
const SIDE_CYCLES: [[(usize, usize); 12]; 6] = [
    // L
    [(DOWN, FRONT), (DOWN + 6, FRONT + 6), (DOWN + 7, FRONT + 7),
     (FRONT, UP), (FRONT + 6, UP + 6), (FRONT + 7, UP + 7),
     (UP, BACK + 4), (UP + 6, BACK + 2), (UP + 7, BACK + 3),
     (BACK + 2, DOWN + 6), (BACK + 3, DOWN + 7), (BACK + 4, DOWN)],
    // R
    [(BACK, UP + 4), (BACK + 6, UP + 2), (BACK + 7, UP + 3),
     (UP + 2, FRONT + 2), (UP + 3, FRONT + 3), (UP + 4, FRONT + 4),
     (FRONT + 2, DOWN + 2), (FRONT + 3, DOWN + 3), (FRONT + 4, DOWN + 4),
     (DOWN + 2, BACK + 6), (DOWN + 3, BACK + 7), (DOWN + 4, BACK)],
    // F
    [(RIGHT, UP + 6), (RIGHT + 6, UP + 4), (RIGHT + 7, UP + 5),
     (UP + 4, LEFT + 2), (UP + 5, LEFT + 3), (UP + 6, LEFT + 4),
     (LEFT + 2, DOWN), (LEFT + 3, DOWN + 1), (LEFT + 4, DOWN + 2),
     (DOWN, RIGHT + 6), (DOWN + 1, RIGHT + 7), (DOWN + 2, RIGHT)],
    // B
    [(LEFT, UP + 2), (LEFT + 6, UP), (LEFT + 7, UP + 1),
     (UP, RIGHT + 2), (UP + 1, RIGHT + 3), (UP + 2, RIGHT + 4),
     (RIGHT + 2, DOWN + 4), (RIGHT + 3, DOWN + 5), (RIGHT + 4, DOWN + 6),
     (DOWN + 4, LEFT + 6), (DOWN + 5, LEFT + 7), (DOWN + 6, LEFT)],
    // U
    [(LEFT, FRONT), (LEFT + 1, FRONT + 1), (LEFT + 2, FRONT + 2),
     (FRONT, RIGHT), (FRONT + 1, RIGHT + 1), (FRONT + 2, RIGHT + 2),
     (RIGHT, BACK), (RIGHT + 1, BACK + 1), (RIGHT + 2, BACK + 2),
     (BACK, LEFT), (BACK + 1, LEFT + 1), (BACK + 2, LEFT + 2)],
    // D
    [(LEFT + 4, BACK + 4), (LEFT + 5, BACK + 5), (LEFT + 6, BACK + 6),
     (BACK + 4, RIGHT + 4), (BACK + 5, RIGHT + 5), (BACK + 6, RIGHT + 6),
     (RIGHT + 4, FRONT + 4), (RIGHT + 5, FRONT + 5), (RIGHT + 6, FRONT + 6),
     (FRONT + 4, LEFT + 4), (FRONT + 5, LEFT + 5), (FRONT + 6, LEFT + 6)],
];

/// One position of the 54-facelet net.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetFacelet {
    Tile(usize),
    Center(Face),
}

use NetFacelet::{Center as C, Tile as T};

/// Net layout of snapshots: the Up face, the L F R B band row by row, then the Down face.
#[rustfmt::skip]
pub const NET_LAYOUT: [NetFacelet; N_NET] = [
    T(UP), T(UP + 1), T(UP + 2),
    T(UP + 7), C(Face::U), T(UP + 3),
    T(UP + 6), T(UP + 5), T(UP + 4),
    T(LEFT), T(LEFT + 1), T(LEFT + 2), T(FRONT), T(FRONT + 1), T(FRONT + 2),
    T(RIGHT), T(RIGHT + 1), T(RIGHT + 2), T(BACK), T(BACK + 1), T(BACK + 2),
    T(LEFT + 7), C(Face::L), T(LEFT + 3), T(FRONT + 7), C(Face::F), T(FRONT + 3),
    T(RIGHT + 7), C(Face::R), T(RIGHT + 3), T(BACK + 7), C(Face::B), T(BACK + 3),
    T(LEFT + 6), T(LEFT + 5), T(LEFT + 4), T(FRONT + 6), T(FRONT + 5), T(FRONT + 4),
    T(RIGHT + 6), T(RIGHT + 5), T(RIGHT + 4), T(BACK + 6), T(BACK + 5), T(BACK + 4),
    T(DOWN), T(DOWN + 1), T(DOWN + 2),
    T(DOWN + 7), C(Face::D), T(DOWN + 3),
    T(DOWN + 6), T(DOWN + 5), T(DOWN + 4),
];

/// Positions of the six centers inside a snapshot.
pub const CENTER_POSITIONS: [usize; 6] = [4, 22, 25, 28, 31, 49];

impl Default for CubeState {
    /// The solved cube.
    fn default() -> Self {
        let mut cube = Self {
            tiles: [0; N_TILE],
            history: MoveHistory::new(),
            fitness: 0,
            fitness_plus_size: 0.0,
        };
        cube.reset();
        cube
    }
}

impl CubeState {
    /// Set every facelet to its home color and forget history and fitness.
    pub fn reset(&mut self) {
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            *tile = (i / N_FACELET_PER_FACE) as u8 + 1;
        }
        self.history.clear();
        self.fitness = 0;
        self.fitness_plus_size = 0.0;
    }

    /// Become a copy of `other`, sharing its history instead of duplicating it.
    pub fn copy_from(&mut self, other: &CubeState) {
        self.tiles = other.tiles;
        self.history.clone_from(&other.history);
        self.fitness = other.fitness;
        self.fitness_plus_size = other.fitness_plus_size;
    }

    fn quarter_turn(&mut self, face: Face) {
        let old = self.tiles;
        let base = face as usize * N_FACELET_PER_FACE;
        self.tiles[base..base + N_FACELET_PER_FACE].rotate_right(2);
        for &(dst, src) in &SIDE_CYCLES[face as usize] {
            self.tiles[dst] = old[src];
        }
    }

    /// Apply a move and record it in the history.
    pub fn apply(&mut self, m: Move) {
        for _ in 0..m.quarter_turns() {
            self.quarter_turn(m.face());
        }
        self.history.push(m);
    }

    pub fn apply_moves(&mut self, moves: &[Move]) {
        for &m in moves {
            self.apply(m);
        }
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Drop the recorded history, keeping facelets and fitness.
    pub fn forget_history(&mut self) {
        self.history.clear();
    }

    /// Canonicalize the history in place and return its length.
    pub fn canonical_size(&mut self) -> usize {
        self.history.canonicalize()
    }

    /// The canonical move sequence in application order.
    pub fn canonical_moves(&mut self) -> Vec<Move> {
        self.history.canonicalize();
        self.history.moves()
    }

    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    pub fn fitness_plus_size(&self) -> f64 {
        self.fitness_plus_size
    }

    /// Make up to the phase's move budget of random legal moves, then rescore.
    pub fn mutate<R: Rng>(&mut self, phase: Phase, size_weight: f64, rng: &mut R) {
        let legal = phase.legal_moves();
        for _ in 0..rng.gen_range(0..=phase.max_moves()) {
            self.apply(legal[rng.gen_range(0..legal.len())]);
        }
        self.fitness = phase.fitness(self);
        self.fitness_plus_size = self.fitness as f64 + size_weight * self.canonical_size() as f64;
    }

    /// Scramble with 40 random moves, retrying until the canonical scramble is at least 25
    /// moves long. The history is dropped afterwards.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) -> Scramble {
        loop {
            self.reset();
            for _ in 0..SCRAMBLE_MOVES {
                self.apply(ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())]);
            }
            let moves = self.canonical_moves();
            if moves.len() >= MIN_SCRAMBLE_LENGTH {
                self.forget_history();
                return Scramble::new(moves);
            }
        }
    }

    /// Color of tile `tile_id` (`face * 8 + index`), if it exists.
    pub fn facelet(&self, tile_id: usize) -> Option<u8> {
        self.tiles.get(tile_id).copied()
    }

    /// Paint tile `tile_id` with palette index `color` (0..6). Out of range requests are ignored.
    pub fn set_facelet(&mut self, tile_id: usize, color: usize) {
        if tile_id < N_TILE && color < ALL_FACES.len() {
            self.tiles[tile_id] = color as u8 + 1;
        }
    }

    /// Map the cube net onto caller supplied labels, `palette[i]` standing for color `i + 1`.
    pub fn facelet_snapshot<Label: Clone>(&self, palette: &[Label; 6]) -> Vec<Label> {
        NET_LAYOUT
            .iter()
            .map(|&f| match f {
                NetFacelet::Tile(i) => palette[self.tiles[i] as usize - 1].clone(),
                NetFacelet::Center(face) => palette[face as usize].clone(),
            })
            .collect()
    }
}

impl fmt::Display for CubeState {
    /// 54 face letters in net order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = ALL_FACES.map(Face::letter);
        let s: String = self.facelet_snapshot(&letters).into_iter().collect();
        write!(f, "{}", s)
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubeState")
            .field("facelets", &self.to_string())
            .field("history", &self.history)
            .field("fitness", &self.fitness)
            .field("fitness_plus_size", &self.fitness_plus_size)
            .finish()
    }
}

impl PartialEq for CubeState {
    /// Two cubes are equal when their facelets match; history and scores are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl TryFrom<&str> for CubeState {
    type Error = Error;

    /// Parse 54 face letters in net order, whitespace ignored. Centers must name their face.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let letters: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.len() != N_NET {
            return Err(Error::InvalidFaceletString);
        }
        let mut cube = CubeState::default();
        for (&c, &position) in letters.iter().zip(NET_LAYOUT.iter()) {
            let face = Face::from_letter(c.to_ascii_uppercase())
                .ok_or(Error::InvalidFaceletValue(c))?;
            match position {
                NetFacelet::Tile(i) => cube.tiles[i] = face.color(),
                NetFacelet::Center(center) if center != face => {
                    return Err(Error::InvalidFaceletString)
                }
                NetFacelet::Center(_) => {}
            }
        }
        Ok(cube)
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::facelet::*;
    use crate::moves::Move::*;

    const SOLVED: &str = "UUUUUUUUULLLFFFRRRBBBLLLFFFRRRBBBLLLFFFRRRBBBDDDDDDDDD";

    #[test]
    fn test_solved_string() {
        let cube = CubeState::default();
        assert_eq!(cube.to_string(), SOLVED);
        assert_eq!(CubeState::try_from(SOLVED).unwrap(), cube);
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut start = CubeState::default();
        start.randomize(&mut rng);
        for m in [L, R, F, B, U, D] {
            let mut cube = start.clone();
            cube.apply(m);
            assert_ne!(cube, start);
            for _ in 0..3 {
                cube.apply(m);
            }
            assert_eq!(cube, start, "{m}");
        }
    }

    #[test]
    fn test_inverse_restores() {
        let mut cube = CubeState::default();
        cube.apply_moves(&[R, U, F3, D2, L, B3]);
        cube.apply_moves(&[B, L3, D2, F, U3, R3]);
        assert_eq!(cube, CubeState::default());
    }

    #[test]
    fn test_turn_moves_twenty_facelets() {
        for m in [L, R, F, B, U, D] {
            let mut cube = CubeState::default();
            // give every tile a distinct label so the permutation is visible
            for (i, t) in cube.tiles.iter_mut().enumerate() {
                *t = i as u8;
            }
            let before = cube.tiles;
            cube.apply(m);
            let moved = before.iter().zip(cube.tiles.iter()).filter(|(a, b)| a != b).count();
            assert_eq!(moved, 20, "{m}");
        }
    }

    #[test]
    fn test_u_turn() {
        let mut cube = CubeState::default();
        cube.apply(U);
        // front's top row now carries right's color
        assert_eq!(&cube.tiles[FRONT..FRONT + 3], &[RIGHT_COLOR; 3]);
        assert_eq!(&cube.tiles[LEFT..LEFT + 3], &[FRONT_COLOR; 3]);
        assert_eq!(
            cube.to_string(),
            "UUUUUUUUUFFFRRRBBBLLLLLLFFFRRRBBBLLLFFFRRRBBBDDDDDDDDD"
        );
    }

    #[test]
    fn test_r_turn() {
        let mut cube = CubeState::default();
        cube.apply(R);
        // the front right column came up from down
        for i in [2, 3, 4] {
            assert_eq!(cube.tiles[FRONT + i], DOWN_COLOR);
            assert_eq!(cube.tiles[UP + i], FRONT_COLOR);
        }
        for i in [0, 6, 7] {
            assert_eq!(cube.tiles[BACK + i], UP_COLOR);
        }
    }

    #[test]
    fn test_history_recorded() {
        let mut cube = CubeState::default();
        cube.apply_moves(&[R, R, U3]);
        assert_eq!(cube.history().moves(), vec![R, R, U3]);
        assert_eq!(cube.canonical_moves(), vec![R2, U3]);
    }

    #[test]
    fn test_copy_shares_history() {
        let mut a = CubeState::default();
        a.apply_moves(&[F, U]);
        let mut b = CubeState::default();
        b.copy_from(&a);
        assert_eq!(a, b);
        assert!(a.history().shares_head(b.history()));
        b.apply(D);
        assert_eq!(a.history().len(), 2);
        assert_eq!(b.history().len(), 3);
    }

    #[test]
    fn test_reset() {
        let mut cube = CubeState::default();
        cube.apply_moves(&[F, U]);
        cube.reset();
        assert_eq!(cube, CubeState::default());
        assert!(cube.history().is_empty());
        assert_eq!(cube.fitness(), 0);
    }

    #[test]
    fn test_randomize() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut cube = CubeState::default();
        let scramble = cube.randomize(&mut rng);
        assert!(scramble.moves.len() >= MIN_SCRAMBLE_LENGTH);
        assert!(scramble.moves.len() <= SCRAMBLE_MOVES);
        assert!(cube.history().is_empty());

        let mut replay = CubeState::default();
        replay.apply_moves(&scramble.moves);
        assert_eq!(replay, cube);
    }

    #[test]
    fn test_set_facelet() {
        let mut cube = CubeState::default();
        cube.set_facelet(UP + 3, 0);
        assert_eq!(cube.facelet(UP + 3), Some(LEFT_COLOR));
        cube.set_facelet(DOWN + 7, 5);
        assert_eq!(cube.facelet(DOWN + 7), Some(DOWN_COLOR));

        let before = cube.clone();
        cube.set_facelet(48, 2);
        cube.set_facelet(3, 6);
        assert_eq!(cube, before);
    }

    #[test]
    fn test_snapshot() {
        let mut cube = CubeState::default();
        cube.set_facelet(UP, 2);
        let snap = cube.facelet_snapshot(&["l", "r", "f", "b", "u", "d"]);
        assert_eq!(snap.len(), N_NET);
        assert_eq!(snap[0], "f");
        assert_eq!(snap[1], "u");
        for (p, label) in CENTER_POSITIONS.iter().zip(["u", "l", "f", "r", "b", "d"]) {
            assert_eq!(snap[*p], label);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            CubeState::try_from("UUU"),
            Err(Error::InvalidFaceletString)
        );
        let bad_letter = SOLVED.replacen('U', "X", 1);
        assert_eq!(
            CubeState::try_from(bad_letter.as_str()),
            Err(Error::InvalidFaceletValue('X'))
        );
        // swap the up center
        let bad_center = format!("UUUUDUUUU{}", &SOLVED[9..]);
        assert_eq!(
            CubeState::try_from(bad_center.as_str()),
            Err(Error::InvalidFaceletString)
        );
    }
}
