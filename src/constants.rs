/// Number of distinct moves, six faces with three turns each.
pub const N_MOVE: usize = 18;

/// Movable facelets per face; the center never moves.
pub const N_FACELET_PER_FACE: usize = 8;

/// Movable facelets on the whole cube.
pub const N_TILE: usize = 48;

/// Facelets shown by a snapshot of the cube net, centers included.
pub const N_NET: usize = 54;

/// Offsets of each face inside the flat tile array.
pub const LEFT: usize = 0;
pub const RIGHT: usize = 8;
pub const FRONT: usize = 16;
pub const BACK: usize = 24;
pub const UP: usize = 32;
pub const DOWN: usize = 40;

/// Color codes. Every face's home color is its face index plus one.
pub const LEFT_COLOR: u8 = 1;
pub const RIGHT_COLOR: u8 = 2;
pub const FRONT_COLOR: u8 = 3;
pub const BACK_COLOR: u8 = 4;
pub const UP_COLOR: u8 = 5;
pub const DOWN_COLOR: u8 = 6;

/// Default solver tunables.
pub const POP_SIZE: usize = 31_200;
pub const NUM_SURVIVORS: usize = 1_040;
pub const MAX_GENERATIONS_BEFORE_RESET: u64 = 1_000_000;
pub const NUM_SELECTIONS: usize = 100_000;
pub const SIZE_WEIGHT: f64 = 1.9;

/// Scrambles make this many random moves per attempt.
pub const SCRAMBLE_MOVES: usize = 40;
/// A scramble is retried until its canonical length reaches this.
pub const MIN_SCRAMBLE_LENGTH: usize = 25;
