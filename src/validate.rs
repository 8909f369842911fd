//! Solvability check for cubes painted by hand.
//!
//! A painted cube is accepted when every corner and edge is a real cubie, each cubie appears
//! once, corner twist and edge flip sum to zero and corner and edge permutations share parity.
//! Cubies are recognised by the sum of the squares of their color codes, which is unique per
//! cubie for the palette 1..=6.

use crate::constants::*;
use crate::error::Error;
use crate::facelet::CubeState;

/// Facelets of the 8 corner slots, U/D facelet first.
#[rustfmt::skip]
const CORNER_SLOTS: [[usize; 3]; 8] = [
    [UP + 2, BACK, RIGHT + 2],
    [UP + 6, FRONT, LEFT + 2],
    [DOWN + 2, FRONT + 4, RIGHT + 6],
    [DOWN + 6, BACK + 4, LEFT + 6],
    [UP, BACK + 2, LEFT],
    [UP + 4, FRONT + 2, RIGHT],
    [DOWN, FRONT + 6, LEFT + 4],
    [DOWN + 4, BACK + 6, RIGHT + 4],
];

/// Sum of squared colors of the corner cubie that belongs in each slot.
const CORNER_SIGNATURES: [u32; 8] = [45, 35, 49, 53, 42, 38, 46, 56];

/// Facelets of the 12 edge slots. The first facelet decides the flip.
#[rustfmt::skip]
const EDGE_SLOTS: [[usize; 2]; 12] = [
    [LEFT + 3, FRONT + 7], [RIGHT + 7, FRONT + 3], [LEFT + 7, BACK + 3], [RIGHT + 3, BACK + 7],
    [UP + 7, LEFT + 1], [UP + 3, RIGHT + 1], [UP + 5, FRONT + 1], [UP + 1, BACK + 1],
    [DOWN + 7, LEFT + 5], [DOWN + 3, RIGHT + 5], [DOWN + 1, FRONT + 5], [DOWN + 5, BACK + 5],
];

const EDGE_SIGNATURES: [u32; 12] = [10, 13, 17, 20, 26, 29, 34, 41, 37, 40, 45, 52];

fn sum_of_squares(colors: &[u8]) -> u32 {
    colors.iter().map(|&c| c as u32 * c as u32).sum()
}

fn check_colors(colors: &[u8]) -> Result<(), Error> {
    if colors.iter().any(|c| !(LEFT_COLOR..=DOWN_COLOR).contains(c)) {
        return Err(Error::InvalidColor);
    }
    for (i, c) in colors.iter().enumerate() {
        if colors[i + 1..].contains(c) {
            return Err(Error::DuplicateColor);
        }
    }
    Ok(())
}

/// Record that the cubie in `slot` belongs at the slot matching its signature.
fn place(
    permutation: &mut [Option<usize>],
    signatures: &[u32],
    colors: &[u8],
    slot: usize,
) -> Result<usize, Error> {
    let sum = sum_of_squares(colors);
    let home = signatures
        .iter()
        .position(|&s| s == sum)
        .ok_or(Error::UnknownCubie)?;
    if permutation[home].replace(slot).is_some() {
        return Err(Error::DuplicateCubie);
    }
    Ok(home)
}

/// Whether a permutation of `0..p.len()` is even. Input that is no permutation is odd.
pub fn permutation_is_even(p: &[usize]) -> bool {
    let mut seen = vec![false; p.len()];
    for &x in p {
        match seen.get_mut(x) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    let mut visited = vec![false; p.len()];
    let mut even = true;
    for start in 0..p.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut j = p[start];
        while j != start {
            even = !even;
            visited[j] = true;
            j = p[j];
        }
    }
    even
}

impl CubeState {
    /// Check that the cube can be solved and is not already solved.
    pub fn verify(&self) -> Result<(), Error> {
        if self.is_solved() {
            return Err(Error::AlreadySolved);
        }
        let corners = self.corner_permutation()?;
        let edges = self.edge_permutation()?;
        if permutation_is_even(&corners) != permutation_is_even(&edges) {
            return Err(Error::PermutationParity);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    fn corner_permutation(&self) -> Result<Vec<usize>, Error> {
        let mut permutation = [None; 8];
        let (mut x, mut y, mut z) = (0, 0, 0);
        for (slot, &facelets) in CORNER_SLOTS.iter().enumerate() {
            let colors = facelets.map(|f| self.tiles[f]);
            check_colors(&colors)?;
            let home = place(&mut permutation, &CORNER_SIGNATURES, &colors, slot)?;

            // slots 0..4 and 4..8 form the two tetrads; a, b weigh twists by tetrad
            let same_tetrad = home / 4 == slot / 4;
            let a = slot / 4 + 1;
            let b = 2 - slot / 4;
            let (c0, c1) = (colors[0], colors[1]);
            if c0 > BACK_COLOR {
                if c1 < FRONT_COLOR {
                    if same_tetrad {
                        return Err(Error::CornerTwist);
                    }
                    z += b;
                    y += a;
                } else if !same_tetrad {
                    return Err(Error::CornerTwist);
                }
            } else if c0 < FRONT_COLOR {
                z += a;
                if c1 > BACK_COLOR {
                    if !same_tetrad {
                        return Err(Error::CornerTwist);
                    }
                    x += a;
                    y += a;
                } else {
                    if same_tetrad {
                        return Err(Error::CornerTwist);
                    }
                    x += b;
                }
            } else {
                y += b;
                if c1 < FRONT_COLOR {
                    if !same_tetrad {
                        return Err(Error::CornerTwist);
                    }
                    z += b;
                    x += b;
                } else {
                    if same_tetrad {
                        return Err(Error::CornerTwist);
                    }
                    x += a;
                }
            }
        }
        if x % 3 != 0 || y % 3 != 0 || z % 3 != 0 {
            return Err(Error::CornerTwist);
        }
        Ok(permutation.iter().flatten().copied().collect())
    }

    fn edge_permutation(&self) -> Result<Vec<usize>, Error> {
        let mut permutation = [None; 12];
        let mut flipped = false;
        for (slot, &facelets) in EDGE_SLOTS.iter().enumerate() {
            let colors = facelets.map(|f| self.tiles[f]);
            check_colors(&colors)?;
            place(&mut permutation, &EDGE_SIGNATURES, &colors, slot)?;
            if colors[0] == FRONT_COLOR || colors[0] == BACK_COLOR || colors[1] > BACK_COLOR {
                flipped = !flipped;
            }
        }
        if flipped {
            return Err(Error::EdgeFlip);
        }
        Ok(permutation.iter().flatten().copied().collect())
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::constants::*;
    use crate::error::Error;
    use crate::facelet::CubeState;
    use crate::moves::Move::*;
    use crate::validate::*;

    #[test]
    fn test_permutation_parity() {
        assert!(permutation_is_even(&[0, 1, 2, 3]));
        assert!(!permutation_is_even(&[1, 0, 2, 3]));
        assert!(permutation_is_even(&[1, 2, 0]));
        assert!(!permutation_is_even(&[1, 2, 3, 0]));
        assert!(!permutation_is_even(&[0, 0, 1]));
        assert!(!permutation_is_even(&[0, 5]));
        assert!(permutation_is_even(&[]));
    }

    #[test]
    fn test_solved_is_rejected() {
        assert_eq!(CubeState::default().verify(), Err(Error::AlreadySolved));
        assert!(!CubeState::default().is_valid());
    }

    #[test]
    fn test_scrambles_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let mut cube = CubeState::default();
            cube.randomize(&mut rng);
            assert_eq!(cube.verify(), Ok(()));
        }
        let mut cube = CubeState::default();
        cube.apply_moves(&[R, U, R3, U3]);
        assert!(cube.is_valid());
    }

    #[test]
    fn test_twisted_corner() {
        let mut cube = CubeState::default();
        cube.apply(F);
        let (a, b, c) = (cube.tiles[UP + 2], cube.tiles[BACK], cube.tiles[RIGHT + 2]);
        cube.tiles[UP + 2] = b;
        cube.tiles[BACK] = c;
        cube.tiles[RIGHT + 2] = a;
        assert_eq!(cube.verify(), Err(Error::CornerTwist));
    }

    #[test]
    fn test_flipped_edge() {
        let mut cube = CubeState::default();
        cube.apply(D);
        cube.tiles.swap(UP + 7, LEFT + 1);
        assert_eq!(cube.verify(), Err(Error::EdgeFlip));
    }

    #[test]
    fn test_swapped_edges() {
        let mut cube = CubeState::default();
        cube.tiles.swap(UP + 7, UP + 3);
        cube.tiles.swap(LEFT + 1, RIGHT + 1);
        assert_eq!(cube.verify(), Err(Error::PermutationParity));
    }

    #[test]
    fn test_bad_colors() {
        let mut cube = CubeState::default();
        cube.tiles[UP] = 0;
        assert_eq!(cube.verify(), Err(Error::InvalidColor));

        let mut cube = CubeState::default();
        cube.tiles[BACK] = UP_COLOR;
        assert_eq!(cube.verify(), Err(Error::DuplicateColor));

        let mut cube = CubeState::default();
        cube.tiles[BACK] = DOWN_COLOR;
        assert_eq!(cube.verify(), Err(Error::UnknownCubie));

        let mut cube = CubeState::default();
        // a second up-front-left corner
        cube.tiles[BACK] = FRONT_COLOR;
        cube.tiles[RIGHT + 2] = LEFT_COLOR;
        assert_eq!(cube.verify(), Err(Error::DuplicateCubie));
    }
}
