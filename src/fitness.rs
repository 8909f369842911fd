//! Counting heuristics behind the phase fitness formulas.
//!
//! Every function inspects a fixed set of facelets. The values are not plain counts in all
//! cases: several return an estimate of the turns still needed, and the search relies on
//! their exact relative ordering.

use crate::constants::*;
use crate::facelet::CubeState;

/// (facelet, partner) pairs of the 12 edges as seen by edge orientation.
#[rustfmt::skip]
const ORIENTATION_EDGES: [(usize, usize); 12] = [
    (LEFT + 3, FRONT + 7), (RIGHT + 7, FRONT + 3), (LEFT + 7, BACK + 3), (RIGHT + 3, BACK + 7),
    (UP + 7, LEFT + 1), (UP + 3, RIGHT + 1), (UP + 5, FRONT + 1), (DOWN + 7, LEFT + 5),
    (DOWN + 3, RIGHT + 5), (UP + 1, BACK + 1), (DOWN + 1, FRONT + 5), (DOWN + 5, BACK + 5),
];

/// Corner facelets on the U and D faces.
const UD_CORNERS: [usize; 8] = [UP, UP + 2, UP + 4, UP + 6, DOWN, DOWN + 2, DOWN + 4, DOWN + 6];

/// Side facelet pairs of each corner, checked when crediting corner orientation.
#[rustfmt::skip]
const CORNER_SIDES: [(usize, usize); 8] = [
    (RIGHT, BACK + 6), (RIGHT + 2, FRONT + 4), (RIGHT + 4, FRONT + 2), (RIGHT + 6, BACK),
    (LEFT, FRONT + 6), (LEFT + 2, BACK + 4), (LEFT + 4, BACK + 2), (LEFT + 6, FRONT),
];

fn edge_flipped_correctly(tile: u8, partner: u8) -> bool {
    tile != FRONT_COLOR && tile != BACK_COLOR && partner < UP_COLOR
}

impl CubeState {
    fn tile(&self, i: usize) -> u8 {
        self.tiles[i]
    }

    fn uniform_top(&self, face: usize) -> bool {
        self.tile(face) == self.tile(face + 1) && self.tile(face + 1) == self.tile(face + 2)
    }

    fn uniform_bottom(&self, face: usize) -> bool {
        self.tile(face + 4) == self.tile(face + 5) && self.tile(face + 5) == self.tile(face + 6)
    }

    /// Edges that a G1 move sequence could not bring home. Max 12.
    pub fn count_misoriented_edges(&self) -> u32 {
        ORIENTATION_EDGES
            .iter()
            .filter(|&&(a, b)| !edge_flipped_correctly(self.tile(a), self.tile(b)))
            .count() as u32
    }

    /// U/D edges sitting in the middle slice, scaled to a turn estimate.
    pub fn count_misplaced_middle_edges(&self) -> u32 {
        let slice = [LEFT + 3, LEFT + 7, RIGHT + 7, RIGHT + 3];
        let mut num: u32 = 0;
        let mut wrong_indices_sum: usize = 0;
        for (i, &t) in slice.iter().enumerate() {
            if self.tile(t) > BACK_COLOR {
                num += 1;
                if i < 2 {
                    wrong_indices_sum += i;
                }
            }
        }
        if num != 2 {
            return num * 3;
        }
        if wrong_indices_sum % 2 == 1 {
            return 2;
        }
        if wrong_indices_sum == 4 {
            wrong_indices_sum = 6;
        }
        // only an index sum of 0 gets here, and there is no down facelet before index 0
        let up = self.tile(UP + 7 - wrong_indices_sum);
        let down = wrong_indices_sum
            .checked_sub(1)
            .map(|i| self.tile(DOWN + i));
        match down {
            Some(down) if up < UP_COLOR && down < UP_COLOR => 1,
            _ => 2,
        }
    }

    /// Corners without a U/D sticker on the U/D faces, less corners whose side stickers are
    /// both U/D colored. Max 8.
    pub fn count_misoriented_corners(&self) -> u32 {
        let mut num = UD_CORNERS
            .iter()
            .filter(|&&t| self.tile(t) < UP_COLOR)
            .count() as u32;
        if num < 2 {
            return num;
        }
        for &(a, b) in &CORNER_SIDES {
            if self.tile(a) > BACK_COLOR && self.tile(b) > BACK_COLOR {
                num = num.saturating_sub(1);
            }
        }
        num
    }

    /// Turns until the U corners are all U colored (or all D) and the rest sit on D. Max 5.
    pub fn count_turns_until_uniform_top_corners(&self) -> u32 {
        let corners = [UP, UP + 2, UP + 4, UP + 6];
        let mut top_colors_on_top = 0;
        let mut first_top = 0;
        let mut first_other = 0;
        for (i, &t) in corners.iter().enumerate().rev() {
            if self.tile(t) == UP_COLOR {
                top_colors_on_top += 1;
                first_top = i;
            } else {
                first_other = i;
            }
        }
        if top_colors_on_top % 4 == 0 {
            return 0;
        }
        if top_colors_on_top == 1 {
            let hit = self.tile(DOWN + first_top) == DOWN_COLOR
                || self.tile(DOWN + first_top + 4) == DOWN_COLOR;
            return if hit { 3 } else { 4 };
        }
        if top_colors_on_top == 3 {
            let hit = self.tile(DOWN + first_other) == UP_COLOR
                || self.tile(DOWN + first_other + 4) == UP_COLOR;
            return if hit { 3 } else { 4 };
        }
        let top_diagonal = self.tile(UP) == self.tile(UP + 4);
        let bottom_diagonal = self.tile(DOWN) == self.tile(DOWN + 4);
        if top_diagonal && bottom_diagonal {
            return if self.tile(UP) == self.tile(DOWN + 6) { 3 } else { 4 };
        }
        if top_diagonal || bottom_diagonal {
            return 5;
        }
        if self.tile(UP) != self.tile(DOWN + 6) && self.tile(UP + 2) != self.tile(DOWN + 4) {
            1
        } else {
            2
        }
    }

    /// Side corner pairs that do not match, as a turn estimate. Max 16.
    ///
    /// Assumes the U/D corners are already uniform.
    pub fn count_corner_pairs_not_matching(&self) -> u32 {
        let mut count: u32 = 0;
        let mut sides_both_matching: u32 = 0;
        let mut sides_both_not_matching: u32 = 0;
        for face in [LEFT, RIGHT, FRONT, BACK] {
            let mut this_round = 0;
            if self.tile(face) != self.tile(face + 2) {
                this_round += 1;
            }
            if self.tile(face + 4) != self.tile(face + 6) {
                this_round += 1;
            }
            if this_round == 0 {
                sides_both_matching += 5;
            } else {
                count += this_round * 4;
                if this_round == 2 {
                    sides_both_not_matching += 5;
                }
            }
        }
        if count == 0 {
            return [LEFT, LEFT + 4]
                .iter()
                .filter(|&&t| self.tile(t) > RIGHT_COLOR)
                .count() as u32;
        }
        if count == 32 {
            return 3;
        }
        if count < 16 {
            return count - sides_both_not_matching;
        }
        if count > 16 {
            return 32 - count - sides_both_matching;
        }
        16 - sides_both_matching.max(sides_both_not_matching)
    }

    /// Turns until every U/D-layer edge shows an L/R color on L/R and an F/B color on F/B.
    /// Max 10 once both corner heuristics above are satisfied.
    pub fn count_turns_until_edges_good_color(&self) -> u32 {
        // (L/R facelet, F/B facelet) per edge, two circuits of two edges each
        let circuits = [
            [(LEFT + 1, FRONT + 5), (RIGHT + 1, BACK + 5)],
            [(LEFT + 5, FRONT + 1), (RIGHT + 5, BACK + 1)],
        ];
        let mut wrong = [0u32; 2];
        for (w, circuit) in wrong.iter_mut().zip(circuits.iter()) {
            for &(lr, fb) in circuit {
                if self.tile(lr) > RIGHT_COLOR {
                    *w += 1;
                }
                if self.tile(fb) < FRONT_COLOR {
                    *w += 1;
                }
            }
        }
        let mut c = (wrong[0] + 1) * (wrong[1] + 1) - 1;
        if c % 24 == 0 {
            return c / 4;
        }
        if c < 4 {
            c += 12;
        }
        c - 2 * (c / 5)
    }

    /// Middle edges on F and U showing the wrong color. Max 4.
    pub fn count_miscolored_middle_edges_fbud(&self) -> u32 {
        [
            (FRONT + 3, FRONT_COLOR),
            (FRONT + 7, FRONT_COLOR),
            (UP + 3, UP_COLOR),
            (UP + 7, UP_COLOR),
        ]
        .iter()
        .filter(|&&(t, color)| self.tile(t) != color)
        .count() as u32
    }

    /// Top and bottom rows of F, B, U and D that are not one color. Max 8.
    pub fn count_nonuniform_rows_fbud(&self) -> u32 {
        self.count_nonuniform_rows(&[FRONT, BACK, UP, DOWN])
    }

    fn count_nonuniform_rows(&self, faces: &[usize]) -> u32 {
        faces
            .iter()
            .map(|&f| !self.uniform_top(f) as u32 + !self.uniform_bottom(f) as u32)
            .sum()
    }

    /// Max 16.
    pub fn count_miscolored_up_down_tiles(&self) -> u32 {
        let up = self.tiles[UP..UP + 8].iter().filter(|&&t| t != UP_COLOR).count();
        let down = self.tiles[DOWN..DOWN + 8].iter().filter(|&&t| t != DOWN_COLOR).count();
        (up + down) as u32
    }

    /// Max 2.
    pub fn count_miscolored_middle_edges_lr(&self) -> u32 {
        [LEFT + 3, LEFT + 7]
            .iter()
            .filter(|&&t| self.tile(t) != LEFT_COLOR)
            .count() as u32
    }

    /// Max 4.
    pub fn count_nonuniform_rows_lr(&self) -> u32 {
        self.count_nonuniform_rows(&[RIGHT, LEFT])
    }

    /// Facelets away from their home face. 0 only for the solved cube.
    pub fn count_miscolored_tiles(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &t)| t != (i / N_FACELET_PER_FACE) as u8 + 1)
            .count() as u32
    }

    pub fn is_solved(&self) -> bool {
        self.count_miscolored_tiles() == 0
    }
}
