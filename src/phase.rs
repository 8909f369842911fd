use std::fmt;

use crate::facelet::CubeState;
use crate::moves::Move::{self, *};

/// Thistlethwaite's nested subgroups, split into the seven stages the evolutionary search
/// clears one after another. Each stage restricts the legal moves further.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// G0 -> G1: orient all edges.
    OrientEdges,
    /// G1, first half: bring the U/D edges out of the middle slice.
    SliceEdges,
    /// G1 -> G2: additionally orient all corners.
    OrientCorners,
    /// G2 -> G3: pair corners and edges into half-turn orbits.
    HalfTurnReduction,
    /// G3, first part: fix the F/B/U/D middle edges and rows.
    FrontBackRows,
    /// G3, second part: fix the U/D faces and the L/R middle edges and rows.
    UpDownFaces,
    /// G3 -> solved.
    Finish,
}

pub const ALL_PHASES: [Phase; 7] = [
    Phase::OrientEdges,
    Phase::SliceEdges,
    Phase::OrientCorners,
    Phase::HalfTurnReduction,
    Phase::FrontBackRows,
    Phase::UpDownFaces,
    Phase::Finish,
];

#[rustfmt::skip]
const G0_MOVES: [Move; 18] = [L, L2, L3, R, R2, R3, F, F2, F3, B, B2, B3, U, U2, U3, D, D2, D3];
#[rustfmt::skip]
const G1_MOVES: [Move; 14] = [L2, R2, F, F2, F3, B, B2, B3, U, U2, U3, D, D2, D3];
const G2_MOVES: [Move; 10] = [L2, R2, F2, B2, U, U2, U3, D, D2, D3];
const G3_MOVES: [Move; 6] = [L2, R2, F2, B2, U2, D2];
const G3_FBUD_MOVES: [Move; 4] = [F2, B2, U2, D2];
const G3_UD_MOVES: [Move; 2] = [U2, D2];

/// Per-phase rules: legal moves, most moves one mutation may make, and the fitness formula.
struct PhaseRules {
    legal_moves: &'static [Move],
    max_moves: usize,
    fitness: fn(&CubeState) -> u32,
}

const RULES: [PhaseRules; 7] = [
    PhaseRules {
        legal_moves: &G0_MOVES,
        max_moves: 7,
        fitness: |c| 10 * c.count_misoriented_edges(),
    },
    PhaseRules {
        legal_moves: &G1_MOVES,
        max_moves: 5,
        fitness: |c| 10 * c.count_misplaced_middle_edges(),
    },
    PhaseRules {
        legal_moves: &G1_MOVES,
        max_moves: 13,
        fitness: |c| 10 * c.count_misplaced_middle_edges() + 40 * c.count_misoriented_corners(),
    },
    PhaseRules {
        legal_moves: &G2_MOVES,
        max_moves: 15,
        fitness: |c| {
            16000 * c.count_turns_until_uniform_top_corners()
                + 800 * c.count_corner_pairs_not_matching()
                + 50 * c.count_turns_until_edges_good_color()
        },
    },
    PhaseRules {
        legal_moves: &G3_MOVES,
        max_moves: 9,
        fitness: |c| {
            15 * c.count_miscolored_middle_edges_fbud() + 75 * c.count_nonuniform_rows_fbud()
        },
    },
    PhaseRules {
        legal_moves: &G3_FBUD_MOVES,
        max_moves: 7,
        fitness: |c| {
            5 * c.count_miscolored_up_down_tiles()
                + 15 * c.count_miscolored_middle_edges_lr()
                + 15 * c.count_nonuniform_rows_lr()
        },
    },
    PhaseRules {
        legal_moves: &G3_UD_MOVES,
        max_moves: 1,
        fitness: |c| 5 * c.count_miscolored_tiles(),
    },
];

impl Phase {
    pub const FIRST: Phase = Phase::OrientEdges;
    pub const LAST: Phase = Phase::Finish;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Phase> {
        ALL_PHASES.get(i).copied()
    }

    pub fn next(self) -> Option<Phase> {
        Phase::from_index(self.index() + 1)
    }

    fn rules(self) -> &'static PhaseRules {
        &RULES[self.index()]
    }

    pub fn legal_moves(self) -> &'static [Move] {
        self.rules().legal_moves
    }

    pub fn max_moves(self) -> usize {
        self.rules().max_moves
    }

    /// Distance of `cube` from this phase's goal; 0 once the goal is met.
    pub fn fitness(self, cube: &CubeState) -> u32 {
        (self.rules().fitness)(cube)
    }

    pub fn goal_met(self, cube: &CubeState) -> bool {
        self.fitness(cube) == 0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.index(), self)
    }
}
