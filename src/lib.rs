//! A crate for manipulating and solving the 3x3 Rubik's cube with an evolutionary search through
//! [Thistlethwaite's](https://www.jaapsch.net/puzzles/thistle.htm) nested subgroups.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rubix::{config::SolverConfig, scramble::gen_scramble, solver::solve};
//!
//! let mut rng = StdRng::seed_from_u64(3);
//! let (mut cube, scramble) = gen_scramble(&mut rng);
//! let config = SolverConfig {
//!     pop_size: 3120,
//!     num_survivors: 104,
//!     seed: Some(3),
//!     ..Default::default()
//! };
//! let result = solve(&cube, &config).unwrap();
//! println!("{} -> {}", scramble.notation, result.notation);
//! cube.apply_moves(&result.solution);
//! assert!(cube.is_solved());
//! ```

pub mod config;
/// Module containing 3x3 cube constants.
pub mod constants;
pub mod error;
pub mod facelet;
pub mod fitness;
pub mod history;
pub mod moves;
pub mod phase;
pub mod sampler;
/// Module containing functions for scrambling the cube.
pub mod scramble;
pub mod solver;
pub mod validate;

pub use crate::config::SolverConfig;
pub use crate::error::Error;
pub use crate::facelet::CubeState;
pub use crate::moves::Move;
pub use crate::solver::{solve, SolveResult, Solver};
pub use crate::validate::permutation_is_even;
