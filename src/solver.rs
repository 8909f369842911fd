use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::Error;
use crate::facelet::CubeState;
use crate::moves::Move;
use crate::phase::Phase;
use crate::sampler::SurvivorSampler;
use crate::scramble::scramble_to_str;

/// Solution result:
/// * solution: the canonical moves of the best cube, in the order they are made.
/// * notation: the same moves in standard notation.
/// * attempts: generations run, counting every abandoned attempt in full.
/// * resets: attempts abandoned after running out of generations.
/// * solve_time: time spent in the search.
/// * frames: facelet strings of the start cube and of the cube after every move.
/// * start: the cube the solution applies to.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct SolveResult {
    pub solution: Vec<Move>,
    pub notation: String,
    pub attempts: u64,
    pub resets: u64,
    pub solve_time: Duration,
    pub frames: Vec<String>,
    #[serde(skip)]
    pub start: CubeState,
}

impl SolveResult {
    /// The start cube and the cube after every move, as nets of `palette` labels.
    pub fn snapshots<Label: Clone>(&self, palette: &[Label; 6]) -> Vec<Vec<Label>> {
        replay(&self.start, &self.solution)
            .iter()
            .map(|cube| cube.facelet_snapshot(palette))
            .collect()
    }
}

/** Evolutionary search through the seven phases.

Every generation mutates the whole population with random legal moves of the current phase,
ranks it by `fitness + size_weight * canonical moves` and refills everything below the
`num_survivors` elite with copies of elite cubes chosen by the [SurvivorSampler]. The phase
advances once the whole elite meets the phase goal. An attempt that has not cleared every phase
within `max_generations_before_reset` generations restarts the search from the seed.
*/
pub struct Solver {
    config: SolverConfig,
    sampler: SurvivorSampler,
    population: Vec<CubeState>,
    rng: StdRng,
    pool: ThreadPool,
    cancel: Arc<AtomicBool>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self, Error> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sampler = SurvivorSampler::new(config.num_survivors, config.num_selections, &mut rng);
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
            .map_err(|e| Error::Config(format!("cannot start {} workers: {e}", config.workers)))?;
        Ok(Self {
            config,
            sampler,
            population: Vec::new(),
            rng,
            pool,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Use `flag` to stop the search; it is polled between generations.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn population(&self) -> &[CubeState] {
        &self.population
    }

    /// Fill the population with `pop_size` copies of `seed`.
    pub fn create_population(&mut self, seed: &CubeState) {
        self.population = vec![seed.clone(); self.config.pop_size];
    }

    fn reset_population(&mut self, seed: &CubeState) {
        for cube in self.population.iter_mut() {
            cube.copy_from(seed);
        }
    }

    fn mutate_all(&mut self, phase: Phase) {
        let size_weight = self.config.size_weight;
        let workers = self.config.workers.min(self.population.len()).max(1);
        let chunk = self.population.len().div_ceil(workers).max(1);
        // one seed per chunk, drawn in order so a run repeats for the same seed and workers
        let seeds: Vec<u64> = (0..workers).map(|_| self.rng.gen()).collect();
        let population = &mut self.population;
        self.pool.install(|| {
            population
                .par_chunks_mut(chunk)
                .zip(seeds)
                .for_each(|(cubes, seed)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    for cube in cubes {
                        cube.mutate(phase, size_weight, &mut rng);
                    }
                });
        });
    }

    /// Run one generation and return whether the whole elite meets the phase goal.
    ///
    /// The population is left sorted best first. After the last phase clears it is not
    /// resampled, so the best cube stays at rank 0.
    pub fn generation_step(&mut self, phase: Phase) -> bool {
        self.mutate_all(phase);
        self.population
            .sort_by(|a, b| a.fitness_plus_size().total_cmp(&b.fitness_plus_size()));
        let num_survivors = self.config.num_survivors.min(self.population.len());
        let cleared = self.population[..num_survivors]
            .iter()
            .all(|cube| cube.fitness() == 0);
        if !(phase == Phase::LAST && cleared) {
            let (elite, rest) = self.population.split_at_mut(num_survivors);
            for cube in rest {
                cube.copy_from(&elite[self.sampler.select()]);
            }
        }
        cleared
    }

    /// Search from `seed` until every phase has cleared.
    ///
    /// The seed is not verified; an unsolvable seed runs until cancelled or timed out.
    pub fn run(&mut self, seed: &CubeState) -> Result<SolveResult, Error> {
        let start_time = Instant::now();
        let mut start = seed.clone();
        start.forget_history();
        self.create_population(&start);

        let budget = self.config.max_generations_before_reset;
        let mut generation: u64 = 0;
        let mut resets: u64 = 0;
        let mut phase = Phase::FIRST;
        info!(
            "solving {} with {} cubes, {} survivors",
            start, self.config.pop_size, self.config.num_survivors
        );
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                info!("solve cancelled in phase {phase}");
                return Err(Error::Cancelled);
            }
            if let Some(timeout) = self.config.timeout {
                if start_time.elapsed() >= timeout {
                    let attempts = resets * budget + generation;
                    info!("solve timed out after {attempts} generations");
                    return Err(Error::Timeout { attempts });
                }
            }
            generation += 1;
            if generation > budget {
                warn!("stuck in phase {phase} after {budget} generations, restarting from the seed");
                self.reset_population(&start);
                generation = 0;
                phase = Phase::FIRST;
                resets += 1;
                continue;
            }
            let cleared = self.generation_step(phase);
            trace!(
                "generation {generation}, phase {phase}: best fitness {}, score {:.1}",
                self.population[0].fitness(),
                self.population[0].fitness_plus_size()
            );
            if cleared {
                debug!("phase {phase} cleared in generation {generation}");
                match phase.next() {
                    Some(next) => phase = next,
                    None => break,
                }
            }
        }

        let mut best = self.population[0].clone();
        let solution = best.canonical_moves();
        let solve_time = start_time.elapsed();
        let frames = replay(&start, &solution)
            .iter()
            .map(CubeState::to_string)
            .collect();
        let result = SolveResult {
            notation: scramble_to_str(&solution),
            solution,
            attempts: resets * budget + generation,
            resets,
            solve_time,
            frames,
            start,
        };
        info!(
            "solved in {} moves, {} generations, {:?}",
            result.solution.len(),
            result.attempts,
            result.solve_time
        );
        Ok(result)
    }
}

/// The cube before any move and after each move of `moves`.
pub fn replay(start: &CubeState, moves: &[Move]) -> Vec<CubeState> {
    let mut cube = start.clone();
    cube.forget_history();
    let mut states = Vec::with_capacity(moves.len() + 1);
    states.push(cube.clone());
    for &m in moves {
        cube.apply(m);
        states.push(cube.clone());
    }
    states
}

/// Solve a cube after checking that it is solvable and not solved yet.
///
/// # Examples
/// ```rust
/// use rubix::config::SolverConfig;
/// use rubix::facelet::CubeState;
/// use rubix::moves::Move::*;
/// use rubix::solver::solve;
///
/// let mut cube = CubeState::default();
/// cube.apply_moves(&[R, U]);
/// let config = SolverConfig {
///     pop_size: 3120,
///     num_survivors: 104,
///     seed: Some(1),
///     ..Default::default()
/// };
/// let result = solve(&cube, &config).unwrap();
/// cube.apply_moves(&result.solution);
/// assert!(cube.is_solved());
/// ```
pub fn solve(cube: &CubeState, config: &SolverConfig) -> Result<SolveResult, Error> {
    cube.verify()?;
    Solver::new(config.clone())?.run(cube)
}

/// Solve a cube given by its 54 letter facelet string.
pub fn solve_facelets(cubestring: &str, config: &SolverConfig) -> Result<SolveResult, Error> {
    let cube = CubeState::try_from(cubestring)?;
    solve(&cube, config)
}
