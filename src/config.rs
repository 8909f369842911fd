use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::Error;

/// Tunables of the evolutionary search.
///
/// * `pop_size`: cubes mutated every generation.
/// * `num_survivors`: elite kept unchanged; everyone else is replaced by a copy of one of them.
/// * `max_generations_before_reset`: generations before an attempt is abandoned and the
///   population restarts from the seed.
/// * `num_selections`: survivor ranks sampled up front and replayed cyclically.
/// * `size_weight`: cost of one canonical move relative to one fitness point.
/// * `seed`: RNG seed, `None` for entropy. Results repeat for the same seed and `workers`.
/// * `workers`: threads used to mutate the population.
/// * `timeout`: wall clock limit checked between generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub pop_size: usize,
    pub num_survivors: usize,
    pub max_generations_before_reset: u64,
    pub num_selections: usize,
    pub size_weight: f64,
    pub seed: Option<u64>,
    pub workers: usize,
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pop_size: POP_SIZE,
            num_survivors: NUM_SURVIVORS,
            max_generations_before_reset: MAX_GENERATIONS_BEFORE_RESET,
            num_selections: NUM_SELECTIONS,
            size_weight: SIZE_WEIGHT,
            seed: None,
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            timeout: None,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.num_survivors == 0 {
            return Err(Error::Config("num_survivors must be positive".to_string()));
        }
        if self.pop_size < self.num_survivors {
            return Err(Error::Config(format!(
                "pop_size {} is smaller than num_survivors {}",
                self.pop_size, self.num_survivors
            )));
        }
        if self.num_selections == 0 {
            return Err(Error::Config("num_selections must be positive".to_string()));
        }
        if self.max_generations_before_reset == 0 {
            return Err(Error::Config(
                "max_generations_before_reset must be positive".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be positive".to_string()));
        }
        if !self.size_weight.is_finite() || self.size_weight < 0.0 {
            return Err(Error::Config(format!(
                "size_weight {} must be finite and not negative",
                self.size_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::config::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert_eq!(config.pop_size, 31_200);
        assert_eq!(config.num_survivors, 1_040);
        assert!(config.workers >= 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            SolverConfig {
                pop_size: 10,
                num_survivors: 20,
                ..Default::default()
            },
            SolverConfig {
                num_survivors: 0,
                ..Default::default()
            },
            SolverConfig {
                num_selections: 0,
                ..Default::default()
            },
            SolverConfig {
                max_generations_before_reset: 0,
                ..Default::default()
            },
            SolverConfig {
                workers: 0,
                ..Default::default()
            },
            SolverConfig {
                size_weight: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{config:?}");
        }
    }

    #[test]
    fn test_pop_size_equal_to_survivors() {
        let config = SolverConfig {
            pop_size: 100,
            num_survivors: 100,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
