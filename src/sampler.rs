//! Rank selection for the survivors that repopulate each generation.
//!
//! Rank `i` of `n` survivors is drawn with probability proportional to `((n - 1) / n)^i`, so the
//! best survivors are copied most often while every survivor keeps a chance. Drawing fresh
//! random numbers for every copy is too slow, so a fixed number of samples is taken up front
//! and replayed cyclically.

use rand::Rng;

pub struct SurvivorSampler {
    selections: Vec<usize>,
    cursor: usize,
}

/// Cumulative geometric distribution over `n` ranks. The last entry is exactly 1.
pub fn cumulative_probabilities(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let ratio = (n - 1) as f64 / n as f64;
    let mut prob = (1.0 / n as f64) / (1.0 - ratio.powi(n as i32));
    let mut cumulative = vec![0.0; n];
    cumulative[0] = prob;
    for i in 1..n - 1 {
        prob *= ratio;
        cumulative[i] = cumulative[i - 1] + prob;
    }
    cumulative[n - 1] = 1.0;
    cumulative
}

impl SurvivorSampler {
    /// Take `num_selections` samples over `num_survivors` ranks.
    pub fn new<R: Rng>(num_survivors: usize, num_selections: usize, rng: &mut R) -> Self {
        let cumulative = cumulative_probabilities(num_survivors);
        let selections = (0..num_selections)
            .map(|_| {
                let r: f64 = rng.gen();
                cumulative.partition_point(|&c| c <= r)
            })
            .collect();
        Self {
            selections,
            cursor: 0,
        }
    }

    /// The next cached rank; wraps around at the end of the table.
    pub fn select(&mut self) -> usize {
        if self.cursor >= self.selections.len() {
            self.cursor = 0;
        }
        let rank = self.selections[self.cursor];
        self.cursor += 1;
        rank
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::sampler::*;

    #[test]
    fn test_cumulative_probabilities() {
        let cum = cumulative_probabilities(1040);
        assert_eq!(cum.len(), 1040);
        assert_eq!(cum[1039], 1.0);
        assert!(cum.windows(2).all(|w| w[0] < w[1]));
        // first rank is about 1.58 times as likely as uniform for large n
        let first = cum[0] * 1040.0;
        assert!((first - 1.582).abs() < 0.01, "{first}");
        // the unforced sum already reaches 1 up to rounding
        assert!((cum[1038] + cum[0] * (1039.0f64 / 1040.0).powi(1039) - 1.0).abs() < 1e-9);

        assert_eq!(cumulative_probabilities(1), vec![1.0]);
        assert!(cumulative_probabilities(0).is_empty());
    }

    #[test]
    fn test_samples_favor_top_ranks() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sampler = SurvivorSampler::new(100, 100_000, &mut rng);
        assert_eq!(sampler.len(), 100_000);
        let mut counts = [0usize; 100];
        for _ in 0..sampler.len() {
            counts[sampler.select()] += 1;
        }
        let top: usize = counts[..10].iter().sum();
        let bottom: usize = counts[90..].iter().sum();
        assert!(top > bottom);
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_cursor_wraps() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sampler = SurvivorSampler::new(8, 3, &mut rng);
        let first: Vec<usize> = (0..3).map(|_| sampler.select()).collect();
        let second: Vec<usize> = (0..3).map(|_| sampler.select()).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|&r| r < 8));
    }

    #[test]
    fn test_single_survivor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sampler = SurvivorSampler::new(1, 50, &mut rng);
        assert!((0..50).all(|_| sampler.select() == 0));
    }
}
