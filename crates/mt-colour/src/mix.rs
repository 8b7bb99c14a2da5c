//! Subtractive mixing and the random proportion search.
//!
//! Paint mixes are modelled per channel as the weighted geometric mean of
//! the inputs' reflectance. The search samples random proportions across
//! rayon workers and keeps the closest mixes to a goal colour.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::colour::{Frgb, CHANNEL_MAX, EIGHT_BIT_SCALE};
use crate::{Error, Result};

/// Grams per millilitre of acrylic paint.
pub const ACRYLIC_G_PER_ML: f64 = 1.2;

/// Millilitres of paint to mix when no volume is given.
pub const DEFAULT_MIX_ML: f64 = 50.0;

const MIN_REFLECTANCE: f64 = 1.0 / CHANNEL_MAX;

/// Samples drawn between clock checks, and the size of one chunk of a
/// sample budget.
const SAMPLES_PER_CHECK: usize = 256;

/// The colour of `inputs` mixed in `proportions`.
pub fn mix(inputs: &[Frgb], proportions: &[f64]) -> Frgb {
    let total: f64 = proportions.iter().sum();
    if total <= 0.0 {
        return Frgb::default();
    }

    let mut log_sum = [0.0_f64; 3];
    for (input, weight) in inputs.iter().zip(proportions) {
        for (acc, c) in log_sum.iter_mut().zip(input.channels()) {
            *acc += weight * (c / CHANNEL_MAX).max(MIN_REFLECTANCE).ln();
        }
    }
    Frgb::from_channels(log_sum.map(|s| (s / total).exp() * CHANNEL_MAX))
}

/// Distance of a mix from `goal`; lower is better.
#[inline]
pub fn fit(inputs: &[Frgb], proportions: &[f64], goal: &Frgb) -> f64 {
    mix(inputs, proportions).distance(goal)
}

/// How long the search runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Duration(Duration),
    /// A fixed number of samples, split into seeded chunks.
    Samples(usize),
}

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub seed: u64,
    pub budget: Budget,
    /// Number of results to keep.
    pub keep: usize,
    /// Parallel sample streams for a [`Budget::Duration`] search.
    pub workers: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            budget: Budget::Duration(Duration::from_secs(5)),
            keep: 3,
            workers: rayon::current_num_threads(),
        }
    }
}

/// A candidate mix.
#[derive(Debug, Clone, PartialEq)]
pub struct MixResult {
    /// Distance from the goal on the 16-bit scale.
    pub fit: f64,
    pub proportions: Vec<f64>,
    pub colour: Frgb,
}

impl MixResult {
    /// Fit on the 8-bit scale, as reported.
    #[inline]
    pub fn fit_8bit(&self) -> f64 {
        self.fit / EIGHT_BIT_SCALE
    }

    /// Grams of each paint, with the running total, for `mix_ml` of paint.
    pub fn grams(&self, mix_ml: f64) -> Vec<(f64, f64)> {
        let total: f64 = self.proportions.iter().sum();
        if total <= 0.0 {
            return vec![(0.0, 0.0); self.proportions.len()];
        }

        let per_portion = mix_ml * ACRYLIC_G_PER_ML / total;
        let mut cumulative = 0.0;
        self.proportions
            .iter()
            .map(|p| {
                let grams = p * per_portion;
                cumulative += grams;
                (grams, cumulative)
            })
            .collect()
    }
}

/// Keep the `keep` lowest fits, dropping repeated fits.
fn insert_best(best: &mut Vec<MixResult>, candidate: MixResult, keep: usize) {
    if best.iter().any(|b| b.fit == candidate.fit) {
        return;
    }
    if best.len() == keep && best.last().map_or(false, |worst| candidate.fit >= worst.fit) {
        return;
    }

    let at = best.partition_point(|b| b.fit < candidate.fit);
    best.insert(at, candidate);
    best.truncate(keep);
}

fn sample(rng: &mut StdRng, inputs: &[Frgb], goal: &Frgb) -> MixResult {
    let proportions: Vec<f64> = inputs.iter().map(|_| rng.gen::<f64>()).collect();
    let colour = mix(inputs, &proportions);
    MixResult {
        fit: colour.distance(goal),
        proportions,
        colour,
    }
}

/// Draw from a seeded stream until the time runs out.
fn run_worker(
    worker: usize,
    inputs: &[Frgb],
    goal: &Frgb,
    opts: &SearchOptions,
    limit: Duration,
    start: Instant,
) -> (Vec<MixResult>, usize) {
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(worker as u64));
    let mut best = Vec::with_capacity(opts.keep + 1);
    let mut drawn = 0;

    while start.elapsed() < limit {
        for _ in 0..SAMPLES_PER_CHECK {
            insert_best(&mut best, sample(&mut rng, inputs, goal), opts.keep);
        }
        drawn += SAMPLES_PER_CHECK;
    }

    (best, drawn)
}

/// Draw one fixed-size chunk of a sample budget. Chunk `n` always uses the
/// stream seeded `seed + n`, whatever thread runs it.
fn run_chunk(
    chunk: usize,
    total: usize,
    inputs: &[Frgb],
    goal: &Frgb,
    opts: &SearchOptions,
) -> (Vec<MixResult>, usize) {
    let mut rng = StdRng::seed_from_u64(opts.seed.wrapping_add(chunk as u64));
    let mut best = Vec::with_capacity(opts.keep + 1);
    let len = SAMPLES_PER_CHECK.min(total - chunk * SAMPLES_PER_CHECK);

    for _ in 0..len {
        insert_best(&mut best, sample(&mut rng, inputs, goal), opts.keep);
    }

    (best, len)
}

/// Search for the proportions of `inputs` that best mix to `goal`.
///
/// Results come back best first. A [`Budget::Samples`] search gives the same
/// results for the same seed whatever `workers` is.
pub fn search(inputs: &[Frgb], goal: &Frgb, opts: &SearchOptions) -> Result<Vec<MixResult>> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let start = Instant::now();
    let per_task: Vec<(Vec<MixResult>, usize)> = match opts.budget {
        Budget::Samples(total) => (0..total.div_ceil(SAMPLES_PER_CHECK))
            .into_par_iter()
            .map(|chunk| run_chunk(chunk, total, inputs, goal, opts))
            .collect(),
        Budget::Duration(limit) => (0..opts.workers.max(1))
            .into_par_iter()
            .map(|worker| run_worker(worker, inputs, goal, opts, limit, start))
            .collect(),
    };

    let mut best = Vec::with_capacity(opts.keep + 1);
    let mut drawn = 0;
    for (results, count) in per_task {
        drawn += count;
        for result in results {
            insert_best(&mut best, result, opts.keep);
        }
    }
    log::info!("sampled {} mixes in {:?}", drawn, start.elapsed());

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Frgb {
        Frgb::from_hex(s).unwrap()
    }

    #[test]
    fn test_mix_single_input() {
        let red = hex("#c83214");
        let mixed = mix(&[red], &[0.7]);
        for (a, b) in mixed.channels().iter().zip(red.channels()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mix_geometric_mean() {
        let white = Frgb::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX);
        let grey = Frgb::new(CHANNEL_MAX / 4.0, CHANNEL_MAX / 4.0, CHANNEL_MAX / 4.0);
        let mixed = mix(&[white, grey], &[1.0, 1.0]);
        // sqrt(1 * 0.25) = 0.5
        assert!((mixed.r - CHANNEL_MAX / 2.0).abs() < 1e-6);

        // black is floored rather than absorbing everything
        let black = Frgb::default();
        let mixed = mix(&[white, black], &[1.0, 1.0]);
        assert!(mixed.r > 0.0);
        assert_eq!(mix(&[white], &[0.0]), Frgb::default());
    }

    #[test]
    fn test_grams() {
        let result = MixResult {
            fit: 514.0,
            proportions: vec![1.0, 3.0],
            colour: Frgb::default(),
        };
        assert_eq!(result.fit_8bit(), 2.0);
        let grams = result.grams(DEFAULT_MIX_ML);
        // 60g total
        assert!((grams[0].0 - 15.0).abs() < 1e-9);
        assert!((grams[1].0 - 45.0).abs() < 1e-9);
        assert!((grams[1].1 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_best() {
        let result = |fit: f64| MixResult {
            fit,
            proportions: vec![],
            colour: Frgb::default(),
        };
        let mut best = Vec::new();
        for fit in [5.0, 1.0, 3.0, 1.0, 4.0, 0.5] {
            insert_best(&mut best, result(fit), 3);
        }
        let fits: Vec<f64> = best.iter().map(|r| r.fit).collect();
        assert_eq!(fits, vec![0.5, 1.0, 3.0]);
    }

    #[test]
    fn test_search_is_seeded() {
        let inputs = [hex("#ffffff"), hex("#0000ff"), hex("#ffff00")];
        let goal = hex("#80c080");
        let opts = SearchOptions {
            budget: Budget::Samples(2000),
            workers: 4,
            ..SearchOptions::default()
        };

        let first = search(&inputs, &goal, &opts).unwrap();
        let second = search(&inputs, &goal, &opts).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert!(first.windows(2).all(|w| w[0].fit < w[1].fit));

        // better than any single paint alone
        let alone = inputs.iter().map(|c| c.distance(&goal)).fold(f64::MAX, f64::min);
        assert!(first[0].fit < alone);
    }

    #[test]
    fn test_search_independent_of_workers() {
        let inputs = [hex("#c81e1e"), hex("#1e32b4"), hex("#f0d21e")];
        let goal = hex("#6a4a8c");
        let opts = |workers| SearchOptions {
            budget: Budget::Samples(2000),
            workers,
            ..SearchOptions::default()
        };

        let two = search(&inputs, &goal, &opts(2)).unwrap();
        let eight = search(&inputs, &goal, &opts(8)).unwrap();
        let one = search(&inputs, &goal, &opts(1)).unwrap();
        assert_eq!(two, eight);
        assert_eq!(two, one);
    }

    #[test]
    fn test_search_without_inputs() {
        let opts = SearchOptions {
            budget: Budget::Samples(10),
            ..SearchOptions::default()
        };
        assert!(matches!(
            search(&[], &Frgb::default(), &opts),
            Err(Error::NoInputs)
        ));
    }
}
