//! Deterministic random number generation.
//!
//! PCG (Permuted Congruential Generator) with partitioned seeds. The master
//! generator never feeds an ant directly: it only hands out seeds, one per
//! ant per iteration, in a fixed order. Every ant then draws from its own
//! stream, so a run is bitwise-reproducible regardless of how many threads
//! construct the ants.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct ColonyRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Next stream index handed out by [`ColonyRng::partition`].
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl ColonyRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get the next stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Split off `n` independent generators, one per ant.
    ///
    /// Each child is seeded from the next draw of this generator, so the
    /// same sequence of calls always yields the same children and no two
    /// calls share a stream.
    ///
    /// ```rust
    /// use antpath::rng::ColonyRng;
    ///
    /// let mut rng = ColonyRng::new(42);
    /// let ants = rng.partition(4);
    /// assert_eq!(ants.len(), 4);
    /// assert_eq!(rng.stream(), 4);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n as u64)
            .map(|i| Self {
                master_seed: self.master_seed,
                stream: self.stream + i,
                rng: Pcg64::seed_from_u64(self.gen_u64()),
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random u64.
    pub fn gen_u64(&mut self) -> u64 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_draws(parts: &mut [ColonyRng]) -> Vec<f64> {
        parts.iter_mut().map(ColonyRng::gen_f64).collect()
    }

    #[test]
    fn test_partition_advances_stream() {
        let mut rng = ColonyRng::new(7);
        let first = rng.partition(3);
        let second = rng.partition(3);

        assert_eq!(rng.stream(), 6);
        assert_eq!(first[2].stream(), 2);
        assert_eq!(second[0].stream(), 3);
        assert!(first.iter().chain(&second).all(|p| p.master_seed() == 7));
    }

    #[test]
    fn test_later_partitions_get_fresh_streams() {
        // ant i of iteration k must not replay ant i of iteration k - 1
        let mut rng = ColonyRng::new(2024);
        let mut first = rng.partition(5);
        let mut second = rng.partition(5);

        let a = first_draws(&mut first);
        let b = first_draws(&mut second);
        for (i, (x, y)) in a.iter().zip(&b).enumerate() {
            assert_ne!(x, y, "stream {i} repeated across partitions");
        }
    }

    #[test]
    fn test_split_calls_match_one_call() {
        // 3 + 2 ants must see the same streams as 5 ants in one call
        let mut whole = ColonyRng::new(99);
        let mut split = ColonyRng::new(99);

        let mut all = whole.partition(5);
        let mut head = split.partition(3);
        let mut tail = split.partition(2);
        head.append(&mut tail);

        assert_eq!(first_draws(&mut all), first_draws(&mut head));
    }

    #[test]
    fn test_empty_partition_is_noop() {
        let mut rng = ColonyRng::new(5);
        assert!(rng.partition(0).is_empty());
        assert_eq!(rng.stream(), 0);

        let mut fresh = ColonyRng::new(5);
        assert_eq!(
            first_draws(&mut rng.partition(2)),
            first_draws(&mut fresh.partition(2))
        );
    }

    #[test]
    fn test_partition_does_not_mirror_master() {
        let mut rng = ColonyRng::new(11);
        let mut parts = rng.partition(1);
        let mut master = ColonyRng::new(11);
        assert_ne!(parts[0].gen_u64(), master.gen_u64());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_unit_interval(seed in 0u64..u64::MAX) {
            let mut rng = ColonyRng::new(seed);
            for _ in 0..100 {
                let v = rng.gen_f64();
                prop_assert!((0.0..1.0).contains(&v), "Value {} not in [0, 1)", v);
            }
        }

        #[test]
        fn prop_partition_reproducible(seed in 0u64..u64::MAX, n in 1usize..32) {
            let mut rng1 = ColonyRng::new(seed);
            let mut rng2 = ColonyRng::new(seed);
            let mut p1 = rng1.partition(n);
            let mut p2 = rng2.partition(n);
            prop_assert_eq!(p1.len(), n);
            for (a, b) in p1.iter_mut().zip(p2.iter_mut()) {
                prop_assert_eq!(a.gen_u64(), b.gen_u64());
            }
        }
    }
}
