//! Seedable xorshift64 generator used for hexes placed without a configuration.

/// Deterministic so that a given seed always deals the same board.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `lo..=hi`.
    pub fn range_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        debug_assert!(lo <= hi);
        let span = (hi - lo) as u64 + 1;
        lo + (self.next_u64() % span) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..50 {
            assert_eq!(a.range_inclusive(1, 7), b.range_inclusive(1, 7));
        }
    }

    #[test]
    fn stays_in_range() {
        let mut rng = Rng::new(0);
        for _ in 0..500 {
            let v = rng.range_inclusive(1, 7);
            assert!((1..=7).contains(&v), "got {v}");
        }
    }
}
