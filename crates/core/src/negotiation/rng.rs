use rand::Rng;

/// Randomness capability for the negotiation engine. Kept behind a trait so
/// tests can script exact draw sequences.
pub trait RandomSource {
    fn next_bool(&mut self) -> bool;

    /// Uniform draw from the inclusive range `[low, high]`.
    fn next_in_range(&mut self, low: u32, high: u32) -> u32;
}

#[derive(Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_bool(&mut self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }

    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::{RandomSource, ThreadRngSource};

    #[test]
    fn thread_rng_stays_inside_the_inclusive_range() {
        let mut rng = ThreadRngSource;
        for _ in 0..200 {
            let value = rng.next_in_range(5, 15);
            assert!((5..=15).contains(&value));
        }
    }

    #[test]
    fn degenerate_range_returns_its_only_value() {
        let mut rng = ThreadRngSource;
        assert_eq!(rng.next_in_range(7, 7), 7);
    }
}
