//! Random choice among equally eligible candidates.

use rand::Rng;

/// Chooses one of several equally eligible candidates.
pub trait CandidateSelector: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform selection from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCandidateSelector;

impl CandidateSelector for RandomCandidateSelector {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}
