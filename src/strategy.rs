/// The largest run count still served by a chain of range tests.
///
/// Past this point the linear scan over runs may start to cost, and a map
/// is used instead of yet another algorithm such as binary search.
pub const MAX_SWITCH_RUNS: usize = 10;

/// Shape of the generated lookup construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One contiguous run, indexed directly.
    OneRun,
    /// A few runs, each tested by range then indexed locally.
    MultiRun,
    /// Sparse values, served by a value to name map.
    SparseMap,
}

impl Strategy {
    /// Picks the strategy for a given number of runs.
    pub fn select(run_count: usize) -> Self {
        debug_assert!(run_count > 0, "Normalized input always has a run");
        match run_count {
            0 | 1 => Strategy::OneRun,
            n if n <= MAX_SWITCH_RUNS => Strategy::MultiRun,
            _ => Strategy::SparseMap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Strategy::select(1), Strategy::OneRun);
        assert_eq!(Strategy::select(2), Strategy::MultiRun);
        assert_eq!(Strategy::select(10), Strategy::MultiRun);
        assert_eq!(Strategy::select(11), Strategy::SparseMap);
    }
}
