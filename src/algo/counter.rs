/// Hook for counting elementary operations inside an algorithm.
///
/// The count is diagnostic only: it lets a benchmark chart algorithmic cost against input
/// size and never influences the computed result. State lives in the counter the caller
/// passes in, so independent runs never share it.
pub trait OperationCounter {
    /// Records `ops` additional operations
    fn count(&mut self, ops: u64);
}

/// Counter that discards everything. This is the default for all algorithms.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoCounter;

impl OperationCounter for NoCounter {
    #[inline(always)]
    fn count(&mut self, _ops: u64) {}
}

/// Monotonically increasing operation total.
///
/// # Examples
/// ```
/// use dgraphs::{prelude::*, algo::*};
///
/// let g = AdjArray::from_edges(2, [(0, 1)]);
///
/// let mut ops = OpCounter::new();
/// g.dfs_forest_with_counter(&mut ops);
/// assert!(ops.get() > 0);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct OpCounter {
    total: u64,
}

impl OpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of operations counted so far
    pub fn get(&self) -> u64 {
        self.total
    }

    /// Sets the total back to `0`
    pub fn reset(&mut self) {
        self.total = 0;
    }
}

impl OperationCounter for OpCounter {
    #[inline]
    fn count(&mut self, ops: u64) {
        self.total += ops;
    }
}

impl<C: OperationCounter + ?Sized> OperationCounter for &mut C {
    #[inline]
    fn count(&mut self, ops: u64) {
        (**self).count(ops);
    }
}
