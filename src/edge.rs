use std::fmt::{Debug, Display};

use crate::Node;

/// A directed edge `Edge(u, v)` from `u` to `v`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Bijection from `0..n*(n - 1)` to all loop-free directed edges of `n` nodes.
    ///
    /// Each source `u` owns the block `u*(n-1)..(u+1)*(n-1)`; the offset `r` inside the block
    /// enumerates the targets `0..n` with `u` itself skipped.
    pub fn from_u64_no_loops(x: u64, n: u64) -> Self {
        debug_assert!(n > 1);
        debug_assert!(x < n * (n - 1));

        let u = x / (n - 1);
        let r = x % (n - 1);
        let v = if r >= u { r + 1 } else { r };

        Edge(u as Node, v as Node)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn from_u64_no_loops_is_bijective() {
        for n in 2..12u64 {
            let edges = (0..n * (n - 1))
                .map(|x| Edge::from_u64_no_loops(x, n))
                .collect_vec();

            assert!(edges.iter().all(|e| !e.is_loop()));
            assert!(edges.iter().all(|e| (e.0 as u64) < n && (e.1 as u64) < n));
            assert_eq!(edges.iter().unique().count() as u64, n * (n - 1));
        }
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Edge(3, 4)), "(3,4)");
        assert_eq!(format!("{:?}", Edge(3, 4).reverse()), "(4,3)");
    }
}
