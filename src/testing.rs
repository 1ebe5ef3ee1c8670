//! Reference helpers for tests: random edge lists and a naive reachability oracle that the
//! traversal-based algorithms are checked against.

use itertools::Itertools;
use rand::Rng;

use crate::{ops::*, *};

/// Creates a list of `m_ub` random directed edges for nodes `0..n`.
/// Self-loops and parallel edges are deliberately kept.
pub(crate) fn random_edges<R: Rng>(rng: &mut R, n: NumNodes, m_ub: NumEdges) -> Vec<Edge> {
    (0..m_ub)
        .map(|_| Edge(rng.random_range(0..n), rng.random_range(0..n)))
        .collect_vec()
}

/// `reach[u][v]` is *true* iff there is a directed path of length `>= 0` from `u` to `v`.
pub(crate) fn reachability_matrix<G: AdjacencyList>(graph: &G) -> Vec<Vec<bool>> {
    let n = graph.len();
    let mut reach = vec![vec![false; n]; n];

    for s in graph.vertices() {
        let row = &mut reach[s as usize];
        row[s as usize] = true;

        let mut stack = vec![s];
        while let Some(u) = stack.pop() {
            for v in graph.neighbors_of(u) {
                if !row[v as usize] {
                    row[v as usize] = true;
                    stack.push(v);
                }
            }
        }
    }

    reach
}

/// Returns *true* if `u` lies on a directed cycle (including a self-loop)
pub(crate) fn is_on_cycle<G: AdjacencyList>(graph: &G, reach: &[Vec<bool>], u: Node) -> bool {
    graph.neighbors_of(u).any(|v| reach[v as usize][u as usize])
}
