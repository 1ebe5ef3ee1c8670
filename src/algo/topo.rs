/*!
Topological ordering by incremental in-degree reduction (Kahn's algorithm).

[`KahnSearch`] is a lazy iterator over the nodes in a valid topological order. It stops early
if the graph contains a cycle; [`TopologicalOrder`] tells both outcomes apart.
*/

use std::collections::VecDeque;

use super::*;

/// Iterator implementing Kahn's algorithm over a directed graph.
///
/// - Initializes with all nodes of in-degree 0 in ascending order.
/// - Repeatedly dequeues a node, decreasing the in-degrees of its successors (once per edge),
///   and enqueues nodes whose in-degree drops to 0.
/// - Stops once the queue runs dry, which happens early iff there is a cycle.
pub struct KahnSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    queue: VecDeque<Node>,
    num_emitted: NumNodes,
}

impl<'a, G> KahnSearch<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        let in_degs = graph.in_degrees();

        let queue: VecDeque<Node> = in_degs
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| (d == 0).then_some(i as Node))
            .collect();

        Self {
            graph,
            in_degs,
            queue,
            num_emitted: 0,
        }
    }

    /// Runs the search to completion
    pub fn into_order(mut self) -> TopologicalOrder {
        let ordered = self.by_ref().collect_vec();
        let n = self.graph.number_of_nodes();

        debug!(
            "topo: n={} ordered={} cycle={}",
            n,
            ordered.len(),
            ordered.len() < n as usize
        );

        if ordered.len() == n as usize {
            return TopologicalOrder::Sorted(ordered);
        }

        let blocked = self
            .in_degs
            .iter()
            .enumerate()
            .filter_map(|(u, &d)| (d > 0).then_some(u as Node))
            .collect_vec();

        debug_assert_eq!(ordered.len() + blocked.len(), n as usize);

        TopologicalOrder::CycleDetected { ordered, blocked }
    }
}

impl<'a, G> Iterator for KahnSearch<'a, G>
where
    G: AdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            self.in_degs[v as usize] -= 1;
            if self.in_degs[v as usize] == 0 {
                self.queue.push_back(v);
            }
        }

        self.num_emitted += 1;
        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.queue.len(),
            Some(self.graph.len() - self.num_emitted as usize),
        )
    }
}

/// Outcome of a complete topological search. A cycle is a regular result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologicalOrder {
    /// All nodes; every edge `(u, v)` has `u` before `v`
    Sorted(Vec<Node>),
    /// The graph has a cycle.
    /// `ordered` is the prefix Kahn's algorithm managed to emit, `blocked` holds the remaining
    /// nodes in ascending order: those on a cycle or reachable from one.
    CycleDetected {
        ordered: Vec<Node>,
        blocked: Vec<Node>,
    },
}

impl TopologicalOrder {
    pub fn is_acyclic(&self) -> bool {
        matches!(self, Self::Sorted(_))
    }

    /// Returns the order if the graph is acyclic
    pub fn order(&self) -> Option<&[Node]> {
        match self {
            Self::Sorted(order) => Some(order),
            Self::CycleDetected { .. } => None,
        }
    }

    pub fn into_order(self) -> Option<Vec<Node>> {
        match self {
            Self::Sorted(order) => Some(order),
            Self::CycleDetected { .. } => None,
        }
    }

    /// Returns `rank[u]`, the position of `u` in the order, if the graph is acyclic
    pub fn ranking(&self) -> Option<Vec<Node>> {
        let order = self.order()?;
        let mut ranks = vec![INVALID_NODE; order.len()];
        for (i, &u) in order.iter().enumerate() {
            ranks[u as usize] = i as Node;
        }
        Some(ranks)
    }
}

/// Provides topological ordering directly on graphs
pub trait Topological: AdjacencyList + Sized {
    /// Returns an iterator yielding nodes in a valid **topological order**.
    /// Terminates early if the graph contains a cycle.
    ///
    /// # Examples
    /// ```
    /// use dgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(3, [(0, 1), (1, 2)]);
    /// let order: Vec<_> = g.topo_search().collect();
    /// assert_eq!(order, vec![0, 1, 2]);
    /// ```
    fn topo_search(&self) -> KahnSearch<'_, Self> {
        KahnSearch::new(self)
    }

    /// Computes a topological order or reports a cycle.
    ///
    /// # Examples
    /// ```
    /// use dgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    /// assert_eq!(
    ///     g.topological_order(),
    ///     TopologicalOrder::CycleDetected { ordered: vec![], blocked: vec![0, 1, 2] }
    /// );
    /// ```
    fn topological_order(&self) -> TopologicalOrder {
        KahnSearch::new(self).into_order()
    }

    /// Returns `true` if the directed graph is **acyclic**
    fn is_acyclic(&self) -> bool {
        self.topo_search().count() == self.len()
    }
}

impl<G> Topological for G where G: AdjacencyList + Sized {}
