/*!
Full-graph depth-first search with discovery/finish timestamps.

[`DepthFirstSearch`] visits the roots `0..n` in ascending order and, from every still
[`Color::White`] root, explores out-neighbors in insertion order. A single clock is shared by
the whole forest and is incremented right before every discovery and every finish, so
timestamps run from `1` to `2n`.

The traversal uses an explicit stack of `(node, position in neighbor slice)` frames. This
yields exactly the numbering of the recursive formulation while handling paths of arbitrary
length.
*/

use super::*;

/// Timestamps go up to `2n`, which does not fit into [`Node`] for large graphs
pub type Timestamp = u64;

/// Visitation state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Not discovered yet
    #[default]
    White,
    /// Discovered and still on the active path
    Gray,
    /// Discovered and all descendants are finished
    Black,
}

/// Classification of an edge `(u, v)` relative to a depth-first forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// `v` was discovered through `(u, v)`
    Tree,
    /// `v` is an ancestor of `u` (or `u == v`); closes a cycle
    Back,
    /// `v` is a proper descendant of `u` but not its tree child
    Forward,
    /// `u` and `v` are unrelated in the forest
    Cross,
}

/// Result of a full depth-first search.
///
/// All per-node arrays have length `n`. After a complete run every node is [`Color::Black`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsForest {
    colors: Vec<Color>,
    discovery: Vec<Timestamp>,
    finish: Vec<Timestamp>,
    parents: Vec<Option<OptionalNode>>,
}

impl DfsForest {
    fn unvisited(n: usize) -> Self {
        Self {
            colors: vec![Color::White; n],
            discovery: vec![0; n],
            finish: vec![0; n],
            parents: vec![None; n],
        }
    }

    /// Returns the number of nodes covered by the forest
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns *true* if the forest was computed on a graph without nodes
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// ** Panics if `u >= n` **
    pub fn color_of(&self, u: Node) -> Color {
        self.colors[u as usize]
    }

    /// ** Panics if `u >= n` **
    pub fn discovery_time_of(&self, u: Node) -> Timestamp {
        self.discovery[u as usize]
    }

    /// ** Panics if `u >= n` **
    pub fn finish_time_of(&self, u: Node) -> Timestamp {
        self.finish[u as usize]
    }

    /// Returns the node through which `u` was discovered, or `None` if `u` is a root.
    /// ** Panics if `u >= n` **
    pub fn parent_of(&self, u: Node) -> Option<Node> {
        self.parents[u as usize].map(|p| p.get())
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn discovery_times(&self) -> &[Timestamp] {
        &self.discovery
    }

    pub fn finish_times(&self) -> &[Timestamp] {
        &self.finish
    }

    /// Returns the parent array, `None` marking tree roots
    pub fn parent_array(&self) -> Vec<Option<Node>> {
        self.parents.iter().map(|p| p.map(|p| p.get())).collect()
    }

    /// Returns the roots of all trees in the forest in the order they were started
    pub fn roots(&self) -> impl Iterator<Item = Node> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(u, p)| p.is_none().then_some(u as Node))
    }

    /// Returns all nodes ordered by discovery time (preorder)
    pub fn discovery_order(&self) -> Vec<Node> {
        (0..self.len() as Node)
            .sorted_unstable_by_key(|&u| self.discovery[u as usize])
            .collect()
    }

    /// Returns all nodes ordered by finish time (postorder)
    pub fn finish_order(&self) -> Vec<Node> {
        (0..self.len() as Node)
            .sorted_unstable_by_key(|&u| self.finish[u as usize])
            .collect()
    }

    /// Returns *true* if `u` is an ancestor of `v` in the forest. Every node is its own ancestor.
    /// ** Panics if `u >= n || v >= n` **
    pub fn is_ancestor(&self, u: Node, v: Node) -> bool {
        self.discovery[u as usize] <= self.discovery[v as usize]
            && self.finish[v as usize] <= self.finish[u as usize]
    }

    /// Classifies the edge `(u, v)` using the parenthesis structure of the timestamps.
    ///
    /// For parallel edges `u -> v` where `v` is a tree child of `u`, every copy is reported
    /// as [`EdgeKind::Tree`].
    /// ** Panics if `u >= n || v >= n` **
    pub fn classify_edge(&self, u: Node, v: Node) -> EdgeKind {
        if self.parent_of(v) == Some(u) {
            EdgeKind::Tree
        } else if self.is_ancestor(v, u) {
            EdgeKind::Back
        } else if self.is_ancestor(u, v) {
            EdgeKind::Forward
        } else {
            EdgeKind::Cross
        }
    }

    /// Classifies every edge of `graph`, which must be the graph the forest was computed on.
    pub fn classify_edges<'a, G>(
        &'a self,
        graph: &'a G,
    ) -> impl Iterator<Item = (Edge, EdgeKind)> + 'a
    where
        G: AdjacencyList,
    {
        debug_assert_eq!(graph.len(), self.len());
        graph
            .edges()
            .map(|Edge(u, v)| (Edge(u, v), self.classify_edge(u, v)))
    }

    /// Returns *true* if `graph` has a back edge w.r.t. this forest, i.e. iff it has a cycle.
    pub fn has_back_edge<G>(&self, graph: &G) -> bool
    where
        G: AdjacencyList,
    {
        self.classify_edges(graph)
            .any(|(_, kind)| kind == EdgeKind::Back)
    }
}

/// Configurable depth-first search over the whole graph.
///
/// # Examples
/// ```
/// use dgraphs::{prelude::*, algo::*};
///
/// let g = AdjArray::from_edges(3, [(0, 1), (1, 2)]);
///
/// let mut ops = OpCounter::new();
/// let forest = DepthFirstSearch::new(&g).with_counter(&mut ops).run();
///
/// assert_eq!(forest.discovery_times(), &[1, 2, 3]);
/// assert_eq!(forest.finish_times(), &[6, 5, 4]);
/// assert_eq!(forest.parent_array(), vec![None, Some(0), Some(1)]);
/// assert_eq!(ops.get(), 16);
/// ```
pub struct DepthFirstSearch<'a, G, C = NoCounter>
where
    G: AdjacencyList + NeighborsSlice,
    C: OperationCounter,
{
    graph: &'a G,
    counter: C,
}

impl<'a, G> DepthFirstSearch<'a, G, NoCounter>
where
    G: AdjacencyList + NeighborsSlice,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            counter: NoCounter,
        }
    }
}

impl<'a, G, C> DepthFirstSearch<'a, G, C>
where
    G: AdjacencyList + NeighborsSlice,
    C: OperationCounter,
{
    /// Attaches an operation counter. Per node, discovery and graying count `1` each and
    /// finishing counts `2`; every inspected edge counts `1`, plus `1` if it is a tree edge.
    pub fn with_counter<D: OperationCounter>(self, counter: D) -> DepthFirstSearch<'a, G, D> {
        DepthFirstSearch {
            graph: self.graph,
            counter,
        }
    }

    /// Runs the search from every undiscovered node in ascending order
    pub fn run(mut self) -> DfsForest {
        let graph = self.graph;
        let mut forest = DfsForest::unvisited(graph.len());
        let mut time: Timestamp = 0;

        let mut stack: Vec<(Node, usize)> = Vec::with_capacity(32);

        for root in graph.vertices_range() {
            if forest.colors[root as usize] != Color::White {
                continue;
            }

            self.discover(&mut forest, &mut time, root);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let u = frame.0;
                let Some(&v) = graph.as_neighbors_slice(u).get(frame.1) else {
                    stack.pop();
                    self.finish(&mut forest, &mut time, u);
                    continue;
                };

                frame.1 += 1;
                self.counter.count(1);

                // edges into GRAY/BLACK nodes (self-loops included) are only inspected
                if forest.colors[v as usize] == Color::White {
                    forest.parents[v as usize] = OptionalNode::new(u);
                    self.counter.count(1);

                    self.discover(&mut forest, &mut time, v);
                    stack.push((v, 0));
                }
            }
        }

        debug!(
            "dfs: n={} trees={} clock={}",
            graph.number_of_nodes(),
            forest.roots().count(),
            time
        );

        forest
    }

    fn discover(&mut self, forest: &mut DfsForest, time: &mut Timestamp, u: Node) {
        *time += 1;
        forest.discovery[u as usize] = *time;
        forest.colors[u as usize] = Color::Gray;
        self.counter.count(2);
    }

    fn finish(&mut self, forest: &mut DfsForest, time: &mut Timestamp, u: Node) {
        *time += 1;
        forest.finish[u as usize] = *time;
        forest.colors[u as usize] = Color::Black;
        self.counter.count(2);
    }
}

/// Exposes the depth-first search directly on graphs
pub trait DepthFirst: AdjacencyList + NeighborsSlice + Sized {
    /// Computes the depth-first forest of the graph.
    ///
    /// # Examples
    /// ```
    /// use dgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(4, [(0, 1), (2, 3)]);
    /// let forest = g.dfs_forest();
    ///
    /// assert_eq!(forest.roots().collect::<Vec<_>>(), vec![0, 2]);
    /// assert!(forest.is_ancestor(2, 3));
    /// ```
    fn dfs_forest(&self) -> DfsForest {
        DepthFirstSearch::new(self).run()
    }

    /// Computes the depth-first forest and records elementary operations in `counter`
    fn dfs_forest_with_counter<C: OperationCounter>(&self, counter: C) -> DfsForest {
        DepthFirstSearch::new(self).with_counter(counter).run()
    }
}

impl<G> DepthFirst for G where G: AdjacencyList + NeighborsSlice + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{is_on_cycle, random_edges, reachability_matrix};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn path() {
        let graph = AdjArray::from_edges(3, [(0, 1), (1, 2)]);
        let forest = graph.dfs_forest();

        assert_eq!(forest.discovery_order(), vec![0, 1, 2]);
        assert_eq!(forest.finish_order(), vec![2, 1, 0]);
        assert_eq!(forest.parent_of(0), None);
        assert_eq!(forest.parent_of(1), Some(0));
        assert_eq!(forest.parent_of(2), Some(1));
        assert!(forest.colors().iter().all(|&c| c == Color::Black));
    }

    #[test]
    fn empty_graph() {
        let graph = AdjArray::new(0);
        let mut ops = OpCounter::new();
        let forest = graph.dfs_forest_with_counter(&mut ops);

        assert!(forest.is_empty());
        assert_eq!(forest.roots().count(), 0);
        assert_eq!(ops.get(), 0);
    }

    #[test]
    fn forest_restarts_in_ascending_order() {
        //  3 -> 1 -> 0      2
        let graph = AdjArray::from_edges(4, [(3, 1), (1, 0)]);
        let forest = graph.dfs_forest();

        assert_eq!(forest.roots().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(forest.discovery_times(), &[1, 3, 5, 7]);
        assert_eq!(forest.finish_times(), &[2, 4, 6, 8]);

        assert_eq!(forest.classify_edge(3, 1), EdgeKind::Cross);
        assert_eq!(forest.classify_edge(1, 0), EdgeKind::Cross);
    }

    #[test]
    fn neighbor_order_decides_tree() {
        //  / 2
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjArray::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);
        let forest = graph.dfs_forest();

        assert_eq!(
            forest.parent_array(),
            vec![None, None, Some(1), Some(4), Some(5), Some(0)]
        );
        assert_eq!(forest.discovery_order(), vec![0, 5, 4, 3, 1, 2]);
        assert_eq!(forest.classify_edge(1, 0), EdgeKind::Cross);
    }

    #[test]
    fn self_loop_and_parallel_edges() {
        let graph = AdjArray::from_edges(2, [(0, 0), (0, 1), (0, 1)]);
        let mut ops = OpCounter::new();
        let forest = graph.dfs_forest_with_counter(&mut ops);

        assert_eq!(forest.discovery_times(), &[1, 2]);
        assert_eq!(forest.finish_times(), &[4, 3]);
        assert_eq!(forest.parent_of(1), Some(0));

        assert_eq!(forest.classify_edge(0, 0), EdgeKind::Back);
        assert_eq!(forest.classify_edge(0, 1), EdgeKind::Tree);
        assert!(forest.has_back_edge(&graph));

        // 2 nodes * 4 + 3 inspected edges + 1 tree edge
        assert_eq!(ops.get(), 12);
    }

    #[test]
    fn edge_kinds() {
        // 0 -> 1 -> 2, 0 -> 2 (forward), 2 -> 0 (back), 3 -> 1 (cross)
        let graph = AdjArray::from_edges(4, [(0, 1), (1, 2), (0, 2), (2, 0), (3, 1)]);
        let forest = graph.dfs_forest();

        let kinds = forest.classify_edges(&graph).collect_vec();
        assert_eq!(
            kinds,
            vec![
                (Edge(0, 1), EdgeKind::Tree),
                (Edge(0, 2), EdgeKind::Forward),
                (Edge(1, 2), EdgeKind::Tree),
                (Edge(2, 0), EdgeKind::Back),
                (Edge(3, 1), EdgeKind::Cross),
            ]
        );
    }

    #[test]
    fn counter_is_diagnostic_only() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let graph = AdjArray::from_edges(30, random_edges(rng, 30, 90));

        let mut ops = OpCounter::new();
        let counted = graph.dfs_forest_with_counter(&mut ops);
        assert_eq!(counted, graph.dfs_forest());

        let tree_edges = counted.roots().count() as u64;
        let expected = 4 * 30 + 90 + (30 - tree_edges);
        assert_eq!(ops.get(), expected);
    }

    #[test]
    fn parenthesis_property() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1234);

        for n in [1 as NumNodes, 5, 20, 60] {
            for m in [0, n, 3 * n] {
                let graph = AdjArray::from_edges(n, random_edges(rng, n, m));
                let forest = graph.dfs_forest();

                let mut times = forest
                    .discovery_times()
                    .iter()
                    .chain(forest.finish_times())
                    .copied()
                    .collect_vec();
                times.sort_unstable();
                assert_eq!(times, (1..=2 * n as Timestamp).collect_vec());

                for u in graph.vertices() {
                    let (du, fu) = (forest.discovery_time_of(u), forest.finish_time_of(u));
                    assert!(du < fu);
                    assert_eq!(forest.color_of(u), Color::Black);

                    if let Some(p) = forest.parent_of(u) {
                        assert!(graph.has_edge(p, u));
                        assert!(forest.is_ancestor(p, u));
                    }

                    for v in graph.vertices() {
                        let (dv, fv) = (forest.discovery_time_of(v), forest.finish_time_of(v));
                        let disjoint = fu < dv || fv < du;
                        let nested = (du <= dv && fv <= fu) || (dv <= du && fu <= fv);
                        assert!(disjoint || nested);
                    }
                }
            }
        }
    }

    #[test]
    fn back_edge_iff_cycle() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);

        for _ in 0..50 {
            let graph = AdjArray::from_edges(12, random_edges(rng, 12, 14));
            let reach = reachability_matrix(&graph);
            let has_cycle = graph.vertices().any(|u| is_on_cycle(&graph, &reach, u));

            assert_eq!(graph.dfs_forest().has_back_edge(&graph), has_cycle);
        }
    }

    #[test]
    fn long_path() {
        // assert that we can deal with very deep stacks
        let n: Node = 200_000;
        let graph = AdjArray::from_edges(n, (1..n).map(|u| (u - 1, u)));
        let forest = graph.dfs_forest();

        assert_eq!(forest.roots().collect_vec(), vec![0]);
        assert_eq!(forest.finish_time_of(0), 2 * n as Timestamp);
        assert_eq!(forest.parent_of(n - 1), Some(n - 2));
    }
}
