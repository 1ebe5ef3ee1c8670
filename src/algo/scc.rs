use std::iter::FusedIterator;

use super::*;

/// Implementation of Tarjan's Algorithm for Strongly Connected Components.
/// It is designed as an iterator that emits the nodes of one strongly connected component at a
/// time. Nodes of a component are emitted in the order they are popped from the membership
/// stack, so the root of the component comes last. The components themselves are emitted in
/// reverse topological order of the condensation (i.e. if each SCC were contracted into a
/// single node).
pub struct StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + NeighborsSlice,
{
    graph: &'a G,
    idx: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    path_stack: Vec<Node>,

    call_stack: Vec<StackFrame>,
}

impl<'a, G> StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + NeighborsSlice,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            idx: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            path_stack: Vec::with_capacity(32),
            call_stack: Vec::with_capacity(32),
        }
    }

    /// Consumes the iterator and collects all components together with a membership array
    pub fn into_partition(self) -> SccPartition {
        let graph = self.graph;
        let components = self.collect_vec();

        let mut component_of = vec![INVALID_NODE; graph.len()];
        for (i, comp) in components.iter().enumerate() {
            for &u in comp {
                debug_assert_eq!(component_of[u as usize], INVALID_NODE);
                component_of[u as usize] = i as Node;
            }
        }

        let cyclic = components
            .iter()
            .map(|comp| comp.len() > 1 || graph.neighbors_of(comp[0]).any(|v| v == comp[0]))
            .collect_vec();

        debug!(
            "scc: n={} components={} cyclic={}",
            graph.number_of_nodes(),
            components.len(),
            cyclic.iter().filter(|&&c| c).count()
        );

        SccPartition {
            components,
            component_of,
            cyclic,
        }
    }

    /// Just like in a classic DFS where we want to compute a spanning-forest, we will need to
    /// to visit each node at least once. We start with node 0, and cover all nodes reachable from
    /// there in `search`. Then, we search for an untouched node here, and start over.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.call_stack.push(StackFrame::new(v, v));
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        /*
        Tarjan's algorithm is usually stated recursively. We cannot build an iterator from the
        recursive form and deep graphs would overflow the stack, so `self.call_stack` simulates
        the recursion instead. On the first visit of a node v it gets the next index as both
        `index` and `low_link`, and is pushed onto `self.path_stack`. The frame remembers the
        position in v's neighbor slice, so resuming after a "recursive call" continues exactly
        with the next neighbor. When v's frame is popped, its low_link is propagated to the
        parent frame's node (the tree-edge case).

        Whenever a root (index == low_link) is finished we return its component, which pauses
        the search; the next call resumes from `self.call_stack`.
        */
        let graph = self.graph;

        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let v = frame.node;

            if frame.first_call {
                frame.first_call = false;
                frame.initial_stack_len = self.path_stack.len() as Node;

                self.states[v as usize].visit(self.idx);
                self.idx += 1;

                self.path_stack.push(v);
            }

            let neighbors = graph.as_neighbors_slice(v);
            while let Some(&w) = neighbors.get(frame.next_neighbor) {
                frame.next_neighbor += 1;
                let w_state = self.states[w as usize];

                if !w_state.visited {
                    self.call_stack.push(StackFrame::new(w, v));
                    continue 'recurse;
                } else if w_state.on_stack {
                    self.states[v as usize].try_lower_link(w_state.index);
                }
                // otherwise w belongs to an already emitted component
            }

            let frame = self.call_stack.pop()?;
            let state = self.states[v as usize];

            self.states[frame.parent as usize].try_lower_link(state.low_link);

            if state.is_root() {
                let component = self
                    .path_stack
                    .drain(frame.initial_stack_len as usize..)
                    .rev()
                    .collect_vec();

                for &w in &component {
                    self.states[w as usize].on_stack = false;
                }

                debug_assert_eq!(component.last().copied(), Some(v));
                trace!("scc: emit component of size {} rooted at {v}", component.len());

                return Some(component);
            }
        }

        None
    }
}

impl<'a, G> Iterator for StronglyConnectedComponents<'a, G>
where
    G: AdjacencyList + NeighborsSlice,
{
    type Item = Vec<Node>;

    /// Returns either a vector of node ids that form an SCC or None if no further SCC was found
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<'a, G> FusedIterator for StronglyConnectedComponents<'a, G> where
    G: AdjacencyList + NeighborsSlice
{
}

#[derive(Debug, Clone)]
struct StackFrame {
    node: Node,
    parent: Node,
    initial_stack_len: Node,
    next_neighbor: usize,
    first_call: bool,
}

impl StackFrame {
    /// Roots use themselves as parent; lowering their own link again is a no-op
    fn new(node: Node, parent: Node) -> Self {
        Self {
            node,
            parent,
            initial_stack_len: 0,
            next_neighbor: 0,
            first_call: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    on_stack: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, idx: Node) {
        debug_assert!(!self.visited);
        self.index = idx;
        self.low_link = idx;
        self.visited = true;
        self.on_stack = true;
    }

    fn try_lower_link(&mut self, l: Node) {
        self.low_link = self.low_link.min(l);
    }

    fn is_root(&self) -> bool {
        self.index == self.low_link
    }
}

/// All strongly connected components of a graph, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccPartition {
    components: Vec<Vec<Node>>,
    component_of: Vec<Node>,
    cyclic: Vec<bool>,
}

impl SccPartition {
    pub fn number_of_components(&self) -> NumNodes {
        self.components.len() as NumNodes
    }

    /// Components in reverse topological order of the condensation
    pub fn components(&self) -> &[Vec<Node>] {
        &self.components
    }

    /// Returns the index of the component containing `u`
    /// ** Panics if `u >= n` **
    pub fn component_of(&self, u: Node) -> Node {
        self.component_of[u as usize]
    }

    /// Returns *true* if `u` and `v` are mutually reachable
    /// ** Panics if `u >= n || v >= n` **
    pub fn same_component(&self, u: Node, v: Node) -> bool {
        self.component_of(u) == self.component_of(v)
    }

    /// A component is cyclic if it has more than one node or its single node has a self-loop
    /// ** Panics if `c >= number_of_components` **
    pub fn is_cyclic(&self, c: Node) -> bool {
        self.cyclic[c as usize]
    }

    /// Returns all components that contain a cycle
    pub fn cyclic_components(&self) -> impl Iterator<Item = &[Node]> + '_ {
        self.components
            .iter()
            .zip(&self.cyclic)
            .filter_map(|(comp, &cyclic)| cyclic.then_some(comp.as_slice()))
    }

    /// Contracts every component of `graph` into a single node `component_of(u)`.
    /// Parallel edges and loops are dropped, so the result is a DAG in which every edge
    /// points from a later emitted component to an earlier one.
    pub fn condensation<G: AdjacencyList>(&self, graph: &G) -> AdjArray {
        let edges = graph
            .edges()
            .map(|Edge(u, v)| Edge(self.component_of(u), self.component_of(v)))
            .filter(|e| !e.is_loop())
            .sorted_unstable()
            .dedup()
            .collect_vec();

        AdjArray::from_edges(self.number_of_components(), edges)
    }
}

/// Exposes strongly connected components directly on graphs
pub trait Connectivity: AdjacencyList + NeighborsSlice + Sized {
    /// Returns the strongly connected components of the graph as a lazy iterator of `Vec<Node>`.
    ///
    /// # Examples
    /// ```
    /// use dgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjArray::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    ///
    /// let sccs: Vec<_> = g.strongly_connected_components().collect();
    /// assert_eq!(sccs, vec![vec![2, 1, 0]]);
    /// ```
    fn strongly_connected_components(&self) -> StronglyConnectedComponents<'_, Self> {
        StronglyConnectedComponents::new(self)
    }

    /// Computes all strongly connected components at once (see [`SccPartition`])
    fn partition_into_strongly_connected_components(&self) -> SccPartition {
        StronglyConnectedComponents::new(self).into_partition()
    }
}

impl<G> Connectivity for G where G: AdjacencyList + NeighborsSlice + Sized {}

/// Sorts the nodes in each component increasingly and then the components themselves lexicographically.
pub fn sort_components(mut components: Vec<Vec<Node>>) -> Vec<Vec<Node>> {
    components.iter_mut().for_each(|comp| comp.sort_unstable());
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}
