use std::ops::Range;

use itertools::Itertools;

use crate::{error::GraphError, *};

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns the range `0..n`.
    /// In contrast to self.vertices(), the range does not borrow self and hence may be
    /// used where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if `u` is a valid node of this graph
    fn contains_node(&self, u: Node) -> bool {
        u < self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph (multi-edges and loops included)
    fn number_of_edges(&self) -> NumEdges;
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns an iterator over the out-neighbors of a given vertex in insertion order.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_;

    /// Returns the number of outgoing edges of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Computes the in-degree of every node by a single scan over all edges.
    /// Parallel edges are counted with multiplicity.
    fn in_degrees(&self) -> Vec<NumNodes> {
        let mut in_degs: Vec<NumNodes> = vec![0; self.len()];
        for u in self.vertices() {
            for v in self.neighbors_of(u) {
                in_degs[v as usize] += 1;
            }
        }
        in_degs
    }

    /// Returns an iterator over outgoing edges of a given vertex.
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors_of(u).map(move |v| Edge(u, v))
    }

    /// Returns an iterator over all edges in the graph, grouped by source in ascending order
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices_range().flat_map(move |u| self.edges_of(u))
    }

    /// Returns all edges in the graph in sorted order.
    fn ordered_edges(&self) -> Vec<Edge> {
        self.edges().sorted().collect()
    }
}

/// Trait for accessing the neighborhood of nodes as slices.
///
/// Depth-first algorithms keep a position into this slice per stack frame, which keeps the
/// visitation order identical to a recursive formulation.
pub trait NeighborsSlice {
    /// Returns a slice-reference of the out-neighborhood of a given vertex
    /// ** Panics if `u >= n` **
    fn as_neighbors_slice(&self, u: Node) -> &[Node];
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the egde (u,v) exists in the graph.
    /// ** Panics if `u >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew: Sized {
    /// Tries to create an empty graph with n singleton nodes. `n = 0` is allowed.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyNodes`] if the per-node storage cannot be allocated.
    fn try_new(n: NumNodes) -> Result<Self, GraphError>;

    /// Creates an empty graph with n singleton nodes.
    /// ** Panics if the per-node storage cannot be allocated **
    fn new(n: NumNodes) -> Self {
        match Self::try_new(n) {
            Ok(graph) => graph,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Provides functions to insert edges.
///
/// Edges can only be added: a graph is built once and then handed to the algorithms.
pub trait GraphEdgeEditing: GraphNew + GraphNodeOrder {
    /// Adds the edge `(u, v)` to the graph, keeping parallel edges and self-loops.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] if `u >= n || v >= n`; the graph is unchanged.
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<(), GraphError>;

    /// Adds the edge *(u,v)* to the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node) {
        if let Err(e) = self.try_add_edge(u, v) {
            panic!("{e}");
        }
    }

    /// Adds all edges in the collection and stops at the first invalid one.
    fn try_add_edges(
        &mut self,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Result<(), GraphError> {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.try_add_edge(u, v)?;
        }
        Ok(())
    }

    /// Adds all edges in the collection
    /// ** Panics if any edge has an endpoint `>= n` **
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|d| d.into()) {
            self.add_edge(u, v);
        }
    }
}

/// A super trait for creating a graph from scratch from a set of edges and a number of nodes
pub trait GraphFromScratch: Sized {
    /// Create a graph from a number of nodes and a collection of edges.
    ///
    /// # Errors
    /// Fails with [`GraphError::TooManyNodes`] if `n` nodes cannot be allocated and with
    /// [`GraphError::NodeOutOfRange`] on the first edge with an endpoint `>= n`.
    fn try_from_edges(
        n: NumNodes,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Result<Self, GraphError>;

    /// Create a graph from a number of nodes and a collection of edges.
    /// ** Panics if any edge has an endpoint `>= n` **
    fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        match Self::try_from_edges(n, edges) {
            Ok(graph) => graph,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn try_from_edges(
        n: NumNodes,
        edges: impl IntoIterator<Item = impl Into<Edge>>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::try_new(n)?;
        graph.try_add_edges(edges)?;
        Ok(graph)
    }
}
