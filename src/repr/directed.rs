/*!
# Directed Adjacency Arrays

[`AdjArray`] stores only **outgoing neighborhoods**, each in the order the edges were inserted.
That order is observable: depth-first algorithms visit children in it, so it decides which
of several equally valid forests or component orders is produced.

Parallel edges and self-loops supplied by the caller are kept as given; only endpoints outside
of `0..n` are rejected.
*/

use std::fmt::Debug;

use super::*;

/// A directed graph storing the out-neighbors of every node as an array.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AdjArray {
    out_nbs: Vec<Vec<Node>>,
    num_edges: NumEdges,
}

impl Debug for AdjArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjArray")
            .field("n", &self.number_of_nodes())
            .field("m", &self.num_edges)
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}

impl GraphNodeOrder for AdjArray {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_nbs.len() as NumNodes
    }
}

impl GraphEdgeOrder for AdjArray {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl AdjacencyList for AdjArray {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.out_nbs[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.out_nbs[u as usize].len() as NumNodes
    }
}

impl NeighborsSlice for AdjArray {
    fn as_neighbors_slice(&self, u: Node) -> &[Node] {
        &self.out_nbs[u as usize]
    }
}

impl AdjacencyTest for AdjArray {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.out_nbs[u as usize].contains(&v)
    }
}

impl GraphNew for AdjArray {
    fn try_new(n: NumNodes) -> Result<Self, GraphError> {
        let mut out_nbs = Vec::new();
        out_nbs
            .try_reserve_exact(n as usize)
            .map_err(|_| GraphError::TooManyNodes(n))?;
        out_nbs.resize_with(n as usize, Vec::new);

        Ok(Self {
            out_nbs,
            num_edges: 0,
        })
    }
}

impl GraphEdgeEditing for AdjArray {
    fn try_add_edge(&mut self, u: Node, v: Node) -> Result<(), GraphError> {
        for node in [u, v] {
            if !self.contains_node(node) {
                return Err(GraphError::NodeOutOfRange {
                    node,
                    number_of_nodes: self.number_of_nodes(),
                });
            }
        }

        self.out_nbs[u as usize].push(v);
        self.num_edges += 1;
        Ok(())
    }
}
