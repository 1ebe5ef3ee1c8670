//! Errors raised while building a graph.
//!
//! Algorithms themselves never fail on a well-formed graph, so validation happens once,
//! when edges are inserted.

use thiserror::Error;

use crate::node::{Node, NumNodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint lies outside of `0..number_of_nodes`
    #[error("node {node} is out of range for a graph with {number_of_nodes} nodes")]
    NodeOutOfRange {
        node: Node,
        number_of_nodes: NumNodes,
    },

    /// The node array cannot be allocated or exceeds the limit of a reader
    #[error("cannot create a graph with {0} nodes")]
    TooManyNodes(NumNodes),
}

impl From<GraphError> for std::io::Error {
    fn from(value: GraphError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidData, value)
    }
}
