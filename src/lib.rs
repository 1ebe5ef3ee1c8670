/*!
`dgraphs` is a small library of classic algorithms on **directed** graphs whose nodes are numbered
`0` to `n - 1` and whose edges carry no weight:
- a full-graph **depth-first search** producing discovery/finish timestamps, colors and a parent forest,
- **strongly connected components** in a single pass (Tarjan),
- **topological ordering** by in-degree reduction (Kahn), reporting a cycle as a regular outcome,
- a uniform **random graph generator** `G(n,m)` without self-loops or parallel edges.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)` pointing from the first to the second entry.

The only storage backend is [`AdjArray`](crate::repr::AdjArray), which keeps every outgoing
neighborhood in insertion order. That order is observable: it decides which of several valid
DFS forests or component orders is produced. Parallel edges and self-loops given by the caller are kept.

# Design

All algorithms are provided as configurable structs (for example to attach an
[`OpCounter`](crate::algo::OpCounter)) and, for the common case, as extension traits on the graph itself.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, errors, basic graph operations and the graph representation,
- [`algo`] includes algorithm traits that are implemented on graphs itself (`graph.dfs_forest()`, `graph.strongly_connected_components()`, `graph.topological_order()`),
- [`gens`] includes the random graph generator and deterministic substructures such as paths and cycles,
- [`io`] includes handlers for reading and writing edge lists.

[`bench`] measures the operation count of the depth-first search on random graphs.

In most use-cases, `use dgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use dgraphs::{prelude::*, algo::*};

let g = AdjArray::from_edges(3, [(0, 1), (1, 2)]);

assert_eq!(g.dfs_forest().discovery_times(), &[1, 2, 3]);
assert_eq!(g.strongly_connected_components().count(), 3);
assert_eq!(g.topological_order(), TopologicalOrder::Sorted(vec![0, 1, 2]));
```
*/

pub mod algo;
pub mod bench;
pub mod edge;
pub mod error;
pub mod gens;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use node::*;

/// `dgraphs::prelude` includes definitions for nodes and edges, errors, all basic graph operation traits as well as the graph representation.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*};
}
