/*!
# Graph Representations

Algorithms in this crate only need three things from a graph: its number of nodes, the
out-neighbors of each node in insertion order, and slice access to them. The capability
traits in [`crate::ops`] describe exactly that, so any representation implementing them can be
traversed.

Currently provided:
- [`AdjArray`]: one `Vec<Node>` of out-neighbors per node.
*/

use crate::{error::GraphError, ops::*, *};

mod directed;

pub use directed::*;
