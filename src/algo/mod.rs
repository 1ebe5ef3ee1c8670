/*!
# Graph Algorithms

This module provides the **traversal and ordering algorithms** of this crate, built on top of
the capability traits in [`ops`](crate::ops).
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use dgraphs::algo::*;
```
and gain access to depth-first search, strongly connected components and topological ordering.
Each algorithm is available as a configurable struct and as an extension trait implemented on
every suitable graph (`graph.dfs_forest()`, `graph.strongly_connected_components()`,
`graph.topological_order()`). If possible, results are provided as **iterators**.
*/

mod counter;
mod dfs;
mod scc;
mod topo;

use crate::prelude::*;
use itertools::Itertools;
use log::{debug, trace};

pub use counter::*;
pub use dfs::*;
pub use scc::*;
pub use topo::*;
