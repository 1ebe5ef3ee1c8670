/*!
# Graph Generators

This module provides builder-style random graph generators and helpers to add deterministic
substructures (paths, cycles) to existing graphs.

The typical usage workflow is:

1. Create a generator instance (e.g., `Gnm::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).edges(m)`).
3. Generate edges via `generate()` or `stream()`.

In addition, the [`RandomGraph`] trait turns a generator into a constructor on every graph type
implementing [`GraphFromScratch`].

Supported models:
- G(n,m): uniform random directed graphs with a fixed number of nodes and distinct, loop-free edges
*/

use fxhash::FxHashMap;
use log::debug;
use rand::Rng;

use crate::prelude::*;

mod gnm;
mod substructures;

pub use gnm::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
pub trait NumNodesGen: Sized {
    /// Sets the number of nodes in place
    fn set_nodes(&mut self, n: NumNodes);

    /// Sets the number of nodes in the graph generator.
    fn nodes(mut self, n: NumNodes) -> Self {
        self.set_nodes(n);
        self
    }
}

/// Trait for generators that allow setting the number of edges.
pub trait NumEdgesGen: Sized {
    /// Sets the number of edges in place
    fn set_edges(&mut self, m: NumEdges);

    /// Sets the number of edges in the graph generator.
    fn edges(mut self, m: NumEdges) -> Self {
        self.set_edges(m);
        self
    }
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Trait for building full graph instances from random models.
pub trait RandomGraph: Sized {
    /// Creates a random `G(n,m)` graph with `min(m, n*(n-1))` distinct edges and no self-loops.
    ///
    /// # Examples
    /// ```
    /// use dgraphs::{prelude::*, gens::*};
    /// use rand::SeedableRng;
    ///
    /// let rng = &mut rand_pcg::Pcg64Mcg::seed_from_u64(1);
    /// let g = AdjArray::gnm(rng, 10, 20);
    ///
    /// assert_eq!(g.number_of_edges(), 20);
    /// assert!(g.vertices().all(|u| !g.has_self_loop(u)));
    /// ```
    fn gnm<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
    {
        Self::gnm_with_map::<R, FxHashMap<u64, OptionalU64>>(rng, n, m)
    }

    /// Creates a random `G(n,m)` graph using a custom map type for sampling.
    fn gnm_with_map<R, H>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
        H: GnmMap;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch,
{
    fn gnm_with_map<R, H>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
        H: GnmMap,
    {
        Self::from_edges(n, Gnm::<H>::new().nodes(n).edges(m).stream(rng))
    }
}
