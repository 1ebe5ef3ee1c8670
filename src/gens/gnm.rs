use std::marker::PhantomData;

use fxhash::FxHashMap;

use super::*;
use crate::utils::{FromCapacity, Map};

/// Marker trait to generalize over internal map implementations for tracking chosen edges.
///
/// Must implement both [`FromCapacity`] and [`Map<K, V>`] with `K = u64`, `V = OptionalU64`.
pub trait GnmMap: FromCapacity + Map<u64, OptionalU64> {}
impl<H> GnmMap for H where H: FromCapacity + Map<u64, OptionalU64> {}

/// Returns the number of distinct loop-free directed edges on `n` nodes
pub fn max_edges_without_loops(n: NumNodes) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1)
}

/// Generator for uniform directed `G(n,m)` random graphs without self-loops.
///
/// The generator can be parameterized via:
/// - `.nodes(n)`: total number of nodes (`0` is allowed)
/// - `.edges(m)`: number of edges; requests above `n*(n-1)` are clamped
/// - `.with_mapper<T>()`: optionally override the internal map type
///
/// [`FxHashMap`] (default) suits sparse requests, `Vec<Option<OptionalU64>>` dense ones.
#[derive(Debug)]
pub struct Gnm<H = FxHashMap<u64, OptionalU64>>
where
    H: GnmMap,
{
    n: NumNodes,
    m: NumEdges,
    _phantom: PhantomData<H>,
}

impl<H> Default for Gnm<H>
where
    H: GnmMap,
{
    fn default() -> Self {
        Self {
            n: 0,
            m: 0,
            _phantom: Default::default(),
        }
    }
}

impl<H> Gnm<H>
where
    H: GnmMap,
{
    /// Creates a new empty `G(n,m)` generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the internal map implementation used for edge sampling.
    pub fn with_mapper<M: GnmMap>(self) -> Gnm<M> {
        Gnm {
            n: self.n,
            m: self.m,
            _phantom: Default::default(),
        }
    }

    /// Number of edges that will actually be generated
    pub fn effective_edges(&self) -> u64 {
        (self.m as u64).min(max_edges_without_loops(self.n))
    }
}

impl<H> NumNodesGen for Gnm<H>
where
    H: GnmMap,
{
    fn set_nodes(&mut self, n: NumNodes) {
        self.n = n;
    }
}

impl<H> NumEdgesGen for Gnm<H>
where
    H: GnmMap,
{
    fn set_edges(&mut self, m: NumEdges) {
        self.m = m;
    }
}

impl<H> GraphGenerator for Gnm<H>
where
    H: GnmMap,
{
    /// Returns a streaming iterator over a random `G(n,m)` edge set.
    /// Edges are sampled uniformly without replacement from all loop-free pairs.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng,
    {
        let end = max_edges_without_loops(self.n);
        let m = self.effective_edges();

        if m < self.m as u64 {
            debug!(
                "gnm: requested {} edges but only {} loop-free edges exist on {} nodes; clamping",
                self.m, end, self.n
            );
        }

        GnmGenerator::new(
            rng,
            self.n as u64,
            m,
            H::from_total_used_capacity(end as usize, m as usize),
        )
    }
}

/// Given `n` nodes, this iterator produces exactly `m` uniformly random and distinct
/// loop-free directed edges.
///
/// The algorithm used is based on:
/// > *V. Batagelj and U. Brandes. Efficient Generation of Large Random Networks.
/// > Physical Review E 71.3 (2005): 036113.*
///
/// A Fisher-Yates shuffle of the index space `0..n*(n-1)` is simulated lazily: only the
/// displaced entries are stored in the map, so the run time is linear in `m` even if `m`
/// equals the number of possible edges.
pub struct GnmGenerator<'a, R, H>
where
    R: Rng,
    H: Map<u64, OptionalU64>,
{
    n: u64,
    rem: u64,
    cur: u64,
    end: u64,
    map: H,
    rng: &'a mut R,
}

impl<'a, R, H> GnmGenerator<'a, R, H>
where
    R: Rng,
    H: Map<u64, OptionalU64>,
{
    /// Creates a new `GnmGenerator` yielding `min(m, n*(n-1))` edges.
    pub fn new(rng: &'a mut R, n: u64, m: u64, map: H) -> Self {
        let end = n * n.saturating_sub(1);

        Self {
            n,
            rem: m.min(end),
            cur: 0,
            end,
            map,
            rng,
        }
    }

    fn next_step(&mut self) -> Option<u64> {
        if self.rem == 0 {
            return None;
        }

        // Swap position `cur` with a random position in `cur..end`
        let drawn = self.rng.random_range(self.cur..self.end);
        let value = match self.map.get(&drawn) {
            Some(v) => v.get(),
            None => drawn,
        };

        let replacement = match self.map.get(&self.cur) {
            Some(v) => *v,
            None => OptionalU64::new(self.cur)?,
        };
        self.map.insert(drawn, replacement);

        self.cur += 1;
        self.rem -= 1;

        Some(value)
    }
}

impl<'a, R, H> Iterator for GnmGenerator<'a, R, H>
where
    R: Rng,
    H: Map<u64, OptionalU64>,
{
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step().map(|x| Edge::from_u64_no_loops(x, self.n))
    }

    /// Returns the number of edges remaining to be generated.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rem as usize, Some(self.rem as usize))
    }
}

impl<'a, R, H> ExactSizeIterator for GnmGenerator<'a, R, H>
where
    R: Rng,
    H: Map<u64, OptionalU64>,
{
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn assert_simple(graph: &AdjArray) {
        assert!(graph.edges().all(|e| !e.is_loop()));
        assert_eq!(
            graph.edges().unique().count(),
            graph.number_of_edges() as usize
        );
    }

    #[test]
    fn exact_number_of_edges() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [2 as NumNodes, 5, 20, 100] {
            for m in [0 as NumEdges, 1, n, 3 * n, n * n] {
                let graph = AdjArray::gnm(rng, n, m);
                let expected = (m as u64).min(max_edges_without_loops(n));

                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.number_of_edges() as u64, expected);
                assert_simple(&graph);
            }
        }
    }

    #[test]
    fn full_density() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);

        for n in [2 as NumNodes, 7, 30] {
            let m = (n * (n - 1)) as NumEdges;
            let graph = AdjArray::gnm(rng, n, m);

            assert_simple(&graph);
            for u in graph.vertices() {
                assert_eq!(graph.degree_of(u), n - 1);
            }
        }
    }

    #[test]
    fn tiny_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);

        let graph = AdjArray::gnm(rng, 0, 10);
        assert_eq!(graph.number_of_nodes(), 0);
        assert_eq!(graph.number_of_edges(), 0);

        let graph = AdjArray::gnm(rng, 1, 10);
        assert_eq!(graph.number_of_nodes(), 1);
        assert_eq!(graph.number_of_edges(), 0);

        let generator = Gnm::<FxHashMap<u64, OptionalU64>>::new().nodes(1).edges(3);
        assert_eq!(generator.effective_edges(), 0);
    }

    #[test]
    fn deterministic_under_seed() {
        let gen_with_seed = |seed| {
            let rng = &mut Pcg64Mcg::seed_from_u64(seed);
            Gnm::<FxHashMap<u64, OptionalU64>>::new()
                .nodes(50)
                .edges(300)
                .generate(rng)
        };

        assert_eq!(gen_with_seed(17), gen_with_seed(17));
        assert_ne!(gen_with_seed(17), gen_with_seed(18));
    }

    #[test]
    fn dense_map_yields_same_edges() {
        let sparse = || Gnm::<FxHashMap<u64, OptionalU64>>::new().nodes(30).edges(500);
        let dense = sparse().with_mapper::<Vec<Option<OptionalU64>>>();

        let a = sparse().generate(&mut Pcg64Mcg::seed_from_u64(9));
        let b = dense.generate(&mut Pcg64Mcg::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn every_pair_equally_likely() {
        let rng = &mut Pcg64Mcg::seed_from_u64(10);
        let mut counts = [[0u32; 4]; 4];

        for _ in 0..40_000 {
            for Edge(u, v) in AdjArray::gnm(rng, 4, 3).edges() {
                counts[u as usize][v as usize] += 1;
            }
        }

        // each of the 12 loop-free pairs is picked with probability 3/12
        for u in 0..4 {
            assert_eq!(counts[u][u], 0);
            for v in (0..4).filter(|&v| v != u) {
                assert!(
                    (9_500..=10_500).contains(&counts[u][v]),
                    "({u}, {v}) picked {} times",
                    counts[u][v]
                );
            }
        }
    }

    #[test]
    fn oversized_request_is_clamped() {
        let rng = &mut Pcg64Mcg::seed_from_u64(11);

        let map = FxHashMap::<u64, OptionalU64>::default();
        let generator = GnmGenerator::new(rng, 5, 1000, map);
        assert_eq!(generator.len(), 20);

        let edges = generator.collect_vec();
        assert_eq!(edges.len(), 20);
        assert!(edges.iter().all(|e| !e.is_loop()));
        assert_eq!(edges.iter().unique().count(), 20);

        let map = FxHashMap::<u64, OptionalU64>::default();
        assert_eq!(GnmGenerator::new(rng, 1, 5, map).count(), 0);
    }

    #[test]
    fn stream_is_exact_size() {
        let rng = &mut Pcg64Mcg::seed_from_u64(6);
        let generator = Gnm::<FxHashMap<u64, OptionalU64>>::new()
            .nodes(10)
            .edges(1000);
        assert_eq!(generator.stream(rng).count(), 90);
    }
}
