/*!
# Operation Profiling

Charts the cost of [`DepthFirst::dfs_forest`](crate::algo::DepthFirst) against the input size
on random `G(n,m)` graphs. Two series are measured:

- `Fixed_vertices_-_Variable_Edges`: `n` fixed, `m` growing,
- `Variable_vertices_-_Fixed_Edges`: `m` fixed, `n` growing.

Each measurement runs a fresh search on a freshly generated graph. A single [`OpCounter`] is
shared by all runs and reset before each one, so no count leaks from one run into the next.

```
use dgraphs::bench::*;

let config = BenchConfig::new()
    .fixed_nodes(10)
    .edge_range(10..=30, 10)
    .fixed_edges(20)
    .node_range(10..=12, 1)
    .seed(3);

let series = profile_dfs(&config);
assert_eq!(series[0].measurements().len(), 3);
assert_eq!(series[1].measurements().len(), 3);
```
*/

use std::{io::Write, ops::RangeInclusive};

use log::debug;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::{
    algo::{DepthFirst, OpCounter},
    gens::RandomGraph,
    prelude::*,
};

pub const FIXED_NODES_SERIES: &str = "Fixed_vertices_-_Variable_Edges";
pub const FIXED_EDGES_SERIES: &str = "Variable_vertices_-_Fixed_Edges";

/// Parameters of the two measurement series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    fixed_nodes: NumNodes,
    edge_range: RangeInclusive<NumEdges>,
    edge_step: usize,
    fixed_edges: NumEdges,
    node_range: RangeInclusive<NumNodes>,
    node_step: usize,
    seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            fixed_nodes: 100,
            edge_range: 1000..=9900,
            edge_step: 100,
            fixed_edges: 4500,
            node_range: 100..=200,
            node_step: 10,
            seed: 0,
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes while the edge count varies
    pub fn fixed_nodes(mut self, n: NumNodes) -> Self {
        self.fixed_nodes = n;
        self
    }

    /// Edge counts to measure with a fixed number of nodes.
    /// ** Panics if `step == 0` **
    pub fn edge_range(mut self, range: RangeInclusive<NumEdges>, step: usize) -> Self {
        assert!(step > 0, "step must be positive");
        self.edge_range = range;
        self.edge_step = step;
        self
    }

    /// Number of edges while the node count varies
    pub fn fixed_edges(mut self, m: NumEdges) -> Self {
        self.fixed_edges = m;
        self
    }

    /// Node counts to measure with a fixed number of edges.
    /// ** Panics if `step == 0` **
    pub fn node_range(mut self, range: RangeInclusive<NumNodes>, step: usize) -> Self {
        assert!(step > 0, "step must be positive");
        self.node_range = range;
        self.node_step = step;
        self
    }

    /// Seed of the random graph generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// A single run: input size (`m` or `n`, depending on the series) and the operations counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub size: u32,
    pub operations: u64,
}

/// Named sequence of measurements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    name: &'static str,
    measurements: Vec<Measurement>,
}

impl Series {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }
}

fn count_dfs_operations(
    rng: &mut Pcg64Mcg,
    ops: &mut OpCounter,
    n: NumNodes,
    m: NumEdges,
) -> u64 {
    let graph = AdjArray::gnm(rng, n, m);
    ops.reset();
    graph.dfs_forest_with_counter(&mut *ops);
    ops.get()
}

/// Runs both series. The result is fully determined by `config`.
pub fn profile_dfs(config: &BenchConfig) -> Vec<Series> {
    let rng = &mut Pcg64Mcg::seed_from_u64(config.seed);
    let ops = &mut OpCounter::new();

    let fixed_nodes = config
        .edge_range
        .clone()
        .step_by(config.edge_step)
        .map(|m| Measurement {
            size: m,
            operations: count_dfs_operations(rng, ops, config.fixed_nodes, m),
        })
        .collect();

    let fixed_edges = config
        .node_range
        .clone()
        .step_by(config.node_step)
        .map(|n| Measurement {
            size: n,
            operations: count_dfs_operations(rng, ops, n, config.fixed_edges),
        })
        .collect();

    let series = vec![
        Series {
            name: FIXED_NODES_SERIES,
            measurements: fixed_nodes,
        },
        Series {
            name: FIXED_EDGES_SERIES,
            measurements: fixed_edges,
        },
    ];

    for s in &series {
        debug!("bench: {} with {} runs", s.name, s.measurements.len());
    }

    series
}

/// Writes all measurements as CSV with the columns `series,size,operations`
pub fn write_csv<W: Write>(series: &[Series], mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "series,size,operations")?;
    for s in series {
        for m in &s.measurements {
            writeln!(writer, "{},{},{}", s.name, m.size, m.operations)?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::OperationCounter;

    #[test]
    fn default_sizes() {
        let series = profile_dfs(&BenchConfig::default());

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name(), FIXED_NODES_SERIES);
        assert_eq!(series[1].name(), FIXED_EDGES_SERIES);

        let sizes = |s: &Series| s.measurements().iter().map(|m| m.size).collect::<Vec<_>>();
        assert_eq!(sizes(&series[0]), (1000..=9900).step_by(100).collect::<Vec<_>>());
        assert_eq!(sizes(&series[1]), (100..=200).step_by(10).collect::<Vec<_>>());
    }

    #[test]
    fn operations_bounds() {
        let config = BenchConfig::new()
            .fixed_nodes(50)
            .edge_range(100..=2000, 100)
            .fixed_edges(300)
            .node_range(20..=60, 10)
            .seed(42);
        let series = profile_dfs(&config);

        // every node is discovered and finished, every edge inspected, at most n-1 tree edges
        for m in series[0].measurements() {
            let lower = 4 * 50 + m.size as u64;
            assert!((lower..lower + 50).contains(&m.operations));
        }
        for m in series[1].measurements() {
            let edges = (300u64).min(m.size as u64 * (m.size as u64 - 1));
            let lower = 4 * m.size as u64 + edges;
            assert!((lower..lower + m.size as u64).contains(&m.operations));
        }

        // one more edge per step outweighs any change in the number of tree edges
        assert!(
            series[0]
                .measurements()
                .windows(2)
                .all(|w| w[0].operations < w[1].operations)
        );
    }

    #[test]
    fn deterministic_under_seed() {
        let config = BenchConfig::new()
            .edge_range(1000..=3000, 500)
            .node_range(100..=120, 10)
            .seed(7);
        assert_eq!(profile_dfs(&config), profile_dfs(&config));
    }

    #[test]
    fn shared_counter_matches_fresh_counter() {
        let ops = &mut OpCounter::new();
        ops.count(1000);

        for seed in 0..5 {
            let shared = count_dfs_operations(&mut Pcg64Mcg::seed_from_u64(seed), ops, 30, 200);

            let graph = AdjArray::gnm(&mut Pcg64Mcg::seed_from_u64(seed), 30, 200);
            let mut fresh = OpCounter::new();
            graph.dfs_forest_with_counter(&mut fresh);

            assert_eq!(shared, fresh.get());
        }
    }

    #[test]
    fn csv_output() {
        let series = vec![Series {
            name: FIXED_EDGES_SERIES,
            measurements: vec![
                Measurement {
                    size: 3,
                    operations: 20,
                },
                Measurement {
                    size: 4,
                    operations: 27,
                },
            ],
        }];

        let mut buffer = Vec::new();
        write_csv(&series, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "series,size,operations\n\
             Variable_vertices_-_Fixed_Edges,3,20\n\
             Variable_vertices_-_Fixed_Edges,4,27\n"
        );
    }

    #[test]
    #[should_panic]
    fn zero_step() {
        let _ = BenchConfig::new().edge_range(1..=2, 0);
    }
}
