//! # EdgeList
//!
//! The EdgeList-Format consists of a header line `n m`, followed by `m` non-comment-lines
//! `u v` each representing the directed edge `Edge(u, v)`. Nodes are `0`-based unless the
//! reader/writer is configured as `one_indexed`. Lines starting with the comment identifier
//! (default `c`) and blank lines are skipped.
//!
//! The node count of the header is checked against a limit (see [`EdgeListReader::max_nodes`])
//! before any per-node storage is allocated.
//!
//! ```
//! use dgraphs::{prelude::*, io::*};
//!
//! let input = "c a triangle\n3 3\n0 1\n1 2\n2 0\n";
//! let graph = AdjArray::try_read_edge_list(input.as_bytes()).unwrap();
//!
//! assert_eq!(graph.number_of_nodes(), 3);
//! assert_eq!(graph.ordered_edges(), vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)]);
//! ```

use std::io::Lines;

use log::debug;

use super::*;

/// Largest node count an [`EdgeListReader`] accepts unless configured otherwise
pub const DEFAULT_MAX_NODES: NumNodes = 1 << 28;

/// A GraphReader for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
    /// If *true*, node ids in the input start at `1`
    one_indexed: bool,
    /// Headers announcing more nodes are rejected
    max_nodes: NumNodes,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            comment_identifier: "c".to_string(),
            one_indexed: false,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> EdgeListReader {
        self.comment_identifier = c.into();
        self
    }

    /// Interpret node ids as `1..=n` instead of `0..n`
    pub fn one_indexed(mut self, one_indexed: bool) -> EdgeListReader {
        self.one_indexed = one_indexed;
        self
    }

    /// Rejects headers announcing more than `max_nodes` nodes as [`ErrorKind::InvalidData`]
    pub fn max_nodes(mut self, max_nodes: NumNodes) -> EdgeListReader {
        self.max_nodes = max_nodes;
        self
    }
}

impl<G: GraphFromScratch> GraphReader<G> for EdgeListReader {
    fn try_read_graph<R: BufRead>(&self, reader: R) -> Result<G> {
        let edges_reader =
            EdgeListEdgesReader::try_new(reader, &self.comment_identifier, self.one_indexed)?;
        let n = edges_reader.number_of_nodes();
        let m = edges_reader.number_of_edges();
        raise_error_unless!(
            n <= self.max_nodes,
            ErrorKind::InvalidData,
            GraphError::TooManyNodes(n)
        );

        let edges = edges_reader.collect::<Result<Vec<Edge>>>()?;
        raise_error_unless!(
            edges.len() == m as usize,
            ErrorKind::InvalidData,
            format!("Header announced {m} edges but found {}", edges.len())
        );

        debug!("edge list: read n={n} m={m}");

        Ok(G::try_from_edges(n, edges)?)
    }
}

/// Trait for creating graphs from an EdgeListReader.
/// Used as shorthand for default EdgeListReader settings
pub trait EdgeListRead: Sized {
    /// Tries to read the graph from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the graph from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl<G> EdgeListRead for G
where
    G: GraphFromScratch,
{
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_graph(reader)
    }
}

/// Streams the edges of an edge list after parsing its header
pub struct EdgeListEdgesReader<'a, R> {
    lines: Lines<R>,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
    comment_identifier: &'a str,
    one_indexed: bool,
}

impl<'a, R: BufRead> EdgeListEdgesReader<'a, R> {
    /// Creates a new EdgeListEdgesReader and tries to parse the first non-comment-line as the header
    pub fn try_new(reader: R, comment_identifier: &'a str, one_indexed: bool) -> Result<Self> {
        let mut edge_list_reader = Self {
            lines: reader.lines(),
            number_of_nodes: 0,
            number_of_edges: 0,
            comment_identifier,
            one_indexed,
        };

        let header = edge_list_reader
            .next_non_comment_line()?
            .ok_or(io_error!(ErrorKind::InvalidData, "Header not found"))?;

        let mut parts = header.split_whitespace();
        edge_list_reader.number_of_nodes = parse_next_value!(parts, "Header>Number of nodes");
        edge_list_reader.number_of_edges = parse_next_value!(parts, "Header>Number of edges");
        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Header is longer than expected"
        );

        Ok(edge_list_reader)
    }

    /// Returns the parsed number of edges in the graph
    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    /// Returns the parsed number of nodes in the graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }

    /// Returns the next non-comment-line if it exists or propagate an error
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            match self.lines.next() {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line))
                    if line.trim().is_empty() || line.starts_with(self.comment_identifier) =>
                {
                    continue;
                }
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn shift(&self, u: Node) -> Result<Node> {
        if !self.one_indexed {
            return Ok(u);
        }

        u.checked_sub(1).ok_or(io_error!(
            ErrorKind::InvalidData,
            "Node 0 found in one-indexed edge list"
        ))
    }

    /// Tries to parse an edge from the next non-comment-line
    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();

        let from = parse_next_value!(parts, "Source node");
        let dest = parse_next_value!(parts, "Target node");
        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Unexpected trailing tokens in edge line `{line}`")
        );

        Ok(Some(Edge(self.shift(from)?, self.shift(dest)?)))
    }
}

impl<'a, R: BufRead> Iterator for EdgeListEdgesReader<'a, R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line().transpose()
    }
}

/// A writer for the EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter {
    one_indexed: bool,
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// Write node ids as `1..=n` instead of `0..n`
    pub fn one_indexed(mut self, one_indexed: bool) -> EdgeListWriter {
        self.one_indexed = one_indexed;
        self
    }
}

impl<G: AdjacencyList + GraphEdgeOrder> GraphWriter<G> for EdgeListWriter {
    fn try_write_graph<W: Write>(&self, graph: &G, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "{} {}",
            graph.number_of_nodes(),
            graph.number_of_edges()
        )?;

        let offset = self.one_indexed as Node;
        for Edge(u, v) in graph.edges() {
            writeln!(writer, "{} {}", u + offset, v + offset)?;
        }

        writer.flush()
    }
}

/// Trait for writing a graph to a writer in the EdgeList-Format.
/// Shorthand for default settings.
pub trait EdgeListWrite {
    /// Tries to write the graph to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the graph to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(writer)
    }
}

impl<G: AdjacencyList + GraphEdgeOrder> EdgeListWrite for G {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter::default().try_write_graph(self, writer)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::testing::random_edges;

    fn read(input: &str) -> Result<AdjArray> {
        AdjArray::try_read_edge_list(input.as_bytes())
    }

    #[test]
    fn read_with_comments() {
        let graph = read("c header follows\n4 3\n0 1\nc inline\n\n1 2\n3 3\n").unwrap();

        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.ordered_edges(), vec![Edge(0, 1), Edge(1, 2), Edge(3, 3)]);
    }

    #[test]
    fn read_one_indexed() {
        let reader = EdgeListReader::new().one_indexed(true).comment_identifier("%");
        let graph: AdjArray = reader
            .try_read_graph("% one-based\n3 2\n1 2\n3 1\n".as_bytes())
            .unwrap();
        assert_eq!(graph.ordered_edges(), vec![Edge(0, 1), Edge(2, 0)]);

        let err = GraphReader::<AdjArray>::try_read_graph(&reader, "2 1\n0 1\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "",
            "c only comments\n",
            "3\n",
            "3 x\n",
            "3 1 7\n0 1\n",
            "3 2\n0 1\n",
            "3 1\n0 1\n1 2\n",
            "3 1\n0\n",
            "3 1\n0 1 2\n",
            "3 1\n0 -1\n",
        ] {
            let err = read(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidData, "input: {input:?}");
        }
    }

    #[test]
    fn out_of_range_is_invalid_data() {
        let err = read("2 1\n0 2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn huge_header_is_invalid_data() {
        let err = read("4000000000 0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(
            err.get_ref()
                .and_then(|e| e.downcast_ref::<GraphError>())
                .copied(),
            Some(GraphError::TooManyNodes(4_000_000_000))
        );

        let reader = EdgeListReader::new().max_nodes(3);
        let graph: AdjArray = reader.try_read_graph("3 1\n0 2\n".as_bytes()).unwrap();
        assert_eq!(graph.number_of_nodes(), 3);

        let err = GraphReader::<AdjArray>::try_read_graph(&reader, "4 0\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn write_then_read() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2);

        for one_indexed in [false, true] {
            let graph = AdjArray::from_edges(20, random_edges(rng, 20, 50));

            let mut buffer = Vec::new();
            EdgeListWriter::new()
                .one_indexed(one_indexed)
                .try_write_graph(&graph, &mut buffer)
                .unwrap();

            let read_back: AdjArray = EdgeListReader::new()
                .one_indexed(one_indexed)
                .try_read_graph(buffer.as_slice())
                .unwrap();

            assert_eq!(read_back, graph);
        }
    }

    #[test]
    fn write_format() {
        let graph = AdjArray::from_edges(3, [(1, 2), (0, 1)]);

        let mut buffer = Vec::new();
        graph.try_write_edge_list(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "3 2\n0 1\n1 2\n");
    }
}
