/*!
# Node Representation

We choose `Node = u32` as directed graphs handled here rarely exceed `2^32` vertices.
This saves space in the per-vertex arrays every algorithm allocates (timestamps, low-links,
in-degrees) compared to `usize`.
*/

use std::num::NonZero;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// `Option<Node>` needs padding, which adds up in `Vec<Option<Node>>` parent arrays.
/// Wrapping a `NonZero` lets `Option<OptionalNodeImpl<N>>` use the value `N` as its niche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// `INVALID_NODE` is never a valid vertex, so it is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Same trick as [`OptionalNodeImpl`] for `u64` values.
/// Used by the `G(n,m)` generator to store remapped edge indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalU64Impl<const N: u64>(NonZero<u64>);

/// `u64::MAX` is never a valid edge index
pub type OptionalU64 = OptionalU64Impl<{ u64::MAX }>;

impl<const N: u64> OptionalU64Impl<N> {
    /// Returns `Some(OptionalU64Impl)` if `n != N` and `None` otherwise
    pub const fn new(n: u64) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalU64Impl(inner)),
            None => None,
        }
    }

    /// Gets the underlying u64-Value
    pub const fn get(&self) -> u64 {
        self.0.get() ^ N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_niche() {
        assert_eq!(
            std::mem::size_of::<Option<OptionalNode>>(),
            std::mem::size_of::<Node>()
        );

        assert_eq!(OptionalNode::new(0).map(|x| x.get()), Some(0));
        assert_eq!(OptionalNode::new(17).map(|x| x.get()), Some(17));
        assert!(OptionalNode::new(INVALID_NODE).is_none());
    }

    #[test]
    fn optional_u64_niche() {
        assert_eq!(OptionalU64::new(0).map(|x| x.get()), Some(0));
        assert!(OptionalU64::new(u64::MAX).is_none());
    }
}
