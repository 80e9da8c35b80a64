use std::fmt::{self, Display, Formatter};

use rustc_hash::FxHashMap;

use super::error::HuffmanError;
use super::tree_from_weights::build_tree;

/// A node of the code tree. Kids are (left, right): left is a 0 bit, right is a 1 bit.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Node {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

impl Node {
    /// The child reached by following `bit`, or None on a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Kids(left, right) => Some(if bit { right } else { left }),
            Node::Leaf(_) => None,
        }
    }
}

/// The bits from the root to a leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePath(Vec<bool>);

impl CodePath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a string of '0' and '1'. Returns None for an empty string or any other character.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        text.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<bool>>>()
            .map(Self)
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit)
    }

    /// A copy of this path extended by one bit.
    pub fn child(&self, bit: bool) -> Self {
        let mut path = self.clone();
        path.push(bit);
        path
    }

    /// True if `self` is a prefix of `other` (a path is a prefix of itself).
    pub fn is_prefix_of(&self, other: &CodePath) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl Display for CodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<&[bool]> for CodePath {
    fn from(bits: &[bool]) -> Self {
        Self(bits.to_vec())
    }
}

/// Symbol to code path mapping.
pub type CodeTable = FxHashMap<u8, CodePath>;

/// An immutable prefix-code tree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree from a 256 entry weight table (index = symbol, 0 = absent).
    pub fn from_weights(weights: &[u32]) -> Result<Self, HuffmanError> {
        build_tree(weights).map(Self::from_root)
    }

    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True for the one-symbol tree, whose lone leaf is the root.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root, Node::Leaf(_))
    }

    /// Every (symbol, path) pair, depth first, left before right.
    pub fn leaves(&self) -> Vec<(u8, CodePath)> {
        let mut leaves = vec![];
        // Push right before left so the left subtree pops first.
        let mut stack = vec![(&self.root, CodePath::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Kids(left, right) => {
                    stack.push((right, path.child(true)));
                    stack.push((left, path.child(false)));
                }
                Node::Leaf(symbol) => leaves.push((*symbol, path)),
            }
        }
        leaves
    }

    /// Leaves as written to table files and bit streams: the lone symbol of a one-symbol tree
    /// is given the path "0" so that it takes up a bit.
    pub fn wire_leaves(&self) -> Vec<(u8, CodePath)> {
        let mut leaves = self.leaves();
        if let [(_, path)] = leaves.as_mut_slice() {
            if path.is_empty() {
                path.push(false);
            }
        }
        leaves
    }

    pub fn code_table(&self) -> CodeTable {
        self.leaves().into_iter().collect()
    }

    pub fn wire_table(&self) -> CodeTable {
        self.wire_leaves().into_iter().collect()
    }

    pub fn symbol_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest code path.
    pub fn depth(&self) -> usize {
        self.leaves()
            .iter()
            .map(|(_, path)| path.len())
            .max()
            .unwrap_or(0)
    }

    /// Sum over all symbols of weight * code length: the encoded size in bits of an input with
    /// these weights. Symbols missing from the tree count for nothing.
    pub fn weighted_length(&self, weights: &[u32]) -> u64 {
        self.leaves()
            .iter()
            .map(|(symbol, path)| {
                weights.get(*symbol as usize).copied().unwrap_or(0) as u64 * path.len() as u64
            })
            .sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf(s: u8) -> Box<Node> {
        Box::new(Node::Leaf(s))
    }

    #[test]
    fn code_path_parse_test() {
        let path = CodePath::parse("0110").unwrap();
        assert_eq!(path.bits(), &[false, true, true, false]);
        assert_eq!(path.to_string(), "0110");
        assert_eq!(CodePath::parse(""), None);
        assert_eq!(CodePath::parse("01a"), None);
        assert_eq!(CodePath::parse("0 1"), None);
    }

    #[test]
    fn prefix_test() {
        let a = CodePath::parse("01").unwrap();
        let b = CodePath::parse("011").unwrap();
        assert!(a.is_prefix_of(&b));
        assert!(!b.is_prefix_of(&a));
        assert!(CodePath::new().is_prefix_of(&a));
    }

    #[test]
    fn leaves_order_test() {
        // ((a, b), c)
        let tree = HuffmanTree::from_root(Node::Kids(
            Box::new(Node::Kids(leaf(b'a'), leaf(b'b'))),
            leaf(b'c'),
        ));
        let leaves: Vec<(u8, String)> = tree
            .leaves()
            .into_iter()
            .map(|(s, p)| (s, p.to_string()))
            .collect();
        assert_eq!(
            leaves,
            vec![
                (b'a', "00".to_string()),
                (b'b', "01".to_string()),
                (b'c', "1".to_string())
            ]
        );
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.symbol_count(), 3);
    }

    #[test]
    fn single_leaf_test() {
        let tree = HuffmanTree::from_root(Node::Leaf(b'z'));
        assert!(tree.is_single_leaf());
        assert_eq!(tree.code_table()[&b'z'], CodePath::new());
        assert_eq!(tree.wire_table()[&b'z'].to_string(), "0");
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn child_test() {
        let node = Node::Kids(leaf(1), leaf(2));
        assert_eq!(node.child(false), Some(&Node::Leaf(1)));
        assert_eq!(node.child(true), Some(&Node::Leaf(2)));
        assert_eq!(Node::Leaf(3).child(false), None);
    }
}
