//! Builds a code tree from symbol weights.
//!
//! Classic greedy construction: every symbol with a non-zero weight starts out as a leaf, and the
//! two lightest nodes are merged over and over until a single root remains. Ties are broken by a
//! sequence number (leaves in ascending symbol order, then merged nodes in order of creation), so the
//! same weights always give the same tree.
//!

use log::{debug, trace};
use std::cmp::Ordering;

use super::error::HuffmanError;
use super::huffman::Node;

/// Work queue entry. Only lives while the tree is being built.
#[derive(Debug)]
struct Weighted {
    weight: u64,
    seq: u32,
    node: Node,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Weighted {}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weighted {
    /// Sort by decreasing weight, then decreasing sequence, so the next node to merge is at the end.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then(other.seq.cmp(&self.seq))
    }
}

/// Build a code tree from weights indexed by symbol. Zero weights are left out, as is anything
/// past index 255. Fails with EmptyAlphabet if nothing is left.
pub fn build_tree(weights: &[u32]) -> Result<Node, HuffmanError> {
    let mut queue: Vec<Weighted> = weights
        .iter()
        .take(256)
        .enumerate()
        .filter(|(_, w)| **w > 0)
        .map(|(sym, &w)| Weighted {
            weight: w as u64,
            seq: sym as u32,
            node: Node::Leaf(sym as u8),
        })
        .collect();

    if queue.is_empty() {
        return Err(HuffmanError::EmptyAlphabet);
    }
    debug!("Building code tree from {} symbols.", queue.len());

    // Merged nodes are numbered after every possible leaf.
    let mut next_seq = 256_u32;

    // Pare it down to one single node with child nodes - keep it sorted.
    while queue.len() > 1 {
        queue.sort_unstable();
        let (left, right) = match (queue.pop(), queue.pop()) {
            (Some(left), Some(right)) => (left, right),
            _ => unreachable!("queue holds at least two nodes"),
        };
        trace!(
            "merge {}#{} + {}#{} -> #{}",
            left.weight,
            left.seq,
            right.weight,
            right.seq,
            next_seq
        );
        queue.push(Weighted {
            weight: left.weight + right.weight,
            seq: next_seq,
            node: Node::Kids(Box::new(left.node), Box::new(right.node)),
        });
        next_seq += 1;
    }

    match queue.pop() {
        Some(root) => {
            debug!("Code tree built, total weight {}.", root.weight);
            Ok(root.node)
        }
        None => Err(HuffmanError::EmptyAlphabet),
    }
}
