//! Persists a code tree as a text table, and rebuilds a tree from such a table.
//!
//! The table is a list of line pairs, one pair per leaf, in depth first order (left before right):
//!
//! ```text
//! <symbol as a decimal number>
//! <code path as 0s and 1s>
//! ```
//!
//! There is no header or record count. End of input ends the table. A one-symbol tree is written
//! with the path "0", and a table whose only record is "0" loads back as a one-symbol tree.
//!

use std::io::{BufRead, Write};

use log::{debug, trace};
use rustc_hash::FxHashSet;

use super::error::HuffmanError;
use super::huffman::{CodePath, HuffmanTree, Node};

/// Write the table for `tree` to `out`. Returns the number of records written.
pub fn save<W: Write + ?Sized>(tree: &HuffmanTree, out: &mut W) -> Result<usize, HuffmanError> {
    let leaves = tree.wire_leaves();
    for (symbol, path) in &leaves {
        writeln!(out, "{}", symbol)?;
        writeln!(out, "{}", path)?;
    }
    out.flush()?;
    debug!("Saved code table with {} records.", leaves.len());
    Ok(leaves.len())
}

/// Position in the tree under construction.
#[derive(Clone, Copy, Debug)]
enum Slot {
    Vacant,
    Leaf(u8),
    Kids(usize, usize),
}

/// Tree under construction. Slot 0 is the root; children always sit at higher indices than their
/// parent.
struct Arena {
    slots: Vec<Slot>,
    /// Parent index and the bit that leads from it, for every slot but the root.
    parents: Vec<Option<(usize, bool)>>,
}

impl Arena {
    fn new() -> Self {
        Self {
            slots: vec![Slot::Vacant],
            parents: vec![None],
        }
    }

    fn add_vacant(&mut self, parent: usize, bit: bool) -> usize {
        self.slots.push(Slot::Vacant);
        self.parents.push(Some((parent, bit)));
        self.slots.len() - 1
    }

    /// Walk `path` from the root, opening internal nodes on the way, and put `symbol` at its end.
    /// Returns false if the path crosses or lands on a spot that is already taken.
    fn insert(&mut self, path: &CodePath, symbol: u8) -> bool {
        let mut at = 0;
        for &bit in path.bits() {
            let (left, right) = match self.slots[at] {
                Slot::Kids(left, right) => (left, right),
                Slot::Vacant => {
                    let left = self.add_vacant(at, false);
                    let right = self.add_vacant(at, true);
                    self.slots[at] = Slot::Kids(left, right);
                    (left, right)
                }
                Slot::Leaf(_) => return false,
            };
            at = if bit { right } else { left };
        }
        match self.slots[at] {
            Slot::Vacant => {
                self.slots[at] = Slot::Leaf(symbol);
                true
            }
            _ => false,
        }
    }

    fn path_to(&self, mut at: usize) -> CodePath {
        let mut bits = vec![];
        while let Some((parent, bit)) = self.parents[at] {
            bits.push(bit);
            at = parent;
        }
        bits.reverse();
        CodePath::from(bits.as_slice())
    }

    /// Turn the arena into nodes, children first. Any vacant slot left is an error.
    fn into_tree(self) -> Result<HuffmanTree, HuffmanError> {
        let mut built: Vec<Option<Node>> = vec![None; self.slots.len()];
        for at in (0..self.slots.len()).rev() {
            let node = match self.slots[at] {
                Slot::Leaf(symbol) => Node::Leaf(symbol),
                Slot::Kids(left, right) => match (built[left].take(), built[right].take()) {
                    (Some(left), Some(right)) => Node::Kids(Box::new(left), Box::new(right)),
                    _ => unreachable!("children are built before their parent"),
                },
                Slot::Vacant => {
                    return Err(HuffmanError::IncompleteTable {
                        path: self.path_to(at).to_string(),
                    })
                }
            };
            built[at] = Some(node);
        }
        match built.swap_remove(0) {
            Some(root) => Ok(HuffmanTree::from_root(root)),
            None => Err(HuffmanError::EmptyAlphabet),
        }
    }
}

/// Read a table from `input` and rebuild the tree it describes. Record order does not matter.
pub fn load<R: BufRead>(input: R) -> Result<HuffmanTree, HuffmanError> {
    let mut arena = Arena::new();
    let mut seen: FxHashSet<u8> = FxHashSet::default();
    let mut records = 0;
    let mut single: Option<u8> = None;

    let mut lines = input.lines().enumerate();
    while let Some((idx, line)) = lines.next() {
        let line = line?;
        let text = line.trim_end_matches('\r');
        let symbol: u8 = text.parse().map_err(|_| HuffmanError::MalformedSymbol {
            line: idx + 1,
            text: text.to_string(),
        })?;

        let (idx, line) = match lines.next() {
            Some((idx, line)) => (idx, line?),
            None => {
                return Err(HuffmanError::MissingPath {
                    line: idx + 1,
                    symbol,
                })
            }
        };
        let text = line.trim_end_matches('\r');
        let path = CodePath::parse(text).ok_or_else(|| HuffmanError::MalformedPath {
            line: idx + 1,
            path: text.to_string(),
        })?;

        if !seen.insert(symbol) {
            return Err(HuffmanError::DuplicateSymbol {
                line: idx + 1,
                symbol,
            });
        }
        if !arena.insert(&path, symbol) {
            return Err(HuffmanError::ConflictingPath {
                line: idx + 1,
                symbol,
                path: text.to_string(),
            });
        }
        trace!("{} -> {}", symbol, path);

        records += 1;
        single = if records == 1 && text == "0" {
            Some(symbol)
        } else {
            None
        };
    }

    if records == 0 {
        return Err(HuffmanError::EmptyAlphabet);
    }
    if let Some(symbol) = single {
        debug!("Loaded one-symbol code table.");
        return Ok(HuffmanTree::from_root(Node::Leaf(symbol)));
    }
    let tree = arena.into_tree()?;
    debug!("Loaded code table with {} records.", records);
    Ok(tree)
}
