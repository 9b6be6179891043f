//! Huffman coding: tree construction, code derivation, encoding, decoding.
//!
//! The tree is built once from a frequency distribution and never mutated
//! afterward. Construction merges the two lowest-weight nodes under a fresh
//! internal node until one root remains; the first node popped becomes the
//! left child, the second the right. Encode walks the derived code table;
//! decode walks the tree itself, one bit at a time.

use crate::bits::EncodedBuffer;
use crate::frequency::FrequencyTable;
use crate::pqueue::MinHeap;
use crate::{HuffError, HuffResult};

/// A node in the Huffman tree: a leaf holding one symbol, or an internal
/// node owning two subtrees.
///
/// An internal node's weight is always the sum of its children's weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        weight: u32,
        symbol: u8,
    },
    Internal {
        weight: u32,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Frequency weight of this node's subtree.
    pub fn weight(&self) -> u32 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees under a new internal node.
    fn merge(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A symbol's codeword: the low `len` bits of `bits`, written most
/// significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u32,
    pub len: u8,
}

/// Codewords for every symbol in a tree's alphabet.
///
/// Stored as a dense 256-entry table; symbols outside the alphabet have no
/// entry and read back as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    // len == 0 marks an absent symbol
    codes: [Code; 256],
}

impl CodeTable {
    /// Derive the code table for a tree: depth-first walk from the root,
    /// appending bit 0 on a left edge and bit 1 on a right edge, recording
    /// the accumulated path at each leaf.
    pub fn derive(root: &HuffmanNode) -> CodeTable {
        let mut table = CodeTable {
            codes: [Code { bits: 0, len: 0 }; 256],
        };
        match root {
            // A lone leaf has no edges to walk; its symbol gets the
            // one-bit code 0.
            HuffmanNode::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = Code { bits: 0, len: 1 };
            }
            HuffmanNode::Internal { .. } => table.walk(root, 0, 0),
        }
        table
    }

    fn walk(&mut self, node: &HuffmanNode, prefix: u32, depth: u8) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                self.codes[*symbol as usize] = Code {
                    bits: prefix,
                    len: depth,
                };
            }
            HuffmanNode::Internal { left, right, .. } => {
                self.walk(left, prefix << 1, depth + 1);
                self.walk(right, (prefix << 1) | 1, depth + 1);
            }
        }
    }

    /// Look up a symbol's codeword.
    ///
    /// Returns `None` for symbols outside the tree's alphabet.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        let code = self.codes[symbol as usize];
        (code.len > 0).then_some(code)
    }
}

/// A Huffman tree for encoding and decoding byte buffers.
///
/// Built once from a frequency distribution and immutable afterward, so it
/// can be shared read-only across concurrent encode/decode calls.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: HuffmanNode,
    codes: CodeTable,
    leaf_count: u32,
}

impl HuffmanTree {
    /// Build a Huffman tree from input data.
    ///
    /// Counts byte frequencies, then builds the tree via a min-heap and
    /// derives the codeword table.
    pub fn from_data(input: &[u8]) -> HuffResult<Self> {
        let mut freq = FrequencyTable::new();
        freq.count(input);
        Self::from_frequency_table(&freq)
    }

    /// Build a Huffman tree from a pre-computed frequency table.
    pub fn from_frequency_table(freq: &FrequencyTable) -> HuffResult<Self> {
        if freq.used == 0 {
            return Err(HuffError::EmptyInput);
        }

        let mut heap = MinHeap::with_capacity(freq.used as usize);
        for symbol in 0..=255u8 {
            let weight = freq.get(symbol);
            if weight > 0 {
                heap.push(weight, HuffmanNode::Leaf { weight, symbol });
            }
        }

        // N leaves take N-1 merges; the last node standing is the root.
        // With a single symbol the first iteration breaks immediately and
        // the lone leaf is the root.
        let root = loop {
            let first = heap.pop().ok_or(HuffError::EmptyInput)?;
            let Some(second) = heap.pop() else { break first };
            let merged = HuffmanNode::merge(first, second);
            heap.push(merged.weight(), merged);
        };

        let codes = CodeTable::derive(&root);
        Ok(HuffmanTree {
            root,
            codes,
            leaf_count: freq.used,
        })
    }

    /// Number of distinct symbols in the tree's alphabet.
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// The codeword table derived at construction.
    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    /// Look up the codeword for a byte.
    ///
    /// Returns `None` for bytes outside the tree's alphabet.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes.get(symbol)
    }

    /// Encode input bytes using this tree's codeword table.
    ///
    /// The result's bit length is the sum of the codeword lengths of the
    /// input bytes; codewords are packed MSB-first in input order, and the
    /// unused low-order bits of the final byte are zero.
    pub fn encode(&self, input: &[u8]) -> HuffResult<EncodedBuffer> {
        // Sum codeword lengths up front so the buffer allocates once and
        // an unknown byte fails before any bits are written.
        let mut total_bits: usize = 0;
        for &byte in input {
            let code = self
                .codes
                .get(byte)
                .ok_or(HuffError::UnknownSymbol(byte))?;
            total_bits += code.len as usize;
        }

        let mut output = EncodedBuffer::with_bit_capacity(total_bits);
        for &byte in input {
            let code = self
                .codes
                .get(byte)
                .ok_or(HuffError::UnknownSymbol(byte))?;
            output.push_code(code.bits, code.len);
        }
        Ok(output)
    }

    /// Decode an encoded buffer back to the original bytes.
    ///
    /// Walks the tree from the root, descending left on 0 and right on 1,
    /// emitting a symbol and restarting at the root at every leaf. The
    /// cursor must land exactly on a leaf at `bit_len`; running out of
    /// bits mid-codeword is `TruncatedEncoding`.
    pub fn decode(&self, encoded: &EncodedBuffer) -> HuffResult<Vec<u8>> {
        let mut output = Vec::new();

        // A lone-leaf tree has no edges to follow: every bit stands for
        // the one symbol, whatever its value.
        if let HuffmanNode::Leaf { symbol, .. } = &self.root {
            for pos in 0..encoded.bit_len() {
                encoded.bit(pos).ok_or(HuffError::TruncatedEncoding)?;
                output.push(*symbol);
            }
            return Ok(output);
        }

        let mut branch = &self.root;
        for pos in 0..encoded.bit_len() {
            let bit = encoded.bit(pos).ok_or(HuffError::TruncatedEncoding)?;
            let next = match branch {
                HuffmanNode::Internal { left, right, .. } => {
                    if bit == 0 {
                        left
                    } else {
                        right
                    }
                }
                // Unreachable: branch resets to the root after each leaf
                // and the root is internal here.
                HuffmanNode::Leaf { .. } => return Err(HuffError::TruncatedEncoding),
            };
            match next.as_ref() {
                HuffmanNode::Leaf { symbol, .. } => {
                    output.push(*symbol);
                    branch = &self.root;
                }
                node @ HuffmanNode::Internal { .. } => branch = node,
            }
        }

        // The final bit must complete a codeword.
        if !std::ptr::eq(branch, &self.root) {
            return Err(HuffError::TruncatedEncoding);
        }
        Ok(output)
    }
}
