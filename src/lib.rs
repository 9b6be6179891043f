//! Static Huffman coding.
//!
//! Builds a prefix-free binary code from the byte-frequency distribution of
//! an input buffer, then uses that code to pack the input into a bit buffer
//! and losslessly reconstruct it. The tree is built once and is immutable
//! afterward, so a single tree can serve concurrent encode/decode calls.
//!
//! ```
//! use huff::HuffmanTree;
//!
//! let input = b"testing!";
//! let tree = HuffmanTree::from_data(input)?;
//! let encoded = tree.encode(input)?;
//! let decoded = tree.decode(&encoded)?;
//! assert_eq!(decoded, input);
//! # Ok::<(), huff::HuffError>(())
//! ```

pub mod bits;
pub mod frequency;
pub mod huffman;
pub mod pqueue;


pub use bits::EncodedBuffer;
pub use huffman::{Code, CodeTable, HuffmanNode, HuffmanTree};

/// Error types for huff operations.
///
/// All three are precondition or data-integrity violations; none are
/// retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffError {
    /// Tree construction was attempted over zero symbols.
    EmptyInput,
    /// Encode met a byte that is not in the tree's alphabet.
    UnknownSymbol(u8),
    /// Decode's bit cursor ran out mid-codeword, or the byte buffer holds
    /// fewer bits than its logical length claims.
    TruncatedEncoding,
}

impl std::fmt::Display for HuffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "cannot build a Huffman tree over empty input"),
            Self::UnknownSymbol(byte) => {
                write!(f, "byte 0x{byte:02x} is not in the tree's alphabet")
            }
            Self::TruncatedEncoding => write!(f, "encoded buffer ended mid-codeword"),
        }
    }
}

impl std::error::Error for HuffError {}

pub type HuffResult<T> = Result<T, HuffError>;
