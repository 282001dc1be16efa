//! # Astra Similarity
//!
//! Structural similarity engine for source-code submissions.
//!
//! Submissions are compared by syntax-tree shape rather than raw text, so
//! renamed variables, reformatting, and comment changes do not hide a copy.
//!
//! ## Architecture
//!
//! ```text
//! Source Text (per submission)
//!     │
//!     ├──> Tree-sitter Parsing → AST
//!     │
//!     ├──> Flattening (pre-order DFS, inert kinds dropped)
//!     │        └─> FlatSequence of (node kind, line)
//!     │
//!     └──> Pairwise Driver (all unordered pairs, parallel)
//!          ├─> Edit-distance score over kind sequences
//!          ├─> Block matcher: fingerprinted fixed-width windows
//!          └─> ComparisonResult { score, matched line ranges }
//! ```
//!
//! Storage, upload, and display are the caller's concern; the engine hands
//! each batch's complete result set across the [`ResultSink`] boundary.
//!
//! ## Example
//!
//! ```rust
//! use astra_similarity::{compare_batch, flatten_all, CompareConfig, Language};
//! use std::collections::BTreeMap;
//!
//! let mut sources = BTreeMap::new();
//! sources.insert(
//!     "alice".to_string(),
//!     "def double(x):\n    return x * 2\n".to_string(),
//! );
//! sources.insert(
//!     "bob".to_string(),
//!     "def twice(n):\n    return n * 2\n".to_string(),
//! );
//!
//! let sequences = flatten_all(&sources, Language::Python).unwrap();
//! let results = compare_batch(&sequences, &CompareConfig::default()).unwrap();
//!
//! assert_eq!(results.len(), 1);
//! // Identifier names never enter the comparison
//! assert_eq!(results[0].result.score, 1.0);
//! ```

mod blocks;
mod compare;
mod config;
mod error;
mod flatten;
mod language;
mod score;
mod types;

pub use blocks::match_blocks;
pub use compare::{
    compare_batch, compare_pair, flatten_all, run_batch, InMemorySink, ResultSink,
};
pub use config::{CompareConfig, DEFAULT_BLOCK_WIDTH};
pub use error::{Result, SimilarityError};
pub use flatten::Flattener;
pub use language::Language;
pub use score::{edit_distance, similarity};
pub use types::{
    kinds, ComparisonResult, FlatSequence, LineRange, MatchBlock, MatchedRegion, PairResult,
    SyntaxNode,
};
