//! Exact-match block detection between two flattened sequences.
//!
//! Fingerprints every fixed-width window of the first sequence, then scans
//! the second sequence for windows with identical kind content. This is a
//! correctness-over-speed exact-match finder: each window is digested in
//! full rather than rolled, and digest collisions are accepted as matches
//! without a verification pass.

use crate::types::{MatchBlock, SyntaxNode};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

type Fingerprint = [u8; 32];

/// Digest of a window's kind content
///
/// Kind names are joined with a separator so adjacent kinds cannot run
/// together ("ab","c" vs "a","bc").
fn window_fingerprint(window: &[SyntaxNode]) -> Fingerprint {
    let mut hasher = Sha256::new();
    for (i, node) in window.iter().enumerate() {
        if i > 0 {
            hasher.update(b",");
        }
        hasher.update(node.kind.as_bytes());
    }
    hasher.finalize().into()
}

/// Find all identical fixed-width windows between two sequences
///
/// Emits one [`MatchBlock`] per (offset-in-first, offset-in-second)
/// combination with equal kind content. Windows may overlap and a node may
/// participate in several reported blocks. Returns no matches when either
/// sequence is shorter than `width`.
///
/// The fingerprint map lives only for this call; nothing is shared across
/// pairs or runs.
#[must_use]
pub fn match_blocks(first: &[SyntaxNode], second: &[SyntaxNode], width: usize) -> Vec<MatchBlock> {
    debug_assert!(width > 0, "block width is validated at the boundary");
    if width == 0 || first.len() < width || second.len() < width {
        return Vec::new();
    }

    let mut windows: HashMap<Fingerprint, Vec<usize>> = HashMap::new();
    for (i, window) in first.windows(width).enumerate() {
        windows.entry(window_fingerprint(window)).or_default().push(i);
    }

    let mut matches = Vec::new();
    for (j, window) in second.windows(width).enumerate() {
        if let Some(starts) = windows.get(&window_fingerprint(window)) {
            for &i in starts {
                matches.push(MatchBlock {
                    first_start: i,
                    second_start: j,
                });
            }
        }
    }

    matches
}
