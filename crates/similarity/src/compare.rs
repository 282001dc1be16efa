//! Pairwise comparison driver.
//!
//! Orchestration only: flattening fan-out, unordered-pair enumeration,
//! scoring and block matching per pair, and the hand-off to the persistence
//! collaborator. Each pair depends only on its two input sequences, so the
//! pair loop parallelizes freely; results become visible as one complete
//! set after the join.

use crate::blocks::match_blocks;
use crate::config::CompareConfig;
use crate::error::Result;
use crate::flatten::Flattener;
use crate::language::Language;
use crate::score::similarity;
use crate::types::{
    kinds, ComparisonResult, FlatSequence, LineRange, MatchBlock, MatchedRegion, PairResult,
    SyntaxNode,
};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Flatten every submission of a batch, keyed by submission identifier
///
/// Flattening is independent per submission and fans out across the worker
/// pool; each worker parses with its own [`Flattener`], so no parser state
/// is shared. Submissions that fail to parse flatten to empty sequences.
pub fn flatten_all(
    sources: &BTreeMap<String, String>,
    language: Language,
) -> Result<BTreeMap<String, FlatSequence>> {
    let flattened: Vec<(String, FlatSequence)> = sources
        .par_iter()
        .map(|(id, text)| {
            let mut flattener = Flattener::new(language)?;
            Ok((id.clone(), flattener.flatten(text)))
        })
        .collect::<Result<_>>()?;

    Ok(flattened.into_iter().collect())
}

/// Compare one pair of flattened sequences
///
/// Scores the kind projections, finds exact block matches on the typed
/// sequences, and projects each surviving block to the line ranges it
/// covers on both sides.
#[must_use]
pub fn compare_pair(
    first: &[SyntaxNode],
    second: &[SyntaxNode],
    config: &CompareConfig,
) -> ComparisonResult {
    let score = similarity(&kinds(first), &kinds(second));

    let matches = match_blocks(first, second, config.block_width)
        .iter()
        .filter_map(|block| matched_region(first, second, block, config.block_width))
        .collect();

    ComparisonResult { score, matches }
}

/// Compare every unordered pair of a batch
///
/// Pairs are enumerated as `(i, j), i < j` over the map's identifier
/// ordering, so every pair is covered exactly once. Fewer than two
/// submissions is a no-op, not an error. The returned vector is the
/// complete result set; no partial set is ever observable.
pub fn compare_batch(
    sequences: &BTreeMap<String, FlatSequence>,
    config: &CompareConfig,
) -> Result<Vec<PairResult>> {
    config.validate()?;

    if sequences.len() < 2 {
        log::info!(
            "batch has {} submission(s), nothing to compare",
            sequences.len()
        );
        return Ok(Vec::new());
    }

    let entries: Vec<(&String, &FlatSequence)> = sequences.iter().collect();

    let mut pairs = Vec::with_capacity(entries.len() * (entries.len() - 1) / 2);
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            pairs.push((i, j));
        }
    }

    let results = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (first_id, first_seq) = entries[i];
            let (second_id, second_seq) = entries[j];
            PairResult {
                first: first_id.clone(),
                second: second_id.clone(),
                result: compare_pair(first_seq, second_seq, config),
            }
        })
        .collect();

    Ok(results)
}

/// Persistence collaborator boundary
///
/// Implementations must discard any previously stored results for the batch
/// before storing the new set, so a rerun replaces rather than accumulates.
pub trait ResultSink {
    fn replace_batch(&mut self, batch: &str, results: Vec<PairResult>);
}

/// Compare a batch and hand the complete result set to a sink
///
/// Returns the number of pairs compared.
pub fn run_batch<S: ResultSink>(
    batch: &str,
    sequences: &BTreeMap<String, FlatSequence>,
    config: &CompareConfig,
    sink: &mut S,
) -> Result<usize> {
    let results = compare_batch(sequences, config)?;
    let pair_count = results.len();
    log::info!("batch {batch}: compared {pair_count} pair(s)");
    sink.replace_batch(batch, results);
    Ok(pair_count)
}

/// Map-backed sink for tests and in-process callers
#[derive(Debug, Default)]
pub struct InMemorySink {
    batches: BTreeMap<String, Vec<PairResult>>,
}

impl InMemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored results for a batch, if any run has completed
    #[must_use]
    pub fn results(&self, batch: &str) -> Option<&[PairResult]> {
        self.batches.get(batch).map(Vec::as_slice)
    }
}

impl ResultSink for InMemorySink {
    fn replace_batch(&mut self, batch: &str, results: Vec<PairResult>) {
        self.batches.insert(batch.to_string(), results);
    }
}

/// Line spans a matched block covers on both sides
///
/// Sentinel-lined nodes are excluded from the span; a window whose nodes
/// are all sentinel-lined on either side yields nothing and the block is
/// dropped from the visible match list.
fn matched_region(
    first: &[SyntaxNode],
    second: &[SyntaxNode],
    block: &MatchBlock,
    width: usize,
) -> Option<MatchedRegion> {
    let first_range = line_range(&first[block.first_start..block.first_start + width])?;
    let second_range = line_range(&second[block.second_start..block.second_start + width])?;
    Some(MatchedRegion {
        first: first_range,
        second: second_range,
    })
}

fn line_range(window: &[SyntaxNode]) -> Option<LineRange> {
    let mut lines = window.iter().filter_map(|node| node.line);
    let start = lines.next()?;
    let (min_line, max_line) = lines.fold((start, start), |(lo, hi), line| {
        (lo.min(line), hi.max(line))
    });
    Some(LineRange { min_line, max_line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seq(kinds: &[&'static str]) -> FlatSequence {
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| SyntaxNode::new(kind, Some(i + 1)))
            .collect()
    }

    fn config(width: usize) -> CompareConfig {
        CompareConfig { block_width: width }
    }

    #[test]
    fn test_compare_pair_is_symmetric_with_sides_swapped() {
        let a = seq(&["a", "b", "c", "d", "e", "f"]);
        let b = seq(&["x", "a", "b", "c", "d", "y"]);

        let ab = compare_pair(&a, &b, &config(3));
        let ba = compare_pair(&b, &a, &config(3));

        assert_eq!(ab.score, ba.score);
        assert_eq!(ab.matches.len(), ba.matches.len());
        for (m_ab, m_ba) in ab.matches.iter().zip(&ba.matches) {
            assert_eq!(m_ab.first, m_ba.second);
            assert_eq!(m_ab.second, m_ba.first);
        }
    }

    #[test]
    fn test_compare_pair_empty_vs_nonempty() {
        let a = seq(&[]);
        let b = seq(&["a", "b", "c", "d", "e"]);

        let result = compare_pair(&a, &b, &config(3));
        assert_eq!(result.score, 0.0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_match_lines_cover_the_window() {
        let a = vec![
            SyntaxNode::new("a", Some(10)),
            SyntaxNode::new("b", Some(12)),
            SyntaxNode::new("c", Some(11)),
        ];
        let b = vec![
            SyntaxNode::new("a", Some(3)),
            SyntaxNode::new("b", Some(3)),
            SyntaxNode::new("c", Some(4)),
        ];

        let result = compare_pair(&a, &b, &config(3));
        assert_eq!(
            result.matches,
            vec![MatchedRegion {
                first: LineRange { min_line: 10, max_line: 12 },
                second: LineRange { min_line: 3, max_line: 4 },
            }]
        );
    }

    #[test]
    fn test_sentinel_only_window_is_dropped() {
        let a = vec![
            SyntaxNode::new("a", None),
            SyntaxNode::new("b", None),
            SyntaxNode::new("c", None),
        ];
        let b = vec![
            SyntaxNode::new("a", Some(1)),
            SyntaxNode::new("b", Some(2)),
            SyntaxNode::new("c", Some(3)),
        ];

        // The block matches on kind content but has no visible lines on
        // one side, so it never reaches the match list.
        let result = compare_pair(&a, &b, &config(3));
        assert_eq!(result.score, 1.0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_compare_batch_covers_every_unordered_pair_once() {
        let mut sequences = BTreeMap::new();
        sequences.insert("a".to_string(), seq(&["x", "y", "z"]));
        sequences.insert("b".to_string(), seq(&["x", "y", "z"]));
        sequences.insert("c".to_string(), seq(&["p", "q"]));

        let results = compare_batch(&sequences, &config(3)).unwrap();

        let ids: Vec<(&str, &str)> = results
            .iter()
            .map(|r| (r.first.as_str(), r.second.as_str()))
            .collect();
        assert_eq!(ids, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn test_compare_batch_single_submission_is_noop() {
        let mut sequences = BTreeMap::new();
        sequences.insert("only".to_string(), seq(&["x", "y"]));

        let results = compare_batch(&sequences, &config(3)).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_compare_batch_rejects_invalid_config() {
        let mut sequences = BTreeMap::new();
        sequences.insert("a".to_string(), seq(&["x"]));
        sequences.insert("b".to_string(), seq(&["x"]));

        assert!(compare_batch(&sequences, &config(0)).is_err());
    }

    #[test]
    fn test_rerun_replaces_prior_results() {
        let mut first_batch = BTreeMap::new();
        first_batch.insert("a".to_string(), seq(&["x", "y", "z"]));
        first_batch.insert("b".to_string(), seq(&["x", "y", "z"]));
        first_batch.insert("c".to_string(), seq(&["x", "y", "z"]));

        let mut sink = InMemorySink::new();
        let pairs = run_batch("batch-1", &first_batch, &config(3), &mut sink).unwrap();
        assert_eq!(pairs, 3);
        assert_eq!(sink.results("batch-1").unwrap().len(), 3);

        // Rerun with one submission removed: stale pairs must not survive
        first_batch.remove("c");
        let pairs = run_batch("batch-1", &first_batch, &config(3), &mut sink).unwrap();
        assert_eq!(pairs, 1);
        assert_eq!(sink.results("batch-1").unwrap().len(), 1);
    }

    #[test]
    fn test_flatten_all_keys_match_sources() {
        let mut sources = BTreeMap::new();
        sources.insert("good".to_string(), "def f():\n    return 1\n".to_string());
        sources.insert("bad".to_string(), "def broken(:\n".to_string());

        let sequences = flatten_all(&sources, Language::Python).unwrap();

        assert_eq!(sequences.len(), 2);
        assert!(!sequences["good"].is_empty());
        assert!(sequences["bad"].is_empty());
    }
}
