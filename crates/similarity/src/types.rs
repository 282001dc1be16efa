use serde::{Deserialize, Serialize};

/// One flattened syntax-tree node
///
/// `kind` is the grammar's node-kind name; Tree-sitter guarantees kind
/// strings live for the program lifetime, so no allocation per node.
/// `line` is the 1-based source line, or `None` when the node carries no
/// position information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: &'static str,
    pub line: Option<usize>,
}

impl SyntaxNode {
    /// Create a new syntax node
    #[must_use]
    pub const fn new(kind: &'static str, line: Option<usize>) -> Self {
        Self { kind, line }
    }
}

/// Ordered depth-first pre-order node sequence of one submission
pub type FlatSequence = Vec<SyntaxNode>;

/// Project a sequence down to its node kinds
///
/// The similarity scorer only looks at grammatical categories; line numbers
/// never participate in scoring.
#[must_use]
pub fn kinds(seq: &[SyntaxNode]) -> Vec<&'static str> {
    seq.iter().map(|node| node.kind).collect()
}

/// Start offsets of a pair of identical fixed-width windows, one per
/// compared sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    /// Window start in the first sequence
    pub first_start: usize,
    /// Window start in the second sequence
    pub second_start: usize,
}

/// Line span covered by one side of a matched block, sentinel lines excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub min_line: usize,
    pub max_line: usize,
}

/// Line spans of one matched block, one per compared submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRegion {
    pub first: LineRange,
    pub second: LineRange,
}

/// Outcome of comparing one unordered pair of submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Normalized structural similarity in [0, 1]
    pub score: f64,
    /// Exact duplicated substructures, in second-sequence scan order
    pub matches: Vec<MatchedRegion>,
}

/// A comparison result tagged with the submission identifiers it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub first: String,
    pub second: String,
    pub result: ComparisonResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_projection() {
        let seq = vec![
            SyntaxNode::new("function_definition", Some(1)),
            SyntaxNode::new("if_statement", Some(2)),
            SyntaxNode::new("return_statement", None),
        ];
        assert_eq!(
            kinds(&seq),
            vec!["function_definition", "if_statement", "return_statement"]
        );
    }

    #[test]
    fn test_pair_result_serialization() {
        let pair = PairResult {
            first: "student_a".to_string(),
            second: "student_b".to_string(),
            result: ComparisonResult {
                score: 0.92,
                matches: vec![MatchedRegion {
                    first: LineRange { min_line: 1, max_line: 4 },
                    second: LineRange { min_line: 3, max_line: 7 },
                }],
            },
        };

        let json = serde_json::to_string(&pair).unwrap();
        let back: PairResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pair);
    }
}
