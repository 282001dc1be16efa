use astra_similarity::PairResult;
use std::fmt::Write;

/// Render the batch report, one line per compared pair
pub(crate) fn render(results: &[PairResult]) -> String {
    if results.is_empty() {
        return "Not enough submissions to compare.\n".to_string();
    }

    let mut out = String::new();
    for pair in results {
        let percent = pair.result.score * 100.0;
        let blocks = pair.result.matches.len();
        let _ = writeln!(
            out,
            "Similarity between {} and {}: {percent:.1}% ({blocks} identical AST blocks)",
            pair.first, pair.second,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_similarity::{ComparisonResult, LineRange, MatchedRegion};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_report_lines() {
        let results = vec![PairResult {
            first: "student_a".to_string(),
            second: "student_b".to_string(),
            result: ComparisonResult {
                score: 0.875,
                matches: vec![MatchedRegion {
                    first: LineRange { min_line: 1, max_line: 6 },
                    second: LineRange { min_line: 1, max_line: 8 },
                }],
            },
        }];

        assert_eq!(
            render(&results),
            "Similarity between student_a and student_b: 87.5% (1 identical AST blocks)\n"
        );
    }

    #[test]
    fn test_render_empty_batch() {
        assert_eq!(render(&[]), "Not enough submissions to compare.\n");
    }
}
