use crate::error::{Result, SimilarityError};
use crate::language::Language;
use crate::types::{FlatSequence, SyntaxNode};
use tree_sitter::{Node, Parser};

/// Flattens one submission's syntax tree into an ordered node sequence
///
/// The traversal is depth-first pre-order in source order, so adjacency in
/// the output approximates code locality. Only named nodes are visited
/// (anonymous punctuation and keyword tokens carry no structural signal),
/// and the per-language inert set — the file wrapper node and comments — is
/// dropped on top of that.
pub struct Flattener {
    parser: Parser,
    language: Language,
}

impl Flattener {
    /// Create a new flattener for a language
    pub fn new(language: Language) -> Result<Self> {
        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| SimilarityError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, language })
    }

    /// Language this flattener parses
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Parse source text and flatten it into a node sequence
    ///
    /// Infallible by contract: a submission that does not parse yields an
    /// empty sequence instead of an error, so one broken file cannot abort
    /// a batch. Downstream scoring degrades it to 0.0 against anything
    /// non-empty.
    pub fn flatten(&mut self, source: &str) -> FlatSequence {
        let Some(tree) = self.parser.parse(source, None) else {
            log::warn!("parser produced no tree, treating submission as empty");
            return Vec::new();
        };

        let root = tree.root_node();
        if root.has_error() {
            log::warn!("submission has syntax errors, treating as empty");
            return Vec::new();
        }

        let mut nodes = Vec::new();
        self.visit(root, &mut nodes);
        nodes
    }

    fn visit(&self, node: Node, out: &mut Vec<SyntaxNode>) {
        if !self.language.is_inert(node.kind()) {
            out.push(SyntaxNode::new(
                node.kind(),
                Some(node.start_position().row + 1),
            ));
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child, out);
        }
    }
}
