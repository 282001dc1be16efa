use crate::error::{Result, SimilarityError};
use std::path::Path;

/// Supported submission language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Unknown => "unknown",
        }
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::Rust => Ok(tree_sitter_rust::LANGUAGE.into()),
            Language::Python => Ok(tree_sitter_python::LANGUAGE.into()),
            Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => {
                Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            }
            Language::Unknown => Err(SimilarityError::unsupported_language(self.as_str())),
        }
    }

    /// Node kinds that carry no structural signal for comparison: the
    /// file-level wrapper node every tree starts with, and comments.
    /// Anonymous tokens (punctuation, keywords) are excluded separately
    /// by walking named nodes only.
    pub fn inert_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["source_file", "line_comment", "block_comment"],
            Language::Python => &["module", "comment"],
            Language::JavaScript | Language::TypeScript => &["program", "comment"],
            Language::Unknown => &[],
        }
    }

    /// Check whether a node kind is structurally inert
    pub fn is_inert(self, kind: &str) -> bool {
        self.inert_kinds().contains(&kind)
    }
}
