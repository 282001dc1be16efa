use astra_similarity::Language;
use clap::ValueEnum;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum LanguageFlag {
    Rust,
    Python,
    Javascript,
    Typescript,
}

impl LanguageFlag {
    pub(crate) const fn as_domain(self) -> Language {
        match self {
            LanguageFlag::Rust => Language::Rust,
            LanguageFlag::Python => Language::Python,
            LanguageFlag::Javascript => Language::JavaScript,
            LanguageFlag::Typescript => Language::TypeScript,
        }
    }
}
