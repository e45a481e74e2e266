//! Fatal errors raised while reading sources or preparing output.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocgenError {
    #[error("cannot read {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {} at line {line}, column {column}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("cannot load Go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("unknown format: {0}. Use json or markdown")]
    UnsupportedOutputFormat(String),

    #[error("cannot serialize JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, DocgenError>;
