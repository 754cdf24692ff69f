use std::fmt;
use std::path::{Path, PathBuf};

use yaml_rust2::scanner::ScanError;

/// The YAML tokenizer rejected the file, so no rule could run on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub filename: PathBuf,
    pub message: String,
    /// 1-indexed.
    pub line: usize,
    /// 1-indexed.
    pub column: usize,
}

impl ParseError {
    pub fn with_filename(self, filename: &Path) -> Self {
        Self { filename: filename.to_path_buf(), ..self }
    }
}

impl From<ScanError> for ParseError {
    fn from(value: ScanError) -> Self {
        let marker = value.marker();
        Self {
            filename: PathBuf::new(),
            message: value.info().to_string(),
            line: marker.line(),
            column: marker.col() + 1,
        }
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to parse {} at line {} column {}: {}",
            self.filename.display(),
            self.line,
            self.column,
            self.message
        )
    }
}
