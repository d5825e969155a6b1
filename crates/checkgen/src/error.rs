use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckGenError>;

/// Errors that can occur while generating check lines
#[derive(Debug, Error)]
pub enum CheckGenError {
    #[error("Generated {generated} check segment(s) but the source has {source_count} segment(s)")]
    SegmentMismatch {
        generated: usize,
        source_count: usize,
    },
    #[error("Unbalanced block close at line {line_number}: `{line}`")]
    ScopeUnderflow { line_number: usize, line: String },
    #[error("Expected an SSA identifier after '%' at line {line_number}: `{line}`")]
    UnmatchedIdentifier { line_number: usize, line: String },
    #[error("Invalid source delimiter regex: {0}")]
    InvalidDelimiter(#[from] regex::Error),
}
