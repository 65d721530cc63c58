use thiserror::Error;

/// Failures when building core types from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("row {row} has width {width}, expected {expected}")]
    RowWidth {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("{count} rows given, board holds at most {max}")]
    TooManyRows { count: usize, max: usize },
}
