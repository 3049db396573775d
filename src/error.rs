use thiserror::Error;

// ---------------------------------------------------------------------------
// FrameError – everything the data layer can report
// ---------------------------------------------------------------------------

/// Errors surfaced by loading and querying a [`crate::Frame`].
///
/// The library never recovers, retries, logs, or prints; every failure is
/// reported to the caller through this type.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The input file could not be opened or read.
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input: empty file, ragged rows, duplicate header names.
    #[error("malformed input: {0}")]
    Format(String),

    /// A column name that is not part of the frame.
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    /// A row label that is not part of the row index.
    #[error("unknown row label: {0}")]
    UnknownLabel(i64),

    /// Positional row access outside `[-N, N)`.
    #[error("row position {position} out of range for {rows} rows")]
    OutOfRange { position: i64, rows: usize },

    /// A mask whose length does not match the frame's row count.
    #[error("mask has {mask_len} entries but frame has {rows} rows")]
    ShapeMismatch { mask_len: usize, rows: usize },

    /// An operation applied to a column of an incompatible type.
    #[error("{op} is not defined for a {dtype} column")]
    TypeMismatch {
        op: &'static str,
        dtype: crate::value::DType,
    },
}

pub type Result<T> = std::result::Result<T, FrameError>;
