//! Error types for input/output parsing and the mining CLI boundary.

use thiserror::Error;

/// Errors produced while parsing an input or output graph-database file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// An unrecognised line prefix.
    #[error("line {line}: invalid token '{token}', expected t, v, e, or x")]
    UnknownLineType {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A recognised line with missing or unparseable fields.
    #[error("line {line}: expected \"{expected}\"")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Human-readable description of the expected form.
        expected: String,
    },

    /// An `e` line referenced a vertex id that has not been declared yet.
    #[error("line {line}: edge endpoint {vertex_id} out of range (graph has {declared} vertices)")]
    EdgeEndpointOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The out-of-range endpoint.
        vertex_id: u32,
        /// Number of vertices declared in the current graph so far.
        declared: usize,
    },

    /// Vertex ids within a graph must appear in strictly increasing order from 0.
    #[error("line {line}: vertex id {got} out of sequence, expected {expected}")]
    VertexIdOutOfSequence {
        /// 1-based line number.
        line: usize,
        /// The id that was actually present.
        got: u32,
        /// The id the parser required next.
        expected: u32,
    },

    /// An `e`/`v`/`x` line appeared before any `t` line opened a graph.
    #[error("line {line}: {line_type} line outside of any graph (no preceding 't' line)")]
    NoCurrentGraph {
        /// 1-based line number.
        line: usize,
        /// The line type that was out of place.
        line_type: char,
    },

    /// Underlying I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced at the CLI boundary.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be parsed.
    #[error("failed to parse input file {path}: {source}")]
    Parse {
        /// Path to the offending file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },

    /// `min_freq` argument was not a positive integer.
    #[error("min_freq must be a positive integer, got {0}")]
    InvalidMinFreq(String),

    /// Failed to write the output file.
    #[error("failed to write output file {path}: {source}")]
    Write {
        /// Path to the offending file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
