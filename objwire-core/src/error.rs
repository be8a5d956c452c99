/// Error taxonomy for mesh loading
use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or parsing an OBJ stream.
///
/// Line numbers are 1-based and refer to the physical line in the input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{}: {}", .path.display(), .source)]
    File {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },

    #[error("failed to read mesh: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed vertex line (expected `v x y z`)")]
    Vertex { line: usize },

    #[error("line {line}: malformed face line (expected `f i[/t][/n] ...`)")]
    Face { line: usize },

    #[error("line {line}: face index {index} out of range (mesh has {vertex_count} vertices)")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("line {line}: face needs at least 3 vertices, found {count}")]
    DegenerateFace { line: usize, count: usize },

    #[error("no vertices found in mesh")]
    NoVertices,
}

impl ParseError {
    /// Tag an error with the path of the file it came from.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ParseError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
