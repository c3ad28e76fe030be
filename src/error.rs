use thiserror::Error;

/// Errors returned by the correlation clustering routines in this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An edge connects a vertex to itself.
    #[error("self-loop edge on vertex {vertex}")]
    SelfLoop {
        /// Offending vertex (debug rendering).
        vertex: String,
    },

    /// The same unordered pair was given both a positive and a negative sign.
    #[error("edge {edge} is marked both positive and negative")]
    ConflictingSign {
        /// Offending pair (debug rendering).
        edge: String,
    },

    /// An edge references a vertex that is not in the vertex list.
    #[error("edge references unknown vertex {vertex}")]
    UnknownVertex {
        /// Offending vertex (debug rendering).
        vertex: String,
    },

    /// The vertex list contains the same identifier twice.
    #[error("duplicate vertex {vertex}")]
    DuplicateVertex {
        /// Offending vertex (debug rendering).
        vertex: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A partition does not assign a cluster to some vertex of the graph.
    #[error("partition has no cluster for vertex {vertex}")]
    MissingAssignment {
        /// Unassigned vertex (debug rendering).
        vertex: String,
    },

    /// An LP solution has no value for a variable of the formulation.
    #[error("LP solution has no value for variable {variable}")]
    MissingVariable {
        /// Variable name.
        variable: String,
    },

    /// An LP solution value lies outside `[0, 1]` (or is NaN).
    #[error("value {value} for LP variable {variable} is outside [0, 1]")]
    OutOfBounds {
        /// Variable name.
        variable: String,
        /// Offending value.
        value: f64,
    },
}

impl Error {
    /// True for errors caused by malformed construction input or parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::SelfLoop { .. }
                | Error::ConflictingSign { .. }
                | Error::UnknownVertex { .. }
                | Error::DuplicateVertex { .. }
                | Error::InvalidParameter { .. }
        )
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
