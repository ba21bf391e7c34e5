//! Predictor and training errors.

/// Specific model error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelErrorKind {
    /// Artifact file could not be read
    #[display("Failed to read model artifact {}: {}", path, reason)]
    ArtifactRead {
        /// Artifact path
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// Artifact file could not be written
    #[display("Failed to write model artifact {}: {}", path, reason)]
    ArtifactWrite {
        /// Artifact path
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// Artifact contents are inconsistent (e.g. coefficient count mismatch)
    #[display("Invalid model artifact: {}", _0)]
    InvalidArtifact(String),

    /// Training data could not be loaded
    #[display("Failed to load training data: {}", _0)]
    TrainingData(String),

    /// Least-squares system has no unique solution
    #[display("Singular design matrix: {}", _0)]
    SingularMatrix(String),
}

/// Model error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at {}:{}", kind, file, line)]
pub struct ModelError {
    /// The specific error kind
    pub kind: ModelErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new model error.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ModelErrorKind {
        &self.kind
    }
}
