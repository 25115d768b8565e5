use crate::geom::MalformedMesh;

/// Failures of an `analyze` command.
///
/// None of these touch the previously built registry or navigator; the host
/// re-triggers `analyze` once the cause is fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("no mesh available for analysis: {0}")]
    MeshUnavailable(String),
    #[error("malformed mesh: {0}")]
    MalformedMesh(#[from] MalformedMesh),
    #[error("mesh has {face_count} faces, above the supported limit of {limit}")]
    MeshTooLarge { face_count: usize, limit: usize },
    #[error("an analysis is already running")]
    Busy,
}

impl AnalysisError {
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::MeshUnavailable(reason.into())
    }
}
