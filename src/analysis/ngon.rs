use super::config::AnalysisConfig;
use super::defect::{DefectKind, Finding};
use crate::geom::AdjacencyGraph;

/// Flags every non-degenerate face whose loop is at least
/// `config.ngon_min_loop_len` long. Triangles and quads never qualify.
#[must_use]
pub fn detect_ngons(adjacency: &AdjacencyGraph, config: &AnalysisConfig) -> Vec<Finding> {
    let min_len = config.ngon_min_loop_len.max(5);

    adjacency
        .face_geometry()
        .iter()
        .enumerate()
        .filter(|(_, face)| !face.degenerate && face.loop_len >= min_len)
        .map(|(index, face)| {
            Finding::face(
                index,
                DefectKind::NGon {
                    sides: face.loop_len,
                },
                face.bounds,
            )
        })
        .collect()
}
