use super::defect::{DefectKind, Finding};
use crate::geom::{AdjacencyGraph, BBox, MeshSnapshot};

/// Reports every boundary edge (one incident face) and every non-manifold
/// junction (three or more incident faces) as a hole. Both kinds land in the
/// same category; the defect kind keeps them apart.
#[must_use]
pub fn detect_holes(mesh: &MeshSnapshot, adjacency: &AdjacencyGraph) -> Vec<Finding> {
    adjacency
        .edges()
        .filter_map(|(edge, faces)| {
            let kind = match faces.len() {
                1 => DefectKind::BoundaryEdge,
                n if n > 2 => DefectKind::NonManifoldEdge { valence: n },
                _ => return None,
            };
            let region = BBox::from_point(mesh.position(edge.a)).expand_point(mesh.position(edge.b));
            Some(Finding::edge(edge, kind, region, faces))
        })
        .collect()
}
