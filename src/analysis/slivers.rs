use super::config::AnalysisConfig;
use super::defect::{DefectKind, Finding};
use crate::geom::AdjacencyGraph;

/// Flags degenerate faces, zero/near-zero area triangles and quads, and
/// triangles and quads whose shape ratio exceeds `config.sliver_ratio`.
///
/// Area checks win over the ratio check, so a face that is both tiny and thin
/// is reported once, as an error. Zero-area faces never reach the ratio.
#[must_use]
pub fn detect_slivers(adjacency: &AdjacencyGraph, config: &AnalysisConfig) -> Vec<Finding> {
    let median = adjacency.median_area();
    let min_area = median.map(|m| m * config.sliver_area_fraction);

    let mut findings = Vec::new();
    for (index, face) in adjacency.face_geometry().iter().enumerate() {
        if face.degenerate {
            findings.push(Finding::face(index, DefectKind::DegenerateFace, face.bounds));
            continue;
        }
        if face.loop_len > 4 {
            continue;
        }

        let tiny_against = match (min_area, median) {
            (Some(limit), Some(median)) if face.area < limit => Some(median),
            _ => None,
        };

        let kind = if !(face.area > 0.0) || !face.area.is_finite() {
            Some(DefectKind::ZeroArea)
        } else if let Some(median) = tiny_against {
            Some(DefectKind::NearZeroArea {
                area: face.area,
                median,
            })
        } else {
            face.shape_ratio
                .filter(|&ratio| ratio > config.sliver_ratio)
                .map(|ratio| DefectKind::Elongated { ratio })
        };

        if let Some(kind) = kind {
            findings.push(Finding::face(index, kind, face.bounds));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;
    use crate::geom::MeshSnapshot;

    fn detect(mesh: &MeshSnapshot) -> Vec<Finding> {
        detect_slivers(&AdjacencyGraph::build(mesh), &AnalysisConfig::default())
    }

    #[test]
    fn equilateral_faces_are_clean() {
        assert!(detect(&crate::samples::tetrahedron()).is_empty());
    }

    #[test]
    fn repeated_vertex_reports_one_degenerate_face() {
        let mesh = MeshSnapshot::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![vec![0, 1, 1, 2]],
        );
        let findings = detect(&mesh);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, DefectKind::DegenerateFace);
        assert_eq!(findings[0].kind.severity(), Severity::Error);
    }

    #[test]
    fn collinear_triangle_is_zero_area_error() {
        let mesh = MeshSnapshot::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [2.0, 0.0, 0.0],
            ],
            vec![vec![0, 1, 2], vec![0, 1, 3]],
        );
        let findings = detect(&mesh);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, DefectKind::ZeroArea);
        assert_eq!(findings[0].faces, vec![1]);
    }

    #[test]
    fn thin_triangle_is_warning_tiny_triangle_is_error() {
        let mesh = MeshSnapshot::new(
            vec![
                // regular-sized reference triangles
                [0.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [5.0, 8.0, 0.0],
                [20.0, 0.0, 0.0],
                [30.0, 0.0, 0.0],
                [25.0, 8.0, 0.0],
                // long and thin: area 20, well above 1% of the median
                [40.0, 0.0, 0.0],
                [80.0, 0.0, 0.0],
                [60.0, 1.0, 0.0],
                // tiny but well shaped
                [100.0, 0.0, 0.0],
                [100.1, 0.0, 0.0],
                [100.05, 0.08, 0.0],
            ],
            vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9, 10, 11]],
        );
        let findings = detect(&mesh);

        assert_eq!(findings.len(), 2);
        assert!(matches!(findings[0].kind, DefectKind::Elongated { ratio } if ratio > 10.0));
        assert_eq!(findings[0].faces, vec![2]);
        assert!(matches!(findings[1].kind, DefectKind::NearZeroArea { .. }));
        assert_eq!(findings[1].faces, vec![3]);
    }

    #[test]
    fn tiny_and_thin_triangle_is_reported_once_as_error() {
        let mesh = MeshSnapshot::new(
            vec![
                [0.0, 0.0, 0.0],
                [10.0, 0.0, 0.0],
                [5.0, 8.0, 0.0],
                [20.0, 0.0, 0.0],
                [30.0, 0.0, 0.0],
                [25.0, 8.0, 0.0],
                // area 0.005 against a median of 40, shape ratio near 58
                [100.0, 0.0, 0.0],
                [101.0, 0.0, 0.0],
                [100.5, 0.01, 0.0],
            ],
            vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]],
        );
        let adjacency = AdjacencyGraph::build(&mesh);
        let ratio = adjacency.face(2).unwrap().shape_ratio.unwrap();
        assert!(ratio > AnalysisConfig::default().sliver_ratio);

        let findings = detect(&mesh);
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0].kind, DefectKind::NearZeroArea { .. }));
        assert_eq!(findings[0].kind.severity(), Severity::Error);
        assert_eq!(findings[0].faces, vec![2]);
    }

    #[test]
    fn long_quad_is_sliver_but_ngon_is_not_checked() {
        let mesh = crate::samples::sliver_strip(40.0);
        let findings = detect(&mesh);
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0].kind, DefectKind::Elongated { .. }));
    }
}
