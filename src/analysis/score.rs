use serde::Serialize;

use super::config::AnalysisConfig;
use super::defect::Severity;
use super::registry::DefectRegistry;

const MAX_SCORE: i64 = 100;

/// Health score in `0..=100`.
///
/// Starts at 100, subtracts `error_penalty`/`warning_penalty` per defect, and a
/// flat `density_penalty` once when defects per face exceed
/// `density_threshold`. Pure in its inputs, so recomputation is idempotent.
#[must_use]
pub fn score(registry: &DefectRegistry, total_face_count: usize, config: &AnalysisConfig) -> u8 {
    let per_defect: i64 = registry
        .iter()
        .map(|defect| match defect.severity {
            Severity::Error => i64::from(config.error_penalty),
            Severity::Warning => i64::from(config.warning_penalty),
        })
        .sum();

    let density = if total_face_count > 0 {
        registry.len() as f64 / total_face_count as f64
    } else {
        0.0
    };
    let density_penalty = if density > config.density_threshold {
        i64::from(config.density_penalty)
    } else {
        0
    };

    let value = (MAX_SCORE - per_defect - density_penalty).clamp(0, MAX_SCORE);
    u8::try_from(value).unwrap_or(0)
}

/// Coarse reading of the score, as shown next to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthBand {
    /// 90 and above.
    Healthy,
    /// 50 to 89.
    Fair,
    /// Below 50.
    Poor,
}

impl HealthBand {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 90 {
            Self::Healthy
        } else if score >= 50 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DefectKind, Finding};
    use crate::geom::{BBox, EdgeKey, Point3};

    fn region() -> BBox {
        BBox::from_point(Point3::ORIGIN)
    }

    fn ngons(count: usize) -> Vec<Finding> {
        (0..count)
            .map(|i| Finding::face(i, DefectKind::NGon { sides: 5 }, region()))
            .collect()
    }

    #[test]
    fn empty_registry_scores_full() {
        let registry = DefectRegistry::default();
        assert_eq!(score(&registry, 10, &AnalysisConfig::default()), 100);
        assert_eq!(HealthBand::from_score(100), HealthBand::Healthy);
    }

    #[test]
    fn sixty_ngons_in_hundred_faces_scores_twenty() {
        let registry = DefectRegistry::build(ngons(60), 0);
        assert_eq!(score(&registry, 100, &AnalysisConfig::default()), 20);
    }

    #[test]
    fn density_penalty_needs_strictly_more_than_half() {
        let registry = DefectRegistry::build(ngons(50), 0);
        assert_eq!(score(&registry, 100, &AnalysisConfig::default()), 50);
    }

    #[test]
    fn errors_cost_five_and_score_clamps_at_zero() {
        let edges: Vec<Finding> = (0..3)
            .map(|i| Finding::edge(EdgeKey::new(i, i + 1), DefectKind::BoundaryEdge, region(), &[0]))
            .collect();
        let registry = DefectRegistry::build(edges, 0);
        assert_eq!(score(&registry, 100, &AnalysisConfig::default()), 85);

        let many: Vec<Finding> = (0..40)
            .map(|i| Finding::face(i, DefectKind::ZeroArea, region()))
            .collect();
        let registry = DefectRegistry::build(many, 0);
        assert_eq!(score(&registry, 40, &AnalysisConfig::default()), 0);
    }

    #[test]
    fn score_is_idempotent() {
        let registry = DefectRegistry::build(ngons(7), 0);
        let config = AnalysisConfig::default();
        assert_eq!(score(&registry, 30, &config), score(&registry, 30, &config));
    }

    #[test]
    fn health_bands() {
        assert_eq!(HealthBand::from_score(90), HealthBand::Healthy);
        assert_eq!(HealthBand::from_score(89), HealthBand::Fair);
        assert_eq!(HealthBand::from_score(50), HealthBand::Fair);
        assert_eq!(HealthBand::from_score(49), HealthBand::Poor);
    }
}
