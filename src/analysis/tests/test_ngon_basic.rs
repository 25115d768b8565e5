use crate::analysis::{AnalysisConfig, Category, DefectKind, HealthBand, Severity, analyze_mesh};
use crate::samples;

#[test]
fn prism_caps_are_ngons() {
    let report = analyze_mesh(&samples::prism(8), &AnalysisConfig::default()).unwrap();

    assert_eq!(report.registry.len(), 2);
    for defect in report.registry.iter() {
        assert_eq!(defect.kind, DefectKind::NGon { sides: 8 });
        assert_eq!(defect.severity, Severity::Warning);
    }
    assert_eq!(report.score(), 98);
    assert_eq!(report.band(), HealthBand::Healthy);
}

#[test]
fn minimum_loop_length_is_configurable() {
    let config = AnalysisConfig::new().ngon_min_loop_len(9);
    let report = analyze_mesh(&samples::prism(8), &config).unwrap();
    assert!(report.is_clean());

    let report = analyze_mesh(&samples::prism(9), &config).unwrap();
    assert_eq!(report.registry.count_category(Category::NGon), 2);
}

#[test]
fn dense_ngons_trigger_density_penalty() {
    let report = analyze_mesh(&samples::ngon_torus(10, 10, 6), &AnalysisConfig::default())
        .expect("torus analyzes");

    assert_eq!(report.stats.face_count, 100);
    assert_eq!(report.registry.count_category(Category::NGon), 60);
    assert_eq!(report.registry.count_category(Category::Hole), 0);
    assert_eq!(report.registry.count_category(Category::Sliver), 0);
    // 100 - 60 warnings - 20 density penalty
    assert_eq!(report.score(), 20);
    assert_eq!(report.band(), HealthBand::Poor);
}

#[test]
fn plain_torus_is_clean() {
    let report = analyze_mesh(&samples::torus(12, 8), &AnalysisConfig::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.score(), 100);
    assert_eq!(report.stats.shell_count, 1);
}
