use crate::analysis::{
    AnalysisConfig, Category, DefectKind, GeometryRef, Severity, analyze_mesh,
};
use crate::geom::MeshSnapshot;
use crate::samples;

#[test]
fn equilateral_mesh_scores_full() {
    let report = analyze_mesh(&samples::tetrahedron(), &AnalysisConfig::default()).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.score(), 100);
    assert!(report.headline().starts_with("Immaculate topology"));
}

#[test]
fn repeated_vertex_yields_exactly_one_sliver() {
    let report = analyze_mesh(&samples::degenerate_face(), &AnalysisConfig::default())
        .expect("degenerate faces never abort analysis");

    assert_eq!(report.registry.len(), 1);
    let defect = report.registry.get(0).unwrap();
    assert_eq!(defect.category, Category::Sliver);
    assert_eq!(defect.kind, DefectKind::DegenerateFace);
    assert_eq!(defect.primary, GeometryRef::Face { index: 4 });
    assert_eq!(report.score(), 95);
    assert_eq!(report.stats.degenerate_face_count, 1);
}

#[test]
fn lone_degenerate_face_does_not_panic() {
    let mesh = MeshSnapshot::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![vec![0, 1, 1, 2]],
    );
    let report = analyze_mesh(&mesh, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.registry.len(), 1);
    assert_eq!(report.registry.count_category(Category::Sliver), 1);
}

#[test]
fn strip_reports_each_category_in_rank_order() {
    let report = analyze_mesh(&samples::sliver_strip(40.0), &AnalysisConfig::default()).unwrap();

    // 4 + 5 loop edges, one shared: 7 open edges.
    assert_eq!(report.registry.count_category(Category::Hole), 7);
    assert_eq!(report.registry.count_category(Category::NGon), 1);
    assert_eq!(report.registry.count_category(Category::Sliver), 1);

    let categories: Vec<Category> = report.registry.iter().map(|d| d.category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);

    let sliver = report.registry.defects().last().unwrap();
    assert!(matches!(sliver.kind, DefectKind::Elongated { ratio } if ratio > 10.0));
    assert_eq!(sliver.severity, Severity::Warning);
    assert_eq!(sliver.primary, GeometryRef::Face { index: 0 });
}

#[test]
fn ratio_threshold_is_configurable() {
    let config = AnalysisConfig::new().sliver_ratio(1000.0);
    let report = analyze_mesh(&samples::sliver_strip(40.0), &config).unwrap();
    assert_eq!(report.registry.count_category(Category::Sliver), 0);
}
