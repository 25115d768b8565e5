//! Mesh defect analysis: detectors, registry and health score.
//!
//! One run of [`analyze_mesh_with_context`] goes
//! snapshot → validation → adjacency → {n-gon, hole, sliver} passes →
//! registry, and the report derives the score and statistics from that.
//!
//! ```no_run
//! use topo_doctor::analysis::{AnalysisConfig, analyze_mesh};
//! use topo_doctor::samples;
//!
//! let report = analyze_mesh(&samples::open_box(3), &AnalysisConfig::default()).unwrap();
//! for entry in report.registry.listing() {
//!     println!("[{:?}] {}", entry.severity, entry.description);
//! }
//! println!("health {}/100", report.score());
//! ```

mod config;
mod defect;
mod error;
mod holes;
mod ngon;
mod registry;
mod score;
mod slivers;
mod stats;

pub use config::{
    AnalysisConfig, DEFAULT_DENSITY_PENALTY, DEFAULT_DENSITY_THRESHOLD, DEFAULT_ERROR_PENALTY,
    DEFAULT_MAX_FACE_COUNT, DEFAULT_NGON_MIN_LOOP_LEN, DEFAULT_POLE_VALENCE,
    DEFAULT_SLIVER_AREA_FRACTION, DEFAULT_SLIVER_RATIO, DEFAULT_WARNING_PENALTY,
};
pub use defect::{Category, Defect, DefectId, DefectKind, Finding, GeometryRef, Severity};
pub use error::AnalysisError;
pub use holes::detect_holes;
pub use ngon::detect_ngons;
pub use registry::{DefectRegistry, ListingEntry};
pub use score::{HealthBand, score};
pub use slivers::detect_slivers;
pub use stats::TopologyStats;

use crate::geom::{
    AdjacencyGraph, AnalysisMetrics, AnalysisTimingReport, MeshSnapshot, TimingBucket,
};

/// State carried between runs: the id generation counter and timings.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    generation: u32,
    pub metrics: AnalysisMetrics,
}

impl AnalysisContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation stamped on the most recent successful run.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub registry: DefectRegistry,
    pub stats: TopologyStats,
    pub config: AnalysisConfig,
    pub timing: Option<AnalysisTimingReport>,
}

impl AnalysisReport {
    /// Health score, recomputed from the registry and face count.
    #[must_use]
    pub fn score(&self) -> u8 {
        score(&self.registry, self.stats.face_count, &self.config)
    }

    #[must_use]
    pub fn band(&self) -> HealthBand {
        HealthBand::from_score(self.score())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.registry.is_empty()
    }

    /// One-line verdict for the panel header.
    #[must_use]
    pub fn headline(&self) -> String {
        if self.is_clean() {
            return "Immaculate topology: no issues found".to_string();
        }
        format!(
            "{} issues ({} holes, {} n-gons, {} slivers)",
            self.registry.len(),
            self.registry.count_category(Category::Hole),
            self.registry.count_category(Category::NGon),
            self.registry.count_category(Category::Sliver),
        )
    }
}

/// Analyzes `mesh` with a throwaway context (generation 1).
pub fn analyze_mesh(
    mesh: &MeshSnapshot,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let mut ctx = AnalysisContext::new();
    analyze_mesh_with_context(mesh, config, &mut ctx)
}

/// Runs the full detection pipeline.
///
/// Size and validity are checked before any detector runs; on error nothing
/// is produced and `ctx.generation()` is unchanged.
pub fn analyze_mesh_with_context(
    mesh: &MeshSnapshot,
    config: &AnalysisConfig,
    ctx: &mut AnalysisContext,
) -> Result<AnalysisReport, AnalysisError> {
    let face_count = mesh.face_count();
    if face_count > config.max_face_count {
        return Err(AnalysisError::MeshTooLarge {
            face_count,
            limit: config.max_face_count,
        });
    }

    ctx.metrics.begin();
    ctx.metrics.time(TimingBucket::Validation, || mesh.validate())?;

    let adjacency = ctx
        .metrics
        .time(TimingBucket::Adjacency, || AdjacencyGraph::build(mesh));

    let mut findings = ctx
        .metrics
        .time(TimingBucket::NGon, || detect_ngons(&adjacency, config));
    findings.extend(
        ctx.metrics
            .time(TimingBucket::Holes, || detect_holes(mesh, &adjacency)),
    );
    findings.extend(
        ctx.metrics
            .time(TimingBucket::Slivers, || detect_slivers(&adjacency, config)),
    );

    let generation = ctx.next_generation();
    let registry = ctx.metrics.time(TimingBucket::Registry, || {
        DefectRegistry::build(findings, generation)
    });
    let stats = ctx.metrics.time(TimingBucket::Scoring, || {
        TopologyStats::collect(mesh, &adjacency, config.pole_valence)
    });

    let report = AnalysisReport {
        registry,
        stats,
        config: *config,
        timing: ctx.metrics.end(),
    };

    log::debug!(
        "analysis #{generation}: {} -> {}",
        report.stats.summary(),
        report.headline()
    );
    log::info!("mesh health {}/100 ({:?})", report.score(), report.band());

    Ok(report)
}

#[cfg(test)]
mod tests;
