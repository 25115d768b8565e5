use serde::{Deserialize, Serialize};

pub const DEFAULT_SLIVER_RATIO: f64 = 10.0;
pub const DEFAULT_SLIVER_AREA_FRACTION: f64 = 0.01;
pub const DEFAULT_NGON_MIN_LOOP_LEN: usize = 5;
pub const DEFAULT_ERROR_PENALTY: u32 = 5;
pub const DEFAULT_WARNING_PENALTY: u32 = 1;
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.5;
pub const DEFAULT_DENSITY_PENALTY: u32 = 20;
pub const DEFAULT_MAX_FACE_COUNT: usize = 500_000;
pub const DEFAULT_POLE_VALENCE: u32 = 5;

/// Thresholds and penalties for one analysis session.
///
/// Fixed once a session is constructed. Hosts may load it from JSON/JS at
/// startup; missing fields fall back to the defaults above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Shape ratio above which a triangle/quad is a sliver (1.0 = equilateral).
    pub sliver_ratio: f64,
    /// Faces below `sliver_area_fraction * median_area` are near-zero slivers.
    pub sliver_area_fraction: f64,
    /// Smallest loop length reported as an n-gon.
    pub ngon_min_loop_len: usize,
    /// Score points lost per error defect.
    pub error_penalty: u32,
    /// Score points lost per warning defect.
    pub warning_penalty: u32,
    /// Defects-per-face ratio above which the density penalty applies.
    pub density_threshold: f64,
    /// Flat penalty for pervasively broken meshes.
    pub density_penalty: u32,
    /// Meshes with more faces are rejected before any detection work.
    pub max_face_count: usize,
    /// Vertices with more incident edges than this count as poles.
    pub pole_valence: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sliver_ratio: DEFAULT_SLIVER_RATIO,
            sliver_area_fraction: DEFAULT_SLIVER_AREA_FRACTION,
            ngon_min_loop_len: DEFAULT_NGON_MIN_LOOP_LEN,
            error_penalty: DEFAULT_ERROR_PENALTY,
            warning_penalty: DEFAULT_WARNING_PENALTY,
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            density_penalty: DEFAULT_DENSITY_PENALTY,
            max_face_count: DEFAULT_MAX_FACE_COUNT,
            pole_valence: DEFAULT_POLE_VALENCE,
        }
    }

    #[must_use]
    pub const fn sliver_ratio(mut self, ratio: f64) -> Self {
        self.sliver_ratio = ratio;
        self
    }

    #[must_use]
    pub const fn sliver_area_fraction(mut self, fraction: f64) -> Self {
        self.sliver_area_fraction = fraction;
        self
    }

    #[must_use]
    pub const fn ngon_min_loop_len(mut self, len: usize) -> Self {
        self.ngon_min_loop_len = len;
        self
    }

    #[must_use]
    pub const fn penalties(mut self, error: u32, warning: u32) -> Self {
        self.error_penalty = error;
        self.warning_penalty = warning;
        self
    }

    #[must_use]
    pub const fn density_penalty(mut self, threshold: f64, penalty: u32) -> Self {
        self.density_threshold = threshold;
        self.density_penalty = penalty;
        self
    }

    #[must_use]
    pub const fn max_face_count(mut self, limit: usize) -> Self {
        self.max_face_count = limit;
        self
    }

    #[must_use]
    pub const fn pole_valence(mut self, valence: u32) -> Self {
        self.pole_valence = valence;
        self
    }
}
