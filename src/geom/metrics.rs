//! Opt-in timing hooks for the analysis passes.
//!
//! Timing is only collected when the `analysis_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable on
//! `wasm32-unknown-unknown`). Otherwise every call is a pass-through and
//! [`AnalysisMetrics::end`] returns `None`.
//!
//! ```ignore
//! let mut metrics = AnalysisMetrics::default();
//! metrics.begin();
//! let adjacency = metrics.time(TimingBucket::Adjacency, || AdjacencyGraph::build(&mesh));
//! if let Some(report) = metrics.end() {
//!     log::debug!("adjacency took {} ns", report.adjacency_ns);
//! }
//! ```

/// One bucket per analysis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Snapshot validation (index ranges, finite positions).
    Validation,
    /// Edge/face adjacency and per-face geometry.
    Adjacency,
    /// N-gon pass.
    NGon,
    /// Boundary / non-manifold edge pass.
    Holes,
    /// Sliver and degenerate face pass.
    Slivers,
    /// Registry sort, dedup and id assignment.
    Registry,
    /// Health score and statistics.
    Scoring,
}

/// Cumulative nanoseconds per stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnalysisTimingReport {
    pub validation_ns: u64,
    pub adjacency_ns: u64,
    pub ngon_ns: u64,
    pub holes_ns: u64,
    pub slivers_ns: u64,
    pub registry_ns: u64,
    pub scoring_ns: u64,
}

impl AnalysisTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.validation_ns
            .saturating_add(self.adjacency_ns)
            .saturating_add(self.ngon_ns)
            .saturating_add(self.holes_ns)
            .saturating_add(self.slivers_ns)
            .saturating_add(self.registry_ns)
            .saturating_add(self.scoring_ns)
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    #[cfg_attr(
        not(all(feature = "analysis_metrics", not(target_arch = "wasm32"))),
        allow(dead_code)
    )]
    fn bucket_mut(&mut self, bucket: TimingBucket) -> &mut u64 {
        match bucket {
            TimingBucket::Validation => &mut self.validation_ns,
            TimingBucket::Adjacency => &mut self.adjacency_ns,
            TimingBucket::NGon => &mut self.ngon_ns,
            TimingBucket::Holes => &mut self.holes_ns,
            TimingBucket::Slivers => &mut self.slivers_ns,
            TimingBucket::Registry => &mut self.registry_ns,
            TimingBucket::Scoring => &mut self.scoring_ns,
        }
    }
}

/// Accumulator for stage timings within one analysis run.
#[derive(Debug, Default)]
pub struct AnalysisMetrics {
    #[cfg(all(feature = "analysis_metrics", not(target_arch = "wasm32")))]
    report: AnalysisTimingReport,
}

impl AnalysisMetrics {
    /// Resets all counters.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "analysis_metrics", not(target_arch = "wasm32")))]
        {
            self.report = AnalysisTimingReport::default();
        }
    }

    /// The accumulated report, or `None` when metrics are compiled out.
    #[must_use]
    pub fn end(&self) -> Option<AnalysisTimingReport> {
        #[cfg(all(feature = "analysis_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "analysis_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Runs `f`, adding its wall time to `bucket` when metrics are enabled.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "analysis_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            let slot = self.report.bucket_mut(bucket);
            *slot = slot.saturating_add(nanos);
            result
        }

        #[cfg(not(all(feature = "analysis_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let report = AnalysisTimingReport {
            adjacency_ns: 1000,
            slivers_ns: 2000,
            scoring_ns: 3000,
            ..Default::default()
        };
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = AnalysisMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::Holes, || 42);
        assert_eq!(result, 42);
        let _ = metrics.end();
    }

    #[test]
    fn test_bucket_slots_are_distinct() {
        let mut report = AnalysisTimingReport::default();
        for (n, bucket) in [
            TimingBucket::Validation,
            TimingBucket::Adjacency,
            TimingBucket::NGon,
            TimingBucket::Holes,
            TimingBucket::Slivers,
            TimingBucket::Registry,
            TimingBucket::Scoring,
        ]
        .into_iter()
        .enumerate()
        {
            *report.bucket_mut(bucket) += 1 << n;
        }
        assert_eq!(report.total_ns(), 127);
    }
}
