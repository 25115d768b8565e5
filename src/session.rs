//! Long-lived analysis session: the host-facing command surface.
//!
//! A [`Session`] owns the last good [`AnalysisReport`] and the [`Navigator`]
//! over its registry. Host collaborators plug in through [`MeshProvider`] and
//! [`ViewportController`]; the session never mutates the mesh and never
//! touches camera state beyond calling `focus_on`.

use std::cell::{Cell, RefCell};

use crate::analysis::{
    AnalysisConfig, AnalysisContext, AnalysisError, AnalysisReport, DefectId, GeometryRef,
    ListingEntry, TopologyStats, analyze_mesh_with_context,
};
use crate::geom::{BBox, MeshSnapshot};
use crate::navigator::{FocusTarget, Navigator, NavigatorState};

/// Supplies a fresh snapshot of the mesh to analyze.
pub trait MeshProvider {
    fn snapshot(&self) -> Result<MeshSnapshot, AnalysisError>;
}

impl MeshProvider for MeshSnapshot {
    fn snapshot(&self) -> Result<MeshSnapshot, AnalysisError> {
        Ok(self.clone())
    }
}

/// Frames the host camera on a defect.
pub trait ViewportController {
    fn focus_on(&mut self, region: &BBox, primary: &GeometryRef);
}

/// Viewport that ignores focus requests (headless hosts, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoViewport;

impl ViewportController for NoViewport {
    fn focus_on(&mut self, _region: &BBox, _primary: &GeometryRef) {}
}

/// Clears the busy flag on every exit path of `analyze`.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Single-instance analysis session.
///
/// Methods take `&self` so that a provider calling back into the session
/// while an analysis runs gets [`AnalysisError::Busy`] instead of a borrow
/// panic. Failed commands leave the report and navigator at their last good
/// value.
#[derive(Debug)]
pub struct Session {
    config: AnalysisConfig,
    busy: Cell<bool>,
    context: RefCell<AnalysisContext>,
    report: RefCell<Option<AnalysisReport>>,
    navigator: RefCell<Navigator>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            busy: Cell::new(false),
            context: RefCell::new(AnalysisContext::new()),
            report: RefCell::new(None),
            navigator: RefCell::new(Navigator::new()),
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Takes a snapshot from `provider`, rebuilds the registry and resets the
    /// navigator to `Idle`. Returns the new score.
    pub fn analyze(&self, provider: &dyn MeshProvider) -> Result<u8, AnalysisError> {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            log::warn!("analyze rejected: an analysis is already running");
            return Err(AnalysisError::Busy);
        };

        let mesh = provider.snapshot().inspect_err(|err| {
            log::warn!("analyze aborted: {err}");
        })?;

        let report = {
            let mut context = self.context.borrow_mut();
            analyze_mesh_with_context(&mesh, &self.config, &mut context)
        }
        .inspect_err(|err| log::warn!("analyze aborted: {err}"))?;

        let score = report.score();
        *self.report.borrow_mut() = Some(report);
        self.navigator.borrow_mut().reset();
        Ok(score)
    }

    /// Focuses the defect with `id`. Stale or unknown ids are ignored.
    pub fn focus(
        &self,
        id: DefectId,
        viewport: &mut dyn ViewportController,
    ) -> Option<FocusTarget> {
        let target = {
            let report = self.report.borrow();
            self.navigator
                .borrow_mut()
                .focus(&report.as_ref()?.registry, id)?
        };
        // Borrows are released: the viewport may call back into the session.
        viewport.focus_on(&target.region, &target.primary);
        Some(target)
    }

    /// Advances to the next defect, wrapping at the end.
    pub fn cycle_next(&self, viewport: &mut dyn ViewportController) -> Option<FocusTarget> {
        let target = {
            let report = self.report.borrow();
            self.navigator
                .borrow_mut()
                .cycle_next(&report.as_ref()?.registry)?
        };
        viewport.focus_on(&target.region, &target.primary);
        Some(target)
    }

    /// Defect list of the last good analysis; empty before the first one.
    #[must_use]
    pub fn listing(&self) -> Vec<ListingEntry> {
        self.report
            .borrow()
            .as_ref()
            .map(|report| report.registry.listing())
            .unwrap_or_default()
    }

    /// Score of the last good analysis; `None` before the first one.
    #[must_use]
    pub fn score_value(&self) -> Option<u8> {
        self.report.borrow().as_ref().map(AnalysisReport::score)
    }

    #[must_use]
    pub fn stats(&self) -> Option<TopologyStats> {
        self.report.borrow().as_ref().map(|report| report.stats.clone())
    }

    #[must_use]
    pub fn navigator_state(&self) -> NavigatorState {
        self.navigator.borrow().state()
    }

    #[must_use]
    pub fn report(&self) -> Option<AnalysisReport> {
        self.report.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[derive(Default)]
    struct RecordingViewport {
        calls: Vec<GeometryRef>,
    }

    impl ViewportController for RecordingViewport {
        fn focus_on(&mut self, _region: &BBox, primary: &GeometryRef) {
            self.calls.push(*primary);
        }
    }

    struct Unavailable;

    impl MeshProvider for Unavailable {
        fn snapshot(&self) -> Result<MeshSnapshot, AnalysisError> {
            Err(AnalysisError::unavailable("nothing selected"))
        }
    }

    #[test]
    fn analyze_then_cycle_drives_viewport() {
        let session = Session::default();
        let score = session.analyze(&samples::open_box(2)).unwrap();
        assert_eq!(score, 80);
        assert_eq!(session.navigator_state(), NavigatorState::Idle);

        let mut viewport = RecordingViewport::default();
        let first = session.cycle_next(&mut viewport).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(viewport.calls, vec![first.primary]);
    }

    #[test]
    fn commands_before_analysis_are_no_ops() {
        let session = Session::default();
        assert!(session.listing().is_empty());
        assert_eq!(session.score_value(), None);
        assert!(session.cycle_next(&mut NoViewport).is_none());
        assert_eq!(session.navigator_state(), NavigatorState::Idle);
    }

    #[test]
    fn unavailable_mesh_keeps_previous_report() {
        let session = Session::default();
        session.analyze(&samples::prism(8)).unwrap();
        session.cycle_next(&mut NoViewport);
        let before = session.report();

        let err = session.analyze(&Unavailable).unwrap_err();
        assert!(matches!(err, AnalysisError::MeshUnavailable(_)));
        assert_eq!(session.report().map(|r| r.registry), before.map(|r| r.registry));
        assert_eq!(session.navigator_state(), NavigatorState::Focused(0));
        assert!(!session.is_busy());
    }

    /// Viewport that re-runs the analysis every time it is asked to focus.
    struct ReanalyzingViewport<'a> {
        session: &'a Session,
        results: Vec<Result<u8, AnalysisError>>,
    }

    impl ViewportController for ReanalyzingViewport<'_> {
        fn focus_on(&mut self, _region: &BBox, _primary: &GeometryRef) {
            self.results.push(self.session.analyze(&samples::open_box(2)));
        }
    }

    #[test]
    fn viewport_may_reanalyze_from_focus_callback() {
        let session = Session::default();
        session.analyze(&samples::prism(8)).unwrap();

        let mut viewport = ReanalyzingViewport {
            session: &session,
            results: Vec::new(),
        };
        let target = session.cycle_next(&mut viewport).unwrap();
        assert_eq!(target.index, 0);
        assert_eq!(viewport.results, vec![Ok(80)]);
        assert_eq!(session.score_value(), Some(80));
        assert_eq!(session.navigator_state(), NavigatorState::Idle);

        let listing = session.listing();
        let focused = session.focus(listing[0].id, &mut viewport).unwrap();
        assert_eq!(focused.defect_id, listing[0].id);
        assert_eq!(viewport.results.len(), 2);
        assert!(!session.is_busy());
    }

    #[test]
    fn reanalysis_resets_navigator() {
        let session = Session::default();
        session.analyze(&samples::open_box(2)).unwrap();
        session.cycle_next(&mut NoViewport);
        session.cycle_next(&mut NoViewport);
        assert_eq!(session.navigator_state(), NavigatorState::Focused(1));

        session.analyze(&samples::open_box(2)).unwrap();
        assert_eq!(session.navigator_state(), NavigatorState::Idle);
    }
}
