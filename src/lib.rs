#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

pub mod analysis;
pub mod geom;
pub mod navigator;
pub mod samples;
pub mod session;

use std::fmt;

use analysis::{AnalysisConfig, AnalysisError, DefectId};
use geom::MeshSnapshot;
use serde::Serialize;
use session::{MeshProvider, NoViewport, Session};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

/// Mesh handed over by the host, waiting for the next `analyze`.
struct StagedMesh<'a>(Option<&'a MeshSnapshot>);

impl MeshProvider for StagedMesh<'_> {
    fn snapshot(&self) -> Result<MeshSnapshot, AnalysisError> {
        self.0
            .cloned()
            .ok_or_else(|| AnalysisError::unavailable("er is geen mesh geselecteerd"))
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeSummary {
    score: u8,
    band: analysis::HealthBand,
    headline: String,
    defect_count: usize,
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    session: Session,
    staged: Option<MeshSnapshot>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Engine {
        Engine {
            session: Session::default(),
            staged: None,
        }
    }

    /// Maak een engine met een eigen configuratie; ontbrekende velden krijgen
    /// hun standaardwaarde.
    pub fn with_config(config: JsValue) -> Result<Engine, JsValue> {
        let config: AnalysisConfig = if config.is_undefined() || config.is_null() {
            AnalysisConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        Ok(Engine {
            session: Session::new(config),
            staged: None,
        })
    }

    /// Zet de mesh klaar voor de volgende analyse.
    ///
    /// `positions` is `[x0, y0, z0, x1, ...]`, `face_sizes` geeft per face het
    /// aantal indices, `indices` bevat alle face-loops achter elkaar.
    #[wasm_bindgen]
    pub fn set_mesh(
        &mut self,
        positions: &[f64],
        face_sizes: &[u32],
        indices: &[u32],
    ) -> Result<(), JsValue> {
        let mesh = MeshSnapshot::from_flat(positions, face_sizes, indices)
            .map_err(|err| to_js_error(AnalysisError::from(err)))?;
        self.staged = Some(mesh);
        Ok(())
    }

    /// Verwijder de klaargezette mesh; het laatste rapport blijft staan.
    #[wasm_bindgen]
    pub fn clear_mesh(&mut self) {
        self.staged = None;
    }

    #[wasm_bindgen]
    pub fn has_mesh(&self) -> bool {
        self.staged.is_some()
    }

    /// Analyseer de klaargezette mesh en geef score en kopregel terug.
    #[wasm_bindgen]
    pub fn analyze(&mut self) -> Result<JsValue, JsValue> {
        self.session
            .analyze(&StagedMesh(self.staged.as_ref()))
            .map_err(to_js_error)?;

        let report = self
            .session
            .report()
            .ok_or_else(|| js_error("analyse leverde geen rapport op"))?;
        to_js_value(&AnalyzeSummary {
            score: report.score(),
            band: report.band(),
            headline: report.headline(),
            defect_count: report.registry.len(),
        })
    }

    /// Lijst van gevonden defecten voor de UI.
    #[wasm_bindgen]
    pub fn get_listing(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.session.listing())
    }

    /// Score van de laatste geslaagde analyse, of `undefined`.
    #[wasm_bindgen]
    pub fn score_value(&self) -> Option<u8> {
        self.session.score_value()
    }

    /// Topologie-statistieken van de laatste analyse.
    #[wasm_bindgen]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        match self.session.stats() {
            Some(stats) => to_js_value(&stats),
            None => Err(js_error("er is nog geen analyse uitgevoerd")),
        }
    }

    /// Focus op een defect uit de lijst. Geeft `null` terug voor een
    /// verouderd id.
    #[wasm_bindgen]
    pub fn focus(&self, id: JsValue) -> Result<JsValue, JsValue> {
        let id: DefectId = serde_wasm_bindgen::from_value(id).map_err(to_js_error)?;
        match self.session.focus(id, &mut NoViewport) {
            Some(target) => to_js_value(&target),
            None => Ok(JsValue::NULL),
        }
    }

    /// Ga naar het volgende defect; `null` als er niets te tonen is.
    #[wasm_bindgen]
    pub fn cycle_next(&self) -> Result<JsValue, JsValue> {
        match self.session.cycle_next(&mut NoViewport) {
            Some(target) => to_js_value(&target),
            None => Ok(JsValue::NULL),
        }
    }
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::warn!("{message}");
        JsValue::NULL
    }
}
