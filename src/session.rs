//! Presentation session
//!
//! Owns the canonical family data and wires it through the layout engine to
//! a renderer. Every mutation can trigger a full re-layout; a failed layout
//! leaves the previous one on screen and records the error.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::RenderError;
use crate::layout::LayoutEngine;
use crate::model::{Couple, Individual, MedicalStatus, TreeLayout, ValidationResult};
use crate::render::{PedigreeRenderer, SelectionHandler, SvgRenderer};
use crate::sample::{self, Family};
use crate::symbol::generate_genetic_symbol;
use crate::types::Length;
use crate::validate::validate_pedigree;

/// Margin kept around the tree by [`PedigreeSession::zoom_to_fit`]
pub const ZOOM_PADDING: Length = Length(20.0);

pub struct PedigreeSession<R: PedigreeRenderer = SvgRenderer> {
    individuals: Vec<Individual>,
    couples: Vec<Couple>,
    engine: LayoutEngine,
    renderer: Option<R>,
    /// Shared with the renderer's selection handler
    selected: Rc<RefCell<Option<String>>>,
    layout: Option<TreeLayout>,
    validation: Option<ValidationResult>,
    error: Option<String>,
    auto_update: bool,
}

impl<R: PedigreeRenderer> PedigreeSession<R> {
    pub fn new(engine: LayoutEngine, family: Family) -> Self {
        Self {
            individuals: family.individuals,
            couples: family.couples,
            engine,
            renderer: None,
            selected: Rc::new(RefCell::new(None)),
            layout: None,
            validation: None,
            error: None,
            auto_update: true,
        }
    }

    /// Bind a renderer to its surface and draw the current data.
    pub fn initialize(&mut self, mut renderer: R, surface: R::Surface) {
        renderer.initialize(surface);
        self.renderer = Some(renderer);
        self.error = None;
        self.update_layout();
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn couples(&self) -> &[Couple] {
        &self.couples
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Last layout that computed successfully
    pub fn layout(&self) -> Option<&TreeLayout> {
        self.layout.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    /// Message of the most recent failure, cleared by the next attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    pub fn set_auto_update(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.id == id)
    }

    pub fn select_individual(&mut self, id: Option<&str>) {
        *self.selected.borrow_mut() = id.map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    pub fn selected_individual(&self) -> Option<&Individual> {
        let id = self.selected_id()?;
        self.individual(&id)
    }

    /// Validate, lay out and render the current data.
    ///
    /// Does nothing until a renderer is attached. On failure the previous
    /// layout is kept and the error recorded.
    pub fn update_layout(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        self.error = None;

        for individual in self.individuals.iter_mut() {
            individual.layout.symbol = generate_genetic_symbol(individual);
        }
        self.validation = Some(validate_pedigree(&self.individuals, &self.couples));

        let layout = match self.engine.calculate_tree_layout(&self.individuals, &self.couples) {
            Ok(layout) => layout,
            Err(err) => {
                crate::log::warn!(error = %err, "layout failed; keeping previous layout");
                self.error = Some(format!("layout error: {err}"));
                return;
            }
        };

        let selected = Rc::clone(&self.selected);
        let on_selected: SelectionHandler = Box::new(move |individual: &Individual| {
            *selected.borrow_mut() = Some(individual.id.clone());
        });
        if let Err(err) = renderer.render(&layout, Some(on_selected)) {
            self.error = Some(format!("render error: {err}"));
        }
        self.layout = Some(layout);
    }

    /// Apply `edit` to one individual and refresh its symbol. Returns false
    /// when the id is unknown.
    pub fn update_individual(&mut self, id: &str, edit: impl FnOnce(&mut Individual)) -> bool {
        let Some(individual) = self.individuals.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        edit(individual);
        individual.layout.symbol = generate_genetic_symbol(individual);

        if self.auto_update {
            self.update_layout();
        }
        true
    }

    pub fn update_medical_status(&mut self, id: &str, edit: impl FnOnce(&mut MedicalStatus)) -> bool {
        self.update_individual(id, |individual| edit(&mut individual.medical_status))
    }

    pub fn export_vector_document(&self) -> Result<String, RenderError> {
        self.renderer
            .as_ref()
            .ok_or(RenderError::NotInitialized)?
            .export_vector_document()
    }

    /// Zoom the renderer onto everything it drew, with [`ZOOM_PADDING`].
    pub fn zoom_to_fit(&mut self) -> Result<(), RenderError> {
        let renderer = self.renderer.as_mut().ok_or(RenderError::NotInitialized)?;
        let layout = self.layout.as_ref().ok_or(RenderError::NothingRendered)?;
        let region = renderer.drawn_region(layout);
        renderer.zoom_to_region(&region, ZOOM_PADDING)
    }

    /// Replace all data with the sample family and redraw.
    pub fn reset_to_sample_data(&mut self) {
        let Family {
            individuals,
            couples,
        } = sample::sample_family();
        self.individuals = individuals;
        self.couples = couples;
        *self.selected.borrow_mut() = None;
        self.layout = None;
        self.validation = None;
        self.error = None;
        self.update_layout();
    }

    /// Detach and clean up the renderer.
    pub fn cleanup(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.cleanup();
        }
        self.layout = None;
    }
}

impl Default for PedigreeSession<SvgRenderer> {
    fn default() -> Self {
        Self::new(LayoutEngine::default(), sample::sample_family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HealthStatus, SymbolFill};
    use crate::render::SvgSurface;

    fn session() -> PedigreeSession {
        let mut session = PedigreeSession::default();
        session.initialize(SvgRenderer::default(), SvgSurface::default());
        session
    }

    #[test]
    fn nothing_happens_before_initialize() {
        let mut session = PedigreeSession::<SvgRenderer>::default();
        session.update_layout();
        assert!(session.layout().is_none());
        assert_eq!(session.export_vector_document(), Err(RenderError::NotInitialized));
    }

    #[test]
    fn initialize_lays_out_sample_family() {
        let session = session();
        let layout = session.layout().unwrap();
        assert_eq!(layout.generations.len(), 2);
        assert!(session.validation().unwrap().is_valid);
        assert!(session.error().is_none());
    }

    #[test]
    fn medical_edit_updates_symbol_and_layout() {
        let mut session = session();
        assert!(session.update_medical_status("child-001", |status| {
            status.health_status = HealthStatus::Affected;
        }));
        assert_eq!(
            session.individual("child-001").unwrap().layout.symbol.fill,
            SymbolFill::Filled
        );
        let laid_out = session.layout().unwrap().individual("child-001").unwrap();
        assert_eq!(laid_out.layout.symbol.fill, SymbolFill::Filled);
    }

    #[test]
    fn unknown_id_is_not_updated() {
        let mut session = session();
        assert!(!session.update_individual("nobody", |i| i.age = Some(1)));
    }

    #[test]
    fn manual_mode_defers_layout() {
        let mut session = session();
        session.set_auto_update(false);
        session.update_individual("child-003", |i| i.first_name = "Luc".into());
        let stale = session.layout().unwrap().individual("child-003").unwrap();
        assert_eq!(stale.first_name, "Lucas");
        session.update_layout();
        let fresh = session.layout().unwrap().individual("child-003").unwrap();
        assert_eq!(fresh.first_name, "Luc");
    }

    #[test]
    fn selection_round_trip() {
        let mut session = session();
        session.select_individual(Some("mother-001"));
        assert_eq!(session.selected_individual().unwrap().first_name, "Marie");
        session.select_individual(None);
        assert!(session.selected_individual().is_none());
    }

    #[test]
    fn cleanup_detaches_renderer() {
        let mut session = session();
        session.cleanup();
        assert!(session.renderer().is_none());
        assert!(session.layout().is_none());
        assert_eq!(session.zoom_to_fit(), Err(RenderError::NotInitialized));
    }
}
