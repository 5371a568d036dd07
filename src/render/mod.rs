//! Rendering collaborators
//!
//! The layout engine never draws. Anything that paints a [`TreeLayout`]
//! implements [`PedigreeRenderer`]; the crate ships a headless SVG renderer.
//!
//! - `svg`: SVG document generation and hit-testing

pub mod svg;

pub use svg::{SvgRenderer, SvgSurface};

use crate::errors::RenderError;
use crate::model::{Individual, TreeLayout};
use crate::types::{Bounds, Length};

/// Callback fired when the user picks an individual on the rendered chart
pub type SelectionHandler = Box<dyn FnMut(&Individual)>;

/// Paints a computed layout onto some surface
pub trait PedigreeRenderer {
    /// Whatever the renderer draws into
    type Surface;

    /// Bind to a surface, discarding anything drawn before.
    fn initialize(&mut self, surface: Self::Surface);

    /// Replace the drawing with `layout`. The handler, if any, is kept until
    /// the next render or cleanup.
    fn render(
        &mut self,
        layout: &TreeLayout,
        on_selected: Option<SelectionHandler>,
    ) -> Result<(), RenderError>;

    /// Fit the view to `region` with `padding` units of margin on every side.
    fn zoom_to_region(&mut self, region: &Bounds, padding: Length) -> Result<(), RenderError>;

    /// Region of canvas space the drawing of `layout` covers. Renderers
    /// whose marks extend past the symbol footprints override this.
    fn drawn_region(&self, layout: &TreeLayout) -> Bounds {
        layout.bounds
    }

    /// Serialize the current drawing as a standalone vector document.
    fn export_vector_document(&self) -> Result<String, RenderError>;

    /// Release the surface and all drawn state.
    fn cleanup(&mut self);
}
