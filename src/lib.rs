//! Layout engine for medical pedigree charts.
//!
//! Given individuals linked by parent/child and spousal relationships, the
//! engine assigns every individual a generation and a deterministic 2-D
//! position, routes marriage lines, parent-child drops and sibling bridges,
//! and centres the result on a padded canvas. A headless SVG renderer and a
//! small presentation session show how the pieces are wired together.
//!
//! ```
//! use pedigree::{Couple, Individual, LayoutEngine, Sex};
//!
//! let people = [
//!     Individual::new("dad", "Jean", Sex::Male),
//!     Individual::new("mum", "Marie", Sex::Female),
//!     Individual::new("kid", "Paul", Sex::Male).with_parents(["dad", "mum"]),
//! ];
//! let couples = [Couple::new("parents", "dad", "mum").with_children(["kid"])];
//!
//! let layout = LayoutEngine::default().calculate_tree_layout(&people, &couples)?;
//! assert_eq!(layout.generations.len(), 2);
//! # Ok::<(), pedigree::LayoutError>(())
//! ```

pub mod config;
pub mod errors;
pub mod layout;
pub mod log;
pub mod model;
pub mod render;
pub mod sample;
pub mod session;
pub mod symbol;
pub mod types;
pub mod validate;

pub use config::PedigreeConfig;
pub use errors::{ConfigError, LayoutError, RenderError};
pub use layout::LayoutEngine;
pub use model::*;
pub use render::{PedigreeRenderer, SvgRenderer, SvgSurface};
pub use session::PedigreeSession;
pub use symbol::generate_genetic_symbol;
pub use types::{Bounds, Length, Point, Pt, Size};
pub use validate::{validate_genetic_consistency, validate_pedigree};

/// Lay out a family with the default configuration and render it to SVG.
pub fn render_svg(individuals: &[Individual], couples: &[Couple]) -> Result<String, miette::Report> {
    let engine = LayoutEngine::default();
    let layout = engine.calculate_tree_layout(individuals, couples)?;

    let mut renderer = SvgRenderer::new(engine.config());
    renderer.initialize(SvgSurface::default());
    renderer.render(&layout, None)?;
    Ok(renderer.export_vector_document()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_svg_sample_family() {
        let family = sample::sample_family();
        let svg = render_svg(&family.individuals, &family.couples).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r#"class="individual-group""#).count(), 5);
    }

    #[test]
    fn render_svg_reports_cycles() {
        let people = [Individual::new("a", "A", Sex::Male).with_parents(["a"])];
        let err = render_svg(&people, &[]).unwrap_err();
        assert!(err.to_string().contains("cycle detected"));
    }
}
