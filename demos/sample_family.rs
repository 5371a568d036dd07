//! Lay out the built-in sample family and print it as SVG.
//!
//! Pass `--extended` to include the paternal grandparents. Set `RUST_LOG`
//! (with the `tracing` feature enabled) to see the layout phases.

use pedigree::sample::{Family, extended_family, sample_family};
use pedigree::{LayoutEngine, PedigreeRenderer, SvgRenderer, SvgSurface, validate_pedigree};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Family {
        individuals,
        couples,
    } = if std::env::args().any(|arg| arg == "--extended") {
        extended_family()
    } else {
        sample_family()
    };

    let validation = validate_pedigree(&individuals, &couples);
    for error in &validation.errors {
        eprintln!("error: {error}");
    }
    for warning in &validation.warnings {
        eprintln!("warning: {warning}");
    }

    let engine = LayoutEngine::default();
    let layout = engine.calculate_tree_layout(&individuals, &couples)?;
    eprintln!(
        "{} generations, {} connections, canvas {}x{}",
        layout.generations.len(),
        layout.connections.len(),
        layout.canvas_size.w,
        layout.canvas_size.h
    );

    let mut renderer = SvgRenderer::new(engine.config());
    renderer.initialize(SvgSurface::default());
    renderer.render(&layout, None)?;
    println!("{}", renderer.export_vector_document()?);
    Ok(())
}
