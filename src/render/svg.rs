//! Headless SVG renderer
//!
//! Produces the same document structure an interactive view would hold:
//! a connections group under a symbols group, each individual drawn in its
//! own group translated to the individual's position. Symbols are centred
//! on that position.

use glam::{DVec2, dvec2};

use crate::config::PedigreeConfig;
use crate::errors::RenderError;
use crate::model::{FamilyConnection, Individual, SymbolFill, SymbolShape, TreeLayout};
use crate::types::{Bounds, Length, Point, Pt, Size};

use super::{PedigreeRenderer, SelectionHandler};

const DEFAULT_BACKGROUND: &str = "#f8f9fa";
const INK: &str = "#000000";
const PAPER: &str = "#ffffff";
const PROBAND_COLOR: &str = "#dc2626";
const FONT_FAMILY: &str = "Arial, sans-serif";
const DECEASED_STROKE_WIDTH: f64 = 2.0;

/// Distance from symbol edge to the name baseline; the age sits one line lower.
const NAME_OFFSET: f64 = 15.0;
const AGE_OFFSET: f64 = 30.0;
const PROBAND_OFFSET: f64 = 5.0;
const PROBAND_FONT_SIZE: f64 = 14.0;

/// Drawing target for [`SvgRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSurface {
    /// CSS colour painted behind the chart
    pub background: String,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// Visible region in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewBox {
    origin: Pt,
    size: Size<Length>,
}

pub struct SvgRenderer {
    symbol_stroke_width: Length,
    surface: Option<SvgSurface>,
    layout: Option<TreeLayout>,
    view_box: Option<ViewBox>,
    on_selected: Option<SelectionHandler>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(&PedigreeConfig::default())
    }
}

impl std::fmt::Debug for SvgRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRenderer")
            .field("surface", &self.surface)
            .field("has_layout", &self.layout.is_some())
            .field("view_box", &self.view_box)
            .finish()
    }
}

impl SvgRenderer {
    pub fn new(config: &PedigreeConfig) -> Self {
        Self {
            symbol_stroke_width: config.symbols.stroke_width,
            surface: None,
            layout: None,
            view_box: None,
            on_selected: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// The layout drawn by the last successful render
    pub fn layout(&self) -> Option<&TreeLayout> {
        self.layout.as_ref()
    }

    /// Simulate a click at `p` in canvas coordinates.
    ///
    /// Hit-tests the drawn symbols (last drawn on top), fires the selection
    /// handler and returns the id of the individual hit.
    pub fn click(&mut self, p: Pt) -> Option<String> {
        let layout = self.layout.as_ref()?;
        let hit = layout
            .individuals()
            .filter(|individual| drawn_bounds(individual).contains(p))
            .last()?;
        crate::log::trace!(individual = %hit.id, "symbol clicked");
        if let Some(handler) = self.on_selected.as_mut() {
            handler(hit);
        }
        Some(hit.id.clone())
    }

    fn document(&self, surface: &SvgSurface, layout: &TreeLayout) -> String {
        let canvas = layout.canvas_size;
        let view_box = self.view_box.unwrap_or(ViewBox {
            origin: Point::ORIGIN,
            size: canvas,
        });

        let mut parts = vec![format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}" preserveAspectRatio="xMidYMid meet" style="background-color: {}">"#,
            fmt_len(canvas.w),
            fmt_len(canvas.h),
            fmt_len(view_box.origin.x),
            fmt_len(view_box.origin.y),
            fmt_len(view_box.size.w),
            fmt_len(view_box.size.h),
            escape(&surface.background),
        )];
        parts.push(r#"<g class="genealogy-tree">"#.to_string());

        parts.push(r#"<g class="connections-group">"#.to_string());
        parts.extend(layout.connections.iter().filter_map(render_connection));
        parts.push("</g>".to_string());

        parts.push(r#"<g class="symbols-group">"#.to_string());
        for individual in layout.individuals() {
            parts.push(self.render_individual(individual));
        }
        parts.push("</g>".to_string());

        parts.push("</g>".to_string());
        parts.push("</svg>".to_string());
        parts.join("\n")
    }

    fn render_individual(&self, individual: &Individual) -> String {
        let symbol = individual.layout.symbol;
        let size = individual.layout.size.raw();
        let half = DVec2::splat(size / 2.0);
        let fill = match symbol.fill {
            SymbolFill::Filled => INK,
            SymbolFill::Empty => PAPER,
        };
        let stroke_width = fmt_len(self.symbol_stroke_width);
        let pos = individual.layout.position;

        let mut parts = vec![format!(
            r#"<g class="individual-group" data-individual-id="{}" transform="translate({}, {})">"#,
            escape(&individual.id),
            fmt_len(pos.x),
            fmt_len(pos.y),
        )];

        parts.push(match symbol.shape {
            SymbolShape::Square => format!(
                r#"<rect class="individual-symbol" x="{}" y="{}" width="{}" height="{}" rx="2" fill="{fill}" stroke="{INK}" stroke-width="{stroke_width}"/>"#,
                fmt_num(-half.x),
                fmt_num(-half.y),
                fmt_num(size),
                fmt_num(size),
            ),
            SymbolShape::Circle => format!(
                r#"<circle class="individual-symbol" r="{}" fill="{fill}" stroke="{INK}" stroke-width="{stroke_width}"/>"#,
                fmt_num(half.x),
            ),
        });

        if symbol.is_struck_through() {
            let (from, to) = (-half, half);
            parts.push(format!(
                r#"<line class="deceased-line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{INK}" stroke-width="{}"/>"#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
                fmt_num(DECEASED_STROKE_WIDTH),
            ));
        }

        parts.push(format!(
            r#"<text class="individual-name" x="0" y="{}" text-anchor="middle" font-size="12px" font-family="{FONT_FAMILY}" fill="currentColor">{}</text>"#,
            fmt_num(half.y + NAME_OFFSET),
            escape(&individual.first_name),
        ));

        if let Some(age) = individual.age {
            parts.push(format!(
                r#"<text class="individual-age" x="0" y="{}" text-anchor="middle" font-size="10px" font-family="{FONT_FAMILY}" fill="currentColor">{age} y</text>"#,
                fmt_num(half.y + AGE_OFFSET),
            ));
        }

        if individual.medical_status.is_proband {
            let marker = dvec2(half.x + PROBAND_OFFSET, -half.y - PROBAND_OFFSET);
            parts.push(format!(
                r#"<text class="proband-marker" x="{}" y="{}" font-size="{}px" font-weight="bold" fill="{PROBAND_COLOR}">→</text>"#,
                fmt_num(marker.x),
                fmt_num(marker.y),
                fmt_num(PROBAND_FONT_SIZE),
            ));
        }

        parts.push("</g>".to_string());
        parts.join("\n")
    }
}

impl PedigreeRenderer for SvgRenderer {
    type Surface = SvgSurface;

    fn initialize(&mut self, surface: SvgSurface) {
        self.layout = None;
        self.view_box = None;
        self.on_selected = None;
        self.surface = Some(surface);
    }

    fn render(
        &mut self,
        layout: &TreeLayout,
        on_selected: Option<SelectionHandler>,
    ) -> Result<(), RenderError> {
        if self.surface.is_none() {
            return Err(RenderError::NotInitialized);
        }
        self.layout = Some(layout.clone());
        self.view_box = None;
        self.on_selected = on_selected;
        crate::log::debug!(
            connections = layout.connections.len(),
            individuals = layout.individuals().count(),
            "svg rendered"
        );
        Ok(())
    }

    fn zoom_to_region(&mut self, region: &Bounds, padding: Length) -> Result<(), RenderError> {
        if self.surface.is_none() {
            return Err(RenderError::NotInitialized);
        }
        let padded = region.inflate(padding);
        self.view_box = Some(ViewBox {
            origin: padded.min,
            size: padded.size(),
        });
        Ok(())
    }

    fn drawn_region(&self, layout: &TreeLayout) -> Bounds {
        let mut region = Bounds::new();
        for individual in layout.individuals() {
            let drawn = drawn_bounds(individual);
            region.expand_point(drawn.min);
            region.expand_point(drawn.max);
            for mark in label_anchors(individual) {
                region.expand_point(mark);
            }
        }
        if region.is_empty() { layout.bounds } else { region }
    }

    fn export_vector_document(&self) -> Result<String, RenderError> {
        let surface = self.surface.as_ref().ok_or(RenderError::NotInitialized)?;
        let layout = self.layout.as_ref().ok_or(RenderError::NothingRendered)?;
        Ok(self.document(surface, layout))
    }

    fn cleanup(&mut self) {
        self.surface = None;
        self.layout = None;
        self.view_box = None;
        self.on_selected = None;
    }
}

/// Footprint of a symbol as drawn: centred on the individual's position
fn drawn_bounds(individual: &Individual) -> Bounds {
    let half = individual.layout.size.half();
    let pos = individual.layout.position;
    let mut bb = Bounds::new();
    bb.expand_point(Point::new(pos.x - half, pos.y - half));
    bb.expand_point(Point::new(pos.x + half, pos.y + half));
    bb
}

/// Text positions around a symbol: name and age baselines below it, and the
/// far corner of the proband marker glyph. Text width is not measured.
fn label_anchors(individual: &Individual) -> Vec<Pt> {
    let half = individual.layout.size.half().raw();
    let pos = DVec2::new(individual.layout.position.x.raw(), individual.layout.position.y.raw());

    let mut anchors = vec![pos + dvec2(0.0, half + NAME_OFFSET)];
    if individual.age.is_some() {
        anchors.push(pos + dvec2(0.0, half + AGE_OFFSET));
    }
    if individual.medical_status.is_proband {
        let reach = PROBAND_OFFSET + PROBAND_FONT_SIZE;
        anchors.push(pos + dvec2(half + reach, -half - reach));
    }
    anchors
        .into_iter()
        .map(|p| Point::new(Length(p.x), Length(p.y)))
        .collect()
}

fn render_connection(connection: &FamilyConnection) -> Option<String> {
    let (first, rest) = connection.path.points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut d = format!("M {} {}", fmt_len(first.x), fmt_len(first.y));
    for p in rest {
        d.push_str(&format!(" L {} {}", fmt_len(p.x), fmt_len(p.y)));
    }
    let style = &connection.path.style;
    Some(format!(
        r#"<path class="family-connection" data-connection-id="{}" d="{d}" stroke="{}" stroke-width="{}" stroke-dasharray="{}" fill="none"/>"#,
        escape(&connection.id),
        escape(&style.stroke),
        fmt_len(style.stroke_width),
        style.stroke_dasharray.as_deref().map(escape).unwrap_or_else(|| "none".to_string()),
    ))
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fmt_len(value: Length) -> String {
    fmt_num(value.raw())
}

/// Format a number with up to 6 significant digits, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let sig_figs = 6;
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    match s {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
