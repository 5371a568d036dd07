//! Domain model for pedigree charts
//!
//! Plain records shared by every component. The layout engine reads the
//! relationship fields and writes the `layout` sub-records; identity,
//! medical and relationship fields belong to whoever owns the data.

use std::fmt;

use crate::types::{Bounds, Length, Point, Pt, Size};

/// Biological sex as recorded for the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
}

/// Whether the individual is affected by the condition under study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HealthStatus {
    Healthy,
    Affected,
    #[default]
    Unknown,
}

/// Vital status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifeStatus {
    Alive,
    Deceased,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicalStatus {
    pub health_status: HealthStatus,
    pub life_status: LifeStatus,
    /// The index case whose consultation motivated the chart
    pub is_proband: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    pub spouse_id: Option<String>,
    /// At most two; more is a validation error, not a layout failure
    pub parent_ids: Vec<String>,
    pub children_ids: Vec<String>,
    pub sibling_ids: Vec<String>,
}

// ============================================================================
// Genetic symbol
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolShape {
    /// Male
    Square,
    /// Female or unknown
    #[default]
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolFill {
    #[default]
    Empty,
    /// Affected by the studied condition
    Filled,
}

/// The shape/fill/status triple drawn for an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeneticSymbol {
    pub shape: SymbolShape,
    pub fill: SymbolFill,
    pub status: LifeStatus,
}

impl GeneticSymbol {
    /// Renderers draw a diagonal strike-through for deceased individuals
    pub fn is_struck_through(&self) -> bool {
        self.status == LifeStatus::Deceased
    }
}

// ============================================================================
// Individual
// ============================================================================

/// Layout data computed by the engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndividualLayout {
    pub generation: u32,
    /// Anchor of the symbol footprint `[x, x+size] × [y, y+size]`
    pub position: Pt,
    pub symbol: GeneticSymbol,
    pub size: Length,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Individual {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub sex: Sex,
    pub medical_status: MedicalStatus,
    pub relationships: Relationships,
    pub layout: IndividualLayout,
}

impl Individual {
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, sex: Sex) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            sex,
            ..Default::default()
        }
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.parent_ids = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.children_ids = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_spouse(mut self, spouse: impl Into<String>) -> Self {
        self.relationships.spouse_id = Some(spouse.into());
        self
    }

    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.medical_status.health_status = health;
        self
    }

    pub fn with_life(mut self, life: LifeStatus) -> Self {
        self.medical_status.life_status = life;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn proband(mut self) -> Self {
        self.medical_status.is_proband = true;
        self
    }

    /// Full display name
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// The square the symbol occupies
    pub fn footprint(&self) -> Bounds {
        let mut bb = Bounds::new();
        bb.expand_rect(self.layout.position, Size::new(self.layout.size, self.layout.size));
        bb
    }

    /// Horizontal centre of the footprint at the top edge; where child lines land
    pub fn inner_edge(&self) -> Pt {
        let pos = self.layout.position;
        Point::new(pos.x + self.layout.size.half(), pos.y)
    }
}

// ============================================================================
// Couple
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineSegment {
    pub start: Pt,
    pub end: Pt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChildrenConnection {
    /// Directly below the couple centre
    pub drop_point: Pt,
    /// `(children - 1) × symbol spacing`; a hint only, routing uses real child positions
    pub bridge_width: Length,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoupleLayout {
    pub generation: u32,
    pub center_position: Pt,
    pub connection_line: LineSegment,
    pub children_connection: Option<ChildrenConnection>,
}

/// A spousal pairing: unit of horizontal layout and child routing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Couple {
    pub id: String,
    pub individual1_id: String,
    pub individual2_id: String,
    /// Free-form date text as entered
    pub marriage_date: Option<String>,
    pub divorced: bool,
    pub children_ids: Vec<String>,
    pub layout: CoupleLayout,
}

impl Couple {
    pub fn new(
        id: impl Into<String>,
        individual1_id: impl Into<String>,
        individual2_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            individual1_id: individual1_id.into(),
            individual2_id: individual2_id.into(),
            ..Default::default()
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_ids = children.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// Generation
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationSpacing {
    pub between_individuals: Length,
    pub between_couples: Length,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationLayout {
    pub y_position: Length,
    pub total_width: Length,
    pub spacing: GenerationSpacing,
}

/// One generational level, rebuilt on every layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    /// 0 = individuals without recorded parents
    pub level: u32,
    pub individuals: Vec<Individual>,
    pub couples: Vec<Couple>,
    pub layout: GenerationLayout,
}

// ============================================================================
// Connections
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Marriage,
    ParentChild,
    SiblingBridge,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Marriage => write!(f, "marriage"),
            ConnectionKind::ParentChild => write!(f, "parent_child"),
            ConnectionKind::SiblingBridge => write!(f, "sibling_bridge"),
        }
    }
}

/// The "to" side of a connection: one individual, or a whole sibship
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    One(String),
    Many(Vec<String>),
}

impl ConnectionTarget {
    pub fn contains(&self, id: &str) -> bool {
        match self {
            ConnectionTarget::One(one) => one == id,
            ConnectionTarget::Many(many) => many.iter().any(|m| m == id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub stroke: String,
    pub stroke_width: Length,
    pub stroke_dasharray: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPath {
    pub points: Vec<Pt>,
    pub style: StrokeStyle,
}

/// A drawable edge between individuals or couples
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyConnection {
    pub id: String,
    pub kind: ConnectionKind,
    pub from_id: String,
    pub to: ConnectionTarget,
    pub path: ConnectionPath,
}

// ============================================================================
// Tree layout
// ============================================================================

/// Complete engine output; superseded wholesale by the next pass
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub generations: Vec<Generation>,
    pub connections: Vec<FamilyConnection>,
    pub canvas_size: Size<Length>,
    pub bounds: Bounds,
}

impl TreeLayout {
    /// All positioned individuals, generation by generation
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.generations.iter().flat_map(|g| g.individuals.iter())
    }

    pub fn couples(&self) -> impl Iterator<Item = &Couple> {
        self.generations.iter().flat_map(|g| g.couples.iter())
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals().find(|i| i.id == id)
    }

    pub fn couple(&self, id: &str) -> Option<&Couple> {
        self.couples().find(|c| c.id == id)
    }

    pub fn connections_of_kind(&self, kind: ConnectionKind) -> impl Iterator<Item = &FamilyConnection> {
        self.connections.iter().filter(move |c| c.kind == kind)
    }

    /// Topmost symbol whose footprint contains `p` (later generations draw last)
    pub fn individual_at(&self, p: Pt) -> Option<&Individual> {
        self.individuals().filter(|i| i.footprint().contains(p)).last()
    }
}

/// Outcome of a consistency check; informational only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_and_inner_edge() {
        let mut ind = Individual::new("a", "Ann", Sex::Female);
        ind.layout.position = Point::new(Length(50.0), Length(170.0));
        ind.layout.size = Length(40.0);

        let fp = ind.footprint();
        assert_eq!(fp.max_x(), Length(90.0));
        assert_eq!(fp.max_y(), Length(210.0));
        assert_eq!(ind.inner_edge(), Point::new(Length(70.0), Length(170.0)));
    }

    #[test]
    fn display_name_joins_last_name() {
        let mut ind = Individual::new("a", "Marie", Sex::Female);
        assert_eq!(ind.display_name(), "Marie");
        ind.last_name = Some("Martin".into());
        assert_eq!(ind.display_name(), "Marie Martin");
    }

    #[test]
    fn connection_target_contains() {
        let one = ConnectionTarget::One("x".into());
        let many = ConnectionTarget::Many(vec!["x".into(), "y".into()]);
        assert!(one.contains("x"));
        assert!(!one.contains("y"));
        assert!(many.contains("y"));
    }

    #[test]
    fn validation_result_validity_follows_errors() {
        assert!(ValidationResult::from_findings(vec![], vec!["w".into()]).is_valid);
        assert!(!ValidationResult::from_findings(vec!["e".into()], vec![]).is_valid);
    }
}
