//! Pedigree layout engine
//!
//! This module is organized into submodules, one per phase:
//! - `context`: per-call working copies and id lookups
//! - `generations`: generation assignment over the parent graph
//! - `position`: sequential left-to-right positioning
//! - `bounds`: bounds, centering and canvas sizing
//! - `connections`: marriage, parent-child and sibling bridge routing
//! - `defaults`: default sizes and spacings
//!
//! A pass always recomputes everything from the input snapshot. Phases run
//! in a fixed order; routing happens after centering so paths are built
//! from final coordinates.

pub mod bounds;
pub mod connections;
pub mod context;
pub mod defaults;
pub mod generations;
pub mod position;

pub use context::LayoutContext;

use crate::config::PedigreeConfig;
use crate::errors::{ConfigError, LayoutError};
use crate::model::{
    Couple, Generation, GenerationLayout, GeneticSymbol, Individual, TreeLayout, ValidationResult,
};
use crate::symbol;
use crate::validate;

use bounds::{calculate_canvas_bounds, canvas_size, center_tree};
use connections::calculate_family_connections;
use generations::organize_by_generations;
use position::calculate_sequential_layout;

/// One generation while a pass is in flight: slots into the context rather
/// than copies, so phases can mutate positions in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationPlan {
    pub level: u32,
    /// Individual slots, in input order
    pub members: Vec<usize>,
    /// Slots of couples eligible for paired placement
    pub couples: Vec<usize>,
    pub layout: GenerationLayout,
}

impl GenerationPlan {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Converts individuals and couples into a positioned, centered [`TreeLayout`].
///
/// Holds only its configuration; lookup tables live in a
/// [`LayoutContext`] built fresh for each call.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: PedigreeConfig,
}

impl LayoutEngine {
    /// Create an engine, rejecting configurations with non-finite or
    /// out-of-range sizes.
    pub fn new(config: PedigreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PedigreeConfig {
        &self.config
    }

    /// Full layout pass.
    ///
    /// Fails only on a cyclic parent graph or an invalid configuration;
    /// dangling references and mismatched couples are tolerated and left to
    /// the validators.
    pub fn calculate_tree_layout(
        &self,
        individuals: &[Individual],
        couples: &[Couple],
    ) -> Result<TreeLayout, LayoutError> {
        self.config.validate()?;
        let config = &self.config;

        let mut ctx = LayoutContext::new(individuals, couples);
        for individual in ctx.individuals.iter_mut() {
            individual.layout.symbol = symbol::generate_genetic_symbol(individual);
            individual.layout.size = config.symbols.size;
        }

        let mut plans = organize_by_generations(&mut ctx)?;
        calculate_sequential_layout(&mut ctx, &mut plans, config);

        let preliminary = calculate_canvas_bounds(&ctx, &plans, config.symbols.size);
        crate::log::debug!(
            min_x = preliminary.min_x().raw(),
            min_y = preliminary.min_y().raw(),
            width = preliminary.width().raw(),
            height = preliminary.height().raw(),
            "preliminary bounds"
        );
        center_tree(&mut ctx, &mut plans, &preliminary, config);

        let connections = calculate_family_connections(&ctx, &plans, config);
        let bounds = calculate_canvas_bounds(&ctx, &plans, config.symbols.size);

        let generations = plans
            .iter()
            .map(|plan| Generation {
                level: plan.level,
                individuals: ctx.members(plan).cloned().collect(),
                couples: plan.couples.iter().map(|&slot| ctx.couples[slot].clone()).collect(),
                layout: plan.layout,
            })
            .collect();

        let layout = TreeLayout {
            generations,
            connections,
            canvas_size: canvas_size(&bounds, config),
            bounds,
        };
        crate::log::debug!(
            individuals = ctx.individuals.len(),
            couples = ctx.couples.len(),
            canvas_w = layout.canvas_size.w.raw(),
            canvas_h = layout.canvas_size.h.raw(),
            "tree layout complete"
        );
        Ok(layout)
    }

    pub fn validate_genetic_consistency(&self, individuals: &[Individual]) -> ValidationResult {
        validate::validate_genetic_consistency(individuals)
    }

    pub fn generate_genetic_symbol(&self, individual: &Individual) -> GeneticSymbol {
        symbol::generate_genetic_symbol(individual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HealthStatus, Sex, SymbolFill, SymbolShape};
    use crate::types::{Length, Point, Size};

    #[test]
    fn rejects_invalid_config() {
        let mut config = PedigreeConfig::default();
        config.symbols.size = Length(0.0);
        assert!(LayoutEngine::new(config).is_err());
    }

    #[test]
    fn empty_input_gives_padded_empty_canvas() {
        let layout = LayoutEngine::default().calculate_tree_layout(&[], &[]).unwrap();
        assert!(layout.generations.is_empty());
        assert!(layout.connections.is_empty());
        assert_eq!(layout.bounds.min, Point::ORIGIN);
        assert_eq!(layout.canvas_size, Size::new(Length(100.0), Length(100.0)));
    }

    #[test]
    fn every_individual_gets_symbol_and_size() {
        let people = [
            Individual::new("a", "A", Sex::Male).with_health(HealthStatus::Affected),
            Individual::new("b", "B", Sex::Female),
        ];
        let layout = LayoutEngine::default().calculate_tree_layout(&people, &[]).unwrap();
        let a = layout.individual("a").unwrap();
        assert_eq!(a.layout.symbol.shape, SymbolShape::Square);
        assert_eq!(a.layout.symbol.fill, SymbolFill::Filled);
        assert_eq!(a.layout.size, Length(40.0));
        assert_eq!(layout.individual("b").unwrap().layout.symbol.shape, SymbolShape::Circle);
    }

    #[test]
    fn single_individual_is_padded_from_origin() {
        let layout = LayoutEngine::default()
            .calculate_tree_layout(&[Individual::new("solo", "Solo", Sex::Unknown)], &[])
            .unwrap();
        assert_eq!(
            layout.individual("solo").unwrap().layout.position,
            Point::new(Length(50.0), Length(50.0))
        );
        assert_eq!(layout.canvas_size, Size::new(Length(140.0), Length(140.0)));
    }

    #[test]
    fn input_is_not_mutated() {
        let people = vec![Individual::new("a", "A", Sex::Male)];
        let before = people.clone();
        LayoutEngine::default().calculate_tree_layout(&people, &[]).unwrap();
        assert_eq!(people, before);
    }
}
