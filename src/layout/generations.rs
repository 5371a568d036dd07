//! Generation assignment
//!
//! Depth over the parent graph: 0 without resolvable parents, otherwise one
//! more than the deepest resolvable parent. Depths are filled in topological
//! order into a memo table, so every individual is visited once and a cyclic
//! parent graph is reported instead of recursing forever.

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::errors::LayoutError;

use super::GenerationPlan;
use super::context::LayoutContext;

/// Parent → child graph over context slots. Node `i` is slot `i`.
pub(crate) fn parent_graph(ctx: &LayoutContext) -> DiGraph<usize, ()> {
    let mut graph = DiGraph::with_capacity(ctx.individuals.len(), ctx.individuals.len() * 2);
    for slot in 0..ctx.individuals.len() {
        graph.add_node(slot);
    }
    for (child, individual) in ctx.individuals.iter().enumerate() {
        for parent_id in &individual.relationships.parent_ids {
            match ctx.slot(parent_id) {
                Some(parent) => {
                    graph.add_edge(NodeIndex::new(parent), NodeIndex::new(child), ());
                }
                None => {
                    crate::log::warn!(
                        individual = %individual.id,
                        parent = %parent_id,
                        "unresolved parent reference skipped"
                    );
                }
            }
        }
    }
    graph
}

/// Generation level of every slot, in slot order.
pub fn generation_levels(ctx: &LayoutContext) -> Result<Vec<u32>, LayoutError> {
    let graph = parent_graph(ctx);
    let order = toposort(&graph, None).map_err(|cycle| LayoutError::CycleDetected {
        individual: ctx.individuals[graph[cycle.node_id()]].id.clone(),
    })?;

    let mut levels = vec![0u32; ctx.individuals.len()];
    for node in order {
        levels[graph[node]] = graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|parent| levels[graph[parent]] + 1)
            .max()
            .unwrap_or(0);
    }
    Ok(levels)
}

/// Assign generations and group individuals and couples by level.
///
/// Writes `layout.generation` on every individual and on every couple whose
/// first member resolves. A couple joins its generation's couple list only
/// when both members resolve and share that generation.
pub fn organize_by_generations(ctx: &mut LayoutContext) -> Result<Vec<GenerationPlan>, LayoutError> {
    let levels = generation_levels(ctx)?;
    let mut plans: BTreeMap<u32, GenerationPlan> = BTreeMap::new();

    for (slot, &level) in levels.iter().enumerate() {
        ctx.individuals[slot].layout.generation = level;
        plans
            .entry(level)
            .or_insert_with(|| GenerationPlan::new(level))
            .members
            .push(slot);
    }

    for couple_slot in 0..ctx.couples.len() {
        let couple = &ctx.couples[couple_slot];
        let Some(first) = ctx.slot(&couple.individual1_id) else {
            crate::log::warn!(couple = %couple.id, "couple skipped: first member unresolved");
            continue;
        };
        let level = levels[first];
        let second_level = ctx.slot(&couple.individual2_id).map(|slot| levels[slot]);
        ctx.couples[couple_slot].layout.generation = level;

        match second_level {
            Some(second) if second == level => {
                if let Some(plan) = plans.get_mut(&level) {
                    plan.couples.push(couple_slot);
                }
            }
            Some(_second) => {
                crate::log::warn!(
                    couple = %ctx.couples[couple_slot].id,
                    first_generation = level,
                    second_generation = _second,
                    "couple skipped: members in different generations"
                );
            }
            None => {
                crate::log::warn!(
                    couple = %ctx.couples[couple_slot].id,
                    "couple skipped: second member unresolved"
                );
            }
        }
    }

    crate::log::debug!(generations = plans.len(), "organized by generations");
    Ok(plans.into_values().collect())
}
