//! Layout context - per-call working state
//!
//! Built fresh at the start of every layout pass and dropped at the end, so
//! no lookup table outlives the call that filled it.

use std::collections::HashMap;

use crate::model::{Couple, Individual};

use super::GenerationPlan;

/// Working copies of the input plus id lookups.
///
/// Slots are assigned in first-seen order; a repeated id replaces the
/// record in its existing slot.
#[derive(Debug, Default)]
pub struct LayoutContext {
    /// Individuals in slot order
    pub individuals: Vec<Individual>,
    /// Couples in slot order
    pub couples: Vec<Couple>,
    individual_slots: HashMap<String, usize>,
    couple_slots: HashMap<String, usize>,
}

impl LayoutContext {
    pub fn new(individuals: &[Individual], couples: &[Couple]) -> Self {
        let mut ctx = Self::default();
        for individual in individuals {
            ctx.insert_individual(individual.clone());
        }
        for couple in couples {
            ctx.insert_couple(couple.clone());
        }
        ctx
    }

    fn insert_individual(&mut self, individual: Individual) {
        match self.individual_slots.get(&individual.id) {
            Some(&slot) => self.individuals[slot] = individual,
            None => {
                self.individual_slots
                    .insert(individual.id.clone(), self.individuals.len());
                self.individuals.push(individual);
            }
        }
    }

    fn insert_couple(&mut self, couple: Couple) {
        match self.couple_slots.get(&couple.id) {
            Some(&slot) => self.couples[slot] = couple,
            None => {
                self.couple_slots.insert(couple.id.clone(), self.couples.len());
                self.couples.push(couple);
            }
        }
    }

    /// Slot of an individual id, if it resolves
    pub fn slot(&self, id: &str) -> Option<usize> {
        self.individual_slots.get(id).copied()
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.slot(id).map(|slot| &self.individuals[slot])
    }

    pub fn couple(&self, id: &str) -> Option<&Couple> {
        self.couple_slots.get(id).map(|&slot| &self.couples[slot])
    }

    /// Both member slots of a couple, if both resolve
    pub fn member_slots(&self, couple: &Couple) -> Option<(usize, usize)> {
        Some((self.slot(&couple.individual1_id)?, self.slot(&couple.individual2_id)?))
    }

    /// Resolved child slots of a couple, unknown ids dropped
    pub fn child_slots(&self, couple: &Couple) -> Vec<usize> {
        couple
            .children_ids
            .iter()
            .filter_map(|id| self.slot(id))
            .collect()
    }

    /// Individuals of a generation plan, in placement order
    pub fn members<'a>(&'a self, plan: &'a GenerationPlan) -> impl Iterator<Item = &'a Individual> + 'a {
        plan.members.iter().map(move |&slot| &self.individuals[slot])
    }
}
