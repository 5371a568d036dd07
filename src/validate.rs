//! Consistency checks over family data
//!
//! Findings are informational. A layout is produced regardless of what
//! these functions report.

use std::collections::HashSet;

use crate::errors::LayoutError;
use crate::layout::LayoutContext;
use crate::layout::generations::generation_levels;
use crate::model::{Couple, HealthStatus, Individual, Sex, ValidationResult};

/// Per-individual checks: parent count, dangling relationship ids, and
/// missing sex or health status.
pub fn validate_genetic_consistency(individuals: &[Individual]) -> ValidationResult {
    let known: HashSet<&str> = individuals.iter().map(|i| i.id.as_str()).collect();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for individual in individuals {
        let name = &individual.first_name;
        let rel = &individual.relationships;

        if rel.parent_ids.len() > 2 {
            errors.push(format!("{name} has more than 2 parents"));
        }
        for parent in &rel.parent_ids {
            if !known.contains(parent.as_str()) {
                errors.push(format!("parent {parent} not found for {name}"));
            }
        }
        for child in &rel.children_ids {
            if !known.contains(child.as_str()) {
                errors.push(format!("child {child} not found for {name}"));
            }
        }
        if let Some(spouse) = &rel.spouse_id {
            if !known.contains(spouse.as_str()) {
                errors.push(format!("spouse {spouse} not found for {name}"));
            }
        }
        for sibling in &rel.sibling_ids {
            if !known.contains(sibling.as_str()) {
                errors.push(format!("sibling {sibling} not found for {name}"));
            }
        }

        if individual.sex == Sex::Unknown {
            warnings.push(format!("sex not specified for {name}"));
        }
        if individual.medical_status.health_status == HealthStatus::Unknown {
            warnings.push(format!("health status not specified for {name}"));
        }
    }

    ValidationResult::from_findings(errors, warnings)
}

/// Everything [`validate_genetic_consistency`] reports, plus the structural
/// problems the layout engine tolerates silently: duplicate ids, broken or
/// cross-generation couples, individuals paired twice in one generation,
/// unknown couple children and cyclic ancestry.
pub fn validate_pedigree(individuals: &[Individual], couples: &[Couple]) -> ValidationResult {
    let ValidationResult {
        mut errors,
        warnings,
        ..
    } = validate_genetic_consistency(individuals);

    let mut seen = HashSet::new();
    for individual in individuals {
        if !seen.insert(individual.id.as_str()) {
            errors.push(format!("duplicate individual id {}", individual.id));
        }
    }

    let ctx = LayoutContext::new(individuals, couples);
    let levels = match generation_levels(&ctx) {
        Ok(levels) => Some(levels),
        Err(LayoutError::CycleDetected { individual }) => {
            errors.push(format!("cyclic ancestry through {individual}"));
            None
        }
        Err(err) => {
            errors.push(err.to_string());
            None
        }
    };

    for couple in couples {
        let first = ctx.slot(&couple.individual1_id);
        let second = ctx.slot(&couple.individual2_id);
        if first.is_none() {
            errors.push(format!(
                "individual 1 {} not found in couple {}",
                couple.individual1_id, couple.id
            ));
        }
        if second.is_none() {
            errors.push(format!(
                "individual 2 {} not found in couple {}",
                couple.individual2_id, couple.id
            ));
        }
        if let (Some(a), Some(b), Some(levels)) = (first, second, levels.as_ref()) {
            if levels[a] != levels[b] {
                errors.push(format!(
                    "couple {} spans generations {} and {}",
                    couple.id, levels[a], levels[b]
                ));
            }
        }
        for child in &couple.children_ids {
            if ctx.slot(child).is_none() {
                errors.push(format!("child {child} not found in couple {}", couple.id));
            }
        }
    }

    if let Some(levels) = levels.as_ref() {
        errors.extend(repeated_members(&ctx, levels).into_iter().map(|slot| {
            format!(
                "individual {} is a member of several couples in generation {}",
                ctx.individuals[slot].id, levels[slot]
            )
        }));
    }

    ValidationResult::from_findings(errors, warnings)
}

/// Slots paired by more than one laid-out couple, in first-repeat order.
///
/// Only the last of those couples keeps its members next to its marriage line.
fn repeated_members(ctx: &LayoutContext, levels: &[u32]) -> Vec<usize> {
    let mut paired = HashSet::new();
    let mut repeated = Vec::new();
    for couple in &ctx.couples {
        let Some((a, b)) = ctx.member_slots(couple) else {
            continue;
        };
        if levels[a] != levels[b] {
            continue;
        }
        for slot in [a, b] {
            if !paired.insert(slot) && !repeated.contains(&slot) {
                repeated.push(slot);
            }
        }
    }
    repeated
}
