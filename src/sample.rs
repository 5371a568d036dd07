//! Built-in sample families
//!
//! The Martin family: two parents and three children, optionally extended
//! with the paternal grandparents.

use crate::model::{Couple, HealthStatus, Individual, LifeStatus, Sex};

/// Individuals plus the couples that join them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Family {
    pub individuals: Vec<Individual>,
    pub couples: Vec<Couple>,
}

const CHILDREN: [&str; 3] = ["child-001", "child-002", "child-003"];

fn martin(id: &str, first_name: &str, sex: Sex, age: u32, health: HealthStatus) -> Individual {
    let mut individual = Individual::new(id, first_name, sex)
        .with_age(age)
        .with_health(health)
        .with_life(LifeStatus::Alive);
    individual.last_name = Some("Martin".to_string());
    individual
}

fn child(id: &str, first_name: &str, sex: Sex, age: u32, health: HealthStatus) -> Individual {
    let mut individual = martin(id, first_name, sex, age, health).with_parents(["father-001", "mother-001"]);
    individual.relationships.sibling_ids = CHILDREN
        .iter()
        .filter(|&&sibling| sibling != id)
        .map(|sibling| sibling.to_string())
        .collect();
    individual
}

fn father() -> Individual {
    martin("father-001", "Jean", Sex::Male, 45, HealthStatus::Healthy)
        .with_spouse("mother-001")
        .with_children(CHILDREN)
}

fn parent_couple() -> Couple {
    Couple::new("couple-001", "father-001", "mother-001").with_children(CHILDREN)
}

/// Jean and Marie Martin with Paul, Sophie and Lucas. Marie is the
/// proband; she and Sophie are affected.
pub fn sample_family() -> Family {
    let mother = martin("mother-001", "Marie", Sex::Female, 42, HealthStatus::Affected)
        .with_spouse("father-001")
        .with_children(CHILDREN)
        .proband();

    Family {
        individuals: vec![
            father(),
            mother,
            child("child-001", "Paul", Sex::Male, 18, HealthStatus::Healthy),
            child("child-002", "Sophie", Sex::Female, 15, HealthStatus::Affected),
            child("child-003", "Lucas", Sex::Male, 12, HealthStatus::Healthy),
        ],
        couples: vec![parent_couple()],
    }
}

/// [`sample_family`] plus Jean's parents Pierre (deceased) and Jeanne
/// (affected).
///
/// Jean now sits one generation below Marie, so their couple is not laid
/// out as a pair and the pedigree validator reports it.
pub fn extended_family() -> Family {
    let grandfather = martin("pgf-001", "Pierre", Sex::Male, 75, HealthStatus::Healthy)
        .with_life(LifeStatus::Deceased)
        .with_spouse("pgm-001")
        .with_children(["father-001"]);
    let grandmother = martin("pgm-001", "Jeanne", Sex::Female, 72, HealthStatus::Affected)
        .with_spouse("pgf-001")
        .with_children(["father-001"]);
    let grandparents = Couple::new("couple-pgp-001", "pgf-001", "pgm-001").with_children(["father-001"]);

    let base = sample_family();
    let mut individuals = vec![grandfather, grandmother];
    individuals.extend(base.individuals);
    if let Some(jean) = individuals.iter_mut().find(|i| i.id == "father-001") {
        jean.relationships.parent_ids = vec!["pgf-001".to_string(), "pgm-001".to_string()];
    }

    let mut couples = vec![grandparents];
    couples.extend(base.couples);
    Family {
        individuals,
        couples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate_genetic_consistency, validate_pedigree};

    #[test]
    fn sample_family_is_consistent() {
        let family = sample_family();
        assert_eq!(family.individuals.len(), 5);
        let result = validate_pedigree(&family.individuals, &family.couples);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn siblings_exclude_self() {
        let family = sample_family();
        let sophie = family.individuals.iter().find(|i| i.first_name == "Sophie").unwrap();
        assert_eq!(sophie.relationships.sibling_ids, vec!["child-001", "child-003"]);
    }

    #[test]
    fn extended_family_flags_cross_generation_couple() {
        let family = extended_family();
        let ids: Vec<&str> = family.individuals.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["pgf-001", "pgm-001", "father-001", "mother-001", "child-001", "child-002", "child-003"]
        );
        assert!(validate_genetic_consistency(&family.individuals).is_valid);
        let result = validate_pedigree(&family.individuals, &family.couples);
        assert_eq!(result.errors, vec!["couple couple-001 spans generations 1 and 0".to_string()]);
    }
}
