//! Genetic symbol rules
//!
//! Standard pedigree notation: square for males, circle otherwise; filled
//! when affected; vital status passed through so the renderer can strike
//! deceased individuals through.

use crate::model::{GeneticSymbol, HealthStatus, Individual, Sex, SymbolFill, SymbolShape};

/// Map an individual's sex and medical status to its drawable symbol.
///
/// Pure: the shape depends only on sex, the fill only on health status and
/// the status only on life status.
pub fn generate_genetic_symbol(individual: &Individual) -> GeneticSymbol {
    let shape = match individual.sex {
        Sex::Male => SymbolShape::Square,
        Sex::Female | Sex::Unknown => SymbolShape::Circle,
    };
    let fill = match individual.medical_status.health_status {
        HealthStatus::Affected => SymbolFill::Filled,
        HealthStatus::Healthy | HealthStatus::Unknown => SymbolFill::Empty,
    };
    GeneticSymbol {
        shape,
        fill,
        status: individual.medical_status.life_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LifeStatus;

    #[test]
    fn shape_follows_sex() {
        let male = Individual::new("m", "M", Sex::Male);
        let female = Individual::new("f", "F", Sex::Female);
        let unknown = Individual::new("u", "U", Sex::Unknown);
        assert_eq!(generate_genetic_symbol(&male).shape, SymbolShape::Square);
        assert_eq!(generate_genetic_symbol(&female).shape, SymbolShape::Circle);
        assert_eq!(generate_genetic_symbol(&unknown).shape, SymbolShape::Circle);
    }

    #[test]
    fn fill_follows_health_status_only() {
        for sex in [Sex::Male, Sex::Female, Sex::Unknown] {
            let affected = Individual::new("a", "A", sex).with_health(HealthStatus::Affected);
            let healthy = Individual::new("h", "H", sex).with_health(HealthStatus::Healthy);
            let unknown = Individual::new("u", "U", sex);
            assert_eq!(generate_genetic_symbol(&affected).fill, SymbolFill::Filled);
            assert_eq!(generate_genetic_symbol(&healthy).fill, SymbolFill::Empty);
            assert_eq!(generate_genetic_symbol(&unknown).fill, SymbolFill::Empty);
        }
    }

    #[test]
    fn status_mirrors_life_status() {
        for life in [LifeStatus::Alive, LifeStatus::Deceased, LifeStatus::Unknown] {
            let ind = Individual::new("x", "X", Sex::Male).with_life(life);
            let symbol = generate_genetic_symbol(&ind);
            assert_eq!(symbol.status, life);
            assert_eq!(symbol.is_struck_through(), life == LifeStatus::Deceased);
        }
    }

    #[test]
    fn identical_input_gives_identical_symbol() {
        let ind = Individual::new("x", "X", Sex::Female)
            .with_health(HealthStatus::Affected)
            .with_life(LifeStatus::Deceased);
        assert_eq!(generate_genetic_symbol(&ind), generate_genetic_symbol(&ind.clone()));
    }
}
