//! Sequential positioning
//!
//! Generations are stacked top to bottom at a fixed vertical pitch. Inside a
//! generation a cursor walks left to right: couples first, in input order,
//! then every individual not coupled within this generation. Placement is
//! driven purely by input order; there is no crossing minimisation.

use crate::config::PedigreeConfig;
use crate::model::{ChildrenConnection, GenerationLayout, GenerationSpacing, LineSegment};
use crate::types::{Length, Point};

use super::GenerationPlan;
use super::context::LayoutContext;

/// Assign y positions per generation and x positions per individual.
///
/// Coordinates are relative to the origin; centering happens later.
pub fn calculate_sequential_layout(
    ctx: &mut LayoutContext,
    plans: &mut [GenerationPlan],
    config: &PedigreeConfig,
) {
    let mut current_y = Length::ZERO;

    for plan in plans.iter_mut() {
        plan.layout = GenerationLayout {
            y_position: current_y,
            total_width: Length::ZERO,
            spacing: GenerationSpacing {
                between_individuals: config.symbols.spacing,
                between_couples: config.generations.horizontal_spacing,
            },
        };

        position_individuals_in_generation(ctx, plan, config);
        plan.layout.total_width = generation_width(ctx, plan, config);

        crate::log::trace!(
            level = plan.level,
            y = current_y.raw(),
            width = plan.layout.total_width.raw(),
            "generation positioned"
        );

        current_y += config.generations.vertical_spacing;
    }
}

fn position_individuals_in_generation(
    ctx: &mut LayoutContext,
    plan: &GenerationPlan,
    config: &PedigreeConfig,
) {
    let y = plan.layout.y_position;
    let marriage = config.connections.marriage_line_length;
    let half_symbol = config.symbols.size.half();
    let mut current_x = Length::ZERO;

    for &couple_slot in &plan.couples {
        let Some((first, second)) = ctx.member_slots(&ctx.couples[couple_slot]) else {
            continue;
        };

        let first_pos = Point::new(current_x, y);
        let second_pos = Point::new(current_x + marriage, y);
        ctx.individuals[first].layout.position = first_pos;
        ctx.individuals[second].layout.position = second_pos;

        let couple = &mut ctx.couples[couple_slot];
        let center = first_pos.midpoint(second_pos);
        couple.layout.center_position = center;
        couple.layout.connection_line = LineSegment {
            start: Point::new(first_pos.x + half_symbol, first_pos.y),
            end: Point::new(second_pos.x - half_symbol, second_pos.y),
        };
        couple.layout.children_connection = match couple.children_ids.len() {
            0 => None,
            count => Some(ChildrenConnection {
                drop_point: Point::new(center.x, y + config.connections.child_connection_offset),
                bridge_width: if count > 1 {
                    config.symbols.spacing * (count - 1) as f64
                } else {
                    Length::ZERO
                },
            }),
        };

        current_x += marriage + config.symbols.spacing + config.generations.horizontal_spacing;
    }

    // Only couples of this generation count; a spouse placed elsewhere is single here.
    let coupled: Vec<usize> = plan
        .couples
        .iter()
        .filter_map(|&slot| ctx.member_slots(&ctx.couples[slot]))
        .flat_map(|(a, b)| [a, b])
        .collect();

    for &slot in &plan.members {
        if coupled.contains(&slot) {
            continue;
        }
        ctx.individuals[slot].layout.position = Point::new(current_x, y);
        current_x += config.symbols.size + config.symbols.spacing;
    }
}

/// Right edge of the rightmost symbol in the generation
fn generation_width(ctx: &LayoutContext, plan: &GenerationPlan, config: &PedigreeConfig) -> Length {
    ctx.members(plan)
        .map(|individual| individual.layout.position.x + config.symbols.size)
        .fold(Length::ZERO, Length::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generations::organize_by_generations;
    use crate::model::{Couple, Individual, Sex};

    fn laid_out(individuals: &[Individual], couples: &[Couple]) -> (LayoutContext, Vec<GenerationPlan>) {
        let mut ctx = LayoutContext::new(individuals, couples);
        let mut plans = organize_by_generations(&mut ctx).unwrap();
        calculate_sequential_layout(&mut ctx, &mut plans, &PedigreeConfig::default());
        (ctx, plans)
    }

    fn x_of(ctx: &LayoutContext, id: &str) -> f64 {
        ctx.individual(id).unwrap().layout.position.x.raw()
    }

    #[test]
    fn couples_first_then_singles() {
        let people = [
            Individual::new("single", "S", Sex::Female),
            Individual::new("a1", "A1", Sex::Male),
            Individual::new("a2", "A2", Sex::Female),
            Individual::new("b1", "B1", Sex::Male),
            Individual::new("b2", "B2", Sex::Female),
        ];
        let couples = [Couple::new("a", "a1", "a2"), Couple::new("b", "b1", "b2")];
        let (ctx, plans) = laid_out(&people, &couples);

        // couple pitch: 60 + 80 + 100
        assert_eq!(x_of(&ctx, "a1"), 0.0);
        assert_eq!(x_of(&ctx, "a2"), 60.0);
        assert_eq!(x_of(&ctx, "b1"), 240.0);
        assert_eq!(x_of(&ctx, "b2"), 300.0);
        assert_eq!(x_of(&ctx, "single"), 480.0);
        assert_eq!(plans[0].layout.total_width, Length(520.0));
    }

    #[test]
    fn generations_stack_at_vertical_spacing() {
        let people = [
            Individual::new("p", "P", Sex::Male),
            Individual::new("c", "C", Sex::Male).with_parents(["p"]),
            Individual::new("g", "G", Sex::Male).with_parents(["c"]),
        ];
        let (ctx, plans) = laid_out(&people, &[]);
        let ys: Vec<f64> = plans.iter().map(|p| p.layout.y_position.raw()).collect();
        assert_eq!(ys, vec![0.0, 120.0, 240.0]);
        assert_eq!(ctx.individual("g").unwrap().layout.position.y, Length(240.0));
    }

    #[test]
    fn couple_geometry() {
        let people = [
            Individual::new("f", "F", Sex::Male),
            Individual::new("m", "M", Sex::Female),
            Individual::new("c1", "C1", Sex::Male).with_parents(["f", "m"]),
            Individual::new("c2", "C2", Sex::Male).with_parents(["f", "m"]),
            Individual::new("c3", "C3", Sex::Male).with_parents(["f", "m"]),
        ];
        let couples = [Couple::new("fm", "f", "m").with_children(["c1", "c2", "c3"])];
        let (ctx, _) = laid_out(&people, &couples);
        let couple = ctx.couple("fm").unwrap();

        assert_eq!(couple.layout.center_position, Point::new(Length(30.0), Length(0.0)));
        assert_eq!(couple.layout.connection_line.start, Point::new(Length(20.0), Length(0.0)));
        assert_eq!(couple.layout.connection_line.end, Point::new(Length(40.0), Length(0.0)));
        let children = couple.layout.children_connection.unwrap();
        assert_eq!(children.drop_point, Point::new(Length(30.0), Length(20.0)));
        assert_eq!(children.bridge_width, Length(160.0));
    }

    #[test]
    fn childless_couple_has_no_drop_point() {
        let people = [Individual::new("f", "F", Sex::Male), Individual::new("m", "M", Sex::Female)];
        let (ctx, _) = laid_out(&people, &[Couple::new("fm", "f", "m")]);
        assert!(ctx.couple("fm").unwrap().layout.children_connection.is_none());
    }

    #[test]
    fn single_child_bridge_width_is_zero() {
        let people = [
            Individual::new("f", "F", Sex::Male),
            Individual::new("m", "M", Sex::Female),
            Individual::new("c", "C", Sex::Male).with_parents(["f", "m"]),
        ];
        let (ctx, _) = laid_out(&people, &[Couple::new("fm", "f", "m").with_children(["c"])]);
        let children = ctx.couple("fm").unwrap().layout.children_connection.unwrap();
        assert_eq!(children.bridge_width, Length::ZERO);
    }
}
