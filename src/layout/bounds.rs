//! Bounds, centering and canvas sizing

use crate::config::PedigreeConfig;
use crate::types::{Bounds, Length, Offset, Point, Size};

use super::GenerationPlan;
use super::context::LayoutContext;

/// Tightest box around every placed symbol footprint.
///
/// An empty tree yields a zero-size box at the origin.
pub fn calculate_canvas_bounds(ctx: &LayoutContext, plans: &[GenerationPlan], symbol_size: Length) -> Bounds {
    let mut bounds = Bounds::new();
    for plan in plans {
        for individual in ctx.members(plan) {
            bounds.expand_rect(individual.layout.position, Size::new(symbol_size, symbol_size));
        }
    }
    if bounds.is_empty() {
        Bounds::at(Point::ORIGIN)
    } else {
        bounds
    }
}

/// Canvas that fits the tree plus padding on every side
pub fn canvas_size(bounds: &Bounds, config: &PedigreeConfig) -> Size<Length> {
    let padding = config.canvas.padding * 2.0;
    Size::new(bounds.width() + padding, bounds.height() + padding)
}

/// Offset that centres `bounds` inside its padded canvas
pub fn centering_offset(bounds: &Bounds, config: &PedigreeConfig) -> Offset<Length> {
    let canvas = canvas_size(bounds, config);
    Offset::new(
        (canvas.w - bounds.width()) / 2.0 - bounds.min_x(),
        (canvas.h - bounds.height()) / 2.0 - bounds.min_y(),
    )
}

/// Translate every generation, individual, couple centre, marriage line and
/// drop point by the centering offset. Returns the offset applied.
pub fn center_tree(
    ctx: &mut LayoutContext,
    plans: &mut [GenerationPlan],
    bounds: &Bounds,
    config: &PedigreeConfig,
) -> Offset<Length> {
    let offset = centering_offset(bounds, config);

    for plan in plans.iter_mut() {
        plan.layout.y_position += offset.dy;

        for &slot in &plan.members {
            ctx.individuals[slot].layout.position += offset;
        }

        for &slot in &plan.couples {
            let layout = &mut ctx.couples[slot].layout;
            layout.center_position += offset;
            layout.connection_line.start += offset;
            layout.connection_line.end += offset;
            if let Some(children) = layout.children_connection.as_mut() {
                children.drop_point += offset;
            }
        }
    }

    crate::log::debug!(dx = offset.dx.raw(), dy = offset.dy.raw(), "tree centered");
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generations::organize_by_generations;
    use crate::layout::position::calculate_sequential_layout;
    use crate::model::{Couple, Individual, Sex};

    fn family() -> (LayoutContext, Vec<GenerationPlan>, PedigreeConfig) {
        let people = [
            Individual::new("f", "F", Sex::Male),
            Individual::new("m", "M", Sex::Female),
            Individual::new("c1", "C1", Sex::Male).with_parents(["f", "m"]),
            Individual::new("c2", "C2", Sex::Female).with_parents(["f", "m"]),
            Individual::new("c3", "C3", Sex::Male).with_parents(["f", "m"]),
        ];
        let couples = [Couple::new("fm", "f", "m").with_children(["c1", "c2", "c3"])];
        let config = PedigreeConfig::default();
        let mut ctx = LayoutContext::new(&people, &couples);
        let mut plans = organize_by_generations(&mut ctx).unwrap();
        calculate_sequential_layout(&mut ctx, &mut plans, &config);
        (ctx, plans, config)
    }

    #[test]
    fn preliminary_bounds_cover_footprints() {
        let (ctx, plans, config) = family();
        let bounds = calculate_canvas_bounds(&ctx, &plans, config.symbols.size);
        assert_eq!(bounds.min, Point::new(Length(0.0), Length(0.0)));
        assert_eq!(bounds.max, Point::new(Length(280.0), Length(160.0)));
        assert_eq!(canvas_size(&bounds, &config), Size::new(Length(380.0), Length(260.0)));
    }

    #[test]
    fn centering_moves_everything_by_padding() {
        let (mut ctx, mut plans, config) = family();
        let bounds = calculate_canvas_bounds(&ctx, &plans, config.symbols.size);
        let offset = center_tree(&mut ctx, &mut plans, &bounds, &config);

        assert_eq!(offset, Offset::new(Length(50.0), Length(50.0)));
        assert_eq!(plans[0].layout.y_position, Length(50.0));
        assert_eq!(plans[1].layout.y_position, Length(170.0));
        let couple = ctx.couple("fm").unwrap();
        assert_eq!(couple.layout.center_position, Point::new(Length(80.0), Length(50.0)));
        assert_eq!(
            couple.layout.children_connection.unwrap().drop_point,
            Point::new(Length(80.0), Length(70.0))
        );

        let after = calculate_canvas_bounds(&ctx, &plans, config.symbols.size);
        assert_eq!(after.min, Point::new(Length(50.0), Length(50.0)));
        assert_eq!(after.size(), bounds.size());
    }

    #[test]
    fn empty_tree_has_zero_bounds() {
        let ctx = LayoutContext::default();
        let bounds = calculate_canvas_bounds(&ctx, &[], Length(40.0));
        assert_eq!(bounds, Bounds::at(Point::ORIGIN));
        assert_eq!(
            canvas_size(&bounds, &PedigreeConfig::default()),
            Size::new(Length(100.0), Length(100.0))
        );
    }
}
