//! Family connection routing
//!
//! Runs after centering so every path is built from final coordinates.
//! One marriage line per couple; then, per couple with children, either a
//! single direct drop (one child) or the sibship pattern: a drop from the
//! couple to the bridge height, one horizontal sibling bridge spanning the
//! outermost children, and one vertical line down to each child.

use crate::config::PedigreeConfig;
use crate::model::{
    ConnectionKind, ConnectionPath, ConnectionTarget, Couple, FamilyConnection, Individual,
    StrokeStyle,
};
use crate::types::{Point, Pt};

use super::GenerationPlan;
use super::context::LayoutContext;
use super::defaults;

/// Emits connections with a shared stroke style
struct ConnectionBuilder {
    style: StrokeStyle,
    connections: Vec<FamilyConnection>,
}

impl ConnectionBuilder {
    fn new(config: &PedigreeConfig) -> Self {
        Self {
            style: StrokeStyle {
                stroke: defaults::CONNECTION_STROKE.to_string(),
                stroke_width: config.connections.stroke_width,
                stroke_dasharray: None,
            },
            connections: Vec::new(),
        }
    }

    fn push(
        &mut self,
        id: String,
        kind: ConnectionKind,
        from_id: &str,
        to: ConnectionTarget,
        points: Vec<Pt>,
    ) {
        self.connections.push(FamilyConnection {
            id,
            kind,
            from_id: from_id.to_string(),
            to,
            path: ConnectionPath {
                points,
                style: self.style.clone(),
            },
        });
    }
}

pub fn calculate_family_connections(
    ctx: &LayoutContext,
    plans: &[GenerationPlan],
    config: &PedigreeConfig,
) -> Vec<FamilyConnection> {
    let mut builder = ConnectionBuilder::new(config);

    for plan in plans {
        for &slot in &plan.couples {
            let couple = &ctx.couples[slot];
            builder.push(
                format!("marriage-{}", couple.id),
                ConnectionKind::Marriage,
                &couple.individual1_id,
                ConnectionTarget::One(couple.individual2_id.clone()),
                vec![couple.layout.connection_line.start, couple.layout.connection_line.end],
            );
        }
    }

    for plan in plans {
        for &slot in &plan.couples {
            let couple = &ctx.couples[slot];
            if !couple.children_ids.is_empty() {
                create_parent_child_connections(&mut builder, ctx, couple, config);
            }
        }
    }

    crate::log::debug!(connections = builder.connections.len(), "family connections routed");
    builder.connections
}

fn create_parent_child_connections(
    builder: &mut ConnectionBuilder,
    ctx: &LayoutContext,
    couple: &Couple,
    config: &PedigreeConfig,
) {
    let mut children: Vec<&Individual> = ctx
        .child_slots(couple)
        .into_iter()
        .map(|slot| &ctx.individuals[slot])
        .collect();
    let Some(drop_point) = couple.layout.children_connection.map(|c| c.drop_point) else {
        return;
    };

    match children.as_slice() {
        [] => {
            crate::log::warn!(couple = %couple.id, "no child of couple resolves; nothing routed");
        }
        [child] => {
            builder.push(
                format!("parent-child-{}-{}", couple.id, child.id),
                ConnectionKind::ParentChild,
                &couple.id,
                ConnectionTarget::One(child.id.clone()),
                vec![drop_point, child.inner_edge()],
            );
        }
        _ => {
            // Bridge extent comes from where the children actually landed.
            children.sort_by(|a, b| {
                a.layout.position.x.raw().total_cmp(&b.layout.position.x.raw())
            });
            let bridge_y = drop_point.y + config.connections.child_connection_offset;
            let (Some(first), Some(last)) = (children.first(), children.last()) else {
                return;
            };
            let bridge_start = Point::new(first.inner_edge().x, bridge_y);
            let bridge_end = Point::new(last.inner_edge().x, bridge_y);

            builder.push(
                format!("parent-bridge-{}", couple.id),
                ConnectionKind::ParentChild,
                &couple.id,
                ConnectionTarget::Many(couple.children_ids.clone()),
                vec![drop_point, Point::new(drop_point.x, bridge_y)],
            );
            builder.push(
                format!("sibling-bridge-{}", couple.id),
                ConnectionKind::SiblingBridge,
                &couple.id,
                ConnectionTarget::Many(couple.children_ids.clone()),
                vec![bridge_start, bridge_end],
            );
            for child in &children {
                let edge = child.inner_edge();
                builder.push(
                    format!("bridge-child-{}-{}", couple.id, child.id),
                    ConnectionKind::ParentChild,
                    &couple.id,
                    ConnectionTarget::One(child.id.clone()),
                    vec![Point::new(edge.x, bridge_y), edge],
                );
            }
        }
    }
}
