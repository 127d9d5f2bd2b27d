//! Row anchor-chaining: pin an ordered list of items left to right, and give
//! each one its vertical anchor unless it opts out.

use crate::VerticalPositioning;
use crate::attached::SlotConfig;
use log::warn;
use scene::{AnchorEdge, AnchorLine, ItemKey, Scene};
use std::collections::HashMap;

/// Inputs shared by every item of one chaining pass.
pub(crate) struct RowParams<'a> {
    pub container: ItemKey,
    pub slots: &'a HashMap<ItemKey, SlotConfig>,
    pub mode: VerticalPositioning,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

/// Anchor each item's left edge to the right edge of its predecessor (plus
/// the two paddings meeting between them); the first item goes to
/// `start_line` plus `start_margin` and its own leading padding.
pub(crate) fn layout_in_row(
    scene: &mut Scene,
    params: &RowParams<'_>,
    start_line: AnchorLine,
    start_margin: f32,
    items: &[ItemKey],
) {
    for (i, &item) in items.iter().enumerate() {
        let Some(config) = params.slots.get(&item) else {
            warn!("Item {item:?} has no slot configuration; not anchoring it");
            continue;
        };

        if !config.override_vertical_positioning() {
            apply_vertical_positioning(scene, params, item);
        }

        if i == 0 {
            scene.anchor_left(item, start_line, config.leading_padding() + start_margin);
        } else {
            let previous = items[i - 1];
            let Some(previous_config) = params.slots.get(&previous) else {
                warn!("Item {previous:?} has no slot configuration; not anchoring its successor");
                continue;
            };
            scene.anchor_left(
                item,
                AnchorLine::new(previous, AnchorEdge::Right),
                previous_config.trailing_padding() + config.leading_padding(),
            );
        }
    }
}

/// Top-anchor or vertically center one item, clearing the anchor of the mode
/// we are transitioning away from.
fn apply_vertical_positioning(scene: &mut Scene, params: &RowParams<'_>, item: ItemKey) {
    match params.mode {
        VerticalPositioning::AlignToTop => {
            scene.reset_vertical_center(item);
            scene.anchor_top(
                item,
                AnchorLine::new(params.container, AnchorEdge::Top),
                params.padding_top,
            );
        }
        VerticalPositioning::CenterVertically => {
            scene.reset_top(item);
            // top and bottom paddings may differ, shifting the center
            scene.anchor_vertical_center(
                item,
                AnchorLine::new(params.container, AnchorEdge::VerticalCenter),
                (params.padding_top - params.padding_bottom) / 2.0,
            );
        }
    }
}
