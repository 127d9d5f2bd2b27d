//! Slot classification and packing: the single left-to-right scan that
//! buckets children into the leading/trailing sequences and accumulates the
//! width they consume.

use crate::attached::{SlotConfig, SlotPosition};
use log::warn;
use scene::{ItemKey, Scene};
use smallvec::SmallVec;
use std::collections::HashMap;

/// The rebuilt buckets of one packing pass.
///
/// `width` is the sum over included slots of (slot width + its own leading
/// and trailing padding). The buckets are rebuilt from scratch on every pass.
#[derive(Debug, Default)]
pub(crate) struct PackedSlots {
    pub leading: SmallVec<ItemKey, 2>,
    pub trailing: SmallVec<ItemKey, 2>,
    pub width: f32,
}

/// Scan the container's children in declaration order and bucket them.
///
/// The main slot is skipped (it is sized separately), hidden children are
/// skipped entirely, children without a configuration record are skipped with
/// a diagnostic, and children beyond a side's capacity are skipped with a
/// diagnostic. Within a side, `*Beginning` slots keep their scan order at the
/// front, `*End` slots keep theirs at the back, and plain slots land between
/// the two groups.
pub(crate) fn pack_slots(
    scene: &Scene,
    container: ItemKey,
    main_slot: Option<ItemKey>,
    slots: &HashMap<ItemKey, SlotConfig>,
    max_leading: usize,
    max_trailing: usize,
) -> PackedSlots {
    let mut packed = PackedSlots::default();
    let mut leading_beginning = 0usize;
    let mut leading_end = 0usize;
    let mut trailing_beginning = 0usize;
    let mut trailing_end = 0usize;

    for &child in scene.children(container) {
        if Some(child) == main_slot {
            continue;
        }
        if !scene.visible(child) {
            continue;
        }
        let Some(config) = slots.get(&child) else {
            warn!("Child {child:?} has no slot configuration; skipping it");
            continue;
        };

        let position = config.position();
        if position.is_leading() {
            if packed.leading.len() >= max_leading {
                warn!(
                    "This layout only allows up to {max_leading} leading slots; \
                     ignoring the extra slot {child:?}"
                );
                continue;
            }
            let index = match position {
                SlotPosition::LeadingBeginning => {
                    let index = leading_beginning;
                    leading_beginning += 1;
                    index
                }
                SlotPosition::Leading => packed.leading.len() - leading_end,
                _ => {
                    leading_end += 1;
                    packed.leading.len()
                }
            };
            packed.leading.insert(index, child);
        } else {
            if packed.trailing.len() >= max_trailing {
                warn!(
                    "This layout only allows up to {max_trailing} trailing slots; \
                     ignoring the extra slot {child:?}"
                );
                continue;
            }
            let index = match position {
                SlotPosition::TrailingBeginning => {
                    let index = trailing_beginning;
                    trailing_beginning += 1;
                    index
                }
                SlotPosition::Trailing => packed.trailing.len() - trailing_end,
                _ => {
                    trailing_end += 1;
                    packed.trailing.len()
                }
            };
            packed.trailing.insert(index, child);
        }

        packed.width += scene.width(child) + config.leading_padding() + config.trailing_padding();
    }

    packed
}
