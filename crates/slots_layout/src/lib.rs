//! A slot-row layout: a flexible main content slot flanked by capped ordered
//! buckets of leading/trailing auxiliary slots, re-laid out reactively.
//!
//! The layout owns no rendering; it consumes a [`scene::Scene`] (item tree,
//! anchors, change notifications) and writes anchors and implicit sizes back
//! into it. Change notifications only mark dirty bits; [`SlotsLayout::flush`]
//! runs the staged recompute pipeline once per tick, so a burst of mutations
//! coalesces into a single pass.

use anyhow::Error;
use log::{debug, trace, warn};
use scene::{AnchorEdge, AnchorLine, GridUnit, ItemEvent, ItemKey, PropertyChange, Scene};
use smallvec::SmallVec;
use std::collections::HashMap;

mod attached;
pub mod labels;
mod packing;
mod padding;
mod row;

pub use attached::{SlotConfig, SlotPosition};
pub use padding::Padding;

/// Implicit container width when the container has no parent, in grid units.
pub(crate) const IMPLICIT_WIDTH_GU: f32 = 40.0;
/// Default container leading/trailing padding, in grid units.
pub(crate) const SIDE_MARGIN_GU: f32 = 1.0;
/// Top/bottom padding used while centering with a tall auxiliary slot.
pub(crate) const TOP_BOTTOM_MARGIN_TALL_GU: f32 = 2.0;
/// Top/bottom padding used otherwise.
pub(crate) const TOP_BOTTOM_MARGIN_SHORT_GU: f32 = 1.0;
/// Auxiliary-slot height above which the tall top/bottom padding kicks in.
pub(crate) const TALL_SLOT_THRESHOLD_GU: f32 = 4.0;

const MAX_SETTLE_PASSES: usize = 32;

/// Pending-recompute flags. Multiple flags can be combined; `flush` runs the
/// stages in dependency order and each stage marks its dependents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DirtyKind(u32);

impl DirtyKind {
    /// No pending work.
    pub const NONE: DirtyKind = DirtyKind(0);
    /// Grid-unit value changed: re-derive every auto padding.
    pub const UNITS: DirtyKind = DirtyKind(1 << 0);
    /// Container height changed: refresh the cached-height bookkeeping.
    pub const CACHED_HEIGHT: DirtyKind = DirtyKind(1 << 1);
    /// Main slot height changed.
    pub const MAIN_HEIGHT: DirtyKind = DirtyKind(1 << 2);
    /// An auxiliary slot height changed: recompute the bucket max height.
    pub const SLOT_HEIGHTS: DirtyKind = DirtyKind(1 << 3);
    /// Recompute the implicit container size.
    pub const SIZE: DirtyKind = DirtyKind(1 << 4);
    /// Re-run classification, main-slot sizing and anchor chaining.
    pub const CHAIN: DirtyKind = DirtyKind(1 << 5);

    /// Combine two dirty kinds.
    pub fn or(self, other: DirtyKind) -> DirtyKind {
        DirtyKind(self.0 | other.0)
    }

    /// Check if all flags in `other` are present.
    pub fn contains(self, other: DirtyKind) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// How the slots are positioned vertically inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPositioning {
    /// The main slot is taller than every auxiliary slot: pin slots to the
    /// top edge.
    AlignToTop,
    /// Otherwise (including equal heights): center slots vertically.
    CenterVertically,
}

/// The slot-row layout container.
///
/// Construction leaves the layout in the uninitialized state; every recompute
/// entry point is a no-op until [`SlotsLayout::complete`] is called.
pub struct SlotsLayout {
    item: ItemKey,
    main_slot: Option<ItemKey>,
    /// Attached configuration per child, registered on insert and released on
    /// removal. Also the subscription registry: events from unregistered
    /// items are ignored.
    slots: HashMap<ItemKey, SlotConfig>,
    padding: Padding,
    units: GridUnit,
    max_leading_slots: usize,
    max_trailing_slots: usize,
    max_slots_height: f32,
    main_slot_height: f32,
    cached_height: f32,
    ready: bool,
    dirty: DirtyKind,
    leading: SmallVec<ItemKey, 2>,
    trailing: SmallVec<ItemKey, 2>,
    slots_width: f32,
    /// Telemetry: completed (non-skipped) chain passes.
    relayout_passes: u64,
}

impl SlotsLayout {
    /// Create the layout and its container item, optionally under a parent.
    pub fn new(scene: &mut Scene, parent: Option<ItemKey>) -> Self {
        let units = GridUnit::default();
        Self {
            item: scene.create_item(parent),
            main_slot: None,
            slots: HashMap::new(),
            padding: Padding::new(units),
            units,
            max_leading_slots: 1,
            max_trailing_slots: 2,
            max_slots_height: 0.0,
            main_slot_height: 0.0,
            cached_height: -1.0,
            ready: false,
            dirty: DirtyKind::NONE,
            leading: SmallVec::new(),
            trailing: SmallVec::new(),
            slots_width: 0.0,
            relayout_passes: 0,
        }
    }

    /// The container item in the scene.
    pub fn item(&self) -> ItemKey {
        self.item
    }

    pub fn main_slot(&self) -> Option<ItemKey> {
        self.main_slot
    }

    pub fn padding(&self) -> &Padding {
        &self.padding
    }

    pub fn grid_unit(&self) -> GridUnit {
        self.units
    }

    /// The leading bucket of the last completed pass, in layout order.
    pub fn leading_slots(&self) -> &[ItemKey] {
        &self.leading
    }

    /// The trailing bucket of the last completed pass, in layout order.
    pub fn trailing_slots(&self) -> &[ItemKey] {
        &self.trailing
    }

    /// Width consumed by the auxiliary slots of the last completed pass,
    /// their own paddings included.
    pub fn slots_width(&self) -> f32 {
        self.slots_width
    }

    /// Pending dirty flags (for inspection in tests).
    pub fn dirty(&self) -> DirtyKind {
        self.dirty
    }

    /// Telemetry: number of chain passes that ran to completion.
    pub fn relayout_passes(&self) -> u64 {
        self.relayout_passes
    }

    // --- child management --------------------------------------------------

    /// Place a child into the layout as an auxiliary slot: reparent it under
    /// the container and register its attached configuration.
    pub fn insert_slot(&mut self, scene: &mut Scene, child: ItemKey) -> Result<(), Error> {
        scene.reparent(child, Some(self.item))?;
        self.slots.entry(child).or_insert_with(|| SlotConfig::new(self.units));
        self.mark_dirty(DirtyKind::SLOT_HEIGHTS);
        Ok(())
    }

    /// Release a child: drop its configuration record so no further events
    /// from it are acted upon. The caller decides what happens to the item.
    pub fn remove_slot(&mut self, child: ItemKey) {
        if self.slots.remove(&child).is_none() {
            debug!("remove_slot called for unregistered child {child:?}");
        }
        if self.main_slot == Some(child) {
            self.main_slot = None;
            self.mark_dirty(DirtyKind::MAIN_HEIGHT);
        } else {
            self.mark_dirty(DirtyKind::SLOT_HEIGHTS);
        }
    }

    /// Designate the flexible content slot. The item is reparented under the
    /// container and gets attached configuration like any other child, but it
    /// is never classified into the buckets.
    pub fn set_main_slot(&mut self, scene: &mut Scene, child: ItemKey) -> Result<(), Error> {
        scene.reparent(child, Some(self.item))?;
        self.slots.entry(child).or_insert_with(|| SlotConfig::new(self.units));
        if self.main_slot != Some(child) {
            self.main_slot = Some(child);
            self.mark_dirty(DirtyKind::MAIN_HEIGHT);
        }
        Ok(())
    }

    // --- attached configuration --------------------------------------------

    pub fn slot_config(&self, child: ItemKey) -> Option<&SlotConfig> {
        self.slots.get(&child)
    }

    pub fn set_slot_position(&mut self, child: ItemKey, position: SlotPosition) {
        let Some(config) = self.slots.get_mut(&child) else {
            warn!("No slot configuration for {child:?}; position not set");
            return;
        };
        if config.set_position(position) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_slot_leading_padding(&mut self, child: ItemKey, padding: f32) {
        let Some(config) = self.slots.get_mut(&child) else {
            warn!("No slot configuration for {child:?}; padding not set");
            return;
        };
        if config.set_leading_padding(padding) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_slot_trailing_padding(&mut self, child: ItemKey, padding: f32) {
        let Some(config) = self.slots.get_mut(&child) else {
            warn!("No slot configuration for {child:?}; padding not set");
            return;
        };
        if config.set_trailing_padding(padding) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_slot_override_vertical_positioning(&mut self, child: ItemKey, value: bool) {
        let Some(config) = self.slots.get_mut(&child) else {
            warn!("No slot configuration for {child:?}; override not set");
            return;
        };
        if config.set_override_vertical_positioning(value) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    // --- container configuration -------------------------------------------

    pub fn set_padding_leading(&mut self, value: f32) {
        if self.padding.set_leading(value) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_padding_trailing(&mut self, value: f32) {
        if self.padding.set_trailing(value) {
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_padding_top(&mut self, value: f32) {
        if self.padding.set_top(value) {
            self.mark_dirty(DirtyKind::SLOT_HEIGHTS);
        }
    }

    pub fn set_padding_bottom(&mut self, value: f32) {
        if self.padding.set_bottom(value) {
            self.mark_dirty(DirtyKind::SLOT_HEIGHTS);
        }
    }

    pub fn set_max_leading_slots(&mut self, count: usize) {
        if self.max_leading_slots != count {
            self.max_leading_slots = count;
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    pub fn set_max_trailing_slots(&mut self, count: usize) {
        if self.max_trailing_slots != count {
            self.max_trailing_slots = count;
            self.mark_dirty(DirtyKind::CHAIN);
        }
    }

    /// Install a new grid-unit conversion value.
    pub fn set_grid_unit(&mut self, units: GridUnit) {
        if self.units != units {
            self.units = units;
            self.mark_dirty(DirtyKind::UNITS);
        }
    }

    // --- reactive machinery ------------------------------------------------

    /// Finish construction: transition Uninitialized → Ready, seed the height
    /// bookkeeping and run the first pass.
    pub fn complete(&mut self, scene: &mut Scene) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.mark_dirty(DirtyKind::MAIN_HEIGHT.or(DirtyKind::SLOT_HEIGHTS));
        self.flush(scene);
    }

    fn mark_dirty(&mut self, kind: DirtyKind) {
        self.dirty = self.dirty.or(kind);
    }

    /// Route one scene change notification into dirty flags. Events about
    /// items this layout does not own are ignored.
    pub fn apply_event(&mut self, scene: &Scene, event: &ItemEvent) {
        if event.item == self.item {
            match event.change {
                PropertyChange::Width => self.mark_dirty(DirtyKind::CHAIN),
                PropertyChange::Height => self.mark_dirty(DirtyKind::CACHED_HEIGHT),
                PropertyChange::Visible => self.mark_dirty(DirtyKind::CHAIN),
                PropertyChange::Parent => self.mark_dirty(DirtyKind::SIZE),
                PropertyChange::Opacity | PropertyChange::BaselineOffset => {}
            }
        } else if scene.parent(self.item) == Some(event.item) {
            if event.change == PropertyChange::Width {
                self.mark_dirty(DirtyKind::SIZE);
            }
        } else if self.main_slot == Some(event.item) {
            match event.change {
                PropertyChange::Height => self.mark_dirty(DirtyKind::MAIN_HEIGHT),
                PropertyChange::Visible => self.mark_dirty(DirtyKind::CHAIN),
                _ => {}
            }
        } else if self.slots.contains_key(&event.item) {
            match event.change {
                PropertyChange::Width => self.mark_dirty(DirtyKind::CHAIN),
                PropertyChange::Height => self.mark_dirty(DirtyKind::SLOT_HEIGHTS),
                PropertyChange::Visible => self.mark_dirty(DirtyKind::CHAIN),
                _ => {}
            }
        }
    }

    /// Run the pending stages once, in dependency order. A no-op while
    /// uninitialized or when nothing is dirty.
    pub fn flush(&mut self, scene: &mut Scene) {
        if !self.ready {
            self.dirty = DirtyKind::NONE;
            return;
        }
        let mut dirty = std::mem::replace(&mut self.dirty, DirtyKind::NONE);
        if dirty.is_empty() {
            return;
        }
        trace!("flush: dirty={dirty:?}");

        if dirty.contains(DirtyKind::UNITS) {
            self.sync_grid_unit();
            dirty = dirty
                .or(DirtyKind::MAIN_HEIGHT)
                .or(DirtyKind::SLOT_HEIGHTS)
                .or(DirtyKind::SIZE)
                .or(DirtyKind::CHAIN);
        }
        if dirty.contains(DirtyKind::CACHED_HEIGHT) {
            let height = scene.height(self.item);
            if self.cached_height != height {
                // a height reappearing from zero is the one height change
                // that re-triggers a full pass
                if self.cached_height == 0.0 {
                    dirty = dirty.or(DirtyKind::CHAIN);
                }
                self.cached_height = height;
            }
        }
        if dirty.contains(DirtyKind::MAIN_HEIGHT) {
            self.main_slot_height = self.main_slot.map(|m| scene.height(m)).unwrap_or(0.0);
            dirty = dirty.or(DirtyKind::SIZE);
        }
        if dirty.contains(DirtyKind::SLOT_HEIGHTS) {
            self.update_slots_bbox_height(scene);
            dirty = dirty.or(DirtyKind::SIZE);
        }
        if dirty.contains(DirtyKind::SIZE) {
            self.update_top_bottom_padding_if_needed();
            self.update_size(scene);
            dirty = dirty.or(DirtyKind::CHAIN);
        }
        if dirty.contains(DirtyKind::CHAIN) {
            self.relayout(scene);
        }
    }

    /// Convenience for scenes driven by a single layout: pump event routing
    /// and flushing to a fixed point.
    pub fn settle(&mut self, scene: &mut Scene) {
        for _ in 0..MAX_SETTLE_PASSES {
            for event in scene.take_events() {
                self.apply_event(scene, &event);
            }
            if self.dirty.is_empty() && !scene.has_pending_events() {
                return;
            }
            self.flush(scene);
        }
        warn!("Slot layout did not settle after {MAX_SETTLE_PASSES} passes");
    }

    // --- recompute stages --------------------------------------------------

    /// AlignToTop only when the main slot is strictly taller than every
    /// auxiliary slot; equal heights center.
    pub fn vertical_positioning_mode(&self) -> VerticalPositioning {
        if self.main_slot_height > self.max_slots_height {
            VerticalPositioning::AlignToTop
        } else {
            VerticalPositioning::CenterVertically
        }
    }

    fn sync_grid_unit(&mut self) {
        for config in self.slots.values_mut() {
            config.sync_grid_unit(self.units);
        }
        self.padding.set_leading_auto(self.units.gu(SIDE_MARGIN_GU));
        self.padding.set_trailing_auto(self.units.gu(SIDE_MARGIN_GU));
    }

    /// Max height of the auxiliary slots that take part in the default
    /// vertical positioning. Visibility does not matter here; it only affects
    /// packing.
    fn update_slots_bbox_height(&mut self, scene: &Scene) {
        let mut max_height: f32 = 0.0;
        for &child in scene.children(self.item) {
            if Some(child) == self.main_slot {
                continue;
            }
            let Some(config) = self.slots.get(&child) else {
                warn!("Child {child:?} has no slot configuration; ignoring its height");
                continue;
            };
            if !config.override_vertical_positioning() {
                max_height = max_height.max(scene.height(child));
            }
        }
        self.max_slots_height = max_height;
    }

    fn update_top_bottom_padding_if_needed(&mut self) {
        let tall = self.vertical_positioning_mode() == VerticalPositioning::CenterVertically
            && self.max_slots_height > self.units.gu(TALL_SLOT_THRESHOLD_GU);
        let margin = self.units.gu(if tall {
            TOP_BOTTOM_MARGIN_TALL_GU
        } else {
            TOP_BOTTOM_MARGIN_SHORT_GU
        });
        self.padding.set_top_auto(margin);
        self.padding.set_bottom_auto(margin);
    }

    fn update_size(&mut self, scene: &mut Scene) {
        let implicit_width = scene
            .parent(self.item)
            .map(|p| scene.width(p))
            .unwrap_or_else(|| self.units.gu(IMPLICIT_WIDTH_GU));
        scene.set_implicit_width(self.item, implicit_width);
        scene.set_implicit_height(
            self.item,
            self.max_slots_height.max(self.main_slot_height)
                + self.padding.top()
                + self.padding.bottom(),
        );
    }

    /// The full pass: classify, size the main slot, chain the row.
    fn relayout(&mut self, scene: &mut Scene) {
        if scene.width(self.item) <= 0.0
            || scene.height(self.item) <= 0.0
            || !scene.visible(self.item)
            || scene.opacity(self.item) == 0.0
        {
            trace!("relayout skipped: degenerate or invisible container");
            return;
        }
        self.relayout_passes += 1;

        let packed = packing::pack_slots(
            scene,
            self.item,
            self.main_slot,
            &self.slots,
            self.max_leading_slots,
            self.max_trailing_slots,
        );
        self.slots_width = packed.width;

        let mut items: SmallVec<ItemKey, 4> = SmallVec::new();
        items.extend(packed.leading.iter().copied());
        if let Some(main) = self.main_slot {
            let Some(config) = self.slots.get(&main) else {
                warn!("Main slot {main:?} has no slot configuration; aborting the pass");
                return;
            };
            scene.set_implicit_width(
                main,
                scene.width(self.item)
                    - packed.width
                    - config.leading_padding()
                    - config.trailing_padding()
                    - self.padding.leading()
                    - self.padding.trailing(),
            );
            items.push(main);
        }
        items.extend(packed.trailing.iter().copied());

        self.leading = packed.leading;
        self.trailing = packed.trailing;

        let params = row::RowParams {
            container: self.item,
            slots: &self.slots,
            mode: self.vertical_positioning_mode(),
            padding_top: self.padding.top(),
            padding_bottom: self.padding.bottom(),
        };
        row::layout_in_row(
            scene,
            &params,
            AnchorLine::new(self.item, AnchorEdge::Left),
            self.padding.leading(),
            &items,
        );
    }
}
