//! Per-slot attached configuration.
//!
//! Every child placed in a [`SlotsLayout`](crate::SlotsLayout) gets a
//! `SlotConfig` record keyed by its item, created when the child is inserted
//! and dropped when it is removed. This replaces implicit attached-object
//! lookups with an explicit child-to-record mapping.

use scene::GridUnit;

/// Default leading/trailing padding of a slot, in grid units.
pub(crate) const SLOT_SIDE_MARGIN_GU: f32 = 1.0;

/// Where a slot goes relative to the main slot, with sub-ordering inside
/// its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPosition {
    LeadingBeginning,
    Leading,
    LeadingEnd,
    TrailingBeginning,
    #[default]
    Trailing,
    TrailingEnd,
}

impl SlotPosition {
    #[inline]
    pub fn is_leading(self) -> bool {
        matches!(
            self,
            SlotPosition::LeadingBeginning | SlotPosition::Leading | SlotPosition::LeadingEnd
        )
    }
}

/// Attached metadata for one slot.
///
/// The paddings default to a grid-unit-derived constant and keep tracking
/// grid-unit changes until explicitly overridden, independently per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotConfig {
    position: SlotPosition,
    leading_padding: f32,
    trailing_padding: f32,
    leading_padding_set: bool,
    trailing_padding_set: bool,
    override_vertical_positioning: bool,
}

impl SlotConfig {
    pub(crate) fn new(units: GridUnit) -> Self {
        let side = units.gu(SLOT_SIDE_MARGIN_GU);
        Self {
            position: SlotPosition::default(),
            leading_padding: side,
            trailing_padding: side,
            leading_padding_set: false,
            trailing_padding_set: false,
            override_vertical_positioning: false,
        }
    }

    pub fn position(&self) -> SlotPosition {
        self.position
    }

    pub fn leading_padding(&self) -> f32 {
        self.leading_padding
    }

    pub fn trailing_padding(&self) -> f32 {
        self.trailing_padding
    }

    pub fn override_vertical_positioning(&self) -> bool {
        self.override_vertical_positioning
    }

    pub(crate) fn set_position(&mut self, position: SlotPosition) -> bool {
        let changed = self.position != position;
        self.position = position;
        changed
    }

    pub(crate) fn set_leading_padding(&mut self, padding: f32) -> bool {
        self.leading_padding_set = true;
        let changed = self.leading_padding != padding;
        self.leading_padding = padding;
        changed
    }

    pub(crate) fn set_trailing_padding(&mut self, padding: f32) -> bool {
        self.trailing_padding_set = true;
        let changed = self.trailing_padding != padding;
        self.trailing_padding = padding;
        changed
    }

    pub(crate) fn set_override_vertical_positioning(&mut self, value: bool) -> bool {
        let changed = self.override_vertical_positioning != value;
        self.override_vertical_positioning = value;
        changed
    }

    /// Re-derive the non-overridden paddings after a grid-unit change.
    pub(crate) fn sync_grid_unit(&mut self, units: GridUnit) -> bool {
        let side = units.gu(SLOT_SIDE_MARGIN_GU);
        let mut changed = false;
        if !self.leading_padding_set && self.leading_padding != side {
            self.leading_padding = side;
            changed = true;
        }
        if !self.trailing_padding_set && self.trailing_padding != side {
            self.trailing_padding = side;
            changed = true;
        }
        changed
    }
}
