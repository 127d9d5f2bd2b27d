//! The container's four-sided padding block.
//!
//! Each side carries an independent "was explicitly set" flag; once a side is
//! overridden the automatic grid-unit/content-driven recomputation leaves it
//! alone.

use crate::{SIDE_MARGIN_GU, TOP_BOTTOM_MARGIN_SHORT_GU};
use scene::GridUnit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    leading: f32,
    trailing: f32,
    top: f32,
    bottom: f32,
    pub(crate) leading_set: bool,
    pub(crate) trailing_set: bool,
    pub(crate) top_set: bool,
    pub(crate) bottom_set: bool,
}

impl Padding {
    pub(crate) fn new(units: GridUnit) -> Self {
        Self {
            leading: units.gu(SIDE_MARGIN_GU),
            trailing: units.gu(SIDE_MARGIN_GU),
            top: units.gu(TOP_BOTTOM_MARGIN_SHORT_GU),
            bottom: units.gu(TOP_BOTTOM_MARGIN_SHORT_GU),
            leading_set: false,
            trailing_set: false,
            top_set: false,
            bottom_set: false,
        }
    }

    pub fn leading(&self) -> f32 {
        self.leading
    }

    pub fn trailing(&self) -> f32 {
        self.trailing
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    // Explicit setters: mark the side as overridden.

    pub(crate) fn set_leading(&mut self, value: f32) -> bool {
        self.leading_set = true;
        let changed = self.leading != value;
        self.leading = value;
        changed
    }

    pub(crate) fn set_trailing(&mut self, value: f32) -> bool {
        self.trailing_set = true;
        let changed = self.trailing != value;
        self.trailing = value;
        changed
    }

    pub(crate) fn set_top(&mut self, value: f32) -> bool {
        self.top_set = true;
        let changed = self.top != value;
        self.top = value;
        changed
    }

    pub(crate) fn set_bottom(&mut self, value: f32) -> bool {
        self.bottom_set = true;
        let changed = self.bottom != value;
        self.bottom = value;
        changed
    }

    // Automatic setters: no-ops once the side was overridden.

    pub(crate) fn set_leading_auto(&mut self, value: f32) -> bool {
        if self.leading_set || self.leading == value {
            return false;
        }
        self.leading = value;
        true
    }

    pub(crate) fn set_trailing_auto(&mut self, value: f32) -> bool {
        if self.trailing_set || self.trailing == value {
            return false;
        }
        self.trailing = value;
        true
    }

    pub(crate) fn set_top_auto(&mut self, value: f32) -> bool {
        if self.top_set || self.top == value {
            return false;
        }
        self.top = value;
        true
    }

    pub(crate) fn set_bottom_auto(&mut self, value: f32) -> bool {
        if self.bottom_set || self.bottom == value {
            return false;
        }
        self.bottom = value;
        true
    }
}
