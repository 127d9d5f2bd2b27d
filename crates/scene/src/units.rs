//! Grid-unit conversion.
//!
//! A grid unit is a DPI-independent length unit. Components hold an explicit
//! `GridUnit` value and are told about changes through their normal event
//! surface; there is no process-wide unit singleton.

/// Pixels per grid unit on a baseline-density screen.
pub const DEFAULT_GRID_UNIT_PX: f32 = 8.0;

/// An explicit grid-unit-to-pixel conversion value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridUnit {
    px_per_unit: f32,
}

impl GridUnit {
    /// Create a conversion value; the scale is floored at one pixel per unit.
    pub fn new(px_per_unit: f32) -> Self {
        Self { px_per_unit: px_per_unit.max(1.0) }
    }

    /// Convert a length expressed in grid units to pixels.
    #[inline]
    pub fn gu(&self, units: f32) -> f32 {
        units * self.px_per_unit
    }

    #[inline]
    pub fn px_per_unit(&self) -> f32 {
        self.px_per_unit
    }
}

impl Default for GridUnit {
    fn default() -> Self {
        Self { px_per_unit: DEFAULT_GRID_UNIT_PX }
    }
}
