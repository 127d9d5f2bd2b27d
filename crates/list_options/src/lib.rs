//! The swipeable list-item options container.
//!
//! A list item exposes leading/trailing panels of options revealed by a
//! horizontal tug. This crate holds the data side: the action list with its
//! capability check, the panel background color, the delegate hook that turns
//! an action into a visual cell, the reveal-snapping rule, and panel
//! instantiation into a [`SlotsLayout`] side. Gesture recognition itself
//! belongs to the host.

use log::warn;
use scene::{ItemKey, Scene};
use slots_layout::{SlotPosition, SlotsLayout};
use std::fmt;

/// Default square cell edge used when no delegate is installed, in grid units.
pub(crate) const DEFAULT_OPTION_CELL_GU: f32 = 5.0;

/// The capability an options entry must have to be shown on a panel.
pub trait Action {
    /// Label shown on the visualized option.
    fn text(&self) -> &str;

    /// Icon identifier, empty when the option is text-only.
    fn icon_name(&self) -> &str {
        ""
    }

    fn enabled(&self) -> bool {
        true
    }

    /// Invoked when the revealed option is activated.
    fn trigger(&mut self);
}

/// Anything offered to [`ListItemOptions::append`]. Types carrying the
/// [`Action`] capability override the accessors to expose it; the default
/// implementation exposes nothing and such entries are rejected with a
/// diagnostic.
pub trait OptionEntry {
    fn as_action(&self) -> Option<&dyn Action> {
        None
    }

    fn as_action_mut(&mut self) -> Option<&mut dyn Action> {
        None
    }
}

/// Panel background color, straight RGBA in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const RED: Rgba = Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::RED
    }
}

/// Which side of the list item the panel occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSide {
    Leading,
    Trailing,
}

impl PanelSide {
    fn position(self) -> SlotPosition {
        match self {
            PanelSide::Leading => SlotPosition::Leading,
            PanelSide::Trailing => SlotPosition::Trailing,
        }
    }
}

/// Builds the visual cell for one action; returns the cell's scene item.
pub type OptionDelegate = Box<dyn Fn(&mut Scene, &dyn Action) -> ItemKey>;

/// The option list attached to a list item.
pub struct ListItemOptions {
    entries: Vec<Box<dyn OptionEntry>>,
    background_color: Rgba,
    delegate: Option<OptionDelegate>,
}

impl fmt::Debug for ListItemOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListItemOptions")
            .field("entries", &self.entries.len())
            .field("background_color", &self.background_color)
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}

impl Default for ListItemOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ListItemOptions {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            background_color: Rgba::RED,
            delegate: None,
        }
    }

    /// Append an entry. Entries without the action capability are rejected
    /// and the list does not grow.
    pub fn append(&mut self, entry: Box<dyn OptionEntry>) {
        if entry.as_action().is_none() {
            warn!(
                "Option at index {} is not an action or a derivate of one; ignored",
                self.entries.len()
            );
            return;
        }
        self.entries.push(entry);
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn at(&self, index: usize) -> Option<&dyn Action> {
        self.entries.get(index).and_then(|e| e.as_action())
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut dyn Action> {
        self.entries.get_mut(index).and_then(|e| e.as_action_mut())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
    }

    /// Install the cell factory. Without one, panels get plain square cells.
    pub fn set_delegate(&mut self, delegate: OptionDelegate) {
        self.delegate = Some(delegate);
    }

    /// Build one cell per option and insert the cells into one side of the
    /// layout, in option order. Cells beyond the side's capacity stay in the
    /// scene but the layout's packing pass leaves them out with its own
    /// diagnostic.
    pub fn instantiate_panel(
        &self,
        scene: &mut Scene,
        layout: &mut SlotsLayout,
        side: PanelSide,
    ) -> Vec<ItemKey> {
        let mut cells = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let Some(action) = entry.as_action() else { continue };
            let cell = match &self.delegate {
                Some(delegate) => delegate(scene, action),
                None => {
                    let edge = layout.grid_unit().gu(DEFAULT_OPTION_CELL_GU);
                    let cell = scene.create_item(None);
                    scene.set_size(cell, edge, edge);
                    cell
                }
            };
            if let Err(error) = layout.insert_slot(scene, cell) {
                warn!("Could not place option cell {cell:?} into the layout: {error}");
                continue;
            }
            layout.set_slot_position(cell, side.position());
            cells.push(cell);
        }
        cells
    }
}

/// Snap a tug distance to a whole number of revealed options: past half an
/// option the next one snaps fully open, below half it snaps back. The result
/// is clamped to the panel extent.
pub fn snapped_reveal(drag: f32, option_width: f32, count: usize) -> f32 {
    if option_width <= 0.0 || count == 0 {
        return 0.0;
    }
    let extent = option_width * count as f32;
    let clamped = drag.clamp(0.0, extent);
    (clamped / option_width).round() * option_width
}
