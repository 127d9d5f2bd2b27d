//! A minimal retained scene: a tree of positionable rectangular items with
//! anchor-based positioning and a change-notification queue.
//!
//! This crate is the host-side collaborator consumed by the layout components.
//! It deliberately stops at what a layout needs: mutable size, visibility and
//! opacity per item, parent/children links, anchor lines resolved on read, and
//! an event queue the embedder drains and routes to whichever component owns
//! the affected items.

use anyhow::{Error, anyhow};
use log::warn;
use std::collections::HashMap;

pub mod anchors;
pub mod geometry;
pub mod units;

pub use anchors::{AnchorEdge, AnchorLine, Anchors};
pub use geometry::Rect;
pub use units::{DEFAULT_GRID_UNIT_PX, GridUnit};

/// A 64-bit stable key for scene items.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ItemKey(pub u64);

/// Which property of an item changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyChange {
    Width,
    Height,
    Visible,
    Opacity,
    BaselineOffset,
    Parent,
}

/// A single change notification, delivered in mutation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemEvent {
    pub item: ItemKey,
    pub change: PropertyChange,
}

/// A positionable rectangular item.
///
/// Width and height each track whether they were explicitly set; implicit
/// sizes (written by layouts) only apply while the explicit flag is clear.
#[derive(Debug, Clone)]
struct Item {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    width_explicit: bool,
    height_explicit: bool,
    visible: bool,
    opacity: f32,
    baseline_offset: f32,
    parent: Option<ItemKey>,
    children: Vec<ItemKey>,
    anchors: Anchors,
}

impl Item {
    fn new(parent: Option<ItemKey>) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            width_explicit: false,
            height_explicit: false,
            visible: true,
            opacity: 1.0,
            baseline_offset: 0.0,
            parent,
            children: Vec::new(),
            anchors: Anchors::default(),
        }
    }
}

/// The item arena plus the pending change-notification queue.
#[derive(Debug, Default)]
pub struct Scene {
    items: HashMap<ItemKey, Item>,
    next_key: u64,
    events: Vec<ItemEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new item, optionally parented. A missing parent key is
    /// repaired to a root item with a warning rather than failing.
    pub fn create_item(&mut self, parent: Option<ItemKey>) -> ItemKey {
        let parent = match parent {
            Some(p) if !self.items.contains_key(&p) => {
                warn!("Parent {p:?} missing in scene; creating item as a root");
                None
            }
            other => other,
        };
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        self.items.insert(key, Item::new(parent));
        if let Some(p) = parent {
            if let Some(parent_item) = self.items.get_mut(&p) {
                parent_item.children.push(key);
            }
        }
        key
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.items.contains_key(&key)
    }

    /// Move an item under a new parent (appended to the new parent's
    /// children). Emits a `Parent` change for the item.
    pub fn reparent(&mut self, item: ItemKey, new_parent: Option<ItemKey>) -> Result<(), Error> {
        if !self.items.contains_key(&item) {
            return Err(anyhow!("cannot reparent unknown item {item:?}"));
        }
        if let Some(p) = new_parent {
            if !self.items.contains_key(&p) {
                return Err(anyhow!("cannot reparent {item:?} under unknown item {p:?}"));
            }
        }
        let old_parent = self.items[&item].parent;
        if old_parent == new_parent {
            return Ok(());
        }
        if let Some(op) = old_parent {
            if let Some(parent_item) = self.items.get_mut(&op) {
                parent_item.children.retain(|c| *c != item);
            }
        }
        if let Some(np) = new_parent {
            if let Some(parent_item) = self.items.get_mut(&np) {
                parent_item.children.push(item);
            }
        }
        if let Some(it) = self.items.get_mut(&item) {
            it.parent = new_parent;
        }
        self.push_event(item, PropertyChange::Parent);
        Ok(())
    }

    /// Remove an item and its whole subtree.
    pub fn remove_item(&mut self, item: ItemKey) -> Result<(), Error> {
        if !self.items.contains_key(&item) {
            return Err(anyhow!("cannot remove unknown item {item:?}"));
        }
        if let Some(parent) = self.items[&item].parent {
            if let Some(parent_item) = self.items.get_mut(&parent) {
                parent_item.children.retain(|c| *c != item);
            }
        }
        self.remove_recursive(item);
        Ok(())
    }

    fn remove_recursive(&mut self, item: ItemKey) {
        if let Some(removed) = self.items.remove(&item) {
            for child in removed.children {
                self.remove_recursive(child);
            }
        }
    }

    // --- property setters -------------------------------------------------

    /// Set an explicit width. Implicit widths no longer apply to this item.
    pub fn set_width(&mut self, item: ItemKey, width: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        it.width_explicit = true;
        if it.width != width {
            it.width = width;
            self.push_event(item, PropertyChange::Width);
        }
    }

    /// Set an explicit height. Implicit heights no longer apply to this item.
    pub fn set_height(&mut self, item: ItemKey, height: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        it.height_explicit = true;
        if it.height != height {
            it.height = height;
            self.push_event(item, PropertyChange::Height);
        }
    }

    pub fn set_size(&mut self, item: ItemKey, width: f32, height: f32) {
        self.set_width(item, width);
        self.set_height(item, height);
    }

    /// Set a width hint from a layout; ignored once an explicit width exists.
    pub fn set_implicit_width(&mut self, item: ItemKey, width: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        if it.width_explicit {
            return;
        }
        if it.width != width {
            it.width = width;
            self.push_event(item, PropertyChange::Width);
        }
    }

    /// Set a height hint from a layout; ignored once an explicit height exists.
    pub fn set_implicit_height(&mut self, item: ItemKey, height: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        if it.height_explicit {
            return;
        }
        if it.height != height {
            it.height = height;
            self.push_event(item, PropertyChange::Height);
        }
    }

    pub fn set_visible(&mut self, item: ItemKey, visible: bool) {
        let Some(it) = self.items.get_mut(&item) else { return };
        if it.visible != visible {
            it.visible = visible;
            self.push_event(item, PropertyChange::Visible);
        }
    }

    pub fn set_opacity(&mut self, item: ItemKey, opacity: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        if it.opacity != opacity {
            it.opacity = opacity;
            self.push_event(item, PropertyChange::Opacity);
        }
    }

    /// Set the distance from the item's top to its text baseline.
    pub fn set_baseline_offset(&mut self, item: ItemKey, offset: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        if it.baseline_offset != offset {
            it.baseline_offset = offset;
            self.push_event(item, PropertyChange::BaselineOffset);
        }
    }

    /// Set the item's own position, used only while the matching axis is
    /// unanchored. Positions are relative to the parent.
    pub fn set_position(&mut self, item: ItemKey, x: f32, y: f32) {
        let Some(it) = self.items.get_mut(&item) else { return };
        it.x = x;
        it.y = y;
    }

    // --- accessors --------------------------------------------------------

    pub fn width(&self, item: ItemKey) -> f32 {
        self.items.get(&item).map(|i| i.width).unwrap_or(0.0)
    }

    pub fn height(&self, item: ItemKey) -> f32 {
        self.items.get(&item).map(|i| i.height).unwrap_or(0.0)
    }

    pub fn visible(&self, item: ItemKey) -> bool {
        self.items.get(&item).map(|i| i.visible).unwrap_or(false)
    }

    pub fn opacity(&self, item: ItemKey) -> f32 {
        self.items.get(&item).map(|i| i.opacity).unwrap_or(0.0)
    }

    pub fn baseline_offset(&self, item: ItemKey) -> f32 {
        self.items.get(&item).map(|i| i.baseline_offset).unwrap_or(0.0)
    }

    pub fn parent(&self, item: ItemKey) -> Option<ItemKey> {
        self.items.get(&item).and_then(|i| i.parent)
    }

    /// Children in declaration (insertion) order.
    pub fn children(&self, item: ItemKey) -> &[ItemKey] {
        self.items.get(&item).map(|i| i.children.as_slice()).unwrap_or(&[])
    }

    pub fn anchors(&self, item: ItemKey) -> Anchors {
        self.items.get(&item).map(|i| i.anchors).unwrap_or_default()
    }

    // --- anchor management ------------------------------------------------

    pub fn anchor_left(&mut self, item: ItemKey, line: AnchorLine, margin: f32) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.left = Some((line, margin));
        }
    }

    pub fn anchor_right(&mut self, item: ItemKey, line: AnchorLine, margin: f32) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.right = Some((line, margin));
        }
    }

    pub fn anchor_top(&mut self, item: ItemKey, line: AnchorLine, margin: f32) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.top = Some((line, margin));
        }
    }

    pub fn anchor_vertical_center(&mut self, item: ItemKey, line: AnchorLine, offset: f32) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.vertical_center = Some((line, offset));
        }
    }

    pub fn reset_left(&mut self, item: ItemKey) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.left = None;
        }
    }

    pub fn reset_top(&mut self, item: ItemKey) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.top = None;
        }
    }

    pub fn reset_vertical_center(&mut self, item: ItemKey) {
        if let Some(it) = self.items.get_mut(&item) {
            it.anchors.vertical_center = None;
        }
    }

    // --- geometry resolution ----------------------------------------------

    /// Resolve the item's absolute geometry from its anchors, falling back to
    /// its own position/size where an axis is unanchored.
    pub fn rect(&self, item: ItemKey) -> Rect {
        let Some(it) = self.items.get(&item) else { return Rect::ZERO };
        let parent_rect = it.parent.map(|p| self.rect(p)).unwrap_or(Rect::ZERO);

        let (x, width) = match (it.anchors.left, it.anchors.right) {
            (Some((ll, lm)), Some((rl, rm))) => {
                let left = self.line_x(ll) + lm;
                let right = self.line_x(rl) - rm;
                (left, right - left)
            }
            (Some((ll, lm)), None) => (self.line_x(ll) + lm, it.width),
            (None, Some((rl, rm))) => (self.line_x(rl) - rm - it.width, it.width),
            (None, None) => (parent_rect.x + it.x, it.width),
        };

        let height = it.height;
        let y = if let Some((line, offset)) = it.anchors.vertical_center {
            self.line_y(line) + offset - height / 2.0
        } else if let Some((line, margin)) = it.anchors.top {
            self.line_y(line) + margin
        } else {
            parent_rect.y + it.y
        };

        Rect { x, y, width, height }
    }

    fn line_x(&self, line: AnchorLine) -> f32 {
        let r = self.rect(line.item);
        match line.edge {
            AnchorEdge::Left => r.x,
            AnchorEdge::Right => r.right(),
            other => {
                warn!("Anchor edge {other:?} is not a horizontal line");
                r.x
            }
        }
    }

    fn line_y(&self, line: AnchorLine) -> f32 {
        let r = self.rect(line.item);
        match line.edge {
            AnchorEdge::Top => r.y,
            AnchorEdge::Bottom => r.bottom(),
            AnchorEdge::VerticalCenter => r.vertical_center(),
            AnchorEdge::Baseline => r.y + self.baseline_offset(line.item),
            other => {
                warn!("Anchor edge {other:?} is not a vertical line");
                r.y
            }
        }
    }

    // --- change notifications ----------------------------------------------

    fn push_event(&mut self, item: ItemKey, change: PropertyChange) {
        self.events.push(ItemEvent { item, change });
    }

    /// Drain the pending change notifications in mutation order.
    pub fn take_events(&mut self) -> Vec<ItemEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether notifications are pending.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}
