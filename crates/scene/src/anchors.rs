//! Anchor lines and per-item anchor state.
//!
//! Anchors are persistent constraints: an item's edge is pinned to a line of
//! another item plus a margin. The scene resolves them to absolute geometry
//! on read, so re-resolving after an input change needs no extra bookkeeping.

use crate::ItemKey;

/// An edge or derived line of an item that other items can anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorEdge {
    Left,
    Right,
    Top,
    Bottom,
    VerticalCenter,
    Baseline,
}

/// A concrete line: an edge of a specific item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorLine {
    pub item: ItemKey,
    pub edge: AnchorEdge,
}

impl AnchorLine {
    #[inline]
    pub fn new(item: ItemKey, edge: AnchorEdge) -> Self {
        Self { item, edge }
    }
}

/// The anchor state of a single item.
///
/// `left`/`right`/`top` carry a margin, `vertical_center` carries an offset.
/// When both `left` and `right` are set the item's width is derived from the
/// two lines instead of its own width property.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Anchors {
    pub(crate) left: Option<(AnchorLine, f32)>,
    pub(crate) right: Option<(AnchorLine, f32)>,
    pub(crate) top: Option<(AnchorLine, f32)>,
    pub(crate) vertical_center: Option<(AnchorLine, f32)>,
}

impl Anchors {
    pub fn left(&self) -> Option<(AnchorLine, f32)> {
        self.left
    }

    pub fn right(&self) -> Option<(AnchorLine, f32)> {
        self.right
    }

    pub fn top(&self) -> Option<(AnchorLine, f32)> {
        self.top
    }

    pub fn vertical_center(&self) -> Option<(AnchorLine, f32)> {
        self.vertical_center
    }
}
