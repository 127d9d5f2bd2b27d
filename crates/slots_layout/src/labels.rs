//! The three-label text block: title, subtitle and summary stacked
//! vertically, baseline-anchored, each skipped when absent, empty or hidden.
//!
//! Text shaping is external; the block consumes the heights and baseline
//! offsets the host writes on the label items and produces anchors plus the
//! block's implicit height.

use log::trace;
use scene::{AnchorEdge, AnchorLine, GridUnit, ItemEvent, ItemKey, PropertyChange, Scene};

/// Spacing added above a label anchored to the previous label's baseline,
/// in grid units.
pub(crate) const LABEL_SPACING_GU: f32 = 1.0;

/// Named font size tiers, converted to pixels through the grid unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    Small,
    Medium,
}

impl FontTier {
    /// Pixel size of the tier at the given grid unit.
    pub fn px(self, units: GridUnit) -> f32 {
        match self {
            FontTier::Small => units.gu(1.5),
            FontTier::Medium => units.gu(1.75),
        }
    }
}

#[derive(Debug)]
struct Label {
    item: ItemKey,
    text: String,
    tier: FontTier,
    font_px: f32,
    max_line_count: u32,
}

impl Label {
    fn skipped(&self, scene: &Scene) -> bool {
        self.text.is_empty() || !scene.visible(self.item)
    }
}

/// The three-label block. Labels are created lazily on first access and live
/// as children of the block item.
pub struct ThreeLabelsSlot {
    item: ItemKey,
    units: GridUnit,
    ready: bool,
    title: Option<Label>,
    subtitle: Option<Label>,
    summary: Option<Label>,
}

impl ThreeLabelsSlot {
    pub fn new(scene: &mut Scene, parent: Option<ItemKey>) -> Self {
        Self {
            item: scene.create_item(parent),
            units: GridUnit::default(),
            ready: false,
            title: None,
            subtitle: None,
            summary: None,
        }
    }

    /// The block item in the scene.
    pub fn item(&self) -> ItemKey {
        self.item
    }

    /// The title label item, created on first access.
    pub fn title(&mut self, scene: &mut Scene) -> ItemKey {
        if self.title.is_none() {
            self.title = Some(self.create_label(scene, FontTier::Medium, 1));
            self.restack(scene);
        }
        self.title.as_ref().map(|l| l.item).unwrap_or(self.item)
    }

    /// The subtitle label item, created on first access.
    pub fn subtitle(&mut self, scene: &mut Scene) -> ItemKey {
        if self.subtitle.is_none() {
            self.subtitle = Some(self.create_label(scene, FontTier::Small, 1));
            self.restack(scene);
        }
        self.subtitle.as_ref().map(|l| l.item).unwrap_or(self.item)
    }

    /// The summary label item, created on first access. Summaries may wrap
    /// onto a second line.
    pub fn summary(&mut self, scene: &mut Scene) -> ItemKey {
        if self.summary.is_none() {
            self.summary = Some(self.create_label(scene, FontTier::Small, 2));
            self.restack(scene);
        }
        self.summary.as_ref().map(|l| l.item).unwrap_or(self.item)
    }

    fn create_label(&self, scene: &mut Scene, tier: FontTier, max_line_count: u32) -> Label {
        let item = scene.create_item(Some(self.item));
        scene.anchor_left(item, AnchorLine::new(self.item, AnchorEdge::Left), 0.0);
        scene.anchor_right(item, AnchorLine::new(self.item, AnchorEdge::Right), 0.0);
        Label {
            item,
            text: String::new(),
            tier,
            font_px: tier.px(self.units),
            max_line_count,
        }
    }

    pub fn set_title_text(&mut self, scene: &mut Scene, text: &str) {
        self.title(scene);
        if let Some(label) = self.title.as_mut() {
            label.text = text.to_owned();
        }
        self.restack(scene);
    }

    pub fn set_subtitle_text(&mut self, scene: &mut Scene, text: &str) {
        self.subtitle(scene);
        if let Some(label) = self.subtitle.as_mut() {
            label.text = text.to_owned();
        }
        self.restack(scene);
    }

    pub fn set_summary_text(&mut self, scene: &mut Scene, text: &str) {
        self.summary(scene);
        if let Some(label) = self.summary.as_mut() {
            label.text = text.to_owned();
        }
        self.restack(scene);
    }

    /// Current font pixel size of a label item, if it is one of ours.
    pub fn font_px(&self, item: ItemKey) -> Option<f32> {
        [&self.title, &self.subtitle, &self.summary]
            .into_iter()
            .flatten()
            .find(|l| l.item == item)
            .map(|l| l.font_px)
    }

    /// Line-count hint of a label item, if it is one of ours.
    pub fn max_line_count(&self, item: ItemKey) -> Option<u32> {
        [&self.title, &self.subtitle, &self.summary]
            .into_iter()
            .flatten()
            .find(|l| l.item == item)
            .map(|l| l.max_line_count)
    }

    /// Install a new grid-unit conversion value: font tiers re-derive and the
    /// stack is rebuilt.
    pub fn set_grid_unit(&mut self, scene: &mut Scene, units: GridUnit) {
        if self.units == units {
            return;
        }
        self.units = units;
        for label in [&mut self.title, &mut self.subtitle, &mut self.summary]
            .into_iter()
            .flatten()
        {
            label.font_px = label.tier.px(units);
        }
        self.restack(scene);
    }

    /// Finish construction and run the first stacking pass.
    pub fn complete(&mut self, scene: &mut Scene) {
        if self.ready {
            return;
        }
        self.ready = true;
        self.restack(scene);
    }

    /// React to a scene change notification about one of the labels.
    pub fn apply_event(&mut self, scene: &mut Scene, event: &ItemEvent) {
        let ours = self.font_px(event.item).is_some();
        if !ours {
            return;
        }
        match event.change {
            PropertyChange::Height | PropertyChange::Visible | PropertyChange::BaselineOffset => {
                self.restack(scene);
            }
            _ => {}
        }
    }

    /// Rebuild anchors and the implicit block height from the shown labels.
    pub fn restack(&mut self, scene: &mut Scene) {
        if !self.ready {
            return;
        }

        let skip_title = self.title.as_ref().map(|l| l.skipped(scene)).unwrap_or(true);
        let skip_subtitle = self.subtitle.as_ref().map(|l| l.skipped(scene)).unwrap_or(true);
        let skip_summary = self.summary.as_ref().map(|l| l.skipped(scene)).unwrap_or(true);
        trace!("restack: skip title={skip_title} subtitle={skip_subtitle} summary={skip_summary}");

        let spacing = self.units.gu(LABEL_SPACING_GU);
        let top = AnchorLine::new(self.item, AnchorEdge::Top);

        if let (false, Some(title)) = (skip_title, self.title.as_ref()) {
            scene.anchor_top(title.item, top, 0.0);
        }

        // a hidden or empty label must not become an anchor target: its item
        // still has a height, so the stack would gain a phantom gap
        if let (false, Some(subtitle)) = (skip_subtitle, self.subtitle.as_ref()) {
            if skip_title {
                scene.anchor_top(subtitle.item, top, 0.0);
            } else {
                let title_item = self.title.as_ref().map(|l| l.item).unwrap_or(self.item);
                scene.anchor_top(
                    subtitle.item,
                    AnchorLine::new(title_item, AnchorEdge::Baseline),
                    spacing,
                );
            }
        }

        if let (false, Some(summary)) = (skip_summary, self.summary.as_ref()) {
            let line = if !skip_subtitle {
                let subtitle_item = self.subtitle.as_ref().map(|l| l.item).unwrap_or(self.item);
                AnchorLine::new(subtitle_item, AnchorEdge::Baseline)
            } else if !skip_title {
                let title_item = self.title.as_ref().map(|l| l.item).unwrap_or(self.item);
                AnchorLine::new(title_item, AnchorEdge::Baseline)
            } else {
                top
            };
            let margin = if skip_subtitle && skip_title { 0.0 } else { spacing };
            scene.anchor_top(summary.item, line, margin);
        }

        let mut height = 0.0;
        if !skip_title {
            let title = self.title.as_ref().map(|l| l.item).unwrap_or(self.item);
            if skip_subtitle && skip_summary {
                height += scene.height(title);
            } else {
                height += scene.baseline_offset(title) + spacing;
            }
        }
        if skip_subtitle {
            if !skip_summary {
                let summary = self.summary.as_ref().map(|l| l.item).unwrap_or(self.item);
                height += scene.height(summary);
            }
        } else {
            let subtitle = self.subtitle.as_ref().map(|l| l.item).unwrap_or(self.item);
            if skip_summary {
                height += scene.height(subtitle);
            } else {
                let summary = self.summary.as_ref().map(|l| l.item).unwrap_or(self.item);
                height += scene.baseline_offset(subtitle) + spacing + scene.height(summary);
            }
        }

        scene.set_implicit_height(self.item, height);
    }
}
