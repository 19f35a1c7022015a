//! Derived state for the scroll-driven career timeline
//!
//! Everything here is a pure function of the current viewport geometry and
//! the entry sequence. The frontend recomputes it on every scroll, resize or
//! intersection callback; nothing is cached between frames.

use crate::{TimelineEntry, TimelineSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hidden cards sit this far from their resting position.
pub const REVEAL_OFFSET_PX: i32 = 40;

/// Continuation segments fill their connector after the trunk stub.
pub const SEGMENT_CONNECTOR_DELAY_MS: u32 = 300;
pub const SEGMENT_BOX_DELAY_MS: u32 = 500;
pub const HIGHLIGHT_BRANCH_STAGGER_MS: u32 = 300;
pub const HIGHLIGHT_BOX_STAGGER_MS: u32 = 200;

/// Snapshot of the layout numbers the progress formula needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub viewport_height: f64,
    /// Top edge of the timeline container relative to the viewport.
    pub container_top: f64,
    pub container_height: f64,
}

/// How far the reading line has travelled through the timeline, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ScrollProgress(f64);

impl From<f64> for ScrollProgress {
    fn from(value: f64) -> Self {
        ScrollProgress::new(value)
    }
}

impl From<ScrollProgress> for f64 {
    fn from(progress: ScrollProgress) -> Self {
        progress.0
    }
}

impl ScrollProgress {
    pub const ZERO: ScrollProgress = ScrollProgress(0.0);
    pub const FULL: ScrollProgress = ScrollProgress(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            ScrollProgress(value.clamp(0.0, 1.0))
        }
    }

    /// `clamp((viewport_height * reading_line - container_top) / container_height, 0, 1)`
    pub fn from_geometry(geometry: ViewportGeometry, reading_line: f64) -> Self {
        let ViewportGeometry {
            viewport_height,
            container_top,
            container_height,
        } = geometry;
        if !(container_height > 0.0) || !container_height.is_finite() {
            return Self::ZERO;
        }
        let scrolled = viewport_height * reading_line - container_top;
        Self::new(scrolled / container_height)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Filled trunk height as a CSS percentage.
    pub fn trunk_height_percent(self) -> f64 {
        self.0 * 100.0
    }
}

/// Position of the 0-based `index` within `count` entries, `(index + 1) / count`.
pub fn item_progress(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (index + 1) as f64 / count as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchFill {
    pub threshold: f64,
    pub filled: bool,
}

impl BranchFill {
    pub fn compute(progress: ScrollProgress, index: usize, count: usize, branch_lead: f64) -> Self {
        let threshold = item_progress(index, count) * branch_lead;
        Self {
            threshold,
            filled: progress.value() >= threshold,
        }
    }

    pub fn width_percent(self) -> f64 {
        if self.filled { 100.0 } else { 0.0 }
    }
}

/// Intensity of the rocket flame riding the trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlameTier {
    Ember,
    Boost,
    Afterburner,
}

impl FlameTier {
    pub fn from_progress(progress: ScrollProgress, settings: &TimelineSettings) -> Self {
        let value = progress.value();
        if value > settings.afterburner_threshold {
            FlameTier::Afterburner
        } else if value > settings.boost_threshold {
            FlameTier::Boost
        } else {
            FlameTier::Ember
        }
    }

    pub fn scale(self) -> f64 {
        match self {
            FlameTier::Ember => 1.0,
            FlameTier::Boost => 1.8,
            FlameTier::Afterburner => 2.5,
        }
    }

    pub fn glow_radius_px(self) -> u32 {
        match self {
            FlameTier::Ember => 5,
            FlameTier::Boost => 10,
            FlameTier::Afterburner => 15,
        }
    }

    /// The middle flame layer only shows at full intensity.
    pub fn shows_mid_layer(self) -> bool {
        self == FlameTier::Afterburner
    }
}

/// Everything the trunk and branches need for one recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineFrame {
    pub progress: ScrollProgress,
    pub tier: FlameTier,
    pub branches: Vec<BranchFill>,
}

impl TimelineFrame {
    pub fn derive(progress: ScrollProgress, count: usize, settings: &TimelineSettings) -> Self {
        Self {
            progress,
            tier: FlameTier::from_progress(progress, settings),
            branches: (0..count)
                .map(|index| BranchFill::compute(progress, index, count, settings.branch_lead))
                .collect(),
        }
    }

    pub fn trunk_height_percent(&self) -> f64 {
        self.progress.trunk_height_percent()
    }

    pub fn branch(&self, index: usize) -> Option<BranchFill> {
        self.branches.get(index).copied()
    }
}

impl Default for TimelineFrame {
    fn default() -> Self {
        Self::derive(ScrollProgress::ZERO, 0, &TimelineSettings::default())
    }
}

/// Append-only set of revealed keys. Keys are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet<K: Ord> {
    revealed: BTreeSet<K>,
}

impl<K: Ord> VisibilitySet<K> {
    pub fn new() -> Self {
        Self {
            revealed: BTreeSet::new(),
        }
    }

    /// Returns `true` only the first time `key` is revealed.
    pub fn reveal(&mut self, key: K) -> bool {
        self.revealed.insert(key)
    }

    pub fn is_revealed(&self, key: &K) -> bool {
        self.revealed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.revealed.iter()
    }
}

impl<K: Ord> Default for VisibilitySet<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of the trunk a card sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    /// Even index: row reversed, text right-aligned, branch on the card's right edge.
    Right,
    Left,
}

impl CardSide {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            CardSide::Right
        } else {
            CardSide::Left
        }
    }

    pub fn is_reversed(self) -> bool {
        self == CardSide::Right
    }

    /// Horizontal offset while hidden, pointing back toward the card's origin.
    pub fn hidden_offset_x_px(self) -> i32 {
        match self {
            CardSide::Right => -REVEAL_OFFSET_PX,
            CardSide::Left => REVEAL_OFFSET_PX,
        }
    }
}

/// Card treatment. Only the `special` flag selects it; the text never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Standard,
    /// Personal milestone: accent border and background.
    Special,
}

impl CardTone {
    pub fn for_entry(entry: &TimelineEntry) -> Self {
        if entry.special {
            CardTone::Special
        } else {
            CardTone::Standard
        }
    }
}

/// Opacity and offset of a card or segment box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPose {
    pub opacity: f64,
    pub translate_x_px: i32,
    pub translate_y_px: i32,
}

impl RevealPose {
    pub const REVEALED: RevealPose = RevealPose {
        opacity: 1.0,
        translate_x_px: 0,
        translate_y_px: 0,
    };

    pub fn for_card(side: CardSide, revealed: bool) -> Self {
        if revealed {
            Self::REVEALED
        } else {
            Self {
                opacity: 0.0,
                translate_x_px: side.hidden_offset_x_px(),
                translate_y_px: REVEAL_OFFSET_PX,
            }
        }
    }

    pub fn for_segment(revealed: bool) -> Self {
        if revealed {
            Self::REVEALED
        } else {
            Self {
                opacity: 0.0,
                translate_x_px: 0,
                translate_y_px: REVEAL_OFFSET_PX,
            }
        }
    }

    pub fn css_transform(self) -> String {
        format!(
            "translate({}px, {}px)",
            self.translate_x_px, self.translate_y_px
        )
    }
}

/// Delay after a highlights reveal before box `index` fills its branch.
pub fn highlight_branch_delay_ms(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
        .saturating_mul(HIGHLIGHT_BRANCH_STAGGER_MS)
}

pub fn highlight_box_delay_ms(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(HIGHLIGHT_BOX_STAGGER_MS)
}

pub fn header_condensed(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(container_top: f64) -> ViewportGeometry {
        ViewportGeometry {
            viewport_height: 1000.0,
            container_top,
            container_height: 2000.0,
        }
    }

    #[test]
    fn progress_is_clamped_for_all_positions() {
        for top in (-5000..=5000).step_by(250) {
            let progress = ScrollProgress::from_geometry(geometry(top as f64), 0.7);
            assert!((0.0..=1.0).contains(&progress.value()), "top {top}");
        }
    }

    #[test]
    fn progress_follows_reading_line() {
        // Reading line at 700px, container top at -300px: 1000px of 2000px read.
        let progress = ScrollProgress::from_geometry(geometry(-300.0), 0.7);
        assert!((progress.value() - 0.5).abs() < 1e-9);

        let full_viewport = ScrollProgress::from_geometry(geometry(0.0), 1.0);
        assert_eq!(full_viewport.value(), 0.5);
    }

    #[test]
    fn unmounted_or_degenerate_container_reports_zero() {
        let empty = ViewportGeometry {
            viewport_height: 800.0,
            container_top: -100.0,
            container_height: 0.0,
        };
        assert_eq!(ScrollProgress::from_geometry(empty, 0.7), ScrollProgress::ZERO);
        assert_eq!(ScrollProgress::new(f64::NAN), ScrollProgress::ZERO);
        assert_eq!(ScrollProgress::new(7.0), ScrollProgress::FULL);
    }

    #[test]
    fn item_progress_strictly_increases() {
        let count = 9;
        let values: Vec<f64> = (0..count).map(|index| item_progress(index, count)).collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(values[count - 1], 1.0);
        assert_eq!(item_progress(0, 0), 0.0);
    }

    #[test]
    fn branch_fills_and_unfills_with_progress() {
        // Fifth of nine entries: threshold (5 / 9) * 0.8 = 0.444
        let fill = BranchFill::compute(ScrollProgress::new(0.5), 4, 9, 0.8);
        assert!((fill.threshold - 0.4444).abs() < 1e-3);
        assert!(fill.filled);
        assert_eq!(fill.width_percent(), 100.0);

        let scrolled_back = BranchFill::compute(ScrollProgress::new(0.3), 4, 9, 0.8);
        assert!(!scrolled_back.filled);
        assert_eq!(scrolled_back.width_percent(), 0.0);
    }

    #[test]
    fn branch_fills_exactly_at_threshold() {
        let fill = BranchFill::compute(ScrollProgress::new(0.4), 0, 2, 0.8);
        assert!(fill.filled);
        let below = BranchFill::compute(ScrollProgress::new(0.399), 0, 2, 0.8);
        assert!(!below.filled);
    }

    #[test]
    fn flame_tier_has_no_hysteresis() {
        let settings = TimelineSettings::default();
        let tier = |value| FlameTier::from_progress(ScrollProgress::new(value), &settings);

        assert_eq!(tier(0.0), FlameTier::Ember);
        assert_eq!(tier(0.35), FlameTier::Ember);
        assert_eq!(tier(0.36), FlameTier::Boost);
        assert_eq!(tier(0.82), FlameTier::Boost);
        assert_eq!(tier(0.83), FlameTier::Afterburner);
        assert_eq!(tier(0.5), FlameTier::Boost);
        assert!(tier(1.0).shows_mid_layer());
        assert!(!tier(0.5).shows_mid_layer());
        assert!(tier(0.9).scale() > tier(0.5).scale());
    }

    #[test]
    fn frame_derives_trunk_and_branches_from_one_progress() {
        let settings = TimelineSettings::default();
        let frame = TimelineFrame::derive(ScrollProgress::new(0.5), 9, &settings);

        assert_eq!(frame.trunk_height_percent(), 50.0);
        assert_eq!(frame.tier, FlameTier::Boost);
        assert_eq!(frame.branches.len(), 9);
        let filled: Vec<bool> = frame.branches.iter().map(|branch| branch.filled).collect();
        // Thresholds: 0.089, 0.178, 0.267, 0.356, 0.444, 0.533, ...
        assert_eq!(filled, [true, true, true, true, true, false, false, false, false]);
        assert_eq!(frame.branch(9), None);
    }

    #[test]
    fn revealed_keys_stay_revealed() {
        let mut visible = VisibilitySet::new();
        assert!(visible.reveal(3));
        assert!(!visible.reveal(3));
        assert!(visible.reveal(1));

        // Scrolling back above entry 3 never removes it; there is no API to do so.
        assert!(visible.is_revealed(&3));
        assert_eq!(visible.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(visible.len(), 2);
        assert!(!visible.is_revealed(&2));
    }

    #[test]
    fn cards_alternate_sides() {
        let sides: Vec<CardSide> = (0..5).map(CardSide::for_index).collect();
        assert_eq!(
            sides,
            [
                CardSide::Right,
                CardSide::Left,
                CardSide::Right,
                CardSide::Left,
                CardSide::Right
            ]
        );
        assert!(CardSide::Right.is_reversed());
        assert!(!CardSide::Left.is_reversed());
    }

    #[test]
    fn hidden_cards_are_offset_toward_their_origin() {
        let hidden_right = RevealPose::for_card(CardSide::Right, false);
        assert_eq!(hidden_right.opacity, 0.0);
        assert_eq!(hidden_right.translate_x_px, -REVEAL_OFFSET_PX);
        assert_eq!(hidden_right.translate_y_px, REVEAL_OFFSET_PX);

        let hidden_left = RevealPose::for_card(CardSide::Left, false);
        assert_eq!(hidden_left.translate_x_px, REVEAL_OFFSET_PX);

        assert_eq!(RevealPose::for_card(CardSide::Left, true), RevealPose::REVEALED);
        assert_eq!(RevealPose::REVEALED.css_transform(), "translate(0px, 0px)");
        assert_eq!(RevealPose::for_segment(false).css_transform(), "translate(0px, 40px)");
    }

    #[test]
    fn highlight_stagger_schedule() {
        assert_eq!(highlight_branch_delay_ms(0), 300);
        assert_eq!(highlight_branch_delay_ms(1), 600);
        assert_eq!(highlight_box_delay_ms(0), 0);
        assert_eq!(highlight_box_delay_ms(1), 200);
    }

    #[test]
    fn stagger_delay_saturates_for_huge_indices() {
        assert_eq!(highlight_branch_delay_ms(usize::MAX), u32::MAX);
        assert_eq!(highlight_box_delay_ms(usize::MAX), u32::MAX);
        assert_eq!(highlight_branch_delay_ms(u32::MAX as usize - 1), u32::MAX);
    }

    #[test]
    fn deserialized_progress_is_clamped() {
        let above: ScrollProgress = serde_json::from_str("7.5").unwrap();
        let below: ScrollProgress = serde_json::from_str("-3.0").unwrap();
        let inside: ScrollProgress = serde_json::from_str("0.25").unwrap();

        assert_eq!(above, ScrollProgress::FULL);
        assert_eq!(below, ScrollProgress::ZERO);
        assert_eq!(inside.value(), 0.25);
        assert_eq!(serde_json::to_string(&ScrollProgress::new(0.5)).unwrap(), "0.5");
    }

    fn entry(role: &str, special: bool) -> TimelineEntry {
        TimelineEntry {
            id: 1,
            role: role.to_string(),
            organization: None,
            annotation: None,
            period: "2020".to_string(),
            description: None,
            tags: Vec::new(),
            special,
        }
    }

    #[test]
    fn card_tone_follows_special_flag_only() {
        assert_eq!(CardTone::for_entry(&entry("Got Married!", true)), CardTone::Special);
        assert_eq!(CardTone::for_entry(&entry("Got Married!", false)), CardTone::Standard);
        assert_eq!(CardTone::for_entry(&entry("Senior Engineer", false)), CardTone::Standard);
    }

    #[test]
    fn header_condenses_past_threshold() {
        assert!(!header_condensed(50.0, 50.0));
        assert!(header_condensed(50.5, 50.0));
    }
}
