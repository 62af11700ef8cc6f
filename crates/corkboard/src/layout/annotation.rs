//! Collision-avoiding placement of annotation callouts along a track.
//!
//! Labels keep their horizontal position; only their vertical offsets move.
//! Labels are visited left to right and each one is pushed, alternately up
//! and down, until it clears every label placed before it or its attempt
//! budget runs out. A label that runs out keeps its last offset: the overlap
//! that remains is cosmetic and is reported, not raised.

use log::{debug, trace};

use corkboard_core::label::{LabelItem, PlacedItem, estimated_width};

use crate::config::AnnotationConfig;

/// Places labels on a horizontal track without overlapping footprints.
///
/// The engine is a plain value: [`place`](Self::place) is a pure function of
/// the engine parameters and its input, so identical calls give identical
/// results.
///
/// # Examples
///
/// ```
/// use corkboard::layout::annotation::AnnotationEngine;
/// use corkboard_core::label::LabelItem;
///
/// let engine = AnnotationEngine::new(1000.0);
/// let placed = engine.place(&[
///     LabelItem::new("Inception", 0.5, 0),
///     LabelItem::new("Design Sprint", 0.5, 0),
/// ]);
///
/// assert_eq!(placed[0].vertical_offset, 0);
/// assert_eq!(placed[1].vertical_offset, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationEngine {
    track_width: f32,
    min_horizontal_gap: f32,
    min_vertical_gap: f32,
    max_attempts_per_item: usize,
    offset_clamp: i32,
    drift_ceiling: Option<i32>,
}

impl Default for AnnotationEngine {
    fn default() -> Self {
        Self::new(1200.0)
    }
}

impl AnnotationEngine {
    /// Create an engine for a track of the given pixel width, with default
    /// gaps and attempt budget.
    pub fn new(track_width: f32) -> Self {
        Self::from_config(track_width, &AnnotationConfig::default())
    }

    /// Create an engine from configuration.
    pub fn from_config(track_width: f32, config: &AnnotationConfig) -> Self {
        Self {
            track_width,
            min_horizontal_gap: 0.0,
            min_vertical_gap: 0.0,
            max_attempts_per_item: 1,
            offset_clamp: 0,
            drift_ceiling: None,
        }
        .with_min_horizontal_gap(config.min_horizontal_gap)
        .with_min_vertical_gap(config.min_vertical_gap)
        .with_max_attempts_per_item(config.max_attempts_per_item)
        .with_offset_clamp(config.offset_clamp)
        .with_drift_ceiling(config.drift_ceiling)
    }

    /// Set the track width in pixels
    pub fn with_track_width(mut self, track_width: f32) -> Self {
        self.track_width = track_width;
        self
    }

    /// Set the extra horizontal clearance between footprints
    pub fn with_min_horizontal_gap(mut self, gap: f32) -> Self {
        self.min_horizontal_gap = non_negative(gap);
        self
    }

    /// Set the vertical distance below which labels collide. This is also
    /// the size of a single push.
    pub fn with_min_vertical_gap(mut self, gap: f32) -> Self {
        self.min_vertical_gap = non_negative(gap);
        self
    }

    /// Set how many collision scans a single label may spend; at least one.
    pub fn with_max_attempts_per_item(mut self, attempts: usize) -> Self {
        self.max_attempts_per_item = attempts.max(1);
        self
    }

    /// Set the symmetric range input offsets are clamped to before layout
    pub fn with_offset_clamp(mut self, clamp: i32) -> Self {
        self.offset_clamp = clamp.saturating_abs();
        self
    }

    /// Set a hard limit on offsets after collision resolution.
    ///
    /// Without a ceiling, offsets may drift past the pre-layout clamp when
    /// many labels stack up.
    pub fn with_drift_ceiling(mut self, ceiling: Option<i32>) -> Self {
        self.drift_ceiling = ceiling.map(i32::saturating_abs);
        self
    }

    /// Track width actually used for positioning.
    ///
    /// Non-positive and non-finite widths become `1.0`.
    pub fn track_width(&self) -> f32 {
        if self.track_width.is_finite() && self.track_width > 0.0 {
            self.track_width
        } else {
            1.0
        }
    }

    pub fn min_horizontal_gap(&self) -> f32 {
        self.min_horizontal_gap
    }

    pub fn min_vertical_gap(&self) -> f32 {
        self.min_vertical_gap
    }

    /// Place `items`, returning one placement per item in input order.
    pub fn place(&self, items: &[LabelItem]) -> Vec<PlacedItem> {
        let track_width = self.track_width();

        let mut placed: Vec<PlacedItem> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.initial_placement(index, item, track_width))
            .collect();

        // Stable: equal x keeps input order.
        placed.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut push = 1;
        for i in 1..placed.len() {
            let (earlier, rest) = placed.split_at_mut(i);
            let current = &mut rest[0];

            let start = current.vertical_offset;
            self.resolve(current, earlier, push);
            trace!(
                index = current.index,
                from = start,
                to = current.vertical_offset;
                "Resolved label offset"
            );

            push = -push;
        }

        if let Some(ceiling) = self.drift_ceiling {
            for item in &mut placed {
                item.vertical_offset = item.vertical_offset.clamp(-ceiling, ceiling);
            }
        }

        placed.sort_by_key(|item| item.index);

        debug!(items = placed.len(), track_width; "Annotations placed");
        placed
    }

    /// Pairs of placements (by input index) that still collide.
    ///
    /// Empty for any layout where every label was fully separated.
    pub fn residual_overlaps(&self, placed: &[PlacedItem]) -> Vec<(usize, usize)> {
        let mut overlaps = Vec::new();
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                if self.collides(a, b) {
                    overlaps.push((a.index.min(b.index), a.index.max(b.index)));
                }
            }
        }
        overlaps
    }

    fn initial_placement(&self, index: usize, item: &LabelItem, track_width: f32) -> PlacedItem {
        let width = estimated_width(&item.text);
        let axis_position = if item.axis_position.is_finite() {
            item.axis_position
        } else {
            0.0
        };
        let half = width as f32 / 2.0;
        let x = axis_position * (track_width - width as f32) + half;

        PlacedItem {
            index,
            text: item.text.clone(),
            axis_position: item.axis_position,
            category: item.category.clone(),
            estimated_width: width,
            x,
            vertical_offset: item
                .vertical_offset
                .clamp(-self.offset_clamp, self.offset_clamp),
        }
    }

    /// Push `current` away from `earlier` labels.
    ///
    /// Each attempt scans every earlier label once, pushing on each collision
    /// it meets and carrying the new offset into the rest of the scan.
    fn resolve(&self, current: &mut PlacedItem, earlier: &[PlacedItem], push: i32) {
        let step = push.saturating_mul(self.vertical_step());

        for _ in 0..self.max_attempts_per_item {
            let mut collided = false;
            for previous in earlier {
                if self.collides(current, previous) {
                    current.vertical_offset = current.vertical_offset.saturating_add(step);
                    collided = true;
                }
            }
            if !collided {
                return;
            }
        }

        if earlier.iter().any(|previous| self.collides(current, previous)) {
            debug!(
                index = current.index,
                text = current.text.as_str(),
                attempts = self.max_attempts_per_item;
                "Label still overlaps after exhausting its attempts"
            );
        }
    }

    fn collides(&self, a: &PlacedItem, b: &PlacedItem) -> bool {
        let reach = (a.estimated_width + b.estimated_width) as f32 / 2.0 + self.min_horizontal_gap;
        if (a.x - b.x).abs() >= reach {
            return false;
        }

        let vertical_distance = (i64::from(a.vertical_offset) - i64::from(b.vertical_offset)).abs();
        (vertical_distance as f32) < self.min_vertical_gap
    }

    fn vertical_step(&self) -> i32 {
        self.min_vertical_gap.round() as i32
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use corkboard_core::label::Category;

    use super::*;

    fn offsets(placed: &[PlacedItem]) -> Vec<i32> {
        placed.iter().map(|item| item.vertical_offset).collect()
    }

    #[test]
    fn test_empty_input() {
        let engine = AnnotationEngine::new(1000.0);
        assert!(engine.place(&[]).is_empty());
    }

    #[test]
    fn test_single_item_is_untouched() {
        let engine = AnnotationEngine::new(1000.0);
        let placed = engine.place(&[LabelItem::new("OOUX", 0.5, 30)]);

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].vertical_offset, 30);
        assert_eq!(placed[0].estimated_width, 120);
        assert_approx_eq!(f32, placed[0].x, 500.0);
    }

    #[test]
    fn test_x_centers_footprint_in_usable_width() {
        let engine = AnnotationEngine::new(1000.0);
        let placed = engine.place(&[
            LabelItem::new("Web", 0.0, 0),
            LabelItem::new("User Experience Definition", 1.0, 200),
        ]);

        // 26 characters: 26 * 9 + 40 = 274, clamped to 260.
        assert_eq!(placed[1].estimated_width, 260);
        assert_approx_eq!(f32, placed[0].x, 60.0);
        assert_approx_eq!(f32, placed[1].x, 870.0);
        assert_approx_eq!(f32, placed[1].right(), 1000.0);
    }

    #[test]
    fn test_offsets_clamped_before_layout() {
        let engine = AnnotationEngine::new(1000.0);
        let placed = engine.place(&[
            LabelItem::new("Problem Framing", 0.01, -210),
            LabelItem::new("Backlog Management", 0.99, 180),
        ]);

        assert_eq!(offsets(&placed), vec![-120, 120]);
    }

    #[test]
    fn test_degenerate_track_widths_stay_finite() {
        for width in [0.0, -50.0, f32::NAN, f32::INFINITY] {
            let engine = AnnotationEngine::new(width);
            let placed = engine.place(&[
                LabelItem::new("Scrum", 0.2, 0),
                LabelItem::new("Agile", 0.8, 0),
            ]);

            assert_eq!(placed.len(), 2);
            assert!(placed.iter().all(|item| item.x.is_finite()));
        }
    }

    #[test]
    fn test_non_finite_axis_position_treated_as_start() {
        let engine = AnnotationEngine::new(1000.0);
        let placed = engine.place(&[LabelItem::new("AI", f32::NAN, 0)]);

        assert_approx_eq!(f32, placed[0].x, 60.0);
        assert!(placed[0].axis_position.is_nan());
    }

    #[test]
    fn test_well_spread_labels_do_not_move() {
        let engine = AnnotationEngine::new(1000.0);
        let placed = engine.place(&[
            LabelItem::new("Web", 0.1, 0),
            LabelItem::new("XR", 0.5, 0),
            LabelItem::new("IoT", 0.9, 0),
        ]);

        assert_eq!(offsets(&placed), vec![0, 0, 0]);
        assert!(engine.residual_overlaps(&placed).is_empty());
    }

    #[test]
    fn test_push_direction_alternates() {
        let engine = AnnotationEngine::new(1000.0);
        let items: Vec<_> = ["Scrum", "Agile", "Mobile", "Research", "Strategy"]
            .into_iter()
            .map(|text| LabelItem::new(text, 0.5, 0))
            .collect();

        let placed = engine.place(&items);

        assert_eq!(offsets(&placed), vec![0, 64, -64, 128, -128]);
        assert!(engine.residual_overlaps(&placed).is_empty());
    }

    #[test]
    fn test_push_direction_toggles_even_without_collision() {
        let engine = AnnotationEngine::new(1000.0);
        // The second label in placement order is clear of the first and never
        // moves, but still consumes the upward push.
        let placed = engine.place(&[
            LabelItem::new("Scrum", 0.0, 0),
            LabelItem::new("Agile", 0.5, 0),
            LabelItem::new("Mobile", 0.5, 0),
        ]);

        assert_eq!(offsets(&placed), vec![0, 0, -64]);
    }

    #[test]
    fn test_output_restores_input_order() {
        let engine = AnnotationEngine::new(1000.0);
        let items = vec![
            LabelItem::new("Release Planning", 0.9, 0),
            LabelItem::new("Product Roadmap", 0.1, 0),
            LabelItem::new("Sprint Planning", 0.5, 0),
        ];

        let placed = engine.place(&items);

        let texts: Vec<_> = placed.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["Release Planning", "Product Roadmap", "Sprint Planning"]);
        let indices: Vec<_> = placed.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_texts_keep_their_identity() {
        let engine = AnnotationEngine::new(1000.0);
        let items = vec![
            LabelItem::new("Senior Experience Designer", 0.7, 0),
            LabelItem::new("Senior Experience Designer", 0.2, 0),
        ];

        let placed = engine.place(&items);

        assert_eq!(placed[0].index, 0);
        assert!(placed[0].x > placed[1].x);
    }

    #[test]
    fn test_category_is_carried_through() {
        let engine = AnnotationEngine::new(1000.0);
        let placed =
            engine.place(&[LabelItem::new("Scrum", 0.5, 0).with_category(Category::new("agile"))]);

        assert_eq!(placed[0].category, Some(Category::new("agile")));
    }

    #[test]
    fn test_drift_is_unbounded_by_default() {
        let engine = AnnotationEngine::new(1000.0);
        let items: Vec<_> = (0..7).map(|_| LabelItem::new("Scrum", 0.5, 120)).collect();

        let placed = engine.place(&items);

        assert!(placed.iter().any(|item| item.vertical_offset > 120));
    }

    #[test]
    fn test_drift_ceiling_limits_offsets() {
        let engine = AnnotationEngine::new(1000.0).with_drift_ceiling(Some(100));
        let items: Vec<_> = (0..7).map(|_| LabelItem::new("Scrum", 0.5, 0)).collect();

        let placed = engine.place(&items);

        assert!(placed.iter().all(|item| item.vertical_offset.abs() <= 100));
    }

    #[test]
    fn test_exhausted_attempts_keep_residual_overlap() {
        // A gap this small rounds to a zero push, so nothing can move.
        let engine = AnnotationEngine::new(1000.0).with_min_vertical_gap(0.4);
        let placed = engine.place(&[
            LabelItem::new("Scrum", 0.5, 0),
            LabelItem::new("Agile", 0.5, 0),
        ]);

        assert_eq!(offsets(&placed), vec![0, 0]);
        assert_eq!(engine.residual_overlaps(&placed), vec![(0, 1)]);
    }

    #[test]
    fn test_single_attempt_budget() {
        let engine = AnnotationEngine::new(1000.0).with_max_attempts_per_item(0);
        let items: Vec<_> = (0..3).map(|_| LabelItem::new("Scrum", 0.5, 0)).collect();

        let placed = engine.place(&items);

        // A zero budget is raised to one scan.
        assert_eq!(offsets(&placed), vec![0, 64, -64]);
    }

    #[test]
    fn test_horizontal_gap_controls_reach() {
        // Two 120px labels 150px apart: clear with a 24px gap, colliding with 40px.
        let items = vec![
            LabelItem::new("Web", 0.0, 0),
            LabelItem::new("XR", 150.0 / 880.0, 0),
        ];

        let relaxed = AnnotationEngine::new(1000.0).place(&items);
        assert_eq!(offsets(&relaxed), vec![0, 0]);

        let strict = AnnotationEngine::new(1000.0)
            .with_min_horizontal_gap(40.0)
            .place(&items);
        assert_eq!(offsets(&strict), vec![0, 64]);
    }

    fn label_strategy() -> impl Strategy<Value = LabelItem> {
        ("[A-Za-z ]{0,40}", 0.0f32..=1.0, -200i32..=200)
            .prop_map(|(text, axis_position, offset)| LabelItem::new(text, axis_position, offset))
    }

    proptest! {
        #[test]
        fn prop_cardinality_and_order(items in prop::collection::vec(label_strategy(), 0..40)) {
            let engine = AnnotationEngine::new(1200.0);
            let placed = engine.place(&items);

            prop_assert_eq!(placed.len(), items.len());
            for (index, (item, placement)) in items.iter().zip(&placed).enumerate() {
                prop_assert_eq!(placement.index, index);
                prop_assert_eq!(&placement.text, &item.text);
                prop_assert_eq!(placement.estimated_width, estimated_width(&item.text));
            }
        }

        #[test]
        fn prop_deterministic(items in prop::collection::vec(label_strategy(), 0..40)) {
            let engine = AnnotationEngine::new(900.0);
            let first = engine.place(&items);
            let second = engine.place(&items);

            prop_assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(&second) {
                prop_assert_eq!(a.x.to_bits(), b.x.to_bits());
                prop_assert_eq!(a.vertical_offset, b.vertical_offset);
            }
        }

        #[test]
        fn prop_x_order_follows_axis_order(items in prop::collection::vec(label_strategy(), 2..30)) {
            let engine = AnnotationEngine::new(1200.0);
            let placed = engine.place(&items);

            for item in &placed {
                let expected = item.axis_position * (1200.0 - item.estimated_width as f32)
                    + item.estimated_width as f32 / 2.0;
                prop_assert_eq!(item.x.to_bits(), expected.to_bits());
            }
        }

        #[test]
        fn prop_offsets_only_move_in_gap_steps(items in prop::collection::vec(label_strategy(), 0..30)) {
            let engine = AnnotationEngine::new(1200.0);
            let placed = engine.place(&items);

            for (item, placement) in items.iter().zip(&placed) {
                let start = item.vertical_offset.clamp(-120, 120);
                prop_assert_eq!((placement.vertical_offset - start) % 64, 0);
            }
        }
    }
}
