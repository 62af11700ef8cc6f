//! Annotation labels and their resolved placements.
//!
//! A [`LabelItem`] is a callout that wants to sit at a normalized position on
//! a horizontal track, in a preferred vertical lane. The layout engine turns
//! each one into a [`PlacedItem`] carrying the resolved pixel position.
//!
//! Label widths are estimated from character count instead of measured
//! glyphs, so a layout is identical on every machine regardless of fonts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Narrowest footprint a label can have, in pixels.
pub const MIN_LABEL_WIDTH: i32 = 120;

/// Widest footprint a label can have, in pixels.
pub const MAX_LABEL_WIDTH: i32 = 260;

const PIXELS_PER_CHAR: i32 = 9;
const LABEL_PADDING: i32 = 40;

/// Estimated rendered width of a label, in pixels.
///
/// Counts Unicode scalar values, nine pixels each plus padding, clamped to
/// [`MIN_LABEL_WIDTH`]..=[`MAX_LABEL_WIDTH`].
///
/// # Examples
///
/// ```
/// use corkboard_core::label::estimated_width;
///
/// assert_eq!(estimated_width("AI"), 120);
/// assert_eq!(estimated_width("Design Sprint"), 157);
/// assert_eq!(estimated_width(&"x".repeat(40)), 260);
/// ```
pub fn estimated_width(text: &str) -> i32 {
    let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    chars
        .saturating_mul(PIXELS_PER_CHAR)
        .saturating_add(LABEL_PADDING)
        .clamp(MIN_LABEL_WIDTH, MAX_LABEL_WIDTH)
}

/// Grouping tag for a label, used only to pick its rendering color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A label anchored somewhere along a horizontal track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelItem {
    /// Label content; determines the estimated width.
    pub text: String,
    /// Horizontal position along the track, normalized to `0.0..=1.0`.
    pub axis_position: f32,
    /// Preferred signed pixel offset from the baseline.
    #[serde(default)]
    pub vertical_offset: i32,
    #[serde(default)]
    pub category: Option<Category>,
}

impl LabelItem {
    /// Creates an uncategorized label.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_core::label::{Category, LabelItem};
    ///
    /// let label = LabelItem::new("Inception", 0.13, -90)
    ///     .with_category(Category::new("design-thinking"));
    /// assert_eq!(label.category.unwrap().name(), "design-thinking");
    /// ```
    pub fn new(text: impl Into<String>, axis_position: f32, vertical_offset: i32) -> Self {
        Self {
            text: text.into(),
            axis_position,
            vertical_offset,
            category: None,
        }
    }

    /// Sets the category (builder style).
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// A label with its resolved position on the track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    /// Position of the label in the input sequence.
    pub index: usize,
    pub text: String,
    pub axis_position: f32,
    pub category: Option<Category>,
    /// Estimated footprint width, see [`estimated_width`].
    pub estimated_width: i32,
    /// Horizontal center of the label, in track pixels.
    pub x: f32,
    /// Resolved offset from the baseline; may differ from the input offset.
    pub vertical_offset: i32,
}

impl PlacedItem {
    /// Left edge of the label footprint.
    pub fn left(&self) -> f32 {
        self.x - self.estimated_width as f32 / 2.0
    }

    /// Right edge of the label footprint.
    pub fn right(&self) -> f32 {
        self.x + self.estimated_width as f32 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_estimated_width_clamps() {
        assert_eq!(estimated_width(""), MIN_LABEL_WIDTH);
        assert_eq!(estimated_width("abc"), 120);
        assert_eq!(estimated_width(&"a".repeat(9)), 121);
        assert_eq!(estimated_width(&"a".repeat(24)), 256);
        assert_eq!(estimated_width(&"a".repeat(40)), 260);
    }

    #[test]
    fn test_estimated_width_counts_chars_not_bytes() {
        // Nine characters, eighteen bytes.
        let text = "ééééééééé";
        assert_eq!(text.len(), 18);
        assert_eq!(estimated_width(text), 121);
    }

    #[test]
    fn test_placed_item_edges() {
        let placed = PlacedItem {
            index: 0,
            text: "OOUX".to_string(),
            axis_position: 0.5,
            category: None,
            estimated_width: 120,
            x: 500.0,
            vertical_offset: 0,
        };

        assert_approx_eq!(f32, placed.left(), 440.0);
        assert_approx_eq!(f32, placed.right(), 560.0);
    }

    #[test]
    fn test_label_deserialize_defaults() {
        let label: LabelItem =
            serde_json::from_str(r#"{"text": "Scrum", "axis_position": 0.4}"#).unwrap();

        assert_eq!(label, LabelItem::new("Scrum", 0.4, 0));
    }

    #[test]
    fn test_category_is_a_plain_string() {
        let label: LabelItem = serde_json::from_str(
            r#"{"text": "Sprint Planning", "axis_position": 0.68, "vertical_offset": 60, "category": "agile"}"#,
        )
        .unwrap();

        assert_eq!(label.category, Some(Category::new("agile")));
        assert_eq!(label.category.unwrap().to_string(), "agile");
    }

    proptest::proptest! {
        #[test]
        fn prop_estimated_width_in_range(text in "\\PC{0,80}") {
            let width = estimated_width(&text);
            proptest::prop_assert!((MIN_LABEL_WIDTH..=MAX_LABEL_WIDTH).contains(&width));
        }
    }
}
