//! Configuration types for Corkboard layout and rendering.
//!
//! This module provides configuration structures that control how boards
//! are laid out and styled. All types implement [`serde::Deserialize`] and
//! every field has a default, so a configuration file only needs to name the
//! values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Parameters for each layout engine.
//! - [`StyleConfig`] - Visual styling options such as category colors.
//!
//! # Example
//!
//! ```
//! # use corkboard::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [layout.annotation]
//!     min_vertical_gap = 48.0
//!     drift_ceiling = 200
//!
//!     [style.category_colors]
//!     agile = "#22c55e"
//!     "##,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().annotation().min_vertical_gap, 48.0);
//! assert_eq!(config.layout().annotation().max_attempts_per_item, 20);
//! assert!(config.style().category_color("agile").unwrap().is_some());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use corkboard_core::{color::Color, geometry::Size};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the scatter seed, keeping every other setting.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.layout.scatter.seed = seed;
        self
    }
}

/// Parameters for every layout engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    annotation: AnnotationConfig,

    #[serde(default)]
    timeline: TimelineConfig,

    #[serde(default)]
    scatter: ScatterConfig,
}

impl LayoutConfig {
    pub fn new(
        annotation: AnnotationConfig,
        timeline: TimelineConfig,
        scatter: ScatterConfig,
    ) -> Self {
        Self {
            annotation,
            timeline,
            scatter,
        }
    }

    /// Returns the annotation engine parameters.
    pub fn annotation(&self) -> &AnnotationConfig {
        &self.annotation
    }

    /// Returns the career timeline parameters.
    pub fn timeline(&self) -> &TimelineConfig {
        &self.timeline
    }

    /// Returns the sticky scatter parameters.
    pub fn scatter(&self) -> &ScatterConfig {
        &self.scatter
    }
}

/// Annotation engine parameters.
///
/// The track width is not part of the configuration; it belongs to the
/// board being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Extra horizontal clearance required between two label footprints.
    pub min_horizontal_gap: f32,
    /// Vertical distance below which two horizontally overlapping labels collide.
    pub min_vertical_gap: f32,
    /// Upper bound on collision scans for a single label.
    pub max_attempts_per_item: usize,
    /// Input offsets are clamped to `-offset_clamp..=offset_clamp` before layout.
    pub offset_clamp: i32,
    /// Optional hard limit applied after collision resolution.
    pub drift_ceiling: Option<i32>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            min_horizontal_gap: 24.0,
            min_vertical_gap: 64.0,
            max_attempts_per_item: 20,
            offset_clamp: 120,
            drift_ceiling: None,
        }
    }
}

/// Career timeline parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// When set, sticky size and stack gap follow this viewport width's
    /// breakpoints instead of the desktop metrics.
    pub viewport_width: Option<f32>,
    /// Overrides the horizontal distance between two year ticks.
    pub year_gap: Option<f32>,
}

/// Parameters for scattering stickies around a hero box.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Seed for shuffle, ellipse aspect and jitter.
    pub seed: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub hero_width: f32,
    pub hero_height: f32,
}

impl ScatterConfig {
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    pub fn hero(&self) -> Size {
        Size::new(self.hero_width, self.hero_height)
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            hero_width: 520.0,
            hero_height: 180.0,
        }
    }
}

/// Visual styling configuration for rendered boards.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color as a CSS color string; transparent when absent.
    #[serde(default)]
    background_color: Option<String>,

    /// Label text color per category name.
    #[serde(default)]
    category_colors: IndexMap<String, String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured color for a category, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn category_color(&self, category: &str) -> Result<Option<Color>, String> {
        self.category_colors
            .get(category)
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid color for category `{category}`: {err}"))
    }

    /// Names of every category with a configured color.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.category_colors.keys().map(String::as_str)
    }

    /// Sets a category color (builder style).
    pub fn with_category_color(
        mut self,
        category: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.category_colors.insert(category.into(), color.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(*config.layout().annotation(), AnnotationConfig::default());
        assert_eq!(*config.layout().scatter(), ScatterConfig::default());
        assert_eq!(config.layout().timeline().viewport_width, None);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_partial_annotation_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout.annotation]
            min_horizontal_gap = 10.0
            "#,
        )
        .unwrap();

        let annotation = config.layout().annotation();
        assert_eq!(annotation.min_horizontal_gap, 10.0);
        assert_eq!(annotation.min_vertical_gap, 64.0);
        assert_eq!(annotation.offset_clamp, 120);
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            background_color = "cork"
            "#,
        )
        .unwrap();

        let err = config.style().background_color().unwrap_err();
        assert!(err.contains("Invalid background color"));
    }

    #[test]
    fn test_unknown_category_has_no_color() {
        let style = StyleConfig::default().with_category_color("agile", "#22c55e");

        assert!(style.category_color("agile").unwrap().is_some());
        assert!(style.category_color("design-thinking").unwrap().is_none());
    }
}
