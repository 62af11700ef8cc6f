//! SVG rendering of laid-out boards.
//!
//! Each board section becomes a horizontal band; bands are stacked top to
//! bottom in the order annotations, timeline, evidence, stickies. The
//! document is built in memory and returned as text.

mod annotation;
mod sticky;

use indexmap::IndexMap;
use log::debug;
use svg::{Document, node::element as svg_element};

use corkboard_core::{color::Color, geometry::Size};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    layout::BoardLayout,
    rng::Mulberry32,
};

/// Space around the document and between bands.
const PADDING: f32 = 40.0;

const FONT_FAMILY: &str = "'Permanent Marker', 'Comic Sans MS', cursive";

/// Rendered content of one board section.
struct Band {
    group: svg_element::Group,
    size: Size,
}

/// Builder for [`Svg`].
///
/// # Examples
///
/// ```
/// use corkboard::{config::StyleConfig, export::svg::SvgBuilder};
///
/// let style = StyleConfig::default().with_category_color("agile", "#22c55e");
/// let svg = SvgBuilder::new().with_style(&style).with_seed(7).build();
/// assert!(svg.is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    seed: u32,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style configuration
    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the seed used to tilt notes without an explicit rotation
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Resolve every configured color.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Style`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let background = style.background_color().map_err(export::Error::Style)?;

        let mut category_colors = IndexMap::new();
        for name in style.category_names() {
            if let Some(color) = style.category_color(name).map_err(export::Error::Style)? {
                category_colors.insert(name.to_string(), color);
            }
        }

        Ok(Svg {
            background,
            category_colors,
            ink: Color::default(),
            label_color: Color::new("#3b82f6").map_err(export::Error::Style)?,
            tilt: Mulberry32::new(self.seed),
        })
    }
}

/// SVG exporter.
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    category_colors: IndexMap<String, Color>,
    /// Strokes and sticky text.
    ink: Color,
    /// Callout text without a configured category color.
    label_color: Color,
    tilt: Mulberry32,
}

impl Svg {
    /// Render a laid-out board to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the layout produced non-finite
    /// dimensions.
    pub fn render_board(&mut self, layout: &BoardLayout) -> Result<Document, export::Error> {
        let bands: Vec<Band> = [
            layout
                .annotations()
                .map(|annotations| self.render_annotations(annotations)),
            layout
                .timeline()
                .map(|timeline| self.render_timeline(timeline)),
            layout
                .evidence()
                .map(|evidence| self.render_evidence(evidence)),
            layout
                .stickies()
                .map(|stickies| self.render_stickies(stickies)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let content_width = bands
            .iter()
            .map(|band| band.size.width())
            .fold(0.0f32, f32::max);
        let content_height = bands.iter().map(|band| band.size.height()).sum::<f32>()
            + PADDING * bands.len().saturating_sub(1) as f32;
        let svg_size = Self::calculate_svg_dimensions(Size::new(content_width, content_height));

        if !svg_size.width().is_finite() || !svg_size.height().is_finite() {
            return Err(export::Error::Render(format!(
                "board has non-finite size {}x{}",
                svg_size.width(),
                svg_size.height()
            )));
        }

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());

        let mut doc = self.add_background(doc, svg_size);
        doc = doc.add(self.marker_definitions());

        let mut top = PADDING;
        for band in bands {
            let height = band.size.height();
            doc = doc.add(
                band.group
                    .set("transform", format!("translate({PADDING}, {top})")),
            );
            top += height + PADDING;
        }

        debug!(width = svg_size.width(), height = svg_size.height(); "SVG document rendered");
        Ok(doc)
    }

    fn calculate_svg_dimensions(content: Size) -> Size {
        Size::new(
            content.width() + 2.0 * PADDING,
            content.height() + 2.0 * PADDING,
        )
    }

    fn add_background(&self, doc: Document, size: Size) -> Document {
        match self.background {
            Some(color) => doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", color),
            ),
            None => doc,
        }
    }

    /// Arrowhead used by callout connectors.
    fn marker_definitions(&self) -> svg_element::Definitions {
        let arrowhead = svg_element::Marker::new()
            .set("id", "arrowhead")
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("refX", 3)
            .set("refY", 3)
            .set("orient", "auto")
            .set("markerUnits", "strokeWidth")
            .add(
                svg_element::Path::new()
                    .set("d", "M0,0 L6,3 L0,6")
                    .set("fill", self.ink),
            );

        svg_element::Definitions::new().add(arrowhead)
    }

    /// Text color for a callout of the given category.
    fn category_color(&self, category: Option<&str>) -> Color {
        category
            .and_then(|name| self.category_colors.get(name))
            .copied()
            .unwrap_or(self.label_color)
    }

    /// Tilt for a note: its own rotation, or the next seeded one.
    fn next_tilt(&mut self, rotation: Option<i8>) -> i8 {
        rotation.unwrap_or_else(|| self.tilt.next_tilt())
    }
}

impl Exporter for Svg {
    fn export_board(&mut self, layout: &BoardLayout) -> Result<String, export::Error> {
        let doc = self.render_board(layout)?;
        Ok(doc.to_string())
    }
}
