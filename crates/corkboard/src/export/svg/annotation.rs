//! SVG rendering for annotation callouts.

use svg::node::element::{self as svg_element, path::Data};

use corkboard_core::{geometry::Size, label::PlacedItem};

use super::{Band, FONT_FAMILY, Svg};
use crate::layout::AnnotationLayout;

/// Distance from a callout's anchor row to the top of its text box.
const LABEL_RISE: f32 = 30.0;
/// Height of a callout text box.
const LABEL_HEIGHT: f32 = 48.0;
/// How far the connector's control point bends away from the straight line.
const CONNECTOR_BEND: f32 = 60.0;
/// Space kept to the right of the right-most callout.
const RIGHT_PADDING: f32 = 40.0;
const LABEL_FONT_SIZE: f32 = 21.6;

impl Svg {
    /// Renders the callouts with their connectors and the baseline.
    pub(super) fn render_annotations(&mut self, layout: &AnnotationLayout) -> Band {
        let items = layout.items();
        let highest = items
            .iter()
            .map(|item| item.vertical_offset)
            .min()
            .unwrap_or(0)
            .min(0);
        let lowest = items
            .iter()
            .map(|item| item.vertical_offset)
            .max()
            .unwrap_or(0)
            .max(0);

        let baseline_y = LABEL_RISE - highest as f32;
        let height = baseline_y + lowest as f32 - LABEL_RISE + LABEL_HEIGHT;
        let width = items
            .iter()
            .map(|item| item.right() + RIGHT_PADDING)
            .fold(layout.track_width(), f32::max);

        let baseline = svg_element::Line::new()
            .set("x1", 0)
            .set("y1", baseline_y)
            .set("x2", layout.track_width())
            .set("y2", baseline_y)
            .set("stroke", self.ink.with_alpha(0.18))
            .set("stroke-width", 6)
            .set("stroke-linecap", "round");

        let group = items.iter().fold(
            svg_element::Group::new().add(baseline),
            |group, item| {
                let (connector, label) = self.render_callout(item, baseline_y);
                group.add(connector).add(label)
            },
        );

        Band {
            group,
            size: Size::new(width, height),
        }
    }

    fn render_callout(
        &self,
        item: &PlacedItem,
        baseline_y: f32,
    ) -> (svg_element::Path, svg_element::Text) {
        let top = baseline_y + item.vertical_offset as f32 - LABEL_RISE;
        let above = item.vertical_offset < 0;

        let connector_x = item.x + item.estimated_width as f32 / 2.0 - 8.0;
        let start_y = if above { top + 38.0 } else { top };
        let bend = if above { CONNECTOR_BEND } else { -CONNECTOR_BEND };
        let control_y = (start_y + baseline_y) / 2.0 + bend;

        let data = Data::new()
            .move_to((connector_x, start_y))
            .quadratic_curve_to((connector_x, control_y, connector_x, baseline_y));
        let connector = svg_element::Path::new()
            .set("d", data)
            .set("stroke", self.ink)
            .set("stroke-width", 2)
            .set("fill", "none")
            .set("marker-end", "url(#arrowhead)");

        let color = self.category_color(item.category.as_ref().map(|category| category.name()));
        let label = svg_element::Text::new(item.text.as_str())
            .set("x", item.x + item.estimated_width as f32 / 2.0)
            .set("y", top + LABEL_HEIGHT / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", LABEL_FONT_SIZE)
            .set("font-weight", 600)
            .set("letter-spacing", -1)
            .set("fill", color);

        (connector, label)
    }
}
