//! SVG rendering for sticky-note sections: the timeline, the evidence ring
//! and the scattered notes.

use svg::node::element as svg_element;

use corkboard_core::{
    geometry::{Bounds, Point, Size},
    sticky::{StickyColor, font_size_rem},
};

use super::{Band, FONT_FAMILY, Svg};
use crate::layout::{StickyLayout, ring::ClusterLayout, timeline::TimelineLayout};

const REM: f32 = 16.0;
const LINE_HEIGHT: f32 = 1.25;

/// A note ready to draw.
struct Note<'a> {
    text: &'a str,
    top_left: Point,
    size: Size,
    color: StickyColor,
    tilt: i8,
}

impl Svg {
    fn render_note(&self, note: &Note) -> svg_element::Group {
        let center = note.top_left.add_point(note.size.half());

        let paper = svg_element::Rectangle::new()
            .set("x", note.top_left.x())
            .set("y", note.top_left.y())
            .set("width", note.size.width())
            .set("height", note.size.height())
            .set("rx", 6)
            .set("fill", note.color.fill())
            .set("stroke", self.ink.with_alpha(0.12));

        let font_size = font_size_rem(note.text) * REM;
        let lines: Vec<&str> = note.text.lines().collect();
        let first_y =
            center.y() - (lines.len().saturating_sub(1)) as f32 * font_size * LINE_HEIGHT / 2.0;

        lines.iter().enumerate().fold(
            svg_element::Group::new()
                .set(
                    "transform",
                    format!("rotate({} {} {})", note.tilt, center.x(), center.y()),
                )
                .add(paper),
            |group, (i, line)| {
                group.add(
                    svg_element::Text::new(*line)
                        .set("x", center.x())
                        .set("y", first_y + i as f32 * font_size * LINE_HEIGHT)
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle")
                        .set("font-family", FONT_FAMILY)
                        .set("font-size", font_size)
                        .set("fill", self.ink),
                )
            },
        )
    }

    fn connector(&self, from: Point, to: Point) -> svg_element::Line {
        svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", self.ink.with_alpha(0.35))
            .set("stroke-width", 2)
            .set("stroke-dasharray", "6 6")
    }

    /// Renders the year axis with work notes above the milestone lane.
    pub(super) fn render_timeline(&mut self, layout: &TimelineLayout) -> Band {
        let axis = layout.axis();
        let side = axis.metrics().sticky_size;
        let axis_y = layout.axis_y();

        let mut group = svg_element::Group::new().add(
            svg_element::Line::new()
                .set("x1", 0)
                .set("y1", axis_y)
                .set("x2", axis.width())
                .set("y2", axis_y)
                .set("stroke", self.ink)
                .set("stroke-width", 3),
        );

        for year in axis.years() {
            let x = axis.tick_x(year);
            group = group
                .add(
                    svg_element::Line::new()
                        .set("x1", x)
                        .set("y1", axis_y - 10.0)
                        .set("x2", x)
                        .set("y2", axis_y + 10.0)
                        .set("stroke", self.ink)
                        .set("stroke-width", 2),
                )
                .add(
                    svg_element::Text::new(year.to_string())
                        .set("x", x)
                        .set("y", axis_y - 22.0)
                        .set("text-anchor", "middle")
                        .set("font-family", FONT_FAMILY)
                        .set("font-size", REM)
                        .set("fill", self.ink),
                );
        }

        for sticky in layout.work().iter().chain(layout.milestones()) {
            let text = format!("{}\n{}", sticky.title, sticky.organization);
            let note = Note {
                text: &text,
                top_left: sticky.position,
                size: Size::square(side),
                color: sticky.color,
                tilt: self.next_tilt(None),
            };
            group = group.add(self.render_note(&note));
        }

        Band {
            group,
            size: Size::new(axis.width(), layout.height()),
        }
    }

    /// Renders the hub, both rings and their connectors.
    pub(super) fn render_evidence(&mut self, layout: &ClusterLayout) -> Band {
        let placements = || {
            std::iter::once(&layout.hub)
                .chain(&layout.parents)
                .chain(&layout.children)
        };
        let bounds = placements()
            .map(|placement| Bounds::new_from_top_left(placement.position, placement.size))
            .fold(
                Bounds::new_from_top_left(layout.hub.position, layout.hub.size),
                |bounds, next| bounds.merge(&next),
            );
        let origin = Point::new(bounds.min_x(), bounds.min_y());

        let mut group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", -origin.x(), -origin.y()),
        );

        for parent in &layout.parents {
            group = group.add(self.connector(layout.hub.center(), parent.center()));
        }
        for child in &layout.children {
            let anchor = child
                .parent
                .as_deref()
                .and_then(|id| layout.parent(id))
                .map_or(layout.hub.center(), |parent| parent.center());
            group = group.add(self.connector(anchor, child.center()));
        }

        for placement in placements() {
            let note = Note {
                text: &placement.label,
                top_left: placement.position,
                size: placement.size,
                color: placement.color,
                tilt: 0,
            };
            group = group.add(self.render_note(&note));
        }

        Band {
            group: svg_element::Group::new().add(group),
            size: Size::new(bounds.width(), bounds.height()),
        }
    }

    /// Renders notes scattered around the hero box.
    pub(super) fn render_stickies(&mut self, layout: &StickyLayout) -> Band {
        let scatter = layout.scatter();
        let side = scatter.sticky_size;

        let mut notes = Vec::new();
        for (sticky, top_left) in layout.placed() {
            let side = side.max(sticky.size().min_side());
            notes.push((sticky, top_left, side, self.next_tilt(sticky.rotation)));
        }

        let viewport = Bounds::new_from_top_left(Point::default(), layout.viewport());
        let bounds = notes
            .iter()
            .map(|(_, top_left, side, _)| Bounds::new_from_top_left(*top_left, Size::square(*side)))
            .fold(viewport, |bounds, next| bounds.merge(&next));
        let origin = Point::new(bounds.min_x(), bounds.min_y());

        let hero = layout.hero();
        let mut group = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({}, {})", -origin.x(), -origin.y()),
            )
            .add(
                svg_element::Rectangle::new()
                    .set("x", hero.min_x())
                    .set("y", hero.min_y())
                    .set("width", hero.width())
                    .set("height", hero.height())
                    .set("fill", "none")
                    .set("stroke", self.ink.with_alpha(0.2))
                    .set("stroke-dasharray", "8 8"),
            );

        for (sticky, top_left, side, tilt) in notes {
            let note = Note {
                text: &sticky.text,
                top_left,
                size: Size::square(side),
                color: sticky.color,
                tilt,
            };
            group = group.add(self.render_note(&note));
        }

        Band {
            group: svg_element::Group::new().add(group),
            size: Size::new(bounds.width(), bounds.height()),
        }
    }
}
