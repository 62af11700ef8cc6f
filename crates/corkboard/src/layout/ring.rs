//! Circular and elliptical sticky arrangements.
//!
//! - [`circle_positions`] spaces points evenly around a circle.
//! - [`ClusterRing`] puts a hub in the middle, parents on an inner ring and
//!   each child on an outer ring next to its parent.
//! - [`EllipseScatter`] strews notes around a hero box with seeded jitter so
//!   the board looks hand-pinned but reproducible.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use log::debug;
use serde::Deserialize;

use corkboard_core::{
    geometry::{Bounds, Point, Size},
    sticky::StickyColor,
};

use crate::rng::Mulberry32;

/// Centers of `count` points evenly spaced on a circle, starting at
/// `start_angle` and turning clockwise in screen coordinates.
pub fn circle_positions(count: usize, center: Point, radius: f32, start_angle: f32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32 + start_angle;
            center.polar_offset(radius, radius, angle)
        })
        .collect()
}

/// Side length of a scattered sticky for a viewport of the given width.
pub fn sticky_side_for_viewport(width: f32) -> f32 {
    if width < 500.0 {
        90.0
    } else if width < 900.0 {
        120.0
    } else {
        140.0
    }
}

/// An inner-ring item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingParent {
    pub id: String,
    pub label: String,
}

/// An outer-ring item attached to a parent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RingChild {
    pub id: String,
    pub label: String,
    pub parent: String,
    #[serde(default)]
    pub color: StickyColor,
}

/// A placed ring item.
#[derive(Debug, Clone, PartialEq)]
pub struct RingPlacement {
    pub id: String,
    pub label: String,
    /// Top-left corner of the note.
    pub position: Point,
    pub size: Size,
    pub angle: f32,
    pub color: StickyColor,
    /// Parent id for outer-ring items.
    pub parent: Option<String>,
}

impl RingPlacement {
    pub fn center(&self) -> Point {
        self.position.add_point(self.size.half())
    }
}

/// Result of [`ClusterRing::calculate`].
#[derive(Debug, Clone)]
pub struct ClusterLayout {
    pub hub: RingPlacement,
    pub parents: Vec<RingPlacement>,
    pub children: Vec<RingPlacement>,
}

impl ClusterLayout {
    pub fn parent(&self, id: &str) -> Option<&RingPlacement> {
        self.parents.iter().find(|parent| parent.id == id)
    }
}

/// Hub-and-rings board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterRing {
    board: Size,
    inner_radius: f32,
    outer_radius: f32,
    hub_size: f32,
    parent_size: f32,
    child_size: f32,
    sibling_spread: f32,
}

impl Default for ClusterRing {
    fn default() -> Self {
        Self {
            board: Size::new(1400.0, 900.0),
            inner_radius: 220.0,
            outer_radius: 470.0,
            hub_size: 170.0,
            parent_size: 140.0,
            child_size: 120.0,
            sibling_spread: PI / 10.0,
        }
    }
}

impl ClusterRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size; the hub sits at its center
    pub fn with_board(mut self, board: Size) -> Self {
        self.board = board;
        self
    }

    /// Set inner and outer ring radii
    pub fn with_radii(mut self, inner: f32, outer: f32) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    /// Set the angle between two siblings on the outer ring
    pub fn with_sibling_spread(mut self, spread: f32) -> Self {
        self.sibling_spread = spread;
        self
    }

    pub fn board(&self) -> Size {
        self.board
    }

    fn center(&self) -> Point {
        Point::new(self.board.width() / 2.0, self.board.height() / 2.0)
    }

    fn parent_angle(index: usize, count: usize) -> f32 {
        TAU * index as f32 / count as f32 - FRAC_PI_2
    }

    /// Place the hub, parents and children.
    ///
    /// Children keep their input order. A child whose parent is unknown is
    /// placed at angle zero.
    pub fn calculate(&self, hub: &str, parents: &[RingParent], children: &[RingChild]) -> ClusterLayout {
        let center = self.center();

        let hub_size = Size::square(self.hub_size);
        let hub = RingPlacement {
            id: "hub".to_string(),
            label: hub.to_string(),
            position: center.sub_point(hub_size.half()),
            size: hub_size,
            angle: 0.0,
            color: StickyColor::Yellow,
            parent: None,
        };

        let parent_size = Size::square(self.parent_size);
        let placed_parents: Vec<_> = parents
            .iter()
            .enumerate()
            .map(|(i, parent)| {
                let angle = Self::parent_angle(i, parents.len());
                RingPlacement {
                    id: parent.id.clone(),
                    label: parent.label.clone(),
                    position: center
                        .polar_offset(self.inner_radius, self.inner_radius, angle)
                        .sub_point(parent_size.half()),
                    size: parent_size,
                    angle,
                    color: StickyColor::Yellow,
                    parent: None,
                }
            })
            .collect();

        let child_size = Size::square(self.child_size);
        let placed_children: Vec<_> = children
            .iter()
            .map(|child| {
                let base_angle = parents
                    .iter()
                    .position(|parent| parent.id == child.parent)
                    .map_or(0.0, |i| Self::parent_angle(i, parents.len()));

                let siblings: Vec<_> = children
                    .iter()
                    .filter(|other| other.parent == child.parent)
                    .collect();
                let sibling_index = siblings
                    .iter()
                    .position(|other| std::ptr::eq(*other, child))
                    .unwrap_or(0);
                let spread = if siblings.len() > 1 {
                    (sibling_index as f32 - (siblings.len() - 1) as f32 / 2.0) * self.sibling_spread
                } else {
                    0.0
                };

                let angle = base_angle + spread;
                RingPlacement {
                    id: child.id.clone(),
                    label: child.label.clone(),
                    position: center
                        .polar_offset(self.outer_radius, self.outer_radius, angle)
                        .sub_point(child_size.half()),
                    size: child_size,
                    angle,
                    color: child.color,
                    parent: Some(child.parent.clone()),
                }
            })
            .collect();

        debug!(
            parents = placed_parents.len(),
            children = placed_children.len();
            "Cluster ring laid out"
        );

        ClusterLayout {
            hub,
            parents: placed_parents,
            children: placed_children,
        }
    }
}

/// Result of [`EllipseScatter::calculate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayout {
    /// Input indices in their shuffled order.
    pub order: Vec<usize>,
    /// Top-left corner of each note, parallel to `order`.
    pub positions: Vec<Point>,
    pub sticky_size: f32,
    pub radius_x: f32,
    pub radius_y: f32,
}

/// Notes strewn on an ellipse around a hero box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseScatter {
    viewport: Size,
    hero: Bounds,
    margin: f32,
    max_jitter: f32,
}

impl EllipseScatter {
    /// Scatter around a hero of the given size centered in the viewport.
    pub fn new(viewport: Size, hero: Size) -> Self {
        let center = Point::new(viewport.width() / 2.0, viewport.height() / 2.0);
        Self {
            viewport,
            hero: center.to_bounds(hero),
            margin: 32.0,
            max_jitter: 18.0,
        }
    }

    /// Set the hero box explicitly
    pub fn with_hero(mut self, hero: Bounds) -> Self {
        self.hero = hero;
        self
    }

    /// Set the minimum distance between a note and the viewport edge
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the largest positional jitter, in pixels
    pub fn with_max_jitter(mut self, jitter: f32) -> Self {
        self.max_jitter = jitter;
        self
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn hero(&self) -> Bounds {
        self.hero
    }

    /// Shuffle `count` notes and place them on the ellipse.
    ///
    /// The seed drives the shuffle and then the ellipse aspect; `seed + 1`
    /// drives the per-note jitter.
    pub fn calculate(&self, count: usize, seed: u32) -> ScatterLayout {
        let mut rng = Mulberry32::new(seed);
        let mut order: Vec<usize> = (0..count).collect();
        rng.shuffle(&mut order);
        let aspect = 0.85 + rng.next_f32() * 0.3;

        let sticky_size = sticky_side_for_viewport(self.viewport.width());
        let (radius_x, radius_y) = self.radii(sticky_size, aspect);
        let center = self.hero.center();

        let mut jitter = Mulberry32::new(seed.wrapping_add(1));
        let positions = (0..count)
            .map(|i| {
                let angle_jitter = (jitter.next_f32() - 0.5) * 0.09;
                let jitter_x = (jitter.next_f32() - 0.5) * 2.0 * self.max_jitter;
                let jitter_y = (jitter.next_f32() - 0.5) * 2.0 * self.max_jitter;
                let angle = TAU * i as f32 / count as f32 + angle_jitter;

                center
                    .polar_offset(radius_x, radius_y, angle)
                    .add_point(Point::new(jitter_x, jitter_y))
                    .sub_point(Size::square(sticky_size).half())
            })
            .collect();

        debug!(count, seed, radius_x, radius_y; "Stickies scattered");

        ScatterLayout {
            order,
            positions,
            sticky_size,
            radius_x,
            radius_y,
        }
    }

    /// Ellipse radii: proportional to the viewport, at least clear of the
    /// hero, and at most touching the viewport margin. Clearing the hero wins
    /// when the two conflict.
    fn radii(&self, sticky_size: f32, aspect: f32) -> (f32, f32) {
        let center = self.hero.center();
        let proportional_x = self.viewport.width() * 0.32;
        let proportional_y = self.viewport.height() * 0.28 * aspect;

        let min_x = self.hero.width() / 2.0 + sticky_size * 0.85;
        let min_y = self.hero.height() / 2.0 + sticky_size * 0.7;

        let max_x = center.x().min(self.viewport.width() - center.x())
            - sticky_size / 2.0
            - self.margin;
        let max_y = center.y().min(self.viewport.height() - center.y())
            - sticky_size / 2.0
            - self.margin;

        (
            proportional_x.min(max_x).max(min_x),
            proportional_y.min(max_y).max(min_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn parent(id: &str) -> RingParent {
        RingParent {
            id: id.to_string(),
            label: id.to_uppercase(),
        }
    }

    fn child(id: &str, parent: &str) -> RingChild {
        RingChild {
            id: id.to_string(),
            label: id.to_string(),
            parent: parent.to_string(),
            color: StickyColor::Green,
        }
    }

    #[test]
    fn test_circle_positions_even_spacing() {
        let points = circle_positions(4, Point::new(0.0, 0.0), 10.0, 0.0);

        assert_eq!(points.len(), 4);
        assert_approx_eq!(f32, points[0].x(), 10.0);
        assert_approx_eq!(f32, points[1].y(), 10.0);
        assert_approx_eq!(f32, points[2].x(), -10.0);
        assert_approx_eq!(f32, points[3].y(), -10.0);
        assert!(circle_positions(0, Point::default(), 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_first_parent_on_top() {
        let layout = ClusterRing::new().calculate("Hub", &[parent("strategic"), parent("ideation")], &[]);

        let top = &layout.parents[0];
        assert_approx_eq!(f32, top.center().x(), 700.0, epsilon = 1e-3);
        assert_approx_eq!(f32, top.center().y(), 450.0 - 220.0, epsilon = 1e-3);
        assert_approx_eq!(f32, layout.hub.position.x(), 700.0 - 85.0);
    }

    #[test]
    fn test_children_spread_around_parent() {
        let parents = [parent("research")];
        let children = [
            child("knowledge", "research"),
            child("learning", "research"),
            child("analytical", "research"),
        ];
        let layout = ClusterRing::new().calculate("Hub", &parents, &children);

        let base = -FRAC_PI_2;
        assert_approx_eq!(f32, layout.children[0].angle, base - PI / 10.0);
        assert_approx_eq!(f32, layout.children[1].angle, base);
        assert_approx_eq!(f32, layout.children[2].angle, base + PI / 10.0);

        let middle = layout.children[1].center();
        assert_approx_eq!(f32, middle.y(), 450.0 - 470.0, epsilon = 1e-3);
        assert_eq!(layout.children[1].parent.as_deref(), Some("research"));
    }

    #[test]
    fn test_orphan_child_at_angle_zero() {
        let layout = ClusterRing::new().calculate("Hub", &[parent("a")], &[child("lost", "missing")]);

        assert_approx_eq!(f32, layout.children[0].angle, 0.0);
        assert_approx_eq!(f32, layout.children[0].center().x(), 700.0 + 470.0, epsilon = 1e-3);
    }

    #[test]
    fn test_parent_lookup() {
        let layout = ClusterRing::new().calculate("Hub", &[parent("a"), parent("b")], &[]);

        assert!(layout.parent("b").is_some());
        assert!(layout.parent("c").is_none());
    }

    #[test]
    fn test_sticky_side_breakpoints() {
        assert_eq!(sticky_side_for_viewport(320.0), 90.0);
        assert_eq!(sticky_side_for_viewport(768.0), 120.0);
        assert_eq!(sticky_side_for_viewport(1920.0), 140.0);
    }

    #[test]
    fn test_scatter_is_reproducible() {
        let scatter = EllipseScatter::new(Size::new(1280.0, 800.0), Size::new(520.0, 180.0));

        let first = scatter.calculate(15, 1234);
        let second = scatter.calculate(15, 1234);
        let other = scatter.calculate(15, 4321);

        assert_eq!(first, second);
        assert_ne!(first.order, other.order);
    }

    #[test]
    fn test_scatter_order_is_permutation() {
        let scatter = EllipseScatter::new(Size::new(1280.0, 800.0), Size::new(520.0, 180.0));
        let layout = scatter.calculate(15, 7);

        let mut order = layout.order.clone();
        order.sort_unstable();
        assert_eq!(order, (0..15).collect::<Vec<_>>());
        assert_eq!(layout.positions.len(), 15);
    }

    #[test]
    fn test_scatter_radii_clear_the_hero() {
        // A small viewport forces the maximum radius below the minimum.
        let scatter = EllipseScatter::new(Size::new(400.0, 400.0), Size::new(300.0, 200.0));
        let layout = scatter.calculate(5, 1);

        assert_eq!(layout.sticky_size, 90.0);
        assert_approx_eq!(f32, layout.radius_x, 150.0 + 90.0 * 0.85);
        assert_approx_eq!(f32, layout.radius_y, 100.0 + 90.0 * 0.7);
    }

    #[test]
    fn test_scatter_radii_capped_by_viewport() {
        let scatter = EllipseScatter::new(Size::new(1280.0, 800.0), Size::new(200.0, 100.0));
        let layout = scatter.calculate(3, 1);

        // 0.32 * 1280 = 409.6 is below the cap of 640 - 70 - 32.
        assert_approx_eq!(f32, layout.radius_x, 409.6);
        assert!(layout.radius_y <= 400.0 - 70.0 - 32.0 + 1e-3);
    }

    #[test]
    fn test_scatter_stays_near_ellipse() {
        let scatter = EllipseScatter::new(Size::new(1280.0, 800.0), Size::new(520.0, 180.0));
        let layout = scatter.calculate(15, 99);
        let center = Point::new(640.0, 400.0);

        for position in &layout.positions {
            let note_center = position.add_point(Size::square(layout.sticky_size).half());
            let dx = (note_center.x() - center.x()).abs();
            let dy = (note_center.y() - center.y()).abs();
            assert!(dx <= layout.radius_x + 18.0 + 1e-3);
            assert!(dy <= layout.radius_y + 18.0 + 1e-3);
        }
    }

    #[test]
    fn test_scatter_empty() {
        let scatter = EllipseScatter::new(Size::new(1280.0, 800.0), Size::new(520.0, 180.0));
        let layout = scatter.calculate(0, 3);

        assert!(layout.order.is_empty());
        assert!(layout.positions.is_empty());
    }
}
