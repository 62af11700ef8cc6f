//! Layout engines and the combined board layout.
//!
//! Each engine is a pure function of its inputs and configuration:
//!
//! - [`annotation`] - collision-avoiding labels along a horizontal track.
//! - [`timeline`] - work and milestone stickies on a continuous year axis.
//! - [`ring`] - hub-and-rings clusters and elliptical scatters.
//!
//! [`BoardLayout::calculate`] runs every engine a [`Board`] needs.

pub mod annotation;
pub mod ring;
pub mod timeline;

use log::{debug, info};

use corkboard_core::{
    geometry::{Bounds, Point, Size},
    label::PlacedItem,
    sticky::StickyNote,
};

use crate::{
    board::Board,
    config::LayoutConfig,
    layout::{
        annotation::AnnotationEngine,
        ring::{ClusterLayout, ClusterRing, EllipseScatter, ScatterLayout},
        timeline::{TimelineLayout, TimelineMetrics},
    },
};

/// Placed annotation labels together with the track they were placed on.
#[derive(Debug, Clone)]
pub struct AnnotationLayout {
    track_width: f32,
    items: Vec<PlacedItem>,
    residual_overlaps: Vec<(usize, usize)>,
}

impl AnnotationLayout {
    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    /// Placed labels in input order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    /// Pairs of input indices still colliding after the attempt budget ran out.
    pub fn residual_overlaps(&self) -> &[(usize, usize)] {
        &self.residual_overlaps
    }
}

/// Scattered sticky notes, in their shuffled display order.
#[derive(Debug, Clone)]
pub struct StickyLayout {
    notes: Vec<StickyNote>,
    scatter: ScatterLayout,
    viewport: Size,
    hero: Bounds,
}

impl StickyLayout {
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The box the notes are strewn around.
    pub fn hero(&self) -> Bounds {
        self.hero
    }

    pub fn scatter(&self) -> &ScatterLayout {
        &self.scatter
    }

    /// Notes paired with their top-left corner, in display order.
    pub fn placed(&self) -> impl Iterator<Item = (&StickyNote, Point)> {
        self.scatter
            .order
            .iter()
            .zip(&self.scatter.positions)
            .filter_map(|(index, position)| self.notes.get(*index).map(|note| (note, *position)))
    }
}

/// Every section of a board, laid out.
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    annotations: Option<AnnotationLayout>,
    timeline: Option<TimelineLayout>,
    evidence: Option<ClusterLayout>,
    stickies: Option<StickyLayout>,
}

impl BoardLayout {
    /// Lay out every section present in `board`.
    pub fn calculate(board: &Board, config: &LayoutConfig) -> Self {
        let annotations = board.annotations().map(|section| {
            let engine = AnnotationEngine::from_config(section.track_width, config.annotation());
            let items = engine.place(&section.items);
            let residual_overlaps = engine.residual_overlaps(&items);
            if !residual_overlaps.is_empty() {
                info!(pairs = residual_overlaps.len(); "Some labels still overlap after layout");
            }
            AnnotationLayout {
                track_width: engine.track_width(),
                items,
                residual_overlaps,
            }
        });

        let timeline = board.timeline().and_then(|section| {
            TimelineLayout::calculate(
                &section.events,
                &section.milestones,
                timeline_metrics(config),
            )
        });

        let evidence = board.evidence().map(|section| {
            ClusterRing::new().calculate(&section.hub, &section.parents, &section.children)
        });

        let stickies = (!board.stickies().is_empty()).then(|| {
            let scatter_config = config.scatter();
            let engine = EllipseScatter::new(scatter_config.viewport(), scatter_config.hero());
            StickyLayout {
                notes: board.stickies().to_vec(),
                scatter: engine.calculate(board.stickies().len(), scatter_config.seed),
                viewport: engine.viewport(),
                hero: engine.hero(),
            }
        });

        debug!(
            annotations = annotations.is_some(),
            timeline = timeline.is_some(),
            evidence = evidence.is_some(),
            stickies = stickies.is_some();
            "Board laid out"
        );

        Self {
            annotations,
            timeline,
            evidence,
            stickies,
        }
    }

    pub fn annotations(&self) -> Option<&AnnotationLayout> {
        self.annotations.as_ref()
    }

    pub fn timeline(&self) -> Option<&TimelineLayout> {
        self.timeline.as_ref()
    }

    pub fn evidence(&self) -> Option<&ClusterLayout> {
        self.evidence.as_ref()
    }

    pub fn stickies(&self) -> Option<&StickyLayout> {
        self.stickies.as_ref()
    }
}

fn timeline_metrics(config: &LayoutConfig) -> TimelineMetrics {
    let timeline = config.timeline();
    let mut metrics = timeline
        .viewport_width
        .map(TimelineMetrics::for_viewport)
        .unwrap_or_default();
    if let Some(year_gap) = timeline.year_gap {
        metrics.year_gap = year_gap;
    }
    metrics
}
