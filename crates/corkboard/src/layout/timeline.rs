//! Continuous career timeline.
//!
//! Years are laid out at a fixed pixel gap; months are fractions of a year,
//! so an event spanning Aug 2022 to Oct 2024 is centered at its midpoint on
//! a continuous axis. Work stickies sit above the education lane, and notes
//! landing on the same year stack downward.

use std::{collections::BTreeMap, ops::RangeInclusive};

use log::{debug, warn};
use serde::Deserialize;

use corkboard_core::{geometry::Point, sticky::StickyColor};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month.
    #[serde(default = "january")]
    pub month: u8,
}

fn january() -> u8 {
    1
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// Position of this month on the continuous axis.
    pub fn to_float(self) -> f32 {
        timeline_float(self.year, self.month)
    }
}

/// `year + (month - 1) / 12`.
///
/// # Examples
///
/// ```
/// use corkboard::layout::timeline::timeline_float;
///
/// assert_eq!(timeline_float(2022, 1), 2022.0);
/// assert_eq!(timeline_float(2022, 7), 2022.5);
/// ```
pub fn timeline_float(year: i32, month: u8) -> f32 {
    year as f32 + (f32::from(month) - 1.0) / 12.0
}

/// A role or engagement spanning a range of months.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineEvent {
    pub title: String,
    pub organization: String,
    pub start: YearMonth,
    pub end: YearMonth,
    /// Explicit note color; otherwise alternates yellow and orange.
    #[serde(default)]
    pub color: Option<StickyColor>,
}

impl TimelineEvent {
    pub fn new(
        title: impl Into<String>,
        organization: impl Into<String>,
        start: YearMonth,
        end: YearMonth,
    ) -> Self {
        Self {
            title: title.into(),
            organization: organization.into(),
            start,
            end,
            color: None,
        }
    }

    /// Midpoint of the event on the continuous axis.
    pub fn mid_float(&self) -> f32 {
        (self.start.to_float() + self.end.to_float()) / 2.0
    }
}

/// A single-year entry, such as a degree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Milestone {
    pub year: i32,
    pub title: String,
    pub organization: String,
}

/// Pixel metrics of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineMetrics {
    /// Distance between two year ticks.
    pub year_gap: f32,
    /// Side of a sticky note.
    pub sticky_size: f32,
    /// Vertical gap between stacked stickies.
    pub stack_gap: f32,
    /// Height of the axis band.
    pub timeline_height: f32,
}

impl Default for TimelineMetrics {
    fn default() -> Self {
        Self {
            year_gap: 220.0,
            sticky_size: 140.0,
            stack_gap: 18.0,
            timeline_height: 120.0,
        }
    }
}

impl TimelineMetrics {
    /// Metrics for a viewport of the given width.
    ///
    /// | width      | sticky | stack gap |
    /// |------------|--------|-----------|
    /// | < 500      | 90     | 8         |
    /// | < 900      | 120    | 14        |
    /// | otherwise  | 140    | 18        |
    pub fn for_viewport(width: f32) -> Self {
        let (sticky_size, stack_gap) = if width < 500.0 {
            (90.0, 8.0)
        } else if width < 900.0 {
            (120.0, 14.0)
        } else {
            (140.0, 18.0)
        };
        Self {
            sticky_size,
            stack_gap,
            ..Self::default()
        }
    }

    /// Vertical distance between two stacked stickies.
    pub fn stack_step(&self) -> f32 {
        self.sticky_size + self.stack_gap
    }
}

/// Mapping from time to horizontal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineAxis {
    min_year: i32,
    max_year: i32,
    metrics: TimelineMetrics,
}

impl TimelineAxis {
    /// Axis covering the given years.
    pub fn new(min_year: i32, max_year: i32, metrics: TimelineMetrics) -> Self {
        Self {
            min_year: min_year.min(max_year),
            max_year: max_year.max(min_year),
            metrics,
        }
    }

    /// Axis spanning every start and end month of `events`, widened to
    /// whole years. Returns `None` when there are no events.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard::layout::timeline::{TimelineAxis, TimelineEvent, TimelineMetrics, YearMonth};
    ///
    /// let events = [TimelineEvent::new(
    ///     "Product Strategist",
    ///     "Kellton",
    ///     YearMonth::new(2022, 8),
    ///     YearMonth::new(2024, 10),
    /// )];
    /// let axis = TimelineAxis::from_events(&events, TimelineMetrics::default()).unwrap();
    ///
    /// assert_eq!(axis.years(), 2022..=2025);
    /// assert_eq!(axis.width(), 3.0 * 220.0 + 2.0 * 220.0);
    /// ```
    pub fn from_events(events: &[TimelineEvent], metrics: TimelineMetrics) -> Option<Self> {
        let floats = events
            .iter()
            .flat_map(|event| [event.start.to_float(), event.end.to_float()]);

        let (min, max) = floats.fold(None, |range: Option<(f32, f32)>, value| {
            Some(match range {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            })
        })?;

        Some(Self::new(
            min.floor() as i32,
            max.ceil() as i32,
            metrics,
        ))
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    pub fn metrics(&self) -> &TimelineMetrics {
        &self.metrics
    }

    /// Every year with a tick on the axis.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.min_year..=self.max_year
    }

    /// Total pixel width: one gap per year interval plus a gap of margin on
    /// each side.
    pub fn width(&self) -> f32 {
        let intervals = (self.max_year - self.min_year) as f32;
        intervals * self.metrics.year_gap + 2.0 * self.metrics.year_gap
    }

    /// Left edge of a sticky centered on the given axis position.
    pub fn x_for_float(&self, value: f32) -> f32 {
        self.metrics.year_gap / 2.0 + (value - self.min_year as f32) * self.metrics.year_gap
            - self.metrics.sticky_size / 2.0
    }

    /// Left edge of a sticky centered on a year tick, or `None` when the
    /// year is not on the axis.
    pub fn x_for_year(&self, year: i32) -> Option<f32> {
        self.years()
            .contains(&year)
            .then(|| self.x_for_float(year as f32))
    }

    /// Pixel position of a year tick.
    pub fn tick_x(&self, year: i32) -> f32 {
        self.x_for_float(year as f32) + self.metrics.sticky_size / 2.0
    }
}

/// Groups milestones by year, in ascending year order.
pub fn group_by_year(milestones: &[Milestone]) -> BTreeMap<i32, Vec<&Milestone>> {
    let mut groups: BTreeMap<i32, Vec<&Milestone>> = BTreeMap::new();
    for milestone in milestones {
        groups.entry(milestone.year).or_default().push(milestone);
    }
    groups
}

/// A sticky placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSticky {
    pub title: String,
    pub organization: String,
    /// Top-left corner.
    pub position: Point,
    pub color: StickyColor,
    /// Position within its year's stack, from the top.
    pub stack: usize,
}

/// Result of laying out a timeline.
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    axis: TimelineAxis,
    work: Vec<TimelineSticky>,
    milestones: Vec<TimelineSticky>,
}

impl TimelineLayout {
    /// Lay out work events above and milestones below.
    ///
    /// Returns `None` when there are no work events to span an axis.
    /// Milestones whose year falls outside the axis are skipped.
    pub fn calculate(
        events: &[TimelineEvent],
        milestones: &[Milestone],
        metrics: TimelineMetrics,
    ) -> Option<Self> {
        let axis = TimelineAxis::from_events(events, metrics)?;

        let mut by_year: BTreeMap<i32, Vec<&TimelineEvent>> = BTreeMap::new();
        for event in events {
            by_year
                .entry(event.mid_float().round() as i32)
                .or_default()
                .push(event);
        }

        let work_base_y = Self::work_base_y(&metrics);
        let mut work = Vec::with_capacity(events.len());
        for stack in by_year.values_mut() {
            stack.sort_by(|a, b| a.title.cmp(&b.title));
            for (depth, event) in stack.iter().enumerate() {
                let color = event.color.unwrap_or(if work.len() % 2 == 0 {
                    StickyColor::Yellow
                } else {
                    StickyColor::Orange
                });
                work.push(TimelineSticky {
                    title: event.title.clone(),
                    organization: event.organization.clone(),
                    position: Point::new(
                        axis.x_for_float(event.mid_float()),
                        work_base_y + depth as f32 * metrics.stack_step(),
                    ),
                    color,
                    stack: depth,
                });
            }
        }

        let milestone_base_y = Self::milestone_base_y(&metrics);
        let mut placed_milestones = Vec::with_capacity(milestones.len());
        for (year, group) in group_by_year(milestones) {
            let Some(x) = axis.x_for_year(year) else {
                warn!(year, count = group.len(); "Milestones outside the timeline are skipped");
                continue;
            };
            for (depth, milestone) in group.into_iter().enumerate() {
                placed_milestones.push(TimelineSticky {
                    title: milestone.title.clone(),
                    organization: milestone.organization.clone(),
                    position: Point::new(x, milestone_base_y + depth as f32 * metrics.stack_step()),
                    color: StickyColor::Blue,
                    stack: depth,
                });
            }
        }

        debug!(
            min_year = axis.min_year(),
            max_year = axis.max_year(),
            work = work.len(),
            milestones = placed_milestones.len();
            "Timeline laid out"
        );

        Some(Self {
            axis,
            work,
            milestones: placed_milestones,
        })
    }

    fn work_base_y(metrics: &TimelineMetrics) -> f32 {
        metrics.timeline_height / 2.0 + 40.0
    }

    fn milestone_base_y(metrics: &TimelineMetrics) -> f32 {
        Self::work_base_y(metrics) + 1.5 * metrics.sticky_size
    }

    pub fn axis(&self) -> &TimelineAxis {
        &self.axis
    }

    /// Work stickies, ordered by year then title.
    pub fn work(&self) -> &[TimelineSticky] {
        &self.work
    }

    /// Milestone stickies, ordered by year.
    pub fn milestones(&self) -> &[TimelineSticky] {
        &self.milestones
    }

    /// Vertical position of the axis line.
    pub fn axis_y(&self) -> f32 {
        self.axis.metrics().timeline_height / 2.0
    }

    /// Height needed to show the axis and both lanes.
    pub fn height(&self) -> f32 {
        let metrics = self.axis.metrics();
        let base = Self::milestone_base_y(metrics) + 3.0 * metrics.sticky_size;
        let tallest = self
            .work
            .iter()
            .chain(&self.milestones)
            .map(|sticky| sticky.position.y() + metrics.sticky_size)
            .fold(0.0f32, f32::max);
        base.max(tallest)
    }
}
