//! Board documents.
//!
//! A [`Board`] is the externally supplied data for one page: annotation
//! labels along a track, a career timeline, an evidence ring and loose sticky
//! notes. Every section is optional. Boards are written in TOML:
//!
//! ```toml
//! [annotations]
//! track_width = 1200.0
//!
//! [[annotations.items]]
//! text = "Problem Framing"
//! axis_position = 0.01
//! vertical_offset = -210
//! category = "design-thinking"
//!
//! [[timeline.events]]
//! title = "Product Strategist"
//! organization = "Kellton"
//! start = { year = 2022, month = 8 }
//! end = { year = 2024, month = 10 }
//!
//! [[stickies]]
//! text = "Design Thinking"
//! color = "pink"
//! ```

use std::collections::HashSet;

use serde::Deserialize;

use corkboard_core::{label::LabelItem, sticky::StickyNote};

use crate::{
    error::CorkboardError,
    layout::{
        ring::{RingChild, RingParent},
        timeline::{Milestone, TimelineEvent, YearMonth},
    },
};

/// A complete board document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Board {
    #[serde(default)]
    annotations: Option<AnnotationSection>,
    #[serde(default)]
    timeline: Option<TimelineSection>,
    #[serde(default)]
    evidence: Option<EvidenceSection>,
    #[serde(default)]
    stickies: Vec<StickyNote>,
}

/// Labels pinned along a horizontal track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationSection {
    pub track_width: f32,
    #[serde(default)]
    pub items: Vec<LabelItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineSection {
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// A hub with parents on an inner ring and children on an outer ring.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvidenceSection {
    pub hub: String,
    #[serde(default)]
    pub parents: Vec<RingParent>,
    #[serde(default)]
    pub children: Vec<RingChild>,
}

impl Board {
    /// Build a board from its sections.
    pub fn new(
        annotations: Option<AnnotationSection>,
        timeline: Option<TimelineSection>,
        evidence: Option<EvidenceSection>,
        stickies: Vec<StickyNote>,
    ) -> Self {
        Self {
            annotations,
            timeline,
            evidence,
            stickies,
        }
    }

    pub fn annotations(&self) -> Option<&AnnotationSection> {
        self.annotations.as_ref()
    }

    pub fn timeline(&self) -> Option<&TimelineSection> {
        self.timeline.as_ref()
    }

    pub fn evidence(&self) -> Option<&EvidenceSection> {
        self.evidence.as_ref()
    }

    pub fn stickies(&self) -> &[StickyNote] {
        &self.stickies
    }

    /// True when the board has nothing to lay out.
    pub fn is_empty(&self) -> bool {
        self.annotations
            .as_ref()
            .is_none_or(|section| section.items.is_empty())
            && self
                .timeline
                .as_ref()
                .is_none_or(|section| section.events.is_empty() && section.milestones.is_empty())
            && self.evidence.is_none()
            && self.stickies.is_empty()
    }

    /// Check the cross-field rules serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`CorkboardError::Board`] for a month outside `1..=12`, an event
    /// ending before it starts, a non-finite track width, an id repeated
    /// within one ring, or a ring child whose parent does not exist.
    pub fn validate(&self) -> Result<(), CorkboardError> {
        if let Some(section) = &self.annotations {
            if !section.track_width.is_finite() {
                return Err(CorkboardError::Board(format!(
                    "annotation track width must be finite, got {}",
                    section.track_width
                )));
            }
        }

        if let Some(section) = &self.timeline {
            for event in &section.events {
                check_month(&event.title, event.start)?;
                check_month(&event.title, event.end)?;
                if event.end < event.start {
                    return Err(CorkboardError::Board(format!(
                        "event `{}` ends before it starts",
                        event.title
                    )));
                }
            }
        }

        if let Some(section) = &self.evidence {
            check_unique(section.parents.iter().map(|parent| parent.id.as_str()))?;
            check_unique(section.children.iter().map(|child| child.id.as_str()))?;

            if let Some(orphan) = section
                .children
                .iter()
                .find(|child| !section.parents.iter().any(|parent| parent.id == child.parent))
            {
                return Err(CorkboardError::Board(format!(
                    "evidence `{}` refers to unknown parent `{}`",
                    orphan.id, orphan.parent
                )));
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), CorkboardError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CorkboardError::Board(format!("duplicate evidence id `{id}`")));
        }
    }
    Ok(())
}

fn check_month(title: &str, date: YearMonth) -> Result<(), CorkboardError> {
    if (1..=12).contains(&date.month) {
        Ok(())
    } else {
        Err(CorkboardError::Board(format!(
            "event `{title}` has month {} outside 1..=12",
            date.month
        )))
    }
}
