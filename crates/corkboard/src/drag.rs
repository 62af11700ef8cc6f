//! Pointer-drag state for interactive boards.
//!
//! Dragging is modeled as explicit transitions, `Idle -> Dragging -> Idle`,
//! driven by [`DragEvent`]s. The layout engines never see this state; a
//! renderer feeds pointer events in and reads positions back out.
//!
//! - [`DragBoard`] moves individual notes, keyed by item identity.
//! - [`PanTrack`] scrolls a wide strip (the career timeline) sideways, clamped
//!   so neither end can be dragged past the viewport.

use std::hash::Hash;

use indexmap::IndexMap;
use log::trace;

use corkboard_core::geometry::Point;

/// A pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent<K> {
    /// Pointer pressed on the item `key`.
    Press { key: K, pointer: Point },
    /// Pointer moved.
    Move { pointer: Point },
    /// Pointer released.
    Release,
    /// Put every item back at its default position.
    Reset,
}

/// Drag phase of a [`DragBoard`].
#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase<K> {
    Idle,
    /// `grab_offset` is the pointer position relative to the item's corner
    /// at the moment it was pressed.
    Dragging { key: K, grab_offset: Point },
}

/// Positions of draggable items.
///
/// # Examples
///
/// ```
/// use corkboard::drag::{DragBoard, DragEvent};
/// use corkboard_core::geometry::Point;
///
/// let mut board = DragBoard::new([("hope", Point::new(100.0, 100.0))]);
/// board.apply(DragEvent::Press { key: "hope", pointer: Point::new(110.0, 105.0) });
/// board.apply(DragEvent::Move { pointer: Point::new(210.0, 305.0) });
/// board.apply(DragEvent::Release);
///
/// assert_eq!(board.position(&"hope"), Some(Point::new(200.0, 300.0)));
/// ```
#[derive(Debug, Clone)]
pub struct DragBoard<K> {
    defaults: IndexMap<K, Point>,
    positions: IndexMap<K, Point>,
    phase: DragPhase<K>,
}

impl<K> DragBoard<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Board with the given default positions.
    pub fn new(defaults: impl IntoIterator<Item = (K, Point)>) -> Self {
        let defaults: IndexMap<K, Point> = defaults.into_iter().collect();
        Self {
            positions: defaults.clone(),
            defaults,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DragPhase<K> {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Current position of an item.
    pub fn position(&self, key: &K) -> Option<Point> {
        self.positions.get(key).copied()
    }

    /// All items in insertion order.
    pub fn positions(&self) -> impl Iterator<Item = (&K, Point)> {
        self.positions.iter().map(|(key, point)| (key, *point))
    }

    /// Apply one event. Returns `true` when any position or the phase changed.
    ///
    /// Presses on unknown items, presses while already dragging, and moves
    /// or releases while idle are ignored.
    pub fn apply(&mut self, event: DragEvent<K>) -> bool {
        match event {
            DragEvent::Press { key, pointer } => {
                if self.is_dragging() {
                    return false;
                }
                let Some(position) = self.positions.get(&key) else {
                    return false;
                };
                let grab_offset = pointer.sub_point(*position);
                trace!(key:?; "Drag started");
                self.phase = DragPhase::Dragging { key, grab_offset };
                true
            }
            DragEvent::Move { pointer } => {
                let DragPhase::Dragging { key, grab_offset } = &self.phase else {
                    return false;
                };
                match self.positions.get_mut(key) {
                    Some(position) => {
                        *position = pointer.sub_point(*grab_offset);
                        true
                    }
                    None => false,
                }
            }
            DragEvent::Release => {
                if !self.is_dragging() {
                    return false;
                }
                self.phase = DragPhase::Idle;
                true
            }
            DragEvent::Reset => {
                self.positions = self.defaults.clone();
                self.phase = DragPhase::Idle;
                true
            }
        }
    }
}

/// Pointer events for a [`PanTrack`]; only the horizontal coordinate matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanEvent {
    Press(f32),
    Move(f32),
    Release,
    /// The viewport changed width.
    Resize(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PanPhase {
    Idle,
    Dragging { pointer_start: f32, offset_start: f32 },
}

/// Horizontal pan of a strip wider than its viewport.
///
/// The offset is always within `viewport - content ..= 0`, and is `0` when
/// the content fits.
///
/// # Examples
///
/// ```
/// use corkboard::drag::{PanEvent, PanTrack};
///
/// let mut track = PanTrack::new(3520.0, 1280.0);
/// track.apply(PanEvent::Press(900.0));
/// track.apply(PanEvent::Move(-5000.0));
/// assert_eq!(track.offset(), 1280.0 - 3520.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanTrack {
    content_width: f32,
    viewport_width: f32,
    offset: f32,
    phase: PanPhase,
    touched: bool,
}

impl PanTrack {
    pub fn new(content_width: f32, viewport_width: f32) -> Self {
        Self {
            content_width,
            viewport_width,
            offset: 0.0,
            phase: PanPhase::Idle,
            touched: false,
        }
    }

    /// Current horizontal offset of the strip.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PanPhase::Dragging { .. })
    }

    /// Whether a drag hint should still be shown: true until the first press.
    pub fn shows_hint(&self) -> bool {
        !self.touched
    }

    /// Clamp a candidate offset to the allowed range.
    ///
    /// Non-finite widths are treated as content that fits.
    pub fn clamp(&self, offset: f32) -> f32 {
        let overflow = self.content_width - self.viewport_width;
        if !overflow.is_finite() || overflow <= 0.0 || offset.is_nan() {
            return 0.0;
        }
        offset.clamp(-overflow, 0.0)
    }

    /// Apply one event. Returns `true` when the offset or phase changed.
    pub fn apply(&mut self, event: PanEvent) -> bool {
        match event {
            PanEvent::Press(pointer) => {
                self.touched = true;
                self.phase = PanPhase::Dragging {
                    pointer_start: pointer,
                    offset_start: self.offset,
                };
                true
            }
            PanEvent::Move(pointer) => match self.phase {
                PanPhase::Dragging {
                    pointer_start,
                    offset_start,
                } => {
                    let next = self.clamp(offset_start + pointer - pointer_start);
                    let changed = next != self.offset;
                    self.offset = next;
                    changed
                }
                PanPhase::Idle => false,
            },
            PanEvent::Release => {
                let was_dragging = self.is_dragging();
                self.phase = PanPhase::Idle;
                was_dragging
            }
            PanEvent::Resize(width) => {
                self.viewport_width = width;
                let next = self.clamp(self.offset);
                let changed = next != self.offset;
                self.offset = next;
                changed
            }
        }
    }
}
