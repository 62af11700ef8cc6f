//! Sticky notes: palette, size classes and text scaling.

use serde::Deserialize;

use crate::color::Color;

/// Named sticky note colors.
///
/// Unknown names fall back to [`StickyColor::Yellow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum StickyColor {
    #[default]
    Yellow,
    Pink,
    Blue,
    Green,
    Red,
    Orange,
    LightBlue,
}

impl StickyColor {
    /// Paper color of the note.
    pub fn fill(self) -> Color {
        let hex = match self {
            StickyColor::Yellow => "#ffe066",
            StickyColor::Pink => "#ffd6e0",
            StickyColor::Blue => "#a7c7e7",
            StickyColor::Green => "#b6e2a1",
            StickyColor::Red => "#ff8c8c",
            StickyColor::Orange => "#ffb347",
            StickyColor::LightBlue => "#b3e6ff",
        };
        Color::new(hex).expect("palette entries are valid hex colors")
    }
}

impl From<&str> for StickyColor {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "pink" => StickyColor::Pink,
            "blue" => StickyColor::Blue,
            "green" => StickyColor::Green,
            "red" => StickyColor::Red,
            "orange" => StickyColor::Orange,
            "lightblue" => StickyColor::LightBlue,
            _ => StickyColor::Yellow,
        }
    }
}

impl From<String> for StickyColor {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

/// Physical size class of a sticky note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickySize {
    /// Roughly a 3" note.
    Small,
    /// Roughly a 4" note, for long text.
    Large,
}

impl StickySize {
    /// Picks a size class for the given text.
    ///
    /// Text longer than 32 characters (newlines excluded), spanning more than
    /// two lines, or containing a word longer than 12 characters needs a
    /// large note.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_core::sticky::StickySize;
    ///
    /// assert_eq!(StickySize::auto("Scrum"), StickySize::Small);
    /// assert_eq!(StickySize::auto("Connectedness and Futuristic"), StickySize::Large);
    /// ```
    pub fn auto(text: &str) -> Self {
        let lines = text.split('\n').count();
        let longest_word = text
            .split_whitespace()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(0);

        if text_len(text) > 32 || lines > 2 || longest_word > 12 {
            StickySize::Large
        } else {
            StickySize::Small
        }
    }

    /// Minimum side length in pixels.
    pub fn min_side(self) -> f32 {
        match self {
            StickySize::Small => 120.0,
            StickySize::Large => 180.0,
        }
    }
}

/// Character count ignoring line breaks.
fn text_len(text: &str) -> usize {
    text.chars().filter(|&c| c != '\n').count()
}

/// Font size, in `rem`, for a note holding `text`.
///
/// # Examples
///
/// ```
/// use corkboard_core::sticky::font_size_rem;
///
/// assert_eq!(font_size_rem("Agile"), 1.25);
/// assert_eq!(font_size_rem(&"x".repeat(120)), 0.7);
/// ```
pub fn font_size_rem(text: &str) -> f32 {
    let size = match text_len(text) {
        0..=28 => 1.25,
        29..=40 => 1.05,
        41..=55 => 0.92,
        56..=65 => 0.8,
        66..=80 => 0.7,
        81..=100 => 0.62,
        _ => 0.55,
    };
    f32::max(size, 0.7)
}

/// A note pinned to the board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StickyNote {
    pub text: String,
    #[serde(default)]
    pub color: StickyColor,
    /// Tilt in degrees; chosen from the layout seed when absent.
    #[serde(default)]
    pub rotation: Option<i8>,
}

impl StickyNote {
    pub fn new(text: impl Into<String>, color: StickyColor) -> Self {
        Self {
            text: text.into(),
            color,
            rotation: None,
        }
    }

    pub fn size(&self) -> StickySize {
        StickySize::auto(&self.text)
    }
}
