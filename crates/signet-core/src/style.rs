//! Style state of the signature pad.

use crate::color::SerializableColor;
use crate::error::{SignatureError, SignatureResult};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Stroke width used when none is configured.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Cosmetic configuration of a pad.
///
/// Fields are plain data. [`crate::SignaturePad`] validates a change and then
/// applies it to the derived [`crate::Decorations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureStyle {
    /// Stroke width in pixels. Must be positive.
    pub stroke_width: u32,
    pub stroke_color: SerializableColor,
    pub background_color: SerializableColor,
    pub shadow_enabled: bool,
    pub shadow_color: SerializableColor,
    /// Color of the prompt and caption labels.
    pub text_color: SerializableColor,
}

impl Default for SignatureStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: SerializableColor::black(),
            background_color: SerializableColor::white(),
            shadow_enabled: false,
            shadow_color: SerializableColor::black(),
            text_color: SerializableColor::black(),
        }
    }
}

impl SignatureStyle {
    /// Reject values the pad cannot draw with.
    pub fn validate(&self) -> SignatureResult<()> {
        validate_stroke_width(self.stroke_width)
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the background color as a peniko Color.
    pub fn background(&self) -> Color {
        self.background_color.into()
    }

    /// Get the shadow color as a peniko Color.
    pub fn shadow(&self) -> Color {
        self.shadow_color.into()
    }

    /// Get the label color as a peniko Color.
    pub fn text(&self) -> Color {
        self.text_color.into()
    }

    /// Width and color used to stroke signature paths.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.stroke_width as f64,
            color: self.stroke(),
        }
    }
}

pub(crate) fn validate_stroke_width(width: u32) -> SignatureResult<()> {
    if width == 0 {
        return Err(SignatureError::InvalidStrokeWidth(width));
    }
    Ok(())
}

/// Pen parameters handed to a compositor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}
