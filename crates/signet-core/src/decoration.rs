//! Cosmetic decorations derived from style and bounds.
//!
//! Each `apply_*` method recomputes only what one style field affects, so
//! the pad can keep re-layout and re-color explicit.

use crate::color::SerializableColor;
use crate::style::SignatureStyle;
use kurbo::{Line, Point, Rect, Size, Vec2};
use peniko::Color;

/// Height of the baseline as a fraction of the pad height.
const BASELINE_RATIO: f64 = 0.75;
/// Horizontal inset of the baseline as a fraction of the pad width.
const BASELINE_MARGIN_RATIO: f64 = 0.1;
/// Side of the square "X" prompt label.
const PROMPT_SIZE: f64 = 20.0;
/// Height of the caption label below the baseline.
const CAPTION_HEIGHT: f64 = 16.0;
/// Gap between the baseline and its labels.
const LABEL_GAP: f64 = 4.0;

/// Shade applied to the background to get the border color.
const BORDER_SHADE: f64 = 0.25;

const SHADOW_OFFSET: Vec2 = Vec2::new(2.0, 2.0);
const SHADOW_BLUR_RADIUS: f64 = 4.0;
const SHADOW_OPACITY: f32 = 0.5;

/// Drop shadow drawn behind the pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowGeometry {
    pub offset: Vec2,
    pub blur_radius: f64,
    pub opacity: f32,
    pub color: Color,
}

impl ShadowGeometry {
    /// Shadow rectangle for a pad of the given size, before blurring.
    pub fn rect(&self, bounds: Size) -> Rect {
        bounds.to_rect() + self.offset
    }
}

/// The signing line with its prompt and caption labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureLine {
    pub baseline: Line,
    /// Where a host draws the "X" prompt.
    pub prompt: Rect,
    /// Where a host draws the caption text.
    pub caption: Rect,
    pub text_color: Color,
}

impl SignatureLine {
    fn layout(bounds: Size, text_color: Color) -> Self {
        let y = (bounds.height * BASELINE_RATIO).round();
        let margin = (bounds.width * BASELINE_MARGIN_RATIO).round();
        let baseline = Line::new(Point::new(margin, y), Point::new(bounds.width - margin, y));

        let prompt = Rect::from_origin_size(
            Point::new(margin, y - LABEL_GAP - PROMPT_SIZE),
            Size::new(PROMPT_SIZE, PROMPT_SIZE),
        );
        let caption = Rect::new(
            baseline.p0.x,
            y + LABEL_GAP,
            baseline.p1.x,
            y + LABEL_GAP + CAPTION_HEIGHT,
        );

        Self {
            baseline,
            prompt,
            caption,
            text_color,
        }
    }
}

/// Everything the frame renderer draws around the signature itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorations {
    pub background: Color,
    pub border_color: Color,
    pub shadow: Option<ShadowGeometry>,
    pub line: SignatureLine,
}

impl Decorations {
    /// Derive all decorations from scratch.
    pub fn new(style: &SignatureStyle, bounds: Size) -> Self {
        let mut decorations = Self {
            background: style.background(),
            border_color: border_for(style.background_color),
            shadow: None,
            line: SignatureLine::layout(bounds, style.text()),
        };
        decorations.apply_shadow(style);
        decorations
    }

    /// Re-derive the background and the border shade.
    pub fn apply_background(&mut self, background: SerializableColor) {
        self.background = background.into();
        self.border_color = border_for(background);
    }

    /// Toggle or recolor the drop shadow.
    pub fn apply_shadow(&mut self, style: &SignatureStyle) {
        self.shadow = style.shadow_enabled.then(|| ShadowGeometry {
            offset: SHADOW_OFFSET,
            blur_radius: SHADOW_BLUR_RADIUS,
            opacity: SHADOW_OPACITY,
            color: style.shadow(),
        });
    }

    /// Recolor the labels.
    pub fn apply_text_color(&mut self, color: SerializableColor) {
        self.line.text_color = color.into();
    }

    /// Lay the signing line out for new bounds.
    pub fn apply_layout(&mut self, bounds: Size) {
        self.line = SignatureLine::layout(bounds, self.line.text_color);
    }
}

/// Darker shade on light backgrounds, lighter shade on dark ones.
fn border_for(background: SerializableColor) -> Color {
    let target = if background.luminance() > 0.5 {
        SerializableColor::black()
    } else {
        SerializableColor::white()
    };
    let mut border = background.mix(target, BORDER_SHADE);
    border.a = 255;
    border.into()
}
