//! Recorded touch scripts and their playback.

use crate::error::{ReplayError, ReplayResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use signet_core::{SerializableColor, SignatureConfig, TouchEvent, TouchPhase};
use signet_render::{PixmapCompositor, RasterSignaturePad, frame_size, render_frame};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tiny_skia::Pixmap;

/// One recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Touch { phase: TouchPhase, x: f64, y: f64 },
    Clear,
    StrokeWidth { width: u32 },
    StrokeColor { color: SerializableColor },
    BackgroundColor { color: SerializableColor },
    ShadowVisible { visible: bool },
    ShadowColor { color: SerializableColor },
    TextColor { color: SerializableColor },
}

/// A pad configuration plus the steps to play on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SignatureConfig,
    pub steps: Vec<Step>,
}

/// Outcome of playing a script.
pub struct Playback {
    pub pad: RasterSignaturePad,
    /// How many "signature changed" notifications fired.
    pub changes: usize,
}

impl Script {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        let script: Self =
            serde_json::from_str(json).map_err(|e| ReplayError::Script(e.to_string()))?;
        script.config.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("Loaded replay script from {}", path.display());
        Self::from_json(&json)
    }

    /// Feed every step through a fresh raster pad.
    pub fn play(&self) -> ReplayResult<Playback> {
        let changes = Rc::new(Cell::new(0usize));
        let counter = changes.clone();

        let mut pad = RasterSignaturePad::from_config(&self.config, PixmapCompositor::new())?;
        pad.add_change_listener(move || counter.set(counter.get() + 1));

        for step in &self.steps {
            match *step {
                Step::Touch { phase, x, y } => {
                    pad.handle_touch(TouchEvent::new(phase, Point::new(x, y)))
                }
                Step::Clear => pad.clear_signature(),
                Step::StrokeWidth { width } => pad.set_stroke_width(width)?,
                Step::StrokeColor { color } => pad.set_stroke_color(color.into()),
                Step::BackgroundColor { color } => pad.set_background_color(color.into()),
                Step::ShadowVisible { visible } => pad.set_shadow_visible(visible),
                Step::ShadowColor { color } => pad.set_shadow_color(color.into()),
                Step::TextColor { color } => pad.set_text_color(color.into()),
            }
        }

        log::info!(
            "Played {} steps, {} signature changes",
            self.steps.len(),
            changes.get()
        );
        Ok(Playback {
            pad,
            changes: changes.get(),
        })
    }
}

impl Playback {
    /// Render the full decorated frame.
    pub fn frame(&self) -> ReplayResult<Pixmap> {
        let (width, height) = frame_size(&self.pad);
        let mut target = Pixmap::new(width, height).ok_or_else(|| {
            signet_render::RenderError::Surface(format!(
                "Could not allocate a {}x{} frame",
                width, height
            ))
        })?;
        render_frame(&self.pad, &mut target);
        Ok(target)
    }

    /// The committed signature on a transparent background.
    pub fn signature(&self) -> ReplayResult<Pixmap> {
        self.pad.signature_image().ok_or_else(|| {
            signet_render::RenderError::Surface("Could not allocate the signature image".into())
                .into()
        })
    }
}
