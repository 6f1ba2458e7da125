//! Touch events fed to the pad by a host input adapter.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Phase of a single-touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// A touch event in view-local coordinates.
///
/// Only one touch stream drives the pad at a time; adapters must drop
/// secondary touches before forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, position: Point) -> Self {
        Self { phase, position }
    }

    pub fn began(x: f64, y: f64) -> Self {
        Self::new(TouchPhase::Began, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(TouchPhase::Moved, Point::new(x, y))
    }

    pub fn ended(x: f64, y: f64) -> Self {
        Self::new(TouchPhase::Ended, Point::new(x, y))
    }

    pub fn cancelled(x: f64, y: f64) -> Self {
        Self::new(TouchPhase::Cancelled, Point::new(x, y))
    }
}
