//! Sliding-window stroke smoothing.
//!
//! Touch points are buffered in a five-slot window. Every third point
//! beyond the anchor closes one quadratic segment whose end is the midpoint
//! between the last two control points, so consecutive segments share a
//! tangent and the chain stays smooth. Each move is O(1) regardless of
//! stroke length.

use crate::path::{Segment, StrokePath};
use kurbo::Point;

/// Number of slots in the point window.
pub const WINDOW_LEN: usize = 5;

/// Cursor value at which the window is reduced to a segment.
const REDUCE_AT: usize = 3;

/// State of the tracker between touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    /// No stroke in progress.
    #[default]
    Idle,
    /// A stroke has begun and has not yet ended.
    Tracking,
}

/// Converts a single touch stream into smoothed path segments.
#[derive(Debug, Clone, Default)]
pub struct StrokeTracker {
    points: [Point; WINDOW_LEN],
    /// How many points past the anchor are valid (0..=3).
    control_point: usize,
    state: TrackerState,
    path: StrokePath,
    /// Segments emitted during `move_to` for the current stroke.
    live_segments: usize,
}

impl StrokeTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a stroke anchored at `point`.
    pub fn begin(&mut self, point: Point) {
        self.path.clear();
        self.control_point = 0;
        self.points[0] = point;
        self.live_segments = 0;
        self.state = TrackerState::Tracking;
    }

    /// Record a move. Returns the segment emitted when the window reduces.
    pub fn move_to(&mut self, point: Point) -> Option<Segment> {
        if self.state != TrackerState::Tracking {
            log::debug!("Ignoring touch move without an active stroke");
            return None;
        }

        self.control_point += 1;
        self.points[self.control_point] = point;

        if self.control_point < REDUCE_AT {
            return None;
        }

        self.points[2] = self.points[1].midpoint(self.points[3]);
        let segment = Segment::Quad {
            from: self.points[0],
            ctrl: self.points[1],
            to: self.points[2],
        };
        self.path.push(segment);
        self.live_segments += 1;
        log::trace!("Emitted live segment {:?}", segment);

        self.points[0] = self.points[2];
        self.points[1] = self.points[3];
        self.control_point = 1;

        Some(segment)
    }

    /// Finish the stroke and hand back its complete path.
    ///
    /// The lift-off position is not used: the window already holds the
    /// last moved point. Returns `None` if no stroke was active.
    pub fn end(&mut self, _point: Point, stroke_width: f64) -> Option<StrokePath> {
        if self.state != TrackerState::Tracking {
            log::debug!("Ignoring touch end without an active stroke");
            return None;
        }

        let segment = self.closing_segment(stroke_width);
        log::trace!("Emitted closing segment {:?}", segment);
        self.path.push(segment);

        self.control_point = 0;
        self.state = TrackerState::Idle;
        Some(std::mem::take(&mut self.path))
    }

    /// Cancel the stroke. Finalized exactly like [`StrokeTracker::end`].
    pub fn cancel(&mut self, point: Point, stroke_width: f64) -> Option<StrokePath> {
        self.end(point, stroke_width)
    }

    /// Drop emitted geometry without ending the stroke.
    pub fn discard_path(&mut self) {
        self.path.clear();
    }

    fn closing_segment(&self, stroke_width: f64) -> Segment {
        match self.control_point {
            0 => Segment::Dot {
                center: self.points[0],
                radius: stroke_width / 2.0,
            },
            1 => Segment::Line {
                from: self.points[0],
                to: self.points[1],
            },
            _ => Segment::Quad {
                from: self.points[0],
                ctrl: self.points[1],
                to: self.points[2],
            },
        }
    }

    /// Number of valid points past the anchor.
    pub fn control_point(&self) -> usize {
        self.control_point
    }

    /// The valid portion of the point window.
    pub fn window(&self) -> &[Point] {
        &self.points[..=self.control_point]
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Check if a stroke is in progress.
    pub fn is_tracking(&self) -> bool {
        self.state == TrackerState::Tracking
    }

    /// The in-progress path.
    pub fn path(&self) -> &StrokePath {
        &self.path
    }

    /// Segments emitted by moves since the last begin.
    pub fn live_segments(&self) -> usize {
        self.live_segments
    }
}
