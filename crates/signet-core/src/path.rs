//! Geometry of the stroke currently being drawn.

use kurbo::{BezPath, Circle, Point};

/// One piece of geometry emitted by the stroke tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A tap without movement, drawn as a filled disk.
    Dot { center: Point, radius: f64 },
    /// Straight line between two captured points.
    Line { from: Point, to: Point },
    /// Quadratic curve through a control point.
    Quad { from: Point, ctrl: Point, to: Point },
}

impl Segment {
    /// Check if the segment is a quadratic curve.
    pub fn is_curve(&self) -> bool {
        matches!(self, Segment::Quad { .. })
    }
}

/// The uncommitted vector path of the current stroke.
///
/// Lines and curves are stroked with the pad's stroke width; dots are
/// filled disks so a tap renders at exactly half the width.
#[derive(Debug, Clone, Default)]
pub struct StrokePath {
    segments: Vec<Segment>,
}

impl StrokePath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Build the geometry to stroke from the line and curve segments.
    pub fn stroked(&self) -> BezPath {
        let mut path = BezPath::new();
        for segment in &self.segments {
            match *segment {
                Segment::Dot { .. } => {}
                Segment::Line { from, to } => {
                    path.move_to(from);
                    path.line_to(to);
                }
                Segment::Quad { from, ctrl, to } => {
                    path.move_to(from);
                    path.quad_to(ctrl, to);
                }
            }
        }
        path
    }

    /// The disks to fill.
    pub fn dots(&self) -> impl Iterator<Item = Circle> + '_ {
        self.segments.iter().filter_map(|segment| match *segment {
            Segment::Dot { center, radius } => Some(Circle::new(center, radius)),
            _ => None,
        })
    }

    /// Segments in emission order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drop all geometry.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}
