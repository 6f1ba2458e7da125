//! Conversions from kurbo/peniko types to tiny-skia.

use kurbo::{BezPath, PathEl};
use peniko::Color;
use signet_core::{StrokePath, StrokeStyle};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

pub(crate) fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path. Returns `None` for paths with no drawable segment.
pub(crate) fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Stroke lines and curves, then fill tap dots, onto `pixmap`.
pub(crate) fn draw_stroke_path(pixmap: &mut Pixmap, path: &StrokePath, style: &StrokeStyle) {
    let paint = solid_paint(style.color);

    if let Some(skia_path) = to_skia_path(&path.stroked()) {
        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&skia_path, &paint, &stroke, Transform::identity(), None);
    }

    for dot in path.dots() {
        let circle = PathBuilder::from_circle(
            dot.center.x as f32,
            dot.center.y as f32,
            dot.radius as f32,
        );
        if let Some(circle) = circle {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }
}
