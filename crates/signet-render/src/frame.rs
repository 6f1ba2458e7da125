//! Frame composition for display.

use crate::RasterSignaturePad;
use crate::convert::{draw_stroke_path, solid_paint, to_skia_path};
use kurbo::{BezPath, Rect, Size};
use peniko::Color;
use signet_core::ShadowGeometry;
use tiny_skia::{LineCap, Pixmap, Stroke, Transform};

/// Number of translucent layers used to fake the shadow blur.
const SHADOW_LAYERS: u32 = 4;
const BORDER_WIDTH: f32 = 1.0;
const BASELINE_WIDTH: f32 = 1.0;

/// Pixel size a frame target needs, including room for the shadow.
pub fn frame_size(pad: &RasterSignaturePad) -> (u32, u32) {
    let bounds = pad.bounds();
    let extent = match &pad.decorations().shadow {
        Some(shadow) => shadow.rect(bounds).inflate(shadow.blur_radius, shadow.blur_radius),
        None => bounds.to_rect(),
    };
    let size = Size::new(extent.x1.max(bounds.width), extent.y1.max(bounds.height));
    (size.width.ceil() as u32, size.height.ceil() as u32)
}

/// Draw the committed buffer, then the stroke in progress, onto `target`.
pub fn render_strokes(pad: &RasterSignaturePad, target: &mut Pixmap) {
    pad.compositor().draw_committed(target);
    draw_stroke_path(target, pad.in_progress(), &pad.style().stroke_style());
}

/// Compose a full frame: shadow, background, border, baseline, then strokes.
pub fn render_frame(pad: &RasterSignaturePad, target: &mut Pixmap) {
    let decorations = pad.decorations();
    let bounds = pad.bounds().to_rect();

    target.fill(tiny_skia::Color::TRANSPARENT);

    if let Some(shadow) = &decorations.shadow {
        draw_shadow(target, shadow, pad.bounds());
    }

    fill_rect(target, bounds, decorations.background);

    let inset = BORDER_WIDTH as f64 / 2.0;
    let mut border = BezPath::new();
    let edge = bounds.inset(-inset);
    border.move_to((edge.x0, edge.y0));
    border.line_to((edge.x1, edge.y0));
    border.line_to((edge.x1, edge.y1));
    border.line_to((edge.x0, edge.y1));
    border.close_path();
    stroke_line(target, &border, decorations.border_color, BORDER_WIDTH, LineCap::Butt);

    let baseline = decorations.line.baseline;
    let mut line = BezPath::new();
    line.move_to(baseline.p0);
    line.line_to(baseline.p1);
    stroke_line(target, &line, decorations.border_color, BASELINE_WIDTH, LineCap::Butt);

    render_strokes(pad, target);
}

fn draw_shadow(target: &mut Pixmap, shadow: &ShadowGeometry, bounds: Size) {
    let base = shadow.rect(bounds);
    let rgba = shadow.color.to_rgba8();
    let layer_alpha = rgba.a as f32 * shadow.opacity / SHADOW_LAYERS as f32;
    let color = Color::from_rgba8(rgba.r, rgba.g, rgba.b, layer_alpha.round() as u8);

    // Outer layers first; overlap darkens toward the core.
    for layer in (0..SHADOW_LAYERS).rev() {
        let spread = shadow.blur_radius * layer as f64 / SHADOW_LAYERS as f64;
        fill_rect(target, base.inflate(spread, spread), color);
    }
}

fn fill_rect(target: &mut Pixmap, rect: Rect, color: Color) {
    let Some(rect) = tiny_skia::Rect::from_ltrb(
        rect.x0 as f32,
        rect.y0 as f32,
        rect.x1 as f32,
        rect.y1 as f32,
    ) else {
        return;
    };
    target.fill_rect(rect, &solid_paint(color), Transform::identity(), None);
}

fn stroke_line(target: &mut Pixmap, path: &BezPath, color: Color, width: f32, line_cap: LineCap) {
    let Some(path) = to_skia_path(path) else {
        return;
    };
    let stroke = Stroke {
        width,
        line_cap,
        ..Stroke::default()
    };
    target.stroke_path(&path, &solid_paint(color), &stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster_pad;
    use kurbo::Point;
    use signet_core::SerializableColor;

    fn target(pad: &RasterSignaturePad) -> Pixmap {
        let (width, height) = frame_size(pad);
        Pixmap::new(width, height).unwrap()
    }

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let pixel = pixmap.pixel(x, y).unwrap().demultiply();
        (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
    }

    #[test]
    fn test_frame_size_without_shadow() {
        let pad = raster_pad(Size::new(100.0, 50.0)).unwrap();
        assert_eq!(frame_size(&pad), (100, 50));
    }

    #[test]
    fn test_frame_size_with_shadow() {
        let mut pad = raster_pad(Size::new(100.0, 50.0)).unwrap();
        pad.set_shadow_visible(true);
        let (width, height) = frame_size(&pad);
        assert!(width > 100);
        assert!(height > 50);
    }

    #[test]
    fn test_background_and_baseline() {
        let mut pad = raster_pad(Size::new(100.0, 100.0)).unwrap();
        pad.set_background_color(Color::from_rgba8(128, 128, 128, 255));
        let mut frame = target(&pad);
        render_frame(&pad, &mut frame);

        assert_eq!(rgba(&frame, 50, 20), (128, 128, 128, 255));
        // Baseline at y = 75 is drawn in the border shade.
        let border = SerializableColor::from(pad.decorations().border_color);
        let (r, g, b, _) = rgba(&frame, 50, 75);
        assert!(r < 128 && g < 128 && b < 128);
        assert!(border.luminance() < 0.5);
    }

    #[test]
    fn test_in_progress_stroke_visible_before_commit() {
        let mut pad = raster_pad(Size::new(60.0, 60.0)).unwrap();
        pad.begin(Point::new(0.0, 20.0));
        for x in [10.0, 20.0, 30.0, 40.0, 50.0] {
            pad.move_to(Point::new(x, 20.0));
        }
        assert!(pad.compositor().buffer().is_none());

        let mut frame = Pixmap::new(60, 60).unwrap();
        render_strokes(&pad, &mut frame);
        assert!(frame.pixel(15, 20).unwrap().alpha() > 0);
    }

    #[test]
    fn test_shadow_drawn_outside_pad() {
        let mut pad = raster_pad(Size::new(40.0, 40.0)).unwrap();
        pad.set_shadow_color(Color::from_rgba8(0, 255, 0, 255));
        pad.set_shadow_visible(true);
        let mut frame = target(&pad);
        render_frame(&pad, &mut frame);

        let (_, g, _, a) = rgba(&frame, 41, 41);
        assert!(a > 0);
        assert!(g > 0);
        // Inside the pad the opaque background covers the shadow.
        assert_eq!(rgba(&frame, 20, 20), (255, 255, 255, 255));
    }
}
