//! Raster primitives: gradients, rounded rectangles, soft shadows, and
//! aspect-fit image placement.
//!
//! Shapes are rasterized from a signed distance to the rounded rectangle,
//! sampled at pixel centers, which gives stable anti-aliased edges without
//! a separate coverage buffer.

use image::{Rgba, RgbaImage, imageops};

use crate::layout::Rect;

/// Source-over blend of `color` at `alpha` onto one pixel.
pub fn blend_px(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, alpha: f32) {
    if x >= img.width() || y >= img.height() {
        return;
    }
    let a = (alpha * f32::from(color[3]) / 255.0).clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x, y);
    for c in 0..3 {
        dst[c] = (f32::from(color[c]) * a + f32::from(dst[c]) * (1.0 - a)).round() as u8;
    }
    let da = f32::from(dst[3]) / 255.0;
    dst[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
}

/// Fill the whole canvas with a vertical linear gradient.
pub fn fill_vertical_gradient(img: &mut RgbaImage, top: Rgba<u8>, bottom: Rgba<u8>) {
    let h = img.height();
    let denom = (h.saturating_sub(1)).max(1) as f32;
    for y in 0..h {
        let t = y as f32 / denom;
        let row = Rgba([
            lerp_channel(top[0], bottom[0], t),
            lerp_channel(top[1], bottom[1], t),
            lerp_channel(top[2], bottom[2], t),
            lerp_channel(top[3], bottom[3], t),
        ]);
        for x in 0..img.width() {
            img.put_pixel(x, y, row);
        }
    }
}

/// Fill an anti-aliased rounded rectangle. A radius of zero fills a plain
/// rectangle; a radius of half the shorter edge fills a capsule/circle.
pub fn fill_rounded_rect(img: &mut RgbaImage, rect: Rect, radius: f32, color: Rgba<u8>) {
    let (x0, y0, x1, y1) = pixel_bounds(img, rect.x - 1.0, rect.y - 1.0, rect.max_x() + 1.0, rect.max_y() + 1.0);
    for y in y0..y1 {
        for x in x0..x1 {
            let d = rounded_rect_sdf(x as f32 + 0.5, y as f32 + 0.5, rect, radius);
            let cov = coverage(d);
            if cov > 0.0 {
                blend_px(img, x, y, color, cov);
            }
        }
    }
}

/// Draw a soft drop shadow for a rounded rectangle, offset vertically by
/// `offset_y` and feathered over `blur` pixels.
pub fn draw_soft_shadow(
    img: &mut RgbaImage,
    rect: Rect,
    radius: f32,
    offset_y: f32,
    blur: f32,
    alpha: f32,
) {
    let shadow = Rect {
        x: rect.x,
        y: rect.y + offset_y,
        w: rect.w,
        h: rect.h,
    };
    let (x0, y0, x1, y1) = pixel_bounds(
        img,
        shadow.x - blur,
        shadow.y - blur,
        shadow.max_x() + blur,
        shadow.max_y() + blur,
    );
    for y in y0..y1 {
        for x in x0..x1 {
            let d = rounded_rect_sdf(x as f32 + 0.5, y as f32 + 0.5, shadow, radius);
            let a = alpha * (1.0 - smoothstep(-blur, blur, d));
            if a > 0.0 {
                blend_px(img, x, y, Rgba([0, 0, 0, 255]), a);
            }
        }
    }
}

/// Draw `src` aspect-fit and centered inside `slot`, clipped to the slot's
/// rounded rectangle.
pub fn draw_image_fit(img: &mut RgbaImage, src: &RgbaImage, slot: Rect, corner_radius: f32) {
    if src.width() == 0 || src.height() == 0 || slot.w <= 0.0 || slot.h <= 0.0 {
        return;
    }

    let fitted = aspect_fit_rect(src.width() as f32, src.height() as f32, slot);
    let fw = fitted.w.round().max(1.0) as u32;
    let fh = fitted.h.round().max(1.0) as u32;
    let resized = imageops::resize(src, fw, fh, imageops::FilterType::Triangle);

    let ox = fitted.x.round() as i64;
    let oy = fitted.y.round() as i64;
    for (sx, sy, px) in resized.enumerate_pixels() {
        let dx = ox + i64::from(sx);
        let dy = oy + i64::from(sy);
        if dx < 0 || dy < 0 {
            continue;
        }
        let (dx, dy) = (dx as u32, dy as u32);
        if dx >= img.width() || dy >= img.height() {
            continue;
        }
        let d = rounded_rect_sdf(dx as f32 + 0.5, dy as f32 + 0.5, slot, corner_radius);
        let cov = coverage(d);
        if cov > 0.0 {
            blend_px(img, dx, dy, *px, cov);
        }
    }
}

/// Largest rectangle with the source aspect ratio fitting inside `slot`,
/// centered.
pub fn aspect_fit_rect(src_w: f32, src_h: f32, slot: Rect) -> Rect {
    if src_w <= 0.0 || src_h <= 0.0 {
        return slot;
    }
    let scale = (slot.w / src_w).min(slot.h / src_h);
    let w = src_w * scale;
    let h = src_h * scale;
    Rect {
        x: slot.mid_x() - w / 2.0,
        y: slot.mid_y() - h / 2.0,
        w,
        h,
    }
}

/// Signed distance from a point to a rounded rectangle's edge. Negative
/// inside, positive outside.
fn rounded_rect_sdf(px: f32, py: f32, rect: Rect, radius: f32) -> f32 {
    let r = radius.clamp(0.0, rect.w.min(rect.h) / 2.0);
    let hx = rect.w / 2.0 - r;
    let hy = rect.h / 2.0 - r;
    let qx = (px - rect.mid_x()).abs() - hx;
    let qy = (py - rect.mid_y()).abs() - hy;
    let ax = qx.max(0.0);
    let ay = qy.max(0.0);
    (ax * ax + ay * ay).sqrt() + qx.max(qy).min(0.0) - r
}

/// Edge coverage from a signed distance sampled at the pixel center.
fn coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
}

/// Clamp a float rectangle to the canvas pixel grid.
fn pixel_bounds(img: &RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32) -> (u32, u32, u32, u32) {
    let cx0 = x0.floor().max(0.0) as u32;
    let cy0 = y0.floor().max(0.0) as u32;
    let cx1 = (x1.ceil().max(0.0) as u32).min(img.width());
    let cy1 = (y1.ceil().max(0.0) as u32).min(img.height());
    (cx0, cy0, cx1, cy1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn gradient_interpolates_between_endpoints() {
        let mut img = canvas(4, 3);
        fill_vertical_gradient(&mut img, Rgba([0, 0, 0, 255]), Rgba([200, 100, 50, 255]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 2), Rgba([200, 100, 50, 255]));
        assert_eq!(*img.get_pixel(0, 1), Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn rounded_rect_fills_center_and_spares_corners() {
        let mut img = canvas(40, 40);
        let rect = Rect {
            x: 4.0,
            y: 4.0,
            w: 32.0,
            h: 32.0,
        };
        fill_rounded_rect(&mut img, rect, 12.0, Rgba([255, 255, 255, 255]));
        // Center is fully painted.
        assert_eq!(*img.get_pixel(20, 20), Rgba([255, 255, 255, 255]));
        // Extreme corner of the bounding box is outside the radius.
        assert_eq!(*img.get_pixel(4, 4), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn aspect_fit_centers_wide_source_in_square_slot() {
        let slot = Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        };
        let fitted = aspect_fit_rect(200.0, 100.0, slot);
        assert_eq!(fitted.w, 100.0);
        assert_eq!(fitted.h, 50.0);
        assert_eq!(fitted.y, 25.0);
    }

    #[test]
    fn draw_image_fit_handles_zero_sized_source() {
        let mut img = canvas(10, 10);
        let src = RgbaImage::new(0, 0);
        let before = img.clone();
        draw_image_fit(
            &mut img,
            &src,
            Rect {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 10.0,
            },
            2.0,
        );
        assert_eq!(img, before);
    }

    #[test]
    fn shadow_darkens_below_the_rect() {
        let mut img = canvas(60, 60);
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 40.0,
            h: 20.0,
        };
        fill_vertical_gradient(&mut img, Rgba([255; 4]), Rgba([255; 4]));
        draw_soft_shadow(&mut img, rect, 6.0, 8.0, 10.0, 0.5);
        // Pixel just below the rect is darkened; far corner is untouched.
        assert!(img.get_pixel(30, 40)[0] < 255);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
    }
}
