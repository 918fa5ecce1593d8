use rand::Rng;

use crate::{
    core::{FrameRgba, Rgb8, Rgba8},
    error::{WallforgeError, WallforgeResult},
};

/// Scatters `count` translucent filled circles over the frame.
///
/// Circles are drawn opaquely into a transparent overlay (last-drawn wins),
/// then the overlay is alpha-composited onto the frame in one pass, so
/// overlapping circles of one batch do not stack their alpha. Anchors may
/// land up to half a canvas off the top-left edge, letting shapes bleed off
/// every border. Diameters range over [W/10, W/3].
pub fn scatter_circles(
    frame: &mut FrameRgba,
    rng: &mut impl Rng,
    color: Rgb8,
    alpha: u8,
    count: u32,
) -> WallforgeResult<()> {
    if count == 0 {
        return Ok(());
    }

    let w = i64::from(frame.width);
    let h = i64::from(frame.height);
    let mut overlay = FrameRgba::transparent(frame.size());
    let fill = color.with_alpha(alpha);

    for _ in 0..count {
        let x = rng.gen_range(-(w / 2)..=w);
        let y = rng.gen_range(-(h / 2)..=h);
        let diameter = rng.gen_range((w / 10).max(1)..=(w / 3).max(1));
        fill_circle(&mut overlay, x, y, diameter, fill);
    }

    composite_over(frame, &overlay)
}

/// Draws a filled circle with top-left bounding-box anchor `(x, y)`, clipped
/// to the overlay. Opaque overwrite, no blending within the overlay.
fn fill_circle(overlay: &mut FrameRgba, x: i64, y: i64, diameter: i64, fill: Rgba8) {
    let radius = diameter as f64 / 2.0;
    let cx = x as f64 + radius;
    let cy = y as f64 + radius;

    let y0 = y.clamp(0, i64::from(overlay.height));
    let y1 = (y + diameter).clamp(0, i64::from(overlay.height));
    for yy in y0..y1 {
        let dy = (yy as f64 + 0.5) - cy;
        let span = radius * radius - dy * dy;
        if span < 0.0 {
            continue;
        }
        let half = span.sqrt();
        let x0 = ((cx - half).floor() as i64).clamp(0, i64::from(overlay.width));
        let x1 = ((cx + half).ceil() as i64).clamp(0, i64::from(overlay.width));
        for xx in x0..x1 {
            overlay.put(xx as u32, yy as u32, fill);
        }
    }
}

/// Alpha-composites `src` onto `dst` per pixel: `out = dst*(1-a) + src*a`.
pub fn composite_over(dst: &mut FrameRgba, src: &FrameRgba) -> WallforgeResult<()> {
    if dst.width != src.width || dst.height != src.height {
        return Err(WallforgeError::validation(
            "composite_over expects equal-size frames",
        ));
    }
    for (d, s) in dst.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - sa;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), sa);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out[3] = (sa as u8).saturating_add(mul_div255(u16::from(dst[3]), inv));
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
