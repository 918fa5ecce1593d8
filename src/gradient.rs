use crate::core::{Axis, FrameRgb, Rgb8};

/// Fills the frame with a linear two-color gradient along `axis`.
///
/// The interpolation ratio is `i / extent` for each row (vertical) or column
/// (horizontal), so the first band is exactly `a` and the last band
/// approaches but does not reach `b`. Every pixel in the perpendicular band
/// receives the same interpolated color.
pub fn fill_linear_gradient(frame: &mut FrameRgb, a: Rgb8, b: Rgb8, axis: Axis) {
    let (width, height) = (frame.width as usize, frame.height as usize);
    match axis {
        Axis::Vertical => {
            for (y, row) in frame.data.chunks_exact_mut(width * 3).enumerate() {
                let color = lerp_rgb(a, b, y as f64 / height as f64);
                for px in row.chunks_exact_mut(3) {
                    px.copy_from_slice(&[color.r, color.g, color.b]);
                }
            }
        }
        Axis::Horizontal => {
            let band: Vec<Rgb8> = (0..width)
                .map(|x| lerp_rgb(a, b, x as f64 / width as f64))
                .collect();
            for row in frame.data.chunks_exact_mut(width * 3) {
                for (px, color) in row.chunks_exact_mut(3).zip(&band) {
                    px.copy_from_slice(&[color.r, color.g, color.b]);
                }
            }
        }
    }
}

fn lerp_rgb(a: Rgb8, b: Rgb8, ratio: f64) -> Rgb8 {
    let lerp = |a: u8, b: u8| {
        (f64::from(a) * (1.0 - ratio) + f64::from(b) * ratio)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgb8::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}
