use rand::Rng;

use crate::{
    blur::gaussian_blur_rgb,
    core::FrameRgb,
    error::{WallforgeError, WallforgeResult},
};

/// Weight of the noise frame when it is blended into the image.
const NOISE_BLEND: f64 = 0.05;

/// Post-processing parameters for one image.
///
/// Contrast scales each pixel's deviation from the image's mean luma;
/// saturation scales each pixel's deviation from its own luma. Both use
/// ITU-R 601-2 luma weights (299/587/114), the same convention PIL's
/// `ImageEnhance` module applies.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PostFx {
    /// Gaussian blur radius in pixels for the softening pass.
    pub blur_radius: u32,
    /// Weight of the sharp original when blending with the blurred copy,
    /// in [0, 1]. 1.0 keeps the image fully sharp.
    pub blend_ratio: f32,
    /// Upper bound of the per-pixel gray noise value. 0 disables the noise
    /// pass entirely.
    pub noise_intensity: u8,
    /// Contrast factor; 1.0 is neutral, > 1 increases contrast.
    pub contrast: f32,
    /// Saturation factor; 1.0 is neutral, > 1 deepens colors.
    pub saturation: f32,
}

impl Default for PostFx {
    /// The glassmorphism-inspired finish: 70% sharp over a radius-50 blur,
    /// subtle gray noise, slight contrast and color boost.
    fn default() -> Self {
        Self {
            blur_radius: 50,
            blend_ratio: 0.7,
            noise_intensity: 15,
            contrast: 1.1,
            saturation: 1.15,
        }
    }
}

impl PostFx {
    pub fn validate(&self) -> WallforgeResult<()> {
        if !self.blend_ratio.is_finite() || !(0.0..=1.0).contains(&self.blend_ratio) {
            return Err(WallforgeError::validation(
                "blend_ratio must be finite and within [0, 1]",
            ));
        }
        for (name, v) in [("contrast", self.contrast), ("saturation", self.saturation)] {
            if !v.is_finite() || v < 0.0 {
                return Err(WallforgeError::validation(format!(
                    "{name} factor must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Runs the full post chain: blur blend, noise texture, contrast, saturation.
///
/// The input frame is never mutated; each stage consumes the previous
/// result. Neutral parameters (radius 0, blend 1, noise 0, factors 1) return
/// a bit-identical copy.
pub fn post_process(
    src: &FrameRgb,
    fx: &PostFx,
    rng: &mut impl Rng,
) -> WallforgeResult<FrameRgb> {
    fx.validate()?;

    let mut frame = blend_with_blur(src, fx.blur_radius, f64::from(fx.blend_ratio))?;
    if fx.noise_intensity > 0 {
        apply_noise(&mut frame, fx.noise_intensity, rng);
    }
    if fx.contrast != 1.0 {
        apply_contrast(&mut frame, f64::from(fx.contrast));
    }
    if fx.saturation != 1.0 {
        apply_saturation(&mut frame, f64::from(fx.saturation));
    }
    Ok(frame)
}

/// `result = blurred*(1-ratio) + original*ratio`, per channel.
fn blend_with_blur(src: &FrameRgb, radius: u32, ratio: f64) -> WallforgeResult<FrameRgb> {
    if radius == 0 || ratio == 1.0 {
        return Ok(src.clone());
    }
    let blurred = gaussian_blur_rgb(src, radius)?;
    let mut out = blurred;
    for (o, s) in out.data.iter_mut().zip(&src.data) {
        *o = lerp_u8(*o, *s, ratio);
    }
    Ok(out)
}

/// Blends a synthetic gray-noise frame in at a fixed low weight. All three
/// channels of a pixel share one noise value, so the texture reads as grain
/// rather than color speckle.
fn apply_noise(frame: &mut FrameRgb, intensity: u8, rng: &mut impl Rng) {
    for px in frame.data.chunks_exact_mut(3) {
        let n = rng.gen_range(0..=intensity);
        for c in px {
            *c = lerp_u8(*c, n, NOISE_BLEND);
        }
    }
}

/// Scales deviation from the image's mean luma.
fn apply_contrast(frame: &mut FrameRgb, factor: f64) {
    let mut sum: u64 = 0;
    for px in frame.data.chunks_exact(3) {
        sum += luma_milli(px[0], px[1], px[2]);
    }
    let pixels = (frame.data.len() / 3) as u64;
    let mean = sum as f64 / 1000.0 / pixels as f64;

    for c in frame.data.iter_mut() {
        *c = clamp_u8(mean + (f64::from(*c) - mean) * factor);
    }
}

/// Scales each pixel's deviation from its own luma.
fn apply_saturation(frame: &mut FrameRgb, factor: f64) {
    for px in frame.data.chunks_exact_mut(3) {
        let l = luma_milli(px[0], px[1], px[2]) as f64 / 1000.0;
        for c in px {
            *c = clamp_u8(l + (f64::from(*c) - l) * factor);
        }
    }
}

/// ITU-R 601-2 luma, scaled by 1000 to stay in integer math.
fn luma_milli(r: u8, g: u8, b: u8) -> u64 {
    299 * u64::from(r) + 587 * u64::from(g) + 114 * u64::from(b)
}

fn lerp_u8(a: u8, b: u8, weight_b: f64) -> u8 {
    clamp_u8(f64::from(a) * (1.0 - weight_b) + f64::from(b) * weight_b)
}

fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CanvasSize, Rgb8};
    use rand::{SeedableRng, rngs::StdRng};

    fn neutral() -> PostFx {
        PostFx {
            blur_radius: 0,
            blend_ratio: 1.0,
            noise_intensity: 0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }

    fn gradient_frame() -> FrameRgb {
        let mut f = FrameRgb::filled(CanvasSize::new(8, 8).unwrap(), Rgb8::new(0, 0, 0));
        crate::gradient::fill_linear_gradient(
            &mut f,
            Rgb8::new(30, 60, 90),
            Rgb8::new(220, 180, 140),
            crate::core::Axis::Vertical,
        );
        f
    }

    #[test]
    fn neutral_parameters_are_identity() {
        let src = gradient_frame();
        let mut rng = StdRng::seed_from_u64(3);
        let out = post_process(&src, &neutral(), &mut rng).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn noise_is_gray_and_bounded() {
        let src = FrameRgb::filled(CanvasSize::new(16, 16).unwrap(), Rgb8::new(128, 128, 128));
        let fx = PostFx {
            noise_intensity: 15,
            ..neutral()
        };
        let mut rng = StdRng::seed_from_u64(4);
        let out = post_process(&src, &fx, &mut rng).unwrap();

        for px in out.data.chunks_exact(3) {
            // One shared noise value per pixel keeps the grain colorless.
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            // 5% of a [0, 15] value can only nudge a channel slightly.
            assert!((115..=129).contains(&px[0]), "channel {} out of range", px[0]);
        }
    }

    #[test]
    fn contrast_above_1_widens_the_spread() {
        let size = CanvasSize::new(4, 2).unwrap();
        let mut src = FrameRgb::filled(size, Rgb8::new(80, 80, 80));
        for x in 0..4 {
            src.put(x, 1, Rgb8::new(180, 180, 180));
        }
        let fx = PostFx {
            contrast: 1.5,
            ..neutral()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let out = post_process(&src, &fx, &mut rng).unwrap();

        assert!(out.get(0, 0).r < 80, "dark side should get darker");
        assert!(out.get(0, 1).r > 180, "bright side should get brighter");
    }

    #[test]
    fn saturation_above_1_pushes_channels_from_luma() {
        let src = FrameRgb::filled(CanvasSize::new(2, 2).unwrap(), Rgb8::new(150, 100, 100));
        let fx = PostFx {
            saturation: 2.0,
            ..neutral()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let out = post_process(&src, &fx, &mut rng).unwrap();

        let px = out.get(0, 0);
        assert!(px.r > 150, "dominant channel should rise");
        assert!(px.g < 100 && px.b < 100, "recessive channels should fall");
    }

    #[test]
    fn blur_blend_moves_toward_blurred_copy() {
        let mut src = FrameRgb::filled(CanvasSize::new(9, 9).unwrap(), Rgb8::new(0, 0, 0));
        src.put(4, 4, Rgb8::new(255, 255, 255));
        let fx = PostFx {
            blur_radius: 2,
            blend_ratio: 0.5,
            ..neutral()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let out = post_process(&src, &fx, &mut rng).unwrap();

        assert!(out.get(4, 4).r < 255, "peak should soften");
        assert!(out.get(4, 3).r > 0, "neighbors should pick up energy");
    }

    #[test]
    fn invalid_factors_are_rejected() {
        let src = gradient_frame();
        let mut rng = StdRng::seed_from_u64(8);
        for fx in [
            PostFx {
                blend_ratio: 1.5,
                ..neutral()
            },
            PostFx {
                blend_ratio: f32::NAN,
                ..neutral()
            },
            PostFx {
                contrast: -0.1,
                ..neutral()
            },
            PostFx {
                saturation: f32::INFINITY,
                ..neutral()
            },
        ] {
            assert!(matches!(
                post_process(&src, &fx, &mut rng),
                Err(WallforgeError::Validation(_))
            ));
        }
    }
}
