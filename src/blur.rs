use rayon::prelude::*;

use crate::{
    core::FrameRgb,
    error::{WallforgeError, WallforgeResult},
};

/// Separable Gaussian blur over a straight-RGB frame with edge clamping.
///
/// Sigma is derived as `radius / 2`, so larger radii soften more. The kernel
/// is normalized in q16 fixed point; `radius = 0` returns the input
/// unchanged. Rows are processed on the rayon pool.
pub fn gaussian_blur_rgb(src: &FrameRgb, radius: u32) -> WallforgeResult<FrameRgb> {
    let expected_len = (src.width as usize)
        .checked_mul(src.height as usize)
        .and_then(|v| v.checked_mul(3))
        .ok_or_else(|| WallforgeError::validation("blur buffer size overflow"))?;
    if src.data.len() != expected_len {
        return Err(WallforgeError::validation(
            "gaussian_blur_rgb expects data matching width*height*3",
        ));
    }
    if radius == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, radius as f32 / 2.0)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(&src.data, &mut tmp, src.width, &kernel);
    vertical_pass(&tmp, &mut out, src.width, src.height, &kernel);

    Ok(FrameRgb {
        width: src.width,
        height: src.height,
        data: out,
    })
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> WallforgeResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(WallforgeError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    // Quantize to q16 and push any rounding drift into the center tap so the
    // kernel sums to exactly 1.0.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_bytes = (width as usize) * 3;

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            let src_row = &src[y * row_bytes..y * row_bytes + row_bytes];
            for x in 0..w {
                let mut acc = [0u64; 3];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1) as usize;
                    for c in 0..3 {
                        acc[c] += u64::from(kw) * u64::from(src_row[sx * 3 + c]);
                    }
                }
                for c in 0..3 {
                    out_row[(x as usize) * 3 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_bytes = (width as usize) * 3;

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 3];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1) as usize;
                    let idx = sy * row_bytes + x * 3;
                    for c in 0..3 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..3 {
                    out_row[x * 3 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}
