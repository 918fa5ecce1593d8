use rand::Rng;

use crate::{
    core::{Axis, CanvasSize, FrameRgb, Rgb8},
    error::WallforgeResult,
    gradient::fill_linear_gradient,
    overlay::scatter_circles,
    palette::PaletteCatalog,
    post::{PostFx, post_process},
};

/// One translucent circle-scatter pass over the gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPass {
    pub alpha: u8,
    pub count: u32,
}

/// Immutable per-pipeline configuration. One config serves any number of
/// `generate` calls; all randomness comes from the caller's RNG.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    pub canvas: CanvasSize,
    pub overlays: Vec<OverlayPass>,
    pub post: PostFx,
}

impl Default for PipelineConfig {
    /// The stock look: a 1440x3200 portrait canvas, a bolder scatter pass
    /// under a sparser faint one, and the default post chain.
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            overlays: vec![
                OverlayPass {
                    alpha: 40,
                    count: 10,
                },
                OverlayPass { alpha: 30, count: 8 },
            ],
            post: PostFx::default(),
        }
    }
}

/// The style choices sampled for one image. Never persisted by the pipeline
/// itself; callers may serialize it as a sidecar record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyleParams {
    pub palette: String,
    pub background_top: Rgb8,
    pub background_bottom: Rgb8,
    /// One color per overlay pass; the first is the accent color.
    pub overlay_colors: Vec<Rgb8>,
}

/// A finished image plus its suggested filename and the parameters that
/// produced it.
#[derive(Clone, Debug)]
pub struct Wallpaper {
    pub frame: FrameRgb,
    pub filename: String,
    pub params: StyleParams,
}

/// Composes sampler, gradient, overlays and post-processing into one
/// finished bitmap per call.
#[derive(Clone, Debug)]
pub struct WallpaperPipeline {
    config: PipelineConfig,
    catalog: PaletteCatalog,
}

impl WallpaperPipeline {
    pub fn new(config: PipelineConfig) -> WallforgeResult<Self> {
        Ok(Self {
            config,
            catalog: PaletteCatalog::builtin()?,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PaletteCatalog {
        &self.catalog
    }

    /// Generates one wallpaper from a randomly chosen palette.
    pub fn generate(&self, rng: &mut impl Rng, index: u32) -> WallforgeResult<Wallpaper> {
        self.generate_with_palette(rng, index, None)
    }

    /// Generates one wallpaper, optionally pinned to a named palette.
    ///
    /// Any stage failure aborts this image only; the pipeline holds no state
    /// across calls, so later indices are unaffected.
    #[tracing::instrument(skip(self, rng))]
    pub fn generate_with_palette(
        &self,
        rng: &mut impl Rng,
        index: u32,
        palette: Option<&str>,
    ) -> WallforgeResult<Wallpaper> {
        let palette_name = match palette {
            Some(name) => {
                self.catalog.get(name)?;
                name.to_owned()
            }
            None => self.catalog.sample_name(rng).to_owned(),
        };

        let background_top = self.catalog.sample_color(rng, Some(&palette_name))?;
        let background_bottom = self.catalog.sample_color(rng, Some(&palette_name))?;

        let mut base = FrameRgb::filled(self.config.canvas, background_top);
        fill_linear_gradient(&mut base, background_top, background_bottom, Axis::Vertical);
        tracing::debug!(palette = %palette_name, "gradient rendered");

        let mut layered = base.into_rgba();
        let mut overlay_colors = Vec::with_capacity(self.config.overlays.len());
        for pass in &self.config.overlays {
            let color = self.catalog.sample_color(rng, Some(&palette_name))?;
            scatter_circles(&mut layered, rng, color, pass.alpha, pass.count)?;
            overlay_colors.push(color);
        }
        tracing::debug!(passes = self.config.overlays.len(), "overlays composited");

        let finished = post_process(&layered.flatten(), &self.config.post, rng)?;
        tracing::debug!("post-processing applied");

        Ok(Wallpaper {
            frame: finished,
            filename: format!("wallpaper_{index:03}.jpg"),
            params: StyleParams {
                palette: palette_name,
                background_top,
                background_bottom,
                overlay_colors,
            },
        })
    }
}
