//! Wallforge procedurally generates decorative raster wallpapers.
//!
//! Each image is synthesized in a single pass from a handful of randomized
//! style parameters:
//!
//! 1. **Sample**: pick a palette and draw background/accent colors from it
//! 2. **Gradient**: fill the canvas with a vertical two-color gradient
//! 3. **Overlay**: composite two layers of translucent scattered circles
//! 4. **Post**: blur-blend, noise texture, contrast and saturation enhancement
//! 5. **Sink**: encode the finished frame as JPEG (or PNG) on disk
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Explicit randomness**: every sampling stage takes an `impl Rng`, so a
//!   seeded generator reproduces an image exactly.
//! - **No IO in the pipeline**: [`pipeline::WallpaperPipeline::generate`]
//!   returns an owned frame; writing files is the [`sink`] module's job.
//! - **Straight RGB8/RGBA8** pixel buffers end-to-end; each stage consumes
//!   one frame and produces the next, no sharing across stages.
#![forbid(unsafe_code)]

pub mod blur;
pub mod core;
pub mod error;
pub mod gradient;
pub mod overlay;
pub mod palette;
pub mod pipeline;
pub mod post;
pub mod sink;

pub use self::core::{Axis, CanvasSize, FrameRgb, FrameRgba, Rgb8, Rgba8};
pub use error::{WallforgeError, WallforgeResult};
pub use palette::PaletteCatalog;
pub use pipeline::{PipelineConfig, StyleParams, Wallpaper, WallpaperPipeline};
pub use post::PostFx;
