use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context as _;
use image::{ExtendedColorType, ImageEncoder as _, codecs::jpeg::JpegEncoder, codecs::png::PngEncoder};

use crate::{core::FrameRgb, error::WallforgeResult};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Output encodings the sink supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Writes a finished frame to `path`, creating parent directories as needed.
///
/// `quality` applies to JPEG only (1-100); PNG is lossless. A write failure
/// surfaces to the caller; no partial file cleanup is attempted beyond what
/// the OS gives us.
pub fn write_image(
    frame: &FrameRgb,
    path: &Path,
    format: OutputFormat,
    quality: u8,
) -> WallforgeResult<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path)
        .with_context(|| format!("failed to create output file '{}'", path.display()))?;
    let writer = BufWriter::new(file);

    match format {
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(writer, quality).write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Png => PngEncoder::new(writer).write_image(
            &frame.data,
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        ),
    }
    .with_context(|| format!("failed to encode '{}'", path.display()))?;

    Ok(())
}

pub fn write_jpeg(frame: &FrameRgb, path: &Path, quality: u8) -> WallforgeResult<()> {
    write_image(frame, path, OutputFormat::Jpeg, quality)
}

pub fn ensure_parent_dir(path: &Path) -> WallforgeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory '{}'", parent.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CanvasSize, Rgb8};

    fn frame() -> FrameRgb {
        FrameRgb::filled(CanvasSize::new(20, 12).unwrap(), Rgb8::new(90, 140, 200))
    }

    #[test]
    fn write_jpeg_creates_directories_and_a_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/wallpaper_001.jpg");
        write_jpeg(&frame(), &path, DEFAULT_JPEG_QUALITY).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 12));
    }

    #[test]
    fn write_png_round_trips_pixels_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallpaper_001.png");
        let src = frame();
        write_image(&src, &path, OutputFormat::Png, 0).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.as_raw(), &src.data);
    }

    #[test]
    fn write_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A file where a directory is needed.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("out.jpg");
        assert!(write_jpeg(&frame(), &path, 95).is_err());
    }
}
