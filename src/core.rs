use crate::error::{WallforgeError, WallforgeResult};

/// Straight (non-premultiplied) 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `RRGGBB` hex triplet, optionally prefixed with `#`.
    pub fn from_hex(raw: &str) -> WallforgeResult<Self> {
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WallforgeError::malformed_color(raw));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| WallforgeError::malformed_color(raw))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// Straight-alpha 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// Axis a linear gradient runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Fixed canvas dimensions for one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> WallforgeResult<Self> {
        if width == 0 || height == 0 {
            return Err(WallforgeError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl Default for CanvasSize {
    /// 1440x3200, a common high-end portrait phone resolution.
    fn default() -> Self {
        Self {
            width: 1440,
            height: 3200,
        }
    }
}

/// Owned packed RGB8 pixel buffer (row-major, 3 bytes per pixel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgb {
    pub fn filled(size: CanvasSize, color: Rgb8) -> Self {
        let mut data = Vec::with_capacity(size.pixel_count() * 3);
        for _ in 0..size.pixel_count() {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.width,
            height: self.height,
        }
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        let i = self.idx(x, y);
        Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    pub fn put(&mut self, x: u32, y: u32, color: Rgb8) {
        let i = self.idx(x, y);
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
    }

    /// Converts to an opaque RGBA frame (alpha 255 everywhere).
    pub fn into_rgba(self) -> FrameRgba {
        let mut data = Vec::with_capacity(self.data.len() / 3 * 4);
        for px in self.data.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        FrameRgba {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Owned packed straight-alpha RGBA8 pixel buffer (row-major, 4 bytes per pixel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn transparent(size: CanvasSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0u8; size.pixel_count() * 4],
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.width,
            height: self.height,
        }
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.idx(x, y);
        Rgba8 {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    pub fn put(&mut self, x: u32, y: u32, color: Rgba8) {
        let i = self.idx(x, y);
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    /// Drops the alpha channel.
    pub fn flatten(self) -> FrameRgb {
        let mut data = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            data.extend_from_slice(&[px[0], px[1], px[2]]);
        }
        FrameRgb {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_round_trips() {
        for raw in ["#7ED6DF", "26C6DA", "#d946ef", "008C9E"] {
            let c = Rgb8::from_hex(raw).unwrap();
            let formatted = c.to_hex();
            let expected = format!("#{}", raw.trim_start_matches('#').to_ascii_uppercase());
            assert_eq!(formatted, expected);
        }
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        for raw in ["", "#fff", "1234567", "#GGGGGG", "12 456"] {
            assert!(matches!(
                Rgb8::from_hex(raw),
                Err(WallforgeError::MalformedColor(_))
            ));
        }
    }

    #[test]
    fn canvas_size_rejects_zero_dimensions() {
        assert!(matches!(
            CanvasSize::new(0, 3200),
            Err(WallforgeError::InvalidDimensions(0, 3200))
        ));
        assert!(matches!(
            CanvasSize::new(1440, 0),
            Err(WallforgeError::InvalidDimensions(1440, 0))
        ));
        assert!(CanvasSize::new(1, 1).is_ok());
    }

    #[test]
    fn default_canvas_is_phone_portrait() {
        let size = CanvasSize::default();
        assert_eq!((size.width, size.height), (1440, 3200));
    }

    #[test]
    fn rgb_rgba_conversion_round_trips() {
        let size = CanvasSize::new(3, 2).unwrap();
        let mut frame = FrameRgb::filled(size, Rgb8::new(10, 20, 30));
        frame.put(2, 1, Rgb8::new(200, 100, 50));

        let rgba = frame.clone().into_rgba();
        assert_eq!(rgba.get(0, 0).a, 255);
        assert_eq!(rgba.get(2, 1), Rgb8::new(200, 100, 50).with_alpha(255));
        assert_eq!(rgba.flatten(), frame);
    }

    #[test]
    fn transparent_frame_is_all_zero() {
        let frame = FrameRgba::transparent(CanvasSize::new(2, 2).unwrap());
        assert!(frame.data.iter().all(|&b| b == 0));
        assert_eq!(frame.get(1, 1), Rgba8::transparent());
    }
}
