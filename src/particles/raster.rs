use std::path::Path;

use anyhow::Context;

use crate::{SceneError, SceneResult, foundation::core::Rgba8};

/// Straight (non-premultiplied) RGBA8 pixels, the input of particle sampling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Raster {
    /// Wrap raw pixels. `rgba.len()` must equal `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> SceneResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(SceneError::asset(format!(
                "raster {width}x{height} needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Take over an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba: img.into_raw(),
        }
    }

    /// Decode PNG, JPEG or any other format `image` understands.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn decode(bytes: &[u8]) -> SceneResult<Self> {
        let img = image::load_from_memory(bytes).context("decode image from memory")?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    /// Parse and rasterize an SVG document at its intrinsic size, scaled by `scale`.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_svg(bytes: &[u8], scale: f32) -> SceneResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SceneError::asset("svg scale must be finite and > 0"));
        }
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
        let size = tree.size();
        let width = (size.width() * scale).ceil().max(1.0) as u32;
        let height = (size.height() * scale).ceil().max(1.0) as u32;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| SceneError::asset("failed to allocate svg pixmap"))?;
        let xform = resvg::tiny_skia::Transform::from_scale(scale, scale);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let mut rgba = pixmap.take();
        demultiply_rgba8_in_place(&mut rgba);
        Self::new(width, height, rgba)
    }

    /// Pick SVG or bitmap decoding by sniffing the leading bytes.
    pub fn from_bytes(bytes: &[u8]) -> SceneResult<Self> {
        if looks_like_svg(bytes) {
            Self::from_svg(bytes, 1.0)
        } else {
            Self::decode(bytes)
        }
    }

    /// Read and decode a file.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// Width in px.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in px.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, transparent outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        if x >= self.width || y >= self.height {
            return Rgba8::TRANSPARENT;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Rgba8::rgba(
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        )
    }

    /// Raw straight RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/raster.rs"]
mod tests;
