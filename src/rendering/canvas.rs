//! Low-level drawing primitives shared by all panel renderers
//!
//! A [`Canvas`] is an RGBA buffer with alpha-compositing paste, file-backed
//! image placement, and multi-line text drawn through `ab_glyph`. Panels
//! build their sub-images here and the compositor pastes the finished
//! panels with the same primitives.

use std::path::Path;

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};

use crate::error::Result;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Where `pos` sits relative to the drawn text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `pos` is the top-left corner of the block.
    LeftTop,
    /// `pos` is the center of the block, both axes.
    MiddleMiddle,
}

/// Transparent RGBA canvas of fixed size.
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// Alpha-composite `im` onto the canvas. Offsets may be negative; the
    /// out-of-bounds portion is clipped.
    pub fn paste(&mut self, im: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.img, im, x, y);
    }

    /// Decode the image at `path`, optionally resize it, and paste it.
    pub fn add_image(
        &mut self,
        path: &Path,
        size: Option<(u32, u32)>,
        pos: (i64, i64),
    ) -> Result<()> {
        let decoded = image::open(path)?.to_rgba8();
        let im = match size {
            Some((w, h)) if (w, h) != decoded.dimensions() => {
                imageops::resize(&decoded, w, h, FilterType::Lanczos3)
            }
            _ => decoded,
        };
        self.paste(&im, pos.0, pos.1);
        Ok(())
    }

    /// Draw multi-line, left-aligned text. Lines are split on `\n`.
    pub fn draw_text(
        &mut self,
        font: &FontArc,
        text: &str,
        pos: (i32, i32),
        px: f32,
        color: Rgba<u8>,
        anchor: TextAnchor,
    ) {
        let block = text_image(font, text, px, color);
        if block.width() == 0 || block.height() == 0 {
            return;
        }
        let (x, y) = anchored(pos, &block, anchor);
        self.paste(&block, x, y);
    }

    /// Draw text with an outward glow: a blurred, recolored copy of the
    /// text sits under the sharp text at the same position (zero offset).
    pub fn draw_text_with_glow(
        &mut self,
        font: &FontArc,
        text: &str,
        pos: (i32, i32),
        px: f32,
        color: Rgba<u8>,
        glow_color: Rgba<u8>,
        blur_radius: f32,
        anchor: TextAnchor,
    ) {
        let block = text_image(font, text, px, color);
        if block.width() == 0 || block.height() == 0 {
            return;
        }
        // Pad so the halo can bleed past the glyph bounds before blurring.
        let pad = (blur_radius * 3.0).ceil() as u32;
        let mut padded = RgbaImage::new(block.width() + pad * 2, block.height() + pad * 2);
        imageops::overlay(&mut padded, &block, i64::from(pad), i64::from(pad));
        let halo = recolor(&imageops::blur(&padded, blur_radius), glow_color);

        let (x, y) = anchored(pos, &block, anchor);
        self.paste(&halo, x - i64::from(pad), y - i64::from(pad));
        self.paste(&block, x, y);
    }
}

fn anchored(pos: (i32, i32), block: &RgbaImage, anchor: TextAnchor) -> (i64, i64) {
    match anchor {
        TextAnchor::LeftTop => (i64::from(pos.0), i64::from(pos.1)),
        TextAnchor::MiddleMiddle => (
            i64::from(pos.0) - i64::from(block.width()) / 2,
            i64::from(pos.1) - i64::from(block.height()) / 2,
        ),
    }
}

/// Rasterize a text block into a tight RGBA buffer.
pub fn text_image(font: &FontArc, text: &str, px: f32, color: Rgba<u8>) -> RgbaImage {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();
    let line_height = (ascent - scaled.descent() + scaled.line_gap()).ceil();

    let lines: Vec<&str> = text.split('\n').collect();
    let width = lines
        .iter()
        .map(|l| line_width(font, l, scale).ceil() as u32)
        .max()
        .unwrap_or(0);
    let height = (line_height * lines.len() as f32).ceil() as u32;
    let mut img = RgbaImage::new(width.max(1), height.max(1));
    if width == 0 {
        return img;
    }

    for (i, line) in lines.iter().enumerate() {
        let baseline = ascent + line_height * i as f32;
        let mut caret = 0.0f32;
        let mut prev: Option<ab_glyph::GlyphId> = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            let glyph = Glyph {
                id,
                scale,
                position: ab_glyph::point(caret, baseline),
            };
            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    let x = bounds.min.x as i32 + gx as i32;
                    let y = bounds.min.y as i32 + gy as i32;
                    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
                        return;
                    }
                    let alpha = (coverage * f32::from(color.0[3])).round() as u8;
                    let top = Rgba([color.0[0], color.0[1], color.0[2], alpha]);
                    img.get_pixel_mut(x as u32, y as u32).blend(&top);
                });
            }
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
    }
    img
}

fn line_width(font: &FontArc, line: &str, scale: PxScale) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;
    for ch in line.chars() {
        let id = font.glyph_id(ch);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Scale RGB channels by `factor`, leaving alpha untouched. Used to dim
/// the splash art behind the card.
pub fn dimmed(img: &RgbaImage, factor: f32) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        for c in &mut px.0[..3] {
            *c = (f32::from(*c) * factor).round().min(255.0) as u8;
        }
    }
    out
}

/// Replace RGB with `color`, keeping each pixel's alpha. Used for the
/// glow halo so the blur carries the glow color rather than the text's.
pub fn recolor(img: &RgbaImage, color: Rgba<u8>) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        px.0[0] = color.0[0];
        px.0[1] = color.0[1];
        px.0[2] = color.0[2];
    }
    out
}

/// Opaque single-color block, used for the element bar.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}
