//! Label font resolution, measurement and drawing.

use crate::{bitmap_font::BitmapFont, color::Rgb};
use anyhow::{Context, Result};
use image::RgbImage;
use log::{debug, info};
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

/// System fonts tried in order before falling back to the built-in bitmap font.
pub const SYSTEM_FONT_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];

pub fn default_font_candidates() -> Vec<PathBuf> {
    SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Ink bounds of a piece of text, relative to a draw origin at the top of the
/// font's ascender line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

pub enum LabelFont {
    TrueType {
        font: Font<'static>,
        scale: Scale,
        source: PathBuf,
    },
    Bitmap(BitmapFont),
}

impl LabelFont {
    /// Walk `candidates` and return the first font that loads.
    ///
    /// Never fails: the built-in bitmap font ends the chain.
    pub fn resolve(candidates: &[PathBuf], font_size: u32) -> LabelFont {
        for path in candidates {
            match LabelFont::load(path, font_size) {
                Ok(font) => {
                    info!("Using font {}", path.display());
                    return font;
                }
                Err(err) => debug!("Skipping font {}: {err:#}", path.display()),
            }
        }

        info!("No usable system font, falling back to the built-in bitmap font");
        LabelFont::builtin(font_size)
    }

    /// Load a TrueType/OpenType font (first face of a collection) so that one
    /// em is `font_size` pixels tall.
    pub fn load(path: &Path, font_size: u32) -> Result<LabelFont> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = Font::try_from_vec(data).context("Not a valid TrueType font")?;
        let scale = em_scale(&font, font_size);

        Ok(LabelFont::TrueType {
            font,
            scale,
            source: path.to_path_buf(),
        })
    }

    pub fn builtin(font_size: u32) -> LabelFont {
        LabelFont::Bitmap(BitmapFont::for_size(font_size))
    }

    pub fn describe(&self) -> String {
        match self {
            LabelFont::TrueType { source, .. } => source.display().to_string(),
            LabelFont::Bitmap(bitmap) => format!("built-in bitmap font (x{})", bitmap.scale()),
        }
    }

    pub fn text_box(&self, text: &str) -> TextBox {
        match self {
            LabelFont::TrueType { font, scale, .. } => {
                let ascent = font.v_metrics(*scale).ascent;
                font.layout(text, *scale, point(0.0, ascent))
                    .filter_map(|glyph| glyph.pixel_bounding_box())
                    .fold(None, |acc: Option<TextBox>, bb| {
                        Some(match acc {
                            None => TextBox {
                                left: bb.min.x,
                                top: bb.min.y,
                                right: bb.max.x,
                                bottom: bb.max.y,
                            },
                            Some(b) => TextBox {
                                left: b.left.min(bb.min.x),
                                top: b.top.min(bb.min.y),
                                right: b.right.max(bb.max.x),
                                bottom: b.bottom.max(bb.max.y),
                            },
                        })
                    })
                    .unwrap_or_default()
            }
            LabelFont::Bitmap(bitmap) => {
                let (width, height) = bitmap.size(text);
                TextBox {
                    left: 0,
                    top: 0,
                    right: width as i32,
                    bottom: height as i32,
                }
            }
        }
    }

    /// Draw `text` with its ascender line at `y`, blending `color` by glyph
    /// coverage times `opacity`. Pixels outside the canvas are clipped.
    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        (x, y): (i32, i32),
        text: &str,
        color: Rgb,
        opacity: f32,
    ) {
        match self {
            LabelFont::TrueType { font, scale, .. } => {
                let ascent = font.v_metrics(*scale).ascent;
                let origin = point(x as f32, y as f32 + ascent);

                for glyph in font.layout(text, *scale, origin) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        blend_pixel(
                            canvas,
                            bb.min.x + gx as i32,
                            bb.min.y + gy as i32,
                            color,
                            coverage * opacity,
                        );
                    });
                }
            }
            LabelFont::Bitmap(bitmap) => {
                bitmap.rasterize(text, |gx, gy| {
                    blend_pixel(canvas, x + gx as i32, y + gy as i32, color, opacity);
                });
            }
        }
    }
}

/// Rusttype's `Scale::uniform` sizes the ascent-to-descent span; convert an
/// em size in pixels into that height.
fn em_scale(font: &Font<'_>, font_size: u32) -> Scale {
    let metrics = font.v_metrics_unscaled();
    let units_per_em = f32::from(font.units_per_em());
    Scale::uniform(font_size as f32 * (metrics.ascent - metrics.descent) / units_per_em)
}

fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }

    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip([color.r, color.g, color.b]) {
        let d = f32::from(*dst);
        *dst = (d + (f32::from(src) - d) * coverage).round() as u8;
    }
}
