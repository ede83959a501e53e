use crate::{
    color::Rgb,
    font::{default_font_candidates, LabelFont},
    icons::{default_icons, IconSet, IconSpec},
    layout::GridGeometry,
};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbImage, RgbaImage,
};
use log::warn;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const GRADIENT_TOP: Rgb = Rgb::new(0x35, 0x10, 0x5A);
pub const GRADIENT_BOTTOM: Rgb = Rgb::new(0x5B, 0x0E, 0xC8);

/// Largest diagonal offset of the label drop shadow, in pixels.
pub const SHADOW_DEPTH: u32 = 4;

/// How the layered label shadow is blended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShadowStyle {
    /// Every layer is opaque black; reads as a hard, slightly smeared outline.
    #[default]
    Solid,
    /// Each layer is blended with `255 * 0.3 * (1 - offset / depth)` alpha.
    Soft,
}

impl ShadowStyle {
    fn layer_opacity(self, offset: u32) -> f32 {
        match self {
            ShadowStyle::Solid => 1.0,
            ShadowStyle::Soft => {
                let alpha = (255.0 * 0.3 * (1.0 - offset as f64 / SHADOW_DEPTH as f64)) as u8;
                f32::from(alpha) / 255.0
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub geometry: GridGeometry,
    pub icons: IconSet,
    pub font_candidates: Vec<PathBuf>,
    pub shadow: ShadowStyle,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::DEFAULT,
            icons: default_icons(),
            font_candidates: default_font_candidates(),
            shadow: ShadowStyle::default(),
        }
    }
}

/// What a compose run did, for status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    pub width: u32,
    pub height: u32,
    pub placed: Vec<IconSpec>,
    /// Expected source paths of icons that were not found.
    pub missing: Vec<PathBuf>,
    pub font: String,
}

/// Compose the icon grid from `input_dir` and write it as a PNG to `output_path`.
pub fn compose(
    input_dir: &Path,
    output_path: &Path,
    options: &ComposeOptions,
) -> Result<ComposeReport> {
    let (canvas, report) = render(input_dir, options)?;
    save_png(&canvas, output_path)?;

    Ok(report)
}

/// Render the grid in memory without touching the output path.
pub fn render(input_dir: &Path, options: &ComposeOptions) -> Result<(RgbImage, ComposeReport)> {
    let geometry = &options.geometry;
    let (width, height) = geometry.canvas_size();

    let mut canvas = vertical_gradient(width, height, GRADIENT_TOP, GRADIENT_BOTTOM);
    let font = LabelFont::resolve(&options.font_candidates, geometry.font_size);

    let mut report = ComposeReport {
        width,
        height,
        placed: Vec::new(),
        missing: Vec::new(),
        font: font.describe(),
    };

    for (index, icon) in options.icons.iter().enumerate() {
        let (Some((x, y)), Some(label_top)) =
            (geometry.cell_origin(index), geometry.label_top(index))
        else {
            break;
        };

        let icon_path = icon.source_path(input_dir);
        if icon_path.exists() {
            let source = load_icon(&icon_path)?;
            paste_with_alpha(&mut canvas, &source, x, y);
            report.placed.push(icon.clone());
        } else {
            warn!("{} not found, skipping", icon_path.display());
            report.missing.push(icon_path);
        }

        draw_label(
            &mut canvas,
            &font,
            &icon.label,
            (x, label_top),
            geometry.icon_size,
            options.shadow,
        );
    }

    Ok((canvas, report))
}

/// Fill a canvas scanline by scanline, blending from `top` at row 0 towards
/// `bottom` at row `height`.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb, bottom: Rgb) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);

    for (y, row) in canvas.enumerate_rows_mut() {
        let ratio = f64::from(y) / f64::from(height);
        let color: image::Rgb<u8> = top.lerp(bottom, ratio).into();
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }

    canvas
}

fn load_icon(path: &Path) -> Result<RgbaImage> {
    let icon = image::open(path)
        .with_context(|| format!("Failed to load icon {}", path.display()))?;
    Ok(icon.to_rgba8())
}

/// Paste `icon` with its top-left corner at `(x, y)`, using its own alpha
/// channel as the mask. Pixels beyond the canvas are clipped.
pub fn paste_with_alpha(canvas: &mut RgbImage, icon: &RgbaImage, x: u32, y: u32) {
    let visible_w = icon.width().min(canvas.width().saturating_sub(x));
    let visible_h = icon.height().min(canvas.height().saturating_sub(y));

    for iy in 0..visible_h {
        for ix in 0..visible_w {
            let src = icon.get_pixel(ix, iy);
            let alpha = u32::from(src[3]);
            if alpha == 0 {
                continue;
            }

            let dst = canvas.get_pixel_mut(x + ix, y + iy);
            for channel in 0..3 {
                let s = u32::from(src[channel]);
                let d = u32::from(dst[channel]);
                dst[channel] = ((s * alpha + d * (255 - alpha) + 127) / 255) as u8;
            }
        }
    }
}

/// Draw `text` centered under an icon whose left edge is `cell_x`, with a
/// layered diagonal shadow beneath the white caption.
pub fn draw_label(
    canvas: &mut RgbImage,
    font: &LabelFont,
    text: &str,
    (cell_x, label_top): (u32, u32),
    icon_size: u32,
    shadow: ShadowStyle,
) {
    let text_width = font.text_box(text).width();
    let text_x = cell_x as i32 + (icon_size as i32 - text_width).div_euclid(2);
    let text_y = label_top as i32;

    for offset in (1..=SHADOW_DEPTH).rev() {
        let o = offset as i32;
        font.draw(
            canvas,
            (text_x + o, text_y + o),
            text,
            Rgb::BLACK,
            shadow.layer_opacity(offset),
        );
    }

    font.draw(canvas, (text_x, text_y), text, Rgb::WHITE, 1.0);
}

/// Encode the canvas as PNG, replacing any existing file.
pub fn save_png(canvas: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Default, PngFilterType::Adaptive);
    encoder
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ColorType::Rgb8)
        .context("Failed to encode PNG")?;
    writer.flush().context("Failed to write PNG")?;

    Ok(())
}
