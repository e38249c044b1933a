//! CPU rasteriser for PNG and JPEG output. No text is drawn.

use image::{Rgb, RgbImage};
use std::path::Path;

use seqalign_core::{DiagonalBand, Hit};

use crate::scale::{clip_line, parse_hex_rgb, PlotArea};
use crate::{ExportConfig, PlotResult, Viewport};

const MARGIN: f32 = 10.0;

pub(crate) fn export_raster(
    config: &ExportConfig,
    path: &Path,
    hits: &[Hit],
    viewport: &Viewport,
    band: Option<&DiagonalBand>,
) -> PlotResult<()> {
    let background = color(&config.background_color, [255, 255, 255]);
    let mut img = RgbImage::from_pixel(config.width.max(1), config.height.max(1), background);
    let area = PlotArea::new(config.width, config.height, [MARGIN; 4], *viewport);

    if config.show_axes {
        let black = Rgb([0, 0, 0]);
        let (l, r, t, b) = (area.left as i32, area.right as i32, area.top as i32, area.bottom as i32);
        draw_line(&mut img, l, b, r, b, black);
        draw_line(&mut img, l, t, l, b, black);
    }

    if let Some(band) = band {
        let lines = [
            (band.slope_upper, band.offset_upper, color(&config.band_upper_color, [0, 0, 255])),
            (band.slope_lower, band.offset_lower, color(&config.band_lower_color, [0, 128, 0])),
        ];
        for (slope, offset, col) in lines {
            if let Some(((x0, y0), (x1, y1))) = clip_line(slope, offset, viewport) {
                draw_line(
                    &mut img,
                    area.x(x0) as i32,
                    area.y(y0) as i32,
                    area.x(x1) as i32,
                    area.y(y1) as i32,
                    col,
                );
            }
        }
    }

    let point = color(&config.point_color, [255, 0, 0]);
    let radius = config.point_radius.max(0.0).round() as i32;
    for hit in hits {
        let x = area.x(hit.seq2_pos as f64) as i32;
        let y = area.y(hit.seq1_pos as f64) as i32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                put(&mut img, x + dx, y + dy, point);
            }
        }
    }

    img.save(path)?;
    Ok(())
}

fn color(hex: &str, fallback: [u8; 3]) -> Rgb<u8> {
    Rgb(parse_hex_rgb(hex).unwrap_or(fallback))
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

// Bresenham
fn draw_line(img: &mut RgbImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb<u8>) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(img, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
