use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use seqalign_core::{DiagonalBand, Hit};

use crate::scale::{clip_line, format_bp, nice_ticks_world, PlotArea};
use crate::{ExportConfig, PlotResult, Viewport};

// left, right, top, bottom
const MARGINS: [f32; 4] = [70.0, 20.0, 40.0, 50.0];

pub(crate) struct SvgBuilder {
    config: ExportConfig,
    elements: Vec<String>,
    width: f32,
    height: f32,
    area: PlotArea,
}

impl SvgBuilder {
    pub fn new(config: &ExportConfig, viewport: Viewport) -> Self {
        Self {
            config: config.clone(),
            elements: Vec::new(),
            width: config.width as f32,
            height: config.height as f32,
            area: PlotArea::new(config.width, config.height, MARGINS, viewport),
        }
    }

    pub fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, self.config.background_color
        ));
        let a = self.area;
        self.elements.push(format!(
            r#"<defs><clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath></defs>"#,
            a.left,
            a.top,
            a.right - a.left,
            a.bottom - a.top
        ));
    }

    pub fn add_title(&mut self, title: &str) {
        let title_y = self.config.font_size as f32 + 10.0;
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle" font-weight="bold">{}</text>"#,
            self.width / 2.0,
            title_y,
            self.config.font_family,
            self.config.font_size + 4,
            escape(title)
        ));
    }

    pub fn render_points(&mut self, hits: &[Hit]) {
        self.elements.push(format!(
            r#"<g clip-path="url(#plot-area)" fill="{}">"#,
            self.config.point_color
        ));
        for hit in hits {
            let x = self.area.x(hit.seq2_pos as f64);
            let y = self.area.y(hit.seq1_pos as f64);
            self.elements.push(format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{}"/>"#,
                x, y, self.config.point_radius
            ));
        }
        self.elements.push("</g>".to_string());
    }

    pub fn add_band(&mut self, band: &DiagonalBand) {
        let lines = [
            (band.slope_upper, band.offset_upper, self.config.band_upper_color.clone()),
            (band.slope_lower, band.offset_lower, self.config.band_lower_color.clone()),
        ];
        for (slope, offset, color) in lines {
            let Some(((x0, y0), (x1, y1))) = clip_line(slope, offset, &self.area.viewport) else {
                continue;
            };
            self.elements.push(format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
                self.area.x(x0),
                self.area.y(y0),
                self.area.x(x1),
                self.area.y(y1),
                color
            ));
        }
    }

    pub fn add_axes(&mut self, show_grid: bool) {
        let PlotArea { left, right, top, bottom, viewport } = self.area;
        let font = self.config.font_family.clone();
        let size = self.config.font_size;
        let small = size.saturating_sub(2);

        // x: seq2
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
            left, bottom, right, bottom
        ));
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">seq2 (bp)</text>"#,
            (left + right) / 2.0,
            self.height - 10.0,
            font,
            size
        ));

        // y: seq1
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
            left, top, left, bottom
        ));
        self.elements.push(format!(
            r#"<text x="{}" y="{}" transform="rotate(-90 {} {})" font-family="{}" font-size="{}px" text-anchor="middle">seq1 (bp)</text>"#,
            14.0,
            (top + bottom) / 2.0,
            14.0,
            (top + bottom) / 2.0,
            font,
            size
        ));

        for w in nice_ticks_world(viewport.x_min, viewport.x_max, 6) {
            let x = self.area.x(w);
            self.elements.push(format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
                x,
                bottom,
                x,
                bottom + 5.0
            ));
            if show_grid {
                self.elements.push(format!(
                    r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##,
                    x, top, x, bottom
                ));
            }
            self.elements.push(format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="middle">{}</text>"#,
                x,
                bottom + 18.0,
                font,
                small,
                format_bp(w)
            ));
        }

        for w in nice_ticks_world(viewport.y_min, viewport.y_max, 6) {
            let y = self.area.y(w);
            self.elements.push(format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
                left - 5.0,
                y,
                left,
                y
            ));
            if show_grid {
                self.elements.push(format!(
                    r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#cccccc" stroke-width="1" opacity="0.5"/>"##,
                    left, y, right, y
                ));
            }
            self.elements.push(format!(
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                left - 8.0,
                y,
                font,
                small,
                format_bp(w)
            ));
        }
    }

    pub fn add_footer(&mut self) {
        let vp = self.area.viewport;
        let footer_text = format!(
            "seqalign v{} | {:.0}-{:.0} x {:.0}-{:.0} | Generated: {}",
            env!("CARGO_PKG_VERSION"),
            vp.x_min,
            vp.x_max,
            vp.y_min,
            vp.y_max,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        self.elements.push(format!(
            r#"<text x="10" y="{}" font-family="{}" font-size="{}px" fill="gray">{}</text>"#,
            self.height - 2.0,
            self.config.font_family,
            self.config.font_size.saturating_sub(4),
            footer_text
        ));
    }

    pub fn write_to_file(&self, path: &Path) -> PlotResult<()> {
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            file,
            r#"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height, self.width, self.height
        )?;
        for element in &self.elements {
            writeln!(file, "  {}", element)?;
        }
        writeln!(file, "</svg>")?;
        file.flush()?;

        Ok(())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
