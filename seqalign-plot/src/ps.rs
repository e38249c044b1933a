//! Encapsulated PostScript output, built as text like the SVG writer.
//!
//! PostScript puts the origin at the bottom left, so every y produced by
//! [`PlotArea`] is flipped against the page height.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use seqalign_core::{DiagonalBand, Hit};

use crate::scale::{clip_line, format_bp, nice_ticks_world, parse_hex_rgb, PlotArea};
use crate::{ExportConfig, PlotResult, Viewport};

// left, right, top, bottom
const MARGINS: [f32; 4] = [70.0, 20.0, 40.0, 50.0];

const PROLOG: &str = "\
/d { newpath 0 360 arc fill } bind def
/ctext { dup stringwidth pop 2 div neg 0 rmoveto show } bind def
/rtext { dup stringwidth pop neg 0 rmoveto show } bind def
/seg { newpath moveto lineto stroke } bind def";

pub(crate) struct PsBuilder {
    config: ExportConfig,
    body: Vec<String>,
    width: f32,
    height: f32,
    area: PlotArea,
}

impl PsBuilder {
    pub fn new(config: &ExportConfig, viewport: Viewport) -> Self {
        Self {
            config: config.clone(),
            body: Vec::new(),
            width: config.width as f32,
            height: config.height as f32,
            area: PlotArea::new(config.width, config.height, MARGINS, viewport),
        }
    }

    fn y(&self, world_y: f64) -> f32 {
        self.height - self.area.y(world_y)
    }

    fn font(&mut self, name: &str, size: u32) {
        self.body.push(format!("/{} findfont {} scalefont setfont", name, size));
    }

    pub fn add_background(&mut self) {
        self.body.push(rgb(&self.config.background_color, [255, 255, 255]));
        self.body.push(format!("0 0 {} {} rectfill", self.width, self.height));
    }

    pub fn add_title(&mut self, title: &str) {
        self.body.push("0 0 0 setrgbcolor".to_string());
        self.font("Helvetica-Bold", self.config.font_size + 4);
        self.body.push(format!(
            "{} {} moveto ({}) ctext",
            self.width / 2.0,
            self.height - (self.config.font_size as f32 + 10.0),
            escape(title)
        ));
    }

    pub fn render_points(&mut self, hits: &[Hit]) {
        let a = self.area;
        self.body.push("gsave".to_string());
        self.body.push(format!(
            "{} {} {} {} rectclip",
            a.left,
            self.height - a.bottom,
            a.right - a.left,
            a.bottom - a.top
        ));
        self.body.push(rgb(&self.config.point_color, [0, 0, 0]));
        for hit in hits {
            self.body.push(format!(
                "{:.2} {:.2} {} d",
                a.x(hit.seq2_pos as f64),
                self.y(hit.seq1_pos as f64),
                self.config.point_radius
            ));
        }
        self.body.push("grestore".to_string());
    }

    pub fn add_band(&mut self, band: &DiagonalBand) {
        let lines = [
            (band.slope_upper, band.offset_upper, rgb(&self.config.band_upper_color, [0, 0, 255])),
            (band.slope_lower, band.offset_lower, rgb(&self.config.band_lower_color, [0, 128, 0])),
        ];
        for (slope, offset, color) in lines {
            let Some(((x0, y0), (x1, y1))) = clip_line(slope, offset, &self.area.viewport) else {
                continue;
            };
            self.body.push(color);
            self.body.push(format!(
                "{:.2} {:.2} {:.2} {:.2} seg",
                self.area.x(x1),
                self.y(y1),
                self.area.x(x0),
                self.y(y0)
            ));
        }
    }

    pub fn add_axes(&mut self, show_grid: bool) {
        let PlotArea { left, right, top, bottom, viewport } = self.area;
        let (top, bottom) = (self.height - top, self.height - bottom);
        let size = self.config.font_size;

        self.body.push("0 0 0 setrgbcolor 1 setlinewidth".to_string());
        self.body.push(format!("{} {} {} {} seg", right, bottom, left, bottom));
        self.body.push(format!("{} {} {} {} seg", left, top, left, bottom));

        self.font("Helvetica", size);
        self.body.push(format!("{} 14 moveto (seq2 \\(bp\\)) ctext", (left + right) / 2.0));
        self.body.push(format!(
            "gsave 18 {} translate 90 rotate 0 0 moveto (seq1 \\(bp\\)) ctext grestore",
            (top + bottom) / 2.0
        ));

        self.font("Helvetica", size.saturating_sub(2));
        for w in nice_ticks_world(viewport.x_min, viewport.x_max, 6) {
            let x = self.area.x(w);
            self.body.push(format!("{} {} {} {} seg", x, bottom - 5.0, x, bottom));
            if show_grid {
                self.grid_line(x, top, x, bottom);
            }
            self.body.push(format!("{} {} moveto ({}) ctext", x, bottom - 16.0, format_bp(w)));
        }
        for w in nice_ticks_world(viewport.y_min, viewport.y_max, 6) {
            let y = self.y(w);
            self.body.push(format!("{} {} {} {} seg", left, y, left - 5.0, y));
            if show_grid {
                self.grid_line(left, y, right, y);
            }
            self.body.push(format!("{} {} moveto ({}) rtext", left - 8.0, y - 3.0, format_bp(w)));
        }
    }

    fn grid_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.body.push(format!(
            "gsave 0.8 setgray {} {} {} {} seg grestore",
            x1, y1, x0, y0
        ));
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
        self.body.push("0.5 setgray".to_string());
        self.font("Helvetica", self.config.font_size.saturating_sub(4));
        self.body.push(format!("10 2 moveto ({}) show", escape(&footer_text)));
    }

    pub fn write_to_file(&self, path: &Path, title: &str) -> PlotResult<()> {
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(file, "%%BoundingBox: 0 0 {} {}", self.width.ceil(), self.height.ceil())?;
        writeln!(file, "%%Title: {}", title.replace(['\r', '\n'], " "))?;
        writeln!(file, "%%Creator: seqalign v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(file, "%%EndComments")?;
        writeln!(file, "{}", PROLOG)?;
        for line in &self.body {
            writeln!(file, "{}", line)?;
        }
        writeln!(file, "showpage")?;
        writeln!(file, "%%EOF")?;
        file.flush()?;

        Ok(())
    }
}

fn rgb(hex: &str, fallback: [u8; 3]) -> String {
    let [r, g, b] = parse_hex_rgb(hex).unwrap_or(fallback);
    format!(
        "{:.3} {:.3} {:.3} setrgbcolor",
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0
    )
}

/// Escape a PostScript string literal; non-ASCII characters become `?`
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
