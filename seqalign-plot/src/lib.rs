/*!
# seqalign dot plots

Scatter plots of k-mer hits between two sequences. The x axis is the
position in seq2, the y axis the position in seq1, with the origin at the
bottom left. An optional [`DiagonalBand`] is drawn as two boundary lines and
its on-diagonal percentage is reported in the title.

Output format follows the file extension: `.svg` and `.ps`/`.eps` are
written as vector documents carrying the title and axis labels; `.png`,
`.jpg` and `.jpeg` are rasterised on the CPU and hold no text, so callers
should report [`PlotSummary::title`] alongside them.
*/

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use seqalign_core::{DiagonalBand, Hit};

mod ps;
mod raster;
mod scale;
mod svg;

pub use scale::{format_bp, nice_round_length, nice_ticks_world};

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Unsupported plot format: {0} (use .svg, .ps, .eps, .png, .jpg or .jpeg)")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type PlotResult<T> = Result<T, PlotError>;

/// Output format chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Svg,
    PostScript,
    Png,
    Jpeg,
}

impl PlotFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> PlotResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "svg" => Ok(PlotFormat::Svg),
            "ps" | "eps" => Ok(PlotFormat::PostScript),
            "png" => Ok(PlotFormat::Png),
            "jpg" | "jpeg" => Ok(PlotFormat::Jpeg),
            _ => Err(PlotError::UnsupportedFormat(path.as_ref().display().to_string())),
        }
    }
}

/// World-coordinate window shown by the plot, in bp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Full extent of two sequences (seq2 on x, seq1 on y)
    pub fn for_lengths(seq2_len: usize, seq1_len: usize) -> Self {
        Self {
            x_min: 0.0,
            x_max: (seq2_len as f64).max(1.0),
            y_min: 0.0,
            y_max: (seq1_len as f64).max(1.0),
        }
    }

    /// Smallest origin-anchored window containing every hit
    pub fn for_hits(hits: &[Hit]) -> Self {
        let x_max = hits.iter().map(|h| h.seq2_pos).max().unwrap_or(0);
        let y_max = hits.iter().map(|h| h.seq1_pos).max().unwrap_or(0);
        Self::for_lengths(x_max + 1, y_max + 1)
    }

    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(f64::EPSILON)
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).max(f64::EPSILON)
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub show_axes: bool,
    pub show_grid: bool,
    pub show_footer: bool,
    /// Overrides the generated "dotplot (...)" title
    pub title: Option<String>,
    pub background_color: String,
    pub point_color: String,
    pub band_upper_color: String,
    pub band_lower_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub point_radius: f32,
    /// SVG and PostScript only; hits past this count are dropped from the document
    pub max_vector_points: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            show_axes: true,
            show_grid: false,
            show_footer: false,
            title: None,
            background_color: "#ffffff".to_string(),
            point_color: "#ff0000".to_string(),
            band_upper_color: "#0000ff".to_string(),
            band_lower_color: "#008000".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12,
            point_radius: 1.0,
            max_vector_points: 500_000,
        }
    }
}

/// What was plotted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSummary {
    pub hits: usize,
    pub on_diagonal: Option<usize>,
    pub percent_on_diagonal: Option<f64>,
}

impl PlotSummary {
    pub fn new(hits: &[Hit], band: Option<&DiagonalBand>) -> Self {
        let on_diagonal = band.map(|b| hits.iter().filter(|h| b.contains(h)).count());
        Self {
            hits: hits.len(),
            on_diagonal,
            percent_on_diagonal: band.map(|b| b.percent_on_diagonal(hits)),
        }
    }

    pub fn title(&self) -> String {
        match self.percent_on_diagonal {
            Some(pct) => format!("dotplot ({} hits, {:.5}% hits on diagonal)", self.hits, pct),
            None => format!("dotplot ({} hits)", self.hits),
        }
    }
}

/// Dot plot exporter
pub struct DotPlotExporter {
    config: ExportConfig,
}

impl DotPlotExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Write the plot in the format implied by `path`
    pub fn export<P: AsRef<Path>>(
        &self,
        path: P,
        hits: &[Hit],
        viewport: &Viewport,
        band: Option<&DiagonalBand>,
    ) -> PlotResult<PlotSummary> {
        let path = path.as_ref();
        let format = PlotFormat::from_path(path)?;
        let summary = PlotSummary::new(hits, band);

        match format {
            PlotFormat::Svg => self.export_svg(path, hits, viewport, band, &summary)?,
            PlotFormat::PostScript => self.export_ps(path, hits, viewport, band, &summary)?,
            PlotFormat::Png | PlotFormat::Jpeg => {
                raster::export_raster(&self.config, path, hits, viewport, band)?
            }
        }

        log::info!("Wrote {} ({})", path.display(), summary.title());
        Ok(summary)
    }

    fn export_svg(
        &self,
        path: &Path,
        hits: &[Hit],
        viewport: &Viewport,
        band: Option<&DiagonalBand>,
        summary: &PlotSummary,
    ) -> PlotResult<()> {
        let mut svg = svg::SvgBuilder::new(&self.config, *viewport);

        svg.add_background();
        let title = self.config.title.clone().unwrap_or_else(|| summary.title());
        svg.add_title(&title);

        if self.config.show_axes {
            svg.add_axes(self.config.show_grid);
        }
        if let Some(band) = band {
            svg.add_band(band);
        }

        svg.render_points(self.vector_points(hits));

        if self.config.show_footer {
            svg.add_footer();
        }

        svg.write_to_file(path)
    }

    fn export_ps(
        &self,
        path: &Path,
        hits: &[Hit],
        viewport: &Viewport,
        band: Option<&DiagonalBand>,
        summary: &PlotSummary,
    ) -> PlotResult<()> {
        let mut ps = ps::PsBuilder::new(&self.config, *viewport);

        ps.add_background();
        let title = self.config.title.clone().unwrap_or_else(|| summary.title());
        ps.add_title(&title);

        if self.config.show_axes {
            ps.add_axes(self.config.show_grid);
        }
        if let Some(band) = band {
            ps.add_band(band);
        }
        ps.render_points(self.vector_points(hits));

        if self.config.show_footer {
            ps.add_footer();
        }

        ps.write_to_file(path, &title)
    }

    /// Vector documents keep one element per hit, so they are capped
    fn vector_points<'a>(&self, hits: &'a [Hit]) -> &'a [Hit] {
        if hits.len() > self.config.max_vector_points {
            log::warn!(
                "Plotting first {} of {} hits in vector output",
                self.config.max_vector_points,
                hits.len()
            );
        }
        &hits[..hits.len().min(self.config.max_vector_points)]
    }
}

/// Plot `hits` with default settings, sized to the hit extents
pub fn render_hits<P: AsRef<Path>>(output_path: P, hits: &[Hit]) -> PlotResult<PlotSummary> {
    DotPlotExporter::new(ExportConfig::default()).export(output_path, hits, &Viewport::for_hits(hits), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(PlotFormat::from_path("plot.svg").unwrap(), PlotFormat::Svg);
        assert_eq!(PlotFormat::from_path("plot.PNG").unwrap(), PlotFormat::Png);
        assert_eq!(PlotFormat::from_path("a/b/plot.jpeg").unwrap(), PlotFormat::Jpeg);
        assert_eq!(PlotFormat::from_path("plot.ps").unwrap(), PlotFormat::PostScript);
        assert_eq!(PlotFormat::from_path("plot.EPS").unwrap(), PlotFormat::PostScript);
        assert!(matches!(PlotFormat::from_path("plot.pdf"), Err(PlotError::UnsupportedFormat(_))));
        assert!(PlotFormat::from_path("plot").is_err());
    }

    #[test]
    fn test_viewport_for_hits() {
        let vp = Viewport::for_hits(&[Hit::new(10, 3), Hit::new(2, 40)]);
        assert_eq!((vp.x_max, vp.y_max), (11.0, 41.0));
        let empty = Viewport::for_hits(&[]);
        assert_eq!((empty.width(), empty.height()), (1.0, 1.0));
    }

    #[test]
    fn test_summary_title() {
        let hits = [Hit::new(0, 0), Hit::new(5, 100)];
        let band = DiagonalBand { slope_upper: 1.0, offset_upper: 10.0, slope_lower: 1.0, offset_lower: -10.0 };
        let summary = PlotSummary::new(&hits, Some(&band));
        assert_eq!(summary.on_diagonal, Some(1));
        assert_eq!(summary.title(), "dotplot (2 hits, 50.00000% hits on diagonal)");
        assert_eq!(PlotSummary::new(&hits, None).title(), "dotplot (2 hits)");
    }
}
