//! Dotplot command: k-mer hits between two FASTA inputs, written as an image

use std::io::Write;
use std::path::{Path, PathBuf};

use seqalign_core::seed::find_hits;
use seqalign_core::DiagonalBand;
use seqalign_plot::{DotPlotExporter, ExportConfig, PlotFormat, PlotSummary, Viewport};

use super::read_input;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::BandPreset;

#[derive(Debug, Clone, Default)]
pub struct DotplotOptions {
    pub kmer_len: Option<usize>,
    pub band: Option<BandPreset>,
    pub no_band: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub quiet: bool,
}

pub fn execute(
    config: &Config,
    seq1: PathBuf,
    seq2: PathBuf,
    output: PathBuf,
    options: DotplotOptions,
) -> CliResult<()> {
    let summary = run(config, &seq1, &seq2, &output, &options)?;
    let stdout = std::io::stdout();
    report_summary(&summary, options.quiet, &mut stdout.lock())
}

/// Raster images carry no text, so the summary line is the only place the title appears for them
fn report_summary<W: Write>(summary: &PlotSummary, quiet: bool, out: &mut W) -> CliResult<()> {
    if !quiet {
        writeln!(out, "{}", summary.title())?;
    }
    Ok(())
}

pub(crate) fn run(
    config: &Config,
    seq1: &Path,
    seq2: &Path,
    output: &Path,
    options: &DotplotOptions,
) -> CliResult<PlotSummary> {
    // fail on the output name before doing any seeding work
    PlotFormat::from_path(output)?;

    let k = options.kmer_len.unwrap_or(config.dotplot.kmer_len);
    let band = resolve_band(config, options);

    let first = read_input(seq1)?;
    let second = read_input(seq2)?;

    log::info!("Seeding with k = {}", k);
    let hits = find_hits(first.as_bytes(), second.as_bytes(), k)?;
    log::info!("Found {} hits", hits.len());

    let export_config = ExportConfig {
        width: options.width.unwrap_or(config.dotplot.width),
        height: options.height.unwrap_or(config.dotplot.height),
        point_color: config.dotplot.point_color.clone(),
        title: options.title.clone(),
        ..Default::default()
    };
    if export_config.width == 0 || export_config.height == 0 {
        return Err(CliError::validation("plot width and height must be positive"));
    }

    let viewport = Viewport::for_lengths(second.len(), first.len());
    let summary = DotPlotExporter::new(export_config).export(output, &hits, &viewport, band.as_ref())?;
    Ok(summary)
}

fn resolve_band(config: &Config, options: &DotplotOptions) -> Option<DiagonalBand> {
    if options.no_band {
        return None;
    }
    match options.band {
        Some(BandPreset::Hoxa) => Some(DiagonalBand::hoxa()),
        None => config.dotplot.band,
    }
}
