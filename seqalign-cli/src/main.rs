use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use commands::align::AlignOptions;
use commands::dotplot::DotplotOptions;
use config::Config;
use error::{print_error_and_exit, CliResult};
use seqalign_core::ScoringPreset;

#[derive(Parser)]
#[command(name = "seqalign")]
#[command(about = "seqalign - global DNA alignment and k-mer dot plots")]
#[command(version)]
#[command(long_about = "
seqalign computes an optimal global alignment of two DNA sequences under a
substitution cost table and a linear gap cost, and draws k-mer dot plots.

Examples:
  seqalign align human.fa mouse.fa
  seqalign align a.fa b.fa --gap-cost 2 --preset unit --json
  seqalign dotplot human.fa mouse.fa plot.png --band hoxa
  seqalign config --example > seqalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (defaults to ./seqalign.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Globally align two FASTA sequences and print the score and aligned strings
    Align {
        /// First sequence (FASTA, optionally .gz)
        seq1: PathBuf,

        /// Second sequence (FASTA, optionally .gz)
        seq2: PathBuf,

        /// Cost per gap position (nonnegative)
        #[arg(long, allow_hyphen_values = true)]
        gap_cost: Option<i64>,

        /// Substitution cost preset
        #[arg(long)]
        preset: Option<PresetArg>,

        /// Emit a JSON report instead of plain text
        #[arg(long)]
        json: bool,

        /// Print column statistics and CIGAR after the alignment
        #[arg(long)]
        stats: bool,

        /// Compute only the optimal score in linear memory
        #[arg(long, conflicts_with = "stats")]
        score_only: bool,
    },

    /// Draw a k-mer dot plot of two FASTA sequences (SVG, PostScript, PNG or JPEG by extension)
    Dotplot {
        /// Sequence on the y axis
        seq1: PathBuf,

        /// Sequence on the x axis
        seq2: PathBuf,

        /// Output image
        output: PathBuf,

        /// K-mer length
        #[arg(short, long)]
        kmer_len: Option<usize>,

        /// Diagonal band preset for the on-diagonal statistic
        #[arg(long, conflicts_with = "no_band")]
        band: Option<BandPreset>,

        /// Ignore any band from the configuration file
        #[arg(long)]
        no_band: bool,

        /// Width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Plot title (defaults to the hit summary)
        #[arg(long)]
        title: Option<String>,
    },

    /// Show the active configuration or generate an example
    Config {
        /// Print an example configuration file
        #[arg(long)]
        example: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PresetArg {
    Default,
    Unit,
}

impl From<PresetArg> for ScoringPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => ScoringPreset::Default,
            PresetArg::Unit => ScoringPreset::Unit,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandPreset {
    /// Human/mouse HOXA region band
    Hoxa,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Align {
            seq1,
            seq2,
            gap_cost,
            preset,
            json,
            stats,
            score_only,
        } => {
            let options = AlignOptions {
                gap_cost,
                preset: preset.map(ScoringPreset::from),
                json,
                stats,
                score_only,
            };
            commands::align::execute(&config, seq1, seq2, options)?;
        }

        Commands::Dotplot {
            seq1,
            seq2,
            output,
            kmer_len,
            band,
            no_band,
            width,
            height,
            title,
        } => {
            let options = DotplotOptions {
                kmer_len,
                quiet: cli.quiet,
                band,
                no_band,
                width,
                height,
                title,
            };
            commands::dotplot::execute(&config, seq1, seq2, output, options)?;
        }

        Commands::Config { example, output } => {
            commands::config::execute(&config, example, output)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        print_error_and_exit(&e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align() {
        let cli = Cli::try_parse_from([
            "seqalign", "align", "a.fa", "b.fa", "--gap-cost", "2", "--preset", "unit", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Align { gap_cost, preset, json, .. } => {
                assert_eq!(gap_cost, Some(2));
                assert!(matches!(preset, Some(PresetArg::Unit)));
                assert!(json);
            }
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_score_only_conflicts_with_stats() {
        let err = Cli::try_parse_from(["seqalign", "align", "a.fa", "b.fa", "--score-only", "--stats"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(Cli::try_parse_from(["seqalign", "align", "a.fa", "b.fa", "--score-only", "--json"]).is_ok());
    }

    #[test]
    fn test_parse_dotplot_band() {
        let cli = Cli::try_parse_from([
            "seqalign", "dotplot", "h.fa", "m.fa", "out.png", "--band", "hoxa", "-k", "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Dotplot { band, kmer_len, .. } => {
                assert_eq!(band, Some(BandPreset::Hoxa));
                assert_eq!(kmer_len, Some(20));
            }
            _ => panic!("expected dotplot"),
        }
        assert!(Cli::try_parse_from([
            "seqalign", "dotplot", "h.fa", "m.fa", "out.png", "--band", "hoxa", "--no-band",
        ])
        .is_err());
    }
}
