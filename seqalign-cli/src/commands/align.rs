//! Align command: global alignment of two FASTA inputs

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use seqalign_core::{AlignmentStats, NeedlemanWunsch, ScoringPreset, ScoringScheme};

use super::read_input;
use crate::config::Config;
use crate::error::CliResult;

#[derive(Debug, Clone, Default)]
pub struct AlignOptions {
    pub gap_cost: Option<i64>,
    pub preset: Option<ScoringPreset>,
    pub json: bool,
    pub stats: bool,
    pub score_only: bool,
}

#[derive(Debug, Serialize)]
struct AlignmentReport<'a> {
    seq1_id: &'a str,
    seq2_id: &'a str,
    score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    aligned1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aligned2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cigar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<AlignmentStats>,
    scoring: ScoringScheme,
}

pub fn execute(config: &Config, seq1: PathBuf, seq2: PathBuf, options: AlignOptions) -> CliResult<()> {
    let stdout = std::io::stdout();
    run(config, &seq1, &seq2, &options, &mut stdout.lock())
}

pub(crate) fn run<W: Write>(
    config: &Config,
    seq1: &Path,
    seq2: &Path,
    options: &AlignOptions,
    out: &mut W,
) -> CliResult<()> {
    let mut scoring = config.scoring.clone();
    if let Some(gap_cost) = options.gap_cost {
        scoring.gap_cost = gap_cost;
    }
    if let Some(preset) = options.preset {
        scoring.preset = preset;
        scoring.costs = None;
    }
    let scheme = scoring.scheme()?;
    log::debug!("Scoring: gap cost {}, costs {:?}", scheme.gap_cost(), scheme.costs());
    if !scheme.is_symmetric() {
        log::warn!("Cost table is not symmetric; swapping seq1 and seq2 may change the score");
    }

    let first = read_input(seq1)?;
    let second = read_input(seq2)?;
    let engine = NeedlemanWunsch::new(scheme);

    if options.score_only {
        log::info!("Computing score only");
        let score = engine.score(first.as_bytes(), second.as_bytes())?;
        if options.json {
            let report = AlignmentReport {
                seq1_id: &first.id,
                seq2_id: &second.id,
                score,
                aligned1: None,
                aligned2: None,
                cigar: None,
                stats: None,
                scoring: scheme,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            writeln!(out, "Score: {}", score)?;
        }
        return Ok(());
    }

    log::info!("Aligning {} x {} cells", first.len() + 1, second.len() + 1);
    let alignment = engine.align(first.as_bytes(), second.as_bytes())?;
    let stats = alignment.stats();
    log::info!(
        "Alignment length {}, {:.2}% identity, {} gaps",
        stats.length,
        stats.identity,
        stats.gaps
    );

    if options.json {
        let report = AlignmentReport {
            seq1_id: &first.id,
            seq2_id: &second.id,
            score: alignment.score(),
            aligned1: Some(alignment.aligned1()),
            aligned2: Some(alignment.aligned2()),
            cigar: Some(alignment.cigar()),
            stats: Some(stats),
            scoring: scheme,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "{}", alignment)?;
    if options.stats {
        writeln!(
            out,
            "Length: {}  Matches: {}  Mismatches: {}  Gaps: {}  Identity: {:.2}%  CIGAR: {}",
            stats.length,
            stats.matches,
            stats.mismatches,
            stats.gaps,
            stats.identity,
            alignment.cigar()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;

    fn fasta(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, format!(">{}\n{}\n", name, body)).unwrap();
        path
    }

    fn output(config: &Config, a: &Path, b: &Path, options: AlignOptions) -> CliResult<String> {
        let mut buf = Vec::new();
        run(config, a, b, &options, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_plain_report() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "AG");
        let b = fasta(&dir, "b.fa", "AG");
        let text = output(&Config::default(), &a, &b, AlignOptions::default()).unwrap();
        assert_eq!(text, "Score: 0\nAG\nAG\n");
    }

    #[test]
    fn test_gap_cost_override() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "A");
        let b = fasta(&dir, "b.fa", "C");
        // mismatch A/C costs 2, two gaps at cost 0 are cheaper
        let options = AlignOptions { gap_cost: Some(0), ..Default::default() };
        let text = output(&Config::default(), &a, &b, options).unwrap();
        assert!(text.starts_with("Score: 0\n"));
    }

    #[test]
    fn test_json_report() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "GATTACA");
        let b = fasta(&dir, "b.fa", "GATACA");
        let options = AlignOptions { json: true, ..Default::default() };
        let text = output(&Config::default(), &a, &b, options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["score"], 4);
        assert_eq!(value["seq1_id"], "a.fa");
        assert_eq!(value["stats"]["gaps"], 1);
        assert_eq!(value["scoring"]["gap_cost"], 4);
    }

    #[test]
    fn test_score_only() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "A");
        let b = fasta(&dir, "b.fa", "C");
        let options = AlignOptions { score_only: true, ..Default::default() };
        assert_eq!(output(&Config::default(), &a, &b, options).unwrap(), "Score: 2\n");
    }

    #[test]
    fn test_invalid_symbol_is_alignment_error() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "ACGN");
        let b = fasta(&dir, "b.fa", "ACGT");
        let err = output(&Config::default(), &a, &b, AlignOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::Alignment { .. }));
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "ACGT");
        let missing = dir.path().join("missing.fa");
        let err = output(&Config::default(), &a, &missing, AlignOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn test_negative_gap_override_rejected() {
        let dir = TempDir::new().unwrap();
        let a = fasta(&dir, "a.fa", "A");
        let b = fasta(&dir, "b.fa", "A");
        let options = AlignOptions { gap_cost: Some(-4), ..Default::default() };
        let err = output(&Config::default(), &a, &b, options).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
