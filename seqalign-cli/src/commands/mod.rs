pub mod align;
pub mod config;
pub mod dotplot;

use std::path::Path;

use seqalign_core::{load_sequence, Sequence};

use crate::error::{CliError, CliResult};

/// Read one FASTA input, reporting a missing path before parsing
pub(crate) fn read_input(path: &Path) -> CliResult<Sequence> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let sequence = load_sequence(path)?;
    log::info!(
        "Loaded {} ({} bp) from {}",
        if sequence.id.is_empty() { "<unnamed>" } else { sequence.id.as_str() },
        sequence.len(),
        path.display()
    );
    Ok(sequence)
}
