use std::path::PathBuf;

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Print or write an example configuration, or show the active one
pub fn execute(config: &Config, example: bool, output: Option<PathBuf>) -> CliResult<()> {
    let content = if example {
        Config::example_toml()?
    } else {
        toml::to_string_pretty(config)?
    };

    match output {
        Some(path) => {
            if path.exists() {
                return Err(CliError::validation(format!(
                    "refusing to overwrite existing file: {}",
                    path.display()
                )));
            }
            std::fs::write(&path, content)?;
            log::info!("Wrote configuration to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_example() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seqalign.toml");
        execute(&Config::default(), true, Some(path.clone())).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.dotplot.kmer_len, 30);

        let err = execute(&Config::default(), true, Some(path)).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
