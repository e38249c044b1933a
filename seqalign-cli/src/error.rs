//! Error handling for the seqalign CLI

use std::path::PathBuf;
use thiserror::Error;

use seqalign_core::{AlignError, FastaError, SeedError};
use seqalign_plot::PlotError;

/// Main error type for seqalign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format in {file}: {message}")]
    InvalidFormat { file: String, message: String },

    #[error("Alignment error: {message}")]
    Alignment { message: String },

    #[error("Seeding error: {message}")]
    Seeding { message: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(file: S, message: S) -> Self {
        Self::InvalidFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn alignment<S: Into<String>>(message: S) -> Self {
        Self::Alignment { message: message.into() }
    }

    pub fn seeding<S: Into<String>>(message: S) -> Self {
        Self::Seeding { message: message.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::io(format!("JSON serialization error: {}", err))
    }
}

impl From<AlignError> for CliError {
    fn from(err: AlignError) -> Self {
        match err {
            AlignError::InvalidScoring(message) => Self::config(message),
            other => Self::alignment(other.to_string()),
        }
    }
}

impl From<SeedError> for CliError {
    fn from(err: SeedError) -> Self {
        Self::seeding(err.to_string())
    }
}

impl From<PlotError> for CliError {
    fn from(err: PlotError) -> Self {
        match err {
            PlotError::UnsupportedFormat(path) => {
                Self::validation(format!("unsupported plot format: {}", path))
            }
            other => Self::rendering(other.to_string()),
        }
    }
}

impl From<FastaError> for CliError {
    fn from(err: FastaError) -> Self {
        match err {
            FastaError::Io(e) => Self::from(e),
            FastaError::Parse(message) => Self::invalid_format("FASTA".to_string(), message),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Gzip-compressed FASTA files must end in .gz",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Inputs must be FASTA or plain sequence lines; FASTQ is not accepted\n\
                 • Ensure the file is not corrupted or truncated",
            );
        }

        CliError::Alignment { message: detail } if detail.starts_with("Invalid symbol") => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Only A, C, G and T are accepted; remove N or IUPAC ambiguity codes\n\
                 • Lowercase input is upper-cased when read from FASTA",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqalign.toml configuration file\n\
                 • Use 'seqalign config --example' to generate a sample configuration\n\
                 • Costs and the gap cost are nonnegative magnitudes; negative values are rejected",
            );
        }

        CliError::Seeding { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use a k-mer length of at least 1 with --kmer-len",
            );
        }

        CliError::Validation { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Plot output must end in .svg, .ps, .eps, .png, .jpg or .jpeg",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
