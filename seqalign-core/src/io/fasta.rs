//! FASTA sequence reader
//!
//! Gzipped input is detected by the `.gz` suffix and decoded through flate2.
//! Input that opens with a `>` header is parsed by needletail; input with no
//! header at all is read line by line, skipping any later `>` lines. Either
//! way all records are concatenated, whitespace is dropped and symbols are
//! upper-cased, so the result can be passed straight to the aligner. FASTQ
//! is rejected.

use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use needletail::errors::ParseErrorKind;
use needletail::parse_fastx_reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A sequence loaded from a FASTA file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    /// Name of the first record, empty when the file had none
    pub id: String,
    pub data: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self { id: id.into(), data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// FASTA parser for alignment input
pub struct FastaParser;

impl FastaParser {
    /// Read a FASTA file (optionally gzipped) into a single sequence
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Sequence, FastaError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let sequence = if path.to_string_lossy().ends_with(".gz") {
            Self::parse_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            Self::parse_reader(BufReader::new(file))?
        };

        log::debug!(
            "Loaded {} ({} bp) from {}",
            if sequence.id.is_empty() { "<unnamed>" } else { sequence.id.as_str() },
            sequence.len(),
            path.display()
        );
        Ok(sequence)
    }

    /// Parse FASTA data from any readable source
    pub fn parse_reader<R: Read>(mut reader: R) -> Result<Sequence, FastaError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;

        let Some(start) = buf.iter().position(|b| !b.is_ascii_whitespace()) else {
            return Ok(Sequence::default());
        };
        match buf[start] {
            b'>' => {
                buf.drain(..start);
                Self::parse_records(Cursor::new(buf))
            }
            b'@' => Err(FastaError::Parse(
                "input looks like FASTQ ('@' header); only FASTA is supported".to_string(),
            )),
            _ => {
                log::debug!("No FASTA header, reading raw sequence lines");
                Ok(Sequence::new(String::new(), parse_headerless(&buf)))
            }
        }
    }

    fn parse_records<R: Read + Send>(reader: R) -> Result<Sequence, FastaError> {
        let mut fastx_reader = match parse_fastx_reader(reader) {
            Ok(r) => r,
            // Nothing to read is a valid, empty sequence
            Err(e) if matches!(e.kind, ParseErrorKind::EmptyFile) => return Ok(Sequence::default()),
            Err(e) => return Err(FastaError::Parse(e.to_string())),
        };

        let mut id = None;
        let mut data = Vec::new();

        while let Some(record) = fastx_reader.next() {
            let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
            if id.is_none() {
                id = Some(extract_sequence_name(record.id()));
            }
            data.extend(
                record
                    .seq()
                    .iter()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Sequence::new(id.unwrap_or_default(), data))
    }
}

/// Load the sequence stored in a FASTA file
pub fn load_sequence<P: AsRef<Path>>(path: P) -> Result<Sequence, FastaError> {
    FastaParser::parse_file(path)
}

/// Concatenate every non-header line, ignoring whitespace
fn parse_headerless(buf: &[u8]) -> Vec<u8> {
    buf.split(|&b| b == b'\n')
        .filter(|line| !line.starts_with(b">"))
        .flat_map(|line| line.iter().filter(|b| !b.is_ascii_whitespace()))
        .map(|b| b.to_ascii_uppercase())
        .collect()
}

fn extract_sequence_name(header: &[u8]) -> String {
    let header = String::from_utf8_lossy(header);
    header.split_whitespace().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_single_record() {
        let data = b">chr1 test sequence\nACGT\nacgt\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.id, "chr1");
        assert_eq!(seq.as_bytes(), b"ACGTACGT");
    }

    #[test]
    fn test_records_are_concatenated() {
        let data = b">a\nAAA\n>b\nccc\nGG\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.id, "a");
        assert_eq!(seq.as_bytes(), b"AAACCCGG");
    }

    #[test]
    fn test_empty_input_is_empty_sequence() {
        let seq = FastaParser::parse_reader(Cursor::new(&b""[..])).unwrap();
        assert!(seq.is_empty());
        assert!(seq.id.is_empty());
    }

    #[test]
    fn test_headerless_input() {
        let data = b"acgt\nGG\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert!(seq.id.is_empty());
        assert_eq!(seq.as_bytes(), b"ACGTGG");

        // later header lines are still skipped
        let data = b"AAA\n>second\nCC\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.as_bytes(), b"AAACC");
    }

    #[test]
    fn test_leading_blank_lines() {
        let data = b"\n\n>chr2\nACGT\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.id, "chr2");
        assert_eq!(seq.as_bytes(), b"ACGT");

        let seq = FastaParser::parse_reader(Cursor::new(&b"\n  \n"[..])).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() {
        let data = b">x\nACGT  \r\nGG\t\n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.as_bytes(), b"ACGTGG");

        let data = b"ACGT \t\nGG \n";
        let seq = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap();
        assert_eq!(seq.as_bytes(), b"ACGTGG");
    }

    #[test]
    fn test_fastq_is_rejected() {
        let data = b"@read1\nACGT\n+\nIIII\n";
        let err = FastaParser::parse_reader(Cursor::new(&data[..])).unwrap_err();
        match err {
            FastaError::Parse(message) => assert!(message.contains("FASTQ")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_file_and_gzip() {
        let mut plain = NamedTempFile::new().unwrap();
        writeln!(plain, ">seq\nGATTACA").unwrap();
        assert_eq!(load_sequence(plain.path()).unwrap().as_bytes(), b"GATTACA");

        let gz = tempfile::Builder::new().suffix(".fa.gz").tempfile().unwrap();
        {
            let mut encoder = flate2::write::GzEncoder::new(gz.reopen().unwrap(), flate2::Compression::default());
            encoder.write_all(b">seq\nttag\n").unwrap();
            encoder.finish().unwrap();
        }
        assert_eq!(load_sequence(gz.path()).unwrap().as_bytes(), b"TTAG");
    }

    #[test]
    fn test_missing_file() {
        let err = load_sequence("/nonexistent/path/seq.fa").unwrap_err();
        assert!(matches!(err, FastaError::Io(_)));
    }
}
