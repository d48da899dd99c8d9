//! Reader for newline-delimited record lists.
//!
//! One record per line. Surrounding whitespace is trimmed and blank lines are
//! skipped. Files ending in `.gz` or `.bgz` are decompressed on the fly.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::Result;
use crate::utils::validation::check_record_limit;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read every record from a file.
///
/// # Errors
///
/// Returns `MatchError::Io` if the file cannot be read or is not valid UTF-8,
/// or `MatchError::TooManyRecords` if the limit is exceeded.
pub fn read_records(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    let records = if is_gzipped(path) {
        read_records_from(BufReader::new(GzDecoder::new(file)))?
    } else {
        read_records_from(BufReader::new(file))?
    };
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read records from any buffered reader
///
/// # Errors
///
/// Returns `MatchError::Io` on read failure or invalid UTF-8, or
/// `MatchError::TooManyRecords` if the limit is exceeded.
pub fn read_records_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }

        // Check record limit for DOS protection
        check_record_limit(records.len())?;
        records.push(record.to_string());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::error::MatchError;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_records_from_trims_and_skips_blanks() {
        let text = "Homo sapiens\n  Mus musculus  \n\n\tDanio rerio\r\n";
        let records = read_records_from(std::io::Cursor::new(text)).unwrap();
        assert_eq!(records, vec!["Homo sapiens", "Mus musculus", "Danio rerio"]);
    }

    #[test]
    fn test_read_records_plain() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "salmonella enterica").unwrap();
        writeln!(file).unwrap();
        writeln!(file, " gallus gallus ").unwrap();
        file.flush().unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records, vec!["salmonella enterica", "gallus gallus"]);
    }

    #[test]
    fn test_read_records_gzipped() {
        let file = NamedTempFile::with_suffix(".txt.gz").unwrap();
        let mut encoder = GzEncoder::new(file.reopen().unwrap(), Compression::default());
        encoder.write_all(b"Escherichia coli\nBos taurus\n").unwrap();
        encoder.finish().unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records, vec!["Escherichia coli", "Bos taurus"]);
    }

    #[test]
    fn test_read_records_missing_file() {
        let err = read_records(Path::new("/nonexistent/records.txt")).unwrap_err();
        assert!(matches!(err, MatchError::Io(_)));
    }

    #[test]
    fn test_read_records_invalid_utf8() {
        let reader = std::io::Cursor::new(vec![b'a', 0xff, b'\n']);
        assert!(matches!(read_records_from(reader), Err(MatchError::Io(_))));
    }
}
