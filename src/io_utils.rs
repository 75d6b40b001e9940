//! I/O utilities for CSV reading, encoding, and delimiter resolution.
//!
//! All file access in csv-compat flows through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: strict per-record decoding via `encoding_rs`, defaulting
//!   to UTF-8; a malformed byte surfaces as a [`ScanError::Decode`].
//! - **Reader construction** with a UTF-8 byte-order-mark probe, so a BOM is
//!   reported as a warning instead of corrupting the first header name.

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::error::ScanError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Opens `path` for scanning, consuming a leading UTF-8 BOM if present.
/// Returns the reader and whether a BOM was found. Ragged rows are allowed;
/// the scanner pads or ignores fields as needed.
pub fn open_csv_reader_with_bom_probe(
    path: &Path,
    delimiter: u8,
) -> Result<(csv::Reader<BufReader<File>>, bool), ScanError> {
    let mut file = File::open(path)?;
    let mut probe = [0u8; 3];
    let mut filled = 0;
    while filled < probe.len() {
        let read = file.read(&mut probe[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    let has_bom = filled == 3 && probe == UTF8_BOM;
    if !has_bom {
        file.seek(SeekFrom::Start(0))?;
    }

    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    Ok((builder.from_reader(BufReader::new(file)), has_bom))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ScanError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        Err(ScanError::Decode(encoding.name()))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
) -> Result<Vec<String>, ScanError> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>, ScanError>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        assert_eq!(
            resolve_input_delimiter(Path::new("data.csv"), None),
            DEFAULT_CSV_DELIMITER
        );
        assert_eq!(
            resolve_input_delimiter(Path::new("data.TSV"), None),
            DEFAULT_TSV_DELIMITER
        );
        assert_eq!(resolve_input_delimiter(Path::new("data.csv"), Some(b';')), b';');
    }

    #[test]
    fn unknown_encoding_label_is_rejected() {
        assert!(resolve_encoding(Some("not-a-real-encoding")).is_err());
        assert_eq!(resolve_encoding(None).expect("default"), UTF_8);
    }

    #[test]
    fn strict_decoding_rejects_malformed_bytes() {
        assert_eq!(decode_bytes(b"caf\xC3\xA9", UTF_8).expect("decode"), "café");
        assert!(decode_bytes(b"caf\xE9", UTF_8).is_err());
    }
}
