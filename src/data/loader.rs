use std::borrow::Cow;
use std::path::Path;

use encoding_rs::Encoding;
use log::{debug, info, warn};

use super::model::{PincodeTable, Schema};
use crate::error::{LoadError, PininError, Result};

/// Encodings tried, in order, when decoding a data file.
///
/// The last three all resolve to windows-1252 under the WHATWG labels, which
/// maps every byte, so in practice a file is either UTF-8 or windows-1252.
pub const ENCODING_LABELS: &[&str] = &["utf-8", "latin-1", "iso-8859-1", "cp1252"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a pincode table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<PincodeTable> {
    if !path.is_file() {
        return Err(PininError::load(path, LoadError::FileNotFound));
    }
    let bytes = std::fs::read(path).map_err(|e| PininError::load(path, LoadError::Io(e)))?;
    let table = load_bytes(&bytes).map_err(|e| PininError::load(path, e))?;
    info!(
        "loaded {} pincode rows from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV bytes (any supported encoding) into a pincode table.
pub fn load_bytes(bytes: &[u8]) -> std::result::Result<PincodeTable, LoadError> {
    let (text, label) = decode(bytes)?;
    if label != ENCODING_LABELS[0] {
        warn!("data file is not valid UTF-8, decoded as {label}");
    }
    parse_csv(&text)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode with the first encoding that accepts the bytes without replacement.
fn decode(bytes: &[u8]) -> std::result::Result<(Cow<'_, str>, &'static str), LoadError> {
    let mut tried = Vec::with_capacity(ENCODING_LABELS.len());

    for &label in ENCODING_LABELS {
        let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
            debug!("skipping unknown encoding label {label}");
            continue;
        };
        tried.push(label);

        let input = if encoding == encoding_rs::UTF_8 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };

        match encoding.decode_without_bom_handling_and_without_replacement(input) {
            Some(text) => {
                debug!("decoded data file as {label} ({})", encoding.name());
                return Ok((text, label));
            }
            None => debug!("data file is not valid {label}"),
        }
    }

    Err(LoadError::Encoding { tried })
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: a header row naming at least the required columns, then one
/// row per post office. Every cell is kept as text.
fn parse_csv(text: &str) -> std::result::Result<PincodeTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(LoadError::Empty);
    }

    let schema = Schema::from_headers(headers)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    PincodeTable::from_rows(schema, rows)
}
