// Permissive CSV reader
//
// Quoted fields, doubled-quote escapes and LF / CR / CRLF line endings are
// understood. Nothing here ever fails on malformed input: an unterminated
// quote keeps the reader in quoted mode until end of input, and whatever was
// accumulated is flushed as the final row.

use crate::data::Dataset;
use crate::error::{GainsError, Result};
use rand::Rng;
use std::collections::HashSet;
use std::io::{self, Read};
use std::path::Path;

const PLACEHOLDER_PREFIX: &str = "col_";
const PLACEHOLDER_LEN: usize = 4;
const PLACEHOLDER_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Parse CSV text into a dataset. The first non-empty row is the header.
pub fn parse_csv(text: &str) -> Dataset {
    let mut records = split_records(text);

    // Clean up rows where every field is empty
    records.retain(|record| record.iter().any(|field| !field.is_empty()));

    if records.is_empty() {
        return Dataset::default();
    }

    let header = records.remove(0);
    let headers = name_columns(header);
    let dataset = Dataset::from_records(&headers, records);

    tracing::debug!(
        columns = headers.len(),
        rows = dataset.len(),
        "parsed CSV"
    );
    dataset
}

/// Split raw text into trimmed fields, one `Vec` per physical record.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                record.push(field.trim().to_string());
                field.clear();
            }
            '\n' | '\r' if !in_quotes => {
                // Stray newlines between rows do not open a new record
                if !field.is_empty() || !record.is_empty() {
                    record.push(field.trim().to_string());
                    records.push(std::mem::take(&mut record));
                    field.clear();
                }
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field.trim().to_string());
        records.push(record);
    }

    records
}

/// Turn header cells into column names, synthesizing a name for blank cells.
fn name_columns(header: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = header.iter().filter(|h| !h.is_empty()).cloned().collect();
    let mut rng = rand::thread_rng();

    header
        .into_iter()
        .map(|name| {
            if !name.is_empty() {
                return name;
            }
            loop {
                let candidate = placeholder_name(&mut rng);
                if taken.insert(candidate.clone()) {
                    tracing::debug!(column = %candidate, "named blank header cell");
                    break candidate;
                }
            }
        })
        .collect()
}

fn placeholder_name<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..PLACEHOLDER_LEN)
        .map(|_| PLACEHOLDER_ALPHABET[rng.gen_range(0..PLACEHOLDER_ALPHABET.len())] as char)
        .collect();
    format!("{PLACEHOLDER_PREFIX}{suffix}")
}

/// Read all of `reader` as UTF-8 and parse it.
pub fn read_csv_from_reader<R: Read>(mut reader: R) -> Result<Dataset> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| GainsError::Read { source })?;
    Ok(parse_csv(&text))
}

pub fn read_csv_from_stdin() -> Result<Dataset> {
    read_csv_from_reader(io::stdin().lock())
}

pub fn read_csv_from_path(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|source| GainsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_csv(&text))
}
