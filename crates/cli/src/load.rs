// Grid snapshot loading (JSON snapshot, CSV/TSV)
//
// Stands in for the spreadsheet transport: produces the same GridSnapshot a
// live workbook connection would hand to the engine.

use std::io::Read;
use std::path::Path;

use sheetsense_structure::{GridSnapshot, RawValue, StructureError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    Json,
    Csv,
    Tsv,
}

impl InputFormat {
    /// Guess from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Read a file (or stdin for `None` / `-`) as UTF-8 text.
pub fn read_input(path: Option<&Path>) -> Result<String, StructureError> {
    match path {
        Some(p) if p != Path::new("-") => read_file_as_utf8(p),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(decode(bytes))
        }
    }
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, StructureError> {
    let bytes = std::fs::read(path)
        .map_err(|e| StructureError::Io(format!("{}: {e}", path.display())))?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            // Excel-exported CSVs are often Windows-1252
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Parse text into a snapshot. `delimiter` overrides sniffing for CSV.
pub fn parse_snapshot(
    content: &str,
    format: InputFormat,
    delimiter: Option<u8>,
) -> Result<GridSnapshot, StructureError> {
    match format {
        InputFormat::Json => GridSnapshot::from_json(content),
        InputFormat::Csv => {
            let delim = delimiter.unwrap_or_else(|| sniff_delimiter(content));
            snapshot_from_delimited(content, delim)
        }
        InputFormat::Tsv => snapshot_from_delimited(content, delimiter.unwrap_or(b'\t')),
    }
}

/// Candidate field separators, in tie-break order.
const DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];

/// Records inspected when guessing the delimiter.
const SNIFF_RECORDS: usize = 10;

/// Pick the separator that splits the leading records into the widest
/// consistent table. Falls back to comma.
fn sniff_delimiter(content: &str) -> u8 {
    DELIMITERS
        .iter()
        .map(|&delim| (delim, consistency_score(content, delim)))
        .filter(|&(_, score)| score > 0)
        .fold((b',', 0), |best, cand| if cand.1 > best.1 { cand } else { best })
        .0
}

/// Records agreeing with the first record's width, times that width.
/// Zero when the first record does not split at all.
fn consistency_score(content: &str, delimiter: u8) -> usize {
    let widths: Vec<usize> = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
        .records()
        .take(SNIFF_RECORDS)
        .map(|r| r.map(|rec| rec.len()).unwrap_or(1))
        .collect();

    match widths.first() {
        Some(&width) if width > 1 => widths.iter().filter(|&&w| w == width).count() * width,
        _ => 0,
    }
}

/// Every field is a value; fields starting with `=` also land in the formula grid.
fn snapshot_from_delimited(content: &str, delimiter: u8) -> Result<GridSnapshot, StructureError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut values = Vec::new();
    let mut formulas = Vec::new();
    let mut any_formula = false;

    for result in reader.records() {
        let record = result.map_err(|e| StructureError::SnapshotParse(e.to_string()))?;
        let mut value_row = Vec::with_capacity(record.len());
        let mut formula_row = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value = RawValue::from_input(field);
            if matches!(&value, RawValue::Text(s) if s.starts_with('=')) {
                any_formula = true;
            }
            formula_row.push(value.clone());
            value_row.push(value);
        }
        values.push(value_row);
        formulas.push(formula_row);
    }

    let snapshot = GridSnapshot::from_values(values);
    Ok(if any_formula {
        snapshot.with_formulas(formulas)
    } else {
        snapshot
    })
}
