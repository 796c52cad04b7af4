use super::table::{CellValue, RawTable};
use super::upload::FileKind;
use calamine::{Data, Reader};
use serde::Serialize;
use std::io::Cursor;
use tracing::warn;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Non-fatal problem encountered while reading a filing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub source: String,
    pub kind: FileKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub table: RawTable,
    pub diagnostic: Option<ParseDiagnostic>,
}

impl ParsedTable {
    fn ok(table: RawTable) -> Self {
        Self {
            table,
            diagnostic: None,
        }
    }

    fn degraded(source: &str, kind: FileKind, message: String) -> Self {
        warn!(%source, kind = kind.label(), %message, "filing could not be parsed");
        Self {
            table: RawTable::empty(),
            diagnostic: Some(ParseDiagnostic {
                source: source.to_string(),
                kind,
                message,
            }),
        }
    }
}

/// Parse one filing. Never fails: unreadable content yields an empty table
/// together with a diagnostic.
pub fn parse_table(content: &[u8], kind: FileKind, source: &str) -> ParsedTable {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let result = match kind {
        FileKind::B2b | FileKind::B2c => read_delimited(content),
        FileKind::Purchase if looks_delimited(content) => read_delimited(content),
        FileKind::Purchase => read_spreadsheet(content),
    };

    match result {
        Ok(table) => ParsedTable::ok(table),
        Err(message) => ParsedTable::degraded(source, kind, message),
    }
}

/// GSTR2B text exports open with a GSTIN column; anything else is treated as
/// a workbook.
pub(crate) fn looks_delimited(content: &[u8]) -> bool {
    let start = content
        .iter()
        .position(|byte| !byte.is_ascii_whitespace())
        .unwrap_or(content.len());
    content[start..]
        .get(..5)
        .map(|prefix| prefix.eq_ignore_ascii_case(b"GSTIN"))
        .unwrap_or(false)
}

fn read_delimited(content: &[u8]) -> Result<RawTable, String> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err("file is empty".to_string());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .map_err(|err| format!("invalid CSV header: {err}"))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = RawTable::new(headers);

    for record in reader.records() {
        let record = record.map_err(|err| format!("invalid CSV data: {err}"))?;
        table.push_row(record.iter().map(CellValue::from_text).collect());
    }

    Ok(table)
}

fn read_spreadsheet(content: &[u8]) -> Result<RawTable, String> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
        .map_err(|err| format!("unsupported spreadsheet: {err}"))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "workbook has no worksheets".to_string())?
        .map_err(|err| format!("unreadable worksheet: {err}"))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| "worksheet is empty".to_string())?
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let mut table = RawTable::new(headers);

    for row in rows {
        table.push_row(row.iter().map(cell_from_data).collect());
    }

    Ok(table)
}

fn cell_from_data(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::Int(value) => Some(CellValue::Number(*value as f64)),
        Data::Float(value) => Some(CellValue::Number(*value)),
        Data::String(value) => CellValue::from_text(value),
        other => CellValue::from_text(&other.to_string()),
    }
}
