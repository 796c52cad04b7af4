//! Ingestion of monthly GST returns: parsing, monthly summaries, and the
//! business-level metrics derived from them.

mod metrics;
mod parser;
mod summary;
mod table;
mod upload;

pub use metrics::{aggregate, BusinessMetrics, STANDARD_RATES};
pub use parser::{parse_table, ParseDiagnostic, ParsedTable};
pub use summary::{summarize, MonthlySummary};
pub use table::{CellValue, Column, RawTable};
pub use upload::{group_into_months, FileKind, FilingUpload, MonthlyFilingSet, UploadCounts};

/// Parse whichever filings a month carries and reduce them to a summary.
///
/// Absent filings are treated as empty tables without invoking the parser.
pub fn summarize_month(month: &MonthlyFilingSet) -> (MonthlySummary, Vec<ParseDiagnostic>) {
    let mut diagnostics = Vec::new();
    let mut load = |upload: Option<&FilingUpload>, kind: FileKind| match upload {
        Some(upload) => {
            let parsed = parse_table(&upload.content, kind, &upload.file_name);
            diagnostics.extend(parsed.diagnostic);
            parsed.table
        }
        None => RawTable::empty(),
    };

    let b2b = load(month.b2b.as_ref(), FileKind::B2b);
    let b2c = load(month.b2c.as_ref(), FileKind::B2c);
    let purchases = load(month.purchase.as_ref(), FileKind::Purchase);

    (
        summarize(month.label.clone(), &b2b, &b2c, &purchases),
        diagnostics,
    )
}
