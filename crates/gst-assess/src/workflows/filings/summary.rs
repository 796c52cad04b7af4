use super::table::RawTable;
use serde::Serialize;
use tracing::debug;

pub const INVOICE_VALUE: &str = "Invoice Value";
pub const TAXABLE_VALUE: &str = "Taxable Value";
pub const RATE: &str = "Rate";
pub const RECIPIENT_GSTIN: &str = "GSTIN/UIN of Recipient";

/// Fixed-shape reduction of one reporting month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    pub b2b_transactions: usize,
    pub b2c_transactions: usize,
    pub purchase_transactions: usize,
    pub b2b_sales: f64,
    pub b2c_sales: f64,
    pub total_sales: f64,
    pub total_purchases: f64,
    pub gst_collected: f64,
    /// Distinct rates seen across both sales sections, ascending.
    pub tax_rates_used: Vec<f64>,
    pub unique_customers: usize,
    /// Not derived from any filing column yet; always zero.
    pub interstate_sales: f64,
    /// Not derived from any filing column yet; always zero.
    pub intrastate_sales: f64,
}

/// Reduce a month's B2B, B2C and purchase tables.
///
/// Missing columns skip the sub-computation that needs them; missing cells
/// count as zero.
pub fn summarize(
    month: impl Into<String>,
    b2b: &RawTable,
    b2c: &RawTable,
    purchases: &RawTable,
) -> MonthlySummary {
    let mut rates: Vec<f64> = Vec::new();
    let mut gst_collected = 0.0;

    let b2b_sales = b2b
        .column(INVOICE_VALUE)
        .map(|column| column.sum())
        .unwrap_or(0.0);
    gst_collected += gst_on_taxable(b2b);
    if let Some(rate) = b2b.column(RATE) {
        rates.extend(rate.distinct_numbers());
    }
    let unique_customers = b2b
        .column(RECIPIENT_GSTIN)
        .map(|column| column.distinct_count())
        .unwrap_or(0);

    let b2c_sales = b2c
        .column(TAXABLE_VALUE)
        .map(|column| column.sum())
        .unwrap_or(0.0);
    gst_collected += gst_on_taxable(b2c);
    if let Some(rate) = b2c.column(RATE) {
        rates.extend(rate.distinct_numbers());
    }

    rates.sort_by(f64::total_cmp);
    rates.dedup();

    let total_purchases = purchases
        .column(TAXABLE_VALUE)
        .or_else(|| purchases.column(INVOICE_VALUE))
        .map(|column| column.sum())
        .unwrap_or(0.0);

    let summary = MonthlySummary {
        month: month.into(),
        b2b_transactions: b2b.row_count(),
        b2c_transactions: b2c.row_count(),
        purchase_transactions: purchases.row_count(),
        b2b_sales,
        b2c_sales,
        total_sales: b2b_sales + b2c_sales,
        total_purchases,
        gst_collected,
        tax_rates_used: rates,
        unique_customers,
        interstate_sales: 0.0,
        intrastate_sales: 0.0,
    };

    debug!(
        month = %summary.month,
        total_sales = summary.total_sales,
        gst_collected = summary.gst_collected,
        "monthly filings summarized"
    );

    summary
}

/// `Σ Taxable Value × Rate / 100`, or zero when either column is absent.
fn gst_on_taxable(table: &RawTable) -> f64 {
    match (table.column(TAXABLE_VALUE), table.column(RATE)) {
        (Some(taxable), Some(rate)) => taxable.weighted_sum(&rate, 100.0),
        _ => 0.0,
    }
}
