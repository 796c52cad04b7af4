use super::summary::MonthlySummary;
use serde::Serialize;

/// GST slabs recognised as standard.
pub const STANDARD_RATES: [f64; 5] = [0.0, 5.0, 12.0, 18.0, 28.0];

/// Business-level figures reduced from the monthly summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessMetrics {
    pub annual_turnover: f64,
    pub total_sales: f64,
    pub total_purchases: f64,
    pub avg_monthly_sales: f64,
    pub total_gst_collected: f64,
    pub b2b_percentage: f64,
    pub b2c_percentage: f64,
    /// Number of months with data.
    pub filing_frequency: u32,
    pub avg_transactions_per_month: f64,
    pub uses_standard_rates: bool,
    /// Within [5, 25]; 10 when nothing was sold.
    pub profit_margin_estimate: f64,
    /// Within [0, 100].
    pub gst_compliance_score: u32,
}

/// Returns `None` for an empty sequence; callers treat that as insufficient data.
pub fn aggregate(summaries: &[MonthlySummary]) -> Option<BusinessMetrics> {
    if summaries.is_empty() {
        return None;
    }

    let months = summaries.len() as f64;
    let total_sales: f64 = summaries.iter().map(|m| m.total_sales).sum();
    let total_purchases: f64 = summaries.iter().map(|m| m.total_purchases).sum();
    let total_gst_collected: f64 = summaries.iter().map(|m| m.gst_collected).sum();
    let b2b_total: f64 = summaries.iter().map(|m| m.b2b_sales).sum();

    let avg_monthly_sales = total_sales / months;
    let annual_turnover = avg_monthly_sales * 12.0;

    let b2b_percentage = if total_sales > 0.0 {
        b2b_total / total_sales * 100.0
    } else {
        0.0
    };

    let transactions: usize = summaries
        .iter()
        .map(|m| m.b2b_transactions + m.b2c_transactions)
        .sum();
    let avg_transactions_per_month = transactions as f64 / months;

    let filing_frequency = u32::try_from(summaries.len()).unwrap_or(u32::MAX);

    let uses_standard_rates = summaries
        .iter()
        .flat_map(|m| m.tax_rates_used.iter())
        .all(|rate| STANDARD_RATES.contains(rate));

    let profit_margin_estimate = if total_sales > 0.0 {
        ((total_sales - total_purchases) / total_sales * 100.0).clamp(5.0, 25.0)
    } else {
        10.0
    };

    let standard_rate_bonus = if uses_standard_rates { 50 } else { 0 };
    let gst_compliance_score = filing_frequency
        .saturating_mul(15)
        .saturating_add(standard_rate_bonus)
        .min(100);

    Some(BusinessMetrics {
        annual_turnover,
        total_sales,
        total_purchases,
        avg_monthly_sales,
        total_gst_collected,
        b2b_percentage,
        b2c_percentage: 100.0 - b2b_percentage,
        filing_frequency,
        avg_transactions_per_month,
        uses_standard_rates,
        profit_margin_estimate,
        gst_compliance_score,
    })
}
