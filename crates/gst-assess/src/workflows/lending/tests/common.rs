use crate::workflows::business::{BusinessCategory, BusinessProfile, BusinessType};
use crate::workflows::filings::BusinessMetrics;
use crate::workflows::lending::LoanAssessmentEngine;
use chrono::NaiveDate;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

pub(super) fn engine() -> LoanAssessmentEngine {
    LoanAssessmentEngine::default()
}

pub(super) fn profile(business_type: BusinessType, incorporated: &str) -> BusinessProfile {
    BusinessProfile {
        gstin: "27AAACB1234C1Z5".to_string(),
        business_name: "Kaveri Traders".to_string(),
        business_type,
        business_category: BusinessCategory::Both,
        incorporation_date: incorporated.to_string(),
        state: "Maharashtra".to_string(),
    }
}

pub(super) struct MetricsFixture {
    pub annual_turnover: f64,
    pub filing_frequency: u32,
    pub compliance: u32,
    pub b2b_percentage: f64,
    pub profit_margin: f64,
}

impl MetricsFixture {
    pub(super) fn build(self) -> BusinessMetrics {
        let months = self.filing_frequency.max(1) as f64;
        let avg_monthly_sales = self.annual_turnover / 12.0;
        BusinessMetrics {
            annual_turnover: self.annual_turnover,
            total_sales: avg_monthly_sales * months,
            total_purchases: 0.0,
            avg_monthly_sales,
            total_gst_collected: 0.0,
            b2b_percentage: self.b2b_percentage,
            b2c_percentage: 100.0 - self.b2b_percentage,
            filing_frequency: self.filing_frequency,
            avg_transactions_per_month: 12.0,
            uses_standard_rates: true,
            profit_margin_estimate: self.profit_margin,
            gst_compliance_score: self.compliance,
        }
    }
}

/// One month of B2B-only sales worth ₹1,00,000.
pub(super) fn single_month_b2b() -> BusinessMetrics {
    MetricsFixture {
        annual_turnover: 1_200_000.0,
        filing_frequency: 1,
        compliance: 65,
        b2b_percentage: 100.0,
        profit_margin: 25.0,
    }
    .build()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
