//! End-to-end assessment run: uploads in, monthly breakdown, metrics, scheme
//! verdicts, loan terms and insights out.

mod insights;

pub use insights::{AssessmentInsights, EXCELLENT_PROFILE_DETAIL, EXCELLENT_PROFILE_HEADLINE};

use crate::workflows::business::BusinessProfile;
use crate::workflows::filings::{
    aggregate, group_into_months, summarize_month, BusinessMetrics, FilingUpload, MonthlySummary,
    ParseDiagnostic, UploadCounts,
};
use crate::workflows::lending::{LoanAssessment, LoanAssessmentEngine};
use crate::workflows::schemes::{self, SchemeEligibility};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Everything one run needs. Owned by the run; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct AssessmentRequest {
    pub profile: BusinessProfile,
    pub uploads: Vec<FilingUpload>,
    /// Reference date for business vintage.
    pub today: NaiveDate,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("no sales data: please upload at least one B2B or B2C sales file")]
    MissingSalesData,
    #[error("insufficient data: no monthly summaries could be produced")]
    InsufficientData,
}

#[derive(Debug, Clone, Serialize)]
pub struct GstAssessment {
    pub profile: BusinessProfile,
    pub assessed_on: NaiveDate,
    pub uploads: UploadCounts,
    pub monthly: Vec<MonthlySummary>,
    pub metrics: BusinessMetrics,
    pub schemes: SchemeEligibility,
    pub loan: LoanAssessment,
    pub insights: AssessmentInsights,
    pub diagnostics: Vec<ParseDiagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct AssessmentPipeline {
    engine: LoanAssessmentEngine,
}

impl AssessmentPipeline {
    pub fn new(engine: LoanAssessmentEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &LoanAssessmentEngine {
        &self.engine
    }

    pub fn run(&self, request: AssessmentRequest) -> Result<GstAssessment, AssessmentError> {
        let AssessmentRequest {
            profile,
            uploads,
            today,
        } = request;

        let (months, counts) = group_into_months(uploads);
        if months.is_empty() {
            return Err(AssessmentError::MissingSalesData);
        }

        let mut diagnostics = Vec::new();
        let monthly: Vec<MonthlySummary> = months
            .iter()
            .map(|month| {
                let (summary, month_diagnostics) = summarize_month(month);
                diagnostics.extend(month_diagnostics);
                summary
            })
            .collect();

        let metrics = aggregate(&monthly).ok_or(AssessmentError::InsufficientData)?;
        let schemes = schemes::evaluate(&profile, &metrics);
        let loan = self.engine.assess(&profile, &metrics, today);
        let insights = AssessmentInsights::derive(&metrics, &loan, &schemes);

        info!(
            gstin = %profile.gstin,
            months = monthly.len(),
            annual_turnover = metrics.annual_turnover,
            credit_score = loan.credit_score,
            eligible_schemes = insights.eligible_schemes,
            diagnostics = diagnostics.len(),
            "assessment complete"
        );

        Ok(GstAssessment {
            profile,
            assessed_on: today,
            uploads: counts,
            monthly,
            metrics,
            schemes,
            loan,
            insights,
            diagnostics,
        })
    }
}

/// Run one assessment with the standard lending policy.
pub fn assess(request: AssessmentRequest) -> Result<GstAssessment, AssessmentError> {
    AssessmentPipeline::default().run(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::business::{BusinessCategory, BusinessType};

    fn request(uploads: Vec<FilingUpload>) -> AssessmentRequest {
        AssessmentRequest {
            profile: BusinessProfile {
                gstin: "29ABCDE1234F1Z5".to_string(),
                business_name: "Nilgiri Exports".to_string(),
                business_type: BusinessType::Exporter,
                business_category: BusinessCategory::Goods,
                incorporation_date: "2018-04-01".to_string(),
                state: "Karnataka".to_string(),
            },
            uploads,
            today: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
        }
    }

    #[test]
    fn purchase_only_uploads_are_missing_sales_data() {
        let result = assess(request(vec![FilingUpload::new(
            "gstr2b_apr.csv",
            "GSTIN of supplier,Invoice Value\n27AAA,1000\n",
        )]));

        assert!(matches!(result, Err(AssessmentError::MissingSalesData)));
    }

    #[test]
    fn missing_sales_message_is_actionable() {
        let message = AssessmentError::MissingSalesData.to_string();
        assert!(message.contains("please upload at least one B2B or B2C sales file"));
    }

    #[test]
    fn diagnostics_survive_into_the_result() {
        let result = assess(request(vec![
            FilingUpload::new(
                "Apr_b2b.csv",
                "Invoice Value,Taxable Value,Rate\n118000,100000,18\n",
            ),
            FilingUpload::new("Apr_purchase.xlsx", "not a workbook"),
        ]))
        .expect("assessment");

        assert_eq!(result.monthly.len(), 1);
        assert_eq!(result.uploads.purchase, 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.metrics.total_purchases, 0.0);
    }
}
