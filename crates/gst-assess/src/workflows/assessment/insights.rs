use crate::workflows::filings::BusinessMetrics;
use crate::workflows::lending::LoanAssessment;
use crate::workflows::schemes::SchemeEligibility;
use serde::Serialize;

pub const EXCELLENT_PROFILE_HEADLINE: &str = "Excellent profile";
pub const EXCELLENT_PROFILE_DETAIL: &str =
    "The business shows strong financial health across all metrics.";

/// Threshold-based strengths and improvement areas for the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentInsights {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    /// Set only when there is nothing to improve.
    pub headline: Option<String>,
    pub eligible_schemes: usize,
    pub total_schemes: usize,
}

impl AssessmentInsights {
    pub fn derive(
        metrics: &BusinessMetrics,
        loan: &LoanAssessment,
        schemes: &SchemeEligibility,
    ) -> Self {
        let compliance = metrics.gst_compliance_score;
        let filings = metrics.filing_frequency;

        let strengths = [
            (compliance > 70, "Strong GST compliance record"),
            (metrics.annual_turnover > 5_000_000.0, "Healthy annual turnover"),
            (filings >= 6, "Consistent GST filing history"),
            (loan.credit_score > 650, "Good creditworthiness profile"),
        ];
        let improvements = [
            (compliance < 60, "Improve GST filing consistency"),
            (loan.credit_score < 600, "Build stronger credit history"),
            (filings < 6, "Maintain regular GST filings"),
        ];

        let strengths = selected(&strengths);
        let improvements = selected(&improvements);
        let headline = improvements
            .is_empty()
            .then(|| EXCELLENT_PROFILE_HEADLINE.to_string());

        Self {
            strengths,
            improvements,
            headline,
            eligible_schemes: schemes.eligible_count(),
            total_schemes: schemes.len(),
        }
    }

    pub fn is_excellent(&self) -> bool {
        self.headline.is_some()
    }
}

fn selected(checks: &[(bool, &str)]) -> Vec<String> {
    checks
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, text)| text.to_string())
        .collect()
}
