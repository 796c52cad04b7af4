mod emi;
mod policy;
mod scoring;

#[cfg(test)]
mod tests;

pub use emi::{monthly_instalment, quote, EmiQuote};
pub use policy::{CreditGrade, GradeTable, LendingPolicy};
pub use scoring::{
    CreditFactor, CreditScoreComponent, VintageBasis, BASE_SCORE, FALLBACK_VINTAGE_POINTS,
    MAX_SCORE,
};

use crate::workflows::business::{BusinessProfile, BusinessType};
use crate::workflows::filings::BusinessMetrics;
use chrono::NaiveDate;
use serde::Serialize;

pub const CALCULATOR_MIN_PRINCIPAL: f64 = 100_000.0;
pub const CALCULATOR_STEP: f64 = 50_000.0;

/// Stateless engine that prices a loan from filing metrics.
#[derive(Debug, Clone, Default)]
pub struct LoanAssessmentEngine {
    policy: LendingPolicy,
}

impl LoanAssessmentEngine {
    pub fn new(policy: LendingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    /// Deterministic for a given `today`, which only feeds business vintage.
    pub fn assess(
        &self,
        profile: &BusinessProfile,
        metrics: &BusinessMetrics,
        today: NaiveDate,
    ) -> LoanAssessment {
        let card = scoring::score_business(profile, metrics, today);
        let credit_score = card.score;
        let credit_grade = CreditGrade::for_score(credit_score);

        let annual_turnover = metrics.annual_turnover;
        let profit_margin = metrics.profit_margin_estimate;
        let compliance = metrics.gst_compliance_score;

        let mut max_loan_amount =
            annual_turnover * self.policy.turnover_multipliers.get(credit_grade);
        match profile.business_type {
            BusinessType::Startup => max_loan_amount *= self.policy.startup_amount_factor,
            BusinessType::Exporter => max_loan_amount *= self.policy.exporter_amount_factor,
            _ => {}
        }

        let interest_rate = self.interest_rate(
            credit_grade,
            profile.business_type,
            profit_margin,
            compliance,
        );

        let max_tenure_years: u32 = if credit_score > 700 {
            7
        } else if credit_score > 600 {
            5
        } else {
            3
        };

        let recommended_amount = max_loan_amount.min(self.policy.recommended_amount_cap);
        let repayment = quote(recommended_amount, interest_rate, max_tenure_years * 12);

        let approval_probability = approval_probability(
            credit_score,
            compliance,
            annual_turnover,
            profit_margin,
            metrics.filing_frequency,
        );

        LoanAssessment {
            credit_score,
            credit_grade,
            score_components: card.components,
            vintage: card.vintage,
            max_loan_amount,
            recommended_amount,
            interest_rate,
            max_tenure_years,
            monthly_emi: repayment.monthly_emi,
            total_interest: repayment.total_interest,
            approval_probability,
            annual_turnover,
            profit_margin,
        }
    }

    fn interest_rate(
        &self,
        grade: CreditGrade,
        business_type: BusinessType,
        profit_margin: f64,
        compliance: u32,
    ) -> f64 {
        let mut rate = self.policy.base_rates.get(grade);

        match business_type {
            BusinessType::Startup => rate += self.policy.startup_rate_premium,
            BusinessType::Exporter => rate -= self.policy.exporter_rate_discount,
            _ => {}
        }

        if profit_margin > 20.0 {
            rate -= 0.5;
        } else if profit_margin < 5.0 {
            rate += 1.0;
        }

        if compliance > 80 {
            rate -= 0.5;
        } else if compliance < 50 {
            rate += 1.0;
        }

        rate.max(self.policy.minimum_rate)
    }
}

/// Sum of five capped factors, itself capped at 95.
pub fn approval_probability(
    credit_score: u16,
    compliance: u32,
    annual_turnover: f64,
    profit_margin: f64,
    filing_frequency: u32,
) -> f64 {
    let factors = [
        (credit_score as f64 / 25.0).min(30.0),
        (compliance as f64 / 4.0).min(25.0),
        (annual_turnover / 250_000.0).min(20.0),
        profit_margin.min(15.0),
        if filing_frequency >= 6 { 10.0 } else { 5.0 },
    ];

    factors.iter().sum::<f64>().min(95.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanAssessment {
    pub credit_score: u16,
    pub credit_grade: CreditGrade,
    pub score_components: Vec<CreditScoreComponent>,
    pub vintage: VintageBasis,
    pub max_loan_amount: f64,
    pub recommended_amount: f64,
    pub interest_rate: f64,
    pub max_tenure_years: u32,
    pub monthly_emi: f64,
    pub total_interest: f64,
    pub approval_probability: f64,
    pub annual_turnover: f64,
    pub profit_margin: f64,
}

impl LoanAssessment {
    pub fn tenure_months(&self) -> u32 {
        self.max_tenure_years * 12
    }

    /// What-if repayment for an arbitrary principal at this assessment's rate and tenure.
    pub fn quote(&self, principal: f64) -> EmiQuote {
        quote(principal, self.interest_rate, self.tenure_months())
    }

    /// `None` when the loan ceiling is below the calculator minimum.
    pub fn calculator_range(&self) -> Option<CalculatorRange> {
        let max = self.max_loan_amount.max(0.0).floor();
        if max < CALCULATOR_MIN_PRINCIPAL {
            return None;
        }

        Some(CalculatorRange {
            min: CALCULATOR_MIN_PRINCIPAL,
            max,
            step: CALCULATOR_STEP,
            default: self
                .recommended_amount
                .floor()
                .clamp(CALCULATOR_MIN_PRINCIPAL, max),
        })
    }
}

/// Bounds for an interactive principal selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}
