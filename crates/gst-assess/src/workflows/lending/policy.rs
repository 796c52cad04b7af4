use serde::{Deserialize, Serialize};

/// Credit band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditGrade {
    /// Boundaries are inclusive: 750, 650 and 500 fall into the higher band.
    pub fn for_score(score: u16) -> Self {
        if score >= 750 {
            Self::Excellent
        } else if score >= 650 {
            Self::Good
        } else if score >= 500 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Needs Improvement",
        }
    }
}

/// Per-grade pricing and sizing knobs used by the loan engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LendingPolicy {
    pub base_rates: GradeTable,
    pub turnover_multipliers: GradeTable,
    pub startup_amount_factor: f64,
    pub exporter_amount_factor: f64,
    pub startup_rate_premium: f64,
    pub exporter_rate_discount: f64,
    pub minimum_rate: f64,
    pub recommended_amount_cap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeTable {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
}

impl GradeTable {
    pub fn get(&self, grade: CreditGrade) -> f64 {
        match grade {
            CreditGrade::Excellent => self.excellent,
            CreditGrade::Good => self.good,
            CreditGrade::Fair => self.fair,
            CreditGrade::Poor => self.poor,
        }
    }
}

impl LendingPolicy {
    pub fn standard() -> Self {
        Self {
            base_rates: GradeTable {
                excellent: 9.0,
                good: 11.5,
                fair: 14.0,
                poor: 17.5,
            },
            turnover_multipliers: GradeTable {
                excellent: 0.30,
                good: 0.25,
                fair: 0.20,
                poor: 0.15,
            },
            startup_amount_factor: 0.8,
            exporter_amount_factor: 1.2,
            startup_rate_premium: 1.5,
            exporter_rate_discount: 0.5,
            minimum_rate: 8.5,
            recommended_amount_cap: 1_000_000.0,
        }
    }
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
