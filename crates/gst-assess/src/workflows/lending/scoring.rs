use crate::workflows::business::{BusinessProfile, IncorporationDate};
use crate::workflows::filings::BusinessMetrics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const BASE_SCORE: u16 = 300;
pub const MAX_SCORE: u16 = 900;
/// Vintage points awarded when the incorporation date cannot be read.
pub const FALLBACK_VINTAGE_POINTS: u16 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFactor {
    GstCompliance,
    Turnover,
    FilingConsistency,
    BusinessVintage,
    SalesMix,
}

/// Discrete contribution to the credit score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditScoreComponent {
    pub factor: CreditFactor,
    pub points: u16,
    pub notes: String,
}

/// How the vintage contribution was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "basis")]
pub enum VintageBasis {
    Measured { years: f64 },
    Fallback,
}

pub(crate) struct CreditScoreCard {
    pub score: u16,
    pub components: Vec<CreditScoreComponent>,
    pub vintage: VintageBasis,
}

pub(crate) fn score_business(
    profile: &BusinessProfile,
    metrics: &BusinessMetrics,
    today: NaiveDate,
) -> CreditScoreCard {
    let mut components = Vec::with_capacity(5);

    let compliance = metrics.gst_compliance_score;
    let compliance_points = compliance.saturating_mul(2).min(200) as u16;
    components.push(CreditScoreComponent {
        factor: CreditFactor::GstCompliance,
        points: compliance_points,
        notes: format!("GST compliance score {compliance}/100"),
    });

    let turnover = metrics.annual_turnover;
    components.push(CreditScoreComponent {
        factor: CreditFactor::Turnover,
        points: turnover_points(turnover),
        notes: format!("annual turnover ₹{turnover:.0}"),
    });

    let filings = metrics.filing_frequency;
    components.push(CreditScoreComponent {
        factor: CreditFactor::FilingConsistency,
        points: filing_points(filings),
        notes: format!("{filings} month(s) of GST filings"),
    });

    let (vintage_points, vintage) = vintage_points(&profile.incorporation(), today);
    components.push(CreditScoreComponent {
        factor: CreditFactor::BusinessVintage,
        points: vintage_points,
        notes: match vintage {
            VintageBasis::Measured { years } => format!("{years:.1} years in business"),
            VintageBasis::Fallback => "incorporation date unreadable; default applied".to_string(),
        },
    });

    let b2b = metrics.b2b_percentage;
    components.push(CreditScoreComponent {
        factor: CreditFactor::SalesMix,
        points: sales_mix_points(b2b),
        notes: format!("{b2b:.1}% of sales are B2B"),
    });

    let total: u16 = components.iter().map(|component| component.points).sum();
    let score = BASE_SCORE.saturating_add(total).min(MAX_SCORE);

    CreditScoreCard {
        score,
        components,
        vintage,
    }
}

pub(crate) fn turnover_points(annual_turnover: f64) -> u16 {
    if annual_turnover > 50_000_000.0 {
        200
    } else if annual_turnover > 10_000_000.0 {
        150
    } else if annual_turnover > 5_000_000.0 {
        100
    } else if annual_turnover > 1_000_000.0 {
        75
    } else if annual_turnover > 500_000.0 {
        50
    } else {
        0
    }
}

pub(crate) fn filing_points(filing_frequency: u32) -> u16 {
    match filing_frequency {
        12.. => 100,
        6..=11 => 75,
        3..=5 => 50,
        1..=2 => 25,
        0 => 0,
    }
}

pub(crate) fn vintage_points(incorporation: &IncorporationDate, today: NaiveDate) -> (u16, VintageBasis) {
    let Some(years) = incorporation.years_before(today) else {
        return (FALLBACK_VINTAGE_POINTS, VintageBasis::Fallback);
    };

    let points = if years > 5.0 {
        100
    } else if years > 3.0 {
        75
    } else if years > 1.0 {
        50
    } else if years > 0.5 {
        25
    } else {
        0
    };

    (points, VintageBasis::Measured { years })
}

pub(crate) fn sales_mix_points(b2b_percentage: f64) -> u16 {
    if b2b_percentage > 70.0 {
        100
    } else if b2b_percentage > 40.0 {
        75
    } else if b2b_percentage > 10.0 {
        50
    } else {
        25
    }
}
