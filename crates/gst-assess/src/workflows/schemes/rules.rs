use super::catalog::Scheme;
use crate::workflows::business::{BusinessProfile, BusinessType, IncorporationDate};
use crate::workflows::filings::BusinessMetrics;
use chrono::NaiveDate;
use serde::Serialize;

/// Northeastern and hill states with the lower composition threshold.
pub const SPECIAL_CATEGORY_STATES: [&str; 10] = [
    "arunachal pradesh",
    "assam",
    "manipur",
    "meghalaya",
    "mizoram",
    "nagaland",
    "sikkim",
    "tripura",
    "himachal pradesh",
    "uttarakhand",
];

pub const SPECIAL_CATEGORY_COMPOSITION_LIMIT: u64 = 7_500_000;
pub const STANDARD_COMPOSITION_LIMIT: u64 = 15_000_000;
pub const STARTUP_TURNOVER_LIMIT: f64 = 1_000_000_000.0;

pub(crate) struct RuleOutcome {
    pub eligible: bool,
    pub evaluated: bool,
    pub reason: String,
}

impl RuleOutcome {
    fn eligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: true,
            evaluated: true,
            reason: reason.into(),
        }
    }

    fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            eligible: false,
            evaluated: true,
            reason: reason.into(),
        }
    }

    fn not_evaluated() -> Self {
        Self {
            eligible: false,
            evaluated: false,
            reason: "Not assessed from GST filing data".to_string(),
        }
    }
}

/// MUDRA loan tier selected by turnover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MudraTier {
    Shishu,
    Kishore,
    Tarun,
}

impl MudraTier {
    pub fn for_turnover(annual_turnover: f64) -> Self {
        if annual_turnover < 1_000_000.0 {
            Self::Shishu
        } else if annual_turnover < 5_000_000.0 {
            Self::Kishore
        } else {
            Self::Tarun
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shishu => "Shishu",
            Self::Kishore => "Kishore",
            Self::Tarun => "Tarun",
        }
    }
}

pub fn startup_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 4, 1).unwrap_or(NaiveDate::MIN)
}

/// Composition turnover ceiling for the state the business is registered in.
pub fn composition_threshold(state: &str) -> u64 {
    let state = state.to_lowercase();
    if SPECIAL_CATEGORY_STATES
        .iter()
        .any(|special| state.contains(special))
    {
        SPECIAL_CATEGORY_COMPOSITION_LIMIT
    } else {
        STANDARD_COMPOSITION_LIMIT
    }
}

pub(crate) fn apply(
    scheme: Scheme,
    profile: &BusinessProfile,
    metrics: &BusinessMetrics,
) -> RuleOutcome {
    match scheme {
        Scheme::AdvanceAuthorisation => advance_authorisation(profile),
        Scheme::PmmyLoans => pmmy_loans(profile, metrics),
        Scheme::StartupTaxBenefits => startup_tax_benefits(profile, metrics),
        Scheme::DigitalLending => digital_lending(metrics),
        Scheme::GemPlatform => gem_platform(metrics),
        Scheme::GstComposition => gst_composition(profile, metrics),
        Scheme::Epcg | Scheme::NsicSupport | Scheme::IncomeTaxDeduction => {
            RuleOutcome::not_evaluated()
        }
    }
}

fn advance_authorisation(profile: &BusinessProfile) -> RuleOutcome {
    if profile.business_type == BusinessType::Exporter {
        RuleOutcome::eligible("Eligible as registered exporter with GST data")
    } else {
        RuleOutcome::ineligible("Only available for exporters")
    }
}

fn pmmy_loans(profile: &BusinessProfile, metrics: &BusinessMetrics) -> RuleOutcome {
    match profile.business_type {
        BusinessType::Msme | BusinessType::Manufacturer | BusinessType::Trader => {
            let tier = MudraTier::for_turnover(metrics.annual_turnover);
            RuleOutcome::eligible(format!(
                "Eligible for PMMY {} loan based on turnover",
                tier.label()
            ))
        }
        _ => RuleOutcome::ineligible("Must be MSME/manufacturer/trader"),
    }
}

fn startup_tax_benefits(profile: &BusinessProfile, metrics: &BusinessMetrics) -> RuleOutcome {
    if profile.business_type != BusinessType::Startup {
        return RuleOutcome::ineligible("Only for registered startups");
    }

    match profile.incorporation() {
        IncorporationDate::Parsed(date)
            if date >= startup_cutoff() && metrics.annual_turnover < STARTUP_TURNOVER_LIMIT =>
        {
            RuleOutcome::eligible("Eligible startup with turnover < 100 Cr")
        }
        IncorporationDate::Parsed(_) => RuleOutcome::ineligible(
            "Must be incorporated after Apr 2016 with turnover < 100 Cr",
        ),
        IncorporationDate::Unreadable(raw) => RuleOutcome::ineligible(format!(
            "Incorporation date '{raw}' could not be read"
        )),
    }
}

fn digital_lending(metrics: &BusinessMetrics) -> RuleOutcome {
    if metrics.gst_compliance_score > 60 && metrics.annual_turnover > 500_000.0 {
        RuleOutcome::eligible("Good GST compliance with sufficient turnover")
    } else {
        RuleOutcome::ineligible("Need better GST compliance and minimum turnover")
    }
}

fn gem_platform(metrics: &BusinessMetrics) -> RuleOutcome {
    if metrics.filing_frequency >= 3 {
        RuleOutcome::eligible("Regular GST filing history available")
    } else {
        RuleOutcome::ineligible("Need consistent GST filing history")
    }
}

fn gst_composition(profile: &BusinessProfile, metrics: &BusinessMetrics) -> RuleOutcome {
    let threshold = composition_threshold(&profile.state);
    let eligible_type = matches!(
        profile.business_type,
        BusinessType::Manufacturer | BusinessType::Trader | BusinessType::Restaurant
    );

    if metrics.annual_turnover < threshold as f64 && eligible_type {
        RuleOutcome::eligible(format!(
            "Turnover below threshold (₹{})",
            group_thousands(threshold)
        ))
    } else {
        RuleOutcome::ineligible("Turnover exceeds threshold or ineligible business type")
    }
}

/// `7500000` -> `7,500,000`.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_threshold_matches_state_substrings() {
        assert_eq!(composition_threshold("Sikkim"), 7_500_000);
        assert_eq!(composition_threshold("East Khasi Hills, MEGHALAYA"), 7_500_000);
        assert_eq!(composition_threshold("Gujarat"), 15_000_000);
        assert_eq!(composition_threshold(""), 15_000_000);
    }

    #[test]
    fn mudra_tiers_split_on_turnover() {
        assert_eq!(MudraTier::for_turnover(999_999.0), MudraTier::Shishu);
        assert_eq!(MudraTier::for_turnover(1_000_000.0), MudraTier::Kishore);
        assert_eq!(MudraTier::for_turnover(5_000_000.0), MudraTier::Tarun);
    }

    #[test]
    fn groups_digits_in_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(7_500_000), "7,500,000");
        assert_eq!(group_thousands(15_000_000), "15,000,000");
    }
}
