use serde::{Deserialize, Serialize};

/// Government support schemes a business can be screened against.
///
/// Declaration order is the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    AdvanceAuthorisation,
    Epcg,
    StartupTaxBenefits,
    PmmyLoans,
    NsicSupport,
    DigitalLending,
    GemPlatform,
    IncomeTaxDeduction,
    GstComposition,
}

impl Scheme {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::AdvanceAuthorisation,
            Self::Epcg,
            Self::StartupTaxBenefits,
            Self::PmmyLoans,
            Self::NsicSupport,
            Self::DigitalLending,
            Self::GemPlatform,
            Self::IncomeTaxDeduction,
            Self::GstComposition,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::AdvanceAuthorisation => "advance_authorisation",
            Self::Epcg => "epcg",
            Self::StartupTaxBenefits => "startup_tax_benefits",
            Self::PmmyLoans => "pmmy_loans",
            Self::NsicSupport => "nsic_support",
            Self::DigitalLending => "digital_lending",
            Self::GemPlatform => "gem_platform",
            Self::IncomeTaxDeduction => "income_tax_deduction",
            Self::GstComposition => "gst_composition",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AdvanceAuthorisation => "Advance Authorisation Scheme (Export Incentive)",
            Self::Epcg => "Export Promotion Capital Goods (EPCG) Scheme",
            Self::StartupTaxBenefits => "Startup Tax Benefits",
            Self::PmmyLoans => "MSME Loans under PMMY",
            Self::NsicSupport => "NSIC Marketing & Credit Support",
            Self::DigitalLending => "Digital Lending Using GST Data",
            Self::GemPlatform => "Government e-Marketplace (GeM)",
            Self::IncomeTaxDeduction => "Income Tax Profit Deduction for Startups",
            Self::GstComposition => "GST Composition Scheme",
        }
    }

    /// Where to apply; some schemes have no portal and carry an instruction instead.
    pub const fn url(self) -> &'static str {
        match self {
            Self::AdvanceAuthorisation => "https://www.dgft.gov.in/advance-authorisation",
            Self::Epcg => "https://www.dgft.gov.in/epcg",
            Self::StartupTaxBenefits => "https://startupindia.gov.in/",
            Self::PmmyLoans => "https://www.mudra.org.in/",
            Self::NsicSupport => "https://www.nsic.co.in/",
            Self::DigitalLending => "Partner with NBFCs or Fintech platforms",
            Self::GemPlatform => "https://gem.gov.in/",
            Self::IncomeTaxDeduction => "Claim deduction in Income Tax Return (ITR) filing",
            Self::GstComposition => "Opt-in via GST portal during registration or return filing",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|scheme| scheme.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for scheme in Scheme::ordered() {
            assert_eq!(Scheme::from_key(scheme.key()), Some(scheme));
        }
        assert_eq!(Scheme::from_key("unknown"), None);
    }

    #[test]
    fn serde_uses_catalog_keys() {
        let json = serde_json::to_string(&Scheme::GemPlatform).expect("serialize");
        assert_eq!(json, "\"gem_platform\"");
    }
}
