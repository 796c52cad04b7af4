use serde::{Deserialize, Serialize};

/// Repayment figures for one principal at a fixed rate and tenure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_months: u32,
    pub monthly_emi: f64,
    pub total_interest: f64,
    pub total_payable: f64,
}

/// Standard amortising instalment. A zero rate spreads the principal evenly.
pub fn monthly_instalment(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return principal;
    }

    let months = tenure_months as f64;
    let monthly_rate = annual_rate / (12.0 * 100.0);
    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powf(months);
        principal * monthly_rate * growth / (growth - 1.0)
    } else {
        principal / months
    }
}

pub fn quote(principal: f64, annual_rate: f64, tenure_months: u32) -> EmiQuote {
    let monthly_emi = monthly_instalment(principal, annual_rate, tenure_months);
    let total_payable = monthly_emi * tenure_months.max(1) as f64;

    EmiQuote {
        principal,
        annual_rate,
        tenure_months,
        monthly_emi,
        total_interest: total_payable - principal,
        total_payable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_repays_principal_exactly() {
        let quote = quote(1_200_000.0, 0.0, 36);
        assert!((quote.monthly_emi * 36.0 - 1_200_000.0).abs() < 1e-6);
        assert!(quote.total_interest.abs() < 1e-6);
    }

    #[test]
    fn matches_reference_amortisation() {
        // 10 lakh at 12% over 5 years.
        let emi = monthly_instalment(1_000_000.0, 12.0, 60);
        assert!((emi - 22_244.45).abs() < 0.01, "emi was {emi}");
    }

    #[test]
    fn total_interest_is_payable_minus_principal() {
        let quote = quote(500_000.0, 11.5, 60);
        assert!(quote.total_interest > 0.0);
        assert!((quote.total_payable - quote.principal - quote.total_interest).abs() < 1e-6);
    }
}
