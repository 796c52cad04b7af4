mod catalog;
mod rules;

pub use catalog::Scheme;
pub use rules::{
    composition_threshold, startup_cutoff, MudraTier, SPECIAL_CATEGORY_COMPOSITION_LIMIT,
    SPECIAL_CATEGORY_STATES, STANDARD_COMPOSITION_LIMIT,
};

use crate::workflows::business::BusinessProfile;
use crate::workflows::filings::BusinessMetrics;
use serde::Serialize;
use std::collections::BTreeMap;

/// Screening result for one scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityVerdict {
    pub scheme: Scheme,
    pub scheme_name: &'static str,
    pub url: &'static str,
    pub eligible: bool,
    /// False for catalog entries with no rule over GST data.
    pub evaluated: bool,
    pub reason: String,
}

/// One verdict per catalog scheme, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemeEligibility {
    verdicts: BTreeMap<Scheme, EligibilityVerdict>,
}

impl SchemeEligibility {
    pub fn get(&self, scheme: Scheme) -> Option<&EligibilityVerdict> {
        self.verdicts.get(&scheme)
    }

    pub fn is_eligible(&self, scheme: Scheme) -> bool {
        self.get(scheme).map(|verdict| verdict.eligible).unwrap_or(false)
    }

    pub fn verdicts(&self) -> impl Iterator<Item = &EligibilityVerdict> {
        self.verdicts.values()
    }

    pub fn eligible_count(&self) -> usize {
        self.verdicts().filter(|verdict| verdict.eligible).count()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// Apply every scheme rule to the business. Pure and total over the catalog.
pub fn evaluate(profile: &BusinessProfile, metrics: &BusinessMetrics) -> SchemeEligibility {
    let verdicts = Scheme::ordered()
        .into_iter()
        .map(|scheme| {
            let outcome = rules::apply(scheme, profile, metrics);
            let verdict = EligibilityVerdict {
                scheme,
                scheme_name: scheme.name(),
                url: scheme.url(),
                eligible: outcome.eligible,
                evaluated: outcome.evaluated,
                reason: outcome.reason,
            };
            (scheme, verdict)
        })
        .collect();

    SchemeEligibility { verdicts }
}
