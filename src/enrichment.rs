/// Heuristic enrichment of lead attributes
///
/// This module fills in missing or unknown attributes in place:
/// 1. Company size: sampled from a configurable default set when unknown
/// 2. Industry: derived from the company name when still uncategorized
/// 3. Missing-info flag: raised when a key field is literally "Unknown"
use crate::models::{Lead, GENERAL_INDUSTRY, UNKNOWN};
use rand::seq::SliceRandom;
use rand::Rng;

/// Company sizes sampled when a lead's size is unknown.
pub const DEFAULT_COMPANY_SIZES: [&str; 3] = ["Small", "Medium", "Large"];

/// Company-name fragments checked in priority order; first match wins.
const COMPANY_INDUSTRY_RULES: [(&str, &str); 3] = [
    ("tech", "Tech"),
    ("edu", "Education"),
    ("health", "Healthcare"),
];

#[derive(Debug, Clone)]
pub struct LeadEnricher {
    default_company_sizes: Vec<String>,
}

impl Default for LeadEnricher {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LeadEnricher {
    /// Creates an enricher sampling from `default_company_sizes`, or from
    /// [`DEFAULT_COMPANY_SIZES`] when the list is empty.
    pub fn new(default_company_sizes: Vec<String>) -> Self {
        let default_company_sizes = if default_company_sizes.is_empty() {
            DEFAULT_COMPANY_SIZES.iter().map(|s| s.to_string()).collect()
        } else {
            default_company_sizes
        };
        Self {
            default_company_sizes,
        }
    }

    /// Enriches every lead in place.
    ///
    /// Re-running may re-sample `company_size` for leads still marked
    /// "Unknown"; `missing_info` is recomputed identically each time.
    pub fn enrich_leads<R: Rng + ?Sized>(&self, leads: &mut [Lead], rng: &mut R) {
        for lead in leads.iter_mut() {
            self.enrich_company_size(lead, rng);
            enrich_industry(lead);
            flag_missing_info(lead);
        }

        let flagged = leads
            .iter()
            .filter(|lead| lead.missing_info == Some(true))
            .count();
        tracing::info!(
            "Enriched {} leads ({} flagged with missing info)",
            leads.len(),
            flagged
        );
    }

    fn enrich_company_size<R: Rng + ?Sized>(&self, lead: &mut Lead, rng: &mut R) {
        if lead.company_size.is_empty() || lead.company_size == UNKNOWN {
            if let Some(size) = self.default_company_sizes.choose(rng) {
                lead.company_size = size.clone();
            }
        }
    }
}

fn enrich_industry(lead: &mut Lead) {
    if lead.industry.is_empty() || lead.industry == GENERAL_INDUSTRY || lead.industry == UNKNOWN {
        lead.industry = industry_from_company(&lead.company).to_string();
    }
}

fn flag_missing_info(lead: &mut Lead) {
    let missing = [&lead.email, &lead.company, &lead.position]
        .iter()
        .any(|field| field.as_str() == UNKNOWN);
    lead.missing_info = Some(missing);
}

/// Infers an industry from a company name, falling back to "General".
pub fn industry_from_company(company: &str) -> &'static str {
    let company = company.to_lowercase();
    COMPANY_INDUSTRY_RULES
        .iter()
        .find(|(fragment, _)| company.contains(fragment))
        .map(|(_, industry)| *industry)
        .unwrap_or(GENERAL_INDUSTRY)
}
