use crate::models::Lead;
use std::collections::HashSet;

/// Filter value meaning "do not filter".
pub const ALL: &str = "All";

/// Maps an optional, possibly blank filter input onto a filter value,
/// treating absence as the [`ALL`] sentinel.
pub fn filter_value(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => ALL,
    }
}

/// Deduplication and query-time narrowing of lead collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadFilter;

impl LeadFilter {
    pub fn new() -> Self {
        Self
    }

    /// Keeps the first lead for each distinct email (exact, case-sensitive),
    /// preserving relative order. Records themselves are not modified.
    pub fn deduplicate(&self, mut leads: Vec<Lead>) -> Vec<Lead> {
        let before = leads.len();
        let mut seen = HashSet::with_capacity(before);
        leads.retain(|lead| seen.insert(lead.email.clone()));

        tracing::debug!(
            "Deduplicated {} leads into {} unique emails",
            before,
            leads.len()
        );
        leads
    }

    /// Exact match on `location`; [`ALL`] passes everything through.
    pub fn filter_by_location(&self, leads: Vec<Lead>, location: &str) -> Vec<Lead> {
        Self::filter_by(leads, location, |lead| &lead.location)
    }

    /// Exact match on `industry`; [`ALL`] passes everything through.
    pub fn filter_by_industry(&self, leads: Vec<Lead>, industry: &str) -> Vec<Lead> {
        Self::filter_by(leads, industry, |lead| &lead.industry)
    }

    fn filter_by<F>(mut leads: Vec<Lead>, wanted: &str, field: F) -> Vec<Lead>
    where
        F: Fn(&Lead) -> &String,
    {
        if wanted == ALL {
            return leads;
        }
        leads.retain(|lead| field(lead) == wanted);
        leads
    }
}
