use crate::cities::CityCatalog;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Placeholder used upstream and by the constructor when a field is absent.
pub const UNKNOWN: &str = "Unknown";
/// Industry label meaning "not yet categorized".
pub const GENERAL_INDUSTRY: &str = "General";
pub const DEFAULT_COMPANY_SIZE: &str = "Medium";
pub const HIGH_POTENTIAL_TAG: &str = "High Potential";

// ============ Domain Models ============

/// A prospective contact carried through every pipeline stage.
///
/// Created once per upstream record (see [`NewLead::into_lead`]) and then
/// mutated in place by the enricher, tagger and scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    /// Display name.
    pub name: String,
    /// Identifying key used for deduplication. Not validated.
    pub email: String,
    /// Free-text organization name.
    pub company: String,
    /// Free-text job title.
    pub position: String,
    /// City name, supplied upstream or sampled from the city catalog.
    pub location: String,
    /// Category label, "General" until a tagger or enricher decides otherwise.
    pub industry: String,
    /// One of "Small", "Medium", "Large" (or "Unknown" awaiting enrichment).
    pub company_size: String,
    /// Ordered labels; a label appears at most once.
    tags: Vec<String>,
    /// Priority score. Zero until the scorer runs, at most 100 afterwards.
    pub score: i32,
    /// Set only by the enricher: true when email, company or position is "Unknown".
    pub missing_info: Option<bool>,
}

impl Lead {
    /// Appends `tag` unless it is already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_high_potential(&self) -> bool {
        self.has_tag(HIGH_POTENTIAL_TAG)
    }
}

/// Construction input for a [`Lead`].
///
/// Only `name` and `email` are required. Every other field distinguishes
/// "not supplied" (`None` or blank) from an explicit value; defaults are
/// applied once, in [`NewLead::into_lead`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
}

impl NewLead {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn company_size(mut self, company_size: impl Into<String>) -> Self {
        self.company_size = Some(company_size.into());
        self
    }

    /// Applies construction defaults and produces the pipeline record.
    ///
    /// A missing location is sampled from `cities`; if the catalog is empty
    /// the location falls back to "Unknown".
    pub fn into_lead<R: Rng + ?Sized>(self, cities: &CityCatalog, rng: &mut R) -> Lead {
        let location = match supplied(self.location) {
            Some(location) => location,
            None => cities
                .sample(rng)
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string()),
        };

        Lead {
            name: self.name,
            email: self.email,
            company: supplied(self.company).unwrap_or_else(|| UNKNOWN.to_string()),
            position: supplied(self.position).unwrap_or_else(|| UNKNOWN.to_string()),
            location,
            industry: supplied(self.industry).unwrap_or_else(|| GENERAL_INDUSTRY.to_string()),
            company_size: supplied(self.company_size)
                .unwrap_or_else(|| DEFAULT_COMPANY_SIZE.to_string()),
            tags: Vec::new(),
            score: 0,
            missing_info: None,
        }
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============ Export Models ============

/// Flat field-to-value mapping of a [`Lead`] used by exporters and the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub industry: String,
    pub company_size: String,
    pub tags: Vec<String>,
    pub score: i32,
    /// "Yes" / "No" once enriched; omitted before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_info: Option<String>,
}

impl From<&Lead> for LeadRecord {
    fn from(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            company: lead.company.clone(),
            position: lead.position.clone(),
            location: lead.location.clone(),
            industry: lead.industry.clone(),
            company_size: lead.company_size.clone(),
            tags: lead.tags.clone(),
            score: lead.score,
            missing_info: lead
                .missing_info
                .map(|missing| if missing { "Yes" } else { "No" }.to_string()),
        }
    }
}

// ============ API Request/Response Models ============

/// Query parameters for `GET /api/v1/leads`.
///
/// `limit` is raw text; unparsable values fall back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadsQueryParams {
    pub limit: Option<String>,
    pub city: Option<String>,
    pub tag_keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsMeta {
    pub limit: usize,
    pub count: usize,
    pub city: Option<String>,
    pub tag_keyword: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadsResponse {
    pub meta: LeadsMeta,
    pub data: Vec<LeadRecord>,
}

/// Query parameters for the dashboard endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQueryParams {
    pub limit: Option<String>,
    pub city: Option<String>,
    pub industry: Option<String>,
    pub page: Option<String>,
}

// ============ Random User API Models ============

/// Response body of the randomuser.me API.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomUser {
    pub name: RandomUserName,
    pub email: String,
    pub location: RandomUserLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomUserLocation {
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_add_tag() {
        let mut lead = NewLead::new("John Doe", "john@example.com")
            .company("Company")
            .into_lead(&CityCatalog::default(), &mut rng());

        lead.add_tag("Tech");
        assert!(lead.has_tag("Tech"));
    }

    #[test]
    fn test_add_tag_twice_keeps_one() {
        let mut lead = NewLead::new("John Doe", "john@example.com")
            .into_lead(&CityCatalog::default(), &mut rng());

        lead.add_tag(HIGH_POTENTIAL_TAG);
        lead.add_tag(HIGH_POTENTIAL_TAG);
        lead.add_tag("Tech");

        assert_eq!(lead.tags(), &[HIGH_POTENTIAL_TAG.to_string(), "Tech".to_string()]);
    }

    #[test]
    fn test_constructor_defaults() {
        let catalog = CityCatalog::new(vec!["Jakarta".to_string()]);
        let lead = NewLead::new("Jane Doe", "jane@example.com").into_lead(&catalog, &mut rng());

        assert_eq!(lead.company, UNKNOWN);
        assert_eq!(lead.position, UNKNOWN);
        assert_eq!(lead.location, "Jakarta");
        assert_eq!(lead.industry, GENERAL_INDUSTRY);
        assert_eq!(lead.company_size, DEFAULT_COMPANY_SIZE);
        assert!(lead.tags().is_empty());
        assert_eq!(lead.score, 0);
        assert_eq!(lead.missing_info, None);
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let lead = NewLead::new("Jane Doe", "jane@example.com")
            .position("  ")
            .industry("")
            .into_lead(&CityCatalog::new(vec![]), &mut rng());

        assert_eq!(lead.position, UNKNOWN);
        assert_eq!(lead.industry, GENERAL_INDUSTRY);
        assert_eq!(lead.location, UNKNOWN);
    }

    #[test]
    fn test_record_mapping() {
        let mut lead = NewLead::new("Jane Doe", "jane@example.com")
            .company("Company")
            .position("Engineer")
            .location("Jakarta")
            .into_lead(&CityCatalog::default(), &mut rng());
        lead.add_tag(HIGH_POTENTIAL_TAG);
        lead.missing_info = Some(false);

        let record = LeadRecord::from(&lead);
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.location, "Jakarta");
        assert_eq!(record.tags, vec![HIGH_POTENTIAL_TAG.to_string()]);
        assert_eq!(record.missing_info.as_deref(), Some("No"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["company_size"], "Medium");
        assert_eq!(json["tags"][0], HIGH_POTENTIAL_TAG);
    }

    #[test]
    fn test_record_omits_missing_info_before_enrichment() {
        let lead = NewLead::new("Jane Doe", "jane@example.com")
            .into_lead(&CityCatalog::default(), &mut rng());

        let json = serde_json::to_value(LeadRecord::from(&lead)).unwrap();
        assert!(json.get("missing_info").is_none());
    }
}
