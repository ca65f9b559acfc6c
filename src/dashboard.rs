use crate::filter::{LeadFilter, ALL};
use crate::models::{Lead, LeadRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Fixed number of rows per dashboard page.
pub const PAGE_SIZE: usize = 20;

/// Status attached to leads handed to the (simulated) CRM.
pub const CRM_SENT_STATUS: &str = "Sent";

/// One numbered dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    /// 1-based position after filtering and ordering.
    pub no: usize,
    pub high_potential: bool,
    #[serde(flatten)]
    pub lead: LeadRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_leads: usize,
    pub target_city: Option<String>,
    pub target_city_count: usize,
    pub target_industry: Option<String>,
    pub target_industry_count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// 1-based index of the first row shown, 0 when the page is empty.
    pub showing_from: usize,
    pub showing_to: usize,
    pub total: usize,
    pub rows: Vec<DashboardRow>,
    pub summary: DashboardSummary,
    pub city_options: Vec<String>,
    pub industry_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrmRow {
    #[serde(flatten)]
    pub row: DashboardRow,
    pub crm_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrmDispatch {
    pub page: usize,
    pub sent: usize,
    pub leads: Vec<CrmRow>,
}

/// Filtered, ordered and numbered view over processed leads.
#[derive(Debug, Clone)]
pub struct Dashboard {
    rows: Vec<DashboardRow>,
    city_options: Vec<String>,
    industry_options: Vec<String>,
    target_city: Option<String>,
    target_industry: Option<String>,
}

impl Dashboard {
    /// Builds the view.
    ///
    /// `city` and `industry` are exact-match filters where [`ALL`] keeps
    /// everything. Rows are ordered "High Potential" first, then by score
    /// descending; ties keep pipeline order. Filter options are computed from
    /// the unfiltered leads.
    pub fn build(
        leads: Vec<Lead>,
        city: &str,
        industry: &str,
        target_city: Option<String>,
        target_industry: Option<String>,
    ) -> Self {
        let city_options = options(leads.iter().map(|l| l.location.as_str()));
        let industry_options = options(leads.iter().map(|l| l.industry.as_str()));

        let filter = LeadFilter::new();
        let leads = filter.filter_by_location(leads, city);
        let mut leads = filter.filter_by_industry(leads, industry);

        leads.sort_by(|a, b| {
            b.is_high_potential()
                .cmp(&a.is_high_potential())
                .then_with(|| b.score.cmp(&a.score))
        });

        let rows = leads
            .iter()
            .enumerate()
            .map(|(i, lead)| DashboardRow {
                no: i + 1,
                high_potential: lead.is_high_potential(),
                lead: LeadRecord::from(lead),
            })
            .collect();

        Self {
            rows,
            city_options,
            industry_options,
            target_city,
            target_industry,
        }
    }

    pub fn rows(&self) -> &[DashboardRow] {
        &self.rows
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE)
    }

    /// Clamps a requested page number to `[1, total_pages]` (1 when empty).
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// Rows visible on `page` (clamped).
    pub fn page_rows(&self, page: usize) -> &[DashboardRow] {
        let page = self.clamp_page(page);
        let start = ((page - 1) * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn summary(&self) -> DashboardSummary {
        let total_leads = self.rows.len();
        let average_score = if total_leads > 0 {
            self.rows.iter().map(|r| f64::from(r.lead.score)).sum::<f64>() / total_leads as f64
        } else {
            0.0
        };

        DashboardSummary {
            total_leads,
            target_city: self.target_city.clone(),
            target_city_count: self.count_matching(self.target_city.as_deref(), |r| &r.location),
            target_industry: self.target_industry.clone(),
            target_industry_count: self
                .count_matching(self.target_industry.as_deref(), |r| &r.industry),
            average_score,
        }
    }

    fn count_matching<F>(&self, target: Option<&str>, field: F) -> usize
    where
        F: Fn(&LeadRecord) -> &String,
    {
        target.map_or(0, |wanted| {
            self.rows.iter().filter(|r| field(&r.lead) == wanted).count()
        })
    }

    pub fn page(&self, page: usize) -> DashboardPage {
        let page = self.clamp_page(page);
        let rows = self.page_rows(page).to_vec();
        let showing_from = rows.first().map_or(0, |r| r.no);
        let showing_to = rows.last().map_or(0, |r| r.no);

        DashboardPage {
            page,
            total_pages: self.total_pages(),
            page_size: PAGE_SIZE,
            showing_from,
            showing_to,
            total: self.rows.len(),
            rows,
            summary: self.summary(),
            city_options: self.city_options.clone(),
            industry_options: self.industry_options.clone(),
        }
    }

    /// Simulates handing the "High Potential" leads visible on `page` to a CRM.
    pub fn send_to_crm(&self, page: usize) -> CrmDispatch {
        let page = self.clamp_page(page);
        let leads: Vec<CrmRow> = self
            .page_rows(page)
            .iter()
            .filter(|row| row.high_potential)
            .map(|row| CrmRow {
                row: row.clone(),
                crm_status: CRM_SENT_STATUS.to_string(),
            })
            .collect();

        tracing::info!(
            "✅ {} High Potential leads sent to CRM (simulated) from page {}",
            leads.len(),
            page
        );
        CrmDispatch {
            page,
            sent: leads.len(),
            leads,
        }
    }
}

/// "All" followed by the sorted distinct values.
fn options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.collect();
    std::iter::once(ALL)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityCatalog;
    use crate::models::{NewLead, HIGH_POTENTIAL_TAG};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lead(email: &str, location: &str, industry: &str, score: i32, high: bool) -> Lead {
        let mut lead = NewLead::new("Test", email)
            .location(location)
            .industry(industry)
            .into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0));
        lead.score = score;
        if high {
            lead.add_tag(HIGH_POTENTIAL_TAG);
        }
        lead
    }

    fn build(leads: Vec<Lead>, city: &str, industry: &str) -> Dashboard {
        Dashboard::build(
            leads,
            city,
            industry,
            Some("Jakarta".to_string()),
            Some("Tech".to_string()),
        )
    }

    #[test]
    fn test_high_potential_first_then_score() {
        let leads = vec![
            lead("a@x.com", "Tokyo", "Retail", 90, false),
            lead("b@x.com", "Jakarta", "Tech", 55, true),
            lead("c@x.com", "Jakarta", "Tech", 80, true),
            lead("d@x.com", "Lima", "Retail", 20, false),
        ];
        let dashboard = build(leads, ALL, ALL);
        let order: Vec<&str> = dashboard.rows().iter().map(|r| r.lead.email.as_str()).collect();

        assert_eq!(order, vec!["c@x.com", "b@x.com", "a@x.com", "d@x.com"]);
        assert_eq!(dashboard.rows()[0].no, 1);
        assert_eq!(dashboard.rows()[3].no, 4);
    }

    #[test]
    fn test_filters_and_options() {
        let leads = vec![
            lead("a@x.com", "Tokyo", "Retail", 90, false),
            lead("b@x.com", "Jakarta", "Tech", 55, true),
            lead("c@x.com", "Jakarta", "Retail", 80, true),
        ];
        let dashboard = build(leads, "Jakarta", "Retail");

        assert_eq!(dashboard.rows().len(), 1);
        assert_eq!(dashboard.rows()[0].lead.email, "c@x.com");

        let page = dashboard.page(1);
        assert_eq!(page.city_options, vec!["All", "Jakarta", "Tokyo"]);
        assert_eq!(page.industry_options, vec!["All", "Retail", "Tech"]);
    }

    #[test]
    fn test_pagination_windows() {
        let leads: Vec<Lead> = (0..45)
            .map(|i| lead(&format!("{}@x.com", i), "Jakarta", "Tech", 100 - i, false))
            .collect();
        let dashboard = build(leads, ALL, ALL);

        assert_eq!(dashboard.total_pages(), 3);
        let last = dashboard.page(3);
        assert_eq!(last.rows.len(), 5);
        assert_eq!((last.showing_from, last.showing_to), (41, 45));

        // out of range pages clamp
        assert_eq!(dashboard.page(99).page, 3);
        assert_eq!(dashboard.page(0).page, 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = build(Vec::new(), ALL, ALL);
        let page = dashboard.page(1);

        assert_eq!(dashboard.total_pages(), 0);
        assert!(page.rows.is_empty());
        assert_eq!(page.showing_from, 0);
        assert_eq!(page.summary.average_score, 0.0);
    }

    #[test]
    fn test_summary_counts_targets() {
        let leads = vec![
            lead("a@x.com", "Jakarta", "Tech", 90, true),
            lead("b@x.com", "Jakarta", "Retail", 50, true),
            lead("c@x.com", "Tokyo", "Tech", 10, false),
        ];
        let summary = build(leads, ALL, ALL).summary();

        assert_eq!(summary.total_leads, 3);
        assert_eq!(summary.target_city_count, 2);
        assert_eq!(summary.target_industry_count, 2);
        assert!((summary.average_score - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_send_to_crm_only_visible_high_potential() {
        let mut leads: Vec<Lead> = (0..25)
            .map(|i| lead(&format!("{}@x.com", i), "Tokyo", "Retail", 40, false))
            .collect();
        leads.push(lead("hp@x.com", "Jakarta", "Tech", 90, true));
        let dashboard = build(leads, ALL, ALL);

        let first = dashboard.send_to_crm(1);
        assert_eq!(first.sent, 1);
        assert_eq!(first.leads[0].row.lead.email, "hp@x.com");
        assert_eq!(first.leads[0].crm_status, CRM_SENT_STATUS);

        assert_eq!(dashboard.send_to_crm(2).sent, 0);
    }
}
