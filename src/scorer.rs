use crate::models::{Lead, HIGH_POTENTIAL_TAG};

pub const DEFAULT_BASE_SCORE: i32 = 10;
/// Scores are capped here; no floor is applied.
pub const MAX_SCORE: i32 = 100;

const TARGET_CITY_BONUS: i32 = 30;
const TARGET_INDUSTRY_BONUS: i32 = 40;
const LARGE_COMPANY_BONUS: i32 = 20;
const MEDIUM_COMPANY_BONUS: i32 = 10;
const HIGH_POTENTIAL_BONUS: i32 = 10;

/// Additive priority scoring over location, industry, company size and tags.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadScorer {
    target_cities: Vec<String>,
    target_industries: Vec<String>,
    base_score: i32,
}

impl LeadScorer {
    pub fn new(target_cities: Vec<String>, target_industries: Vec<String>, base_score: i32) -> Self {
        Self {
            target_cities,
            target_industries,
            base_score,
        }
    }

    pub fn target_cities(&self) -> &[String] {
        &self.target_cities
    }

    pub fn target_industries(&self) -> &[String] {
        &self.target_industries
    }

    /// Overwrites the score of every lead.
    ///
    /// A lead already tagged "High Potential" earns a bonus, so scoring the
    /// same lead again after tagging compounds.
    pub fn apply(&self, leads: &mut [Lead]) {
        for lead in leads.iter_mut() {
            lead.score = self.score(lead);
        }
        tracing::debug!("Scored {} leads", leads.len());
    }

    pub fn score(&self, lead: &Lead) -> i32 {
        let mut score = self.base_score;

        if self.target_cities.contains(&lead.location) {
            score += TARGET_CITY_BONUS;
        }

        if self.target_industries.contains(&lead.industry) {
            score += TARGET_INDUSTRY_BONUS;
        }

        score += match lead.company_size.as_str() {
            "Large" => LARGE_COMPANY_BONUS,
            "Medium" => MEDIUM_COMPANY_BONUS,
            _ => 0,
        };

        if lead.has_tag(HIGH_POTENTIAL_TAG) {
            score += HIGH_POTENTIAL_BONUS;
        }

        score.min(MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::CityCatalog;
    use crate::models::NewLead;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scorer(base_score: i32) -> LeadScorer {
        LeadScorer::new(vec!["Jakarta".to_string()], vec!["Tech".to_string()], base_score)
    }

    fn lead(location: &str, industry: &str, size: &str) -> Lead {
        NewLead::new("Test", "test@example.com")
            .location(location)
            .industry(industry)
            .company_size(size)
            .into_lead(&CityCatalog::default(), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_bonuses_are_additive() {
        let scorer = scorer(10);
        assert_eq!(scorer.score(&lead("Jakarta", "Tech", "Small")), 80);
        assert_eq!(scorer.score(&lead("Jakarta", "Retail", "Medium")), 50);
        assert_eq!(scorer.score(&lead("Tokyo", "Tech", "Large")), 70);
        assert_eq!(scorer.score(&lead("Tokyo", "Retail", "Small")), 10);
    }

    #[test]
    fn test_score_is_capped() {
        let mut leads = vec![lead("Jakarta", "Tech", "Large")];
        leads[0].add_tag(HIGH_POTENTIAL_TAG);

        scorer(10).apply(&mut leads);
        assert_eq!(leads[0].score, MAX_SCORE);
    }

    #[test]
    fn test_high_potential_bonus_compounds_on_rescoring() {
        let mut leads = vec![lead("Tokyo", "Tech", "Small")];
        let scorer = scorer(10);

        scorer.apply(&mut leads);
        assert_eq!(leads[0].score, 50);

        leads[0].add_tag(HIGH_POTENTIAL_TAG);
        scorer.apply(&mut leads);
        assert_eq!(leads[0].score, 60);
    }

    #[test]
    fn test_negative_base_is_not_floored() {
        let scorer = scorer(-50);
        assert_eq!(scorer.score(&lead("Tokyo", "Retail", "Small")), -50);
    }

    #[test]
    fn test_apply_overwrites_previous_score() {
        let mut leads = vec![lead("Tokyo", "Retail", "Small")];
        leads[0].score = 99;
        scorer(10).apply(&mut leads);
        assert_eq!(leads[0].score, 10);
    }
}
