/// Lead processing pipeline
///
/// Composes the stages in a fixed order over one in-memory collection:
/// 1. Deduplicate by email
/// 2. Narrow by city (queries only)
/// 3. Tag industries from positions, or by keyword
/// 4. Enrich missing attributes (optional, off by default)
/// 5. Score
/// 6. Tag "High Potential" leads
///
/// Enrichment only sees industries the position table left "General", so
/// the company name is a fallback and never overrides a position match.
use crate::config::Config;
use crate::enrichment::LeadEnricher;
use crate::errors::{AppError, ResultExt};
use crate::filter::{filter_value, LeadFilter};
use crate::models::Lead;
use crate::scorer::LeadScorer;
use crate::source::LeadSource;
use crate::tagger::{LeadTagger, TaggingMode};
use rand::Rng;

/// Query-time narrowing and tagging options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    /// Exact city match; `None` keeps every lead.
    pub city: Option<String>,
    pub tagging: TaggingMode,
}

#[derive(Debug, Clone)]
pub struct LeadPipeline {
    filter: LeadFilter,
    enricher: Option<LeadEnricher>,
    tagger: LeadTagger,
    scorer: LeadScorer,
}

impl LeadPipeline {
    pub fn new(enricher: Option<LeadEnricher>, tagger: LeadTagger, scorer: LeadScorer) -> Self {
        Self {
            filter: LeadFilter::new(),
            enricher,
            tagger,
            scorer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.enricher(), config.tagger(), config.scorer())
    }

    pub fn scorer(&self) -> &LeadScorer {
        &self.scorer
    }

    /// Runs the default pipeline: dedupe, tag industries, enrich, score,
    /// tag high-potential leads.
    pub fn run<R: Rng + ?Sized>(&self, leads: Vec<Lead>, rng: &mut R) -> Vec<Lead> {
        self.run_query(leads, &LeadQuery::default(), rng)
    }

    /// Runs the pipeline with query-time options. Keyword tagging replaces
    /// table-based industry tagging.
    pub fn run_query<R: Rng + ?Sized>(
        &self,
        leads: Vec<Lead>,
        query: &LeadQuery,
        rng: &mut R,
    ) -> Vec<Lead> {
        let fetched = leads.len();
        let mut leads = self.filter.deduplicate(leads);
        tracing::info!(
            "🔹 {} unique leads after deduplication ({} fetched)",
            leads.len(),
            fetched
        );

        let mut leads = self
            .filter
            .filter_by_location(leads, filter_value(query.city.as_deref()));
        if query.city.is_some() {
            tracing::info!("{} leads remain after city filter", leads.len());
        }

        self.tagger.tag(&mut leads, &query.tagging);
        if let Some(enricher) = &self.enricher {
            enricher.enrich_leads(&mut leads, rng);
        }
        self.scorer.apply(&mut leads);
        self.tagger.add_tag_high_potential(&mut leads);

        let high_potential = leads.iter().filter(|l| l.is_high_potential()).count();
        tracing::info!(
            "Pipeline complete: {} leads, {} high potential",
            leads.len(),
            high_potential
        );
        leads
    }

    /// Fetches `count` leads from `source` and runs the query pipeline.
    /// A fetch failure aborts the whole run.
    pub async fn fetch_and_run<R: Rng + ?Sized>(
        &self,
        source: &dyn LeadSource,
        count: usize,
        query: &LeadQuery,
        rng: &mut R,
    ) -> Result<Vec<Lead>, AppError> {
        let leads = source.fetch(count).await.context("Fetching leads")?;
        Ok(self.run_query(leads, query, rng))
    }
}
