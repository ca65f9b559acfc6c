use crate::enrichment::LeadEnricher;
use crate::scorer::{LeadScorer, DEFAULT_BASE_SCORE};
use crate::tagger::{IndustryTable, LeadTagger, DEFAULT_HIGH_POTENTIAL_THRESHOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

pub const DEFAULT_SOURCE_BASE_URL: &str = "https://randomuser.me/api";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub source_base_url: String,
    pub target_cities: Vec<String>,
    pub target_industries: Vec<String>,
    pub base_score: i32,
    pub high_potential_threshold: i32,
    pub fetch_count: usize,
    pub rng_seed: Option<u64>, // Unset = entropy-seeded sampling
    pub enrich_leads: bool,
    pub export_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            target_cities: vec!["Jakarta".to_string()],
            target_industries: vec!["Tech".to_string()],
            base_score: DEFAULT_BASE_SCORE,
            high_potential_threshold: DEFAULT_HIGH_POTENTIAL_THRESHOLD,
            fetch_count: 50,
            rng_seed: None,
            enrich_leads: false,
            export_dir: "output".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            source_base_url: std::env::var("SOURCE_BASE_URL")
                .unwrap_or(defaults.source_base_url)
                .trim()
                .trim_end_matches('/')
                .to_string(),
            target_cities: match std::env::var("TARGET_CITIES") {
                Ok(list) => parse_list(&list),
                Err(_) => defaults.target_cities,
            },
            target_industries: match std::env::var("TARGET_INDUSTRIES") {
                Ok(list) => parse_list(&list),
                Err(_) => defaults.target_industries,
            },
            base_score: std::env::var("BASE_SCORE")
                .ok()
                .map(|v| v.trim().parse::<i32>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("BASE_SCORE must be an integer"))?
                .unwrap_or(defaults.base_score),
            high_potential_threshold: std::env::var("HIGH_POTENTIAL_THRESHOLD")
                .ok()
                .map(|v| v.trim().parse::<i32>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("HIGH_POTENTIAL_THRESHOLD must be an integer"))?
                .unwrap_or(defaults.high_potential_threshold),
            fetch_count: std::env::var("FETCH_COUNT")
                .ok()
                .map(|v| v.trim().parse::<usize>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("FETCH_COUNT must be a positive number"))?
                .unwrap_or(defaults.fetch_count),
            rng_seed: std::env::var("RNG_SEED")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|v| v.trim().parse::<u64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("RNG_SEED must be an unsigned 64-bit integer"))?,
            enrich_leads: std::env::var("ENRICH_LEADS")
                .ok()
                .map(|v| parse_bool(&v))
                .transpose()?
                .unwrap_or(defaults.enrich_leads),
            export_dir: std::env::var("EXPORT_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.export_dir),
        };

        config.validate()?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Source Base URL: {}", config.source_base_url);
        tracing::debug!(
            "Targets: cities={:?} industries={:?} base_score={}",
            config.target_cities,
            config.target_industries,
            config.base_score
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.source_base_url.is_empty() {
            anyhow::bail!("SOURCE_BASE_URL cannot be empty");
        }
        if !self.source_base_url.starts_with("http://")
            && !self.source_base_url.starts_with("https://")
        {
            anyhow::bail!("SOURCE_BASE_URL must start with http:// or https://");
        }
        if self.fetch_count == 0 {
            anyhow::bail!("FETCH_COUNT must be at least 1");
        }
        Ok(())
    }

    /// Sampling source for one pipeline run.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn scorer(&self) -> LeadScorer {
        LeadScorer::new(
            self.target_cities.clone(),
            self.target_industries.clone(),
            self.base_score,
        )
    }

    pub fn tagger(&self) -> LeadTagger {
        LeadTagger::new(IndustryTable::default(), self.high_potential_threshold)
    }

    pub fn enricher(&self) -> Option<LeadEnricher> {
        self.enrich_leads.then(LeadEnricher::default)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("ENRICH_LEADS must be a boolean, got '{}'", other),
    }
}
