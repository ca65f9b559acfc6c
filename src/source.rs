use crate::circuit_breaker::{create_source_circuit_breaker, SourceCircuitBreaker};
use crate::cities::CityCatalog;
use crate::errors::AppError;
use crate::models::{Lead, NewLead, RandomUser, RandomUserResponse};
use async_trait::async_trait;
use failsafe::futures::CircuitBreaker;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

const COMPANIES: &[&str] = &[
    "TechNova",
    "Innova Solutions",
    "Caprae Finance",
    "HealthPlus",
    "EduSmart",
    "RetailCo",
    "Global Trade Inc.",
    "FinTech Global",
    "DataWorks",
];

const POSITIONS: &[&str] = &[
    "Software Engineer",
    "Data Analyst",
    "Product Manager",
    "Sales Executive",
    "Marketing Specialist",
    "HR Manager",
    "Consultant",
];

const INDUSTRIES: &[&str] = &[
    "Tech",
    "Finance",
    "Healthcare",
    "Education",
    "Retail",
    "Consulting",
    "Other",
];

const COMPANY_SIZES: &[&str] = &["Small", "Medium", "Large"];

/// Supplier of freshly constructed leads.
///
/// A failed fetch is fatal for the run that requested it; implementations
/// do not retry.
#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Returns up to `count` leads with at least `name` and `email` populated.
    async fn fetch(&self, count: usize) -> Result<Vec<Lead>, AppError>;
}

/// Client for the randomuser.me API.
///
/// The API only provides people, so company, position, industry and company
/// size are sampled from fixed lists to produce synthetic leads.
pub struct RandomUserSource {
    client: reqwest::Client,
    base_url: String,
    cities: Arc<CityCatalog>,
    rng_seed: Option<u64>,
    circuit_breaker: SourceCircuitBreaker,
}

impl RandomUserSource {
    /// Creates a new `RandomUserSource`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API, e.g. `https://randomuser.me/api`.
    /// * `cities` - Reference list used to validate or replace upstream cities.
    /// * `rng_seed` - Fixed seed for attribute sampling; entropy when `None`.
    pub fn new(
        base_url: impl Into<String>,
        cities: Arc<CityCatalog>,
        rng_seed: Option<u64>,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create source client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cities,
            rng_seed,
            circuit_breaker: create_source_circuit_breaker(),
        })
    }

    async fn request_users(&self, count: usize) -> Result<Vec<RandomUser>, AppError> {
        let url = format!("{}/", self.base_url);
        tracing::info!("Fetching {} users from {}", count, url);

        let response = self
            .client
            .get(&url)
            .query(&[("results", count)])
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Source request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Source returned error {}: {}", status, error_text);
            return Err(AppError::ExternalApiError(format!(
                "Source returned status {}: {}",
                status, error_text
            )));
        }

        let body: RandomUserResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse source response: {}", e))
        })?;

        Ok(body.results)
    }

    fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[async_trait]
impl LeadSource for RandomUserSource {
    async fn fetch(&self, count: usize) -> Result<Vec<Lead>, AppError> {
        let users = match self.circuit_breaker.call(self.request_users(count)).await {
            Ok(users) => users,
            Err(failsafe::Error::Inner(e)) => return Err(e),
            Err(failsafe::Error::Rejected) => {
                tracing::warn!("Source circuit breaker is open, skipping fetch");
                return Err(AppError::ExternalApiError(
                    "Source temporarily unavailable (circuit open)".to_string(),
                ));
            }
        };

        let mut rng = self.rng();
        let leads: Vec<Lead> = users
            .into_iter()
            .take(count)
            .map(|user| synthesize_lead(user, &self.cities, &mut rng))
            .collect();

        tracing::info!("📥 {} leads fetched", leads.len());
        Ok(leads)
    }
}

/// Builds a lead from an upstream user, replacing cities unknown to the
/// catalog with a sampled one and sampling the business attributes.
pub fn synthesize_lead<R: Rng + ?Sized>(user: RandomUser, cities: &CityCatalog, rng: &mut R) -> Lead {
    let city = user.location.city;
    let location = if cities.contains(&city) {
        Some(city)
    } else {
        cities.sample(rng).map(str::to_string)
    };

    let mut new_lead = NewLead::new(
        format!("{} {}", user.name.first, user.name.last),
        user.email,
    );
    new_lead.company = pick(COMPANIES, rng);
    new_lead.position = pick(POSITIONS, rng);
    new_lead.location = location;
    new_lead.industry = pick(INDUSTRIES, rng);
    new_lead.company_size = pick(COMPANY_SIZES, rng);

    new_lead.into_lead(cities, rng)
}

fn pick<R: Rng + ?Sized>(choices: &[&str], rng: &mut R) -> Option<String> {
    choices.choose(rng).map(|choice| choice.to_string())
}
