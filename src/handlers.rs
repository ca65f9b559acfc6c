use crate::config::Config;
use crate::dashboard::{CrmDispatch, Dashboard, DashboardPage};
use crate::errors::AppError;
use crate::filter::filter_value;
use crate::models::*;
use crate::pipeline::{LeadPipeline, LeadQuery};
use crate::source::LeadSource;
use crate::tagger::TaggingMode;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::num::IntErrorKind;
use std::sync::Arc;

pub const DEFAULT_LEADS_LIMIT: usize = 20;
pub const MAX_LEADS_LIMIT: usize = 500;
pub const DEFAULT_DASHBOARD_LIMIT: usize = 200;
pub const MAX_DASHBOARD_LIMIT: usize = 1000;

/// Shared application state injected into handlers.
///
/// Holds configuration only; each request runs its own pipeline over its
/// own lead collection.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Upstream lead source.
    pub source: Arc<dyn LeadSource>,
    /// Stage configuration shared by every run.
    pub pipeline: LeadPipeline,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn LeadSource>) -> Self {
        let pipeline = LeadPipeline::from_config(&config);
        Self {
            config,
            source,
            pipeline,
        }
    }
}

/// Unmetered routes: service info, health and docs.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/docs", get(docs))
}

/// Routes that fetch from the upstream source on every call.
pub fn pipeline_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/leads", get(get_leads))
        .route("/api/v1/dashboard", get(get_dashboard))
        .route("/api/v1/dashboard/crm", post(send_dashboard_to_crm))
}

/// Root endpoint with service info and links.
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "🚀 Lead Scraper API is running",
        "docs": "/docs",
        "endpoints": {
            "health": "/health",
            "leads": "/api/v1/leads?limit=20&city=Jakarta&tag_keyword=Tech",
            "dashboard": "/api/v1/dashboard?city=All&industry=All&page=1",
        },
    }))
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Lightweight endpoint documentation.
pub async fn docs() -> Json<serde_json::Value> {
    Json(json!({
        "title": "Lead Scraper API",
        "endpoints": [
            {
                "path": "/",
                "method": "GET",
                "desc": "API info and links.",
                "params": [],
            },
            {
                "path": "/health",
                "method": "GET",
                "desc": "Health check.",
                "params": [],
                "response_example": { "status": "ok" },
            },
            {
                "path": "/api/v1/leads",
                "method": "GET",
                "desc": "Fetch leads from the Random User API, process them, optionally filter by city and tag by keyword.",
                "params": [
                    { "name": "limit", "type": "int", "required": false, "default": DEFAULT_LEADS_LIMIT, "max": MAX_LEADS_LIMIT, "desc": "Number of leads to fetch." },
                    { "name": "city", "type": "str", "required": false, "example": "Jakarta", "desc": "Exact city filter." },
                    { "name": "tag_keyword", "type": "str", "required": false, "example": "Tech", "desc": "Tag leads whose company contains this keyword with '<keyword> Industry'." },
                ],
            },
            {
                "path": "/api/v1/dashboard",
                "method": "GET",
                "desc": "Ordered, filtered and paginated lead view with summary metrics.",
                "params": [
                    { "name": "limit", "type": "int", "required": false, "default": DEFAULT_DASHBOARD_LIMIT, "max": MAX_DASHBOARD_LIMIT },
                    { "name": "city", "type": "str", "required": false, "default": "All" },
                    { "name": "industry", "type": "str", "required": false, "default": "All" },
                    { "name": "page", "type": "int", "required": false, "default": 1 },
                ],
            },
            {
                "path": "/api/v1/dashboard/crm",
                "method": "POST",
                "desc": "Simulate sending the High Potential leads visible on a dashboard page to a CRM.",
                "params": [
                    { "name": "page", "type": "int", "required": false, "default": 1 },
                ],
            },
        ],
    }))
}

/// GET /api/v1/leads
///
/// Fetch leads → process → optional city filter → optional keyword tagging.
pub async fn get_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeadsQueryParams>,
) -> Result<Json<LeadsResponse>, AppError> {
    let limit = parse_limit(
        params.limit.as_deref(),
        DEFAULT_LEADS_LIMIT,
        1,
        MAX_LEADS_LIMIT,
    );
    let city = normalize_str(params.city.as_deref());
    let tag_keyword = normalize_str(params.tag_keyword.as_deref());
    tracing::info!(
        "GET /leads - limit: {}, city: {:?}, tag_keyword: {:?}",
        limit,
        city,
        tag_keyword
    );

    let query = LeadQuery {
        city: city.clone(),
        tagging: TaggingMode::from_keyword(tag_keyword.as_deref()),
    };
    let mut rng = state.config.rng();
    let leads = state
        .pipeline
        .fetch_and_run(state.source.as_ref(), limit, &query, &mut rng)
        .await?;

    Ok(Json(LeadsResponse {
        meta: LeadsMeta {
            limit,
            count: leads.len(),
            city,
            tag_keyword,
            generated_at: Utc::now(),
        },
        data: leads.iter().map(LeadRecord::from).collect(),
    }))
}

/// GET /api/v1/dashboard
///
/// Runs the default pipeline and returns one dashboard page.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<DashboardPage>, AppError> {
    let page = parse_page(params.page.as_deref());
    let dashboard = build_dashboard(&state, &params).await?;
    Ok(Json(dashboard.page(page)))
}

/// POST /api/v1/dashboard/crm
///
/// Simulated CRM hand-off of the visible High Potential leads.
pub async fn send_dashboard_to_crm(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQueryParams>,
) -> Result<Json<CrmDispatch>, AppError> {
    let page = parse_page(params.page.as_deref());
    let dashboard = build_dashboard(&state, &params).await?;
    Ok(Json(dashboard.send_to_crm(page)))
}

async fn build_dashboard(
    state: &AppState,
    params: &DashboardQueryParams,
) -> Result<Dashboard, AppError> {
    let limit = parse_limit(
        params.limit.as_deref(),
        DEFAULT_DASHBOARD_LIMIT,
        1,
        MAX_DASHBOARD_LIMIT,
    );
    tracing::info!("Building dashboard - limit: {}, params: {:?}", limit, params);

    let mut rng = state.config.rng();
    let leads = state
        .pipeline
        .fetch_and_run(state.source.as_ref(), limit, &LeadQuery::default(), &mut rng)
        .await?;

    let scorer = state.pipeline.scorer();
    Ok(Dashboard::build(
        leads,
        filter_value(params.city.as_deref()),
        filter_value(params.industry.as_deref()),
        scorer.target_cities().first().cloned(),
        scorer.target_industries().first().cloned(),
    ))
}

// ----------------- Helpers -----------------

/// Parses an integer, clamping it into `[minimum, maximum]`.
/// Integers too large for `i64` clamp to the nearest bound; missing or
/// non-numeric input yields `default`.
pub fn parse_limit(value: Option<&str>, default: usize, minimum: usize, maximum: usize) -> usize {
    let Some(value) = value else {
        return default;
    };
    match value.trim().parse::<i64>() {
        Ok(parsed) => parsed.clamp(minimum as i64, maximum as i64) as usize,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => maximum,
            IntErrorKind::NegOverflow => minimum,
            _ => default,
        },
    }
}

fn parse_page(value: Option<&str>) -> usize {
    parse_limit(value, 1, 1, usize::MAX >> 1)
}

/// Trims input, treating empty strings as absent.
pub fn normalize_str(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
