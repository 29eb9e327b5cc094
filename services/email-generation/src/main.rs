//! MailGen Email Generation Service
//!
//! Template catalog, customization, rotation, and personalized email
//! generation with deterministic fallback. Exposes the template selection
//! and generation HTTP API consumed by the campaign UI.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use mailgen_models::{
    BatchReport, BusinessContext, CampaignGoal, CustomComponent, CustomizationSet,
    GeneratedEmail, InlineTemplate, Prospect, Template, TemplateCategory,
};
use mailgen_utils::{AppConfig, ErrorResponse, MailgenError};

mod batch;
mod catalog;
mod components;
mod generator;
mod ollama_client;
mod rotation;
mod service;

use service::GenerationService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    mailgen_utils::init_logging(&config.logging)?;
    info!("Starting MailGen Email Generation Service");

    let service = GenerationService::new(&config.generation);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/templates", get(list_templates))
        .route("/api/v1/templates/select", post(select_template))
        .route("/api/v1/templates/:id", get(get_template))
        .route("/api/v1/templates/:id/preview", post(preview_template))
        .route("/api/v1/emails/generate", post(generate_email))
        .route("/api/v1/emails/generate/batch", post(generate_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(&addr).await?;
    info!("Email Generation Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "email-generation",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(error: MailgenError) -> ApiError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(error)))
}

/// Catalog summary entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview: String,
    pub category: TemplateCategory,
    pub paragraphs: usize,
    pub components: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateInfo>,
}

async fn list_templates(State(service): State<GenerationService>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: service.list_templates(),
    })
}

async fn get_template(
    State(service): State<GenerationService>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    service.get_template(&id).map(Json).map_err(api_error)
}

/// Template selection request. Customization fields arrive flattened beside
/// the routing fields, in both flat and nested shapes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    pub template_id: String,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub is_customized: Option<bool>,
    #[serde(default)]
    pub components: Option<Vec<CustomComponent>>,
    #[serde(flatten)]
    pub customizations: CustomizationSet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub template_id: String,
    pub template_name: String,
    pub campaign_key: String,
    pub is_customized: bool,
    pub selected_at: String,
}

async fn select_template(
    State(service): State<GenerationService>,
    Json(request): Json<SelectTemplateRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    service
        .select_template(request)
        .await
        .map(Json)
        .map_err(api_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub customizations: Option<CustomizationSet>,
    #[serde(default)]
    pub prospect: Option<Prospect>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub subject: String,
    pub html: String,
}

async fn preview_template(
    State(service): State<GenerationService>,
    Path(id): Path<String>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let customizations = request.customizations.unwrap_or_default();
    service
        .preview(&id, &customizations, request.prospect.as_ref())
        .map(Json)
        .map_err(api_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailRequest {
    pub prospect: Prospect,
    #[serde(default)]
    pub business: Option<BusinessContext>,
    #[serde(default)]
    pub campaign_goal: Option<CampaignGoal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    /// Ready-made template; bypasses text generation.
    #[serde(default)]
    pub template: Option<InlineTemplate>,
}

async fn generate_email(
    State(service): State<GenerationService>,
    Json(request): Json<GenerateEmailRequest>,
) -> Result<Json<GeneratedEmail>, ApiError> {
    service.generate(request).await.map(Json).map_err(api_error)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBatchRequest {
    pub prospects: Vec<Prospect>,
    #[serde(default)]
    pub business: Option<BusinessContext>,
    #[serde(default)]
    pub campaign_goal: Option<CampaignGoal>,
    #[serde(default)]
    pub category: Option<String>,
}

async fn generate_batch(
    State(service): State<GenerationService>,
    Json(request): Json<GenerateBatchRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    service
        .generate_batch(request)
        .await
        .map(Json)
        .map_err(api_error)
}
