//! MailGen Email Delivery Service
//!
//! Accepts generated emails and hands them to SMTP, keeping an in-memory
//! delivery record per campaign.

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
use uuid::Uuid;

use mailgen_models::GeneratedEmail;
use mailgen_utils::AppConfig;

mod service;
mod smtp_client;

use service::DeliveryService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    mailgen_utils::init_logging(&config.logging)?;
    info!("Starting MailGen Email Delivery Service");

    let service = DeliveryService::new(config.smtp.clone());

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/emails/send", post(send_email))
        .route("/api/v1/emails/:id", get(get_delivery))
        .route("/api/v1/emails/campaign/:campaign_id", get(campaign_deliveries))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8091));
    let listener = TcpListener::bind(&addr).await?;
    info!("Email Delivery Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "email-delivery",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Send email request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub to_name: Option<String>,
    pub email: GeneratedEmail,
}

/// Send email response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub delivery_id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub status: String,
    pub sent_at: String,
}

async fn send_email(
    State(service): State<DeliveryService>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, (StatusCode, String)> {
    let result = service
        .send(request)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(result))
}

/// Delivery record response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub id: Uuid,
    pub campaign_id: Option<String>,
    pub recipient: String,
    pub subject: String,
    pub origin: String,
    pub status: String,
    pub detail: Option<String>,
    pub sent_at: String,
}

async fn get_delivery(
    State(service): State<DeliveryService>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeliveryResponse>, (StatusCode, String)> {
    let delivery = service
        .get_delivery(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "Delivery not found".to_string()))?;

    Ok(Json(delivery))
}

async fn campaign_deliveries(
    State(service): State<DeliveryService>,
    Path(campaign_id): Path<String>,
) -> Json<Vec<DeliveryResponse>> {
    Json(service.campaign_deliveries(&campaign_id).await)
}
