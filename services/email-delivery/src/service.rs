//! Delivery Service
//!
//! Hands generated emails to SMTP and keeps an in-memory delivery record
//! per campaign.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use mailgen_utils::SmtpConfig;

use crate::smtp_client::SmtpClient;
use crate::{DeliveryResponse, SendEmailRequest, SendEmailResponse};

/// Stored delivery record
#[derive(Debug, Clone)]
struct StoredDelivery {
    id: Uuid,
    campaign_id: Option<String>,
    recipient: String,
    subject: String,
    origin: String,
    status: String,
    detail: Option<String>,
    sent_at: String,
}

#[derive(Clone)]
pub struct DeliveryService {
    deliveries: Arc<RwLock<HashMap<Uuid, StoredDelivery>>>,
    smtp_client: Arc<SmtpClient>,
}

impl DeliveryService {
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            deliveries: Arc::new(RwLock::new(HashMap::new())),
            smtp_client: Arc::new(SmtpClient::new(config)),
        }
    }

    /// Send one generated email and record the outcome.
    ///
    /// Without SMTP credentials the delivery is recorded as simulated; the
    /// caller contract is identical either way.
    pub async fn send(&self, request: SendEmailRequest) -> Result<SendEmailResponse> {
        let email = request.email;
        let to_name = request
            .to_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.recipient_email.clone());

        let (status, detail) = if self.smtp_client.is_configured() {
            match self
                .smtp_client
                .send(
                    &email.recipient_email,
                    &to_name,
                    &email.subject,
                    &email.html,
                    &email.body,
                )
                .await
            {
                Ok(response) => ("sent".to_string(), Some(response)),
                Err(error) => {
                    warn!(recipient = %email.recipient_email, %error, "SMTP send failed");
                    ("failed".to_string(), Some(error.to_string()))
                }
            }
        } else {
            info!(recipient = %email.recipient_email, "SMTP not configured, recording simulated delivery");
            ("simulated".to_string(), None)
        };

        let delivery = StoredDelivery {
            id: Uuid::new_v4(),
            campaign_id: request.campaign_id.clone(),
            recipient: email.recipient_email.clone(),
            subject: email.subject.clone(),
            origin: email.origin.to_string(),
            status: status.clone(),
            detail,
            sent_at: chrono::Utc::now().to_rfc3339(),
        };

        let response = SendEmailResponse {
            delivery_id: delivery.id,
            recipient: delivery.recipient.clone(),
            subject: delivery.subject.clone(),
            status,
            sent_at: delivery.sent_at.clone(),
        };

        let mut deliveries = self.deliveries.write().await;
        deliveries.insert(delivery.id, delivery);

        Ok(response)
    }

    pub async fn get_delivery(&self, id: Uuid) -> Option<DeliveryResponse> {
        let deliveries = self.deliveries.read().await;
        deliveries.get(&id).map(to_response)
    }

    pub async fn campaign_deliveries(&self, campaign_id: &str) -> Vec<DeliveryResponse> {
        let deliveries = self.deliveries.read().await;
        deliveries
            .values()
            .filter(|d| d.campaign_id.as_deref() == Some(campaign_id))
            .map(to_response)
            .collect()
    }
}

fn to_response(delivery: &StoredDelivery) -> DeliveryResponse {
    DeliveryResponse {
        id: delivery.id,
        campaign_id: delivery.campaign_id.clone(),
        recipient: delivery.recipient.clone(),
        subject: delivery.subject.clone(),
        origin: delivery.origin.clone(),
        status: delivery.status.clone(),
        detail: delivery.detail.clone(),
        sent_at: delivery.sent_at.clone(),
    }
}
