//! Generated Email Types
//!
//! Campaign context going into generation and the immutable email object
//! coming out of it.

use serde::{Deserialize, Serialize};

/// Sender identity attached to a business context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderInfo {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
}

/// Shared sender/business context for a campaign run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub main_product: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub sender_info: Option<SenderInfo>,
}

impl BusinessContext {
    pub fn company_name(&self) -> String {
        self.company_name
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Your Company".to_string())
    }

    pub fn industry(&self) -> String {
        self.industry
            .clone()
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| "technology".to_string())
    }

    pub fn main_product(&self) -> String {
        self.main_product
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "AI-powered solutions".to_string())
    }

    pub fn website_url(&self) -> String {
        self.website_url
            .clone()
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| "https://yourcompany.com".to_string())
    }

    pub fn sender_name(&self) -> Option<String> {
        self.sender_info
            .as_ref()
            .and_then(|s| s.sender_name.clone())
            .filter(|n| !n.is_empty())
    }

    pub fn sender_email(&self) -> String {
        self.sender_info
            .as_ref()
            .and_then(|s| s.sender_email.clone())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "contact@company.com".to_string())
    }
}

/// Campaign goal tag steering tone and CTA framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CampaignGoal {
    #[default]
    Partnership,
    ColdOutreach,
    ProductLaunch,
    EventInvite,
}

impl std::fmt::Display for CampaignGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Partnership => write!(f, "partnership"),
            Self::ColdOutreach => write!(f, "cold_outreach"),
            Self::ProductLaunch => write!(f, "product_launch"),
            Self::EventInvite => write!(f, "event_invite"),
        }
    }
}

/// Which path produced an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailOrigin {
    AiPersonalized,
    UserTemplate,
    Fallback,
}

impl std::fmt::Display for EmailOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AiPersonalized => write!(f, "ai_personalized"),
            Self::UserTemplate => write!(f, "user_template"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Ready-made template supplied by the caller; bypasses text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineTemplate {
    #[serde(default)]
    pub subject: Option<String>,
    pub html: String,
}

/// One generated email. Created once per prospect per generation call and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEmail {
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    pub html: String,
    /// Catalog template id this email was built from, when one was used.
    pub template_id: Option<String>,
    #[serde(rename = "template_used")]
    pub origin: EmailOrigin,
    pub content_type: String,
    pub recipient_email: String,
    pub sender_name: String,
    pub sender_email: String,
}

/// Per-prospect outcome within a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectResult {
    pub email: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedEmail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate outcome of a batch run; `results` preserves input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<ProspectResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_wire_format() {
        assert_eq!(
            serde_json::to_string(&EmailOrigin::AiPersonalized).unwrap(),
            "\"ai_personalized\""
        );
        assert_eq!(EmailOrigin::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_business_context_fallbacks() {
        let ctx = BusinessContext::default();
        assert_eq!(ctx.company_name(), "Your Company");
        assert_eq!(ctx.website_url(), "https://yourcompany.com");
        assert_eq!(ctx.sender_name(), None);

        let ctx = BusinessContext {
            company_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(ctx.company_name(), "Your Company");
    }
}
