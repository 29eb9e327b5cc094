//! Generation Service
//!
//! Core orchestration: template selection bookkeeping, previews, and the
//! single/batch generation entry points.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use validator::Validate;

use mailgen_models::{
    BatchReport, CustomComponent, CustomizationSet, GeneratedEmail, InlineTemplate,
    PlaceholderBindings, Prospect, TemplateCategory, TemplateConfig,
};
use mailgen_utils::{GenerationConfig, MailgenError, MailgenResult};

use crate::batch::BatchRunner;
use crate::catalog::{TemplateCatalog, CUSTOM_TEMPLATE_ID};
use crate::components::render_custom_template;
use crate::generator::EmailGenerator;
use crate::{
    GenerateBatchRequest, GenerateEmailRequest, PreviewResponse, SelectTemplateRequest,
    SelectionResponse, TemplateInfo,
};

/// Stored template selection for one campaign/workflow.
#[derive(Debug, Clone)]
struct StoredSelection {
    template_id: String,
    customized: bool,
    customizations: CustomizationSet,
    components: Vec<CustomComponent>,
    selected_at: String,
}

/// Generation service shared across handlers.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<EmailGenerator>,
    selections: Arc<RwLock<HashMap<String, StoredSelection>>>,
    batch_delay: Duration,
}

impl GenerationService {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            generator: Arc::new(EmailGenerator::new(config)),
            selections: Arc::new(RwLock::new(HashMap::new())),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
        }
    }

    fn catalog(&self) -> &TemplateCatalog {
        self.generator.catalog()
    }

    /// List catalog templates.
    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        self.catalog()
            .list()
            .iter()
            .map(|t| TemplateInfo {
                id: t.id.clone(),
                name: t.name.clone(),
                description: t.description.clone(),
                preview: t.preview.clone(),
                category: t.category,
                paragraphs: t.structure.paragraphs,
                components: t.structure.components.clone(),
            })
            .collect()
    }

    pub fn get_template(&self, template_id: &str) -> MailgenResult<mailgen_models::Template> {
        self.catalog().lookup(template_id).map(|t| t.clone())
    }

    /// Record a template selection for a campaign/workflow.
    ///
    /// Selection is mandatory and explicit: an unknown template id is an
    /// error, never silently replaced with a default.
    pub async fn select_template(
        &self,
        request: SelectTemplateRequest,
    ) -> MailgenResult<SelectionResponse> {
        let key = request
            .campaign_id
            .clone()
            .or_else(|| request.workflow_id.clone())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                MailgenError::validation("campaignId", "campaignId or workflowId is required")
            })?;

        let components = request
            .components
            .clone()
            .unwrap_or_else(|| request.customizations.custom_components());

        let template_name = if request.template_id == CUSTOM_TEMPLATE_ID {
            if components.is_empty() {
                return Err(MailgenError::validation(
                    "components",
                    "custom_template requires at least one component",
                ));
            }
            "Custom Template".to_string()
        } else {
            self.catalog().lookup(&request.template_id)?.name.clone()
        };

        let customized = request
            .is_customized
            .unwrap_or_else(|| !request.customizations.is_empty());

        let selection = StoredSelection {
            template_id: request.template_id.clone(),
            customized,
            customizations: request.customizations,
            components,
            selected_at: Utc::now().to_rfc3339(),
        };

        info!(campaign = %key, template = %selection.template_id, customized, "template selected");

        let selected_at = selection.selected_at.clone();
        let mut selections = self.selections.write().await;
        selections.insert(key.clone(), selection);

        Ok(SelectionResponse {
            template_id: request.template_id,
            template_name,
            campaign_key: key,
            is_customized: customized,
            selected_at,
        })
    }

    /// Render a preview of a template with customizations applied.
    pub fn preview(
        &self,
        template_id: &str,
        customizations: &CustomizationSet,
        prospect: Option<&Prospect>,
    ) -> MailgenResult<PreviewResponse> {
        let bindings = match prospect {
            Some(p) => PlaceholderBindings::new(
                p.display_name(),
                p.company_label(),
                "James Wilson",
                "Your Company",
            ),
            None => PlaceholderBindings::sample(),
        };

        if template_id == CUSTOM_TEMPLATE_ID {
            let components = customizations.custom_components();
            if components.is_empty() {
                return Err(MailgenError::validation(
                    "customComponents",
                    "custom_template preview requires components",
                ));
            }
            let html =
                render_custom_template(&components, &customizations.custom_media(), &bindings);
            let subject = bindings.substitute(
                &customizations.resolve_str("subject", "Partnership Opportunity with {company}"),
            );
            return Ok(PreviewResponse { subject, html });
        }

        let template = self.catalog().lookup(template_id)?;
        let config = TemplateConfig::resolve(template, customizations, &bindings);
        let html = bindings.substitute(&template.html);

        Ok(PreviewResponse {
            subject: config.subject,
            html,
        })
    }

    /// Generate one email, honoring any stored selection for the campaign.
    pub async fn generate(&self, request: GenerateEmailRequest) -> MailgenResult<GeneratedEmail> {
        request
            .prospect
            .validate()
            .map_err(|e| MailgenError::validation("prospect", e.to_string()))?;

        let business = request.business.unwrap_or_default();
        let goal = request.campaign_goal.unwrap_or_default();
        let category = parse_category(request.category.as_deref())?;

        let mut prospect = request.prospect;
        let mut inline = request.template;

        // A stored campaign selection pins the template unless the prospect
        // carries its own pin; a stored custom build becomes inline markup.
        if inline.is_none() {
            if let Some(key) = request.campaign_id.as_deref().filter(|k| !k.is_empty()) {
                let selections = self.selections.read().await;
                if let Some(selection) = selections.get(key) {
                    if selection.template_id == CUSTOM_TEMPLATE_ID {
                        let bindings = PlaceholderBindings::new(
                            prospect.display_name(),
                            prospect.company_label(),
                            "{senderName}",
                            "{senderCompany}",
                        );
                        // Substitute prospect tokens now; sender tokens pass
                        // through for the generator to resolve.
                        let html = render_custom_template(
                            &selection.components,
                            &selection.customizations.custom_media(),
                            &bindings,
                        );
                        inline = Some(InlineTemplate {
                            subject: selection.customizations.resolve("subject").and_then(
                                |v| v.as_str().map(|s| s.to_string()),
                            ),
                            html,
                        });
                    } else if prospect.preferred_template.is_none() {
                        prospect.preferred_template = Some(selection.template_id.clone());
                    }
                }
            }
        }

        self.generator
            .generate(&prospect, &business, goal, category, inline.as_ref())
            .await
    }

    /// Generate emails for a prospect list, sequentially.
    pub async fn generate_batch(&self, request: GenerateBatchRequest) -> MailgenResult<BatchReport> {
        if request.prospects.is_empty() {
            return Err(MailgenError::validation("prospects", "prospect list is empty"));
        }
        for prospect in &request.prospects {
            prospect
                .validate()
                .map_err(|e| MailgenError::validation(&prospect.email, e.to_string()))?;
        }

        let business = request.business.unwrap_or_default();
        let goal = request.campaign_goal.unwrap_or_default();
        let category = parse_category(request.category.as_deref())?;

        let runner = BatchRunner::new(&self.generator, self.batch_delay);
        Ok(runner
            .run(&request.prospects, &business, goal, category)
            .await)
    }
}

fn parse_category(raw: Option<&str>) -> MailgenResult<Option<TemplateCategory>> {
    match raw.filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(raw) => TemplateCategory::parse(raw)
            .map(Some)
            .ok_or_else(|| MailgenError::rotation(format!("unknown template category '{}'", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> GenerationService {
        GenerationService::new(&GenerationConfig {
            ollama_url: "http://127.0.0.1:1".to_string(),
            batch_delay_ms: 1,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_select_unknown_template_is_rejected() {
        let request: SelectTemplateRequest = serde_json::from_value(json!({
            "templateId": "no_such_template",
            "campaignId": "c-1"
        }))
        .unwrap();

        let err = service().select_template(request).await.unwrap_err();
        assert_eq!(err.error_code(), "TEMPLATE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_select_requires_campaign_key() {
        let request: SelectTemplateRequest = serde_json::from_value(json!({
            "templateId": "modern_tech"
        }))
        .unwrap();

        let err = service().select_template(request).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_selection_pins_generation_template() {
        let service = service();
        let request: SelectTemplateRequest = serde_json::from_value(json!({
            "templateId": "event_invitation",
            "campaignId": "c-1",
            "headerTitle": "Custom Header"
        }))
        .unwrap();
        let response = service.select_template(request).await.unwrap();
        assert!(response.is_customized);

        let email = service
            .generate(
                serde_json::from_value(json!({
                    "prospect": { "email": "ana@acme.io", "name": "Ana", "company": "Acme" },
                    "campaignId": "c-1"
                }))
                .unwrap(),
            )
            .await
            .unwrap();

        // Generation falls back (unreachable LLM) but keeps the pinned id.
        assert_eq!(email.template_id.as_deref(), Some("event_invitation"));
    }

    #[tokio::test]
    async fn test_custom_template_selection_generates_user_template() {
        let service = service();
        let request: SelectTemplateRequest = serde_json::from_value(json!({
            "templateId": "custom_template",
            "campaignId": "c-2",
            "components": [
                { "id": "b1", "type": "banner", "properties": { "title": "Hello {name}" } },
                { "id": "p1", "type": "paragraph", "properties": { "text": "From {senderCompany}." } }
            ]
        }))
        .unwrap();
        service.select_template(request).await.unwrap();

        let email = service
            .generate(
                serde_json::from_value(json!({
                    "prospect": { "email": "ana@acme.io", "name": "Ana" },
                    "business": { "companyName": "FruitCo" },
                    "campaignId": "c-2"
                }))
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(email.origin, mailgen_models::EmailOrigin::UserTemplate);
        assert!(email.html.contains("Hello Ana"));
        assert!(email.html.contains("From FruitCo."));
    }

    #[test]
    fn test_preview_applies_customizations() {
        let service = service();
        let set: CustomizationSet =
            serde_json::from_value(json!({ "subject": "Note for {company}" })).unwrap();

        let preview = service.preview("modern_tech", &set, None).unwrap();
        assert_eq!(preview.subject, "Note for TechCorp Industries");
        assert!(preview.html.contains("TechCorp Industries"));
        assert!(!preview.html.contains("{company}"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = parse_category(Some("nonexistent")).unwrap_err();
        assert_eq!(err.error_code(), "ROTATION_ERROR");
    }
}
