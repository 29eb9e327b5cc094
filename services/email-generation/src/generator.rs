//! Personalized Email Generator
//!
//! Produces one subject + plain-text + HTML email per prospect. A caller
//! supplied inline template bypasses text generation entirely; otherwise the
//! prompt goes to the text-generation service and any failure there routes
//! to a canned fallback. Only structural errors (unknown pinned template,
//! empty rotation pool) surface to the caller.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{info, warn};

use mailgen_models::{
    BusinessContext, CampaignGoal, EmailOrigin, GeneratedEmail, InlineTemplate,
    PlaceholderBindings, Prospect, Template, TemplateCategory,
};
use mailgen_utils::{GenerationConfig, MailgenResult};

use crate::catalog::TemplateCatalog;
use crate::ollama_client::OllamaClient;
use crate::rotation::TemplateRotation;

const DEFAULT_SENDER_NAME: &str = "The Team";
const DEFAULT_CTA_TEXT: &str = "Learn More";

/// HTML envelope wrapped around generated or fallback paragraphs.
const ENVELOPE_TEMPLATE: &str = r#"<div style="font-family: 'Segoe UI', Arial, sans-serif; max-width: 600px; margin: 0 auto; background: #ffffff;"><div style="background: linear-gradient(135deg, #4338ca 0%, #7c3aed 100%); padding: 30px; text-align: center; color: white;"><h1 style="margin: 0; font-size: 24px;">{{companyName}}</h1></div><div style="padding: 30px; color: #333;">{{#each paragraphs}}<p style="margin-bottom: 15px; line-height: 1.6;">{{this}}</p>{{/each}}</div><div style="text-align: center; padding: 20px;"><a href="{{ctaUrl}}" style="display: inline-block; padding: 12px 30px; background: linear-gradient(135deg, #4338ca 0%, #7c3aed 100%); color: white; text-decoration: none; border-radius: 8px; font-weight: bold;">{{ctaText}}</a></div><div style="background: #f5f5f5; padding: 20px; text-align: center; color: #666;"><p style="margin: 0;">Best regards,<br><strong>{{senderName}}</strong><br>{{companyName}}</p></div></div>"#;

/// Canned body used when the text-generation service fails.
const FALLBACK_BODY_TEMPLATE: &str = "Dear {{prospectName}},\n\n\
I hope this message finds you well. I am reaching out from {{companyName}} because I believe we can help {{prospectCompany}} achieve remarkable results.\n\n\
Our AI-powered platform has helped similar companies:\n\
- Increase efficiency by 40%\n\
- Reduce operational costs by 25%\n\
- Improve customer satisfaction by 35%\n\n\
I would love to schedule a brief 15-minute call to discuss how {{companyName}} can support {{prospectCompany}} growth.\n\n\
Best regards,\n\
{{senderName}}\n\
{{companyName}}";

const SUBJECT_PATTERNS: usize = 5;

pub struct EmailGenerator {
    catalog: TemplateCatalog,
    client: OllamaClient,
    rotation: Mutex<TemplateRotation>,
    handlebars: Handlebars<'static>,
}

impl EmailGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            catalog: TemplateCatalog::new(),
            client: OllamaClient::new(config),
            rotation: Mutex::new(TemplateRotation::new()),
            handlebars: Handlebars::new(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Generate one email for a prospect.
    ///
    /// Never fails for text-generation reasons; the returned email's origin
    /// tag records which path produced it.
    pub async fn generate(
        &self,
        prospect: &Prospect,
        business: &BusinessContext,
        goal: CampaignGoal,
        category: Option<TemplateCategory>,
        inline: Option<&InlineTemplate>,
    ) -> MailgenResult<GeneratedEmail> {
        info!(recipient = %prospect.email, goal = %goal, "generating email");

        let sender_name = self.resolve_sender_name(prospect, business);
        let bindings = PlaceholderBindings::new(
            prospect.display_name(),
            prospect.company_label(),
            sender_name.clone(),
            business.company_name(),
        );

        // Fully custom user-built templates skip AI generation altogether.
        if let Some(inline) = inline {
            info!(recipient = %prospect.email, "using user-provided inline template");
            return Ok(self.from_inline_template(prospect, business, inline, &bindings, &sender_name));
        }

        let template_id = {
            let mut rotation = self.rotation.lock().await;
            rotation.select(
                prospect.preferred_template.as_deref(),
                true,
                category,
                &self.catalog,
            )?
        };
        // Unknown pinned ids are a configuration error, surfaced immediately.
        let template = self.catalog.lookup(&template_id)?.clone();

        let prompt = self.build_prompt(prospect, business, goal, &template);

        match self.client.generate(&prompt).await {
            Ok(raw) => {
                let body = clean_generated_content(&raw);
                if body.is_empty() {
                    warn!(recipient = %prospect.email, "generation returned empty content, using fallback");
                    return Ok(self
                        .fallback_email(prospect, business, &template_id, &sender_name)
                        .unwrap_or_else(|e| panic_free_fallback(prospect, &sender_name, business, e)));
                }

                let html = self
                    .assemble_html(&body, business, prospect, &sender_name)
                    .unwrap_or_else(|_| body.clone());
                let subject = self.next_subject(&prospect.company_label()).await;

                Ok(GeneratedEmail {
                    subject,
                    body,
                    html,
                    template_id: Some(template_id),
                    origin: EmailOrigin::AiPersonalized,
                    content_type: "html".to_string(),
                    recipient_email: prospect.email.clone(),
                    sender_name,
                    sender_email: self.resolve_sender_email(prospect, business),
                })
            }
            Err(error) => {
                warn!(recipient = %prospect.email, %error, "text generation failed, using fallback");
                Ok(self
                    .fallback_email(prospect, business, &template_id, &sender_name)
                    .unwrap_or_else(|e| panic_free_fallback(prospect, &sender_name, business, e)))
            }
        }
    }

    /// Substitute placeholders directly into caller-supplied markup.
    fn from_inline_template(
        &self,
        prospect: &Prospect,
        business: &BusinessContext,
        inline: &InlineTemplate,
        bindings: &PlaceholderBindings,
        sender_name: &str,
    ) -> GeneratedEmail {
        let html = bindings.substitute(&inline.html);
        let subject = bindings.substitute(
            inline
                .subject
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("Partnership Opportunity with {company}"),
        );

        GeneratedEmail {
            subject,
            body: html.clone(),
            html,
            template_id: None,
            origin: EmailOrigin::UserTemplate,
            content_type: "html".to_string(),
            recipient_email: prospect.email.clone(),
            sender_name: sender_name.to_string(),
            sender_email: self.resolve_sender_email(prospect, business),
        }
    }

    /// Natural-language instruction for the text-generation service.
    fn build_prompt(
        &self,
        prospect: &Prospect,
        business: &BusinessContext,
        goal: CampaignGoal,
        template: &Template,
    ) -> String {
        format!(
            "Write a professional business {goal} email.\n\n\
             RECIPIENT:\n\
             - Name: {name}\n\
             - Company: {company}\n\
             - Role: {role}\n\n\
             OUR COMPANY:\n\
             - Company: {sender_company}\n\
             - Industry: {industry}\n\
             - Product: {product}\n\n\
             Write a personalized email that:\n\
             1. Addresses {name} personally\n\
             2. References {company} business\n\
             3. Explains how {sender_company} can help them\n\
             4. Includes 2-3 specific benefits\n\
             5. Has a clear call-to-action\n\
             6. Is 150-200 words in exactly {paragraphs} paragraphs\n\n\
             Write the complete email body only. No subject line. Use real names.",
            goal = goal,
            name = prospect.display_name(),
            company = prospect.company_label(),
            role = prospect.role(),
            sender_company = business.company_name(),
            industry = business.industry(),
            product = business.main_product(),
            paragraphs = template.structure.paragraphs,
        )
    }

    /// Wrap cleaned paragraphs into the fixed HTML envelope.
    fn assemble_html(
        &self,
        content: &str,
        business: &BusinessContext,
        prospect: &Prospect,
        sender_name: &str,
    ) -> Result<String> {
        let paragraphs: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let (cta_text, cta_url) = self.resolve_cta(prospect, business);

        self.handlebars
            .render_template(
                ENVELOPE_TEMPLATE,
                &json!({
                    "companyName": business.company_name(),
                    "senderName": sender_name,
                    "paragraphs": paragraphs,
                    "ctaText": cta_text,
                    "ctaUrl": cta_url,
                }),
            )
            .context("Failed to render HTML envelope")
    }

    /// Subject line: fixed rotation through template strings parameterized
    /// by the prospect's company, sharing the template rotation counter.
    async fn next_subject(&self, prospect_company: &str) -> String {
        let index = {
            let mut rotation = self.rotation.lock().await;
            rotation.bump() % SUBJECT_PATTERNS
        };

        match index {
            0 => format!("Partnership Opportunity - {}", prospect_company),
            1 => format!("Quick question for {}", prospect_company),
            2 => format!("{}: Strategic collaboration?", prospect_company),
            3 => format!("Idea for {}", prospect_company),
            _ => format!("{} + AI = Growth?", prospect_company),
        }
    }

    /// Deterministic canned email filled from the same prospect/sender
    /// fields; used whenever the generation service fails.
    fn fallback_email(
        &self,
        prospect: &Prospect,
        business: &BusinessContext,
        template_id: &str,
        sender_name: &str,
    ) -> Result<GeneratedEmail> {
        let prospect_name = prospect
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "there".to_string());
        let prospect_company = prospect.company_label();

        let body = self
            .handlebars
            .render_template(
                FALLBACK_BODY_TEMPLATE,
                &json!({
                    "prospectName": prospect_name,
                    "prospectCompany": prospect_company,
                    "companyName": business.company_name(),
                    "senderName": sender_name,
                }),
            )
            .context("Failed to render fallback body")?;

        let html = self
            .assemble_html(&body, business, prospect, sender_name)
            .unwrap_or_else(|_| body.clone());

        Ok(GeneratedEmail {
            subject: format!("Partnership Opportunity - {}", prospect_company),
            body,
            html,
            template_id: Some(template_id.to_string()),
            origin: EmailOrigin::Fallback,
            content_type: "html".to_string(),
            recipient_email: prospect.email.clone(),
            sender_name: sender_name.to_string(),
            sender_email: self.resolve_sender_email(prospect, business),
        })
    }

    fn resolve_sender_name(&self, prospect: &Prospect, business: &BusinessContext) -> String {
        prospect
            .template_data
            .as_ref()
            .and_then(|d| d.sender_name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| business.sender_name())
            .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string())
    }

    fn resolve_sender_email(&self, prospect: &Prospect, business: &BusinessContext) -> String {
        prospect
            .template_data
            .as_ref()
            .and_then(|d| d.sender_email.clone())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| business.sender_email())
    }

    fn resolve_cta(&self, prospect: &Prospect, business: &BusinessContext) -> (String, String) {
        let data = prospect.template_data.as_ref();
        let text = data
            .and_then(|d| d.cta_text.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CTA_TEXT.to_string());
        let url = data
            .and_then(|d| d.cta_url.clone())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| business.website_url());
        (text, url)
    }
}

/// Post-process raw generated text: drop echoed `Subject:` lines, collapse
/// blank-line runs, trim. Lossy on purpose; legitimate content never needs
/// consecutive blank lines.
fn clean_generated_content(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.to_ascii_lowercase().starts_with("subject:") {
            continue;
        }

        let blank = trimmed.is_empty();
        if blank && (previous_blank || lines.is_empty()) {
            continue;
        }
        lines.push(if blank { "" } else { line });
        previous_blank = blank;
    }

    lines.join("\n").trim().to_string()
}

// Last-resort constructor when even handlebars rendering fails; produces a
// minimal plain-text email so the batch contract still holds.
fn panic_free_fallback(
    prospect: &Prospect,
    sender_name: &str,
    business: &BusinessContext,
    error: anyhow::Error,
) -> GeneratedEmail {
    warn!(%error, "fallback rendering failed, using minimal body");
    let body = format!(
        "Dear {},\n\nWe would love to connect about how {} can help {}.\n\nBest regards,\n{}",
        prospect.display_name(),
        business.company_name(),
        prospect.company_label(),
        sender_name,
    );
    GeneratedEmail {
        subject: format!("Partnership Opportunity - {}", prospect.company_label()),
        html: body.clone(),
        body,
        template_id: None,
        origin: EmailOrigin::Fallback,
        content_type: "text".to_string(),
        recipient_email: prospect.email.clone(),
        sender_name: sender_name.to_string(),
        sender_email: business.sender_email(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailgen_models::ProspectTemplateData;
    use mailgen_utils::GenerationConfig;

    fn unreachable_generator() -> EmailGenerator {
        EmailGenerator::new(&GenerationConfig {
            ollama_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        })
    }

    fn prospect() -> Prospect {
        let mut p = Prospect::new("ana@acme.io");
        p.name = Some("Ana".to_string());
        p.company = Some("Acme".to_string());
        p
    }

    fn business() -> BusinessContext {
        BusinessContext {
            company_name: Some("FruitCo".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_generated_content() {
        let raw = "Subject: Great news\n\n\nHello Ana,\n\n\n\nSecond paragraph.\n\n";
        assert_eq!(
            clean_generated_content(raw),
            "Hello Ana,\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_clean_keeps_single_blank_lines() {
        let raw = "One.\n\nTwo.";
        assert_eq!(clean_generated_content(raw), raw);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back() {
        let generator = unreachable_generator();

        let email = generator
            .generate(&prospect(), &business(), CampaignGoal::Partnership, None, None)
            .await
            .unwrap();

        assert_eq!(email.origin, EmailOrigin::Fallback);
        assert!(!email.subject.is_empty());
        assert!(!email.body.is_empty());
        assert!(email.body.contains("FruitCo"));
        assert!(email.html.contains("<div"));
        assert_eq!(email.recipient_email, "ana@acme.io");
    }

    #[tokio::test]
    async fn test_inline_template_bypasses_generation() {
        let generator = unreachable_generator();
        let inline = InlineTemplate {
            subject: Some("Hello {name} from {senderCompany}".to_string()),
            html: "<p>Hi {name} at {company}, this is {senderName} of {senderCompany}.</p>"
                .to_string(),
        };

        let email = generator
            .generate(
                &prospect(),
                &business(),
                CampaignGoal::Partnership,
                None,
                Some(&inline),
            )
            .await
            .unwrap();

        assert_eq!(email.origin, EmailOrigin::UserTemplate);
        for token in ["{name}", "{company}", "{senderName}", "{senderCompany}"] {
            assert!(!email.html.contains(token), "unsubstituted {}", token);
            assert!(!email.subject.contains(token), "unsubstituted {}", token);
        }
        assert!(email.html.contains("Ana"));
        assert!(email.html.contains("Acme"));
    }

    #[tokio::test]
    async fn test_unknown_pinned_template_propagates() {
        let generator = unreachable_generator();
        let mut pinned = prospect();
        pinned.preferred_template = Some("no_such_template".to_string());

        let err = generator
            .generate(&pinned, &business(), CampaignGoal::Partnership, None, None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "TEMPLATE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_per_prospect_cta_overrides() {
        let generator = unreachable_generator();
        let mut p = prospect();
        p.template_data = Some(ProspectTemplateData {
            cta_text: Some("Book a demo".to_string()),
            cta_url: Some("https://acme.example/demo".to_string()),
            ..Default::default()
        });

        let email = generator
            .generate(&p, &business(), CampaignGoal::Partnership, None, None)
            .await
            .unwrap();
        assert!(email.html.contains("Book a demo"));
        assert!(email.html.contains("https://acme.example/demo"));
    }
}
