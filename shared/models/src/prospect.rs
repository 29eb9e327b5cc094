//! Prospect Records
//!
//! Externally supplied recipient data; read-only to the generation core.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One campaign recipient. `email` is the unique key within a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Prospect {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub persona: Option<Persona>,
    /// Explicit template pin or category choice; always wins over rotation.
    #[serde(default)]
    pub preferred_template: Option<String>,
    /// Per-prospect sender/CTA overrides.
    #[serde(default)]
    pub template_data: Option<ProspectTemplateData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    #[serde(default)]
    pub estimated_role: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectTemplateData {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
}

impl Prospect {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            company: None,
            persona: None,
            preferred_template: None,
            template_data: None,
        }
    }

    /// Greeting name: explicit name, else the email local part with
    /// non-alphabetic characters blanked out, else "there".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let local = self.email.split('@').next().unwrap_or_default();
        let cleaned: String = local
            .chars()
            .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            "there".to_string()
        } else {
            cleaned.to_string()
        }
    }

    /// Company label: explicit company, else the first label of the email
    /// domain, else "your company".
    pub fn company_label(&self) -> String {
        if let Some(company) = self.company.as_deref().filter(|c| !c.is_empty()) {
            return company.to_string();
        }

        self.email
            .split('@')
            .nth(1)
            .and_then(|domain| domain.split('.').next())
            .filter(|label| !label.is_empty())
            .map(|label| label.to_string())
            .unwrap_or_else(|| "your company".to_string())
    }

    /// Estimated role for prompt construction; "Executive" when unknown.
    pub fn role(&self) -> String {
        self.persona
            .as_ref()
            .and_then(|p| p.estimated_role.clone())
            .unwrap_or_else(|| "Executive".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_explicit_name() {
        let mut prospect = Prospect::new("jane.doe42@techcorp.com");
        prospect.name = Some("Jane Doe".to_string());
        assert_eq!(prospect.display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_derived_from_email() {
        let prospect = Prospect::new("jane.doe42@techcorp.com");
        assert_eq!(prospect.display_name(), "jane doe");
    }

    #[test]
    fn test_display_name_falls_back_to_there() {
        let prospect = Prospect::new("12345@techcorp.com");
        assert_eq!(prospect.display_name(), "there");
    }

    #[test]
    fn test_company_label_derived_from_domain() {
        let prospect = Prospect::new("jane@techcorp.io");
        assert_eq!(prospect.company_label(), "techcorp");

        let mut prospect = Prospect::new("jane@techcorp.io");
        prospect.company = Some("TechCorp Industries".to_string());
        assert_eq!(prospect.company_label(), "TechCorp Industries");
    }

    #[test]
    fn test_email_validation() {
        let prospect = Prospect::new("not-an-email");
        assert!(prospect.validate().is_err());

        let prospect = Prospect::new("jane@techcorp.io");
        assert!(prospect.validate().is_ok());
    }
}
