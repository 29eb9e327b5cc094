//! MailGen Integration Tests
//!
//! End-to-end tests for the generation and delivery services.

use std::time::Duration;

/// Test configuration
pub struct TestConfig {
    pub generation_url: String,
    pub delivery_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            generation_url: "http://localhost:8090".to_string(),
            delivery_url: "http://localhost:8091".to_string(),
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Test: Full campaign flow from template selection to delivery
    #[tokio::test]
    #[ignore] // Requires running services
    async fn test_full_campaign_flow() {
        let config = TestConfig::default();
        let client = reqwest::Client::new();

        // Step 1: List templates and pick one
        let response = client
            .get(format!("{}/api/v1/templates", config.generation_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        // Step 2: Select the template for a campaign
        let response = client
            .post(format!("{}/api/v1/templates/select", config.generation_url))
            .json(&serde_json::json!({
                "templateId": "professional_partnership",
                "campaignId": "it-campaign-1",
                "isCustomized": false
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        // Step 3: Generate one email for the campaign
        let response = client
            .post(format!("{}/api/v1/emails/generate", config.generation_url))
            .json(&serde_json::json!({
                "prospect": { "email": "ana@acme.io", "name": "Ana", "company": "Acme" },
                "business": { "companyName": "FruitCo" },
                "campaignId": "it-campaign-1"
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let email: serde_json::Value = response.json().await.unwrap();
        assert!(!email["subject"].as_str().unwrap().is_empty());

        // Step 4: Hand the generated email to the delivery service
        let response = client
            .post(format!("{}/api/v1/emails/send", config.delivery_url))
            .json(&serde_json::json!({
                "campaignId": "it-campaign-1",
                "toName": "Ana",
                "email": email
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    /// Test: Unknown template id is rejected, never silently defaulted
    #[tokio::test]
    #[ignore]
    async fn test_unknown_template_is_rejected() {
        let config = TestConfig::default();
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/v1/templates/select", config.generation_url))
            .json(&serde_json::json!({
                "templateId": "no_such_template",
                "campaignId": "it-campaign-2"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }

    /// Test: Batch generation isolates per-prospect failures
    #[tokio::test]
    #[ignore]
    async fn test_batch_generation_counts() {
        let config = TestConfig::default();
        let client = reqwest::Client::new();

        let prospects: Vec<serde_json::Value> = (1..=5)
            .map(|i| {
                serde_json::json!({
                    "email": format!("person{}@company{}.com", i, i),
                    "preferredTemplate": if i == 3 { Some("no_such_template") } else { None }
                })
            })
            .collect();

        let response = client
            .post(format!(
                "{}/api/v1/emails/generate/batch",
                config.generation_url
            ))
            .json(&serde_json::json!({ "prospects": prospects }))
            .timeout(Duration::from_secs(60))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let report: serde_json::Value = response.json().await.unwrap();
        assert_eq!(report["total"], 5);
        assert_eq!(report["successful"], 4);
        assert_eq!(report["failed"], 1);
        assert_eq!(report["results"].as_array().unwrap().len(), 5);
    }

    /// Test: Preview renders customizations over defaults
    #[tokio::test]
    #[ignore]
    async fn test_template_preview() {
        let config = TestConfig::default();
        let client = reqwest::Client::new();

        let response = client
            .post(format!(
                "{}/api/v1/templates/modern_tech/preview",
                config.generation_url
            ))
            .json(&serde_json::json!({
                "customizations": { "subject": "Note for {company}" },
                "prospect": { "email": "ana@acme.io", "company": "Acme" }
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let preview: serde_json::Value = response.json().await.unwrap();
        assert_eq!(preview["subject"], "Note for Acme");
    }
}
