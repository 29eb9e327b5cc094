//! Batch Generation
//!
//! Drives the generator over a prospect list, strictly sequentially, with a
//! fixed pause between calls to respect the text-generation service's
//! assumed rate limit. One prospect's failure never aborts the batch; no
//! retries happen at this layer.

use std::time::Duration;

use tracing::info;

use mailgen_models::{BatchReport, BusinessContext, CampaignGoal, Prospect, ProspectResult, TemplateCategory};

use crate::generator::EmailGenerator;

pub struct BatchRunner<'a> {
    generator: &'a EmailGenerator,
    delay: Duration,
}

impl<'a> BatchRunner<'a> {
    pub fn new(generator: &'a EmailGenerator, delay: Duration) -> Self {
        Self { generator, delay }
    }

    /// Generate emails for every prospect, in input order.
    pub async fn run(
        &self,
        prospects: &[Prospect],
        business: &BusinessContext,
        goal: CampaignGoal,
        category: Option<TemplateCategory>,
    ) -> BatchReport {
        info!(total = prospects.len(), "starting batch generation");

        let mut results = Vec::with_capacity(prospects.len());

        for (i, prospect) in prospects.iter().enumerate() {
            info!(
                position = i + 1,
                total = prospects.len(),
                recipient = %prospect.email,
                "generating"
            );

            match self
                .generator
                .generate(prospect, business, goal, category, None)
                .await
            {
                Ok(email) => results.push(ProspectResult {
                    email: prospect.email.clone(),
                    success: true,
                    generated: Some(email),
                    error: None,
                }),
                Err(error) => results.push(ProspectResult {
                    email: prospect.email.clone(),
                    success: false,
                    generated: None,
                    error: Some(error.to_string()),
                }),
            }

            if i + 1 < prospects.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let successful = results.iter().filter(|r| r.success).count();
        let report = BatchReport {
            total: prospects.len(),
            successful,
            failed: prospects.len() - successful,
            results,
        };

        info!(
            successful = report.successful,
            failed = report.failed,
            "batch generation complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailgen_models::EmailOrigin;
    use mailgen_utils::GenerationConfig;

    fn unreachable_generator() -> EmailGenerator {
        EmailGenerator::new(&GenerationConfig {
            ollama_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        })
    }

    fn prospects() -> Vec<Prospect> {
        (1..=5)
            .map(|i| {
                let mut p = Prospect::new(format!("person{}@company{}.com", i, i));
                p.name = Some(format!("Person {}", i));
                p.company = Some(format!("Company{}", i));
                p
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_isolates_per_prospect_failures() {
        let generator = unreachable_generator();
        let runner = BatchRunner::new(&generator, Duration::from_millis(1));

        let mut prospects = prospects();
        // Force one prospect to fail with a configuration error.
        prospects[2].preferred_template = Some("no_such_template".to_string());

        let report = runner
            .run(
                &prospects,
                &BusinessContext::default(),
                CampaignGoal::Partnership,
                None,
            )
            .await;

        assert_eq!(report.total, 5);
        assert_eq!(report.successful, 4);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results.len(), 5);

        // Results stay in input order; the failed record keeps its slot.
        for (i, result) in report.results.iter().enumerate() {
            assert_eq!(result.email, prospects[i].email);
        }
        assert!(!report.results[2].success);
        assert!(report.results[2].error.as_deref().unwrap().contains("no_such_template"));
        assert!(report.results[2].generated.is_none());
    }

    #[tokio::test]
    async fn test_batch_counts_fallback_emails_as_success() {
        let generator = unreachable_generator();
        let runner = BatchRunner::new(&generator, Duration::from_millis(1));

        let report = runner
            .run(
                &prospects()[..2],
                &BusinessContext::default(),
                CampaignGoal::Partnership,
                None,
            )
            .await;

        assert_eq!(report.successful, 2);
        for result in &report.results {
            let email = result.generated.as_ref().unwrap();
            assert_eq!(email.origin, EmailOrigin::Fallback);
            assert!(!email.subject.is_empty());
        }
    }
}
