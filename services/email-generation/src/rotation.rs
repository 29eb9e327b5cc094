//! Template Rotation
//!
//! Deterministic round-robin selection among catalog templates, spreading
//! variety across a campaign run. One counter per `TemplateRotation`
//! instance; the counter is shared across categories and also drives
//! subject-line rotation, so two campaign runs wanting independent rotation
//! must own independent instances.

use mailgen_models::TemplateCategory;
use mailgen_utils::{MailgenError, MailgenResult};

use crate::catalog::{TemplateCatalog, DEFAULT_TEMPLATE_ID};

/// Per-run rotation state: a single counter incremented once per
/// non-pinned selection.
///
/// Known constraint: a category filter changes the modulo base but not the
/// counter, so interleaving categories within one run skews the distribution.
/// Deliberately left as observed; see DESIGN.md.
#[derive(Debug, Default)]
pub struct TemplateRotation {
    index: usize,
}

impl TemplateRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value, for diagnostics.
    #[allow(dead_code)]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Return the counter and advance it. Subject-line rotation shares the
    /// template counter through this single increment point.
    pub fn bump(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }

    /// Pick the next template id.
    ///
    /// Explicit non-empty pins always win and do not consume a rotation
    /// slot. With rotation disabled the fixed default id is returned.
    /// Otherwise the counter indexes modulo the candidate list, optionally
    /// filtered to `category`.
    pub fn select(
        &mut self,
        explicit: Option<&str>,
        rotation_enabled: bool,
        category: Option<TemplateCategory>,
        catalog: &TemplateCatalog,
    ) -> MailgenResult<String> {
        if let Some(pinned) = explicit.filter(|p| !p.is_empty()) {
            return Ok(pinned.to_string());
        }

        if !rotation_enabled {
            return Ok(DEFAULT_TEMPLATE_ID.to_string());
        }

        let candidates = match category {
            Some(category) => catalog.ids_in_category(category),
            None => catalog.ids(),
        };

        if candidates.is_empty() {
            return Err(MailgenError::rotation(match category {
                Some(category) => format!("no templates available in category '{}'", category),
                None => "no templates available for rotation".to_string(),
            }));
        }

        let selected = candidates[self.bump() % candidates.len()].clone();
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_pin_wins() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();

        let selected = rotation
            .select(Some("event_invitation"), true, None, &catalog)
            .unwrap();
        assert_eq!(selected, "event_invitation");
        // Pins do not consume a rotation slot.
        assert_eq!(rotation.position(), 0);
    }

    #[test]
    fn test_disabled_rotation_returns_default() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();

        let selected = rotation.select(None, false, None, &catalog).unwrap();
        assert_eq!(selected, DEFAULT_TEMPLATE_ID);
        assert_eq!(rotation.position(), 0);
    }

    #[test]
    fn test_empty_pin_is_not_a_pin() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();

        let first = rotation.select(Some(""), true, None, &catalog).unwrap();
        assert_eq!(first, catalog.ids()[0]);
        assert_eq!(rotation.position(), 1);
    }

    #[test]
    fn test_even_distribution_over_full_cycles() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();
        let ids = catalog.ids();

        let rounds = 4;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..ids.len() * rounds {
            let selected = rotation.select(None, true, None, &catalog).unwrap();
            *counts.entry(selected).or_insert(0usize) += 1;
        }

        for id in &ids {
            assert_eq!(counts.get(id), Some(&rounds), "uneven count for {}", id);
        }
    }

    #[test]
    fn test_category_scoped_selection_uses_filtered_modulo() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();
        let partnership = catalog.ids_in_category(TemplateCategory::Partnership);

        for expected in partnership.iter().chain(partnership.iter()) {
            let selected = rotation
                .select(None, true, Some(TemplateCategory::Partnership), &catalog)
                .unwrap();
            assert_eq!(&selected, expected);
        }
    }

    #[test]
    fn test_counter_is_shared_across_categories() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();

        rotation.select(None, true, None, &catalog).unwrap();
        rotation.select(None, true, None, &catalog).unwrap();

        // Counter is at 2; the partnership pool has 3 entries, so the next
        // category-scoped pick lands on its third entry, not its first.
        let partnership = catalog.ids_in_category(TemplateCategory::Partnership);
        let selected = rotation
            .select(None, true, Some(TemplateCategory::Partnership), &catalog)
            .unwrap();
        assert_eq!(selected, partnership[2]);
    }

    #[test]
    fn test_empty_candidate_pool_is_an_error() {
        let empty = TemplateCatalog::with_templates(Vec::new());
        let mut rotation = TemplateRotation::new();

        let err = rotation.select(None, true, None, &empty).unwrap_err();
        assert!(matches!(err, MailgenError::Rotation { .. }));
        // The failed attempt must not advance the counter into a bad state.
        assert_eq!(rotation.position(), 0);
    }

    #[test]
    fn test_single_entry_pool_never_errors() {
        let catalog = TemplateCatalog::new();
        let mut rotation = TemplateRotation::new();

        // The event category has exactly one entry; selection holds for any
        // counter value.
        for _ in 0..5 {
            let selected = rotation
                .select(None, true, Some(TemplateCategory::Event), &catalog)
                .unwrap();
            assert_eq!(selected, "event_invitation");
        }
    }
}
