//! Customization Resolution
//!
//! A customization set layers user overrides on top of template defaults.
//! Two wire shapes are supported at once: flat (`{"headerTitle": ...}`) and
//! nested (`{"customizations": {"headerTitle": ...}}`). Every field lookup
//! honors the order flat > nested > template default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::placeholder::PlaceholderBindings;
use crate::template::{CustomComponent, CustomMedia, Template};

/// User overrides for a template selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomizationSet {
    /// Nested layer, as sent by clients that wrap overrides in a
    /// `customizations` object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Map<String, Value>>,
    /// Flat layer: every other top-level field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CustomizationSet {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self
                .customizations
                .as_ref()
                .map(|c| c.is_empty())
                .unwrap_or(true)
    }

    /// First defined value for `field`, walking the ordered sources:
    /// flat layer, then nested layer. Template defaults are the caller's
    /// fallback.
    pub fn resolve(&self, field: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(field) {
            return Some(value);
        }
        self.customizations.as_ref().and_then(|c| c.get(field))
    }

    /// Resolve `field` as a string, falling back to `fallback`.
    pub fn resolve_str(&self, field: &str, fallback: &str) -> String {
        match self.resolve(field) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => fallback.to_string(),
        }
    }

    /// Ordered custom media records, if any.
    pub fn custom_media(&self) -> Vec<CustomMedia> {
        self.resolve("customMedia")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    /// Ordered custom component records, if any.
    pub fn custom_components(&self) -> Vec<CustomComponent> {
        self.resolve("customComponents")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

/// Fully resolved render configuration for one template + customization set.
///
/// This is the single path to every field the renderers consume, so partial
/// customization degrades to template defaults field by field. Text fields
/// are placeholder-substituted; colors and sizes are passed through as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub subject: String,
    pub greeting: String,
    pub signature: String,
    pub logo: String,
    pub header_title: String,
    pub main_heading: String,
    pub button_text: String,
    pub button_url: String,
    pub primary_color: String,
    pub accent_color: String,
    pub testimonial_text: String,
    pub testimonial_author: String,

    // Text styling. The aliased fields (fontSize, bodyTextSize, greetingSize,
    // signatureSize) resolve under their own keys but default to the resolved
    // underlying textSize value: aliasing is default-sharing, not identity.
    pub text_size: String,
    pub text_color: String,
    pub font_weight: String,
    pub font_style: String,
    pub font_size: String,
    pub body_text_size: String,
    pub greeting_size: String,
    pub signature_size: String,
}

impl TemplateConfig {
    pub fn resolve(
        template: &Template,
        set: &CustomizationSet,
        bindings: &PlaceholderBindings,
    ) -> Self {
        let d = &template.defaults;
        let text = |field: &str, fallback: &str| bindings.substitute(&set.resolve_str(field, fallback));
        let raw = |field: &str, fallback: &str| set.resolve_str(field, fallback);

        let text_size = raw("textSize", "16px");
        // Greeting text is a step larger by default, but still follows an
        // explicit textSize override.
        let greeting_base = raw("textSize", "18px");
        let text_color = raw("textColor", "#000000");
        let font_weight = raw("fontWeight", "normal");
        let font_style = raw("fontStyle", "normal");
        let primary_color = raw("primaryColor", "#10b981");

        Self {
            subject: text("subject", &d.subject),
            greeting: text("greeting", &d.greeting),
            signature: text("signature", &d.signature),
            logo: raw("logo", ""),
            header_title: text("headerTitle", &d.header_title),
            main_heading: text("mainHeading", &d.main_heading),
            button_text: text("buttonText", &d.button_text),
            button_url: raw("buttonUrl", &d.button_url),
            accent_color: raw("accentColor", "#047857"),
            testimonial_text: text("testimonialText", &d.testimonial_text),
            testimonial_author: text("testimonialAuthor", &d.testimonial_author),
            font_size: raw("fontSize", &text_size),
            body_text_size: raw("bodyTextSize", &text_size),
            greeting_size: raw("greetingSize", &greeting_base),
            signature_size: raw("signatureSize", &text_size),
            text_size,
            text_color,
            font_weight,
            font_style,
            primary_color,
        }
    }
}
