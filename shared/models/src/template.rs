//! Template Catalog Types
//!
//! Immutable catalog entries plus the user-extensible custom component and
//! media records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coarse template grouping used for category-scoped rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Partnership,
    Product,
    Event,
}

impl TemplateCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "partnership" => Some(Self::Partnership),
            "product" => Some(Self::Product),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Partnership => write!(f, "partnership"),
            Self::Product => write!(f, "product"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Semantic layout of a template: how many generated paragraphs it expects
/// and which component sections it carries, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStructure {
    pub paragraphs: usize,
    pub components: Vec<String>,
}

/// Default copy for every customizable field of a template.
///
/// Values may carry `{token}` placeholders and the literal `\n` escape; both
/// are resolved by the substitution engine at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefaults {
    pub subject: String,
    pub greeting: String,
    pub signature: String,
    pub header_title: String,
    pub main_heading: String,
    pub button_text: String,
    pub button_url: String,
    pub testimonial_text: String,
    pub testimonial_author: String,
}

/// A pre-authored email template. Catalog entries are created at process
/// start from static data and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview: String,
    pub category: TemplateCategory,
    pub structure: TemplateStructure,
    pub defaults: TemplateDefaults,
    /// Instruction handed to the text-generation service for this layout.
    pub prompt: String,
    /// Raw markup with `{token}` placeholders.
    pub html: String,
}

/// Fixed set of insertion points for custom media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaAnchor {
    Start,
    Logo,
    Greeting,
    #[serde(rename = "paragraph-1")]
    Paragraph1,
    #[serde(rename = "paragraph-2")]
    Paragraph2,
    #[serde(rename = "paragraph-3")]
    Paragraph3,
    Cta,
    Testimonial,
    Signature,
    End,
}

impl MediaAnchor {
    /// 1-based paragraph index for the `paragraph-N` anchors.
    pub fn paragraph_index(&self) -> Option<usize> {
        match self {
            Self::Paragraph1 => Some(1),
            Self::Paragraph2 => Some(2),
            Self::Paragraph3 => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Logo => write!(f, "logo"),
            Self::Greeting => write!(f, "greeting"),
            Self::Paragraph1 => write!(f, "paragraph-1"),
            Self::Paragraph2 => write!(f, "paragraph-2"),
            Self::Paragraph3 => write!(f, "paragraph-3"),
            Self::Cta => write!(f, "cta"),
            Self::Testimonial => write!(f, "testimonial"),
            Self::Signature => write!(f, "signature"),
            Self::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// User-supplied media placed at a named anchor point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMedia {
    pub id: String,
    pub url: String,
    pub insert_after: MediaAnchor,
    /// CSS width, e.g. "400px".
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub alignment: MediaAlignment,
}

/// Fixed vocabulary of user-buildable template components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomComponentType {
    Logo,
    Greeting,
    Paragraph,
    Cta,
    Testimonial,
    Features,
    Stats,
    Countdown,
    Banner,
}

impl std::fmt::Display for CustomComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logo => write!(f, "logo"),
            Self::Greeting => write!(f, "greeting"),
            Self::Paragraph => write!(f, "paragraph"),
            Self::Cta => write!(f, "cta"),
            Self::Testimonial => write!(f, "testimonial"),
            Self::Features => write!(f, "features"),
            Self::Stats => write!(f, "stats"),
            Self::Countdown => write!(f, "countdown"),
            Self::Banner => write!(f, "banner"),
        }
    }
}

/// One block of a user-built template. `properties` is a type-specific map;
/// no uniqueness constraint beyond `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: CustomComponentType,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl CustomComponent {
    /// String property lookup, empty-string-as-missing.
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_wire_format() {
        let anchor: MediaAnchor = serde_json::from_str("\"paragraph-2\"").unwrap();
        assert_eq!(anchor, MediaAnchor::Paragraph2);
        assert_eq!(anchor.to_string(), "paragraph-2");
        assert_eq!(anchor.paragraph_index(), Some(2));

        let anchor: MediaAnchor = serde_json::from_str("\"signature\"").unwrap();
        assert_eq!(anchor, MediaAnchor::Signature);
        assert_eq!(anchor.paragraph_index(), None);
    }

    #[test]
    fn test_component_type_vocabulary() {
        for (raw, expected) in [
            ("logo", CustomComponentType::Logo),
            ("cta", CustomComponentType::Cta),
            ("countdown", CustomComponentType::Countdown),
            ("banner", CustomComponentType::Banner),
        ] {
            let parsed: CustomComponentType =
                serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_custom_media_deserialization() {
        let media: CustomMedia = serde_json::from_str(
            r#"{"id": "m1", "url": "https://cdn.example.com/banner.png", "insertAfter": "cta", "width": "400px"}"#,
        )
        .unwrap();
        assert_eq!(media.insert_after, MediaAnchor::Cta);
        assert_eq!(media.alignment, MediaAlignment::Center);
    }
}
