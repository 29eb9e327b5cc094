//! Placeholder Substitution
//!
//! Replaces the prospect/sender token vocabulary in template text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Values substituted for the recognized `{token}` vocabulary.
///
/// The vocabulary is fixed and must match the renderer bit-exactly:
/// `{name}`, `{company}`, `{senderName}`, `{senderCompany}`. Unrecognized
/// tokens pass through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderBindings {
    pub name: String,
    pub company: String,
    pub sender_name: String,
    pub sender_company: String,
}

impl PlaceholderBindings {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        sender_name: impl Into<String>,
        sender_company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            sender_name: sender_name.into(),
            sender_company: sender_company.into(),
        }
    }

    /// Sample bindings used for template previews.
    pub fn sample() -> Self {
        Self::new(
            "Sarah Johnson",
            "TechCorp Industries",
            "James Wilson",
            "Your Company",
        )
    }

    /// Substitute all recognized tokens in `text`.
    ///
    /// Also unescapes the literal two-character sequence `\n` into a real
    /// newline: template data arrives double-escaped from upstream, and the
    /// stored defaults depend on this.
    pub fn substitute(&self, text: &str) -> String {
        text.replace("{name}", &self.name)
            .replace("{company}", &self.company)
            .replace("{senderName}", &self.sender_name)
            .replace("{senderCompany}", &self.sender_company)
            .replace("\\n", "\n")
    }

    /// Substitute tokens in a JSON value.
    ///
    /// Only strings are touched; numbers, colors-as-hex-strings excepted,
    /// booleans and structures come back unchanged since customization
    /// fields legitimately hold non-text values.
    pub fn substitute_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.substitute(s)),
            other => other.clone(),
        }
    }
}
