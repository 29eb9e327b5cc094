//! # MailGen Core Domain Models
//!
//! This module contains the core domain models for the MailGen campaign
//! email system. All models implement serialization/deserialization with
//! serde; externally supplied records validate with the validator crate.
//!
//! ## Key Models
//!
//! - **Template**: A pre-authored email layout with default copy, semantic
//!   structure, and a generation prompt
//! - **CustomizationSet**: User overrides layered on template defaults with
//!   flat > nested > default resolution
//! - **Prospect**: A campaign recipient with derived display name/company
//! - **GeneratedEmail**: The immutable subject/text/HTML output of one
//!   generation call, tagged with the path that produced it
//!
//! ## Placeholder Vocabulary
//!
//! The substitution engine recognizes `{name}`, `{company}`, `{senderName}`,
//! `{senderCompany}` and the literal `\n` escape; the vocabulary is part of
//! the external interface and must stay bit-exact across renderers.

pub mod customization;
pub mod email;
pub mod placeholder;
pub mod prospect;
pub mod template;

#[cfg(test)]
pub mod property_tests;

pub use customization::*;
pub use email::*;
pub use placeholder::*;
pub use prospect::*;
pub use template::*;
