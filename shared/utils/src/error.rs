use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MailgenError {
    #[error("Unknown template: {id}")]
    TemplateNotFound { id: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Rotation error: {message}")]
    Rotation { message: String },

    #[error("Generation error: {message}")]
    Generation { message: String },

    #[error("Delivery error: {message}")]
    Delivery { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl MailgenError {
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound { id: id.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn rotation(message: impl Into<String>) -> Self {
        Self::Rotation {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Rotation { .. } => "ROTATION_ERROR",
            Self::Generation { .. } => "GENERATION_ERROR",
            Self::Delivery { .. } => "DELIVERY_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::TemplateNotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Rotation { .. } => 400,
            Self::Generation { .. } => 502,
            Self::Delivery { .. } => 502,
            Self::Configuration { .. } => 500,
            Self::ExternalService { .. } => 502,
            Self::NotFound { .. } => 404,
            Self::Internal { .. } => 500,
        }
    }
}

pub type MailgenResult<T> = Result<T, MailgenError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<MailgenError> for ErrorResponse {
    fn from(error: MailgenError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }
}

// Conversion from common error types
impl From<reqwest::Error> for MailgenError {
    fn from(error: reqwest::Error) -> Self {
        Self::external_service("HTTP Client", error.to_string())
    }
}

impl From<serde_json::Error> for MailgenError {
    fn from(error: serde_json::Error) -> Self {
        Self::validation("JSON", error.to_string())
    }
}

impl From<handlebars::RenderError> for MailgenError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::internal(error.to_string())
    }
}
