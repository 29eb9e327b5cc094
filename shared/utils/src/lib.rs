pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.generation.timeout_seconds, 30);
        assert_eq!(config.generation.batch_delay_ms, 1000);
    }

    #[test]
    fn test_error_handling() {
        let error = MailgenError::template_not_found("no_such_template");
        assert_eq!(error.error_code(), "TEMPLATE_NOT_FOUND");
        assert_eq!(error.http_status_code(), 404);
        assert!(error.to_string().contains("no_such_template"));
    }
}
