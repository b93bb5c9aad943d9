use thiserror::Error;

/// Infrastructure failures: the database adapter, the tracing bootstrap,
/// and missing runtime configuration.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {message}")]
    Database { message: String },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_subsystem() {
        assert_eq!(
            InfraError::database("connection refused").to_string(),
            "database error: connection refused"
        );
        assert_eq!(
            InfraError::configuration("database.url must be set").to_string(),
            "configuration error: database.url must be set"
        );
        assert_eq!(
            InfraError::telemetry("subscriber already set").to_string(),
            "telemetry initialization failed: subscriber already set"
        );
    }
}
