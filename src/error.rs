use thiserror::Error;

/// Market data fetch failures
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode market data: {0}")]
    Decode(String),

    #[error("no bars returned for {0}")]
    MissingSymbol(String),

    #[error("insufficient price history: {received} bars, need {required}")]
    InsufficientHistory { required: usize, received: usize },
}

/// Order submission failures
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("order request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("order rejected ({status}): {message}")]
    Rejected {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("failed to decode order: {0}")]
    Decode(String),
}

/// Anything that fails an invocation
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServiceError::InsufficientHistory {
            required: 26,
            received: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient price history: 10 bars, need 26"
        );

        let err = InvocationError::from(BrokerError::Rejected {
            status: 403,
            code: Some(40310000),
            message: "insufficient balance for XRP".to_string(),
        });
        assert!(matches!(err, InvocationError::Broker(_)));
        assert_eq!(
            err.to_string(),
            "order rejected (403): insufficient balance for XRP"
        );
    }
}
