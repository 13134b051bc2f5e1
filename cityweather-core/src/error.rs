use thiserror::Error;

/// Why a single weather lookup failed.
///
/// Every variant is scoped to one fetch attempt; none of them leave partial state behind.
#[derive(Debug, Error)]
pub enum FetchError {
    /// City name was empty after trimming. No request was sent.
    #[error("city name must not be empty")]
    InvalidInput,

    /// Provider answered with a non-200 status.
    #[error("provider rejected the request with status {0}")]
    ProviderError(u16),

    /// DNS, connect, timeout or body read failure.
    #[error("failed to reach the weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body did not have the expected shape.
    #[error("unexpected response from the weather provider: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Text suitable for showing to the person who typed the city.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::InvalidInput => {
                "City name cannot be empty. Please enter a valid city name."
            }
            FetchError::ProviderError(_) => {
                "Could not retrieve data for that city. Please check the city name."
            }
            FetchError::Transport(_) | FetchError::MalformedResponse(_) => {
                "Failed to retrieve weather data. Please try again later."
            }
        }
    }

    /// HTTP status for provider rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ProviderError(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_differ_by_kind() {
        let invalid = FetchError::InvalidInput.user_message();
        let rejected = FetchError::ProviderError(404).user_message();
        let malformed = FetchError::MalformedResponse("missing field".into()).user_message();

        assert!(invalid.contains("cannot be empty"));
        assert!(rejected.contains("check the city name"));
        assert!(malformed.contains("try again later"));
        assert_ne!(invalid, rejected);
    }

    #[test]
    fn status_only_for_provider_errors() {
        assert_eq!(FetchError::ProviderError(401).status(), Some(401));
        assert_eq!(FetchError::InvalidInput.status(), None);
    }

    #[test]
    fn display_includes_status_code() {
        let err = FetchError::ProviderError(404);
        assert!(err.to_string().contains("404"));
    }
}
