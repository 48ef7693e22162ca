/// Errors surfaced by the API client and the screen state holders.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown challenge: {0}")]
    UnknownChallenge(String),

    #[error("Unknown reward: {0}")]
    UnknownReward(String),
}

impl ClientError {
    /// Text shown to the user when an action fails.
    pub fn alert_message(&self) -> String {
        match self {
            ClientError::Network(e) => {
                tracing::error!("Network error: {}", e);
                "Network error, please try again.".to_string()
            }
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Json(e) => {
                tracing::error!("JSON error: {}", e);
                "Unexpected response from the server.".to_string()
            }
            ClientError::Url(e) => {
                tracing::error!("URL error: {}", e);
                "The server address is misconfigured.".to_string()
            }
            ClientError::Validation(msg) => msg.clone(),
            ClientError::UnknownChallenge(id) => format!("No challenge with id {}", id),
            ClientError::UnknownReward(name) => format!("No reward named {}", name),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
