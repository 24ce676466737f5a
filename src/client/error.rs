use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("response carried no data")]
    EmptyResponse,

    #[error("could not decode payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("login required")]
    LoginRequired,

    #[error("session storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text for the screen's notice. Messages from the API and from local
    /// validation win; anything else collapses to the screen's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            ClientError::Validation(message) => message.clone(),
            ClientError::LoginRequired => "Log in to finish your booking.".to_string(),
            _ => fallback.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_preferred_over_fallback() {
        let err = ClientError::Api {
            status: 409,
            message: "time slot was just taken".into(),
        };
        assert_eq!(err.user_message("Booking failed."), "time slot was just taken");

        let blank = ClientError::Api {
            status: 500,
            message: " ".into(),
        };
        assert_eq!(blank.user_message("Booking failed."), "Booking failed.");
        assert_eq!(
            ClientError::EmptyResponse.user_message("Booking failed."),
            "Booking failed."
        );
    }

    #[test]
    fn unauthorized_is_detected_from_status() {
        let err = ClientError::Api {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert!(err.is_unauthorized());
        assert!(!ClientError::LoginRequired.is_unauthorized());
    }
}
