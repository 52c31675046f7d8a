use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// EC2-specific errors that can occur during the instance listing.
///
/// SECURITY: Error messages must NEVER contain access keys or secrets.
#[derive(Debug, Error)]
pub enum Ec2Error {
    /// Credentials rejected or not permitted to describe instances
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Rate limited by the EC2 API; not retried
    #[error("request throttled: {message}")]
    Throttled { message: String },

    /// Connection failed or timed out before a response arrived
    #[error("network error: {message}")]
    Network { message: String },

    /// A response arrived but could not be parsed
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Any other error the API returned
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },
}

const AUTH_CODES: &[&str] = &[
    "AuthFailure",
    "UnauthorizedOperation",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
];

const THROTTLE_CODES: &[&str] = &["RequestLimitExceeded", "Throttling"];

impl Ec2Error {
    pub fn from_sdk<E, R>(err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match &err {
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Ec2Error::Network {
                message: DisplayErrorContext(&err).to_string(),
            },
            SdkError::ResponseError(_) => Ec2Error::MalformedResponse {
                message: DisplayErrorContext(&err).to_string(),
            },
            // NOTE: An unparseable body surfaces as a service error without a code
            SdkError::ServiceError(_) => match err.code() {
                Some(code) => {
                    let message = err.message().unwrap_or("no message").to_string();
                    Self::from_code(code.to_string(), message)
                }
                None => Ec2Error::MalformedResponse {
                    message: DisplayErrorContext(&err).to_string(),
                },
            },
            _ => Ec2Error::Api {
                code: "Unknown".to_string(),
                message: DisplayErrorContext(&err).to_string(),
            },
        }
    }

    pub fn from_code(code: String, message: String) -> Self {
        if AUTH_CODES.contains(&code.as_str()) {
            Ec2Error::Auth { message }
        } else if THROTTLE_CODES.contains(&code.as_str()) {
            Ec2Error::Throttled { message }
        } else {
            Ec2Error::Api { code, message }
        }
    }
}
