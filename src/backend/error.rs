use thiserror::Error;
use tonic::{Code, Status};

/// Machine-readable failure kind reported by a backend call.
///
/// Classification from the RPC status happens once, here at the transport
/// boundary; everything above switches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCode {
    NotFound,
    IncorrectCode,
    CodeExpired,
    IncorrectPassword,
    InvalidArgument,
    Unavailable,
    Internal,
}

impl BackendCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendCode::NotFound => "not_found",
            BackendCode::IncorrectCode => "incorrect_code",
            BackendCode::CodeExpired => "code_expired",
            BackendCode::IncorrectPassword => "incorrect_password",
            BackendCode::InvalidArgument => "invalid_argument",
            BackendCode::Unavailable => "unavailable",
            BackendCode::Internal => "internal",
        }
    }

    /// Business-rule reasons the auth service sends as the status message
    fn from_reason(reason: &str) -> Option<Self> {
        match reason.trim() {
            "incorrect_code" => Some(BackendCode::IncorrectCode),
            "code_expired" => Some(BackendCode::CodeExpired),
            "incorrect_password" => Some(BackendCode::IncorrectPassword),
            _ => None,
        }
    }

    fn from_status_code(code: Code) -> Self {
        match code {
            Code::NotFound => BackendCode::NotFound,
            Code::InvalidArgument => BackendCode::InvalidArgument,
            Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => BackendCode::Unavailable,
            _ => BackendCode::Internal,
        }
    }
}

impl std::fmt::Display for BackendCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct BackendError {
    pub code: BackendCode,
    pub message: String,
}

pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    pub fn new(code: BackendCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(BackendCode::NotFound, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendCode::Unavailable, message)
    }
}

impl From<Status> for BackendError {
    fn from(status: Status) -> Self {
        let code = BackendCode::from_reason(status.message())
            .unwrap_or_else(|| BackendCode::from_status_code(status.code()));

        let message = if status.message().is_empty() {
            status.code().description().to_string()
        } else {
            status.message().to_string()
        };

        Self { code, message }
    }
}
