use thiserror::Error;

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A pre-condition was not met (duplicate name, unknown id).
    BadRequest,
    /// Anything else, usually a data-access fault.
    Internal,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::BadRequest(_) => ErrorKind::BadRequest,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(message) | ServiceError::Internal(message) => message,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_errors_become_internal() {
        let err: ServiceError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.message().contains("connection reset"));
    }

    #[test]
    fn bad_request_keeps_message() {
        let err = ServiceError::bad_request("Season does not exist");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.to_string(), "Season does not exist");
    }
}
