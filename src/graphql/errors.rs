use async_graphql::{Error, ErrorExtensions};

use crate::error::{ErrorKind, ServiceError};

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> Error {
        let code = match self.kind() {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Internal => "INTERNAL_SERVER_ERROR",
        };
        Error::new(self.message()).extend_with(|_, e| e.set("code", code))
    }
}
