//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! `From` impls bridging them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::services::errors::ServiceError;

    /// Identifiers arrive in URLs; one that cannot name a record is a miss.
    impl From<TypeConstraintError> for ServiceError {
        fn from(_: TypeConstraintError) -> Self {
            ServiceError::NotFound
        }
    }
}
