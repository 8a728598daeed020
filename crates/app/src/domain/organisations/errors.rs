//! Organisations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganisationsServiceError {
    #[error("organisation already exists")]
    AlreadyExists,

    #[error("organisation not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid organisation status transition")]
    InvalidStatusTransition,

    #[error("creator profile is already affiliated with an organisation")]
    CreatorAlreadyAffiliated,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrganisationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
