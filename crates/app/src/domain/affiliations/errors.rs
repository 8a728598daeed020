//! Affiliations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AffiliationsServiceError {
    #[error("affiliation request not found")]
    NotFound,

    #[error("a pending affiliation request for this organisation already exists")]
    AlreadyPending,

    #[error("profile is already affiliated with an organisation")]
    AlreadyAffiliated,

    #[error("affiliation request has already been resolved")]
    AlreadyResolved,

    #[error("organisation is not accepting affiliation requests")]
    NotAcceptingRequests,

    #[error("not authorised to act on this affiliation request")]
    Unauthorized,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AffiliationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // The partial unique index on pending requests.
            Some(ErrorKind::UniqueViolation) => Self::AlreadyPending,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(_) | None => Self::Sql(error),
        }
    }
}
