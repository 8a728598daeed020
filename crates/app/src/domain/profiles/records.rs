//! Profile Records

use jiff::Timestamp;

use crate::{domain::organisations::records::OrganisationUuid, uuids::TypedUuid};

/// Profile UUID
pub type ProfileUuid = TypedUuid<ProfileRecord>;

/// Profile Record
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    /// Unique profile identifier, established by the upstream identity
    /// provider.
    pub uuid: ProfileUuid,

    /// Human-readable display name.
    pub display_name: String,

    /// Organisation this profile is affiliated with, if any.
    pub organisation_uuid: Option<OrganisationUuid>,

    /// Profile creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
