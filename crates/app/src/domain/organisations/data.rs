//! Organisation Data

use crate::domain::{organisations::records::OrganisationUuid, profiles::records::ProfileUuid};

/// New Organisation Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrganisation {
    /// UUID to assign to the organisation row.
    pub uuid: OrganisationUuid,

    /// Registered name.
    pub name: String,

    /// Display logo, if provided at registration.
    pub logo_url: Option<String>,

    pub country: Option<String>,

    pub city: Option<String>,

    /// Free-form organisation type (NGO, charity, association, ...).
    pub kind: Option<String>,

    /// Profile registering the organisation.
    pub created_by: ProfileUuid,
}
