//! Organisation relationship resolution.
//!
//! Given a profile and its three optional satellite lookups, [`resolve`]
//! computes the single relationship state that drives what the portal offers
//! the user. Fetching lives in the service; the precedence rules live here as
//! a pure function.

use crate::domain::{
    affiliations::records::PendingAffiliationRecord, organisations::records::OrganisationRecord,
    profiles::records::ProfileRecord,
};

/// A profile's relationship to an organisation. Exactly one variant holds at
/// a time; each carries only the payload that state needs.
#[derive(Debug, Clone)]
pub enum OrganisationRelationship {
    /// No affiliation, no pending request, no pending registration.
    None,

    /// Member of an organisation someone else created.
    Affiliated { organisation: OrganisationRecord },

    /// Member of an organisation this profile created.
    Created { organisation: OrganisationRecord },

    /// A request to join an organisation is awaiting its admin's decision.
    PendingAffiliation { request: PendingAffiliationRecord },

    /// An organisation registered by this profile is awaiting platform
    /// approval.
    PendingRegistration { organisation: OrganisationRecord },
}

/// First match wins:
///
/// 1. a linked organisation (the row `profile.organisation_uuid` points at,
///    when it exists) — `Created` for its creator, `Affiliated` otherwise;
/// 2. the profile's most recent pending affiliation request;
/// 3. a registration by this profile still awaiting approval;
/// 4. `None`.
///
/// A linked organisation beats everything else; a dangling
/// `organisation_uuid` (row since removed) falls through to the request
/// lookup.
pub(crate) fn resolve(
    profile: &ProfileRecord,
    linked_organisation: Option<OrganisationRecord>,
    pending_request: Option<PendingAffiliationRecord>,
    pending_registration: Option<OrganisationRecord>,
) -> OrganisationRelationship {
    if let Some(organisation) = linked_organisation {
        return if organisation.created_by == profile.uuid {
            OrganisationRelationship::Created { organisation }
        } else {
            OrganisationRelationship::Affiliated { organisation }
        };
    }

    if let Some(request) = pending_request {
        return OrganisationRelationship::PendingAffiliation { request };
    }

    if let Some(organisation) = pending_registration {
        return OrganisationRelationship::PendingRegistration { organisation };
    }

    OrganisationRelationship::None
}
