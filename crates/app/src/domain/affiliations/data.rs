//! Affiliation Data

use crate::domain::{
    affiliations::records::AffiliationRequestUuid, organisations::records::OrganisationUuid,
    profiles::records::ProfileUuid,
};

/// New Affiliation Request Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAffiliationRequest {
    /// UUID to assign to the request row.
    pub uuid: AffiliationRequestUuid,

    /// Profile applying to join.
    pub requester_uuid: ProfileUuid,

    /// Organisation being applied to.
    pub organisation_uuid: OrganisationUuid,

    /// Optional message to the organisation's admin.
    pub message: Option<String>,
}

/// An admin's decision on a pending request.
#[derive(Debug, Clone, PartialEq)]
pub struct AffiliationDecision {
    pub verdict: AffiliationVerdict,

    /// Optional reply recorded on the request.
    pub response: Option<String>,
}

/// The two admin-facing outcomes. Withdrawal is requester-initiated and goes
/// through cancellation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationVerdict {
    Approve,
    Reject,
}
