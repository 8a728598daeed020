//! Affiliation Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::{
    domain::{organisations::records::OrganisationUuid, profiles::records::ProfileUuid},
    uuids::TypedUuid,
};

/// Affiliation Request UUID
pub type AffiliationRequestUuid = TypedUuid<AffiliationRequestRecord>;

/// Affiliation Request Record
#[derive(Debug, Clone)]
pub struct AffiliationRequestRecord {
    pub uuid: AffiliationRequestUuid,

    /// Profile applying to join.
    pub requester_uuid: ProfileUuid,

    /// Organisation being applied to.
    pub organisation_uuid: OrganisationUuid,

    pub status: AffiliationRequestStatus,

    /// Message from the requester to the organisation's admin.
    pub message: Option<String>,

    /// The admin's reply, recorded with the decision.
    pub admin_response: Option<String>,

    pub requested_at: Timestamp,

    /// Set when the request leaves `pending`.
    pub responded_at: Option<Timestamp>,
}

/// Affiliation request lifecycle status. `Pending` is the only non-terminal
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl AffiliationRequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Display for AffiliationRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A pending request together with the display fields of its target
/// organisation, denormalised so callers can render it without a second
/// lookup.
#[derive(Debug, Clone)]
pub struct PendingAffiliationRecord {
    pub request: AffiliationRequestRecord,
    pub organisation_name: String,
    pub organisation_logo_url: Option<String>,
}
