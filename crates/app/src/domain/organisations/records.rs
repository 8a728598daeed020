//! Organisation Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::{domain::profiles::records::ProfileUuid, uuids::TypedUuid};

/// Organisation UUID
pub type OrganisationUuid = TypedUuid<OrganisationRecord>;

/// Organisation Record
#[derive(Debug, Clone)]
pub struct OrganisationRecord {
    pub uuid: OrganisationUuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub kind: Option<String>,
    pub status: OrganisationStatus,
    pub created_by: ProfileUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Organisation lifecycle status.
///
/// Registration starts at `PendingApproval`; approval is the only way out of
/// it. Curation moves active organisations between `Active`, `Flagged`, and
/// `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganisationStatus {
    PendingApproval,
    Active,
    Flagged,
    Inactive,
}

impl OrganisationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Active => "active",
            Self::Flagged => "flagged",
            Self::Inactive => "inactive",
        }
    }

    #[must_use]
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "pending_approval" => Some(Self::PendingApproval),
            "active" => Some(Self::Active),
            "flagged" => Some(Self::Flagged),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Whether curation may move an organisation from `self` to `next`.
    ///
    /// Leaving `PendingApproval` is excluded here: that transition also links
    /// the creator's profile and goes through registration approval.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Flagged | Self::Inactive)
                | (Self::Flagged, Self::Active | Self::Inactive)
                | (Self::Inactive, Self::Active)
        )
    }
}

impl Display for OrganisationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
