//! Affiliations service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        affiliations::{
            data::{AffiliationDecision, AffiliationVerdict, NewAffiliationRequest},
            errors::AffiliationsServiceError,
            records::{AffiliationRequestRecord, AffiliationRequestStatus, AffiliationRequestUuid},
            repository::PgAffiliationsRepository,
            resolver::{self, OrganisationRelationship},
        },
        organisations::{
            PgOrganisationsRepository,
            records::{OrganisationStatus, OrganisationUuid},
        },
        profiles::{PgProfilesRepository, records::ProfileUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgAffiliationsService {
    db: Db,
    requests: PgAffiliationsRepository,
    organisations: PgOrganisationsRepository,
    profiles: PgProfilesRepository,
}

impl PgAffiliationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            requests: PgAffiliationsRepository::new(),
            organisations: PgOrganisationsRepository::new(),
            profiles: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl AffiliationsService for PgAffiliationsService {
    async fn resolve_organisation_relationship(
        &self,
        profile: ProfileUuid,
    ) -> Result<OrganisationRelationship, AffiliationsServiceError> {
        let mut tx = self.db.begin_profile_transaction(profile).await?;

        let profile_row = self.profiles.get_profile(&mut tx, profile).await?;

        let linked_organisation = match profile_row.organisation_uuid {
            Some(organisation) => {
                self.organisations
                    .find_organisation(&mut tx, organisation)
                    .await?
            }
            None => None,
        };

        let pending_request = self.requests.find_pending_request(&mut tx, profile).await?;

        let pending_registration = self
            .organisations
            .find_pending_registration(&mut tx, profile)
            .await?;

        tx.commit().await?;

        Ok(resolver::resolve(
            &profile_row,
            linked_organisation,
            pending_request,
            pending_registration,
        ))
    }

    #[tracing::instrument(
        name = "affiliations.service.create_affiliation_request",
        skip(self, request),
        fields(
            request_uuid = %request.uuid,
            requester_uuid = %request.requester_uuid,
            organisation_uuid = %request.organisation_uuid,
        ),
        err
    )]
    async fn create_affiliation_request(
        &self,
        request: NewAffiliationRequest,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError> {
        let mut tx = self
            .db
            .begin_profile_transaction(request.requester_uuid)
            .await?;

        let requester = self
            .profiles
            .get_profile(&mut tx, request.requester_uuid)
            .await?;

        if requester.organisation_uuid.is_some() {
            return Err(AffiliationsServiceError::AlreadyAffiliated);
        }

        let organisation = self
            .organisations
            .find_organisation(&mut tx, request.organisation_uuid)
            .await?
            .ok_or(AffiliationsServiceError::NotFound)?;

        if organisation.status != OrganisationStatus::Active {
            return Err(AffiliationsServiceError::NotAcceptingRequests);
        }

        let created = self.requests.create_request(&mut tx, request).await?;

        tx.commit().await?;

        info!(request_uuid = %created.uuid, "created affiliation request");

        Ok(created)
    }

    #[tracing::instrument(
        name = "affiliations.service.respond_to_affiliation_request",
        skip(self, decision),
        fields(request_uuid = %request, admin_uuid = %admin),
        err
    )]
    async fn respond_to_affiliation_request(
        &self,
        admin: ProfileUuid,
        request: AffiliationRequestUuid,
        decision: AffiliationDecision,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError> {
        let mut tx = self.db.begin_profile_transaction(admin).await?;

        let existing = self.requests.get_request(&mut tx, request).await?;

        let organisation = self
            .organisations
            .find_organisation(&mut tx, existing.organisation_uuid)
            .await?
            .ok_or(AffiliationsServiceError::InvalidReference)?;

        if organisation.created_by != admin {
            return Err(AffiliationsServiceError::Unauthorized);
        }

        if existing.status != AffiliationRequestStatus::Pending {
            return Err(AffiliationsServiceError::AlreadyResolved);
        }

        let status = match decision.verdict {
            AffiliationVerdict::Approve => AffiliationRequestStatus::Approved,
            AffiliationVerdict::Reject => AffiliationRequestStatus::Rejected,
        };

        // Guarded on `status = 'pending'` in the statement, so a concurrent
        // second responder loses here instead of re-applying.
        let updated = self
            .requests
            .respond(&mut tx, request, status, decision.response.as_deref())
            .await?
            .ok_or(AffiliationsServiceError::AlreadyResolved)?;

        if decision.verdict == AffiliationVerdict::Approve {
            let linked = self
                .profiles
                .link_profile_organisation(&mut tx, existing.requester_uuid, existing.organisation_uuid)
                .await?;

            if linked == 0 {
                return Err(AffiliationsServiceError::AlreadyAffiliated);
            }
        }

        tx.commit().await?;

        info!(
            request_uuid = %updated.uuid,
            status = %updated.status,
            "affiliation request resolved"
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "affiliations.service.cancel_affiliation_request",
        skip(self),
        fields(request_uuid = %request, requester_uuid = %requester),
        err
    )]
    async fn cancel_affiliation_request(
        &self,
        requester: ProfileUuid,
        request: AffiliationRequestUuid,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError> {
        let mut tx = self.db.begin_profile_transaction(requester).await?;

        let Some(cancelled) = self.requests.cancel(&mut tx, request, requester).await? else {
            return match self.requests.find_request(&mut tx, request).await? {
                None => Err(AffiliationsServiceError::NotFound),
                Some(existing) if existing.requester_uuid != requester => {
                    Err(AffiliationsServiceError::Unauthorized)
                }
                Some(_) => Err(AffiliationsServiceError::AlreadyResolved),
            };
        };

        tx.commit().await?;

        info!(request_uuid = %cancelled.uuid, "affiliation request withdrawn");

        Ok(cancelled)
    }

    async fn list_organisation_affiliation_requests(
        &self,
        admin: ProfileUuid,
        organisation: OrganisationUuid,
    ) -> Result<Vec<AffiliationRequestRecord>, AffiliationsServiceError> {
        let mut tx = self.db.begin_profile_transaction(admin).await?;

        let organisation_row = self
            .organisations
            .find_organisation(&mut tx, organisation)
            .await?
            .ok_or(AffiliationsServiceError::NotFound)?;

        if organisation_row.created_by != admin {
            return Err(AffiliationsServiceError::Unauthorized);
        }

        let requests = self
            .requests
            .list_organisation_requests(&mut tx, organisation)
            .await?;

        tx.commit().await?;

        Ok(requests)
    }
}

#[automock]
#[async_trait]
/// Affiliation state resolution and the request workflow.
pub trait AffiliationsService: Send + Sync {
    /// Computes the single relationship state for a profile: affiliated,
    /// created, pending affiliation, pending registration, or none. Read-only
    /// and safe to re-run after any mutation below.
    async fn resolve_organisation_relationship(
        &self,
        profile: ProfileUuid,
    ) -> Result<OrganisationRelationship, AffiliationsServiceError>;

    /// Files a request to join an active organisation. At most one pending
    /// request per (requester, organisation) pair.
    async fn create_affiliation_request(
        &self,
        request: NewAffiliationRequest,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError>;

    /// The target organisation's creator approves or rejects a pending
    /// request. Approval also links the requester's profile to the
    /// organisation, in the same transaction.
    async fn respond_to_affiliation_request(
        &self,
        admin: ProfileUuid,
        request: AffiliationRequestUuid,
        decision: AffiliationDecision,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError>;

    /// The requester withdraws their own pending request.
    async fn cancel_affiliation_request(
        &self,
        requester: ProfileUuid,
        request: AffiliationRequestUuid,
    ) -> Result<AffiliationRequestRecord, AffiliationsServiceError>;

    /// All requests targeting the organisation, newest first; restricted to
    /// its creator.
    async fn list_organisation_affiliation_requests(
        &self,
        admin: ProfileUuid,
        organisation: OrganisationUuid,
    ) -> Result<Vec<AffiliationRequestRecord>, AffiliationsServiceError>;
}
