//! Organisations service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        organisations::{
            data::NewOrganisation,
            errors::OrganisationsServiceError,
            records::{OrganisationRecord, OrganisationStatus, OrganisationUuid},
            repository::PgOrganisationsRepository,
        },
        profiles::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrganisationsService {
    db: Db,
    repository: PgOrganisationsRepository,
    profiles: PgProfilesRepository,
}

impl PgOrganisationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrganisationsRepository::new(),
            profiles: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl OrganisationsService for PgOrganisationsService {
    #[tracing::instrument(
        name = "organisations.service.register_organisation",
        skip(self, organisation),
        fields(
            organisation_uuid = %organisation.uuid,
            created_by = %organisation.created_by,
        ),
        err
    )]
    async fn register_organisation(
        &self,
        organisation: NewOrganisation,
    ) -> Result<OrganisationRecord, OrganisationsServiceError> {
        let mut tx = self
            .db
            .begin_profile_transaction(organisation.created_by)
            .await?;

        let creator = self
            .profiles
            .get_profile(&mut tx, organisation.created_by)
            .await?;

        if creator.organisation_uuid.is_some() {
            return Err(OrganisationsServiceError::CreatorAlreadyAffiliated);
        }

        let created = self
            .repository
            .create_organisation(&mut tx, organisation)
            .await?;

        tx.commit().await?;

        info!(organisation_uuid = %created.uuid, "organisation registered, awaiting approval");

        Ok(created)
    }

    async fn get_organisation(
        &self,
        organisation: OrganisationUuid,
    ) -> Result<OrganisationRecord, OrganisationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self
            .repository
            .get_organisation(&mut tx, organisation)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "organisations.service.approve_registration",
        skip(self),
        fields(organisation_uuid = %organisation),
        err
    )]
    async fn approve_registration(
        &self,
        organisation: OrganisationUuid,
    ) -> Result<OrganisationRecord, OrganisationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(approved) = self
            .repository
            .approve_organisation(&mut tx, organisation)
            .await?
        else {
            return match self.repository.find_organisation(&mut tx, organisation).await? {
                None => Err(OrganisationsServiceError::NotFound),
                Some(_) => Err(OrganisationsServiceError::InvalidStatusTransition),
            };
        };

        // Activation is when the creator becomes a member of their own
        // organisation; while pending they resolve as a pending registration.
        let linked = self
            .profiles
            .link_profile_organisation(&mut tx, approved.created_by, approved.uuid)
            .await?;

        if linked == 0 {
            return Err(OrganisationsServiceError::CreatorAlreadyAffiliated);
        }

        tx.commit().await?;

        info!(organisation_uuid = %approved.uuid, "organisation registration approved");

        Ok(approved)
    }

    #[tracing::instrument(
        name = "organisations.service.update_organisation_status",
        skip(self),
        fields(organisation_uuid = %organisation, status = %status),
        err
    )]
    async fn update_organisation_status(
        &self,
        organisation: OrganisationUuid,
        status: OrganisationStatus,
    ) -> Result<OrganisationRecord, OrganisationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .repository
            .get_organisation(&mut tx, organisation)
            .await?;

        if !current.status.can_transition_to(status) {
            return Err(OrganisationsServiceError::InvalidStatusTransition);
        }

        let updated = self
            .repository
            .update_organisation_status(&mut tx, organisation, current.status, status)
            .await?
            .ok_or(OrganisationsServiceError::InvalidStatusTransition)?;

        tx.commit().await?;

        info!(organisation_uuid = %updated.uuid, status = %updated.status, "organisation status updated");

        Ok(updated)
    }

    async fn list_pending_registrations(
        &self,
    ) -> Result<Vec<OrganisationRecord>, OrganisationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let pending = self.repository.list_pending_registrations(&mut tx).await?;

        tx.commit().await?;

        Ok(pending)
    }
}

#[automock]
#[async_trait]
/// Organisation lifecycle operations.
pub trait OrganisationsService: Send + Sync {
    /// Registers a new organisation; it stays `pending_approval` until a
    /// platform admin decides.
    async fn register_organisation(
        &self,
        organisation: NewOrganisation,
    ) -> Result<OrganisationRecord, OrganisationsServiceError>;

    /// Retrieve a single organisation.
    async fn get_organisation(
        &self,
        organisation: OrganisationUuid,
    ) -> Result<OrganisationRecord, OrganisationsServiceError>;

    /// Platform-admin approval: activates a pending organisation and links
    /// its creator's profile to it, atomically.
    async fn approve_registration(
        &self,
        organisation: OrganisationUuid,
    ) -> Result<OrganisationRecord, OrganisationsServiceError>;

    /// Platform-admin curation between `active`, `flagged`, and `inactive`.
    async fn update_organisation_status(
        &self,
        organisation: OrganisationUuid,
        status: OrganisationStatus,
    ) -> Result<OrganisationRecord, OrganisationsServiceError>;

    /// Moderation queue of registrations awaiting a decision, oldest first.
    async fn list_pending_registrations(
        &self,
    ) -> Result<Vec<OrganisationRecord>, OrganisationsServiceError>;
}
