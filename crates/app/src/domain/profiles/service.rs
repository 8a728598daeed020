//! Profiles service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::profiles::{
        data::NewProfile,
        errors::ProfilesServiceError,
        records::{ProfileRecord, ProfileUuid},
        repository::PgProfilesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProfilesService {
    db: Db,
    repository: PgProfilesRepository,
}

impl PgProfilesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProfilesRepository::new(),
        }
    }
}

#[async_trait]
impl ProfilesService for PgProfilesService {
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_profile_transaction(profile.uuid).await?;

        let created = self.repository.create_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(&self, profile: ProfileUuid) -> Result<ProfileRecord, ProfilesServiceError> {
        let mut tx = self.db.begin_profile_transaction(profile).await?;

        let record = self.repository.get_profile(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
/// Profile persistence operations.
pub trait ProfilesService: Send + Sync {
    /// Creates the application-level record for an authenticated person.
    async fn create_profile(
        &self,
        profile: NewProfile,
    ) -> Result<ProfileRecord, ProfilesServiceError>;

    /// Retrieve a single profile.
    async fn get_profile(
        &self,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, ProfilesServiceError>;
}
