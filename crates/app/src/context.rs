//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::{
    database::{self, Db},
    domain::{
        affiliations::{AffiliationsService, PgAffiliationsService},
        organisations::{OrganisationsService, PgOrganisationsService},
        profiles::{PgProfilesService, ProfilesService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// The service set an embedding layer (HTTP surface, admin tooling) works
/// with. Whether row-level security applies depends on the role the database
/// URL connects as: user-facing traffic should use a restricted role,
/// platform-admin tooling a policy-exempt one.
#[derive(Clone)]
pub struct AppContext {
    pub profiles: Arc<dyn ProfilesService>,
    pub organisations: Arc<dyn OrganisationsService>,
    pub affiliations: Arc<dyn AffiliationsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if !database::rls_enforced(&pool)
            .await
            .map_err(AppInitError::Database)?
        {
            warn!("connected role bypasses row-level security; policies will not be enforced");
        }

        let db = Db::new(pool);

        Ok(Self {
            profiles: Arc::new(PgProfilesService::new(db.clone())),
            organisations: Arc::new(PgOrganisationsService::new(db.clone())),
            affiliations: Arc::new(PgAffiliationsService::new(db)),
        })
    }
}
