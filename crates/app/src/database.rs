//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query, query_scalar};

use crate::domain::profiles::records::ProfileUuid;

/// SQL used to set the acting profile for row-level security.
pub const SET_PROFILE_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_profile_uuid', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction acting as the given profile, so RLS policies see
    /// `app.current_profile_uuid`.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the profile
    /// context fails.
    pub async fn begin_profile_transaction(
        &self,
        profile: ProfileUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_PROFILE_CONTEXT_SQL)
            .bind(profile.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }

    /// Begin a transaction without an acting profile.
    ///
    /// Platform-admin operations (organisation approval and curation) use
    /// this; they must run on a role that is not subject to the policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Whether the connected role is subject to row-level security.
///
/// Superusers and BYPASSRLS roles see every row regardless of policies, so
/// user-facing traffic should not run as one.
///
/// # Errors
///
/// Returns an error if the catalog lookup fails.
pub async fn rls_enforced(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let bypasses: bool =
        query_scalar("SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user")
            .fetch_one(pool)
            .await?;

    Ok(!bypasses)
}
