//! Profiles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    organisations::records::OrganisationUuid,
    profiles::{
        data::NewProfile,
        records::{ProfileRecord, ProfileUuid},
    },
};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const LINK_PROFILE_ORGANISATION_SQL: &str = include_str!("sql/link_profile_organisation.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: NewProfile,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(CREATE_PROFILE_SQL)
            .bind(profile.uuid.into_uuid())
            .bind(profile.display_name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<Postgres, ProfileRecord>(GET_PROFILE_SQL)
            .bind(profile.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Sets `organisation_uuid` on a not-yet-affiliated profile. Returns the
    /// number of rows updated; zero means the profile is missing or already
    /// linked.
    pub(crate) async fn link_profile_organisation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
        organisation: OrganisationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(LINK_PROFILE_ORGANISATION_SQL)
            .bind(profile.into_uuid())
            .bind(organisation.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            display_name: row.try_get("display_name")?,
            organisation_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("organisation_uuid")?
                .map(OrganisationUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
