//! Organisations Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    organisations::{
        data::NewOrganisation,
        records::{OrganisationRecord, OrganisationStatus, OrganisationUuid},
    },
    profiles::records::ProfileUuid,
};

const CREATE_ORGANISATION_SQL: &str = include_str!("sql/create_organisation.sql");
const GET_ORGANISATION_SQL: &str = include_str!("sql/get_organisation.sql");
const FIND_PENDING_REGISTRATION_SQL: &str = include_str!("sql/find_pending_registration.sql");
const LIST_PENDING_REGISTRATIONS_SQL: &str = include_str!("sql/list_pending_registrations.sql");
const APPROVE_ORGANISATION_SQL: &str = include_str!("sql/approve_organisation.sql");
const UPDATE_ORGANISATION_STATUS_SQL: &str = include_str!("sql/update_organisation_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrganisationsRepository;

impl PgOrganisationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_organisation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: NewOrganisation,
    ) -> Result<OrganisationRecord, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(CREATE_ORGANISATION_SQL)
            .bind(organisation.uuid.into_uuid())
            .bind(organisation.name)
            .bind(organisation.logo_url)
            .bind(organisation.country)
            .bind(organisation.city)
            .bind(organisation.kind)
            .bind(organisation.created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_organisation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: OrganisationUuid,
    ) -> Result<OrganisationRecord, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(GET_ORGANISATION_SQL)
            .bind(organisation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_organisation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: OrganisationUuid,
    ) -> Result<Option<OrganisationRecord>, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(GET_ORGANISATION_SQL)
            .bind(organisation.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The creator's most recent organisation still awaiting approval.
    pub(crate) async fn find_pending_registration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        creator: ProfileUuid,
    ) -> Result<Option<OrganisationRecord>, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(FIND_PENDING_REGISTRATION_SQL)
            .bind(creator.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_pending_registrations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrganisationRecord>, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(LIST_PENDING_REGISTRATIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Conditional `pending_approval -> active` transition. `None` when the
    /// organisation is missing or no longer pending.
    pub(crate) async fn approve_organisation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: OrganisationUuid,
    ) -> Result<Option<OrganisationRecord>, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(APPROVE_ORGANISATION_SQL)
            .bind(organisation.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Conditional status update guarded on the expected current status, so
    /// concurrent curation cannot silently overwrite each other.
    pub(crate) async fn update_organisation_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: OrganisationUuid,
        from: OrganisationStatus,
        to: OrganisationStatus,
    ) -> Result<Option<OrganisationRecord>, sqlx::Error> {
        query_as::<Postgres, OrganisationRecord>(UPDATE_ORGANISATION_STATUS_SQL)
            .bind(organisation.into_uuid())
            .bind(to.as_str())
            .bind(from.as_str())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrganisationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrganisationUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            logo_url: row.try_get("logo_url")?,
            country: row.try_get("country")?,
            city: row.try_get("city")?,
            kind: row.try_get("kind")?,
            status: try_get_status(row)?,
            created_by: ProfileUuid::from_uuid(row.try_get("created_by")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_status(row: &PgRow) -> Result<OrganisationStatus, sqlx::Error> {
    let value: String = row.try_get("status")?;

    OrganisationStatus::parse(&value).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown organisation status `{value}`").into(),
    })
}
