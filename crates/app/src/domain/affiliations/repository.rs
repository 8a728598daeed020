//! Affiliations Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    affiliations::{
        data::NewAffiliationRequest,
        records::{
            AffiliationRequestRecord, AffiliationRequestStatus, AffiliationRequestUuid,
            PendingAffiliationRecord,
        },
    },
    organisations::records::OrganisationUuid,
    profiles::records::ProfileUuid,
};

const CREATE_AFFILIATION_REQUEST_SQL: &str = include_str!("sql/create_affiliation_request.sql");
const GET_AFFILIATION_REQUEST_SQL: &str = include_str!("sql/get_affiliation_request.sql");
const FIND_PENDING_REQUEST_SQL: &str = include_str!("sql/find_pending_request.sql");
const LIST_ORGANISATION_REQUESTS_SQL: &str = include_str!("sql/list_organisation_requests.sql");
const RESPOND_AFFILIATION_REQUEST_SQL: &str = include_str!("sql/respond_affiliation_request.sql");
const CANCEL_AFFILIATION_REQUEST_SQL: &str = include_str!("sql/cancel_affiliation_request.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAffiliationsRepository;

impl PgAffiliationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: NewAffiliationRequest,
    ) -> Result<AffiliationRequestRecord, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(CREATE_AFFILIATION_REQUEST_SQL)
            .bind(request.uuid.into_uuid())
            .bind(request.requester_uuid.into_uuid())
            .bind(request.organisation_uuid.into_uuid())
            .bind(request.message)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: AffiliationRequestUuid,
    ) -> Result<AffiliationRequestRecord, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(GET_AFFILIATION_REQUEST_SQL)
            .bind(request.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: AffiliationRequestUuid,
    ) -> Result<Option<AffiliationRequestRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(GET_AFFILIATION_REQUEST_SQL)
            .bind(request.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The requester's most recent pending request, with the target
    /// organisation's display fields joined in.
    pub(crate) async fn find_pending_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requester: ProfileUuid,
    ) -> Result<Option<PendingAffiliationRecord>, sqlx::Error> {
        query_as::<Postgres, PendingAffiliationRecord>(FIND_PENDING_REQUEST_SQL)
            .bind(requester.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_organisation_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organisation: OrganisationUuid,
    ) -> Result<Vec<AffiliationRequestRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(LIST_ORGANISATION_REQUESTS_SQL)
            .bind(organisation.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Conditional `pending -> approved|rejected` transition. `None` means
    /// the request was not pending when the statement ran.
    pub(crate) async fn respond(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: AffiliationRequestUuid,
        status: AffiliationRequestStatus,
        response: Option<&str>,
    ) -> Result<Option<AffiliationRequestRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(RESPOND_AFFILIATION_REQUEST_SQL)
            .bind(request.into_uuid())
            .bind(status.as_str())
            .bind(response)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Requester withdrawal; conditional on ownership and pending status.
    pub(crate) async fn cancel(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: AffiliationRequestUuid,
        requester: ProfileUuid,
    ) -> Result<Option<AffiliationRequestRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliationRequestRecord>(CANCEL_AFFILIATION_REQUEST_SQL)
            .bind(request.into_uuid())
            .bind(requester.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AffiliationRequestRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AffiliationRequestUuid::from_uuid(row.try_get("uuid")?),
            requester_uuid: ProfileUuid::from_uuid(row.try_get("requester_uuid")?),
            organisation_uuid: OrganisationUuid::from_uuid(row.try_get("organisation_uuid")?),
            status: try_get_status(row)?,
            message: row.try_get("message")?,
            admin_response: row.try_get("admin_response")?,
            requested_at: row.try_get::<SqlxTimestamp, _>("requested_at")?.to_jiff(),
            responded_at: row
                .try_get::<Option<SqlxTimestamp>, _>("responded_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PendingAffiliationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            request: AffiliationRequestRecord::from_row(row)?,
            organisation_name: row.try_get("organisation_name")?,
            organisation_logo_url: row.try_get("organisation_logo_url")?,
        })
    }
}

fn try_get_status(row: &PgRow) -> Result<AffiliationRequestStatus, sqlx::Error> {
    let value: String = row.try_get("status")?;

    AffiliationRequestStatus::parse(&value).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown affiliation request status `{value}`").into(),
    })
}
