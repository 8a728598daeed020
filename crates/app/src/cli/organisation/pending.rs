use agora_app::{context::AppContext, domain::organisations::records::OrganisationRecord};
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub(crate) struct PendingArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Print the queue as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PendingRegistrationRow {
    uuid: uuid::Uuid,
    name: String,
    created_by: uuid::Uuid,
    registered_at: String,
}

impl From<&OrganisationRecord> for PendingRegistrationRow {
    fn from(organisation: &OrganisationRecord) -> Self {
        Self {
            uuid: organisation.uuid.into_uuid(),
            name: organisation.name.clone(),
            created_by: organisation.created_by.into_uuid(),
            registered_at: organisation.created_at.to_string(),
        }
    }
}

pub(crate) async fn run(args: PendingArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let pending = context
        .organisations
        .list_pending_registrations()
        .await
        .map_err(|error| format!("failed to list pending registrations: {error}"))?;

    if args.json {
        let rows: Vec<PendingRegistrationRow> =
            pending.iter().map(PendingRegistrationRow::from).collect();

        let output = serde_json::to_string_pretty(&rows)
            .map_err(|error| format!("failed to serialise queue: {error}"))?;

        println!("{output}");

        return Ok(());
    }

    if pending.is_empty() {
        println!("no registrations awaiting approval");
        return Ok(());
    }

    for organisation in pending {
        println!(
            "{}  {}  (registered by {} at {})",
            organisation.uuid, organisation.name, organisation.created_by, organisation.created_at
        );
    }

    Ok(())
}
