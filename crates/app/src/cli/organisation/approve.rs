use agora_app::{context::AppContext, domain::organisations::records::OrganisationUuid};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ApproveArgs {
    /// UUID of the organisation to approve
    #[arg(long)]
    organisation_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ApproveArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let organisation = context
        .organisations
        .approve_registration(OrganisationUuid::from_uuid(args.organisation_uuid))
        .await
        .map_err(|error| format!("failed to approve organisation: {error}"))?;

    println!("organisation_uuid: {}", organisation.uuid);
    println!("name: {}", organisation.name);
    println!("status: {}", organisation.status);

    Ok(())
}
