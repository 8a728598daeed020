use agora_app::{
    context::AppContext,
    domain::profiles::{data::NewProfile, records::ProfileUuid},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// Profile display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional profile UUID; generated when omitted
    #[arg(long)]
    profile_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let profile_uuid = args
        .profile_uuid
        .map_or_else(ProfileUuid::new, ProfileUuid::from_uuid);

    let profile = context
        .profiles
        .create_profile(NewProfile {
            uuid: profile_uuid,
            display_name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("display_name: {}", profile.display_name);

    Ok(())
}
