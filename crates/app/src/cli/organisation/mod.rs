use clap::{Args, Subcommand};

mod approve;
mod pending;

#[derive(Debug, Args)]
pub(crate) struct OrganisationCommand {
    #[command(subcommand)]
    command: OrganisationSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrganisationSubcommand {
    /// List registrations awaiting approval
    Pending(pending::PendingArgs),

    /// Approve a pending registration
    Approve(approve::ApproveArgs),
}

pub(crate) async fn run(command: OrganisationCommand) -> Result<(), String> {
    match command.command {
        OrganisationSubcommand::Pending(args) => pending::run(args).await,
        OrganisationSubcommand::Approve(args) => approve::run(args).await,
    }
}
