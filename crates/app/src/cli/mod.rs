use clap::{Parser, Subcommand};

mod organisation;
mod profile;

#[derive(Debug, Parser)]
#[command(name = "agora-app", about = "Agora admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Profile(profile::ProfileCommand),
    Organisation(organisation::OrganisationCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Profile(command) => profile::run(command).await,
            Commands::Organisation(command) => organisation::run(command).await,
        }
    }
}
