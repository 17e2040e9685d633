mod cli;
mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, DoctorCommands, FacilityCommands};
use client::CaremapClient;
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let client = CaremapClient::new(&cli.server);

    match &cli.command {
        Commands::Status => {
            commands::server::status(&client, &cli.server).await?;
        }
        Commands::Doctors(args) => match &args.command {
            DoctorCommands::List => commands::directory::list_doctors(&client, format).await?,
            DoctorCommands::Get(id) => {
                commands::directory::get_doctor(&client, id.id, format).await?
            }
        },
        Commands::Facilities(args) => match &args.command {
            FacilityCommands::List(list) => {
                commands::directory::list_facilities(&client, list, format).await?
            }
            FacilityCommands::Get(id) => {
                commands::directory::get_facility(&client, id.id, format).await?
            }
        },
        Commands::Route(args) => {
            commands::route::route(&client, args, format).await?;
        }
    }

    Ok(())
}
