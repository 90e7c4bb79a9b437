use clap::Parser;
use supctl_core::{StatusOptions, SupervisorClient};

mod cli;
mod output;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    supctl_core::logging::init(cli.verbose);

    let config = cli.client_config()?;
    log::debug!("using {:?}", config);
    let client = SupervisorClient::new(config);

    match &cli.command {
        cli::Command::Status { names, json } => {
            let programs = client.status(&StatusOptions::names(names.iter().cloned()))?;
            if *json {
                println!("{}", output::render_json(&programs)?);
            } else {
                print!("{}", output::render_table(&programs));
            }
        }
        cli::Command::Start { name, no_wait } => {
            if *no_wait {
                client.start_detached(name);
            } else {
                client.start(name)?;
            }
            log::info!("{}: start requested", name);
        }
        cli::Command::Stop { name } => {
            client.stop(name)?;
            log::info!("{}: stopped", name);
        }
        cli::Command::Restart { name, no_wait } => {
            if *no_wait {
                client.restart_detached(name);
            } else {
                client.restart(name)?;
            }
            log::info!("{}: restart requested", name);
        }
    }

    Ok(())
}
