use std::error::Error;

use clap::{Arg, ArgMatches, Command};

use finlead::comm::config::Settings;
use finlead::AppBootstrap;

fn build_app() -> Command {
    Command::new("finlead")
        .about("Lead-capture backend for the finlead marketing site")
        .subcommand_required(true)
        .subcommand(
            Command::new("server")
                .about("Run the HTTP API server")
                .arg(Arg::new("host").long("host").value_name("HOST"))
                .arg(Arg::new("port").long("port").value_name("PORT")),
        )
        .subcommand(Command::new("version").about("Print the version"))
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let matches = build_app().get_matches();

    match matches.subcommand() {
        Some(("server", sub_matches)) => {
            handle_server_command(sub_matches).await?;
        }
        Some(("version", _)) => {
            println!("finlead {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("unknown command, see --help");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn handle_server_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut settings = Settings::load()?;

    // CLI flags win over file and environment configuration.
    if let Some(host) = matches.get_one::<String>("host") {
        settings.server.host = host.clone();
    }
    if let Some(port) = matches.get_one::<String>("port") {
        settings.server.port = port.parse()?;
    }

    AppBootstrap::new().with_settings(settings).run().await?;
    Ok(())
}
