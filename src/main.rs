use std::error::Error;

use chrono::{Local, NaiveTime};

use tvminder::app::App;
use tvminder::cli::CliArgs;
use tvminder::config::AppConfig;
use tvminder::shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args = CliArgs::parse_args();
    cli_args.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(cli_args.tracing_level())
        .with_writer(std::io::stderr)
        .init();

    let shutdown_manager = shutdown::setup_shutdown_handler();

    let config = AppConfig::load_with_cli_args(&cli_args)?;
    tracing::debug!("Using snapshot {}", config.store.snapshot.display());

    let app = App::new_with_config(config)?;

    // Labels are relative to the start of the reference day
    let now = match cli_args.today {
        Some(today) => today.and_time(NaiveTime::MIN),
        None => Local::now().naive_local(),
    };

    tokio::select! {
        result = app.run(&cli_args.command, now) => {
            if let Err(e) = result {
                tracing::error!("Application error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_manager.wait_for_shutdown() => {
            tracing::info!("Application shutdown requested");
        }
    }

    Ok(())
}
