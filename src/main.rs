mod cli;
mod render;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use rhcc_core::{AppError, Config};
use rhcc_forecast::build_report;
use rhcc_openweather::OpenWeatherClient;

use cli::{Command, OutputFormat, USAGE};

#[tokio::main]
async fn main() -> ExitCode {
    let format = match cli::parse(std::env::args().skip(1)) {
        Ok(Command::Run(format)) => format,
        Ok(Command::Help) => {
            print!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("rhcc {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Logging is not up yet; report config problems directly.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = rhcc_core::init(&config.logging.level) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    for warning in config.validate().warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    match run(&config, format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            match e.downcast_ref::<AppError>() {
                Some(app_err) => eprintln!("error: {}", app_err.user_message()),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let timezone = config.timezone().map_err(AppError::from)?;
    let client = OpenWeatherClient::new(&config.openweather)?;

    tracing::info!(
        "Fetching 5-day forecast for {} (report timezone {})",
        config.openweather.location,
        timezone.name()
    );
    let batch = client.fetch_batch().await?;
    let report = build_report(&batch, timezone).map_err(AppError::from)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => render::write_json(&report.entries, &mut out)?,
        OutputFormat::Table => render::write_table(&report.schedule, &mut out)?,
    }
    out.flush()?;

    Ok(())
}
