//! Command-line arguments.

use std::fmt;

pub const USAGE: &str = "\
rhcc - Output optimal contact method based on OpenWeatherMap 5-day forecast

USAGE:
    rhcc [OPTIONS]

OPTIONS:
    --json           Output in JSON format
    -h, --help       Print help
    -V, --version    Print version

ENVIRONMENT:
    RHCC_OWM_API_KEY    OpenWeatherMap API key (required)
    RHCC_LOG_LEVEL      Log level: trace, debug, info, warn, error (default: info)
    RHCC_LOCATION       City query (default: Minneapolis,US)
    RHCC_TIMEZONE       Report timezone (default: America/Chicago)
    RHCC_OWM_BASE_URL   API root (default: https://api.openweathermap.org/data/2.5)
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run(OutputFormat),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownArgument(pub String);

impl fmt::Display for UnknownArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected argument '{}'", self.0)
    }
}

impl std::error::Error for UnknownArgument {}

/// Parse arguments, excluding the program name.
pub fn parse<I, S>(args: I) -> Result<Command, UnknownArgument>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut format = OutputFormat::Table;

    for arg in args {
        let arg = arg.into();
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            _ => return Err(UnknownArgument(arg)),
        }
    }

    Ok(Command::Run(format))
}
