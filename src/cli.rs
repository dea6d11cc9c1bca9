//! Command line arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Prefix of the positional project filter, e.g. `project=web`.
const PROJECT_ARG_PREFIX: &str = "project=";

pub const HELP: &str = "\
Import Ditto translation projects into JSON or TypeScript files.

USAGE:
    ditto-importer [project=<id-or-name>] [OPTIONS]

OPTIONS:
    --project <id-or-name>  Import only the project with this id or name
    --config <path>         Configuration file [default: ditto-import-conf.json]
    -h, --help              Print help

ENVIRONMENT:
    DITTO_API_KEY           API key sent in the Authorization header (required)
    DITTO_API_URL           API base URL [default: https://api.dittowords.com]
    RUST_LOG                Log filter [default: info]
";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    Args(#[from] pico_args::Error),

    #[error("Unexpected argument: {0}")]
    Unexpected(String),

    #[error("Project filter given twice: {0} and {1}")]
    DuplicateProject(String, String),
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Id or name of the only project to import.
    pub project: Option<String>,
    pub config_path: Option<PathBuf>,
    pub help: bool,
}

impl CliArgs {
    /// # Errors
    /// Returns `CliError` for malformed or unknown arguments.
    pub fn from_env() -> Result<Self, CliError> {
        Self::parse(std::env::args_os().skip(1).collect())
    }

    /// Parses arguments, excluding the program name.
    ///
    /// # Errors
    /// Returns `CliError` for malformed or unknown arguments.
    pub fn parse(args: Vec<OsString>) -> Result<Self, CliError> {
        let mut args = pico_args::Arguments::from_vec(args);

        let help = args.contains(["-h", "--help"]);
        let mut project: Option<String> = args.opt_value_from_str("--project")?;
        let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;

        for free in args.finish() {
            let free = free.to_string_lossy().into_owned();
            let Some(filter) = free.strip_prefix(PROJECT_ARG_PREFIX) else {
                return Err(CliError::Unexpected(free));
            };
            if filter.is_empty() {
                continue;
            }
            if let Some(existing) = project.filter(|existing| !existing.is_empty()) {
                return Err(CliError::DuplicateProject(existing, filter.to_string()));
            }
            project = Some(filter.to_string());
        }

        // An empty filter selects every project.
        let project = project.filter(|filter| !filter.is_empty());
        Ok(Self { project, config_path, help })
    }
}
