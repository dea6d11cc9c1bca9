//! Entry point for the Ditto importer.

use std::process::ExitCode;

use ditto_importer::cli::{
    CliArgs,
    HELP,
};
use ditto_importer::config::{
    API_URL_VARIABLE,
    ApiKey,
    ConfigError,
    ConfigManager,
};
use ditto_importer::import::ImportError;
use ditto_importer::{
    DittoClient,
    Importer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .init();

    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(true) => {
            tracing::info!("Done!");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            tracing::warn!("Done, but some projects failed to import");
            ExitCode::FAILURE
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every selected project was imported without errors.
async fn run(args: &CliArgs) -> Result<bool, ImportError> {
    let api_key = ApiKey::from_env()?;
    let workspace_root = std::env::current_dir().map_err(ConfigError::from)?;
    let config = ConfigManager::load(workspace_root, args.config_path.as_deref())?;
    let client = DittoClient::new(api_key, std::env::var(API_URL_VARIABLE).ok())?;

    let report = Importer::new(config, client).run(args.project.as_deref()).await?;
    tracing::info!(
        projects = report.outcomes.len(),
        files = report.written_count(),
        "Import finished"
    );

    Ok(!report.has_failures())
}

#[allow(clippy::print_stdout)]
fn print_help() {
    print!("{HELP}");
}
