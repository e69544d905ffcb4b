use shipdesk::adapters::{ConsoleNotifier, FileKeyValueStore, OsNotifier, ReqwestHttpClient};
use shipdesk::api::ApiClient;
use shipdesk::auth::CredentialStore;
use shipdesk::cli::{
    failure_message, parse_args, report_session_events, run_command, version_line, CliCommand,
    USAGE,
};
use shipdesk::config::ApiConfig;
use shipdesk::error::ApiError;
use shipdesk::traits::Notifier;

use color_eyre::Result;
use std::sync::Arc;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SHIPDESK_LOG";

/// Set to `os` to raise desktop notifications instead of printing to stderr.
const NOTIFY_ENV: &str = "SHIPDESK_NOTIFY";

fn notifier() -> Arc<dyn Notifier> {
    match std::env::var(NOTIFY_ENV).as_deref() {
        Ok("os") => Arc::new(OsNotifier::default()),
        _ => Arc::new(ConsoleNotifier::new()),
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args());
    match &command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    let config = ApiConfig::from_env();
    tracing::debug!(base_url = %config.base_url, portal = %config.portal, "Loaded configuration");

    let transport = ReqwestHttpClient::with_timeout(config.timeout)?;
    let credentials = CredentialStore::new(Arc::new(FileKeyValueStore::new()?));
    let client = Arc::new(ApiClient::new(
        config,
        Arc::new(transport),
        credentials,
        notifier(),
    ));
    let mut events = client.subscribe_session();

    let result = run_command(command, client, &mut std::io::stdout()).await;
    let expired = report_session_events(&mut events, &mut std::io::stderr());

    match result {
        Ok(()) => Ok(()),
        Err(report) => match report.downcast_ref::<ApiError>() {
            Some(err) => {
                if let Some(message) = failure_message(err, expired) {
                    eprintln!("{}", message);
                }
                std::process::exit(1)
            }
            None => Err(report),
        },
    }
}
