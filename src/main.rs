use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tenant_console::{
    api::ApiClient,
    cli::{Cli, Commands},
    commands::{self, ListOptions},
    config::Config,
    console,
    session::Session,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "tenant_console=info");
    }

    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let interactive = cli.command.as_ref().map_or(true, Commands::is_interactive);
    init_logging(&config.log_file, interactive);

    config.validate()?;
    info!("Using API at {}", config.api_url);

    let session = Session::new(config.api_token.clone());
    let client = ApiClient::new(&config, session).context("Failed to create API client")?;

    let result = match cli.command {
        None => console::run_tui(&config, client, None).await,
        Some(Commands::Tui { resource }) => console::run_tui(&config, client, resource).await,
        Some(Commands::List {
            resource,
            query,
            sort,
            desc,
            page,
            page_size,
        }) => {
            let options = ListOptions {
                query,
                sort,
                desc,
                page,
                page_size: page_size.unwrap_or(config.page_size),
            };
            commands::list(client, resource, &options).await
        }
        Some(Commands::Delete { resource, id }) => commands::delete(client, resource, &id).await,
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

/// Log to `log_file`, and to stderr as well unless the console owns the terminal
fn init_logging(log_file: &Path, interactive: bool) {
    let directory = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "tenant-console.log".into());
    let file_appender = tracing_appender::rolling::never(directory, file_name);

    let stderr_layer = (!interactive).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}
