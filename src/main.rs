use std::process;

use readmore::{
    application::{error::AppError, search::BlockSearchService},
    config::{self, SearchArgs, Settings},
    domain::dates::DateWindow,
    infra::{db::PostgresRepositories, error::InfraError, telemetry},
    presentation::report,
};
use time::OffsetDateTime;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        config::Command::Search(args) => run_search(settings, args).await,
        config::Command::Migrations(_) => run_migrations(settings).await,
    }
}

async fn run_search(settings: Settings, args: SearchArgs) -> Result<(), AppError> {
    // Validate the window before touching the store.
    let today = OffsetDateTime::now_utc().date();
    let window = DateWindow::resolve(args.date_before.as_deref(), args.date_after.as_deref(), today)
        .map_err(|err| AppError::validation(err.to_string()))?;

    let repositories = connect(&settings).await?;
    let service = BlockSearchService::new(repositories, settings.block.name);
    let search_report = service.run(window).await?;

    print!("{}", report::render(&search_report));
    Ok(())
}

async fn run_migrations(settings: Settings) -> Result<(), AppError> {
    let repositories = connect(&settings).await?;
    repositories.migrate().await?;
    info!("database migrations applied");
    Ok(())
}

async fn connect(settings: &Settings) -> Result<PostgresRepositories, AppError> {
    let url = settings.database.url.as_deref().ok_or_else(|| {
        InfraError::configuration(
            "database.url must be set (file, READMORE__DATABASE__URL, or --database-url)",
        )
    })?;
    let repositories =
        PostgresRepositories::connect(url, settings.database.max_connections).await?;
    Ok(repositories)
}
