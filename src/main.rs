use std::{process, sync::Arc, time::Duration};

use blog_admin::{
    application::error::AppError,
    config,
    infra::{
        error::InfraError,
        http::{self, ApiState},
        store::MemoryStore,
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
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

    match cli_args
        .command
        .unwrap_or(config::Command::Serve(config::ServeArgs::default()))
    {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store = match settings.store.seed_file.as_deref() {
        Some(path) => MemoryStore::load_seed(path).await?,
        None => MemoryStore::new(),
    };
    let router = http::build_router(ApiState::new(store));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(target = "blog_admin::server", addr = %local_addr, "listening");

    let stopping = Arc::new(Notify::new());
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown({
        let stopping = Arc::clone(&stopping);
        async move {
            shutdown_signal().await;
            stopping.notify_one();
        }
    });

    drain_with_deadline(server.into_future(), &stopping, settings.server.graceful_shutdown).await?;
    info!(target = "blog_admin::server", "stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(target = "blog_admin::server", error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!(target = "blog_admin::server", "shutdown requested");
}

/// Drive the server to completion; once shutdown has been requested, open
/// connections get at most `grace` to finish.
async fn drain_with_deadline<F>(server: F, stopping: &Notify, grace: Duration) -> Result<(), AppError>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);
    tokio::select! {
        result = &mut server => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
        }
        () = async {
            stopping.notified().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(target = "blog_admin::server", "graceful shutdown timed out");
            Ok(())
        }
    }
}
