mod config;
mod handler;
mod service;
mod session;

use service::search::SearchService;

fn init_logs() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dracin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(cfg!(debug_assertions)))
        .try_init();
}

#[tokio::main]
async fn main() {
    init_logs();

    let config = match config::Config::from_env() {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("unable to load configuration: {err}");
            std::process::exit(1);
        }
    };
    tracing::debug!("loaded configuration {config:?}");

    let manager = match config.sources.build() {
        Ok(value) => value,
        Err(err) => {
            tracing::error!("unable to build sources: {err}");
            std::process::exit(1);
        }
    };
    let addr = config.server.address();
    let state = handler::AppState {
        search: SearchService::new(manager, &config.cache),
        session: config.session,
    };

    let app = handler::router(state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    tracing::debug!("listening on {addr}");

    if let Err(err) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server stopped: {err}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("unable to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("unable to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
