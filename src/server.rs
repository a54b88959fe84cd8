//! HTTP server initialization and runtime setup.
//!
//! Builds the outbound clients and the temperature query for the configured
//! mode, then runs the Axum server until a shutdown signal arrives.

use crate::application::services::{GatewayService, TemperatureQuery, TemperatureService};
use crate::config::{Config, RemoteApiConfig};
use crate::infrastructure::http::{
    JsonHttpClient, TemperatureGatewayClient, ViaCepClient, WeatherApiClient,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Builds the temperature query for the configured mode.
///
/// Without an upstream API the location and weather clients are wired into a
/// [`TemperatureService`]. With one, requests are validated and forwarded
/// through a [`GatewayService`].
///
/// # Errors
///
/// Returns an error if a base URL is invalid or an HTTP client cannot be built.
pub fn build_temperature_query(config: &Config) -> Result<Arc<dyn TemperatureQuery>> {
    match &config.upstream_api {
        Some(upstream) => build_gateway(config, upstream),
        None => build_local(config),
    }
}

fn build_local(config: &Config) -> Result<Arc<dyn TemperatureQuery>> {
    let timeout = config.http_timeout();

    let location_http = JsonHttpClient::new(
        config.location_api.parsed_base_url()?,
        config.location_api.token.clone(),
        timeout,
    )
    .context("Failed to build location client")?;
    let location_lookup = ViaCepClient::new(location_http, config.location_path_suffix.clone());

    // The weather key travels as a query parameter, never as a header.
    let weather_http = JsonHttpClient::new(config.weather_api.parsed_base_url()?, None, timeout)
        .context("Failed to build weather client")?;
    let weather_lookup =
        WeatherApiClient::new(weather_http, config.weather_api.token.clone().unwrap_or_default());

    let validator = config.cep_validator.build(&config.cep_states);

    Ok(Arc::new(TemperatureService::new(
        validator,
        Arc::new(location_lookup),
        Arc::new(weather_lookup),
    )))
}

fn build_gateway(config: &Config, upstream: &RemoteApiConfig) -> Result<Arc<dyn TemperatureQuery>> {
    let upstream_http = JsonHttpClient::new(
        upstream.parsed_base_url()?,
        upstream.token.clone(),
        config.http_timeout(),
    )
    .context("Failed to build upstream temperature client")?;

    let validator = config.cep_validator.build(&config.cep_states);

    Ok(Arc::new(GatewayService::new(
        validator,
        Arc::new(TemperatureGatewayClient::new(upstream_http)),
    )))
}

/// Builds the shared handler state around `shutdown`.
///
/// # Errors
///
/// See [`build_temperature_query`].
pub fn build_state(config: &Config, shutdown: CancellationToken) -> Result<AppState> {
    let query = build_temperature_query(config)?;
    Ok(AppState::new(
        query,
        shutdown,
        config.cep_validator,
        config.mode(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// On Ctrl+C or SIGTERM the root cancellation token is cancelled, which
/// aborts in-flight lookups, and the server drains open connections.
///
/// # Errors
///
/// Returns an error if:
/// - Client construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let shutdown = CancellationToken::new();
    let state = build_state(&config, shutdown.clone())?;
    tracing::info!(
        validator = %config.cep_validator,
        mode = %config.mode(),
        "Temperature service ready"
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves once a shutdown signal is received, after cancelling `shutdown`.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = shutdown.cancelled() => {},
    }

    tracing::info!("Shutdown signal received, cancelling in-flight requests");
    shutdown.cancel();
}
