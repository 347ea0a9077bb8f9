use trip_server::config::ServerConfig;
use trip_server::maps::MapsClient;
use trip_server::route::{CancelHandle, cancel_pair};
use trip_server::trips::TripClient;
use trip_server::web::{AppState, create_router};

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trip_server=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    let maps = MapsClient::new(config.maps.clone()).expect("Failed to create maps client");
    let trips = TripClient::new(config.trips.clone()).expect("Failed to create trip client");

    let (shutdown, shutdown_token) = cancel_pair();
    let state = AppState::new(maps, trips, &config.geocode_cache, shutdown_token);
    let app = create_router(state);

    let addr = config.bind_addr;
    info!(%addr, trips_api = %config.trips.base_url, "trip planner listening");
    info!("endpoints: GET /health, POST /route, GET /trips/:trip_id/itinerary");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .expect("Server error");
}

/// Wait for Ctrl+C, then abandon route requests still waiting on lookups.
async fn shutdown_signal(shutdown: CancelHandle) {
    tokio::signal::ctrl_c().await.ok();
    info!("shutdown signal received");
    shutdown.cancel();
}
