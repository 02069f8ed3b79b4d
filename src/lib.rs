//! Documentation of the movie-night scoreboard service.
//!
//!
//!
//! # General Infrastructure
//! - The landing page runs the feather mini-game in the browser and talks
//!   to this service for the public scoreboard
//! - Two routes only: `GET /scores` reads the board, `POST /scores` submits
//!   a finished game session
//! - Scores live in a single SQLite table; the visible board is the top 50
//!   entries from the trailing 24 hours
//! - Entries are never edited or deleted, the window filter at read time
//!   keeps the board fresh while history stays on disk
//!
//!
//!
//! # Abuse Mitigation
//!
//! **Goal**: keep one player from flooding the board without building real
//! account infrastructure. Acts as a light first barrier, not a guarantee.
//!
//! - The submitter's address (first `x-forwarded-for` entry) is salted and
//!   hashed before it touches storage; the raw address is never kept or logged
//! - A submission is refused with 429 once an identity hash has 3 entries
//!   inside the trailing 10 seconds
//! - The counter is a store read, so a store outage fails the submission
//!   instead of silently waving it through
//! - Optionally, the `Origin` header is checked against a configured
//!   allow-list before anything else runs
//!
//!
//!
//! # Configuration
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `RUST_PORT` | `1111` | Listen port |
//! | `DATABASE_URL` | `sqlite://scores.db` | Score store location |
//! | `IP_SALT` | insecure dev salt | Salt for identity hashing |
//! | `ALLOWED_ORIGIN` | unset (check disabled) | Allow-listed base origin |
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run locally with logs.
//! ```sh
//! RUST_LOG=info cargo run
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{scores_handler, submit_handler};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/scores", get(scores_handler).post(submit_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = State::new().await;

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
