use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ngo_ledger_backend::rest::{self, AppState};
use ngo_ledger_backend::Backend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Data directory defaults to ~/Documents/NGO Ledger, overridable for
    // deployments that keep data elsewhere.
    let backend = match std::env::var("NGO_LEDGER_DATA") {
        Ok(data_dir) => Backend::with_data_dir(data_dir)?,
        Err(_) => Backend::new()?,
    };
    let state = AppState::new(Arc::new(backend));

    // CORS setup so a browser frontend on another port can call us
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/donors", get(rest::list_donors).post(rest::create_donor))
        .route("/donors/:id", delete(rest::delete_donor))
        .route("/donations", get(rest::list_donations).post(rest::create_donation))
        .route("/expenses", get(rest::list_expenses).post(rest::create_expense))
        .route("/expenses/:id/status", put(rest::update_expense_status))
        .route("/members", get(rest::list_members).post(rest::create_member))
        .route("/members/:id", delete(rest::delete_member))
        .route("/dashboard", get(rest::get_dashboard))
        .route("/reports", get(rest::get_report))
        .route("/reports/export/:kind", get(rest::export_report))
        .route("/reports/export", post(rest::export_report_to_path))
        .route(
            "/session",
            get(rest::get_session).post(rest::sign_in).delete(rest::sign_out),
        );

    let app = Router::new().nest("/api", api_routes).layer(cors).with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
