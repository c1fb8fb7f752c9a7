//! Mediport server library logic.
//!
//! A thin HTTP layer over the pharmacy/hospital database: each POST route
//! decodes a form, validates it, runs one parameterized query through a
//! request-scoped [`mediport_db::DbSession`], and renders the rows (or a
//! message) back into the originating page.

pub mod api_clinician;
pub mod api_doctor;
pub mod api_patient;
pub mod api_pharmacy;
pub mod api_prescription;
pub mod config;
pub mod error;
pub mod forms;
pub mod pages;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use mediport_db::{DbPool, DbSession, QueryError, ResultSet};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use error::PageError;

/// The message rendered when a search matches nothing.
pub const NO_RECORD: &str = "No record is found";

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; each request checks out one connection.
    pub pool: DbPool,
}

/// Runs one select through a request-scoped session on the blocking pool.
///
/// This is the execute step shared by every search route: acquire a session
/// for this request, run exactly one query, release, hand the rows back.
/// Acquisition failure surfaces as [`PageError::Unavailable`] (503).
pub(crate) async fn run_query<F>(state: Arc<AppState>, query: F) -> Result<ResultSet, PageError>
where
    F: FnOnce(&rusqlite::Connection) -> Result<ResultSet, QueryError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<ResultSet, PageError> {
        let mut session = DbSession::acquire(&state.pool)?;
        let rows = query(session.conn()?)?;
        session.release();
        Ok(rows)
    })
    .await
    .map_err(|e| PageError::Internal(format!("task join error: {e}")))?
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::index_handler))
        .route("/another", get(pages::another_handler))
        .route("/patient", get(pages::patient_form_handler))
        .route("/prescription", get(pages::prescription_form_handler))
        .route("/finddoctor", get(pages::finddoctor_form_handler))
        .route("/findhospitalmed", get(pages::findhospitalmed_form_handler))
        .route("/doctorfindmed", get(pages::doctorfindmed_form_handler))
        .route(
            "/doctorfindpatient",
            get(pages::doctorfindpatient_form_handler),
        )
        .route("/add_patient", post(api_patient::add_patient_handler))
        .route(
            "/search_prescription",
            post(api_prescription::search_prescription_handler),
        )
        .route("/search_doctor", post(api_doctor::search_doctor_handler))
        .route(
            "/search_doctor_type",
            post(api_doctor::search_doctor_type_handler),
        )
        .route(
            "/search_near_med",
            post(api_pharmacy::search_near_med_handler),
        )
        .route(
            "/doctor_search_medicine",
            post(api_clinician::doctor_search_medicine_handler),
        )
        .route(
            "/doctor_search_patients",
            post(api_clinician::doctor_search_patients_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
