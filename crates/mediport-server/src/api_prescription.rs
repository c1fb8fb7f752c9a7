//! Prescription search.

use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::response::{IntoResponse, Response};
use mediport_db::query;

use crate::error::PageError;
use crate::forms::{self, PrescriptionSearchForm, Violations};
use crate::{pages, run_query, AppState, NO_RECORD};

/// Handler for `POST /search_prescription`.
pub async fn search_prescription_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<PrescriptionSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let pid = forms::require_i64(
        form.pid.as_deref(),
        &mut violations,
        "Please enter your patient ID.",
        "Patient id must be a number.",
    );

    let Some(pid) = pid else {
        return Ok(
            pages::prescription_page(Some(&violations.into_message()), None).into_response(),
        );
    };

    let rows = run_query(state, move |conn| {
        query::prescriptions_for_patient(conn, pid)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::prescription_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::prescription_page(None, Some(&rows)).into_response())
    }
}
