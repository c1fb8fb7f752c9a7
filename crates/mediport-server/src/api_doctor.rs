//! Doctor lookup: by prescription case, and by specialty.

use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::response::{IntoResponse, Response};
use mediport_db::query;

use crate::error::PageError;
use crate::forms::{self, DoctorSearchForm, DoctorTypeSearchForm, Violations};
use crate::{pages, run_query, AppState, NO_RECORD};

/// Handler for `POST /search_doctor`.
///
/// Resolves the doctor who issued the prescription identified by patient id
/// plus case number, joined with the hospital they work in.
pub async fn search_doctor_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<DoctorSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let pid = forms::require_i64(
        form.pid.as_deref(),
        &mut violations,
        "Please enter your patient ID.",
        "Patient id must be a number.",
    );
    let case_id = forms::require_i64(
        form.case_id.as_deref(),
        &mut violations,
        "Please enter your case number.",
        "Case number must be a number.",
    );

    let (Some(pid), Some(case_id)) = (pid, case_id) else {
        return Ok(pages::finddoctor_page(Some(&violations.into_message()), None).into_response());
    };

    let rows = run_query(state, move |conn| {
        query::doctors_for_case(conn, pid, case_id)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::finddoctor_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::finddoctor_page(None, Some(&rows)).into_response())
    }
}

/// Handler for `POST /search_doctor_type`.
pub async fn search_doctor_type_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<DoctorTypeSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let specialty = forms::require_text(
        form.specialty.as_deref(),
        &mut violations,
        "Please enter the type of doctor you are looking for.",
    );

    let Some(specialty) = specialty else {
        return Ok(pages::finddoctor_page(Some(&violations.into_message()), None).into_response());
    };

    let rows = run_query(state, move |conn| {
        query::doctors_by_specialty(conn, &specialty)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::finddoctor_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::finddoctor_page(None, Some(&rows)).into_response())
    }
}
