//! Patient registration.

use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::response::{IntoResponse, Redirect, Response};
use mediport_db::{query, DbSession, NewPatient};

use crate::error::PageError;
use crate::forms::{self, AddPatientForm, Violations};
use crate::{pages, AppState};

/// Handler for `POST /add_patient`.
///
/// Validates every field first (accumulating all messages), checks the pid
/// for uniqueness, inserts, and redirects to the patient form on success.
pub async fn add_patient_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<AddPatientForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let pid = forms::require_i64(
        form.pid.as_deref(),
        &mut violations,
        "Please enter a valid patient id.",
        "Patient id must be a number.",
    );
    let name = forms::require_text(
        form.name.as_deref(),
        &mut violations,
        "Please enter your name.",
    );
    let age = forms::require_i64(
        form.age.as_deref(),
        &mut violations,
        "Please enter a valid age.",
        "Age must be a number.",
    );
    let gender = forms::require_gender(
        form.gender.as_deref(),
        &mut violations,
        "Please select your gender.",
    );
    let zip = forms::require_i64(
        form.zip.as_deref(),
        &mut violations,
        "Please enter zip code.",
        "Zip code must be a number.",
    );

    let (Some(pid), Some(name), Some(age), Some(gender), Some(zip)) =
        (pid, name, age, gender, zip)
    else {
        return Ok(pages::patient_page(Some(&violations.into_message())).into_response());
    };

    let patient = NewPatient {
        pid,
        name,
        age,
        gender: gender.as_str().to_string(),
        zip,
    };

    const DUPLICATE_PID: &str = "Patient id already existed. Please check your pid.";

    let response = tokio::task::spawn_blocking(move || -> Result<Response, PageError> {
        let mut session = DbSession::acquire(&state.pool)?;
        let outcome = {
            let conn = session.conn()?;
            if query::patient_exists(conn, patient.pid)? {
                pages::patient_page(Some(DUPLICATE_PID)).into_response()
            } else {
                match query::insert_patient(conn, &patient) {
                    Ok(()) => {
                        tracing::info!(pid = patient.pid, "registered new patient");
                        Redirect::to("/patient").into_response()
                    }
                    // The probe and insert are two statements; a concurrent
                    // insert of the same pid can land between them.
                    Err(e) if e.is_constraint_violation() => {
                        pages::patient_page(Some(DUPLICATE_PID)).into_response()
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };
        session.release();
        Ok(outcome)
    })
    .await
    .map_err(|e| PageError::Internal(format!("task join error: {e}")))??;

    Ok(response)
}
