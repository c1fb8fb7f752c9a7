//! Clinician-facing searches: medicine by NDC, patients via prescriptions.

use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::response::{IntoResponse, Response};
use mediport_db::query;

use crate::error::PageError;
use crate::forms::{self, MedicineSearchForm, PatientSearchForm, Violations};
use crate::{pages, run_query, AppState, NO_RECORD};

/// Handler for `POST /doctor_search_medicine`.
pub async fn doctor_search_medicine_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<MedicineSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let drug_name = forms::require_text(
        form.drug_name.as_deref(),
        &mut violations,
        "Please enter the medicine name you are looking for.",
    );
    let ndc = forms::require_text(
        form.ndc.as_deref(),
        &mut violations,
        "Please enter the ndc of the medicine you are looking for.",
    );

    let (Some(drug_name), Some(ndc)) = (drug_name, ndc) else {
        return Ok(
            pages::doctorfindmed_page(Some(&violations.into_message()), None).into_response(),
        );
    };

    let rows = run_query(state, move |conn| {
        query::medicine_locations(conn, &drug_name, &ndc)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::doctorfindmed_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::doctorfindmed_page(None, Some(&rows)).into_response())
    }
}

/// Handler for `POST /doctor_search_patients`.
pub async fn doctor_search_patients_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<PatientSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let pid = forms::require_i64(
        form.pid.as_deref(),
        &mut violations,
        "Please enter the patient ID you are looking for.",
        "Patient id must be a number.",
    );

    let Some(pid) = pid else {
        return Ok(
            pages::doctorfindpatient_page(Some(&violations.into_message()), None).into_response(),
        );
    };

    let rows = run_query(state, move |conn| {
        query::patients_of_prescriber(conn, pid)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::doctorfindpatient_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::doctorfindpatient_page(None, Some(&rows)).into_response())
    }
}
