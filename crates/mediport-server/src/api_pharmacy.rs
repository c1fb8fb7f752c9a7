//! Nearby medicine stock search.

use std::sync::Arc;

use axum::extract::{Extension, Form};
use axum::response::{IntoResponse, Response};
use mediport_db::query;

use crate::error::PageError;
use crate::forms::{self, NearMedSearchForm, Violations};
use crate::{pages, run_query, AppState, NO_RECORD};

/// Handler for `POST /search_near_med`.
///
/// Lists hospitals holding at least the requested quantity of a medicine,
/// closest zip code first.
pub async fn search_near_med_handler(
    Extension(state): Extension<Arc<AppState>>,
    Form(form): Form<NearMedSearchForm>,
) -> Result<Response, PageError> {
    let mut violations = Violations::default();
    let drug_name = forms::require_text(
        form.drug_name.as_deref(),
        &mut violations,
        "Please enter the medicine name you are looking for.",
    );
    let amount = forms::require_i64(
        form.amount.as_deref(),
        &mut violations,
        "Please enter the amount of medicine you are looking for.",
        "Amount must be a number.",
    );
    let zip = forms::require_i64(
        form.zip.as_deref(),
        &mut violations,
        "Please enter your zip code.",
        "Zip code must be a number.",
    );

    let (Some(drug_name), Some(amount), Some(zip)) = (drug_name, amount, zip) else {
        return Ok(
            pages::findhospitalmed_page(Some(&violations.into_message()), None).into_response(),
        );
    };

    let rows = run_query(state, move |conn| {
        query::hospitals_with_stock(conn, &drug_name, amount, zip)
    })
    .await?;

    if rows.is_empty() {
        Ok(pages::findhospitalmed_page(Some(NO_RECORD), None).into_response())
    } else {
        Ok(pages::findhospitalmed_page(None, Some(&rows)).into_response())
    }
}
