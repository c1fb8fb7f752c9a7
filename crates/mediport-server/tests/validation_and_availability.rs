mod common;

use axum::http::StatusCode;
use common::{post_form, test_app, test_app_with_settings};
use mediport_db::DbRuntimeSettings;

/// Settings that make pool exhaustion fast to provoke: one connection, short
/// checkout timeout.
fn tiny_pool() -> DbRuntimeSettings {
    DbRuntimeSettings {
        pool_max_size: 1,
        checkout_timeout_ms: 100,
        ..DbRuntimeSettings::default()
    }
}

#[tokio::test]
async fn numeric_validation_precedes_any_database_call() {
    // Hold the pool's only connection; a handler that reached the database
    // would fail with 503, so a 200 with a message proves the validation
    // rejected the input first.
    let app = test_app_with_settings(tiny_pool());
    let _held = app.pool.get().expect("should hold the only connection");

    for (path, body, message) in [
        (
            "/search_prescription",
            "pid=abc",
            "Patient id must be a number.",
        ),
        (
            "/search_doctor",
            "pid=100&case_id=two",
            "Case number must be a number.",
        ),
        (
            "/search_near_med",
            "drug_name=aspirin&amount=lots&zip=10027",
            "Amount must be a number.",
        ),
        (
            "/search_near_med",
            "drug_name=aspirin&amount=10&zip=none",
            "Zip code must be a number.",
        ),
        (
            "/doctor_search_patients",
            "pid=12.5",
            "Patient id must be a number.",
        ),
    ] {
        let (status, _, html) = post_form(&app.router, path, body).await;
        assert_eq!(status, StatusCode::OK, "{path} should fail validation, not the db");
        assert!(html.contains(message), "{path} should report: {message}");
    }
}

#[tokio::test]
async fn missing_fields_fail_validation_not_decoding() {
    let app = test_app();

    // An entirely empty body must decode (every field is optional at the
    // wire) and fail validation with a message, never a 422.
    let (status, _, body) = post_form(&app.router, "/search_doctor", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter your patient ID."));
    assert!(body.contains("Please enter your case number."));

    let (status, _, body) = post_form(&app.router, "/doctor_search_medicine", "ndc=0001-01").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter the medicine name you are looking for."));
}

#[tokio::test]
async fn exhausted_pool_yields_service_unavailable() {
    let app = test_app_with_settings(tiny_pool());
    let _held = app.pool.get().expect("should hold the only connection");

    let (status, _, body) = post_form(&app.router, "/search_prescription", "pid=100").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("database is currently unavailable"));
}

#[tokio::test]
async fn requests_recover_once_the_pool_frees_up() {
    let app = test_app_with_settings(tiny_pool());

    {
        let _held = app.pool.get().expect("should hold the only connection");
        let (status, _, _) = post_form(&app.router, "/search_prescription", "pid=100").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    // Connection returned; the next request acquires a fresh session.
    let (status, _, body) = post_form(&app.router, "/search_prescription", "pid=100").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No record is found"));
}
