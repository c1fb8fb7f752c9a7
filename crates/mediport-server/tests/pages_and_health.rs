mod common;

use axum::http::StatusCode;
use common::{get_page, test_app};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = test_app();

    let (status, body) = get_page(&app.router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).expect("health body is json");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn every_form_page_serves_blank() {
    let app = test_app();

    for (path, action) in [
        ("/", "/patient"), // landing page links to the forms
        ("/patient", "/add_patient"),
        ("/prescription", "/search_prescription"),
        ("/finddoctor", "/search_doctor"),
        ("/findhospitalmed", "/search_near_med"),
        ("/doctorfindmed", "/doctor_search_medicine"),
        ("/doctorfindpatient", "/doctor_search_patients"),
        ("/another", "/"),
    ] {
        let (status, body) = get_page(&app.router, path).await;
        assert_eq!(status, StatusCode::OK, "{path} should serve");
        assert!(body.contains(action), "{path} should reference {action}");
        assert!(
            !body.contains("No record is found"),
            "{path} blank form carries no notice"
        );
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = test_app();

    let (status, _) = get_page(&app.router, "/login").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
