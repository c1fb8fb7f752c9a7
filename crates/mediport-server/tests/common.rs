#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mediport_db::{create_pool, run_migrations, DbPool, DbRuntimeSettings};
use mediport_server::{app, AppState};
use tower::ServiceExt; // for oneshot

/// A router plus the temp dir backing its database. Keep the dir alive for
/// the duration of the test.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: tempfile::TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with_settings(DbRuntimeSettings::default())
}

pub fn test_app_with_settings(settings: DbRuntimeSettings) -> TestApp {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("mediport-test.db");
    let pool =
        create_pool(path.to_str().expect("utf-8 path"), settings).expect("pool should build");
    run_migrations(&pool.get().expect("should get connection")).expect("migrations should run");

    TestApp {
        router: app(AppState { pool: pool.clone() }),
        pool,
        _dir: dir,
    }
}

/// A test app with a small cast of hospitals, doctors, medicines, patients,
/// and prescriptions already in place.
pub fn seeded_app() -> TestApp {
    let test_app = test_app();
    test_app
        .pool
        .get()
        .expect("should get connection")
        .execute_batch(
            "INSERT INTO hospital (hid, hos_name, zip) VALUES
                (1, 'St. Luke', 10025),
                (2, 'Mount Sinai', 10029),
                (3, 'Presbyterian', 10032);
             INSERT INTO doctor_worksin (qid, doc_name, type, hid) VALUES
                (10, 'Chen', 'cardiology', 1),
                (11, 'Okafor', 'oncology', 2),
                (12, 'Silva', 'cardiology', 3);
             INSERT INTO medicine (ndc, med_name) VALUES
                ('0001-01', 'aspirin'),
                ('0002-01', 'atorvastatin');
             INSERT INTO sell_in (hid, ndc, quantity) VALUES
                (1, '0001-01', 50),
                (2, '0001-01', 5),
                (3, '0001-01', 200),
                (2, '0002-01', 30);
             INSERT INTO patient (pid, name, age, gender, zip) VALUES
                (100, 'Ada', 36, 'female', 10027),
                (101, 'Grace', 45, 'female', 10030);
             INSERT INTO prescription_belongto_issue (pid, case_id, qid, ndc) VALUES
                (100, 1, 10, '0001-01'),
                (100, 2, 11, '0002-01'),
                (101, 1, 12, '0001-01');",
        )
        .expect("seed data should insert");
    test_app
}

/// Sends a form-encoded POST and returns the status, `Location` header (if
/// any), and body text.
pub async fn post_form(
    router: &Router,
    path: &str,
    body: &str,
) -> (StatusCode, Option<String>, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .method("POST")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail at the transport level");

    let status = response.status();
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    (status, location, String::from_utf8_lossy(&bytes).into_owned())
}

/// Sends a GET and returns the status and body text.
pub async fn get_page(router: &Router, path: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail at the transport level");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should collect");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
