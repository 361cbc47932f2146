//! Integration tests for the telemetry ingestion endpoints.
//!
//! The scenario matrix follows the ingestion contract: valid
//! submissions create exactly one associated record; missing or empty
//! required fields are rejected with 400 and nothing is stored;
//! unknown tokens are rejected with 403; non-POST methods get 405 with
//! `Allow: POST`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_form};
use sqlx::SqlitePool;
use stardust_db::models::project::{CreateProject, Project};
use stardust_db::repositories::{
    ErrorReportRepo, ProjectRepo, RequestLogRepo, ResponseSampleRepo,
};

/// Seed the project every test submits against (token "123").
async fn seed_project(pool: &SqlitePool) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: "project name".into(),
            url: "http://projecturl.com".into(),
            token: Some("123".into()),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// POST /api/error/ -- success path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn error_post_creates_record_linked_to_project(pool: SqlitePool) {
    let project = seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_form(
        app,
        "/api/error/",
        &[
            ("exception", "some exception"),
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["exception"], "some exception");

    let reports = ErrorReportRepo::list_for_project(&pool, project.id, 50, 0)
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].exception, "some exception");
    assert_eq!(reports[0].url, "http://someurl.com");
    assert_eq!(reports[0].traceback, "some traceback");
    assert_eq!(reports[0].project_id, project.id);
}

// ---------------------------------------------------------------------------
// POST /api/error/ -- validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn error_post_rejects_missing_or_empty_fields(pool: SqlitePool) {
    seed_project(&pool).await;

    // Each case drops or empties one required field.
    let cases: Vec<Vec<(&str, &str)>> = vec![
        // empty url
        vec![
            ("exception", "some exception"),
            ("url", ""),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
        // empty exception
        vec![
            ("exception", ""),
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
        // empty traceback
        vec![
            ("exception", "some exception"),
            ("url", "http://someurl.com"),
            ("traceback", ""),
            ("token", "123"),
        ],
        // missing url
        vec![
            ("exception", "some exception"),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
        // missing exception
        vec![
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
        // missing traceback
        vec![
            ("exception", "some exception"),
            ("url", "http://someurl.com"),
            ("token", "123"),
        ],
        // missing token
        vec![
            ("exception", "some exception"),
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
        ],
    ];

    for fields in cases {
        let app = build_test_app(pool.clone());
        let response = post_form(app, "/api/error/", &fields).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "fields {fields:?} should be rejected"
        );
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    assert_eq!(ErrorReportRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// POST /api/error/ -- unknown token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn error_post_rejects_unknown_token(pool: SqlitePool) {
    seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_form(
        app,
        "/api/error/",
        &[
            ("exception", "some exception"),
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
            ("token", "not-a-real-token"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");

    assert_eq!(ErrorReportRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Method not allowed, all three endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn non_post_method_returns_405_with_allow_post(pool: SqlitePool) {
    seed_project(&pool).await;

    for uri in ["/api/error/", "/api/response/", "/api/request/"] {
        let app = build_test_app(pool.clone());
        let response = get(app, uri).await;

        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "GET {uri} should be rejected"
        );

        let allow = response
            .headers()
            .get("allow")
            .unwrap_or_else(|| panic!("405 for {uri} must carry an Allow header"))
            .to_str()
            .unwrap();
        assert!(
            allow.contains("POST"),
            "Allow header for {uri} should list POST, got: {allow}"
        );
        assert!(
            !allow.contains("GET"),
            "Allow header for {uri} should not list GET, got: {allow}"
        );
    }
}

// ---------------------------------------------------------------------------
// POST /api/response/
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn response_post_creates_record_with_exact_time(pool: SqlitePool) {
    let project = seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_form(
        app,
        "/api/response/",
        &[
            ("time", "0.1123"),
            ("url", "http://someurl.com"),
            ("token", "123"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let samples = ResponseSampleRepo::list_for_project(&pool, project.id, 50, 0)
        .await
        .unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].time_secs, 0.1123);
    assert_eq!(samples[0].url, "http://someurl.com");
    assert_eq!(samples[0].project_id, project.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_post_rejects_invalid_submissions(pool: SqlitePool) {
    seed_project(&pool).await;

    let cases: Vec<Vec<(&str, &str)>> = vec![
        // empty url
        vec![("time", "0.1123"), ("url", ""), ("token", "123")],
        // missing url
        vec![("time", "0.1124"), ("token", "123")],
        // missing time
        vec![("url", "http://someurl.com"), ("token", "123")],
        // non-numeric time
        vec![("time", "fast"), ("url", "http://someurl.com"), ("token", "123")],
        // negative time
        vec![("time", "-1"), ("url", "http://someurl.com"), ("token", "123")],
    ];

    for fields in cases {
        let app = build_test_app(pool.clone());
        let response = post_form(app, "/api/response/", &fields).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "fields {fields:?} should be rejected"
        );
    }

    assert_eq!(ResponseSampleRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// POST /api/request/
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn request_post_creates_record_linked_to_project(pool: SqlitePool) {
    let project = seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_form(
        app,
        "/api/request/",
        &[("url", "http://someurl.com/"), ("token", "123")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let logs = RequestLogRepo::list_for_project(&pool, project.id, 50, 0)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].url, "http://someurl.com/");
    assert_eq!(logs[0].project_id, project.id);
}

/// An empty body is a validation failure and stores nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn request_post_rejects_empty_body(pool: SqlitePool) {
    seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let response = post_form(app, "/api/request/", &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(RequestLogRepo::count(&pool).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// No idempotence: resubmission creates a new record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn identical_submissions_create_separate_records(pool: SqlitePool) {
    seed_project(&pool).await;

    let fields = [
        ("exception", "some exception"),
        ("url", "http://someurl.com"),
        ("traceback", "some traceback"),
        ("token", "123"),
    ];
    for _ in 0..2 {
        let app = build_test_app(pool.clone());
        let response = post_form(app, "/api/error/", &fields).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(ErrorReportRepo::count(&pool).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Oversized exception messages are truncated, not rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn oversized_exception_is_truncated(pool: SqlitePool) {
    let project = seed_project(&pool).await;
    let app = build_test_app(pool.clone());

    let long_exception = "x".repeat(1000);
    let response = post_form(
        app,
        "/api/error/",
        &[
            ("exception", long_exception.as_str()),
            ("url", "http://someurl.com"),
            ("traceback", "some traceback"),
            ("token", "123"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let reports = ErrorReportRepo::list_for_project(&pool, project.id, 50, 0)
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].exception.chars().count(),
        stardust_core::telemetry::MAX_EXCEPTION_LEN
    );
}
