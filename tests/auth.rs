use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use futures::future::join;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use taskshare::db::MemoryStorage;
use taskshare::routes;
use taskshare::store::AppState;

fn memory_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(MemoryStorage::new())))
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    // Register
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "alice", "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_number());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Login with the right password
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    // Wrong password and unknown username must be indistinguishable
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "wrong" }))
        .to_request();
    let resp_wrong_password = test::call_service(&app, req).await;
    assert_eq!(
        resp_wrong_password.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    let body_wrong_password: serde_json::Value = test::read_body_json(resp_wrong_password).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "never-registered", "password": "wrong" }))
        .to_request();
    let resp_unknown_user = test::call_service(&app, req).await;
    assert_eq!(
        resp_unknown_user.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    let body_unknown_user: serde_json::Value = test::read_body_json(resp_unknown_user).await;

    assert_eq!(body_wrong_password, body_unknown_user);
    assert_eq!(body_wrong_password["error"], "invalid_credentials");
}

#[actix_rt::test]
async fn test_duplicate_registration() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "alice", "password": "first-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "alice", "password": "second-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "duplicate_identity");

    // The failed attempt left no partial record: the original password
    // still verifies, the rejected one never does.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "first-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "second-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_malformed_registration_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    // Missing password field
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    // Empty username
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": "", "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "malformed_request");
}

#[test_log::test(actix_rt::test)]
async fn test_concurrent_duplicate_registration() {
    let app = test::init_service(
        App::new()
            .app_data(memory_state())
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let payload = json!({ "username": "race", "password": "Password123!" });
    let req_a = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let req_b = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();

    let (resp_a, resp_b) = join(
        test::call_service(&app, req_a),
        test::call_service(&app, req_b),
    )
    .await;

    let mut statuses = [resp_a.status().as_u16(), resp_b.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [201, 409]);
}

// Requires a reachable DATABASE_URL; run with `cargo test -- --ignored`.
#[ignore]
#[actix_rt::test]
async fn test_register_and_login_against_postgres() {
    use sqlx::PgPool;
    use taskshare::db::{self, PgStorage};

    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let state = web::Data::new(AppState::new(Arc::new(PgStorage::new(pool))));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let username = format!("it_auth_{}", uuid::Uuid::new_v4().simple());

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "username": username, "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": username, "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
}
