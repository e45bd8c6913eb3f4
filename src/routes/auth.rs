use crate::{
    auth::{LoginRequest, RegisterRequest},
    error::AppError,
    store::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new identity.
///
/// Responds 201 with the created identity; a taken username is a 409.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let identity = state
        .credentials
        .register(&payload.username, &payload.password)
        .await?;

    Ok(HttpResponse::Created().json(identity))
}

/// Verify a username/password pair.
///
/// Both an unknown username and a wrong password respond 401 with the same
/// body.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    state
        .credentials
        .verify(&payload.username, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "login successful" })))
}
