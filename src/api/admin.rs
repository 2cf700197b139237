use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::config::Config;
use crate::ledger::error::LedgerError;
use crate::settings::{self, MySqlSettings};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@mess.local")]
    pub email: String,
    #[schema(example = "Admin@123")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinRequest {
    #[schema(example = "9999")]
    pub new_pin: String,
}

#[derive(Deserialize, ToSchema)]
pub struct VerifyPinRequest {
    #[schema(example = "1234")]
    pub pin: String,
}

/// Admin login (plain credential comparison, no session issued)
///
/// The caller holds a client-side flag on success; there is nothing to
/// expire or revoke server-side.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "success": true, "message": "Login successful"
        })),
        (status = 401, description = "Invalid admin credentials", body = Object, example = json!({
            "success": false, "error": "Invalid admin credentials"
        }))
    ),
    tag = "Admin"
)]
pub async fn login(config: web::Data<Config>, payload: web::Json<LoginRequest>) -> impl Responder {
    if payload.email == config.admin_email && payload.password == config.admin_password {
        info!(email = %payload.email, "Admin login successful");
        HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Login successful"
        }))
    } else {
        info!(email = %payload.email, "Admin login rejected");
        HttpResponse::Unauthorized().json(json!({
            "success": false,
            "error": "Invalid admin credentials"
        }))
    }
}

/// Update the global kiosk PIN
#[utoipa::path(
    post,
    path = "/api/settings/update-pin",
    request_body = UpdatePinRequest,
    responses(
        (status = 200, description = "PIN updated", body = Object, example = json!({
            "message": "PIN updated"
        })),
        (status = 400, description = "PIN must be exactly 4 digits"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn update_pin(
    store: web::Data<MySqlSettings>,
    payload: web::Json<UpdatePinRequest>,
) -> impl Responder {
    match settings::update_global_pin(store.get_ref(), &payload.new_pin).await {
        Ok(()) => {
            info!("Kiosk PIN updated");
            HttpResponse::Ok().json(json!({ "message": "PIN updated" }))
        }
        Err(LedgerError::Validation(msg)) => {
            HttpResponse::BadRequest().json(json!({ "error": msg }))
        }
        Err(e) => {
            error!(error = %e, "Failed to update PIN");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

/// Verify the kiosk PIN before a device-identity change
#[utoipa::path(
    post,
    path = "/api/settings/verify-pin",
    request_body = VerifyPinRequest,
    responses(
        (status = 200, description = "Verification result", body = Object, example = json!({
            "valid": true
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin"
)]
pub async fn verify_pin(
    store: web::Data<MySqlSettings>,
    config: web::Data<Config>,
    payload: web::Json<VerifyPinRequest>,
) -> impl Responder {
    match settings::check_pin(store.get_ref(), &payload.pin, &config.device_pin).await {
        Ok(valid) => HttpResponse::Ok().json(json!({ "valid": valid })),
        Err(e) => {
            error!(error = %e, "Failed to read PIN setting");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}
