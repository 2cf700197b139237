use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::ledger::{Ledger, PunchKind, error::LedgerError, store::MySqlStore};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchRequest {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "DEV-8PE6WVDNZ")]
    pub device_id: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunchResponse {
    #[schema(example = "Successfully punched IN")]
    pub message: String,
    #[serde(rename = "type")]
    #[schema(example = "in")]
    pub kind: PunchKind,
    #[schema(example = "2024-01-01T08:55:00", value_type = String)]
    pub punch_in: NaiveDateTime,
    #[schema(example = "2024-01-01T17:05:00", value_type = String, nullable = true)]
    pub punch_out: Option<NaiveDateTime>,
}

/// Punch attendance (auto in/out with device authorization)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = PunchRequest,
    responses(
        (status = 200, description = "Punch recorded", body = PunchResponse),
        (status = 400, description = "Attendance already completed for today"),
        (status = 403, description = "Device not authorized"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Concurrent punch lost the race"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn punch(
    ledger: web::Data<Ledger<MySqlStore>>,
    payload: web::Json<PunchRequest>,
) -> impl Responder {
    let result = ledger
        .record_punch(&payload.employee_id, &payload.device_id)
        .await;

    match result {
        Ok(outcome) => {
            info!(
                employee_id = %payload.employee_id,
                device_id = %payload.device_id,
                kind = outcome.kind.as_str(),
                "Punch recorded"
            );
            HttpResponse::Ok().json(PunchResponse {
                message: format!(
                    "Successfully punched {}",
                    outcome.kind.as_str().to_uppercase()
                ),
                kind: outcome.kind,
                punch_in: outcome.punch_in,
                punch_out: outcome.punch_out,
            })
        }
        Err(e) => punch_error_response(e, &payload.employee_id, &payload.device_id),
    }
}

fn punch_error_response(e: LedgerError, employee_id: &str, device_id: &str) -> HttpResponse {
    match e {
        LedgerError::Forbidden => HttpResponse::Forbidden().json(json!({
            "error": "This device is not authorized for attendance. Please use the Incharge mobile.",
            "details": format!("Device ID: {device_id}")
        })),
        LedgerError::NotFound => HttpResponse::NotFound().json(json!({
            "error": "Employee not found"
        })),
        LedgerError::AlreadyCompleted => HttpResponse::BadRequest().json(json!({
            "error": "Attendance already completed for today."
        })),
        LedgerError::Conflict => HttpResponse::Conflict().json(json!({
            "error": "Attendance was updated by another request, please retry."
        })),
        LedgerError::Validation(msg) => HttpResponse::BadRequest().json(json!({
            "error": msg
        })),
        LedgerError::Store(e) => {
            error!(error = %e, employee_id, "Punch failed");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}
