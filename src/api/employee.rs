use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use sqlx::types::Json;
use tracing::error;
use utoipa::ToSchema;

use crate::model::employee::Employee;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(value_type = Vec<f32>)]
    pub face_descriptor: Vec<f32>,
    #[schema(example = "DEV-8PE6WVDNZ", nullable = true)]
    pub device_id: Option<String>,
}

/// Register employee (upsert by employee id)
///
/// Re-registering an existing employee id replaces the stored descriptor
/// and device binding.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = RegisterEmployee,
    responses(
        (status = 201, description = "Employee registered", body = Object, example = json!({
            "message": "Employee registered"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn register_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<RegisterEmployee>,
) -> impl Responder {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (employee_id, name, face_descriptor, device_id)
        VALUES (?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            name = VALUES(name),
            face_descriptor = VALUES(face_descriptor),
            device_id = VALUES(device_id)
        "#,
    )
    .bind(&payload.employee_id)
    .bind(&payload.name)
    .bind(Json(&payload.face_descriptor))
    .bind(&payload.device_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "Employee registered"
        })),
        Err(e) => {
            error!(error = %e, employee_id = %payload.employee_id, "Failed to register employee");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

/// List the roster (for face matching on the client)
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees with descriptors", body = Vec<Employee>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<MySqlPool>) -> impl Responder {
    let result = sqlx::query_as::<_, Employee>(
        "SELECT employee_id, name, face_descriptor, device_id FROM employees",
    )
    .fetch_all(pool.get_ref())
    .await;

    match result {
        Ok(employees) => HttpResponse::Ok().json(employees),
        Err(e) => {
            error!(error = %e, "Failed to fetch employees");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}
