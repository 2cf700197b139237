use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    #[schema(example = 42)]
    pub total_employees: i64,
    #[schema(example = 17)]
    pub present_today: i64,
    #[schema(example = "8h 12m")]
    pub avg_work_hours: String,
}

#[derive(Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub attendance: Vec<AttendanceRecord>,
    pub stats: AnalyticsStats,
}

/// Admin analytics: full record list plus aggregate stats
#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Attendance records and stats", body = AnalyticsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Analytics"
)]
pub async fn analytics(pool: web::Data<MySqlPool>) -> actix_web::Result<impl Responder> {
    let attendance = sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT a.id, a.employee_id, e.name, a.date, a.punch_in, a.punch_out
        FROM attendance a
        JOIN employees e ON a.employee_id = e.employee_id
        ORDER BY a.date DESC, a.punch_in DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch attendance records");
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    let total_employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count employees");
            actix_web::error::ErrorInternalServerError("Database error")
        })?;

    let today = Utc::now().date_naive();
    let present_today = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT employee_id) FROM attendance WHERE date = ?",
    )
    .bind(today)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to count present employees");
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    let completed_shifts = sqlx::query_as::<_, (NaiveDateTime, NaiveDateTime)>(
        "SELECT punch_in, punch_out FROM attendance WHERE punch_out IS NOT NULL",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch completed shifts");
        actix_web::error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(AnalyticsResponse {
        attendance,
        stats: AnalyticsStats {
            total_employees,
            present_today,
            avg_work_hours: format_work_hours(average_shift_minutes(&completed_shifts)),
        },
    }))
}

/// Mean shift length in minutes over completed shifts; 0 when none.
fn average_shift_minutes(shifts: &[(NaiveDateTime, NaiveDateTime)]) -> f64 {
    if shifts.is_empty() {
        return 0.0;
    }
    let total: f64 = shifts
        .iter()
        .map(|(punch_in, punch_out)| (*punch_out - *punch_in).num_seconds() as f64 / 60.0)
        .sum();
    total / shifts.len() as f64
}

fn format_work_hours(minutes: f64) -> String {
    format!(
        "{}h {}m",
        (minutes / 60.0).floor() as i64,
        (minutes % 60.0).round() as i64
    )
}
