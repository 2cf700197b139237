use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance row joined with the employee name, as exposed by the
/// analytics endpoint.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2024-01-01T08:55:00", value_type = String)]
    pub punch_in: NaiveDateTime,

    #[schema(example = "2024-01-01T17:05:00", value_type = String, nullable = true)]
    pub punch_out: Option<NaiveDateTime>,
}
