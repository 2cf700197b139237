use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use utoipa::ToSchema;

/// Roster entry as served to kiosks for client-side face matching.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "employeeId": "EMP001",
        "name": "John Doe",
        "faceDescriptor": [0.12, -0.07, 0.33],
        "deviceId": "DEV-8PE6WVDNZ"
    })
)]
pub struct Employee {
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    /// Fixed-length descriptor produced by the face-recognition library.
    /// Only ever consumed by the matcher, never interpreted server-side.
    #[schema(value_type = Vec<f32>)]
    pub face_descriptor: Json<Vec<f32>>,

    /// Device this employee was registered from, if any.
    #[schema(example = "DEV-8PE6WVDNZ", nullable = true)]
    pub device_id: Option<String>,
}
