use crate::api::admin::{LoginRequest, UpdatePinRequest, VerifyPinRequest};
use crate::api::analytics::{AnalyticsResponse, AnalyticsStats};
use crate::api::attendance::{PunchRequest, PunchResponse};
use crate::api::employee::RegisterEmployee;
use crate::ledger::PunchKind;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mess Attendance API",
        version = "1.0.0",
        description = r#"
## Face-Punch Attendance Service

Backend for a face-recognition kiosk attendance system.

### 🔹 Key Features
- **Employee Registration**
  - Upsert an employee with a face descriptor for client-side matching
- **Attendance Punching**
  - One automatic in/out toggle per employee per day, gated by a
    device allowlist
- **Admin Analytics**
  - Full record list plus headcount and average-shift stats
- **Kiosk Settings**
  - Shared 4-digit PIN gating device-identity changes

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::punch,

        crate::api::employee::register_employee,
        crate::api::employee::list_employees,

        crate::api::analytics::analytics,

        crate::api::admin::login,
        crate::api::admin::update_pin,
        crate::api::admin::verify_pin
    ),
    components(
        schemas(
            PunchRequest,
            PunchResponse,
            PunchKind,
            RegisterEmployee,
            Employee,
            AttendanceRecord,
            AnalyticsResponse,
            AnalyticsStats,
            LoginRequest,
            UpdatePinRequest,
            VerifyPinRequest
        )
    ),
    tags(
        (name = "Attendance", description = "Punch in/out APIs"),
        (name = "Employee", description = "Roster management APIs"),
        (name = "Analytics", description = "Admin reporting APIs"),
        (name = "Admin", description = "Admin login and kiosk settings APIs"),
    )
)]
pub struct ApiDoc;
