pub mod error;
pub mod policy;
pub mod store;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use error::LedgerError;
use policy::DevicePolicy;
use store::AttendanceStore;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    In,
    Out,
}

impl PunchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchKind::In => "in",
            PunchKind::Out => "out",
        }
    }
}

/// Resulting state of the day's record after a successful punch.
#[derive(Debug, Clone, Serialize)]
pub struct PunchOutcome {
    pub kind: PunchKind,
    pub punch_in: NaiveDateTime,
    pub punch_out: Option<NaiveDateTime>,
}

/// Daily punch state machine. For each (employee, day) the record moves
/// strictly absent -> open -> completed; a third punch on the same day is
/// rejected without touching the row.
pub struct Ledger<S> {
    store: S,
    policy: Box<dyn DevicePolicy>,
}

impl<S: AttendanceStore> Ledger<S> {
    pub fn new(store: S, policy: Box<dyn DevicePolicy>) -> Self {
        Self { store, policy }
    }

    /// Record a punch for `employee_id` from `device_id`, keyed by today's
    /// UTC date. Exactly one insert or one update on success, zero writes
    /// on every failure path.
    pub async fn record_punch(
        &self,
        employee_id: &str,
        device_id: &str,
    ) -> Result<PunchOutcome, LedgerError> {
        self.record_punch_at(employee_id, device_id, Utc::now().naive_utc())
            .await
    }

    pub async fn record_punch_at(
        &self,
        employee_id: &str,
        device_id: &str,
        now: NaiveDateTime,
    ) -> Result<PunchOutcome, LedgerError> {
        if !self.policy.authorize(employee_id, device_id) {
            return Err(LedgerError::Forbidden);
        }

        if !self.store.employee_exists(employee_id).await? {
            return Err(LedgerError::NotFound);
        }

        let today = now.date();

        match self.store.shift_for(employee_id, today).await? {
            None => {
                if !self.store.open_shift(employee_id, today, now).await? {
                    // Lost the race to a concurrent punch-in
                    return Err(LedgerError::Conflict);
                }
                debug!(employee_id, %today, "Shift opened");
                Ok(PunchOutcome {
                    kind: PunchKind::In,
                    punch_in: now,
                    punch_out: None,
                })
            }
            Some(shift) if shift.punch_out.is_none() => {
                if !self.store.close_shift(employee_id, today, now).await? {
                    // The open row was closed underneath us
                    return Err(LedgerError::Conflict);
                }
                debug!(employee_id, %today, "Shift closed");
                Ok(PunchOutcome {
                    kind: PunchKind::Out,
                    punch_in: shift.punch_in,
                    punch_out: Some(now),
                })
            }
            Some(_) => Err(LedgerError::AlreadyCompleted),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::store::Shift;
    use super::store::memory::MemoryStore;
    use super::*;
    use crate::ledger::policy::DeviceAllowlist;

    fn ledger_with(
        employees: &[&str],
        devices: &[&str],
    ) -> Ledger<MemoryStore> {
        let store = MemoryStore::with_employees(employees);
        let policy = DeviceAllowlist::new(devices.iter().map(|s| s.to_string()).collect());
        Ledger::new(store, Box::new(policy))
    }

    fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[actix_web::test]
    async fn first_punch_opens_shift() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);
        let now = at(day(), 9, 0);

        let outcome = ledger.record_punch_at("EMP001", "DEV-X", now).await.unwrap();

        assert_eq!(outcome.kind, PunchKind::In);
        assert_eq!(outcome.punch_in, now);
        assert_eq!(outcome.punch_out, None);
        assert_eq!(
            ledger.store.shift("EMP001", day()),
            Some(Shift {
                punch_in: now,
                punch_out: None
            })
        );
    }

    #[actix_web::test]
    async fn second_punch_closes_shift_keeping_punch_in() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);
        let opened = at(day(), 9, 0);
        let closed = at(day(), 9, 5);

        ledger.record_punch_at("EMP001", "DEV-X", opened).await.unwrap();
        let outcome = ledger
            .record_punch_at("EMP001", "DEV-X", closed)
            .await
            .unwrap();

        assert_eq!(outcome.kind, PunchKind::Out);
        assert_eq!(outcome.punch_in, opened);
        assert_eq!(outcome.punch_out, Some(closed));
    }

    #[actix_web::test]
    async fn third_punch_same_day_is_rejected_without_mutation() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);

        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 9, 0))
            .await
            .unwrap();
        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 17, 0))
            .await
            .unwrap();

        let before = ledger.store.shift("EMP001", day());
        let err = ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 18, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::AlreadyCompleted));
        assert_eq!(ledger.store.shift("EMP001", day()), before);
    }

    #[actix_web::test]
    async fn next_day_opens_a_fresh_shift() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);
        let tomorrow = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 9, 0))
            .await
            .unwrap();
        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 17, 0))
            .await
            .unwrap();
        let outcome = ledger
            .record_punch_at("EMP001", "DEV-X", at(tomorrow, 9, 0))
            .await
            .unwrap();

        assert_eq!(outcome.kind, PunchKind::In);
        assert_eq!(ledger.store.shift_count(), 2);
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);

        let err = ledger
            .record_punch_at("EMP999", "DEV-X", at(day(), 9, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::NotFound));
        assert_eq!(ledger.store.shift_count(), 0);
    }

    #[actix_web::test]
    async fn unauthorized_device_is_forbidden_in_every_state() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);

        // No record yet
        let err = ledger
            .record_punch_at("EMP001", "DEV-ROGUE", at(day(), 9, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden));
        assert_eq!(ledger.store.shift_count(), 0);

        // Open shift
        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 9, 0))
            .await
            .unwrap();
        let err = ledger
            .record_punch_at("EMP001", "DEV-ROGUE", at(day(), 12, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden));

        // Completed shift
        ledger
            .record_punch_at("EMP001", "DEV-X", at(day(), 17, 0))
            .await
            .unwrap();
        let before = ledger.store.shift("EMP001", day());
        let err = ledger
            .record_punch_at("EMP001", "DEV-ROGUE", at(day(), 18, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden));
        assert_eq!(ledger.store.shift("EMP001", day()), before);
    }

    #[actix_web::test]
    async fn forbidden_is_idempotent() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);

        for _ in 0..2 {
            let err = ledger
                .record_punch_at("EMP001", "DEV-ROGUE", at(day(), 9, 0))
                .await
                .unwrap_err();
            assert!(matches!(err, LedgerError::Forbidden));
        }
        assert_eq!(ledger.store.shift_count(), 0);
    }

    #[actix_web::test]
    async fn empty_allowlist_authorizes_any_device() {
        let ledger = ledger_with(&["EMP001"], &[]);

        let outcome = ledger
            .record_punch_at("EMP001", "DEV-ANYTHING", at(day(), 9, 0))
            .await
            .unwrap();

        assert_eq!(outcome.kind, PunchKind::In);
    }

    #[actix_web::test]
    async fn lost_insert_race_is_a_conflict() {
        let ledger = ledger_with(&["EMP001"], &["DEV-X"]);

        // Simulate the row appearing between the read and the insert
        ledger
            .store
            .open_shift("EMP001", day(), at(day(), 9, 0))
            .await
            .unwrap();
        let inserted = ledger
            .store
            .open_shift("EMP001", day(), at(day(), 9, 1))
            .await
            .unwrap();

        assert!(!inserted);
        assert_eq!(
            ledger.store.shift("EMP001", day()).unwrap().punch_in,
            at(day(), 9, 0)
        );
    }
}
