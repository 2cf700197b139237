use std::collections::HashSet;

/// Authorization capability consulted before any punch is recorded.
///
/// The employee id is part of the contract so a per-employee bound-device
/// policy can be slotted in without touching the ledger; the deployed
/// allowlist policy does not need it.
pub trait DevicePolicy: Send + Sync {
    fn authorize(&self, employee_id: &str, device_id: &str) -> bool;
}

/// Global allowlist of kiosk device identifiers.
///
/// An empty allowlist authorizes every device, so a fresh deployment can
/// enroll its first kiosk before any ids are configured.
pub struct DeviceAllowlist {
    devices: HashSet<String>,
}

impl DeviceAllowlist {
    pub fn new(devices: HashSet<String>) -> Self {
        Self { devices }
    }
}

impl DevicePolicy for DeviceAllowlist {
    fn authorize(&self, _employee_id: &str, device_id: &str) -> bool {
        self.devices.is_empty() || self.devices.contains(device_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist(ids: &[&str]) -> DeviceAllowlist {
        DeviceAllowlist::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn member_device_is_authorized() {
        let policy = allowlist(&["DEV-X", "MASTER-1"]);
        assert!(policy.authorize("EMP001", "DEV-X"));
        assert!(policy.authorize("EMP001", "MASTER-1"));
    }

    #[test]
    fn unknown_device_is_denied() {
        let policy = allowlist(&["DEV-X"]);
        assert!(!policy.authorize("EMP001", "DEV-Y"));
        assert!(!policy.authorize("EMP001", ""));
    }

    #[test]
    fn empty_allowlist_authorizes_any_device() {
        let policy = allowlist(&[]);
        assert!(policy.authorize("EMP001", "DEV-ANYTHING"));
    }
}
