//! Employee types

use serde::{Deserialize, Serialize};

/// A persisted employee record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the store, never changes after creation
    pub id: i64,
    pub name: String,
    pub address: String,
    pub role: String,
}

impl Employee {
    /// Overwrite the mutable fields, keeping the id
    pub fn apply(&mut self, payload: EmployeePayload) {
        self.name = payload.name;
        self.address = payload.address;
        self.role = payload.role;
    }
}

/// Create/update request body
///
/// A client may echo back a full record including `id`; it is accepted
/// and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub role: String,
}

impl EmployeePayload {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: address.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_missing_fields_default_to_empty() {
        let payload: EmployeePayload = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(payload.name, "A");
        assert_eq!(payload.address, "");
        assert_eq!(payload.role, "");
        assert_eq!(payload.id, None);
    }

    #[test]
    fn apply_keeps_id() {
        let mut employee = Employee {
            id: 7,
            name: "A".into(),
            address: "X".into(),
            role: "dev".into(),
        };
        let mut payload = EmployeePayload::new("B", "Y", "lead");
        payload.id = Some(99);

        employee.apply(payload);

        assert_eq!(employee.id, 7);
        assert_eq!(employee.name, "B");
        assert_eq!(employee.address, "Y");
        assert_eq!(employee.role, "lead");
    }

    #[test]
    fn employee_serializes_flat_fields() {
        let employee = Employee {
            id: 1,
            name: "A".into(),
            address: "X".into(),
            role: "dev".into(),
        };
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "name": "A", "address": "X", "role": "dev"})
        );
    }
}
