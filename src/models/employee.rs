//! Employee records, registration payloads and the form draft.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::department::Department;
use crate::error::{AppError, Result};

/// Server-assigned employee identifier.
///
/// The API currently emits integers; strings are accepted so the client does
/// not care how the backend keys its rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeId::Int(id) => write!(f, "{id}"),
            EmployeeId::Text(id) => f.write_str(id),
        }
    }
}

/// Employee record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    /// Kept verbatim so an unexpected department never fails a fetch.
    pub department: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Employee {
    /// Department as a known enum value, if it is one.
    pub fn department_kind(&self) -> Option<Department> {
        self.department.parse().ok()
    }

    /// Date the employee was registered, parsed from `created_at`.
    pub fn registered_on(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_timestamp_date)
    }
}

/// Parse the date part of a server timestamp.
///
/// Accepts RFC 3339 and the SQLite `CURRENT_TIMESTAMP` format.
fn parse_timestamp_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// DTO for registering an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Department,
}

/// Acknowledgement returned by a successful registration.
///
/// Every field is optional; the client only needs to know the call succeeded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegistrationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

/// Error body sent by the API on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// In-progress registration form values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: Option<Department>,
}

impl EmployeeDraft {
    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field has been filled in.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check required fields and build the registration payload.
    pub fn validate(&self) -> Result<NewEmployee> {
        let required = [
            (&self.name, "Full name"),
            (&self.email, "Email"),
            (&self.phone, "Phone"),
            (&self.position, "Position"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{label} is required")));
            }
        }

        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(AppError::validation("Email must be a valid address"));
        }

        let department = self
            .department
            .ok_or_else(|| AppError::validation("Department is required"))?;

        Ok(NewEmployee {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            department,
        })
    }
}
