//! Data models for employees and departments.

pub mod department;
pub mod employee;

pub use department::Department;
pub use employee::{
    ApiErrorBody, Employee, EmployeeDraft, EmployeeId, HealthStatus, NewEmployee, RegistrationReceipt,
};
