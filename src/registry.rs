//! Registration view-model.
//!
//! Holds the form draft, the employee list snapshot and the view state. It
//! never touches the network: the UI asks it for work to do
//! ([`RegistryState::begin_submit`], [`RegistryState::begin_fetch`]) and hands
//! the results back when the spawned request completes.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::{Employee, EmployeeDraft, NewEmployee, RegistrationReceipt};

pub const MSG_REGISTERED: &str = "Employee registered successfully!";
pub const MSG_REGISTER_FAILED: &str = "Error registering employee";
pub const MSG_FETCH_FAILED: &str = "Error fetching employee data";
pub const MSG_DETAILS_FAILED: &str = "Error loading employee";

/// Panel currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Register,
    Employees,
}

/// How a status message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Status message shown above the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Any message mentioning "Error" is an error.
    pub fn kind(&self) -> MessageKind {
        if self.0.contains("Error") {
            MessageKind::Error
        } else {
            MessageKind::Success
        }
    }
}

/// Why a submission was not started.
#[derive(Debug)]
pub enum SubmitRejected {
    /// A submission is already in flight.
    InFlight,
    /// The draft failed client-side validation.
    Invalid(AppError),
}

/// Follow-up work requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RefreshEmployees,
}

/// Identifies one list fetch; later fetches have larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// View-model for the registration window.
#[derive(Debug, Default)]
pub struct RegistryState {
    pub draft: EmployeeDraft,
    employees: Vec<Employee>,
    view: View,
    is_loading: bool,
    message: Option<StatusMessage>,
    validation_error: Option<String>,
    next_ticket: u64,
    applied_ticket: Option<FetchTicket>,
    pending_fetches: usize,
}

impl RegistryState {
    pub fn new(start_view: View) -> Self {
        Self {
            view: start_view,
            ..Default::default()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch panels. Never triggers a fetch.
    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Inline validation problem from the last submit attempt.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// True while any request started through this state is outstanding.
    pub fn has_pending_work(&self) -> bool {
        self.is_loading || self.pending_fetches > 0
    }

    pub fn list_tab_label(&self) -> String {
        format!("View Employees ({})", self.employees.len())
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading {
            "Registering..."
        } else {
            "Register Employee"
        }
    }

    /// Start a submission.
    ///
    /// Returns the payload to POST, or why nothing should be sent.
    pub fn begin_submit(&mut self) -> std::result::Result<NewEmployee, SubmitRejected> {
        if self.is_loading {
            debug!("Submission ignored, another one is in flight");
            return Err(SubmitRejected::InFlight);
        }

        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(e) => {
                if let AppError::Validation(msg) = &e {
                    self.validation_error = Some(msg.clone());
                }
                return Err(SubmitRejected::Invalid(e));
            }
        };

        self.validation_error = None;
        self.is_loading = true;
        self.message = None;
        Ok(payload)
    }

    /// Apply the outcome of a submission.
    ///
    /// The loading flag is cleared on every path. On success the draft is
    /// reset and exactly one list refresh is requested.
    pub fn finish_submit(&mut self, result: Result<RegistrationReceipt>) -> Option<Command> {
        self.is_loading = false;

        match result {
            Ok(receipt) => {
                match receipt.employee_id {
                    Some(id) => info!("Registration accepted, id {id}"),
                    None => info!("Registration accepted"),
                }
                self.message = Some(StatusMessage::new(MSG_REGISTERED));
                self.draft.clear();
                Some(Command::RefreshEmployees)
            }
            Err(e) => {
                warn!("Registration failed: {e}");
                self.message = Some(StatusMessage::new(registration_failure_message(&e)));
                None
            }
        }
    }

    /// Reserve a ticket for a new list fetch.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        self.pending_fetches += 1;
        FetchTicket(self.next_ticket)
    }

    /// Apply the outcome of a list fetch.
    ///
    /// Responses older than one already applied are dropped, so the list
    /// always reflects the latest issued fetch that has landed. A failure
    /// leaves the current list untouched.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Employee>>) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);

        if self.applied_ticket.is_some_and(|applied| ticket < applied) {
            debug!("Discarding stale employee list response {ticket:?}");
            return;
        }
        self.applied_ticket = Some(ticket);

        match result {
            Ok(employees) => {
                debug!("Employee list replaced ({} records)", employees.len());
                self.employees = employees;
            }
            Err(e) => {
                error!("Error fetching employees: {e}");
                self.message = Some(StatusMessage::new(MSG_FETCH_FAILED));
            }
        }
    }
}

/// Text shown when a registration fails.
pub fn registration_failure_message(err: &AppError) -> String {
    match err {
        AppError::Api {
            message: Some(msg), ..
        } if !msg.is_empty() => format!("Error: {msg}"),
        _ => MSG_REGISTER_FAILED.to_string(),
    }
}

/// Text shown in the details dialog when loading one employee fails.
///
/// Only a missing record surfaces the server's wording.
pub fn details_failure_message(err: &AppError) -> String {
    match err {
        AppError::NotFound(msg) if !msg.is_empty() => msg.clone(),
        _ => MSG_DETAILS_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, EmployeeId};
    use reqwest::StatusCode;

    fn employee(id: i64, name: &str) -> Employee {
        Employee {
            id: EmployeeId::Int(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            position: "Engineer".to_string(),
            department: "IT".to_string(),
            created_at: Some("2025-11-25 07:36:58".to_string()),
        }
    }

    fn fill_draft(state: &mut RegistryState) {
        state.draft.name = "Ada Lovelace".to_string();
        state.draft.email = "ada@example.com".to_string();
        state.draft.phone = "555-0100".to_string();
        state.draft.position = "Engineer".to_string();
        state.draft.department = Some(Department::It);
    }

    fn api_error(status: StatusCode, message: Option<&str>) -> AppError {
        AppError::Api {
            status,
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_message_kind() {
        assert_eq!(StatusMessage::new(MSG_REGISTERED).kind(), MessageKind::Success);
        assert_eq!(StatusMessage::new(MSG_FETCH_FAILED).kind(), MessageKind::Error);
        assert_eq!(StatusMessage::new("Error: Email already exists").kind(), MessageKind::Error);
        // Classification is case-sensitive.
        assert_eq!(StatusMessage::new("error lowercase").kind(), MessageKind::Success);
    }

    #[test]
    fn test_successful_submit_clears_draft() {
        let mut state = RegistryState::default();
        fill_draft(&mut state);

        let payload = state.begin_submit().unwrap();
        assert_eq!(payload.email, "ada@example.com");
        assert!(state.is_loading());
        assert_eq!(state.submit_label(), "Registering...");

        let command = state.finish_submit(Ok(RegistrationReceipt::default()));

        assert_eq!(command, Some(Command::RefreshEmployees));
        assert!(!state.is_loading());
        assert!(state.draft.is_empty());
        assert_eq!(state.message().unwrap().text(), "Employee registered successfully!");
        assert_eq!(state.message().unwrap().kind(), MessageKind::Success);
    }

    #[test]
    fn test_submit_while_in_flight_is_rejected() {
        let mut state = RegistryState::default();
        fill_draft(&mut state);

        assert!(state.begin_submit().is_ok());
        fill_draft(&mut state);
        assert!(matches!(state.begin_submit(), Err(SubmitRejected::InFlight)));
        assert!(state.is_loading());
    }

    #[test]
    fn test_submit_clears_previous_message() {
        let mut state = RegistryState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err(AppError::validation("boom")));
        assert!(state.message().is_some());

        fill_draft(&mut state);
        state.begin_submit().unwrap();
        assert!(state.message().is_none());
    }

    #[test]
    fn test_invalid_draft_is_not_sent() {
        let mut state = RegistryState::default();
        fill_draft(&mut state);
        state.draft.position.clear();

        assert!(matches!(state.begin_submit(), Err(SubmitRejected::Invalid(_))));
        assert!(!state.is_loading());
        assert_eq!(state.validation_error(), Some("Position is required"));
        assert!(state.message().is_none());

        state.draft.position = "Engineer".to_string();
        assert!(state.begin_submit().is_ok());
        assert!(state.validation_error().is_none());
    }

    #[test]
    fn test_failure_with_server_error_text() {
        let mut state = RegistryState::default();
        fill_draft(&mut state);
        state.begin_submit().unwrap();

        let command = state.finish_submit(Err(api_error(StatusCode::CONFLICT, Some("Email already exists"))));

        assert_eq!(command, None);
        assert!(!state.is_loading());
        assert_eq!(state.message().unwrap().text(), "Error: Email already exists");
        // Draft kept so the user can retry.
        assert_eq!(state.draft.name, "Ada Lovelace");
    }

    #[test]
    fn test_failure_without_server_error_text() {
        let mut state = RegistryState::default();
        fill_draft(&mut state);
        state.begin_submit().unwrap();

        state.finish_submit(Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, None)));

        assert_eq!(state.message().unwrap().text(), "Error registering employee");
        assert_eq!(state.message().unwrap().kind(), MessageKind::Error);
    }

    #[test]
    fn test_failure_message_for_non_api_errors() {
        let err = AppError::not_found("Employee not found");
        assert_eq!(registration_failure_message(&err), "Error registering employee");
    }

    #[test]
    fn test_fetch_replaces_list() {
        let mut state = RegistryState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![employee(1, "Amy"), employee(2, "Bob")]));
        assert_eq!(state.employees().len(), 2);

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![employee(3, "Cal")]));

        let names: Vec<_> = state.employees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Cal"]);
    }

    #[test]
    fn test_fetch_failure_keeps_list() {
        let mut state = RegistryState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![employee(1, "Amy")]));

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, None)));

        assert_eq!(state.employees(), &[employee(1, "Amy")]);
        assert_eq!(state.message().unwrap().text(), "Error fetching employee data");
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut state = RegistryState::default();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();
        assert!(state.has_pending_work());

        state.finish_fetch(newer, Ok(vec![employee(1, "Amy"), employee(2, "Bob")]));
        state.finish_fetch(older, Ok(vec![employee(1, "Amy")]));

        assert_eq!(state.employees().len(), 2);
        assert!(!state.has_pending_work());
    }

    #[test]
    fn test_stale_fetch_failure_is_silent() {
        let mut state = RegistryState::default();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        state.finish_fetch(newer, Ok(vec![employee(1, "Amy")]));
        state.finish_fetch(older, Err(api_error(StatusCode::BAD_GATEWAY, None)));

        assert!(state.message().is_none());
    }

    #[test]
    fn test_stale_success_after_newer_failure_is_discarded() {
        let mut state = RegistryState::default();
        let first = state.begin_fetch();
        state.finish_fetch(first, Ok(vec![employee(1, "Amy")]));

        let older = state.begin_fetch();
        let newer = state.begin_fetch();
        state.finish_fetch(newer, Err(api_error(StatusCode::SERVICE_UNAVAILABLE, None)));
        state.finish_fetch(older, Ok(vec![employee(1, "Amy"), employee(2, "Bob")]));

        assert_eq!(state.employees(), &[employee(1, "Amy")]);
        assert_eq!(state.message().unwrap().text(), "Error fetching employee data");
        assert!(!state.has_pending_work());
    }

    #[test]
    fn test_empty_server_error_uses_generic_text() {
        let err = api_error(StatusCode::BAD_REQUEST, Some(""));
        assert_eq!(registration_failure_message(&err), "Error registering employee");
    }

    #[test]
    fn test_details_failure_message() {
        assert_eq!(
            details_failure_message(&AppError::not_found("Employee not found")),
            "Employee not found"
        );
        assert_eq!(
            details_failure_message(&api_error(StatusCode::INTERNAL_SERVER_ERROR, Some("database is locked"))),
            "Error loading employee"
        );
        assert_eq!(
            details_failure_message(&AppError::validation("bad id")),
            "Error loading employee"
        );
    }

    #[test]
    fn test_out_of_order_older_first_still_applies() {
        let mut state = RegistryState::default();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        state.finish_fetch(older, Ok(vec![employee(1, "Amy")]));
        assert_eq!(state.employees().len(), 1);

        state.finish_fetch(newer, Ok(vec![employee(1, "Amy"), employee(2, "Bob")]));
        assert_eq!(state.employees().len(), 2);
    }

    #[test]
    fn test_view_switch_has_no_side_effects() {
        let mut state = RegistryState::default();
        assert_eq!(state.view(), View::Register);

        state.select_view(View::Employees);

        assert_eq!(state.view(), View::Employees);
        assert!(!state.has_pending_work());
        assert!(state.employees().is_empty());
        assert_eq!(state.list_tab_label(), "View Employees (0)");
    }

    #[test]
    fn test_tab_label_counts_records() {
        let mut state = RegistryState::new(View::Employees);
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok((1..=3).map(|i| employee(i, "Emp")).collect()));

        assert_eq!(state.list_tab_label(), "View Employees (3)");
    }

    #[test]
    fn test_register_then_refresh_shows_new_record() {
        let mut state = RegistryState::default();
        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![employee(1, "Amy")]));

        fill_draft(&mut state);
        state.begin_submit().unwrap();
        // Nothing is inserted optimistically.
        assert_eq!(state.employees().len(), 1);

        let commands: Vec<_> = state
            .finish_submit(Ok(RegistrationReceipt::default()))
            .into_iter()
            .collect();
        assert_eq!(commands, [Command::RefreshEmployees]);

        let ticket = state.begin_fetch();
        state.finish_fetch(ticket, Ok(vec![employee(2, "Ada"), employee(1, "Amy")]));

        assert!(state.employees().iter().any(|e| e.name == "Ada"));
        assert_eq!(state.list_tab_label(), "View Employees (2)");
    }
}
