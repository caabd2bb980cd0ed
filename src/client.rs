//! Employee API HTTP client.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{ApiErrorBody, Employee, EmployeeId, HealthStatus, NewEmployee, RegistrationReceipt};

/// Employee API HTTP client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct EmployeeClient {
    client: Client,
    base_url: String,
}

impl EmployeeClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API root (e.g., "http://localhost:5000/api")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the API section of the config.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every registered employee, in server order.
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let url = format!("{base}/employees", base = self.base_url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        let employees: Vec<Employee> = response.json().await?;

        debug!("Fetched {} employees", employees.len());
        Ok(employees)
    }

    /// Fetch a single employee by id.
    pub async fn get_employee(&self, id: &EmployeeId) -> Result<Employee> {
        let url = format!("{base}/employees/{id}", base = self.base_url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| "Employee not found".to_string());
            return Err(AppError::not_found(message));
        }
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Register a new employee.
    ///
    /// A success body that does not parse is still treated as success.
    pub async fn create_employee(&self, employee: &NewEmployee) -> Result<RegistrationReceipt> {
        let url = format!("{base}/employees", base = self.base_url);

        let response = self.client.post(&url).json(employee).send().await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        let receipt = serde_json::from_str(&body).unwrap_or_default();

        info!("Registered employee {}", employee.email);
        Ok(receipt)
    }

    /// Check that the API is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{base}/health", base = self.base_url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }
}

/// Turn a non-success response into [`AppError::Api`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response).await;
    Err(AppError::Api { status, message })
}

/// Extract the `error` field from a failure body, if present and non-empty.
async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.is_empty())
}
