//! Main application UI.

use std::path::PathBuf;

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{USERS, USER_PLUS};
use tokio::sync::mpsc;

use crate::client::EmployeeClient;
use crate::config::{AppConfig, validate_base_url};
use crate::error::Result;
use crate::models::{Employee, EmployeeId, RegistrationReceipt};
use crate::registry::{Command, FetchTicket, RegistryState, SubmitRejected, View, details_failure_message};

use super::components::{colors, tab_button};
use super::{employee_panel, register_panel};

/// Messages from async tasks to UI.
pub enum UiMessage {
    EmployeesLoaded(FetchTicket, Result<Vec<Employee>>),
    RegistrationFinished(Result<RegistrationReceipt>),
    EmployeeLoaded(EmployeeId, Result<Employee>),
    HealthChecked(std::result::Result<String, String>),
    SettingsTestResult(std::result::Result<String, String>),
}

/// API reachability as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Checking,
    Online(String),
    Offline(String),
}

/// Employee details dialog contents.
enum DetailsDialog {
    Loading(EmployeeId),
    Loaded(Employee),
    Failed(String),
}

/// Main application state.
pub struct App {
    // Runtime and API
    rt: tokio::runtime::Runtime,
    client: EmployeeClient,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // View-model
    pub state: RegistryState,

    // Configuration
    config: AppConfig,
    config_path: PathBuf,
    config_warning: Option<String>,

    api_status: ApiStatus,
    details: Option<DetailsDialog>,

    // API settings dialog
    settings_dialog_open: bool,
    settings_url_input: String,
    settings_testing: bool,
    settings_test_status: Option<std::result::Result<String, String>>,
    settings_error: Option<String>,
}

impl App {
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
        config_warning: Option<String>,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = EmployeeClient::from_config(&config.api)?;
        let settings_url_input = config.api.base_url.clone();

        let mut app = Self {
            rt,
            client,
            tx,
            rx,
            state: RegistryState::new(config.ui.start_view),
            config,
            config_path,
            config_warning,
            api_status: ApiStatus::Unknown,
            details: None,
            settings_dialog_open: false,
            settings_url_input,
            settings_testing: false,
            settings_test_status: None,
            settings_error: None,
        };

        // Load initial data
        app.check_api();
        app.load_employees();

        Ok(app)
    }

    /// Fetch the employee list.
    pub fn load_employees(&mut self) {
        let ticket = self.state.begin_fetch();
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.list_employees().await;
            let _ = tx.send(UiMessage::EmployeesLoaded(ticket, result));
        });
    }

    /// Submit the registration form.
    pub fn submit_registration(&mut self) {
        let payload = match self.state.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitRejected::InFlight) => return,
            Err(SubmitRejected::Invalid(e)) => {
                tracing::debug!("Registration form rejected: {}", e);
                return;
            }
        };

        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.create_employee(&payload).await;
            let _ = tx.send(UiMessage::RegistrationFinished(result));
        });
    }

    /// Fetch one employee for the details dialog.
    pub fn load_employee_details(&mut self, id: EmployeeId) {
        self.details = Some(DetailsDialog::Loading(id.clone()));
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.get_employee(&id).await;
            let _ = tx.send(UiMessage::EmployeeLoaded(id, result));
        });
    }

    /// Check API health with the active client.
    fn check_api(&mut self) {
        self.api_status = ApiStatus::Checking;
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.health().await.map(|h| h.status).map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::HealthChecked(result));
        });
    }

    /// Check API health against the URL typed in the settings dialog.
    fn test_settings_url(&mut self) {
        let url = self.settings_url_input.trim().to_string();
        if let Err(e) = validate_base_url(&url) {
            self.settings_test_status = Some(Err(e.to_string()));
            return;
        }

        let client = match EmployeeClient::new(&url, std::time::Duration::from_secs(5)) {
            Ok(client) => client,
            Err(e) => {
                self.settings_test_status = Some(Err(e.to_string()));
                return;
            }
        };

        self.settings_testing = true;
        self.settings_test_status = None;
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = client.health().await.map(|h| h.status).map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::SettingsTestResult(result));
        });
    }

    /// Apply and persist the URL from the settings dialog.
    ///
    /// Returns `false` and leaves the dialog open when the URL is unusable.
    fn save_settings(&mut self) -> bool {
        let url = self.settings_url_input.trim().to_string();
        if let Err(e) = validate_base_url(&url) {
            self.settings_error = Some(e.to_string());
            return false;
        }

        let mut config = self.config.clone();
        config.api.base_url = url;
        let client = match EmployeeClient::from_config(&config.api) {
            Ok(client) => client,
            Err(e) => {
                self.settings_error = Some(e.to_string());
                return false;
            }
        };

        // Nothing changes unless the file was written.
        if let Err(e) = config.save(&self.config_path) {
            tracing::error!("Failed to save config: {}", e);
            self.settings_error = Some(format!("Settings not saved: {e}"));
            return false;
        }

        self.config = config;
        self.client = client;
        self.settings_error = None;
        tracing::info!("API base URL set to {}", self.client.base_url());

        self.check_api();
        true
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::EmployeesLoaded(ticket, result) => {
                    self.state.finish_fetch(ticket, result);
                }
                UiMessage::RegistrationFinished(result) => {
                    if let Some(Command::RefreshEmployees) = self.state.finish_submit(result) {
                        self.load_employees();
                    }
                }
                UiMessage::EmployeeLoaded(id, result) => {
                    // Ignore results for a dialog that was closed or replaced.
                    let wanted = matches!(&self.details, Some(DetailsDialog::Loading(current)) if *current == id);
                    if wanted {
                        self.details = Some(match result {
                            Ok(employee) => DetailsDialog::Loaded(employee),
                            Err(e) => {
                                tracing::warn!("Failed to load employee {}: {}", id, e);
                                DetailsDialog::Failed(details_failure_message(&e))
                            }
                        });
                    }
                }
                UiMessage::HealthChecked(result) => {
                    self.api_status = match result {
                        Ok(status) => ApiStatus::Online(status),
                        Err(e) => {
                            tracing::warn!("API health check failed: {}", e);
                            ApiStatus::Offline(e)
                        }
                    };
                }
                UiMessage::SettingsTestResult(result) => {
                    self.settings_testing = false;
                    self.settings_test_status = Some(result);
                }
            }
        }
    }

    /// Render title, menu and tabs.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("Tools", |ui| {
                    if ui.button("API Settings").clicked() {
                        self.settings_dialog_open = true;
                        self.settings_url_input = self.config.api.base_url.clone();
                        self.settings_test_status = None;
                        self.settings_error = None;
                        ui.close();
                    }
                    let checking = matches!(self.api_status, ApiStatus::Checking);
                    if ui
                        .add_enabled(!checking, egui::Button::new("Check API Connection"))
                        .clicked()
                    {
                        self.check_api();
                        ui.close();
                    }
                });
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Employee Registration System").size(26.0));
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let view = self.state.view();
                if tab_button(ui, USER_PLUS, "Register Employee", view == View::Register).clicked() {
                    self.state.select_view(View::Register);
                }
                let label = self.state.list_tab_label();
                if tab_button(ui, USERS, &label, view == View::Employees).clicked() {
                    self.state.select_view(View::Employees);
                }
            });
            ui.add_space(8.0);
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (color, text) = match &self.api_status {
                        ApiStatus::Unknown => (colors::NEUTRAL, "Unknown"),
                        ApiStatus::Checking => (colors::WARNING, "Checking..."),
                        ApiStatus::Online(_) => (colors::SUCCESS, "Online"),
                        ApiStatus::Offline(_) => (colors::ERROR, "Offline"),
                    };

                    if matches!(self.api_status, ApiStatus::Checking) {
                        ui.spinner();
                    }
                    let response = ui.colored_label(color, format!("API: {}", text));
                    match &self.api_status {
                        ApiStatus::Online(detail) | ApiStatus::Offline(detail) => {
                            response.on_hover_text(detail);
                        }
                        _ => {}
                    }
                    ui.weak(self.client.base_url());

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(warning) = &self.config_warning {
                            ui.colored_label(colors::WARNING, warning);
                        }
                    });
                });
            });
    }

    /// Render the API settings dialog.
    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        if !self.settings_dialog_open {
            return;
        }

        let mut open = true;
        egui::Window::new("API Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("API base URL:");
                        ui.add(egui::TextEdit::singleline(&mut self.settings_url_input).desired_width(280.0));
                        ui.end_row();
                    });

                ui.add_space(15.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.settings_testing, egui::Button::new("Test Connection"))
                        .clicked()
                    {
                        self.test_settings_url();
                    }

                    ui.add_space(10.0);

                    if self.settings_testing {
                        ui.spinner();
                        ui.label("Testing...");
                    } else if let Some(result) = &self.settings_test_status {
                        match result {
                            Ok(status) => {
                                ui.colored_label(colors::SUCCESS, format!("Connected: {}", status));
                            }
                            Err(e) => {
                                ui.colored_label(colors::ERROR, format!("Failed: {}", e));
                            }
                        }
                    }
                });

                if let Some(e) = &self.settings_error {
                    ui.add_space(8.0);
                    ui.colored_label(colors::ERROR, e);
                }

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.settings_dialog_open = false;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Save").clicked() && self.save_settings() {
                            self.settings_dialog_open = false;
                        }
                    });
                });
            });

        if !open {
            self.settings_dialog_open = false;
        }
    }

    /// Render the employee details dialog.
    fn show_details_dialog(&mut self, ctx: &egui::Context) {
        let Some(details) = &self.details else {
            return;
        };

        let mut open = true;
        let title = match details {
            DetailsDialog::Loaded(employee) => employee.name.clone(),
            _ => "Employee".to_string(),
        };

        egui::Window::new(title)
            .id(egui::Id::new("employee_details"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                match details {
                    DetailsDialog::Loading(id) => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(format!("Loading employee {}...", id));
                        });
                    }
                    DetailsDialog::Loaded(employee) => {
                        ui.weak(format!("ID {}", employee.id));
                        ui.add_space(6.0);
                        employee_panel::employee_details(ui, employee);
                    }
                    DetailsDialog::Failed(e) => {
                        ui.colored_label(colors::ERROR, e);
                    }
                }
            });

        if !open {
            self.details = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.state.has_pending_work()
            || matches!(self.api_status, ApiStatus::Checking)
            || matches!(self.details, Some(DetailsDialog::Loading(_)))
            || self.settings_testing
        {
            ctx.request_repaint();
        }

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_settings_dialog(ctx);
        self.show_details_dialog(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view() {
            View::Register => register_panel::show(self, ui),
            View::Employees => employee_panel::show(self, ui),
        });
    }
}
