//! Registered employee list.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, BRIEFCASE, BUILDINGS, CALENDAR, ENVELOPE, INFO, PHONE};

use super::app::App;
use super::components::{detail_row, icon_button, panel_header};
use crate::models::{Employee, EmployeeId};

const CARD_WIDTH: f32 = 280.0;

/// Show the employee list panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Registered Employees");

    let mut open_details: Option<EmployeeId> = None;

    if app.state.employees().is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("No employees registered yet.").size(18.0).weak());
            ui.add_space(40.0);
        });
    } else {
        ScrollArea::vertical()
            .id_salt("employee_scroll")
            .max_height((ui.available_height() - 60.0).max(120.0))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                    for employee in app.state.employees() {
                        if employee_card(ui, employee) {
                            open_details = Some(employee.id.clone());
                        }
                    }
                });
            });
    }

    ui.add_space(15.0);

    if icon_button(ui, ARROWS_CLOCKWISE, "Refresh List", true).clicked() {
        app.load_employees();
    }

    if let Some(id) = open_details {
        app.load_employee_details(id);
    }
}

/// Render one employee card. Returns `true` when Details was clicked.
fn employee_card(ui: &mut Ui, employee: &Employee) -> bool {
    let mut details_clicked = false;

    egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(RichText::new(&employee.name).size(18.0).strong());
            ui.add_space(6.0);
            employee_details(ui, employee);
            ui.add_space(6.0);
            if ui.small_button(format!("{INFO} Details")).clicked() {
                details_clicked = true;
            }
        });
    });

    details_clicked
}

/// Render the labelled fields of an employee record.
pub fn employee_details(ui: &mut Ui, employee: &Employee) {
    detail_row(ui, ENVELOPE, "Email", &employee.email);
    detail_row(ui, PHONE, "Phone", &employee.phone);
    detail_row(ui, BRIEFCASE, "Position", &employee.position);
    detail_row(ui, BUILDINGS, "Department", &employee.department);

    let registered = employee
        .registered_on()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    detail_row(ui, CALENDAR, "Registered", &registered);
}
