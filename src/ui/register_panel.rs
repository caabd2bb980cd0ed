//! Employee registration form.

use eframe::egui::{self, Ui};
use egui_phosphor::regular::USER_PLUS;

use super::app::App;
use super::components::{colors, icon_button, panel_header, status_banner};
use crate::models::Department;

/// Show the registration panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Register New Employee");

    if let Some(message) = app.state.message() {
        status_banner(ui, message);
        ui.add_space(15.0);
    }

    let draft = &mut app.state.draft;

    egui::Grid::new("register_form_grid")
        .num_columns(2)
        .spacing([20.0, 12.0])
        .show(ui, |ui| {
            ui.label("Full Name:");
            ui.add(egui::TextEdit::singleline(&mut draft.name).desired_width(300.0));
            ui.end_row();

            ui.label("Email:");
            ui.add(
                egui::TextEdit::singleline(&mut draft.email)
                    .desired_width(300.0)
                    .hint_text("name@company.com"),
            );
            ui.end_row();

            ui.label("Phone:");
            ui.add(egui::TextEdit::singleline(&mut draft.phone).desired_width(200.0));
            ui.end_row();

            ui.label("Position:");
            ui.add(egui::TextEdit::singleline(&mut draft.position).desired_width(300.0));
            ui.end_row();

            ui.label("Department:");
            egui::ComboBox::from_id_salt("register_department")
                .width(200.0)
                .selected_text(draft.department.map(|d| d.as_str()).unwrap_or("Select Department"))
                .show_ui(ui, |ui| {
                    for dept in Department::ALL {
                        if ui
                            .selectable_label(draft.department == Some(dept), dept.as_str())
                            .clicked()
                        {
                            draft.department = Some(dept);
                        }
                    }
                });
            ui.end_row();
        });

    ui.add_space(10.0);

    if let Some(problem) = app.state.validation_error() {
        ui.colored_label(colors::ERROR, problem);
        ui.add_space(10.0);
    }

    ui.horizontal(|ui| {
        let enabled = !app.state.is_loading();
        let label = app.state.submit_label();
        if icon_button(ui, USER_PLUS, label, enabled).clicked() {
            app.submit_registration();
        }
        if app.state.is_loading() {
            ui.spinner();
        }
    });
}
