//! Add/edit overlay window with per-field errors.

use super::super::session::SessionState;
use super::super::*;
use eframe::egui::{self, RichText};

impl UserDeckApp {
    pub(crate) fn render_session_window(&mut self, ctx: &egui::Context) {
        let title = match self.session.state() {
            SessionState::Idle => return,
            SessionState::Adding => "Add user".to_string(),
            SessionState::Editing(id) => format!("Edit user {}", id),
        };
        let profile = self.form_profile;
        let field_errors = self.session.field_errors().clone();
        let submit_error = self.session.submit_error().map(str::to_owned);
        let submitting = self.session.pending().is_some();
        let mut open = true;
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new(title)
            .id(egui::Id::new("session_window"))
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let form = self.session.form_mut();
                egui::Grid::new("session_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for field in profile.fields() {
                            ui.label(field.label());
                            ui.vertical(|ui| {
                                let response = ui.add_enabled(
                                    !submitting,
                                    egui::TextEdit::singleline(form.value_mut(field))
                                        .desired_width(260.0),
                                );
                                if response.lost_focus()
                                    && ui.input(|input| input.key_pressed(egui::Key::Enter))
                                {
                                    submit = true;
                                }
                                if let Some(message) = field_errors.get(&field) {
                                    ui.label(RichText::new(message).small().color(COLOR_ERROR));
                                }
                            });
                            ui.end_row();
                        }
                    });

                if let Some(message) = &submit_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(message).color(COLOR_ERROR));
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let save_label = if submitting { "Saving..." } else { "Save" };
                    submit |= ui
                        .add_enabled(!submitting, egui::Button::new(save_label))
                        .clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if !open || cancel {
            self.cancel_session();
        } else if submit {
            self.submit_session();
        }
    }
}
