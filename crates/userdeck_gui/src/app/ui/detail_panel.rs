//! Read-only details of the selected user.

use super::super::*;
use eframe::egui::{self, RichText};

fn detail_row(ui: &mut egui::Ui, label: &str, value: &str, muted: egui::Color32) {
    ui.label(RichText::new(label).small().color(muted));
    ui.label(value);
    ui.end_row();
}

impl UserDeckApp {
    pub(crate) fn render_detail_panel(&mut self, ctx: &egui::Context) {
        let Some(user) = self.selected_user().cloned() else {
            return;
        };
        let colors = self.palette();
        let mut close = false;
        let mut edit = false;

        egui::SidePanel::right("details")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(&user.name);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        close = ui.small_button("Close").clicked();
                        edit = ui.small_button("Edit").clicked();
                    });
                });
                ui.separator();
                egui::Grid::new("user_details")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        let muted = colors.text_muted;
                        detail_row(ui, "ID", &user.id.to_string(), muted);
                        detail_row(ui, "Email", &user.email, muted);
                        if let Some(username) = &user.username {
                            detail_row(ui, "Username", username, muted);
                        }
                        if let Some(phone) = &user.phone {
                            detail_row(ui, "Phone", phone, muted);
                        }
                        if let Some(website) = &user.website {
                            detail_row(ui, "Website", website, muted);
                        }
                        if let Some(company) = &user.company {
                            detail_row(ui, "Company", &company.name, muted);
                            if let Some(catch_phrase) = &company.catch_phrase {
                                detail_row(ui, "", catch_phrase, muted);
                            }
                        }
                        if let Some(address) = &user.address {
                            detail_row(ui, "Address", &address.one_line(), muted);
                        }
                    });
            });

        if close {
            self.clear_selection();
        }
        if edit {
            self.open_edit(user.id);
        }
    }
}
