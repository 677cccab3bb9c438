//! Central list of user cards with per-user actions.

use super::super::*;
use eframe::egui::{self, RichText};

#[derive(Debug, Clone, Copy)]
enum CardAction {
    Details(u64),
    Edit(u64),
    Delete(u64),
}

impl UserDeckApp {
    pub(crate) fn render_user_list(&mut self, ctx: &egui::Context) {
        let colors = self.palette();
        let mut action: Option<CardAction> = None;
        let mut retry = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = self.controller.load_error() {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(error).color(COLOR_ERROR));
                    retry = ui.small_button("Retry").clicked();
                });
                ui.separator();
            }

            if self.visible.is_empty() {
                let text = if self.controller.is_loading() {
                    "Loading users..."
                } else if self.search_query.trim().is_empty() {
                    "No users."
                } else {
                    "No users match the search."
                };
                ui.label(RichText::new(text).color(colors.text_muted));
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for user in self.visible_users() {
                        let selected = self.selected_id == Some(user.id);
                        let removing = self.is_removing(user.id);
                        let stroke = if selected {
                            COLOR_SELECTION_STROKE
                        } else {
                            colors.border
                        };
                        egui::Frame::group(ui.style())
                            .fill(colors.bg_primary)
                            .stroke(egui::Stroke::new(1.0, stroke))
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.vertical(|ui| {
                                        ui.label(RichText::new(&user.name).strong());
                                        ui.label(
                                            RichText::new(&user.email)
                                                .color(colors.text_secondary),
                                        );
                                        if let Some(username) = &user.username {
                                            ui.label(
                                                RichText::new(format!("@{}", username))
                                                    .small()
                                                    .color(colors.text_muted),
                                            );
                                        }
                                    });
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            let delete_label =
                                                if removing { "Deleting..." } else { "Delete" };
                                            if ui
                                                .add_enabled(
                                                    !removing,
                                                    egui::Button::new(delete_label),
                                                )
                                                .clicked()
                                            {
                                                action = Some(CardAction::Delete(user.id));
                                            }
                                            if ui.button("Edit").clicked() {
                                                action = Some(CardAction::Edit(user.id));
                                            }
                                            if ui.button("Details").clicked() {
                                                action = Some(CardAction::Details(user.id));
                                            }
                                        },
                                    );
                                });
                            });
                    }
                });
        });

        if retry {
            self.reload();
        }
        match action {
            Some(CardAction::Details(id)) => self.select_user(id),
            Some(CardAction::Edit(id)) => self.open_edit(id),
            Some(CardAction::Delete(id)) => self.delete_user(id),
            None => {}
        }
    }
}
