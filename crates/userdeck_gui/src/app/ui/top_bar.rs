//! Top bar with the title, search box, and global actions.

use super::super::*;
use eframe::egui::{self, RichText};

impl UserDeckApp {
    pub(crate) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let colors = self.palette();
        let mut query = self.search_query.clone();
        let mut toggle_theme = false;
        let mut reload = false;
        let mut add = false;

        egui::TopBottomPanel::top("top")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("UserDeck").color(COLOR_ACCENT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let theme_label = if self.theme.is_dark() {
                            "Light mode"
                        } else {
                            "Dark mode"
                        };
                        toggle_theme = ui.button(theme_label).clicked();
                        reload = ui
                            .add_enabled(
                                !self.controller.is_loading(),
                                egui::Button::new("Reload"),
                            )
                            .clicked();
                        if self.controller.is_loading() {
                            ui.spinner();
                        }
                    });
                });
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut query)
                            .hint_text("Search users")
                            .desired_width(320.0),
                    );
                    if !query.is_empty() && ui.small_button("Clear").clicked() {
                        query.clear();
                    }
                    ui.label(
                        RichText::new(format!(
                            "{} of {}",
                            self.visible.len(),
                            self.controller.users().len()
                        ))
                        .small()
                        .color(colors.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        add = ui.button("+ Add user").clicked();
                    });
                });
                ui.add_space(4.0);
            });

        if query != self.search_query {
            self.set_search_query(query);
        }
        if toggle_theme {
            self.toggle_theme();
        }
        if reload {
            self.reload();
        }
        if add {
            self.open_add();
        }
    }
}
