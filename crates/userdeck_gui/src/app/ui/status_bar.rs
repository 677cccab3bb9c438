//! Bottom status bar rendering for feedback and endpoint metadata.

use super::super::*;
use eframe::egui::{self, RichText};

impl UserDeckApp {
    /// Renders the bottom status bar with the last status and the API URL.
    pub(crate) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let colors = self.palette();
        egui::TopBottomPanel::bottom("status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(status) = &self.status {
                        ui.label(RichText::new(&status.text).color(colors.text_primary));
                        ui.separator();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(
                            egui::Label::new(
                                RichText::new(format!("API: {}", self.api_url))
                                    .small()
                                    .color(colors.text_secondary),
                            )
                            .truncate(),
                        );
                    });
                });
            });
    }
}
