//! Dismissible notice toasts for action feedback.

use super::super::*;
use eframe::egui;

impl UserDeckApp {
    /// Renders notices in the top-right overlay area.
    pub(crate) fn render_notices(&mut self, ctx: &egui::Context) {
        if self.notices.is_empty() {
            return;
        }

        let colors = self.palette();
        let mut dismissed: Option<u64> = None;
        egui::Area::new(egui::Id::new("notice_area"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 72.0))
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.vertical(|ui| {
                    for notice in self.notices.iter().rev() {
                        let stroke = match notice.kind {
                            NoticeKind::Info => colors.border,
                            NoticeKind::Error => COLOR_ERROR,
                        };
                        egui::Frame::popup(ui.style())
                            .fill(colors.bg_secondary)
                            .stroke(egui::Stroke::new(1.0, stroke))
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(&notice.text)
                                            .small()
                                            .color(colors.text_primary),
                                    );
                                    if ui.small_button("x").clicked() {
                                        dismissed = Some(notice.id);
                                    }
                                });
                            });
                    }
                });
            });

        if let Some(id) = dismissed {
            self.dismiss_notice(id);
        }
    }
}
